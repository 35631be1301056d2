//! Restricted, absolute path queries over a parsed document.
//!
//! Only forward navigation is supported:
//!
//! - `//tag`, `//*` and `.//tag` search the whole document at any depth.
//! - `/tag`, `/*` select children, `/.` keeps the current node.
//! - `[@attr]`, `[@attr='value']` filter on attributes.
//! - `[tag]` keeps nodes that have a `tag` child.
//! - `[N]`, `[last()]` and `[last()-N]` pick by position among the siblings
//!   sharing the node's tag.
//!
//! A trailing `/@attr` or `/text()` is split off with [`split_selection`]
//! before the rest of the expression is parsed. Relative queries are
//! rejected rather than silently matching nothing.

use std::collections::HashMap;
use std::collections::HashSet;

use crate::DocckError;
use crate::DocckResult;
use crate::node::Node;

/// What a query expression asks for once its path has matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<'a> {
	/// The flattened text of each matched node.
	Text,
	/// The value of the named attribute on each matched node.
	Attribute(&'a str),
}

/// Split a query expression into its path and the selection that follows
/// it. The split happens at the first `/@`; otherwise a trailing `/text()`
/// is dropped since text is selected by default.
pub fn split_selection(expression: &str) -> (&str, Selection<'_>) {
	if let Some((path, attribute)) = expression.split_once("/@") {
		return (path, Selection::Attribute(attribute));
	}

	let path = expression.strip_suffix("/text()").unwrap_or(expression);
	(path, Selection::Text)
}

/// Rewrite `//...` to `.//...`. Anything else that is not already `.//...`
/// is not absolute and is rejected.
pub fn normalize_query(query: &str) -> DocckResult<String> {
	if query.starts_with("//") {
		Ok(format!(".{query}"))
	} else if query.starts_with(".//") {
		Ok(query.to_string())
	} else {
		Err(DocckError::NonAbsoluteQuery(query.to_string()))
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
	Child,
	Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeTest {
	Name(String),
	Any,
	Current,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Predicate {
	HasAttribute(String),
	AttributeEquals(String, String),
	HasChild(String),
	/// 1-based.
	Position(usize),
	/// `last()-N`; `last()` is `LastMinus(0)`.
	LastMinus(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
	axis: Axis,
	test: NodeTest,
	predicates: Vec<Predicate>,
}

/// A parsed path query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathQuery {
	source: String,
	steps: Vec<Step>,
}

/// A matched node together with the node it was reached from, which the
/// positional predicates need.
#[derive(Clone, Copy)]
struct Candidate<'a> {
	node: &'a Node,
	parent: Option<&'a Node>,
}

impl PathQuery {
	pub fn parse(query: &str) -> DocckResult<Self> {
		let normalized = normalize_query(query)?;
		let steps = QueryParser::new(query, &normalized[1..]).parse_steps()?;

		Ok(Self {
			source: query.to_string(),
			steps,
		})
	}

	/// The query as it was written.
	pub fn as_str(&self) -> &str {
		&self.source
	}

	/// All matching nodes in document order, without duplicates.
	pub fn select<'a>(&self, root: &'a Node) -> Vec<&'a Node> {
		let mut current = vec![Candidate {
			node: root,
			parent: None,
		}];

		for step in &self.steps {
			let mut seen: HashSet<*const Node> = HashSet::new();
			let mut next = Vec::new();

			for candidate in &current {
				step.collect(*candidate, &mut |found| {
					if seen.insert(std::ptr::from_ref(found.node)) {
						next.push(found);
					}
				});
			}

			next.retain(|candidate| step.predicates.iter().all(|p| p.matches(*candidate)));
			current = next;
		}

		// Child steps from nested contexts can interleave, so restore
		// document order once at the end.
		let order = document_order(root);
		let mut nodes: Vec<&'a Node> = current.into_iter().map(|candidate| candidate.node).collect();
		nodes.sort_by_key(|node| order.get(&std::ptr::from_ref(*node)).copied());
		nodes
	}

	/// Values of `name` on every matching node that carries it.
	pub fn select_attribute<'a>(&self, root: &'a Node, name: &str) -> Vec<&'a str> {
		self.select(root)
			.into_iter()
			.filter_map(|node| node.attribute(name))
			.collect()
	}

	/// Flattened text of every matching node.
	pub fn select_text(&self, root: &Node) -> Vec<String> {
		self.select(root).into_iter().map(Node::flatten).collect()
	}
}

impl Step {
	fn collect<'a>(&self, candidate: Candidate<'a>, found: &mut impl FnMut(Candidate<'a>)) {
		match (self.axis, &self.test) {
			(_, NodeTest::Current) => found(candidate),
			(Axis::Child, test) => {
				for child in &candidate.node.children {
					if test.matches(child) {
						found(Candidate {
							node: child,
							parent: Some(candidate.node),
						});
					}
				}
			}
			(Axis::Descendant, test) => walk_descendants(candidate.node, test, found),
		}
	}
}

/// Pre-order position of every node under `root`, `root` included.
fn document_order(root: &Node) -> HashMap<*const Node, usize> {
	fn visit(node: &Node, order: &mut HashMap<*const Node, usize>) {
		let position = order.len();
		order.insert(std::ptr::from_ref(node), position);
		for child in &node.children {
			visit(child, order);
		}
	}

	let mut order = HashMap::new();
	visit(root, &mut order);
	order
}

fn walk_descendants<'a>(
	node: &'a Node,
	test: &NodeTest,
	found: &mut impl FnMut(Candidate<'a>),
) {
	for child in &node.children {
		if test.matches(child) {
			found(Candidate {
				node: child,
				parent: Some(node),
			});
		}
		walk_descendants(child, test, found);
	}
}

impl NodeTest {
	fn matches(&self, node: &Node) -> bool {
		match self {
			Self::Name(name) => node.tag == *name,
			Self::Any => !node.is_document(),
			Self::Current => true,
		}
	}
}

impl Predicate {
	fn matches(&self, candidate: Candidate<'_>) -> bool {
		let node = candidate.node;

		match self {
			Self::HasAttribute(name) => node.has_attribute(name),
			Self::AttributeEquals(name, value) => node.attribute(name) == Some(value.as_str()),
			Self::HasChild(tag) => node.children_named(tag).next().is_some(),
			Self::Position(position) => {
				candidate.parent.is_some_and(|parent| {
					parent
						.children_named(&node.tag)
						.nth(position - 1)
						.is_some_and(|sibling| std::ptr::eq(sibling, node))
				})
			}
			Self::LastMinus(offset) => {
				candidate.parent.is_some_and(|parent| {
					let siblings: Vec<&Node> = parent.children_named(&node.tag).collect();
					siblings.len() > *offset
						&& std::ptr::eq(siblings[siblings.len() - 1 - offset], node)
				})
			}
		}
	}
}

/// Parser for the step list that follows the leading `.`.
struct QueryParser<'a> {
	query: &'a str,
	input: &'a str,
	position: usize,
}

impl<'a> QueryParser<'a> {
	fn new(query: &'a str, input: &'a str) -> Self {
		Self {
			query,
			input,
			position: 0,
		}
	}

	fn error(&self, reason: impl Into<String>) -> DocckError {
		DocckError::InvalidQuery {
			query: self.query.to_string(),
			reason: reason.into(),
		}
	}

	fn rest(&self) -> &'a str {
		&self.input[self.position..]
	}

	fn peek(&self) -> Option<char> {
		self.rest().chars().next()
	}

	fn is_eof(&self) -> bool {
		self.position >= self.input.len()
	}

	fn eat(&mut self, literal: &str) -> bool {
		if self.rest().starts_with(literal) {
			self.position += literal.len();
			true
		} else {
			false
		}
	}

	fn expect(&mut self, expected: char) -> DocckResult<()> {
		self.skip_whitespace();
		match self.peek() {
			Some(ch) if ch == expected => {
				self.position += ch.len_utf8();
				Ok(())
			}
			Some(ch) => Err(self.error(format!("expected `{expected}`, found `{ch}`"))),
			None => Err(self.error(format!("expected `{expected}`, found end of query"))),
		}
	}

	fn skip_whitespace(&mut self) {
		let rest = self.rest();
		self.position += rest.len() - rest.trim_start().len();
	}

	fn parse_steps(&mut self) -> DocckResult<Vec<Step>> {
		let mut steps = Vec::new();

		while !self.is_eof() {
			let axis = if self.eat("//") {
				Axis::Descendant
			} else if self.eat("/") {
				Axis::Child
			} else {
				return Err(self.error(format!("expected `/` before `{}`", self.rest())));
			};

			let test = self.parse_node_test(axis)?;
			let mut predicates = Vec::new();
			while self.peek() == Some('[') {
				predicates.push(self.parse_predicate()?);
			}

			steps.push(Step {
				axis,
				test,
				predicates,
			});
		}

		if steps.is_empty() {
			return Err(self.error("the query has no steps"));
		}

		Ok(steps)
	}

	fn parse_node_test(&mut self, axis: Axis) -> DocckResult<NodeTest> {
		if self.rest().starts_with("..") {
			return Err(self.error("parent steps (`..`) are not supported"));
		}
		if self.eat(".") {
			if axis == Axis::Descendant {
				return Err(self.error("`.` cannot follow `//`"));
			}
			return Ok(NodeTest::Current);
		}
		if self.eat("*") {
			return Ok(NodeTest::Any);
		}
		if self.peek() == Some('@') {
			return Err(self.error("an attribute can only be selected by the last step"));
		}

		let name = self.parse_name();
		if name.is_empty() {
			return Err(match self.peek() {
				Some(ch) => self.error(format!("expected a tag name, found `{ch}`")),
				None => self.error("expected a tag name, found end of query"),
			});
		}
		if self.peek() == Some('(') {
			return Err(self.error(format!(
				"`{name}()` is not supported here; `text()` may only end the query"
			)));
		}

		Ok(NodeTest::Name(name))
	}

	/// `[A-Za-z_][A-Za-z0-9_.:-]*`, or an empty string if no name starts
	/// here.
	fn parse_name(&mut self) -> String {
		let rest = self.rest();
		if !rest.starts_with(|ch: char| ch.is_ascii_alphabetic() || ch == '_') {
			return String::new();
		}

		let len = rest
			.find(|ch: char| !(ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | ':' | '-')))
			.unwrap_or(rest.len());
		self.position += len;
		rest[..len].to_string()
	}

	fn parse_number(&mut self) -> DocckResult<usize> {
		let rest = self.rest();
		let len = rest
			.find(|ch: char| !ch.is_ascii_digit())
			.unwrap_or(rest.len());
		if len == 0 {
			return Err(self.error("expected a number"));
		}

		self.position += len;
		rest[..len]
			.parse()
			.map_err(|_| self.error(format!("position `{}` is out of range", &rest[..len])))
	}

	fn parse_quoted(&mut self) -> DocckResult<String> {
		let Some(quote @ ('"' | '\'')) = self.peek() else {
			return Err(self.error("expected a quoted value"));
		};
		self.position += 1;

		let rest = self.rest();
		let Some(end) = rest.find(quote) else {
			return Err(self.error("unterminated quoted value"));
		};
		self.position += end + 1;

		Ok(rest[..end].to_string())
	}

	fn parse_predicate(&mut self) -> DocckResult<Predicate> {
		self.expect('[')?;
		self.skip_whitespace();

		let predicate = if self.eat("@") {
			let name = self.parse_name();
			if name.is_empty() {
				return Err(self.error("expected an attribute name after `@`"));
			}
			self.skip_whitespace();
			if self.eat("=") {
				self.skip_whitespace();
				let value = self.parse_quoted()?;
				Predicate::AttributeEquals(name, value)
			} else {
				Predicate::HasAttribute(name)
			}
		} else if self.peek().is_some_and(|ch| ch.is_ascii_digit()) {
			let position = self.parse_number()?;
			if position == 0 {
				return Err(self.error("positions start at 1"));
			}
			Predicate::Position(position)
		} else if self.eat("last()") {
			self.skip_whitespace();
			if self.eat("-") {
				self.skip_whitespace();
				Predicate::LastMinus(self.parse_number()?)
			} else {
				Predicate::LastMinus(0)
			}
		} else {
			let name = self.parse_name();
			if name.is_empty() {
				return Err(self.error("unsupported predicate"));
			}
			Predicate::HasChild(name)
		};

		self.expect(']')?;
		Ok(predicate)
	}
}

/// Parse `query` and return the matching nodes of `root`.
pub fn select<'a>(root: &'a Node, query: &str) -> DocckResult<Vec<&'a Node>> {
	Ok(PathQuery::parse(query)?.select(root))
}
