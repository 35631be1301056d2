use std::collections::BTreeMap;

use thiserror::Error;

use crate::entities::is_void_element;
use crate::entities::lookup_entity;
use crate::node::Node;

/// Elements whose content is raw text up to the matching close tag.
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// The document could not be turned into a tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct MarkupError {
	/// 1-indexed line where the problem was detected.
	pub line: usize,
	pub message: String,
}

impl MarkupError {
	fn new(line: usize, message: impl Into<String>) -> Self {
		Self {
			line,
			message: message.into(),
		}
	}
}

/// Events produced by the tolerant tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MarkupEvent<'a> {
	StartTag {
		name: String,
		attributes: Vec<(String, String)>,
		self_closing: bool,
	},
	EndTag {
		name: String,
	},
	Text(&'a str),
	/// `&name;` with the name only.
	EntityRef(&'a str),
	/// `&#...;` with the part after `#`, e.g. `x41` or `65`.
	CharRef(&'a str),
}

/// Walks the raw markup and yields events. Comments, declarations and
/// processing instructions are skipped.
pub(crate) struct MarkupScanner<'a> {
	source: &'a str,
	offset: usize,
	line: usize,
	/// Set after a `<script>` or `<style>` start tag.
	raw_text_tag: Option<String>,
	/// Lenient decoding table used for attribute values.
	entities: &'a BTreeMap<String, String>,
	failed: bool,
}

impl<'a> MarkupScanner<'a> {
	pub(crate) fn new(source: &'a str, entities: &'a BTreeMap<String, String>) -> Self {
		Self {
			source,
			offset: 0,
			line: 1,
			raw_text_tag: None,
			entities,
			failed: false,
		}
	}

	fn rest(&self) -> &'a str {
		&self.source[self.offset..]
	}

	fn advance(&mut self, len: usize) {
		let consumed = &self.source[self.offset..self.offset + len];
		self.line += consumed.matches('\n').count();
		self.offset += len;
	}

	/// Consume `len` bytes and hand back the consumed slice.
	fn consume(&mut self, len: usize) -> &'a str {
		let slice = &self.source[self.offset..self.offset + len];
		self.advance(len);
		slice
	}

	fn error(&self, message: impl Into<String>) -> MarkupError {
		MarkupError::new(self.line, message)
	}

	/// Skip past `terminator`, failing with `what` if it never shows up.
	fn skip_past(&mut self, terminator: &str, what: &str) -> Result<(), MarkupError> {
		match self.rest().find(terminator) {
			Some(index) => {
				self.advance(index + terminator.len());
				Ok(())
			}
			None => Err(self.error(format!("unterminated {what}"))),
		}
	}

	fn next_event(&mut self) -> Result<Option<MarkupEvent<'a>>, MarkupError> {
		loop {
			if self.offset >= self.source.len() {
				return Ok(None);
			}

			if let Some(tag) = self.raw_text_tag.take() {
				let end = find_close_tag(self.rest(), &tag).unwrap_or(self.rest().len());
				if end > 0 {
					return Ok(Some(MarkupEvent::Text(self.consume(end))));
				}
				continue;
			}

			let rest = self.rest();

			if rest.starts_with("<!--") {
				self.advance(4);
				self.skip_past("-->", "comment")?;
				continue;
			}

			if rest.starts_with("<!") || rest.starts_with("<?") {
				self.skip_past(">", "declaration")?;
				continue;
			}

			if rest.starts_with("</") {
				return self.scan_end_tag().map(Some);
			}

			if rest.starts_with('<') {
				if rest[1..].starts_with(|ch: char| ch.is_ascii_alphabetic()) {
					return self.scan_start_tag().map(Some);
				}
				return Ok(Some(MarkupEvent::Text(self.consume(1))));
			}

			if rest.starts_with('&') {
				return self.scan_reference().map(Some);
			}

			let end = rest.find(['<', '&']).unwrap_or(rest.len());
			return Ok(Some(MarkupEvent::Text(self.consume(end))));
		}
	}

	fn scan_end_tag(&mut self) -> Result<MarkupEvent<'a>, MarkupError> {
		self.advance(2);
		let len = name_len(self.rest());
		if len == 0 {
			return Err(self.error("malformed end tag"));
		}
		let name = self.consume(len).to_ascii_lowercase();
		self.skip_past(">", &format!("end tag `</{name}`"))?;

		Ok(MarkupEvent::EndTag { name })
	}

	fn scan_start_tag(&mut self) -> Result<MarkupEvent<'a>, MarkupError> {
		self.advance(1);
		let len = name_len(self.rest());
		let name = self.consume(len).to_ascii_lowercase();
		let mut attributes: Vec<(String, String)> = Vec::new();

		let self_closing = loop {
			self.skip_whitespace();
			let rest = self.rest();

			if rest.is_empty() {
				return Err(self.error(format!("unterminated start tag `<{name}`")));
			}
			if rest.starts_with("/>") {
				self.advance(2);
				break true;
			}
			if rest.starts_with('>') {
				self.advance(1);
				break false;
			}
			if rest.starts_with('/') {
				self.advance(1);
				continue;
			}

			let (key, value) = self.scan_attribute(&name)?;
			if let Some(existing) = attributes.iter_mut().find(|(k, _)| *k == key) {
				existing.1 = value;
			} else {
				attributes.push((key, value));
			}
		};

		if !self_closing && RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
			self.raw_text_tag = Some(name.clone());
		}

		Ok(MarkupEvent::StartTag {
			name,
			attributes,
			self_closing,
		})
	}

	fn scan_attribute(&mut self, tag: &str) -> Result<(String, String), MarkupError> {
		let rest = self.rest();
		let len = rest
			.find(|ch: char| ch.is_whitespace() || matches!(ch, '=' | '>' | '/'))
			.unwrap_or(rest.len());
		// A stray `=` still needs to make progress.
		let len = if len == 0 { 1 } else { len };
		let key = self.consume(len).to_ascii_lowercase();

		self.skip_whitespace();
		if !self.rest().starts_with('=') {
			return Ok((key, String::new()));
		}
		self.advance(1);
		self.skip_whitespace();

		let rest = self.rest();
		let raw = match rest.chars().next() {
			Some(quote @ ('"' | '\'')) => {
				let Some(end) = rest[1..].find(quote) else {
					return Err(self.error(format!(
						"unterminated value for attribute `{key}` in `<{tag}>`"
					)));
				};
				self.advance(1);
				let value = self.consume(end);
				self.advance(1);
				value
			}
			_ => {
				let end = rest
					.find(|ch: char| ch.is_whitespace() || ch == '>')
					.unwrap_or(rest.len());
				self.consume(end)
			}
		};

		Ok((key, decode_lenient(raw, self.entities)))
	}

	fn scan_reference(&mut self) -> Result<MarkupEvent<'a>, MarkupError> {
		let rest = self.rest();

		if let Some(number) = rest.strip_prefix("&#") {
			let len = match number.strip_prefix(['x', 'X']) {
				Some(hex) => {
					let digits = hex.find(|ch: char| !ch.is_ascii_hexdigit()).unwrap_or(hex.len());
					if digits == 0 { 0 } else { digits + 1 }
				}
				None => number
					.find(|ch: char| !ch.is_ascii_digit())
					.unwrap_or(number.len()),
			};

			if len == 0 {
				return Err(self.error("malformed character reference"));
			}

			self.advance(2);
			let reference = self.consume(len);
			self.skip_semicolon();
			return Ok(MarkupEvent::CharRef(reference));
		}

		let len = entity_name_len(&rest[1..]);
		if len == 0 {
			return Ok(MarkupEvent::Text(self.consume(1)));
		}

		self.advance(1);
		let name = self.consume(len);
		self.skip_semicolon();

		Ok(MarkupEvent::EntityRef(name))
	}

	fn skip_semicolon(&mut self) {
		if self.rest().starts_with(';') {
			self.advance(1);
		}
	}

	fn skip_whitespace(&mut self) {
		let rest = self.rest();
		let len = rest
			.find(|ch: char| !ch.is_whitespace())
			.unwrap_or(rest.len());
		self.advance(len);
	}
}

impl<'a> Iterator for MarkupScanner<'a> {
	type Item = Result<(usize, MarkupEvent<'a>), MarkupError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed {
			return None;
		}

		let line = self.line;
		match self.next_event() {
			Ok(event) => event.map(|event| Ok((line, event))),
			Err(error) => {
				self.failed = true;
				Some(Err(error))
			}
		}
	}
}

/// Length of a tag name at the start of `input`.
fn name_len(input: &str) -> usize {
	if !input.starts_with(|ch: char| ch.is_ascii_alphabetic()) {
		return 0;
	}

	input
		.find(|ch: char| ch.is_whitespace() || matches!(ch, '/' | '>'))
		.unwrap_or(input.len())
}

/// Length of an entity name (`[a-zA-Z][-.a-zA-Z0-9]*`) at the start of
/// `input`.
fn entity_name_len(input: &str) -> usize {
	if !input.starts_with(|ch: char| ch.is_ascii_alphabetic()) {
		return 0;
	}

	input
		.find(|ch: char| !(ch.is_ascii_alphanumeric() || matches!(ch, '-' | '.')))
		.unwrap_or(input.len())
}

/// Byte offset of `</tag` (ASCII case-insensitive) in `input`.
fn find_close_tag(input: &str, tag: &str) -> Option<usize> {
	let needle = format!("</{tag}");
	input
		.as_bytes()
		.windows(needle.len())
		.position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

fn resolve_entity(name: &str, entities: &BTreeMap<String, String>) -> Option<String> {
	lookup_entity(name)
		.map(String::from)
		.or_else(|| entities.get(name).cloned())
}

fn decode_char_ref(reference: &str) -> Option<char> {
	let code = match reference.strip_prefix(['x', 'X']) {
		Some(hex) => u32::from_str_radix(hex, 16).ok()?,
		None => reference.parse::<u32>().ok()?,
	};

	char::from_u32(code)
}

/// Decode character references inside an attribute value. Anything that
/// does not resolve is kept verbatim.
fn decode_lenient(raw: &str, entities: &BTreeMap<String, String>) -> String {
	if !raw.contains('&') {
		return raw.to_string();
	}

	let mut decoded = String::with_capacity(raw.len());
	let mut rest = raw;

	while let Some(index) = rest.find('&') {
		decoded.push_str(&rest[..index]);
		rest = &rest[index..];

		let body = &rest[1..];
		let end = body.find(';');
		let replacement = end.and_then(|end| {
			let reference = &body[..end];
			match reference.strip_prefix('#') {
				Some(number) => decode_char_ref(number).map(String::from),
				None => resolve_entity(reference, entities),
			}
		});

		match (replacement, end) {
			(Some(text), Some(end)) => {
				decoded.push_str(&text);
				rest = &body[end + 1..];
			}
			_ => {
				decoded.push('&');
				rest = body;
			}
		}
	}

	decoded.push_str(rest);
	decoded
}

/// Parse a well-formed HTML document into a tree.
///
/// The returned node is a synthetic document node whose children are the
/// top-level elements, so the outermost element can be found by path
/// queries as well.
pub fn parse_html(source: &str) -> Result<Node, MarkupError> {
	parse_html_with_entities(source, &BTreeMap::new())
}

/// Like [`parse_html`] but with extra named character references
/// consulted after the built-in table.
pub fn parse_html_with_entities(
	source: &str,
	entities: &BTreeMap<String, String>,
) -> Result<Node, MarkupError> {
	let mut builder = TreeBuilder::new();
	let mut line = 1;

	for event in MarkupScanner::new(source, entities) {
		let (event_line, event) = event?;
		line = event_line;

		match event {
			MarkupEvent::StartTag {
				name,
				attributes,
				self_closing,
			} => {
				let void = self_closing || is_void_element(&name);
				builder.start(Node::new(name, attributes));
				if void {
					builder.end_current();
				}
			}
			MarkupEvent::EndTag { name } => builder.end(&name, line)?,
			MarkupEvent::Text(text) => builder.data(text),
			MarkupEvent::EntityRef(name) => {
				let Some(text) = resolve_entity(name, entities) else {
					return Err(MarkupError::new(line, format!("unknown entity `&{name};`")));
				};
				builder.data(&text);
			}
			MarkupEvent::CharRef(reference) => {
				let Some(ch) = decode_char_ref(reference) else {
					return Err(MarkupError::new(
						line,
						format!("invalid character reference `&#{reference};`"),
					));
				};
				builder.data(ch.encode_utf8(&mut [0; 4]));
			}
		}
	}

	builder.finish(line)
}

/// Explicit stack of the elements that are still open. The bottom entry is
/// always the document node.
struct TreeBuilder {
	stack: Vec<Node>,
}

impl TreeBuilder {
	fn new() -> Self {
		Self {
			stack: vec![Node::document()],
		}
	}

	fn start(&mut self, node: Node) {
		self.stack.push(node);
	}

	/// Close the innermost open element and attach it to its parent.
	fn end_current(&mut self) {
		if self.stack.len() < 2 {
			return;
		}

		if let Some(node) = self.stack.pop() {
			if let Some(parent) = self.stack.last_mut() {
				parent.children.push(node);
			}
		}
	}

	fn end(&mut self, tag: &str, line: usize) -> Result<(), MarkupError> {
		let current = match self.stack.last() {
			Some(node) if !node.is_document() => node.tag.as_str(),
			_ => {
				return Err(MarkupError::new(
					line,
					format!("unexpected end tag `</{tag}>`"),
				));
			}
		};

		if current != tag {
			return Err(MarkupError::new(
				line,
				format!("mismatched end tag `</{tag}>`, expected `</{current}>`"),
			));
		}

		self.end_current();
		Ok(())
	}

	/// Append text at the current insertion point: the open element's text
	/// if it has no children yet, otherwise the tail of its last child.
	fn data(&mut self, text: &str) {
		let Some(current) = self.stack.last_mut() else {
			return;
		};

		match current.children.last_mut() {
			Some(last) => last.tail.push_str(text),
			None => current.text.push_str(text),
		}
	}

	fn finish(mut self, line: usize) -> Result<Node, MarkupError> {
		if self.stack.len() > 1 {
			let tag = self
				.stack
				.last()
				.map(|node| node.tag.clone())
				.unwrap_or_default();
			return Err(MarkupError::new(line, format!("unclosed tag `<{tag}>`")));
		}

		let document = self.stack.pop().unwrap_or_default();
		if document.children.is_empty() {
			return Err(MarkupError::new(line, "missing top-level element"));
		}

		Ok(document)
	}
}
