use std::borrow::Cow;
use std::path::Path;
use std::path::PathBuf;

use regex::Regex;

use crate::DocckConfig;
use crate::DocckError;
use crate::DocckResult;
use crate::cache::ResourceCache;
use crate::directive::Directive;
use crate::directive::Directives;
use crate::query::PathQuery;
use crate::query::Selection;
use crate::query::split_selection;

/// Directive names that are recognized but have no check behind them.
pub const UNIMPLEMENTED_DIRECTIVES: [&str; 2] = ["valid-html", "valid-links"];

/// Result of a run where every directive held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckReport {
	/// Number of directives that passed.
	pub passed: usize,
}

/// Collapse every run of ASCII whitespace (newlines included) into one
/// space and drop leading and trailing whitespace. Other spaces such as
/// U+00A0 from `&nbsp;` are kept as they are.
pub fn normalize_whitespace(text: &str) -> String {
	text.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}

/// The third argument of `@has` / `@matches`, or the second for the
/// whole-file form.
#[derive(Debug)]
enum Pattern {
	/// An empty pattern only asks whether something matched at all.
	Presence,
	/// Whitespace-normalized substring (`@has`).
	Substring(String),
	/// Regular expression searched anywhere in the text (`@matches`).
	Regex(Regex),
}

impl Pattern {
	fn new(pattern: &str, regexp: bool) -> DocckResult<Self> {
		if pattern.is_empty() {
			return Ok(Self::Presence);
		}

		if !regexp {
			return Ok(Self::Substring(normalize_whitespace(pattern)));
		}

		Regex::new(&translate_anchors(pattern))
			.map(Self::Regex)
			.map_err(|e| {
				DocckError::InvalidPattern {
					pattern: pattern.to_string(),
					reason: e.to_string(),
				}
			})
	}

	fn is_match(&self, text: &str) -> bool {
		match self {
			Self::Presence => true,
			Self::Substring(pattern) => normalize_whitespace(text).contains(pattern.as_str()),
			Self::Regex(regex) => regex.is_match(text),
		}
	}
}

/// Adapt the anchors to the dialect templates are written in: `\Z` means
/// the very end of the text, and outside multi-line mode `$` also matches
/// just before a final newline.
fn translate_anchors(pattern: &str) -> Cow<'_, str> {
	if !pattern.contains("\\Z") && !pattern.contains('$') {
		return Cow::Borrowed(pattern);
	}

	let multiline = has_multiline_flag(pattern);
	let mut translated = String::with_capacity(pattern.len() + 8);
	let mut chars = pattern.chars().peekable();
	// Nesting depth of `[...]` classes.
	let mut class_depth = 0_usize;

	while let Some(ch) = chars.next() {
		match ch {
			'\\' => {
				translated.push(ch);
				match chars.next() {
					Some('Z') if class_depth == 0 => translated.push('z'),
					Some(other) => translated.push(other),
					None => {}
				}
			}
			'[' => {
				class_depth += 1;
				translated.push(ch);
				if chars.peek() == Some(&'^') {
					translated.push('^');
					chars.next();
				}
				// A `]` right after the opening bracket is literal.
				if chars.peek() == Some(&']') {
					translated.push(']');
					chars.next();
				}
			}
			']' if class_depth > 0 => {
				class_depth -= 1;
				translated.push(ch);
			}
			'$' if class_depth == 0 && !multiline => translated.push_str("(?:\\n?\\z)"),
			_ => translated.push(ch),
		}
	}

	Cow::Owned(translated)
}

/// Whether an inline flag group such as `(?m)` or `(?im:...)` turns on
/// multi-line mode anywhere in `pattern`.
fn has_multiline_flag(pattern: &str) -> bool {
	pattern.match_indices("(?").any(|(index, _)| {
		let rest = &pattern[index + 2..];
		let end = rest.find([')', ':']).unwrap_or(rest.len());
		let flags = &rest[..end];

		flags.chars().all(|ch| ch.is_ascii_alphabetic() || ch == '-')
			&& flags.split('-').next().is_some_and(|on| on.contains('m'))
	})
}

/// Evaluates directives against the documents of one output directory.
#[derive(Debug)]
pub struct Checker {
	cache: ResourceCache,
}

impl Checker {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self::with_config(root, &DocckConfig::default())
	}

	pub fn with_config(root: impl Into<PathBuf>, config: &DocckConfig) -> Self {
		Self {
			cache: ResourceCache::with_config(root, config),
		}
	}

	pub fn cache(&self) -> &ResourceCache {
		&self.cache
	}

	/// Run one directive. Fails with [`DocckError::CheckFailed`] when its
	/// outcome disagrees with its negation, or with a usage error tagged
	/// with the directive's line.
	pub fn check_directive(&mut self, directive: &Directive) -> DocckResult<()> {
		tracing::debug!(
			line = directive.line,
			directive = %directive.display_name(),
			args = ?directive.args,
			"checking directive"
		);

		let result = self
			.evaluate(directive)
			.map_err(|error| locate(error, directive))?;

		if result == directive.negated {
			return Err(DocckError::CheckFailed {
				command: directive.command.clone(),
				negated: directive.negated,
				line: directive.line,
			});
		}

		Ok(())
	}

	/// The raw truth value of a directive, before negation is applied.
	pub fn evaluate(&mut self, directive: &Directive) -> DocckResult<bool> {
		let command = directive.command.as_str();

		match command {
			"has" | "matches" => self.evaluate_match(directive, command == "matches"),
			"count" => self.evaluate_count(directive),
			_ if UNIMPLEMENTED_DIRECTIVES.contains(&command) => {
				Err(DocckError::Unimplemented {
					command: directive.command.clone(),
					line: directive.line,
				})
			}
			_ => {
				Err(DocckError::UnrecognizedDirective {
					command: directive.command.clone(),
					line: directive.line,
				})
			}
		}
	}

	fn evaluate_match(&mut self, directive: &Directive, regexp: bool) -> DocckResult<bool> {
		match directive.args.as_slice() {
			// @has PATH
			[path] if !regexp => {
				match self.cache.get_file(path) {
					Ok(_) => Ok(true),
					Err(error) if error.is_load_failure() => {
						tracing::debug!(%error, "treating unreadable file as missing");
						Ok(false)
					}
					Err(error) => Err(error),
				}
			}
			// @has PATH PATTERN / @matches PATH PATTERN
			[path, pattern] => {
				let data = self.cache.get_file(path)?;
				Ok(Pattern::new(pattern, regexp)?.is_match(data))
			}
			// @has PATH QUERY PATTERN / @matches PATH QUERY PATTERN
			[path, expression, pattern] => {
				let tree = self.cache.get_tree(path)?;
				let (query, selection) = split_selection(expression);
				let query = PathQuery::parse(query)?;
				let pattern = Pattern::new(pattern, regexp)?;

				let found = match selection {
					Selection::Attribute(name) => {
						query
							.select_attribute(tree, name)
							.into_iter()
							.any(|value| pattern.is_match(value))
					}
					Selection::Text => {
						query
							.select(tree)
							.into_iter()
							.any(|node| pattern.is_match(&node.flatten()))
					}
				};

				Ok(found)
			}
			args => Err(invalid_argument_count(directive, args.len())),
		}
	}

	fn evaluate_count(&mut self, directive: &Directive) -> DocckResult<bool> {
		let [path, expression, count] = directive.args.as_slice() else {
			return Err(invalid_argument_count(directive, directive.args.len()));
		};

		let expected: usize = count.trim().parse().map_err(|_| {
			DocckError::InvalidCount {
				value: count.clone(),
				line: directive.line,
			}
		})?;

		let query = PathQuery::parse(expression)?;
		let tree = self.cache.get_tree(path)?;
		let found = query.select(tree).len();
		tracing::debug!(query = query.as_str(), found, expected, "counted matches");

		Ok(found == expected)
	}
}

fn invalid_argument_count(directive: &Directive, got: usize) -> DocckError {
	DocckError::InvalidArgumentCount {
		command: directive.command.clone(),
		line: directive.line,
		got,
	}
}

/// Make sure an error raised while evaluating `directive` names its line.
fn locate(error: DocckError, directive: &Directive) -> DocckError {
	if error.line().is_some() {
		return error;
	}

	DocckError::Directive {
		command: directive.command.clone(),
		line: directive.line,
		source: Box::new(error),
	}
}

/// Check `directives` in order against the documents under `root`,
/// stopping at the first failure.
pub fn check<I>(root: impl Into<PathBuf>, config: &DocckConfig, directives: I) -> DocckResult<CheckReport>
where
	I: IntoIterator<Item = DocckResult<Directive>>,
{
	let mut checker = Checker::with_config(root, config);
	let mut report = CheckReport::default();

	for directive in directives {
		checker.check_directive(&directive?)?;
		report.passed += 1;
	}

	tracing::debug!(passed = report.passed, "all directives passed");
	Ok(report)
}

/// Read the template at `template` and check it against `root`.
pub fn check_template(root: &Path, template: &Path, config: &DocckConfig) -> DocckResult<CheckReport> {
	check(root, config, Directives::open(template)?)
}
