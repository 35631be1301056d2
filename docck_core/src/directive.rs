use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use crate::DocckError;
use crate::DocckResult;
use crate::lexer::split_arguments;

/// One `@command` assertion from a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
	/// `@!command` expects the check to fail.
	pub negated: bool,
	/// Letters, optionally joined by single hyphens (`valid-html`).
	pub command: String,
	/// Arguments after shell-style splitting.
	pub args: Vec<String>,
	/// 1-indexed line the directive starts on.
	pub line: usize,
}

impl Directive {
	/// `@has`, `@!matches`, ...
	pub fn display_name(&self) -> String {
		format!("@{}{}", if self.negated { "!" } else { "" }, self.command)
	}
}

/// Lazily reads a template and yields its directives in order. Iteration
/// stops after the first error.
pub struct Directives<R> {
	lines: LogicalLines<R>,
	failed: bool,
}

impl Directives<BufReader<File>> {
	/// Open the template at `path`.
	pub fn open(path: impl AsRef<Path>) -> DocckResult<Self> {
		let path = path.as_ref();
		let file = File::open(path).map_err(|e| DocckError::FileOpen {
			path: path.display().to_string(),
			reason: e.to_string(),
		})?;

		Ok(Self::new(BufReader::new(file)))
	}
}

impl<R: BufRead> Directives<R> {
	pub fn new(reader: R) -> Self {
		Self {
			lines: LogicalLines::new(reader),
			failed: false,
		}
	}
}

impl<R: BufRead> Iterator for Directives<R> {
	type Item = DocckResult<Directive>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed {
			return None;
		}

		for logical in self.lines.by_ref() {
			let result = logical.and_then(|(line, content)| parse_directive(line, &content));

			match result {
				Ok(Some(directive)) => return Some(Ok(directive)),
				Ok(None) => {}
				Err(error) => {
					self.failed = true;
					return Some(Err(error));
				}
			}
		}

		None
	}
}

/// Parse every directive in `content`, stopping at the first error.
pub fn parse_directives(content: &str) -> DocckResult<Vec<Directive>> {
	Directives::new(content.as_bytes()).collect()
}

/// Merges backslash-continued physical lines into logical lines, each
/// tagged with the number of its first physical line.
///
/// The continuation line loses the prefix it shares with the previous
/// (already merged) line and any whitespace after it, so indentation used
/// to line up arguments does not end up in the value.
struct LogicalLines<R> {
	reader: R,
	line_number: usize,
	buffer: Vec<u8>,
	finished: bool,
}

impl<R: BufRead> LogicalLines<R> {
	fn new(reader: R) -> Self {
		Self {
			reader,
			line_number: 0,
			buffer: Vec::new(),
			finished: false,
		}
	}

	/// Read the next physical line without its terminator.
	fn read_physical(&mut self) -> DocckResult<Option<String>> {
		self.buffer.clear();
		if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
			return Ok(None);
		}

		self.line_number += 1;
		let line = String::from_utf8_lossy(&self.buffer);
		Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
	}

	fn next_logical(&mut self) -> DocckResult<Option<(usize, String)>> {
		let mut catenated = String::new();
		let mut first_line = None;
		let mut continued: Option<String> = None;

		loop {
			let Some(physical) = self.read_physical()? else {
				if continued.is_some() {
					return Err(DocckError::TrailingBackslash {
						line: self.line_number,
					});
				}
				return Ok(None);
			};

			let mut line = physical.as_str();
			if let Some(previous) = &continued {
				line = line[common_prefix_len(line, previous)..].trim_start();
			}

			let first = *first_line.get_or_insert(self.line_number);

			match line.strip_suffix('\\') {
				Some(stripped) => {
					catenated.push_str(stripped);
					continued = Some(stripped.to_string());
				}
				None => {
					catenated.push_str(line);
					return Ok(Some((first, catenated)));
				}
			}
		}
	}
}

impl<R: BufRead> Iterator for LogicalLines<R> {
	type Item = DocckResult<(usize, String)>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.finished {
			return None;
		}

		match self.next_logical() {
			Ok(Some(line)) => Some(Ok(line)),
			Ok(None) => {
				self.finished = true;
				None
			}
			Err(error) => {
				self.finished = true;
				Some(Err(error))
			}
		}
	}
}

/// Byte length of the longest common prefix of `line` and `previous`.
fn common_prefix_len(line: &str, previous: &str) -> usize {
	line.char_indices()
		.zip(previous.chars())
		.find(|((_, a), b)| a != b)
		.map_or_else(
			|| line.len().min(previous.len()),
			|((index, _), _)| index,
		)
}

/// Length of a command name (`[A-Za-z]+(-[A-Za-z]+)*`) at the start of
/// `input`.
fn command_len(input: &str) -> usize {
	let bytes = input.as_bytes();
	let letters = |from: usize| {
		bytes[from..]
			.iter()
			.take_while(|byte| byte.is_ascii_alphabetic())
			.count()
	};

	let mut len = letters(0);
	if len == 0 {
		return 0;
	}

	while bytes.get(len) == Some(&b'-') {
		let more = letters(len + 1);
		if more == 0 {
			break;
		}
		len += 1 + more;
	}

	len
}

/// Find the directive on a logical line, if there is one.
///
/// The `@` must start the line or follow whitespace. Text before it is
/// ignored, and an `@` that is not followed by a command name is skipped
/// in favour of a later one.
fn parse_directive(line: usize, content: &str) -> DocckResult<Option<Directive>> {
	for (index, _) in content.match_indices('@') {
		let detached = content[..index]
			.chars()
			.next_back()
			.is_none_or(char::is_whitespace);
		if !detached {
			continue;
		}

		let rest = &content[index + 1..];
		let (negated, rest) = match rest.strip_prefix('!') {
			Some(rest) => (true, rest),
			None => (false, rest),
		};

		let len = command_len(rest);
		if len == 0 {
			continue;
		}

		let (command, args) = rest.split_at(len);
		if !args.is_empty() && !args.starts_with(char::is_whitespace) {
			return Err(DocckError::InvalidSyntax { line });
		}

		let args =
			split_arguments(args).map_err(|reason| DocckError::InvalidQuoting { line, reason })?;

		return Ok(Some(Directive {
			negated,
			command: command.to_string(),
			args,
			line,
		}));
	}

	Ok(None)
}
