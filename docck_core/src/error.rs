use miette::Diagnostic;
use thiserror::Error;

use crate::markup::MarkupError;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum DocckError {
	#[error(transparent)]
	#[diagnostic(code(docck::io_error))]
	Io(#[from] std::io::Error),

	#[error("cannot open file `{path}`: {reason}")]
	#[diagnostic(code(docck::file_open))]
	FileOpen { path: String, reason: String },

	#[error("file too large: `{path}` is {size} bytes (limit: {limit} bytes)")]
	#[diagnostic(
		code(docck::file_too_large),
		help("increase `max_file_size` in docck.toml")
	)]
	FileTooLarge { path: String, size: u64, limit: u64 },

	#[error("cannot parse an HTML file `{path}`")]
	#[diagnostic(
		code(docck::html_parse),
		help("documents must have matching open and close tags and known entity references")
	)]
	HtmlParse {
		path: String,
		#[source]
		source: MarkupError,
	},

	#[error("tried to use the previous path `-` before any path was given")]
	#[diagnostic(
		code(docck::no_previous_path),
		help("spell out the path in the first directive that refers to a file")
	)]
	NoPreviousPath,

	#[error("trailing backslash at the end of the template (line {line})")]
	#[diagnostic(
		code(docck::trailing_backslash),
		help("remove the `\\` or add the line it continues onto")
	)]
	TrailingBackslash { line: usize },

	#[error("invalid template syntax at line {line}")]
	#[diagnostic(
		code(docck::invalid_syntax),
		help("separate the directive name from its arguments with whitespace")
	)]
	InvalidSyntax { line: usize },

	#[error("cannot split the arguments at line {line}: {reason}")]
	#[diagnostic(code(docck::invalid_quoting))]
	InvalidQuoting { line: usize, reason: String },

	#[error("invalid number of @{command} arguments at line {line} (got {got})")]
	#[diagnostic(
		code(docck::invalid_argument_count),
		help(
			"@has takes 1 to 3 arguments, @matches takes 2 or 3 and @count takes exactly 3"
		)
	)]
	InvalidArgumentCount {
		command: String,
		line: usize,
		got: usize,
	},

	#[error("invalid count `{value}` for @count at line {line}")]
	#[diagnostic(code(docck::invalid_count))]
	InvalidCount { value: String, line: usize },

	#[error("unimplemented @{command} at line {line}")]
	#[diagnostic(code(docck::unimplemented))]
	Unimplemented { command: String, line: usize },

	#[error("unrecognized @{command} at line {line}")]
	#[diagnostic(
		code(docck::unrecognized_directive),
		help("available directives: has, matches, count")
	)]
	UnrecognizedDirective { command: String, line: usize },

	#[error("@{}{command} check failed at line {line}", negation_marker(.negated))]
	#[diagnostic(code(docck::check_failed))]
	CheckFailed {
		command: String,
		negated: bool,
		line: usize,
	},

	#[error("@{command} at line {line} failed to evaluate")]
	#[diagnostic(code(docck::directive))]
	Directive {
		command: String,
		line: usize,
		#[source]
		source: Box<DocckError>,
	},

	#[error("non-absolute path query `{0}` is not supported")]
	#[diagnostic(
		code(docck::non_absolute_query),
		help("start the query with `//` or `.//`")
	)]
	NonAbsoluteQuery(String),

	#[error("invalid path query `{query}`: {reason}")]
	#[diagnostic(
		code(docck::invalid_query),
		help(
			"supported: `tag`, `*`, `.`, `/`, `//`, `[@attr]`, `[@attr='value']`, `[tag]`, \
			 `[N]`, `[last()]`, `[last()-N]`, `text()` and `@attr` as the last step"
		)
	)]
	InvalidQuery { query: String, reason: String },

	#[error("invalid regular expression `{pattern}`: {reason}")]
	#[diagnostic(code(docck::invalid_pattern))]
	InvalidPattern { pattern: String, reason: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(docck::config_parse),
		help("check that docck.toml is valid TOML with `max_file_size` and/or an [entities] table")
	)]
	ConfigParse(String),
}

impl DocckError {
	/// The template line this error already points at, if any.
	pub fn line(&self) -> Option<usize> {
		match self {
			Self::TrailingBackslash { line }
			| Self::InvalidSyntax { line }
			| Self::InvalidQuoting { line, .. }
			| Self::InvalidArgumentCount { line, .. }
			| Self::InvalidCount { line, .. }
			| Self::Unimplemented { line, .. }
			| Self::UnrecognizedDirective { line, .. }
			| Self::CheckFailed { line, .. }
			| Self::Directive { line, .. } => Some(*line),
			_ => None,
		}
	}

	/// Returns true when the error means the file could not be loaded, as
	/// opposed to a mistake in the template itself.
	pub fn is_load_failure(&self) -> bool {
		matches!(
			self,
			Self::FileOpen { .. } | Self::FileTooLarge { .. } | Self::Io(_)
		)
	}
}

fn negation_marker(negated: &bool) -> &'static str {
	if *negated { "!" } else { "" }
}

pub type DocckResult<T> = Result<T, DocckError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
