use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Check generated HTML documentation against template directives.",
	long_about = "docck reads a template (usually the source file the documentation was \
	              generated from), collects its `@has`, `@matches` and `@count` directives and \
	              checks each of them, in order, against the HTML files under the output \
	              directory.\n\nThe first directive that does not hold stops the run with a \
	              non-zero exit code.\n\nDirectives:\n  @has PATH                   file \
	              exists\n  @has PATH PATTERN           whitespace-normalized substring\n  \
	              @has PATH XPATH PATTERN     text or attribute of a matched node\n  @matches \
	              PATH [XPATH] REGEX  same, with a regular expression\n  @count PATH XPATH \
	              COUNT      exact number of matches\n\nPrefix a directive with `!` (`@!has`) to \
	              expect it to fail."
)]
pub struct DocckCli {
	/// Directory the documentation was generated into. Paths in directives
	/// are relative to it.
	pub output_dir: PathBuf,

	/// Template file containing the directives.
	pub template: PathBuf,

	/// Path to a config file. Defaults to the first of `docck.toml`,
	/// `.docck.toml` and `.config/docck.toml` found in the current
	/// directory.
	#[arg(long, short)]
	pub config: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}
