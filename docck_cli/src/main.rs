use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use docck_cli::DocckCli;
use docck_core::DocckConfig;
use docck_core::DocckError;
use docck_core::DocckResult;
use docck_core::check_template;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "DOCCK_LOG";

fn main() {
	let args = DocckCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose, use_color);

	match run(&args) {
		Ok(passed) => {
			if args.verbose {
				let summary = format!("{passed} directives passed");
				if use_color {
					println!("{}", summary.green());
				} else {
					println!("{summary}");
				}
			}
		}
		Err(error) => {
			let report: miette::Report = error.into();
			eprintln!("{report:?}");
			process::exit(1);
		}
	}
}

fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.init();
}

fn run(args: &DocckCli) -> DocckResult<usize> {
	let config = load_config(args)?;
	let report = check_template(&args.output_dir, &args.template, &config)?;

	Ok(report.passed)
}

fn load_config(args: &DocckCli) -> DocckResult<DocckConfig> {
	if let Some(path) = &args.config {
		tracing::debug!(path = %path.display(), "using explicit config file");
		return DocckConfig::load_file(path).map_err(|error| config_error(path, error));
	}

	let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
	Ok(DocckConfig::load(&cwd)?.unwrap_or_default())
}

/// An explicitly requested config file that cannot be read is reported
/// with its path.
fn config_error(path: &Path, error: DocckError) -> DocckError {
	match error {
		DocckError::Io(e) => {
			DocckError::FileOpen {
				path: path.display().to_string(),
				reason: e.to_string(),
			}
		}
		other => other,
	}
}
