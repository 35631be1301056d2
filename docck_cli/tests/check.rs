mod common;

use clap::Parser;
use docck_cli::DocckCli;
use docck_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;
use rstest::rstest;

#[test]
fn check_passes_silently() -> AnyEmptyResult {
	let tmp = common::project(
		"// @has index.html\n// @has - '//h1[@class=\"fqn\"]/span[2]/a/@class' x\n// @count - \
		 //span 2\n// @!has - //span[3]\n",
	)?;

	common::docck_cmd()
		.arg(tmp.path().join("doc"))
		.arg(tmp.path().join("template.rs"))
		.assert()
		.success()
		.stdout(predicates::str::is_empty())
		.stderr(predicates::str::is_empty());

	Ok(())
}

#[test]
fn check_verbose_prints_summary() -> AnyEmptyResult {
	let tmp = common::project("// @has index.html //span A\n// @matches - //h1 '^AB$'\n")?;

	common::docck_cmd()
		.arg("--verbose")
		.arg(tmp.path().join("doc"))
		.arg(tmp.path().join("template.rs"))
		.assert()
		.success()
		.stdout(predicates::str::contains("2 directives passed"))
		.stderr(predicates::str::contains("checking directive"));

	Ok(())
}

#[test]
fn check_fails_on_first_failed_directive() -> AnyEmptyResult {
	let tmp = common::project("// @has index.html\n// @!has - //span A\n// @has missing.html\n")?;

	common::docck_cmd()
		.arg(tmp.path().join("doc"))
		.arg(tmp.path().join("template.rs"))
		.assert()
		.code(1)
		.stderr(predicates::str::contains("@!has check failed at line 2"))
		.stderr(predicates::str::contains("docck::check_failed"))
		.stderr(predicates::str::contains("line 3").not());

	Ok(())
}

#[test]
fn check_fails_on_wrong_count() -> AnyEmptyResult {
	let tmp = common::project("\n\n// @count index.html //span 3\n")?;

	common::docck_cmd()
		.arg(tmp.path().join("doc"))
		.arg(tmp.path().join("template.rs"))
		.assert()
		.code(1)
		.stderr(predicates::str::contains("@count check failed at line 3"));

	Ok(())
}

#[rstest]
#[case::unimplemented("// @valid-html index.html\n", "unimplemented @valid-html at line 1")]
#[case::unrecognized("// @contains index.html x\n", "unrecognized @contains at line 1")]
#[case::argument_count("// @matches index.html\n", "invalid number of @matches arguments at line 1")]
#[case::trailing_backslash("// @has index.html \\", "trailing backslash")]
#[case::previous_path("// @has - //p x\n", "@has at line 1 failed to evaluate")]
#[case::non_absolute("// @has index.html span A\n", "non-absolute path query `span`")]
fn check_reports_usage_errors(#[case] template: &str, #[case] message: &str) -> AnyEmptyResult {
	let tmp = common::project(template)?;

	common::docck_cmd()
		.arg(tmp.path().join("doc"))
		.arg(tmp.path().join("template.rs"))
		.assert()
		.code(1)
		.stderr(predicates::str::contains(message));

	Ok(())
}

#[test]
fn check_reports_unparsable_document() -> AnyEmptyResult {
	let tmp = common::project("// @has broken.html //p x\n")?;
	common::write(tmp.path(), "doc/broken.html", "<div>\n<p>\n</div>")?;

	common::docck_cmd()
		.arg(tmp.path().join("doc"))
		.arg(tmp.path().join("template.rs"))
		.assert()
		.code(1)
		.stderr(predicates::str::contains("cannot parse an HTML file `broken.html`"))
		.stderr(predicates::str::contains("line 3: mismatched end tag"));

	Ok(())
}

#[test]
fn check_missing_template() -> AnyEmptyResult {
	let tmp = common::project("")?;

	common::docck_cmd()
		.arg(tmp.path().join("doc"))
		.arg(tmp.path().join("nope.rs"))
		.assert()
		.code(1)
		.stderr(predicates::str::contains("cannot open file"));

	Ok(())
}

#[test]
fn check_empty_template_passes() -> AnyEmptyResult {
	let tmp = common::project("fn main() {}\n")?;

	common::docck_cmd()
		.arg("-v")
		.arg(tmp.path().join("doc"))
		.arg(tmp.path().join("template.rs"))
		.assert()
		.success()
		.stdout(predicates::str::contains("0 directives passed"));

	Ok(())
}

#[rstest]
#[case::no_arguments(&[])]
#[case::one_argument(&["doc"])]
fn check_requires_both_positionals(#[case] args: &[&str]) {
	common::docck_cmd()
		.args(args)
		.assert()
		.code(2)
		.stderr(predicates::str::contains("Usage"));
}

#[test]
fn cli_parses_options() -> AnyEmptyResult {
	let cli = DocckCli::try_parse_from([
		"docck",
		"--config",
		"custom.toml",
		"-v",
		"--no-color",
		"target/doc",
		"tests/foo.rs",
	])?;

	assert_eq!(cli.output_dir.to_str(), Some("target/doc"));
	assert_eq!(cli.template.to_str(), Some("tests/foo.rs"));
	assert_eq!(
		cli.config.as_deref().and_then(|path| path.to_str()),
		Some("custom.toml")
	);
	assert!(cli.verbose);
	assert!(cli.no_color);

	Ok(())
}
