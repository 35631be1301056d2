mod common;

use docck_core::AnyEmptyResult;

const TEMPLATE: &str = "// @has index.html\n// @has - //span A\n";

#[test]
fn config_discovered_in_current_directory() -> AnyEmptyResult {
	let tmp = common::project("// @has index.html //span A\n")?;
	common::write(tmp.path(), "docck.toml", "max_file_size = 16\n")?;

	common::docck_cmd()
		.current_dir(tmp.path())
		.arg("doc")
		.arg("template.rs")
		.assert()
		.code(1)
		.stderr(predicates::str::contains("file too large"));

	Ok(())
}

#[test]
fn config_dot_config_directory() -> AnyEmptyResult {
	let tmp = common::project("// @!has index.html\n")?;
	common::write(tmp.path(), ".config/docck.toml", "max_file_size = 16\n")?;

	// A document over the limit counts as missing for an existence test.
	common::docck_cmd()
		.current_dir(tmp.path())
		.arg("doc")
		.arg("template.rs")
		.assert()
		.success();

	Ok(())
}

#[test]
fn config_prefers_docck_toml_over_other_candidates() -> AnyEmptyResult {
	let tmp = common::project(TEMPLATE)?;
	common::write(tmp.path(), "docck.toml", "max_file_size = 1048576\n")?;
	common::write(tmp.path(), ".docck.toml", "max_file_size = 16\n")?;
	common::write(tmp.path(), ".config/docck.toml", "max_file_size = 16\n")?;

	common::docck_cmd()
		.current_dir(tmp.path())
		.arg("doc")
		.arg("template.rs")
		.assert()
		.success();

	Ok(())
}

#[test]
fn config_explicit_path_overrides_discovery() -> AnyEmptyResult {
	let tmp = common::project(TEMPLATE)?;
	common::write(tmp.path(), "docck.toml", "max_file_size = 16\n")?;
	common::write(tmp.path(), "ci/docck.toml", "max_file_size = 1048576\n")?;

	common::docck_cmd()
		.current_dir(tmp.path())
		.arg("--config")
		.arg("ci/docck.toml")
		.arg("doc")
		.arg("template.rs")
		.assert()
		.success();

	Ok(())
}

#[test]
fn config_entities_extend_builtin_table() -> AnyEmptyResult {
	let tmp = common::project("// @has page.html //p '{x}'\n")?;
	common::write(tmp.path(), "doc/page.html", "<p>&lbrace;x&rbrace;</p>")?;
	common::write(
		tmp.path(),
		"docck.toml",
		"[entities]\nlbrace = \"{\"\nrbrace = \"}\"\n",
	)?;

	common::docck_cmd()
		.current_dir(tmp.path())
		.arg("doc")
		.arg("template.rs")
		.assert()
		.success();

	// Without the config the entity is unknown.
	std::fs::remove_file(tmp.path().join("docck.toml"))?;
	common::docck_cmd()
		.current_dir(tmp.path())
		.arg("doc")
		.arg("template.rs")
		.assert()
		.code(1)
		.stderr(predicates::str::contains("unknown entity `&lbrace;`"));

	Ok(())
}

#[test]
fn config_invalid_file_is_reported() -> AnyEmptyResult {
	let tmp = common::project(TEMPLATE)?;
	common::write(tmp.path(), "docck.toml", "max_file_size = \"big\"\n")?;

	common::docck_cmd()
		.current_dir(tmp.path())
		.arg("doc")
		.arg("template.rs")
		.assert()
		.code(1)
		.stderr(predicates::str::contains("failed to parse config file"));

	Ok(())
}

#[test]
fn config_missing_explicit_path_is_reported() -> AnyEmptyResult {
	let tmp = common::project(TEMPLATE)?;

	common::docck_cmd()
		.current_dir(tmp.path())
		.arg("--config")
		.arg("nope.toml")
		.arg("doc")
		.arg("template.rs")
		.assert()
		.code(1)
		.stderr(predicates::str::contains("cannot open file `nope.toml`"));

	Ok(())
}
