use std::path::Path;

use assert_cmd::Command;
use docck_core::AnyResult;
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

pub const INDEX_HTML: &str = r#"<h1 class="fqn"><span>A</span><span><a class="x">B</a></span></h1>"#;

pub fn docck_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("docck"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("DOCCK_LOG");
	cmd
}

/// A temporary project with generated docs under `doc/` and a template at
/// `template.rs`.
pub fn project(template: &str) -> AnyResult<TempDir> {
	let tmp = tempfile::tempdir()?;
	write(tmp.path(), "doc/index.html", INDEX_HTML)?;
	write(tmp.path(), "template.rs", template)?;

	Ok(tmp)
}

pub fn write(root: &Path, path: &str, content: &str) -> AnyResult<()> {
	let full_path = root.join(path);
	if let Some(parent) = full_path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(full_path, content)?;

	Ok(())
}
