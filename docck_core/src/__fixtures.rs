use std::path::Path;

use tempfile::TempDir;

use crate::AnyResult;
use crate::CheckReport;
use crate::DocckConfig;
use crate::DocckResult;
use crate::check;
use crate::directive::Directive;
use crate::directive::Directives;

/// The document used by most engine tests.
pub const INDEX_HTML: &str = r#"<h1 class="fqn"><span>A</span><span><a class="x">B</a></span></h1>"#;

/// A small but realistic generated page.
pub const STRUCT_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
	<meta charset="utf-8">
	<title>Bar in foo</title>
	<script>if (a < b && c) { go(); }</script>
</head>
<body class="rustdoc struct">
	<h1 class="fqn">Struct <a href="index.html">foo</a>::<a class="struct">Bar</a></h1>
	<pre class="rust struct">pub struct Bar {
    pub x: <a href="u32.html">u32</a>,
}</pre>
	<ul class="methods">
		<li id="method.new"><code>fn new() -&gt; Bar</code></li>
		<li id="method.get"><code>fn get(&amp;self)</code></li>
		<li id="method.set"><code>fn set(&amp;mut self, x: u32)</code><br></li>
	</ul>
	<p>Keyboard: <kbd>&larrb;</kbd> and <kbd>&rarrb;</kbd>&#x21;</p>
</body>
</html>
"#;

/// Write `files` (relative path, content) into a fresh temporary directory.
pub fn write_docs(files: &[(&str, &str)]) -> AnyResult<TempDir> {
	let tmp = tempfile::tempdir()?;

	for (path, content) in files {
		let full_path = tmp.path().join(path);
		if let Some(parent) = full_path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(full_path, content)?;
	}

	Ok(tmp)
}

pub fn directive(negated: bool, command: &str, args: &[&str], line: usize) -> Directive {
	Directive {
		negated,
		command: command.to_string(),
		args: args.iter().map(ToString::to_string).collect(),
		line,
	}
}

/// Check `template` against the documents in `root`.
pub fn run_template(root: &Path, template: &str) -> DocckResult<CheckReport> {
	check(root, &DocckConfig::default(), Directives::new(template.as_bytes()))
}
