use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::DocckError;
use crate::DocckResult;

/// Default maximum size of a checked document in bytes (10 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["docck.toml", ".docck.toml", ".config/docck.toml"];

/// Configuration loaded from a `docck.toml` file.
///
/// ```toml
/// max_file_size = 20971520
///
/// [entities]
/// lbrace = "{"
/// rbrace = "}"
/// ```
#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DocckConfig {
	/// Documents larger than this many bytes are refused.
	pub max_file_size: u64,
	/// Extra named character references, consulted after the built-in
	/// table.
	pub entities: BTreeMap<String, String>,
}

impl Default for DocckConfig {
	fn default() -> Self {
		Self {
			max_file_size: DEFAULT_MAX_FILE_SIZE,
			entities: BTreeMap::new(),
		}
	}
}

impl DocckConfig {
	/// Resolve the first config file that exists in `root`.
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> DocckResult<Option<DocckConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		Self::load_file(&config_path).map(Some)
	}

	/// Load the config from an explicit path.
	pub fn load_file(path: &Path) -> DocckResult<DocckConfig> {
		let content = std::fs::read_to_string(path)?;
		tracing::debug!(path = %path.display(), "loaded config");
		Self::parse(&content)
	}

	pub fn parse(content: &str) -> DocckResult<DocckConfig> {
		toml::from_str(content).map_err(|e| DocckError::ConfigParse(e.to_string()))
	}
}
