use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::DocckConfig;
use crate::DocckError;
use crate::DocckResult;
use crate::markup::parse_html_with_entities;
use crate::node::Node;

/// The placeholder path meaning "the path used by the previous directive".
pub const PREVIOUS_PATH: &str = "-";

/// Memoizes raw document contents and parsed trees, keyed by normalized
/// path relative to the output directory. A document is read from disk at
/// most once no matter how many directives refer to it.
#[derive(Debug)]
pub struct ResourceCache {
	root: PathBuf,
	max_file_size: u64,
	entities: BTreeMap<String, String>,
	files: HashMap<PathBuf, String>,
	trees: HashMap<PathBuf, Node>,
	last_path: Option<PathBuf>,
}

impl ResourceCache {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self::with_config(root, &DocckConfig::default())
	}

	pub fn with_config(root: impl Into<PathBuf>, config: &DocckConfig) -> Self {
		Self {
			root: root.into(),
			max_file_size: config.max_file_size,
			entities: config.entities.clone(),
			files: HashMap::new(),
			trees: HashMap::new(),
			last_path: None,
		}
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// The most recently resolved path, if any.
	pub fn last_path(&self) -> Option<&Path> {
		self.last_path.as_deref()
	}

	/// Normalize `path`, or return the previous path for `-`. Every explicit
	/// path becomes the new previous path, even if loading it fails later.
	pub fn resolve_path(&mut self, path: &str) -> DocckResult<PathBuf> {
		if path == PREVIOUS_PATH {
			return self.last_path.clone().ok_or(DocckError::NoPreviousPath);
		}

		let normalized = normalize_path(path);
		self.last_path = Some(normalized.clone());
		Ok(normalized)
	}

	/// Raw contents of the document at `path`.
	pub fn get_file(&mut self, path: &str) -> DocckResult<&str> {
		let key = self.resolve_path(path)?;
		load_document(&mut self.files, &self.root, self.max_file_size, key)
	}

	/// Parsed tree of the document at `path`.
	pub fn get_tree(&mut self, path: &str) -> DocckResult<&Node> {
		let key = self.resolve_path(path)?;

		match self.trees.entry(key) {
			Entry::Occupied(entry) => {
				tracing::trace!(path = %entry.key().display(), "tree cache hit");
				Ok(&*entry.into_mut())
			}
			Entry::Vacant(entry) => {
				let key = entry.key().clone();
				let content = load_document(&mut self.files, &self.root, self.max_file_size, key)?;
				let tree = parse_html_with_entities(content, &self.entities).map_err(|source| {
					DocckError::HtmlParse {
						path: entry.key().display().to_string(),
						source,
					}
				})?;
				tracing::debug!(path = %entry.key().display(), "parsed document");
				Ok(&*entry.insert(tree))
			}
		}
	}
}

fn load_document<'a>(
	files: &'a mut HashMap<PathBuf, String>,
	root: &Path,
	max_file_size: u64,
	key: PathBuf,
) -> DocckResult<&'a str> {
	match files.entry(key) {
		Entry::Occupied(entry) => {
			tracing::trace!(path = %entry.key().display(), "file cache hit");
			Ok(entry.into_mut().as_str())
		}
		Entry::Vacant(entry) => {
			let content = read_document(root, entry.key(), max_file_size)?;
			Ok(entry.insert(content).as_str())
		}
	}
}

fn read_document(root: &Path, path: &Path, max_file_size: u64) -> DocckResult<String> {
	let full_path = root.join(path);
	let shown = path.display().to_string();
	let open_error = |e: std::io::Error| {
		DocckError::FileOpen {
			path: shown.clone(),
			reason: e.to_string(),
		}
	};

	let metadata = std::fs::metadata(&full_path).map_err(open_error)?;
	if metadata.len() > max_file_size {
		return Err(DocckError::FileTooLarge {
			path: shown.clone(),
			size: metadata.len(),
			limit: max_file_size,
		});
	}

	let bytes = std::fs::read(&full_path).map_err(open_error)?;
	tracing::debug!(path = %shown, bytes = bytes.len(), "read document");

	Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Lexically normalize a relative path: drop `.` components, fold `..`
/// into the preceding component and collapse repeated separators.
pub fn normalize_path(path: &str) -> PathBuf {
	let mut components: Vec<Component<'_>> = Vec::new();

	for component in Path::new(path).components() {
		match component {
			Component::CurDir => {}
			Component::ParentDir => {
				match components.last() {
					Some(Component::Normal(_)) => {
						components.pop();
					}
					Some(Component::RootDir | Component::Prefix(_)) => {}
					_ => components.push(component),
				}
			}
			other => components.push(other),
		}
	}

	if components.is_empty() {
		return PathBuf::from(".");
	}

	components.iter().collect()
}
