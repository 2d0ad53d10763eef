use std::path::{Path, PathBuf};

/// Generates candidate names for new, unsaved packages.
///
/// Names are `<prefix><n><extension>` with a counter that only moves forward
/// for the lifetime of the namer. A candidate is skipped while either the
/// package path or its engine staging folder (`<temp>/<name>-file`) exists.
#[derive(Debug, Clone)]
pub struct UntitledNamer {
	prefix: String,
	extension: String,
	counter: u64,
}

impl UntitledNamer {
	pub fn new(prefix: impl Into<String>, extension: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			extension: extension.into(),
			counter: 0,
		}
	}

	/// Returns the next free package path inside `dir`.
	pub fn next_path(&mut self, dir: &Path, temp_folder: &Path) -> PathBuf {
		loop {
			self.counter += 1;
			let base = format!("{}{}{}", self.prefix, self.counter, self.extension);
			let path = dir.join(&base);
			let staging = temp_folder.join(format!("{base}-file"));
			if !path.exists() && !staging.exists() {
				return path;
			}
			tracing::trace!(candidate = %base, "untitled name taken");
		}
	}
}
