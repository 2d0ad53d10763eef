//! Session configuration.
//!
//! ```toml
//! packages-dir = "/home/me/ink"
//! untitled-prefix = "File"
//! package-extension = ".iink"
//! save-on-close = true
//! default-part-type = "Text Document"
//!
//! [engine.raw-content]
//! recognition-shape = false
//! ```
//!
//! Every field is optional. Lookup order for the file is an explicit path,
//! then `<config dir>/quire/session.toml`, then built-in defaults.

use std::path::{Path, PathBuf};

use quire_engine::{EngineOptions, PartType};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or field types.
	#[error("invalid config {path}: {error}")]
	Parse {
		path: PathBuf,
		#[source]
		error: toml::de::Error,
	},
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SessionConfig {
	/// Directory for untitled packages, save-as targets, and exports.
	/// Unset means `<data dir>/quire`.
	pub packages_dir: Option<PathBuf>,
	pub untitled_prefix: String,
	/// Package file extension, with its leading dot.
	pub package_extension: String,
	/// Save the current package before it is replaced or closed.
	pub save_on_close: bool,
	pub default_part_type: PartType,
	pub engine: EngineOptions,
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self {
			packages_dir: None,
			untitled_prefix: "File".to_string(),
			package_extension: ".iink".to_string(),
			save_on_close: true,
			default_part_type: PartType::TextDocument,
			engine: EngineOptions::default(),
		}
	}
}

impl SessionConfig {
	/// Parses a config document.
	pub fn from_toml(text: &str, origin: &Path) -> Result<Self, ConfigError> {
		toml::from_str(text).map_err(|error| ConfigError::Parse {
			path: origin.to_path_buf(),
			error,
		})
	}

	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		let config = Self::from_toml(&text, path)?;
		tracing::debug!(path = %path.display(), "loaded session config");
		Ok(config)
	}

	/// Loads `path` if given, else the user config file if it exists, else
	/// defaults.
	pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
		if let Some(path) = path {
			return Self::load(path);
		}
		match Self::user_config_path() {
			Some(path) if path.is_file() => Self::load(&path),
			_ => Ok(Self::default()),
		}
	}

	pub fn user_config_path() -> Option<PathBuf> {
		dirs::config_dir().map(|dir| dir.join("quire").join("session.toml"))
	}

	/// Effective packages directory.
	pub fn packages_root(&self) -> PathBuf {
		self.packages_dir.clone().unwrap_or_else(|| {
			dirs::data_dir()
				.unwrap_or_else(std::env::temp_dir)
				.join("quire")
		})
	}

	/// Engine options with the temp folder defaulted to
	/// `<packages dir>/tmp`.
	pub fn engine_options(&self) -> EngineOptions {
		let mut options = self.engine.clone();
		if options.temp_folder.is_none() {
			options.temp_folder = Some(self.packages_root().join("tmp"));
		}
		options
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn empty_document_is_default() {
		let config = SessionConfig::from_toml("", Path::new("session.toml")).unwrap();
		assert_eq!(config, SessionConfig::default());
	}

	#[test]
	fn kebab_case_fields() {
		let text = r#"
packages-dir = "/data/ink"
untitled-prefix = "Note"
save-on-close = false
default-part-type = "Raw Content"

[engine.raw-content]
recognition-shape = false
"#;
		let config = SessionConfig::from_toml(text, Path::new("session.toml")).unwrap();
		assert_eq!(config.packages_root(), PathBuf::from("/data/ink"));
		assert_eq!(config.untitled_prefix, "Note");
		assert_eq!(config.package_extension, ".iink");
		assert!(!config.save_on_close);
		assert_eq!(config.default_part_type, PartType::RawContent);
		assert!(!config.engine.raw_content.recognition_shape);
		assert!(config.engine.raw_content.recognition_text);
		assert_eq!(
			config.engine_options().temp_folder,
			Some(PathBuf::from("/data/ink/tmp"))
		);
	}

	#[test]
	fn unknown_part_type_is_kept() {
		let config =
			SessionConfig::from_toml(r#"default-part-type = "Sketch""#, Path::new("session.toml")).unwrap();
		assert_eq!(config.default_part_type, PartType::Unknown("Sketch".into()));
	}

	#[test]
	fn parse_errors_name_the_file() {
		let err = SessionConfig::from_toml("save-on-close = 3", Path::new("bad.toml")).unwrap_err();
		assert!(matches!(err, ConfigError::Parse { ref path, .. } if path == Path::new("bad.toml")));
	}

	#[test]
	fn load_reads_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("session.toml");
		std::fs::write(&path, "untitled-prefix = \"Doc\"\n").unwrap();
		assert_eq!(SessionConfig::load(&path).unwrap().untitled_prefix, "Doc");
		assert!(matches!(
			SessionConfig::load(&dir.path().join("missing.toml")),
			Err(ConfigError::Io { .. })
		));
	}
}
