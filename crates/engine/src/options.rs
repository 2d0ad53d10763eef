//! Engine options applied once at startup through [`InkHost::configure`].
//!
//! [`InkHost::configure`]: crate::InkHost::configure

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Engine-wide options.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EngineOptions {
	/// Folder where the engine stages open packages. Unset means the host
	/// picks one.
	pub temp_folder: Option<PathBuf>,
	pub raw_content: RawContentOptions,
}

/// Recognition and interaction toggles for raw-content parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RawContentOptions {
	pub recognition_text: bool,
	pub recognition_shape: bool,
	pub convert_node: bool,
	pub convert_text: bool,
	pub convert_edge: bool,
	/// Convert a shape when the pen is held in position.
	pub convert_shape_on_hold: bool,
	pub tap_interactions: bool,
	pub erase_precisely: bool,
	pub guides_enable: bool,
	pub guides_snap: bool,
	/// Pen gestures the engine should detect.
	pub gestures: Vec<String>,
}

impl Default for RawContentOptions {
	fn default() -> Self {
		Self {
			recognition_text: true,
			recognition_shape: true,
			convert_node: true,
			convert_text: true,
			convert_edge: true,
			convert_shape_on_hold: true,
			tap_interactions: true,
			erase_precisely: false,
			guides_enable: true,
			guides_snap: true,
			gestures: [
				"underline",
				"double-underline",
				"scratch-out",
				"join",
				"insert",
				"strike-through",
			]
			.into_iter()
			.map(String::from)
			.collect(),
		}
	}
}

impl RawContentOptions {
	/// Returns true if raw content can be converted at all.
	pub fn conversion_enabled(&self) -> bool {
		let recognizes = self.recognition_text || self.recognition_shape;
		let converts = self.convert_text || self.convert_node || self.convert_edge;
		recognizes && converts
	}
}
