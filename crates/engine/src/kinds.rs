//! Closed tag sets for part types, block kinds, and conversion targets.
//!
//! Engines identify these with strings. Parsing is total: identifiers this
//! crate does not know land in an `Unknown` variant so callers still match
//! exhaustively instead of comparing strings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared type of a content part.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PartType {
	/// Flowing text document made of stacked blocks.
	TextDocument,
	/// Free-form ink canvas; exports always operate on the whole content.
	RawContent,
	Diagram,
	Math,
	Drawing,
	Text,
	/// A part type the engine reported that this crate does not model.
	Unknown(String),
}

impl PartType {
	/// Every part type this crate models, in engine listing order.
	pub const KNOWN: [PartType; 6] = [
		PartType::Diagram,
		PartType::Drawing,
		PartType::Math,
		PartType::RawContent,
		PartType::Text,
		PartType::TextDocument,
	];

	pub fn parse(s: &str) -> Self {
		match s {
			"Text Document" => Self::TextDocument,
			"Raw Content" => Self::RawContent,
			"Diagram" => Self::Diagram,
			"Math" => Self::Math,
			"Drawing" => Self::Drawing,
			"Text" => Self::Text,
			other => Self::Unknown(other.to_string()),
		}
	}

	pub fn as_str(&self) -> &str {
		match self {
			Self::TextDocument => "Text Document",
			Self::RawContent => "Raw Content",
			Self::Diagram => "Diagram",
			Self::Math => "Math",
			Self::Drawing => "Drawing",
			Self::Text => "Text",
			Self::Unknown(s) => s,
		}
	}

	/// Returns the block kind of this part type's root block.
	pub fn root_kind(&self) -> BlockKind {
		match self {
			Self::TextDocument => BlockKind::TextDocument,
			Self::RawContent => BlockKind::RawContent,
			Self::Diagram => BlockKind::Diagram,
			Self::Math => BlockKind::Math,
			Self::Drawing => BlockKind::Drawing,
			Self::Text => BlockKind::Text,
			Self::Unknown(s) => BlockKind::Unknown(s.clone()),
		}
	}
}

impl From<String> for PartType {
	fn from(s: String) -> Self {
		Self::parse(&s)
	}
}

impl From<PartType> for String {
	fn from(t: PartType) -> Self {
		t.as_str().to_string()
	}
}

impl fmt::Display for PartType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Type tag of a content block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockKind {
	/// Grouping region with no content of its own.
	Container,
	Text,
	Math,
	Diagram,
	Drawing,
	RawContent,
	TextDocument,
	Image,
	Unknown(String),
}

impl BlockKind {
	pub fn parse(s: &str) -> Self {
		match s {
			"Container" => Self::Container,
			"Text" => Self::Text,
			"Math" => Self::Math,
			"Diagram" => Self::Diagram,
			"Drawing" => Self::Drawing,
			"Raw Content" => Self::RawContent,
			"Text Document" => Self::TextDocument,
			"Image" => Self::Image,
			other => Self::Unknown(other.to_string()),
		}
	}

	pub fn as_str(&self) -> &str {
		match self {
			Self::Container => "Container",
			Self::Text => "Text",
			Self::Math => "Math",
			Self::Diagram => "Diagram",
			Self::Drawing => "Drawing",
			Self::RawContent => "Raw Content",
			Self::TextDocument => "Text Document",
			Self::Image => "Image",
			Self::Unknown(s) => s,
		}
	}

	pub fn is_container(&self) -> bool {
		matches!(self, Self::Container)
	}
}

impl From<String> for BlockKind {
	fn from(s: String) -> Self {
		Self::parse(&s)
	}
}

impl From<BlockKind> for String {
	fn from(k: BlockKind) -> Self {
		k.as_str().to_string()
	}
}

impl fmt::Display for BlockKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Target state of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConversionState {
	Handwriting,
	DigitalPublish,
	DigitalEdit,
}

impl ConversionState {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Handwriting => "handwriting",
			Self::DigitalPublish => "digital-publish",
			Self::DigitalEdit => "digital-edit",
		}
	}
}

impl fmt::Display for ConversionState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn part_type_round_trips_known_and_unknown() {
		for ty in PartType::KNOWN {
			assert_eq!(PartType::parse(ty.as_str()), ty);
		}
		assert_eq!(PartType::parse("Music"), PartType::Unknown("Music".into()));
		assert_eq!(PartType::parse("Music").as_str(), "Music");
	}

	#[test]
	fn only_container_is_container() {
		assert!(BlockKind::Container.is_container());
		assert!(!BlockKind::TextDocument.is_container());
		assert!(!BlockKind::parse("Container ").is_container());
	}
}
