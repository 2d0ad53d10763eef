//! Capability tables and export rendering for the memory engine.

use serde::{Deserialize, Serialize};

use super::store::{StoredBlock, StoredPart};
use crate::{BlockKind, ConversionState, EngineError, MimeType, PartType, RawContentOptions, Result};

pub(crate) fn add_block_types(part_type: &PartType) -> Vec<BlockKind> {
	match part_type {
		PartType::TextDocument => vec![
			BlockKind::Text,
			BlockKind::Math,
			BlockKind::Diagram,
			BlockKind::Drawing,
		],
		_ => Vec::new(),
	}
}

pub(crate) fn add_block_data_types(kind: &BlockKind) -> Vec<MimeType> {
	match kind {
		BlockKind::Text => vec![MimeType::Text, MimeType::Jiix],
		BlockKind::Math | BlockKind::Diagram => vec![MimeType::Jiix],
		_ => Vec::new(),
	}
}

pub(crate) fn export_types(kind: &BlockKind) -> Vec<MimeType> {
	use MimeType::*;
	match kind {
		BlockKind::Text => vec![Text, Html, Docx, Jiix, Png, Jpeg],
		BlockKind::Math => vec![Latex, MathMl, Jiix, Png, Jpeg],
		BlockKind::Diagram => vec![Svg, GraphMl, Pptx, OfficeClipboard, Jiix, Png, Jpeg],
		BlockKind::Drawing => vec![Svg, Png, Jpeg],
		BlockKind::RawContent => vec![Jiix, Svg, Png, Jpeg, Pptx, OfficeClipboard],
		BlockKind::TextDocument => vec![Docx, Html, Text, Jiix, Png, Jpeg],
		BlockKind::Image => vec![Png, Jpeg],
		BlockKind::Container | BlockKind::Unknown(_) => Vec::new(),
	}
}

pub(crate) fn import_types(kind: &BlockKind) -> Vec<MimeType> {
	match kind {
		BlockKind::Text => vec![MimeType::Text, MimeType::Jiix],
		BlockKind::Math => vec![MimeType::Jiix, MimeType::Latex],
		BlockKind::Diagram | BlockKind::RawContent => vec![MimeType::Jiix],
		_ => Vec::new(),
	}
}

pub(crate) fn conversion_states(kind: &BlockKind, raw: &RawContentOptions) -> Vec<ConversionState> {
	match kind {
		BlockKind::Text | BlockKind::TextDocument | BlockKind::Math | BlockKind::Diagram => {
			vec![ConversionState::DigitalEdit, ConversionState::DigitalPublish]
		}
		BlockKind::RawContent if raw.conversion_enabled() => vec![ConversionState::DigitalEdit],
		_ => Vec::new(),
	}
}

/// Minimal JIIX element: only the recognized label survives the round trip.
#[derive(Debug, Serialize, Deserialize)]
struct JiixElement {
	#[serde(rename = "type")]
	kind: String,
	id: String,
	label: String,
}

pub(crate) fn parse_jiix_label(data: &str) -> Result<String> {
	serde_json::from_str::<JiixElement>(data)
		.map(|e| e.label)
		.map_err(|e| EngineError::InvalidData(e.to_string()))
}

/// Renders `blocks` of `part` in `mime`.
pub(crate) fn render(part: &StoredPart, blocks: &[&StoredBlock], mime: MimeType) -> Result<Vec<u8>> {
	let lines: Vec<&str> = blocks
		.iter()
		.map(|b| b.text.as_str())
		.filter(|t| !t.is_empty())
		.collect();
	let body = lines.join("\n");

	let bytes = match mime {
		MimeType::Text | MimeType::Latex => body.into_bytes(),
		MimeType::Html => {
			let paragraphs: String = lines.iter().map(|l| format!("<p>{l}</p>")).collect();
			format!("<html><body>{paragraphs}</body></html>").into_bytes()
		}
		MimeType::MathMl => format!("<math><mtext>{body}</mtext></math>").into_bytes(),
		MimeType::Svg => format!("<svg xmlns=\"http://www.w3.org/2000/svg\"><text>{body}</text></svg>").into_bytes(),
		MimeType::GraphMl => format!("<graphml><graph><node id=\"{body}\"/></graph></graphml>").into_bytes(),
		MimeType::Jiix => {
			let elements: Vec<JiixElement> = blocks
				.iter()
				.map(|b| JiixElement {
					kind: b.kind.as_str().to_string(),
					id: b.id.as_str().to_string(),
					label: b.text.clone(),
				})
				.collect();
			serde_json::to_vec(&elements).map_err(|e| EngineError::InvalidData(e.to_string()))?
		}
		binary => {
			let mut out = format!("QUIRE {} {}\n", binary.type_name(), part.part_type).into_bytes();
			out.extend_from_slice(body.as_bytes());
			out
		}
	};
	Ok(bytes)
}
