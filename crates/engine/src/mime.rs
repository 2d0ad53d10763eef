//! Transfer formats understood by the export/import primitives.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A data format the engine can export to or import from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MimeType {
	Text,
	Html,
	MathMl,
	Latex,
	GraphMl,
	Svg,
	Jiix,
	Png,
	Jpeg,
	Gif,
	Pdf,
	Docx,
	Pptx,
	/// Rich clipboard payload consumed by office suites.
	OfficeClipboard,
}

impl MimeType {
	/// The designated rich-clipboard format.
	pub const CLIPBOARD: MimeType = MimeType::OfficeClipboard;

	/// Returns the registered MIME type name.
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Text => "text/plain",
			Self::Html => "text/html",
			Self::MathMl => "application/mathml+xml",
			Self::Latex => "application/x-latex",
			Self::GraphMl => "application/graphml+xml",
			Self::Svg => "image/svg+xml",
			Self::Jiix => "application/vnd.myscript.jiix",
			Self::Png => "image/png",
			Self::Jpeg => "image/jpeg",
			Self::Gif => "image/gif",
			Self::Pdf => "application/pdf",
			Self::Docx => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
			Self::Pptx => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
			Self::OfficeClipboard => "application/vnd.openxmlformats-officedocument.clipboard",
		}
	}

	/// Returns the registered file extensions, primary first.
	///
	/// Every extension carries its leading dot.
	pub fn file_extensions(&self) -> &'static [&'static str] {
		match self {
			Self::Text => &[".txt"],
			Self::Html => &[".html", ".htm"],
			Self::MathMl => &[".mml"],
			Self::Latex => &[".tex"],
			Self::GraphMl => &[".graphml"],
			Self::Svg => &[".svg"],
			Self::Jiix => &[".jiix"],
			Self::Png => &[".png"],
			Self::Jpeg => &[".jpeg", ".jpg", ".jpe"],
			Self::Gif => &[".gif"],
			Self::Pdf => &[".pdf"],
			Self::Docx => &[".docx"],
			Self::Pptx => &[".pptx"],
			Self::OfficeClipboard => &[".gvml"],
		}
	}

	/// Looks a format up by its MIME type name.
	pub fn from_type_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|m| m.type_name().eq_ignore_ascii_case(name))
	}

	/// Returns true for formats whose payload is text.
	pub fn is_textual(&self) -> bool {
		matches!(
			self,
			Self::Text | Self::Html | Self::MathMl | Self::Latex | Self::GraphMl | Self::Svg | Self::Jiix
		)
	}

	pub const ALL: [MimeType; 14] = [
		Self::Text,
		Self::Html,
		Self::MathMl,
		Self::Latex,
		Self::GraphMl,
		Self::Svg,
		Self::Jiix,
		Self::Png,
		Self::Jpeg,
		Self::Gif,
		Self::Pdf,
		Self::Docx,
		Self::Pptx,
		Self::OfficeClipboard,
	];
}

impl fmt::Display for MimeType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.type_name())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn extensions_have_leading_dot() {
		for mime in MimeType::ALL {
			assert!(!mime.file_extensions().is_empty(), "{mime} has no extension");
			for ext in mime.file_extensions() {
				assert!(ext.starts_with('.'), "{mime}: {ext}");
			}
		}
	}

	#[test]
	fn type_name_lookup_ignores_case() {
		assert_eq!(MimeType::from_type_name("Text/Plain"), Some(MimeType::Text));
		assert_eq!(MimeType::from_type_name("application/x-unknown"), None);
	}
}
