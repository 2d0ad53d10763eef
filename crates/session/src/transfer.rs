//! Import, export, and clipboard exchange.
//!
//! # Purpose
//!
//! - Check a chosen format against what the engine offers for the block.
//! - Wait for the engine to be idle before anything reads content.
//! - Stage clipboard payloads through a temporary file that is removed on
//!   every path.
//!
//! # Failure modes
//!
//! Transfer failures never mutate document state. A failed export may leave
//! a partially written destination behind; callers must not treat it as
//! valid. Blank import data is rejected before the engine is called.

use std::path::{Path, PathBuf};

use quire_engine::{ContentBlock, InkHost, MimeType};
use tracing::{debug, info};

use crate::clipboard::ClipboardSink;
use crate::error::{Result, SessionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDirection {
	Import,
	Export,
	Clipboard,
}

/// A fully specified data exchange.
#[derive(Debug, Clone, PartialEq)]
pub enum TransferRequest {
	Export { format: MimeType, destination: PathBuf },
	Import { format: MimeType, data: String },
	/// Export in the rich-clipboard format and publish the payload.
	Clipboard,
}

impl TransferRequest {
	pub fn direction(&self) -> TransferDirection {
		match self {
			Self::Export { .. } => TransferDirection::Export,
			Self::Import { .. } => TransferDirection::Import,
			Self::Clipboard => TransferDirection::Clipboard,
		}
	}

	pub fn format(&self) -> MimeType {
		match self {
			Self::Export { format, .. } | Self::Import { format, .. } => *format,
			Self::Clipboard => MimeType::CLIPBOARD,
		}
	}
}

/// Negotiates transfers between the engine and files or the clipboard.
#[derive(Debug)]
pub struct TransferNegotiator<C> {
	clipboard: C,
}

impl<C: ClipboardSink> TransferNegotiator<C> {
	pub fn new(clipboard: C) -> Self {
		Self { clipboard }
	}

	pub fn clipboard(&self) -> &C {
		&self.clipboard
	}

	/// Runs `request` against `block`.
	pub async fn execute<H: InkHost + ?Sized>(
		&mut self,
		host: &mut H,
		block: &ContentBlock,
		request: &TransferRequest,
	) -> Result<()> {
		match request {
			TransferRequest::Export { format, destination } => self.export(host, block, *format, destination).await,
			TransferRequest::Import { format, data } => self.import(host, block, *format, data),
			TransferRequest::Clipboard => self.export_to_clipboard(host, block).await,
		}
	}

	/// Writes `block` to `destination` once the engine is idle.
	pub async fn export<H: InkHost + ?Sized>(
		&self,
		host: &mut H,
		block: &ContentBlock,
		format: MimeType,
		destination: &Path,
	) -> Result<()> {
		ensure_offered(&host.supported_export_mime_types(block), format)?;
		if !host.is_idle() {
			debug!(block = %block.id, "export: waiting for engine idle");
		}
		host.wait_for_idle().await;
		host.export(block, destination, format)
			.map_err(|source| SessionError::Export {
				path: destination.to_path_buf(),
				source,
			})?;
		info!(block = %block.id, %format, path = %destination.display(), "exported");
		Ok(())
	}

	/// Exports `block` in the rich-clipboard format and publishes the bytes.
	///
	/// The payload is staged in a temporary file inside the engine temp
	/// folder; the file is removed when this returns, on success or failure.
	pub async fn export_to_clipboard<H: InkHost + ?Sized>(&mut self, host: &mut H, block: &ContentBlock) -> Result<()> {
		let format = MimeType::CLIPBOARD;
		ensure_offered(&host.supported_export_mime_types(block), format)?;

		let folder = host.temp_folder();
		std::fs::create_dir_all(&folder).map_err(|error| SessionError::Io {
			path: folder.clone(),
			error,
		})?;
		let staged = tempfile::Builder::new()
			.prefix("clipboard")
			.suffix(".gvml")
			.tempfile_in(&folder)
			.map_err(|error| SessionError::Io {
				path: folder.clone(),
				error,
			})?;

		host.wait_for_idle().await;
		host.export(block, staged.path(), format)
			.map_err(|source| SessionError::Export {
				path: staged.path().to_path_buf(),
				source,
			})?;
		let bytes = std::fs::read(staged.path()).map_err(|error| SessionError::Io {
			path: staged.path().to_path_buf(),
			error,
		})?;

		self.clipboard.clear()?;
		let len = bytes.len();
		self.clipboard.publish(format.type_name(), bytes)?;
		info!(block = %block.id, bytes = len, "copied to clipboard");
		Ok(())
	}

	/// Applies `data` to `block`.
	///
	/// Blank data is rejected before the engine is called.
	pub fn import<H: InkHost + ?Sized>(
		&self,
		host: &mut H,
		block: &ContentBlock,
		format: MimeType,
		data: &str,
	) -> Result<()> {
		if data.trim().is_empty() {
			return Err(SessionError::BlankData);
		}
		ensure_offered(&host.supported_import_mime_types(block), format)?;
		host.import(format, data, block).map_err(SessionError::Import)?;
		info!(block = %block.id, %format, bytes = data.len(), "imported");
		Ok(())
	}
}

fn ensure_offered(offered: &[MimeType], format: MimeType) -> Result<()> {
	if offered.contains(&format) {
		Ok(())
	} else {
		Err(SessionError::UnsupportedFormat(format))
	}
}

/// Makes `name` end with one of `format`'s registered extensions.
///
/// Matching is a case-insensitive suffix test; when nothing matches, the
/// primary extension is appended.
pub fn normalize_export_filename(name: &str, format: MimeType) -> String {
	let lower = name.to_lowercase();
	let extensions = format.file_extensions();
	if extensions.iter().any(|ext| lower.ends_with(ext)) {
		return name.to_string();
	}
	match extensions.first() {
		Some(ext) => format!("{name}{ext}"),
		None => name.to_string(),
	}
}

/// Export destination for `name` inside `dir`, extension normalized.
pub fn resolve_export_path(dir: &Path, name: &str, format: MimeType) -> PathBuf {
	dir.join(normalize_export_filename(name.trim(), format))
}
