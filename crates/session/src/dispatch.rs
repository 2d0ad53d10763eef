//! Action menu layout and command routing.
//!
//! # Architecture
//!
//! ```text
//! CapabilitySnapshot ──build_menu──▶ ActionMenu { generation, entries }
//!                                         │ caller picks an entry
//!                                         ▼
//! (generation, SessionCommand, CommandInput) ──route──▶ Route
//!                                                        ├─ Edit     → SessionController
//!                                                        └─ Transfer → TransferNegotiator
//! ```
//!
//! Menu building only lays out what the resolver produced. It never reorders
//! or drops formats, kinds, or targets.

use std::fmt;
use std::path::Path;

use quire_engine::{BlockKind, MimeType, Point};

use crate::capability::CapabilitySnapshot;
use crate::error::{Result, SessionError};
use crate::transfer::{TransferRequest, resolve_export_path};

/// Label of the clipboard entry in the copy/paste group.
pub const CLIPBOARD_LABEL: &str = "Copy To Clipboard (Microsoft Office)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuCategory {
	/// Add and remove.
	Structural,
	Convert,
	CopyPaste,
	ImportExport,
}

/// A command the user can invoke on the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
	AddBlock(BlockKind),
	Remove,
	Convert,
	Copy,
	CopyToClipboard,
	Paste,
	Import(MimeType),
	Export(MimeType),
}

impl SessionCommand {
	pub fn category(&self) -> MenuCategory {
		match self {
			Self::AddBlock(_) | Self::Remove => MenuCategory::Structural,
			Self::Convert => MenuCategory::Convert,
			Self::Copy | Self::CopyToClipboard | Self::Paste => MenuCategory::CopyPaste,
			Self::Import(_) | Self::Export(_) => MenuCategory::ImportExport,
		}
	}

	/// Returns true when `snapshot` allows this command.
	pub fn permitted(&self, snapshot: &CapabilitySnapshot) -> bool {
		match self {
			Self::AddBlock(kind) => snapshot.add_block.contains(kind),
			Self::Remove => snapshot.remove,
			Self::Convert => !snapshot.convert.is_empty(),
			Self::Copy => snapshot.copy,
			Self::CopyToClipboard => snapshot.clipboard,
			Self::Paste => snapshot.paste,
			Self::Import(format) => snapshot.import.contains(format),
			Self::Export(format) => snapshot.export.contains(format),
		}
	}
}

impl fmt::Display for SessionCommand {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::AddBlock(kind) => write!(f, "Add {kind}"),
			Self::Remove => f.write_str("Remove"),
			Self::Convert => f.write_str("Convert"),
			Self::Copy => f.write_str("Copy"),
			Self::CopyToClipboard => f.write_str(CLIPBOARD_LABEL),
			Self::Paste => f.write_str("Paste"),
			Self::Import(format) => write!(f, "Import {format}"),
			Self::Export(format) => write!(f, "Export {format}"),
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
	pub label: String,
	/// Submenu title, or `None` for a top-level entry.
	pub group: Option<&'static str>,
	pub enabled: bool,
	pub command: SessionCommand,
}

impl MenuEntry {
	fn new(group: Option<&'static str>, command: SessionCommand, enabled: bool) -> Self {
		Self {
			label: command.to_string(),
			group,
			enabled,
			command,
		}
	}

	pub fn category(&self) -> MenuCategory {
		self.command.category()
	}
}

/// Entries for one selection, stamped with its generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionMenu {
	pub generation: u64,
	pub entries: Vec<MenuEntry>,
}

impl ActionMenu {
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn enabled(&self) -> impl Iterator<Item = &MenuEntry> {
		self.entries.iter().filter(|e| e.enabled)
	}

	/// Entry for `command`, enabled or not.
	pub fn find(&self, command: &SessionCommand) -> Option<&MenuEntry> {
		self.entries.iter().find(|e| &e.command == command)
	}
}

/// Lays out the legal actions of `snapshot`.
pub fn build_menu(snapshot: &CapabilitySnapshot, generation: u64) -> ActionMenu {
	let mut entries = Vec::new();

	for kind in &snapshot.add_block {
		entries.push(MenuEntry::new(Some("Add..."), SessionCommand::AddBlock(kind.clone()), true));
	}
	if snapshot.remove {
		entries.push(MenuEntry::new(None, SessionCommand::Remove, true));
	}
	if !snapshot.convert.is_empty() {
		entries.push(MenuEntry::new(None, SessionCommand::Convert, true));
	}
	if snapshot.copy || snapshot.clipboard || snapshot.paste {
		let group = Some("Copy/Paste...");
		entries.push(MenuEntry::new(group, SessionCommand::Copy, snapshot.copy));
		entries.push(MenuEntry::new(group, SessionCommand::CopyToClipboard, snapshot.clipboard));
		entries.push(MenuEntry::new(group, SessionCommand::Paste, snapshot.paste));
	}
	let group = Some("Import/Export...");
	for format in &snapshot.import {
		entries.push(MenuEntry::new(group, SessionCommand::Import(*format), true));
	}
	for format in &snapshot.export {
		entries.push(MenuEntry::new(group, SessionCommand::Export(*format), true));
	}

	ActionMenu { generation, entries }
}

/// Caller-gathered input for commands that need it.
///
/// Gathering happens before dispatch; an abandoned dialog simply never
/// dispatches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandInput {
	/// Inline data for import, or initial block data for add.
	pub data: Option<String>,
	/// Data format for add-block; import takes its format from the command.
	pub data_format: Option<MimeType>,
	/// Export file name, normalized against the format's extensions.
	pub file_name: Option<String>,
}

impl CommandInput {
	pub fn data(data: impl Into<String>) -> Self {
		Self {
			data: Some(data.into()),
			..Self::default()
		}
	}

	pub fn block_data(format: MimeType, data: impl Into<String>) -> Self {
		Self {
			data: Some(data.into()),
			data_format: Some(format),
			..Self::default()
		}
	}

	pub fn file_name(name: impl Into<String>) -> Self {
		Self {
			file_name: Some(name.into()),
			..Self::default()
		}
	}
}

/// Edits executed by the session controller.
#[derive(Debug, Clone, PartialEq)]
pub enum EditAction {
	AddBlock {
		kind: BlockKind,
		at: Point,
		data: Option<(MimeType, String)>,
	},
	Remove,
	Convert,
	Copy,
	Paste { at: Point },
}

/// Where a command goes.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
	Edit(EditAction),
	Transfer(TransferRequest),
}

/// Maps `command` and its input to an executable route.
///
/// `at` is the selection point; exports resolve inside `export_dir`.
pub fn route(command: &SessionCommand, input: CommandInput, at: Point, export_dir: &Path) -> Result<Route> {
	let route = match command {
		SessionCommand::AddBlock(kind) => {
			let data = match (input.data_format, input.data) {
				(Some(format), Some(data)) => Some((format, data)),
				(None, None) => None,
				(None, Some(_)) => return Err(SessionError::MissingInput("block data format")),
				(Some(_), None) => return Err(SessionError::MissingInput("block data")),
			};
			Route::Edit(EditAction::AddBlock {
				kind: kind.clone(),
				at,
				data,
			})
		}
		SessionCommand::Remove => Route::Edit(EditAction::Remove),
		SessionCommand::Convert => Route::Edit(EditAction::Convert),
		SessionCommand::Copy => Route::Edit(EditAction::Copy),
		SessionCommand::Paste => Route::Edit(EditAction::Paste { at }),
		SessionCommand::CopyToClipboard => Route::Transfer(TransferRequest::Clipboard),
		SessionCommand::Import(format) => Route::Transfer(TransferRequest::Import {
			format: *format,
			data: input.data.ok_or(SessionError::MissingInput("import data"))?,
		}),
		SessionCommand::Export(format) => {
			let name = input
				.file_name
				.filter(|n| !n.trim().is_empty())
				.ok_or(SessionError::MissingInput("export file name"))?;
			Route::Transfer(TransferRequest::Export {
				format: *format,
				destination: resolve_export_path(export_dir, &name, *format),
			})
		}
	};
	Ok(route)
}

#[cfg(test)]
mod tests;
