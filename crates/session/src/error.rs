//! Session error types.

use std::path::PathBuf;

use quire_engine::{BlockId, EngineError, MimeType, PartId};
use thiserror::Error;

use crate::clipboard::ClipboardError;
use crate::parts::SeqDirection;

/// Errors reported by session operations.
///
/// Structural failures (`Activation`, `NoNavigableTarget`) are reported only
/// after the session has been rolled back to its last known-good part.
/// Transfer failures (`Export`, `Import`, `Clipboard`) never mutate document
/// state.
#[derive(Debug, Error)]
pub enum SessionError {
	/// The engine rejected package or part creation.
	#[error("could not create {what}")]
	Creation {
		what: &'static str,
		#[source]
		source: EngineError,
	},

	/// A part exists but could not be bound to the editor surface.
	#[error("part could not be activated")]
	Activation(#[source] EngineError),

	/// Every candidate in the scan direction failed to activate.
	#[error("no part {direction} of {origin} could be activated")]
	NoNavigableTarget { direction: SeqDirection, origin: PartId },

	/// The package failed to open, or its first part failed to activate.
	///
	/// The previously open package is already closed when this is reported.
	#[error("could not open {}", path.display())]
	Open {
		path: PathBuf,
		#[source]
		source: EngineError,
	},

	#[error("export to {} failed", path.display())]
	Export {
		path: PathBuf,
		#[source]
		source: EngineError,
	},

	#[error("import failed")]
	Import(#[source] EngineError),

	/// Import or add-block data was empty or whitespace.
	#[error("data is blank")]
	BlankData,

	/// The format is not offered for the selected block.
	#[error("format {0} is not available for this block")]
	UnsupportedFormat(MimeType),

	#[error("no part is active")]
	NoActivePart,

	/// The block is not part of the active part's content.
	#[error("block {0} is not in the active part")]
	UnknownBlock(BlockId),

	/// Another structural operation is still in flight.
	#[error("another structural operation is in progress")]
	Busy,

	/// A menu entry was dispatched after the selection it was built for was
	/// replaced.
	#[error("selection changed since the menu was built")]
	StaleSelection,

	#[error("action is not available: {0}")]
	ActionUnavailable(String),

	/// The command needs input the caller did not provide.
	#[error("missing {0}")]
	MissingInput(&'static str),

	#[error("save failed")]
	Save(#[source] EngineError),

	/// An editing primitive (add, remove, convert, copy, paste, undo) failed.
	#[error("edit failed")]
	Edit(#[source] EngineError),

	#[error(transparent)]
	Clipboard(#[from] ClipboardError),

	#[error("I/O error on {}: {error}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		error: std::io::Error,
	},
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
