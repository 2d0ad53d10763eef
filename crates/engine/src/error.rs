//! Error types reported by engine hosts.

use std::path::PathBuf;

use thiserror::Error;

use crate::{BlockId, MimeType, PackageId, PartId};

/// Errors an [`InkHost`](crate::InkHost) can report.
#[derive(Debug, Error)]
pub enum EngineError {
	/// The engine does not support creating or binding this part type.
	#[error("unsupported part type: {0}")]
	UnsupportedPartType(String),

	/// The package handle is unknown or already closed.
	#[error("unknown package handle: {0}")]
	UnknownPackage(PackageId),

	/// The part handle is unknown or already released.
	#[error("unknown part handle: {0}")]
	UnknownPart(PartId),

	/// A part index outside the package's sequence.
	#[error("part index {index} out of range (package has {count} parts)")]
	PartIndexOutOfRange { index: usize, count: usize },

	/// The part exists but the editor surface refused to bind it.
	#[error("part cannot be activated: {0}")]
	ActivationRefused(String),

	/// A package file could not be decoded.
	#[error("corrupt package {path}: {reason}")]
	Corrupt { path: PathBuf, reason: String },

	/// Filesystem failure while reading or writing package or export data.
	#[error("I/O error on {path}: {error}")]
	Io {
		path: PathBuf,
		error: std::io::Error,
	},

	/// The engine still has pending recognition work.
	#[error("engine is busy")]
	Busy,

	/// The requested format is not offered for the target block.
	#[error("format {0} is not supported here")]
	UnsupportedMimeType(MimeType),

	/// No part is bound to the editor surface.
	#[error("no part is bound to the editor")]
	NotBound,

	/// The block does not exist in the bound part.
	#[error("unknown block: {0}")]
	UnknownBlock(BlockId),

	/// The operation is not allowed on this block.
	#[error("operation not allowed on block {block}: {reason}")]
	InvalidBlock { block: BlockId, reason: &'static str },

	/// Paste requested with an empty copy buffer.
	#[error("nothing to paste")]
	NothingToPaste,

	/// Undo requested with an empty history.
	#[error("nothing to undo")]
	NothingToUndo,

	/// Redo requested with nothing undone.
	#[error("nothing to redo")]
	NothingToRedo,

	/// Import payload could not be applied.
	#[error("invalid import data: {0}")]
	InvalidData(String),

	/// Failure injected or reported by the engine without further detail.
	#[error("{0}")]
	Rejected(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
