//! Per-part undo history for the memory engine.
//!
//! Each edit records a full snapshot of the part's content before it is
//! applied. Undo swaps the current content for the latest snapshot and pushes
//! the current content onto the redo stack. Recording a new edit clears redo.

use super::store::StoredBlock;

/// Maximum undo steps kept per part.
pub const MAX_UNDO: usize = 100;

/// Content of a part at one point in its history.
#[derive(Debug, Clone, Default)]
pub(crate) struct Snapshot {
	pub blocks: Vec<StoredBlock>,
	pub pending: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct History {
	undo: Vec<Snapshot>,
	redo: Vec<Snapshot>,
}

impl History {
	/// Records the content as it was before an edit.
	///
	/// Enforces [`MAX_UNDO`] by dropping the oldest step.
	pub fn record(&mut self, before: Snapshot) {
		self.undo.push(before);
		if self.undo.len() > MAX_UNDO {
			self.undo.remove(0);
		}
		self.redo.clear();
	}

	/// Returns the snapshot to restore, stashing `current` for redo.
	pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
		let previous = self.undo.pop()?;
		self.redo.push(current);
		Some(previous)
	}

	/// Returns the snapshot to restore, stashing `current` for undo.
	pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
		let next = self.redo.pop()?;
		self.undo.push(current);
		Some(next)
	}

	pub fn can_undo(&self) -> bool {
		!self.undo.is_empty()
	}

	pub fn can_redo(&self) -> bool {
		!self.redo.is_empty()
	}
}
