//! JSON package files for the memory engine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::history::{History, Snapshot};
use crate::{BlockId, BlockKind, ConversionState, EngineError, PartType, Rect, Result};

const FORMAT_VERSION: u32 = 1;

/// On-disk package layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PackageFile {
	pub format: u32,
	pub parts: Vec<StoredPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredPart {
	/// Stable key for handle lookups; reassigned on load.
	#[serde(skip)]
	pub key: u64,
	pub part_type: PartType,
	/// Root first, then children in insertion order.
	pub blocks: Vec<StoredBlock>,
	/// Ink written but not yet recognized.
	#[serde(default)]
	pub pending: Vec<String>,
	#[serde(default)]
	pub next_block: u64,
	/// Edit history; not persisted.
	#[serde(skip)]
	pub history: History,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredBlock {
	pub id: BlockId,
	pub kind: BlockKind,
	pub bounds: Rect,
	#[serde(default)]
	pub parent: Option<BlockId>,
	#[serde(default)]
	pub text: String,
	#[serde(default)]
	pub strokes: usize,
	#[serde(default)]
	pub converted: Option<ConversionState>,
}

impl StoredPart {
	pub fn new(key: u64, part_type: PartType) -> Self {
		let root = StoredBlock {
			id: BlockId::new("root"),
			kind: part_type.root_kind(),
			bounds: Rect::new(0.0, 0.0, 2048.0, 2048.0),
			parent: None,
			text: String::new(),
			strokes: 0,
			converted: None,
		};
		Self {
			key,
			part_type,
			blocks: vec![root],
			pending: Vec::new(),
			next_block: 1,
			history: History::default(),
		}
	}

	fn snapshot(&self) -> Snapshot {
		Snapshot {
			blocks: self.blocks.clone(),
			pending: self.pending.clone(),
		}
	}

	fn restore(&mut self, snapshot: Snapshot) {
		self.blocks = snapshot.blocks;
		self.pending = snapshot.pending;
	}

	/// Records the current content as an undo step. Call right before a
	/// mutation that can no longer fail.
	pub fn checkpoint(&mut self) {
		let before = self.snapshot();
		self.history.record(before);
	}

	/// Restores the previous content; false when there is nothing to undo.
	pub fn undo(&mut self) -> bool {
		let current = self.snapshot();
		match self.history.undo(current) {
			Some(previous) => {
				self.restore(previous);
				true
			}
			None => false,
		}
	}

	/// Re-applies the last undone edit; false when there is nothing to redo.
	pub fn redo(&mut self) -> bool {
		let current = self.snapshot();
		match self.history.redo(current) {
			Some(next) => {
				self.restore(next);
				true
			}
			None => false,
		}
	}

	pub fn root(&self) -> Option<&StoredBlock> {
		self.blocks.first()
	}

	pub fn block(&self, id: &BlockId) -> Option<&StoredBlock> {
		self.blocks.iter().find(|b| &b.id == id)
	}

	pub fn block_mut(&mut self, id: &BlockId) -> Option<&mut StoredBlock> {
		self.blocks.iter_mut().find(|b| &b.id == id)
	}

	pub fn is_root(&self, id: &BlockId) -> bool {
		self.root().is_some_and(|r| &r.id == id)
	}

	pub fn fresh_block_id(&mut self) -> BlockId {
		let id = BlockId::new(format!("b{}", self.next_block));
		self.next_block += 1;
		id
	}

	/// Blocks covered by `id`: everything for the root, the block plus its
	/// descendants otherwise.
	pub fn subtree(&self, id: &BlockId) -> Vec<&StoredBlock> {
		if self.is_root(id) {
			return self.blocks.iter().collect();
		}
		let mut out: Vec<&StoredBlock> = Vec::new();
		let mut frontier = vec![id.clone()];
		while let Some(current) = frontier.pop() {
			if let Some(block) = self.block(&current) {
				out.push(block);
			}
			frontier.extend(
				self.blocks
					.iter()
					.filter(|b| b.parent.as_ref() == Some(&current))
					.map(|b| b.id.clone()),
			);
		}
		out
	}
}

impl StoredBlock {
	pub fn has_content(&self) -> bool {
		!self.text.is_empty() || self.strokes > 0
	}
}

pub(crate) fn read(path: &Path) -> Result<PackageFile> {
	let bytes = std::fs::read(path).map_err(|error| EngineError::Io {
		path: path.to_path_buf(),
		error,
	})?;
	let file: PackageFile = serde_json::from_slice(&bytes).map_err(|e| EngineError::Corrupt {
		path: path.to_path_buf(),
		reason: e.to_string(),
	})?;
	if file.format != FORMAT_VERSION {
		return Err(EngineError::Corrupt {
			path: path.to_path_buf(),
			reason: format!("unsupported format version {}", file.format),
		});
	}
	Ok(file)
}

pub(crate) fn write(path: &Path, parts: &[StoredPart]) -> Result<()> {
	let file = PackageFile {
		format: FORMAT_VERSION,
		parts: parts.to_vec(),
	};
	let json = serde_json::to_vec_pretty(&file).map_err(|e| EngineError::Corrupt {
		path: path.to_path_buf(),
		reason: e.to_string(),
	})?;
	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		std::fs::create_dir_all(parent).map_err(|error| EngineError::Io {
			path: parent.to_path_buf(),
			error,
		})?;
	}
	std::fs::write(path, json).map_err(|error| EngineError::Io {
		path: path.to_path_buf(),
		error,
	})
}
