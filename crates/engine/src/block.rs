use serde::{Deserialize, Serialize};

use crate::{BlockId, BlockKind, Rect};

/// A region within the bound part's content tree.
///
/// Blocks are plain values fetched per interaction (hit-test, root query).
/// Two blocks denote the same region when their ids match; kind and bounds
/// may drift as content is edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
	pub id: BlockId,
	pub kind: BlockKind,
	pub bounds: Rect,
}

impl ContentBlock {
	pub fn new(id: BlockId, kind: BlockKind, bounds: Rect) -> Self {
		Self { id, kind, bounds }
	}

	/// Identity comparison (block ids), ignoring kind and bounds.
	pub fn same_block(&self, other: &ContentBlock) -> bool {
		self.id == other.id
	}

	pub fn is_container(&self) -> bool {
		self.kind.is_container()
	}
}
