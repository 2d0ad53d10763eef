//! Per-session selection state.
//!
//! # Purpose
//!
//! - Own the "last selected block" explicitly instead of as a free field
//!   shared between handlers.
//! - Stamp every selection with a generation so a menu built for an older
//!   selection cannot act on a newer one.
//!
//! # Invariants
//!
//! - Replacing or clearing the selection drops the previous block value and
//!   bumps the generation; a stale reference is never reused.
//! - The generation only moves forward.

use quire_engine::{ContentBlock, InkHost, Point};

use crate::error::{Result, SessionError};

/// Snapshot of a selection taken for one interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Selected {
	pub block: ContentBlock,
	/// Where the interaction happened; used as the insertion point for add
	/// and paste.
	pub point: Point,
	pub generation: u64,
}

#[derive(Debug, Default)]
pub struct SelectionContext {
	current: Option<Selected>,
	generation: u64,
}

impl SelectionContext {
	pub fn new() -> Self {
		Self::default()
	}

	/// Hit-tests `point` on the bound part and selects the result.
	///
	/// Misses and container hits select the root block instead. Returns
	/// `None` (and clears the selection) when nothing is bound.
	pub fn select_at<H: InkHost + ?Sized>(&mut self, host: &H, point: Point) -> Option<&Selected> {
		let block = host
			.hit_block(point)
			.filter(|b| !b.is_container())
			.or_else(|| host.root_block());
		match block {
			Some(block) => Some(self.replace(block, point)),
			None => {
				self.clear();
				None
			}
		}
	}

	/// Selects a block supplied by the caller (for example, a block picked
	/// from a guide widget) without hit-testing.
	pub fn select_block(&mut self, block: ContentBlock, point: Point) -> &Selected {
		self.replace(block, point)
	}

	pub fn clear(&mut self) {
		if self.current.take().is_some() {
			self.generation += 1;
			tracing::trace!(generation = self.generation, "selection cleared");
		}
	}

	pub fn current(&self) -> Option<&Selected> {
		self.current.as_ref()
	}

	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// Returns the current selection if it was taken at `generation`.
	pub fn checked(&self, generation: u64) -> Result<&Selected> {
		match &self.current {
			Some(selected) if selected.generation == generation => Ok(selected),
			_ => Err(SessionError::StaleSelection),
		}
	}

	fn replace(&mut self, block: ContentBlock, point: Point) -> &Selected {
		self.generation += 1;
		tracing::trace!(block = %block.id, kind = %block.kind, generation = self.generation, "selection replaced");
		self.current.insert(Selected {
			block,
			point,
			generation: self.generation,
		})
	}
}
