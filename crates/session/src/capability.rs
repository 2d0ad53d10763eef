//! Capability resolution: which actions are legal for a selected block.
//!
//! # Purpose
//!
//! - Turn (active part, selected block) into a [`CapabilitySnapshot`] listing
//!   every legal action category and its concrete options.
//! - Keep the rules in one place so the menu builder only lays out what it is
//!   given.
//!
//! # Rules
//!
//! | Category | Legal when |
//! |---|---|
//! | everything | block is the root, or not a container |
//! | add block | block is the root and the engine lists addable kinds |
//! | remove | block is not the root |
//! | convert | engine lists targets for the block and the block has content |
//! | copy | block is not the root of a text-document part |
//! | clipboard | export formats contain the office clipboard format |
//! | paste | block is the root |
//! | export | engine lists formats for the export target |
//! | import | engine lists formats for the block |
//!
//! The export target is the root block on raw-content parts (exports there
//! always cover the whole content) and the selected block otherwise.
//!
//! # Invariants
//!
//! - Resolution is read-only: it never mutates the part, its package, or the
//!   selection.
//! - Snapshots are never cached. Callers resolve again for every selection
//!   event, so mutations between calls are always observed.

use quire_engine::{BlockKind, ContentBlock, ConversionState, InkHost, MimeType, PartId, PartType};

use crate::error::{Result, SessionError};

/// Legal actions for one (part, block) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CapabilitySnapshot {
	pub part_type: PartType,
	pub block: ContentBlock,
	/// Block that export and clipboard operate on.
	pub export_target: ContentBlock,
	pub is_root: bool,
	pub is_empty: bool,
	pub is_container: bool,
	pub add_block: Vec<BlockKind>,
	pub export: Vec<MimeType>,
	pub import: Vec<MimeType>,
	pub convert: Vec<ConversionState>,
	pub clipboard: bool,
	pub copy: bool,
	pub paste: bool,
	pub remove: bool,
}

impl CapabilitySnapshot {
	/// Snapshot with no legal action.
	pub fn inert(part_type: PartType, block: ContentBlock, is_empty: bool) -> Self {
		Self {
			part_type,
			export_target: block.clone(),
			is_container: block.is_container(),
			block,
			is_root: false,
			is_empty,
			add_block: Vec::new(),
			export: Vec::new(),
			import: Vec::new(),
			convert: Vec::new(),
			clipboard: false,
			copy: false,
			paste: false,
			remove: false,
		}
	}

	/// Returns true when at least one action is legal.
	pub fn has_actions(&self) -> bool {
		!self.add_block.is_empty()
			|| !self.export.is_empty()
			|| !self.import.is_empty()
			|| !self.convert.is_empty()
			|| self.clipboard
			|| self.copy
			|| self.paste
			|| self.remove
	}
}

/// Resolves the legal actions for `block` in the bound `part`.
///
/// Fails with [`SessionError::NoActivePart`] when `part` is not the part
/// bound to the editor surface, and with [`SessionError::UnknownBlock`] when
/// `block` is not in it.
pub fn resolve<H: InkHost + ?Sized>(host: &H, part: PartId, block: &ContentBlock) -> Result<CapabilitySnapshot> {
	if host.bound_part() != Some(part) {
		return Err(SessionError::NoActivePart);
	}
	if !host.contains_block(block) {
		return Err(SessionError::UnknownBlock(block.id.clone()));
	}
	let part_type = host.part_type(part).ok_or(SessionError::NoActivePart)?;
	let root = host.root_block().ok_or(SessionError::NoActivePart)?;

	let is_root = block.same_block(&root);
	let is_empty = host.is_empty(block);
	if !is_root && block.is_container() {
		tracing::debug!(block = %block.id, "capabilities: non-root container has no actions");
		return Ok(CapabilitySnapshot::inert(part_type, block.clone(), is_empty));
	}

	let export_target = match part_type {
		PartType::RawContent => root.clone(),
		_ => block.clone(),
	};
	let on_text_document = matches!(part_type, PartType::TextDocument);

	let add_types = host.supported_add_block_types();
	let export = host.supported_export_mime_types(&export_target);
	let import = host.supported_import_mime_types(block);
	let states = host.supported_target_conversion_states(Some(block));

	let snapshot = CapabilitySnapshot {
		add_block: if is_root { add_types } else { Vec::new() },
		clipboard: export.contains(&MimeType::CLIPBOARD),
		export,
		import,
		convert: if is_empty { Vec::new() } else { states },
		copy: !on_text_document || !is_root,
		paste: is_root,
		remove: !is_root,
		is_root,
		is_empty,
		is_container: block.is_container(),
		export_target,
		block: block.clone(),
		part_type,
	};
	tracing::debug!(
		block = %snapshot.block.id,
		root = snapshot.is_root,
		empty = snapshot.is_empty,
		exports = snapshot.export.len(),
		imports = snapshot.import.len(),
		convert = snapshot.convert.len(),
		"capabilities resolved"
	);
	Ok(snapshot)
}
