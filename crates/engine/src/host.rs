//! The engine + editor surface abstraction consumed by the session core.
//!
//! # Architecture
//!
//! ```text
//! quire-session                     InkHost (engine implements)
//! ┌──────────────────────┐          ┌──────────────────────────────┐
//! │ SessionController    │─────────▶│ create/open/save/close pkg   │
//! │                      │          │ create/get/index-of/release  │
//! │                      │          │ bind_part / bound_part       │
//! │ CapabilityResolver   │─────────▶│ root_block / is_empty        │
//! │                      │          │ supported_* queries          │
//! │ TransferNegotiator   │─────────▶│ wait_for_idle / export       │
//! │                      │          │ import                       │
//! └──────────────────────┘          └──────────────────────────────┘
//! ```
//!
//! # Ownership
//!
//! Packages and part handles are engine resources. The host hands out ids
//! and frees the resource when the session calls [`InkHost::close_package`]
//! or [`InkHost::release_part`]. Releasing a handle that is still bound, or
//! closing a package whose part is still bound, is a caller bug; hosts may
//! log or record it but must not crash.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{
	BlockKind, ContentBlock, ConversionState, EngineOptions, MimeType, PackageId, PartId, PartType,
	Point, Result,
};

/// Operations the session core needs from the recognition engine and the
/// editor surface it renders into.
///
/// All methods run on the UI thread; the only suspension point is
/// [`InkHost::wait_for_idle`].
#[async_trait(?Send)]
pub trait InkHost {
	/// Applies startup options.
	fn configure(&mut self, options: &EngineOptions) -> Result<()>;

	/// Part types the engine can create, in engine order.
	fn supported_part_types(&self) -> Vec<PartType>;

	/// Folder where the engine stages open packages.
	fn temp_folder(&self) -> PathBuf;

	/// Creates a new, unsaved package that will be written to `path`.
	fn create_package(&mut self, path: &Path) -> Result<PackageId>;

	/// Opens an existing package.
	fn open_package(&mut self, path: &Path) -> Result<PackageId>;

	/// Writes the package to its current path.
	fn save_package(&mut self, package: PackageId) -> Result<()>;

	/// Writes the package to `path` and adopts it as the package's path.
	fn save_package_as(&mut self, package: PackageId, path: &Path) -> Result<()>;

	/// Disposes the package. Unsaved changes are lost.
	fn close_package(&mut self, package: PackageId);

	/// On-disk identity of the package.
	fn package_path(&self, package: PackageId) -> Option<PathBuf>;

	/// Appends a part of `ty` to the package and returns a handle to it.
	fn create_part(&mut self, package: PackageId, ty: &PartType) -> Result<PartId>;

	fn part_count(&self, package: PackageId) -> usize;

	/// Acquires a fresh handle to the part at `index`.
	fn get_part(&mut self, package: PackageId, index: usize) -> Result<PartId>;

	/// Position of the handle's part within its package.
	fn index_of_part(&self, package: PackageId, part: PartId) -> Option<usize>;

	fn part_type(&self, part: PartId) -> Option<PartType>;

	/// Disposes a part handle. The stored part remains in its package.
	fn release_part(&mut self, part: PartId);

	/// Binds `part` to the editor surface, or unbinds with `None`.
	///
	/// A failed bind leaves the surface unbound; it never leaves a part
	/// partially bound.
	fn bind_part(&mut self, part: Option<PartId>) -> Result<()>;

	fn bound_part(&self) -> Option<PartId>;

	/// Root block of the bound part.
	fn root_block(&self) -> Option<ContentBlock>;

	/// Innermost block of the bound part under `point`.
	fn hit_block(&self, point: Point) -> Option<ContentBlock>;

	fn is_empty(&self, block: &ContentBlock) -> bool;

	/// Returns true when `block` belongs to the bound part.
	///
	/// Block ids are only unique within a part, so a block taken from another
	/// part can share an id with an unrelated block here.
	fn contains_block(&self, block: &ContentBlock) -> bool;

	/// Block kinds that can be added to the bound part.
	fn supported_add_block_types(&self) -> Vec<BlockKind>;

	/// Formats accepted as initial data when adding a block of `kind`.
	fn supported_add_block_data_mime_types(&self, kind: &BlockKind) -> Vec<MimeType>;

	fn supported_export_mime_types(&self, block: &ContentBlock) -> Vec<MimeType>;

	fn supported_import_mime_types(&self, block: &ContentBlock) -> Vec<MimeType>;

	/// Conversion targets for `block`, or for the whole part with `None`.
	fn supported_target_conversion_states(&self, block: Option<&ContentBlock>) -> Vec<ConversionState>;

	/// Returns true when no recognition work is pending.
	fn is_idle(&self) -> bool;

	/// Resolves once pending recognition work has been applied.
	async fn wait_for_idle(&mut self);

	/// Writes `block` to `path` in `mime`.
	fn export(&mut self, block: &ContentBlock, path: &Path, mime: MimeType) -> Result<()>;

	/// Applies `data` to `block`. All-or-nothing.
	fn import(&mut self, mime: MimeType, data: &str, block: &ContentBlock) -> Result<()>;

	fn convert(&mut self, block: Option<&ContentBlock>, target: ConversionState) -> Result<()>;

	/// Adds a block at `at`, optionally seeded with `(format, data)`.
	fn add_block(&mut self, at: Point, kind: &BlockKind, data: Option<(MimeType, &str)>) -> Result<()>;

	fn remove_block(&mut self, block: &ContentBlock) -> Result<()>;

	/// Copies `block` into the engine's internal copy buffer.
	fn copy(&mut self, block: &ContentBlock) -> Result<()>;

	fn paste(&mut self, at: Point) -> Result<()>;

	/// Returns true when the bound part has an edit to undo.
	fn can_undo(&self) -> bool;

	fn can_redo(&self) -> bool;

	/// Reverts the bound part's last edit.
	fn undo(&mut self) -> Result<()>;

	/// Re-applies the bound part's last undone edit.
	fn redo(&mut self) -> Result<()>;
}
