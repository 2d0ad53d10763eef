//! Headless in-memory [`InkHost`].
//!
//! # Purpose
//!
//! - Give the session core a deterministic engine for tests and the CLI.
//! - Make the invariants the session promises observable: every bind,
//!   release, and close lands in a journal, and misuse (releasing a bound
//!   handle, closing the package of a bound part) is recorded as a violation.
//!
//! # Mental model
//!
//! - Packages live in memory and are written to their path as JSON on save.
//!   Each open package owns a `<temp>/<file name>-file` staging folder,
//!   removed on close.
//! - Parts are addressed by handles. Every `create_part`/`get_part` mints a
//!   new [`PartId`] pointing at a stored part key.
//! - Every content edit records an undo step on the edited part, keeping at
//!   most [`MAX_UNDO`] steps. Undo and redo restore whole-part snapshots.
//! - Writing ink makes the engine busy. Pending strokes are recognized
//!   (appended to the root text) once the [`RecognitionHandle`] reports idle
//!   and the engine is awaited or flushed.
//!
//! # Fault injection
//!
//! | Knob | Effect |
//! |---|---|
//! | [`MemoryEngine::reject_part_type`] | `create_part` fails for the type |
//! | [`MemoryEngine::refuse_activation_of`] | `bind_part` fails for parts of the type |
//! | [`MemoryEngine::refuse_activation`] | `bind_part` fails for one stored part |
//! | [`MemoryEngine::fail_exports`] / [`MemoryEngine::fail_imports`] | transfer primitives fail without side effects |
//! | [`MemoryEngine::fail_opens`] / [`MemoryEngine::fail_saves`] | package I/O fails |

mod content;
mod history;
mod store;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

pub use self::history::MAX_UNDO;
use self::store::{StoredBlock, StoredPart};
use crate::{
	BlockId, BlockKind, ContentBlock, ConversionState, EngineError, EngineOptions, InkHost,
	MimeType, PackageId, PartId, PartType, Point, Rect, Result,
};

/// Observable engine event.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
	PackageCreated(PackageId),
	PackageOpened(PackageId),
	PackageSaved(PackageId),
	PackageClosed(PackageId),
	Bound(Option<PartId>),
	BindRefused(PartId),
	Released(PartId),
	Exported { path: PathBuf, mime: MimeType },
	Imported { block: BlockId, mime: MimeType },
	/// A handle was released while still bound.
	ReleasedWhileBound(PartId),
	/// A package was closed while one of its parts was bound.
	ClosedWhileBound(PackageId),
}

impl EngineEvent {
	pub fn is_violation(&self) -> bool {
		matches!(self, Self::ReleasedWhileBound(_) | Self::ClosedWhileBound(_))
	}
}

/// Shared switch for the engine's recognition state.
///
/// Cloning is cheap; all clones drive the same engine.
#[derive(Debug, Clone)]
pub struct RecognitionHandle(Arc<watch::Sender<bool>>);

impl RecognitionHandle {
	fn new() -> Self {
		Self(Arc::new(watch::Sender::new(true)))
	}

	/// Marks pending recognition work as finished.
	pub fn complete(&self) {
		self.0.send_replace(true);
	}

	/// Marks the engine as having pending work.
	pub fn start(&self) {
		self.0.send_replace(false);
	}

	pub fn is_idle(&self) -> bool {
		*self.0.borrow()
	}
}

#[derive(Debug)]
struct OpenPackage {
	path: PathBuf,
	staging: PathBuf,
	parts: Vec<StoredPart>,
}

#[derive(Debug, Clone, Copy)]
struct Handle {
	package: PackageId,
	key: u64,
}

#[derive(Debug, Default)]
struct Faults {
	rejected_types: HashSet<PartType>,
	refused_types: HashSet<PartType>,
	refused_keys: HashSet<u64>,
	fail_exports: bool,
	fail_imports: bool,
	fail_opens: bool,
	fail_saves: bool,
}

/// In-memory engine and editor surface.
#[derive(Debug)]
pub struct MemoryEngine {
	options: EngineOptions,
	temp_folder: PathBuf,
	packages: HashMap<PackageId, OpenPackage>,
	handles: HashMap<PartId, Handle>,
	bound: Option<PartId>,
	next_id: u64,
	faults: Faults,
	recognition: RecognitionHandle,
	copy_buffer: Option<StoredBlock>,
	journal: Vec<EngineEvent>,
}

impl Default for MemoryEngine {
	fn default() -> Self {
		Self::new(std::env::temp_dir().join("quire"))
	}
}

impl MemoryEngine {
	/// Creates an engine staging packages under `temp_folder`.
	pub fn new(temp_folder: impl Into<PathBuf>) -> Self {
		Self {
			options: EngineOptions::default(),
			temp_folder: temp_folder.into(),
			packages: HashMap::new(),
			handles: HashMap::new(),
			bound: None,
			next_id: 1,
			faults: Faults::default(),
			recognition: RecognitionHandle::new(),
			copy_buffer: None,
			journal: Vec::new(),
		}
	}

	pub fn reject_part_type(&mut self, ty: PartType) {
		self.faults.rejected_types.insert(ty);
	}

	pub fn refuse_activation_of(&mut self, ty: PartType) {
		self.faults.refused_types.insert(ty);
	}

	/// Makes the stored part at `index` of `package` refuse activation.
	pub fn refuse_activation(&mut self, package: PackageId, index: usize) -> Result<()> {
		let pkg = self.packages.get(&package).ok_or(EngineError::UnknownPackage(package))?;
		let part = pkg.parts.get(index).ok_or(EngineError::PartIndexOutOfRange {
			index,
			count: pkg.parts.len(),
		})?;
		self.faults.refused_keys.insert(part.key);
		Ok(())
	}

	pub fn fail_exports(&mut self, fail: bool) {
		self.faults.fail_exports = fail;
	}

	pub fn fail_imports(&mut self, fail: bool) {
		self.faults.fail_imports = fail;
	}

	pub fn fail_opens(&mut self, fail: bool) {
		self.faults.fail_opens = fail;
	}

	pub fn fail_saves(&mut self, fail: bool) {
		self.faults.fail_saves = fail;
	}

	pub fn recognition(&self) -> RecognitionHandle {
		self.recognition.clone()
	}

	pub fn options(&self) -> &EngineOptions {
		&self.options
	}

	pub fn journal(&self) -> &[EngineEvent] {
		&self.journal
	}

	pub fn violations(&self) -> Vec<&EngineEvent> {
		self.journal.iter().filter(|e| e.is_violation()).collect()
	}

	pub fn open_package_count(&self) -> usize {
		self.packages.len()
	}

	pub fn live_handle_count(&self) -> usize {
		self.handles.len()
	}

	/// Writes a stroke of ink into the bound part's root block.
	///
	/// The stroke counts as content immediately; its recognized `text` is
	/// applied once recognition completes.
	pub fn write_ink(&mut self, text: impl Into<String>) -> Result<()> {
		let part = self.bound_stored_mut()?;
		part.checkpoint();
		if let Some(root) = part.blocks.first_mut() {
			root.strokes += 1;
		}
		part.pending.push(text.into());
		self.recognition.start();
		Ok(())
	}

	/// Completes recognition and applies pending strokes.
	pub fn settle(&mut self) {
		self.recognition.complete();
		self.flush_recognition();
	}

	/// Inserts a block into the bound part, optionally under `parent`.
	pub fn insert_block(
		&mut self,
		kind: BlockKind,
		bounds: Rect,
		text: &str,
		parent: Option<&BlockId>,
	) -> Result<ContentBlock> {
		let part = self.bound_stored_mut()?;
		if let Some(parent) = parent
			&& part.block(parent).is_none()
		{
			return Err(EngineError::UnknownBlock(parent.clone()));
		}
		part.checkpoint();
		let id = part.fresh_block_id();
		part.blocks.push(StoredBlock {
			id: id.clone(),
			kind: kind.clone(),
			bounds,
			parent: parent.cloned(),
			text: text.to_string(),
			strokes: 0,
			converted: None,
		});
		Ok(ContentBlock::new(id, kind, bounds))
	}

	/// Recognized text of a block in the bound part.
	pub fn block_text(&self, id: &BlockId) -> Option<String> {
		self.bound_stored().ok()?.block(id).map(|b| b.text.clone())
	}

	/// Conversion state applied to a block in the bound part.
	pub fn block_conversion(&self, id: &BlockId) -> Option<ConversionState> {
		self.bound_stored().ok()?.block(id)?.converted
	}

	/// Number of blocks in the bound part, root included.
	pub fn block_count(&self) -> usize {
		self.bound_stored().map(|p| p.blocks.len()).unwrap_or(0)
	}

	fn next_id(&mut self) -> u64 {
		let id = self.next_id;
		self.next_id += 1;
		id
	}

	fn flush_recognition(&mut self) {
		let Some(handle) = self.bound.and_then(|p| self.handles.get(&p).copied()) else {
			return;
		};
		let Some(part) = self.stored_mut(handle) else {
			return;
		};
		if part.pending.is_empty() {
			return;
		}
		let recognized = std::mem::take(&mut part.pending).join(" ");
		if let Some(root) = part.blocks.first_mut() {
			if !root.text.is_empty() {
				root.text.push(' ');
			}
			root.text.push_str(&recognized);
		}
		tracing::trace!(chars = recognized.len(), "memory engine: recognition flushed");
	}

	fn stored(&self, handle: Handle) -> Option<&StoredPart> {
		self.packages
			.get(&handle.package)?
			.parts
			.iter()
			.find(|p| p.key == handle.key)
	}

	fn stored_mut(&mut self, handle: Handle) -> Option<&mut StoredPart> {
		self.packages
			.get_mut(&handle.package)?
			.parts
			.iter_mut()
			.find(|p| p.key == handle.key)
	}

	fn bound_stored(&self) -> Result<&StoredPart> {
		let part = self.bound.ok_or(EngineError::NotBound)?;
		let handle = *self.handles.get(&part).ok_or(EngineError::UnknownPart(part))?;
		self.stored(handle).ok_or(EngineError::UnknownPart(part))
	}

	fn bound_stored_mut(&mut self) -> Result<&mut StoredPart> {
		let part = self.bound.ok_or(EngineError::NotBound)?;
		let handle = *self.handles.get(&part).ok_or(EngineError::UnknownPart(part))?;
		self.stored_mut(handle).ok_or(EngineError::UnknownPart(part))
	}

	fn bound_block(&self, block: &ContentBlock) -> Result<(&StoredPart, &StoredBlock)> {
		let part = self.bound_stored()?;
		let stored = part
			.block(&block.id)
			.ok_or_else(|| EngineError::UnknownBlock(block.id.clone()))?;
		Ok((part, stored))
	}

	fn staging_folder(&self, path: &Path) -> PathBuf {
		let name = path
			.file_name()
			.map(|n| n.to_string_lossy().into_owned())
			.unwrap_or_else(|| "package".to_string());
		self.temp_folder.join(format!("{name}-file"))
	}

	fn register_package(&mut self, path: &Path, parts: Vec<StoredPart>) -> Result<PackageId> {
		let staging = self.staging_folder(path);
		std::fs::create_dir_all(&staging).map_err(|error| EngineError::Io {
			path: staging.clone(),
			error,
		})?;
		let id = PackageId(self.next_id());
		self.packages.insert(
			id,
			OpenPackage {
				path: path.to_path_buf(),
				staging,
				parts,
			},
		);
		Ok(id)
	}

	fn to_content_block(block: &StoredBlock) -> ContentBlock {
		ContentBlock::new(block.id.clone(), block.kind.clone(), block.bounds)
	}
}

#[async_trait(?Send)]
impl InkHost for MemoryEngine {
	fn configure(&mut self, options: &EngineOptions) -> Result<()> {
		if let Some(folder) = &options.temp_folder {
			self.temp_folder = folder.clone();
		}
		self.options = options.clone();
		Ok(())
	}

	fn supported_part_types(&self) -> Vec<PartType> {
		PartType::KNOWN
			.into_iter()
			.filter(|t| !self.faults.rejected_types.contains(t))
			.collect()
	}

	fn temp_folder(&self) -> PathBuf {
		self.temp_folder.clone()
	}

	fn create_package(&mut self, path: &Path) -> Result<PackageId> {
		if path.exists() {
			return Err(EngineError::Rejected(format!(
				"package already exists: {}",
				path.display()
			)));
		}
		let id = self.register_package(path, Vec::new())?;
		self.journal.push(EngineEvent::PackageCreated(id));
		Ok(id)
	}

	fn open_package(&mut self, path: &Path) -> Result<PackageId> {
		if self.faults.fail_opens {
			return Err(EngineError::Rejected("open failure injected".into()));
		}
		let file = store::read(path)?;
		let mut parts = file.parts;
		for part in &mut parts {
			part.key = self.next_id();
		}
		let id = self.register_package(path, parts)?;
		self.journal.push(EngineEvent::PackageOpened(id));
		Ok(id)
	}

	fn save_package(&mut self, package: PackageId) -> Result<()> {
		if self.faults.fail_saves {
			return Err(EngineError::Rejected("save failure injected".into()));
		}
		let pkg = self.packages.get(&package).ok_or(EngineError::UnknownPackage(package))?;
		store::write(&pkg.path, &pkg.parts)?;
		self.journal.push(EngineEvent::PackageSaved(package));
		Ok(())
	}

	fn save_package_as(&mut self, package: PackageId, path: &Path) -> Result<()> {
		if self.faults.fail_saves {
			return Err(EngineError::Rejected("save failure injected".into()));
		}
		let pkg = self.packages.get_mut(&package).ok_or(EngineError::UnknownPackage(package))?;
		store::write(path, &pkg.parts)?;
		pkg.path = path.to_path_buf();
		self.journal.push(EngineEvent::PackageSaved(package));
		Ok(())
	}

	fn close_package(&mut self, package: PackageId) {
		if let Some(bound) = self.bound
			&& self.handles.get(&bound).is_some_and(|h| h.package == package)
		{
			tracing::error!(%package, part = %bound, "memory engine: package closed while its part is bound");
			self.journal.push(EngineEvent::ClosedWhileBound(package));
			self.bound = None;
		}
		self.handles.retain(|_, h| h.package != package);
		if let Some(pkg) = self.packages.remove(&package) {
			if let Err(error) = std::fs::remove_dir_all(&pkg.staging) {
				tracing::trace!(path = %pkg.staging.display(), %error, "memory engine: staging cleanup skipped");
			}
			self.journal.push(EngineEvent::PackageClosed(package));
		}
	}

	fn package_path(&self, package: PackageId) -> Option<PathBuf> {
		self.packages.get(&package).map(|p| p.path.clone())
	}

	fn create_part(&mut self, package: PackageId, ty: &PartType) -> Result<PartId> {
		if matches!(ty, PartType::Unknown(_)) || self.faults.rejected_types.contains(ty) {
			return Err(EngineError::UnsupportedPartType(ty.to_string()));
		}
		let key = self.next_id();
		let pkg = self.packages.get_mut(&package).ok_or(EngineError::UnknownPackage(package))?;
		pkg.parts.push(StoredPart::new(key, ty.clone()));
		let id = PartId(self.next_id());
		self.handles.insert(id, Handle { package, key });
		Ok(id)
	}

	fn part_count(&self, package: PackageId) -> usize {
		self.packages.get(&package).map(|p| p.parts.len()).unwrap_or(0)
	}

	fn get_part(&mut self, package: PackageId, index: usize) -> Result<PartId> {
		let pkg = self.packages.get(&package).ok_or(EngineError::UnknownPackage(package))?;
		let key = pkg
			.parts
			.get(index)
			.map(|p| p.key)
			.ok_or(EngineError::PartIndexOutOfRange {
				index,
				count: pkg.parts.len(),
			})?;
		let id = PartId(self.next_id());
		self.handles.insert(id, Handle { package, key });
		Ok(id)
	}

	fn index_of_part(&self, package: PackageId, part: PartId) -> Option<usize> {
		let handle = self.handles.get(&part).filter(|h| h.package == package)?;
		self.packages
			.get(&package)?
			.parts
			.iter()
			.position(|p| p.key == handle.key)
	}

	fn part_type(&self, part: PartId) -> Option<PartType> {
		let handle = *self.handles.get(&part)?;
		self.stored(handle).map(|p| p.part_type.clone())
	}

	fn release_part(&mut self, part: PartId) {
		if self.bound == Some(part) {
			tracing::error!(%part, "memory engine: handle released while bound");
			self.journal.push(EngineEvent::ReleasedWhileBound(part));
			self.bound = None;
		}
		if self.handles.remove(&part).is_some() {
			self.journal.push(EngineEvent::Released(part));
		}
	}

	fn bind_part(&mut self, part: Option<PartId>) -> Result<()> {
		let Some(part) = part else {
			self.bound = None;
			self.journal.push(EngineEvent::Bound(None));
			return Ok(());
		};

		self.bound = None;
		let refused = match self.handles.get(&part).copied() {
			None => Some(EngineError::UnknownPart(part)),
			Some(handle) => match self.stored(handle) {
				None => Some(EngineError::UnknownPart(part)),
				Some(stored) if matches!(stored.part_type, PartType::Unknown(_)) => {
					Some(EngineError::UnsupportedPartType(stored.part_type.to_string()))
				}
				Some(stored)
					if self.faults.refused_types.contains(&stored.part_type)
						|| self.faults.refused_keys.contains(&stored.key) =>
				{
					Some(EngineError::ActivationRefused(stored.part_type.to_string()))
				}
				Some(_) => None,
			},
		};

		if let Some(error) = refused {
			self.journal.push(EngineEvent::BindRefused(part));
			return Err(error);
		}
		self.bound = Some(part);
		self.journal.push(EngineEvent::Bound(Some(part)));
		Ok(())
	}

	fn bound_part(&self) -> Option<PartId> {
		self.bound
	}

	fn root_block(&self) -> Option<ContentBlock> {
		self.bound_stored().ok()?.root().map(Self::to_content_block)
	}

	fn hit_block(&self, point: Point) -> Option<ContentBlock> {
		let part = self.bound_stored().ok()?;
		let hits: Vec<&StoredBlock> = part
			.blocks
			.iter()
			.skip(1)
			.filter(|b| b.bounds.contains(point))
			.collect();
		hits.iter()
			.rev()
			.find(|b| !b.kind.is_container())
			.or_else(|| hits.last())
			.map(|b| Self::to_content_block(b))
	}

	fn is_empty(&self, block: &ContentBlock) -> bool {
		let Ok(part) = self.bound_stored() else {
			return true;
		};
		!part.subtree(&block.id).iter().any(|b| b.has_content())
	}

	fn supported_add_block_types(&self) -> Vec<BlockKind> {
		self.bound_stored()
			.map(|p| content::add_block_types(&p.part_type))
			.unwrap_or_default()
	}

	fn supported_add_block_data_mime_types(&self, kind: &BlockKind) -> Vec<MimeType> {
		content::add_block_data_types(kind)
	}

	fn supported_export_mime_types(&self, block: &ContentBlock) -> Vec<MimeType> {
		self.bound_block(block)
			.map(|(_, b)| content::export_types(&b.kind))
			.unwrap_or_default()
	}

	fn supported_import_mime_types(&self, block: &ContentBlock) -> Vec<MimeType> {
		self.bound_block(block)
			.map(|(_, b)| content::import_types(&b.kind))
			.unwrap_or_default()
	}

	fn supported_target_conversion_states(&self, block: Option<&ContentBlock>) -> Vec<ConversionState> {
		let kind = match block {
			Some(block) => self.bound_block(block).map(|(_, b)| b.kind.clone()),
			None => self.bound_stored().map(|p| p.part_type.root_kind()),
		};
		kind.map(|k| content::conversion_states(&k, &self.options.raw_content))
			.unwrap_or_default()
	}

	fn contains_block(&self, block: &ContentBlock) -> bool {
		self.bound_block(block)
			.is_ok_and(|(_, stored)| stored.kind == block.kind)
	}

	fn is_idle(&self) -> bool {
		self.recognition.is_idle()
	}

	async fn wait_for_idle(&mut self) {
		let mut idle = self.recognition.0.subscribe();
		// The sender lives in `self`, so the channel cannot close while waiting.
		let _ = idle.wait_for(|idle| *idle).await;
		self.flush_recognition();
	}

	fn export(&mut self, block: &ContentBlock, path: &Path, mime: MimeType) -> Result<()> {
		if !self.is_idle() {
			return Err(EngineError::Busy);
		}
		if !self.supported_export_mime_types(block).contains(&mime) {
			return Err(EngineError::UnsupportedMimeType(mime));
		}
		if self.faults.fail_exports {
			return Err(EngineError::Rejected("export failure injected".into()));
		}
		self.flush_recognition();

		let (part, _) = self.bound_block(block)?;
		let bytes = content::render(part, &part.subtree(&block.id), mime)?;
		std::fs::write(path, bytes).map_err(|error| EngineError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		self.journal.push(EngineEvent::Exported {
			path: path.to_path_buf(),
			mime,
		});
		Ok(())
	}

	fn import(&mut self, mime: MimeType, data: &str, block: &ContentBlock) -> Result<()> {
		if !self.supported_import_mime_types(block).contains(&mime) {
			return Err(EngineError::UnsupportedMimeType(mime));
		}
		if self.faults.fail_imports {
			return Err(EngineError::Rejected("import failure injected".into()));
		}
		let text = match mime {
			MimeType::Jiix => content::parse_jiix_label(data)?,
			_ => data.to_string(),
		};
		let part = self.bound_stored_mut()?;
		if part.block(&block.id).is_none() {
			return Err(EngineError::UnknownBlock(block.id.clone()));
		}
		part.checkpoint();
		if let Some(stored) = part.block_mut(&block.id) {
			stored.text = text;
		}
		self.journal.push(EngineEvent::Imported {
			block: block.id.clone(),
			mime,
		});
		Ok(())
	}

	fn convert(&mut self, block: Option<&ContentBlock>, target: ConversionState) -> Result<()> {
		if !self.supported_target_conversion_states(block).contains(&target) {
			return Err(EngineError::Rejected(format!("cannot convert to {target}")));
		}
		self.flush_recognition();
		let part = self.bound_stored_mut()?;
		part.checkpoint();
		let ids: Vec<BlockId> = match block {
			Some(block) => part.subtree(&block.id).iter().map(|b| b.id.clone()).collect(),
			None => part.blocks.iter().map(|b| b.id.clone()).collect(),
		};
		for id in ids {
			if let Some(b) = part.block_mut(&id)
				&& b.has_content()
			{
				b.converted = Some(target);
			}
		}
		Ok(())
	}

	fn add_block(&mut self, at: Point, kind: &BlockKind, data: Option<(MimeType, &str)>) -> Result<()> {
		if !self.supported_add_block_types().contains(kind) {
			return Err(EngineError::Rejected(format!("cannot add a {kind} block here")));
		}
		let text = match data {
			None => String::new(),
			Some((mime, data)) => {
				if !content::add_block_data_types(kind).contains(&mime) {
					return Err(EngineError::UnsupportedMimeType(mime));
				}
				match mime {
					MimeType::Jiix => content::parse_jiix_label(data)?,
					_ => data.to_string(),
				}
			}
		};
		self.insert_block(kind.clone(), Rect::new(at.x, at.y, 400.0, 100.0), &text, None)
			.map(|_| ())
	}

	fn remove_block(&mut self, block: &ContentBlock) -> Result<()> {
		let part = self.bound_stored_mut()?;
		if part.is_root(&block.id) {
			return Err(EngineError::InvalidBlock {
				block: block.id.clone(),
				reason: "the root block cannot be removed",
			});
		}
		let doomed: HashSet<BlockId> = part.subtree(&block.id).iter().map(|b| b.id.clone()).collect();
		if doomed.is_empty() {
			return Err(EngineError::UnknownBlock(block.id.clone()));
		}
		part.checkpoint();
		part.blocks.retain(|b| !doomed.contains(&b.id));
		Ok(())
	}

	fn copy(&mut self, block: &ContentBlock) -> Result<()> {
		let (_, stored) = self.bound_block(block)?;
		self.copy_buffer = Some(stored.clone());
		Ok(())
	}

	fn paste(&mut self, at: Point) -> Result<()> {
		let source = self.copy_buffer.clone().ok_or(EngineError::NothingToPaste)?;
		let kind = match source.kind {
			BlockKind::TextDocument | BlockKind::RawContent => BlockKind::Text,
			other => other,
		};
		let bounds = Rect::new(at.x, at.y, source.bounds.width.min(400.0), source.bounds.height.min(100.0));
		self.insert_block(kind, bounds, &source.text, None).map(|_| ())
	}

	fn can_undo(&self) -> bool {
		self.bound_stored().is_ok_and(|p| p.history.can_undo())
	}

	fn can_redo(&self) -> bool {
		self.bound_stored().is_ok_and(|p| p.history.can_redo())
	}

	fn undo(&mut self) -> Result<()> {
		if !self.bound_stored_mut()?.undo() {
			return Err(EngineError::NothingToUndo);
		}
		tracing::trace!("memory engine: undo");
		Ok(())
	}

	fn redo(&mut self) -> Result<()> {
		if !self.bound_stored_mut()?.redo() {
			return Err(EngineError::NothingToRedo);
		}
		tracing::trace!("memory engine: redo");
		Ok(())
	}
}
