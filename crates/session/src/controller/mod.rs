//! Ownership of the current package and its single active part.
//!
//! # Purpose
//!
//! - Own the (package, active part) pair and every operation that changes it:
//!   new package, open, switch, navigate, close.
//! - Make each structural operation atomic from the caller's point of view:
//!   it either commits a new active part or restores the last known-good one.
//! - Carry the content edits that act on the active part (add, remove,
//!   convert, copy, paste, undo, redo) and package persistence (save,
//!   save-as).
//!
//! # Invariants
//!
//! - At most one part is active, and it belongs to the current package.
//! - A part handle is released only after another part (or nothing) has
//!   replaced it on the surface. It is never released while bound.
//! - A failed switch or navigation leaves the previous part active, unless the
//!   engine also refuses to rebind it; then the session is closed rather than
//!   left half-bound.
//! - The package of the active part is closed only after the part has been
//!   unbound and released.
//!
//! # Failure modes
//!
//! | Operation | Failure | Session afterwards |
//! |---|---|---|
//! | `create_new` | engine rejects package/part/bind | empty; previous package already closed |
//! | `switch_part` | new part fails to bind | previous part active |
//! | `navigate` | every candidate fails | previous part active |
//! | `open_package` | open or first part fails | empty; previous package already closed |
//! | `save`, `save_as` | engine write fails | unchanged |

mod navigation;

use std::path::{Path, PathBuf};

use quire_engine::{
	BlockKind, ContentBlock, ConversionState, EngineError, InkHost, MimeType, PackageId, PartId, PartType,
	Point,
};
use tracing::{debug, error, info, warn};

use self::navigation::{NavigationScan, ScanOutcome};
use crate::config::SessionConfig;
use crate::error::{Result, SessionError};
use crate::parts::{PartSequence, SeqDirection};
use crate::untitled::UntitledNamer;

/// Owner of the current package and its active part.
#[derive(Debug)]
pub struct SessionController {
	package: Option<PackageId>,
	active: Option<PartId>,
	namer: UntitledNamer,
	packages_dir: PathBuf,
	extension: String,
	save_on_close: bool,
}

impl SessionController {
	pub fn new(config: &SessionConfig) -> Self {
		Self {
			package: None,
			active: None,
			namer: UntitledNamer::new(&config.untitled_prefix, &config.package_extension),
			packages_dir: config.packages_root(),
			extension: config.package_extension.clone(),
			save_on_close: config.save_on_close,
		}
	}

	pub fn active_part(&self) -> Option<PartId> {
		self.active
	}

	pub fn current_package(&self) -> Option<PackageId> {
		self.package
	}

	pub fn packages_dir(&self) -> &Path {
		&self.packages_dir
	}

	/// Parts of the current package.
	pub fn parts<'a, H: InkHost + ?Sized>(&self, host: &'a H) -> Option<PartSequence<'a, H>> {
		self.package.map(|package| PartSequence::new(host, package))
	}

	fn require_active(&self) -> Result<(PackageId, PartId)> {
		match (self.package, self.active) {
			(Some(package), Some(part)) => Ok((package, part)),
			_ => Err(SessionError::NoActivePart),
		}
	}

	/// Replaces the current package with a new untitled one holding a single
	/// part of `part_type`.
	pub fn create_new<H: InkHost + ?Sized>(&mut self, host: &mut H, part_type: &PartType) -> Result<PartId> {
		self.save_and_close(host);

		let path = self.namer.next_path(&self.packages_dir, &host.temp_folder());
		let package = host.create_package(&path).map_err(|source| SessionError::Creation {
			what: "package",
			source,
		})?;

		let part = match host.create_part(package, part_type) {
			Ok(part) => part,
			Err(source) => {
				host.close_package(package);
				warn!(path = %path.display(), %part_type, error = %source, "new package: part type rejected");
				return Err(SessionError::Creation { what: "part", source });
			}
		};
		if let Err(source) = host.bind_part(Some(part)) {
			host.release_part(part);
			host.close_package(package);
			warn!(path = %path.display(), %part_type, error = %source, "new package: part failed to activate");
			return Err(SessionError::Activation(source));
		}

		self.package = Some(package);
		self.active = Some(part);
		info!(path = %path.display(), %part_type, %part, "new package");
		Ok(part)
	}

	/// Appends a part of `part_type` to the current package and activates it.
	///
	/// On activation failure the previous part is rebound and
	/// [`SessionError::Activation`] is returned. The created part stays in the
	/// package; only its handle is released.
	pub fn switch_part<H: InkHost + ?Sized>(&mut self, host: &mut H, part_type: &PartType) -> Result<PartId> {
		let (package, previous) = self.require_active()?;

		let part = host
			.create_part(package, part_type)
			.map_err(|source| SessionError::Creation { what: "part", source })?;

		match host.bind_part(Some(part)) {
			Ok(()) => {
				host.release_part(previous);
				self.active = Some(part);
				info!(%previous, %part, %part_type, "switched part");
				Ok(part)
			}
			Err(source) => {
				host.release_part(part);
				self.rebind(host, previous)?;
				warn!(%previous, %part_type, error = %source, "switch rolled back");
				Err(SessionError::Activation(source))
			}
		}
	}

	/// Activates the nearest part in `direction` that binds successfully.
	///
	/// At a sequence bound this is a no-op returning the current part.
	pub fn navigate<H: InkHost + ?Sized>(&mut self, host: &mut H, direction: SeqDirection) -> Result<PartId> {
		let (package, origin) = self.require_active()?;

		let seq = PartSequence::new(&*host, package);
		let index = seq.index_of(origin).ok_or(SessionError::NoActivePart)?;
		if seq.at_bound(index, direction) {
			debug!(%origin, index, ?direction, "navigate: at bound");
			return Ok(origin);
		}
		let candidates = seq.candidates(index, direction);

		match NavigationScan::new(origin, direction, candidates).run(host, package) {
			ScanOutcome::Committed { part, index: target } => {
				host.release_part(origin);
				self.active = Some(part);
				info!(from = index, to = target, %part, "navigated");
				Ok(part)
			}
			ScanOutcome::RolledBack { skipped, last_error } => {
				self.rebind(host, origin)?;
				warn!(
					%origin,
					?direction,
					skipped,
					last_error = ?last_error.as_ref().map(ToString::to_string),
					"navigate rolled back"
				);
				Err(SessionError::NoNavigableTarget { direction, origin })
			}
		}
	}

	/// Rebinds the last known-good part after a failed structural change.
	///
	/// If the engine refuses, the session is closed and the refusal returned.
	fn rebind<H: InkHost + ?Sized>(&mut self, host: &mut H, previous: PartId) -> Result<()> {
		if let Err(source) = host.bind_part(Some(previous)) {
			error!(%previous, error = %source, "rollback failed; closing session");
			self.close(host);
			return Err(SessionError::Activation(source));
		}
		Ok(())
	}

	/// Replaces the current package with the package at `path` and activates
	/// its first part.
	///
	/// The previous package is closed before opening begins and is not
	/// restored on failure; the session is left empty.
	pub fn open_package<H: InkHost + ?Sized>(&mut self, host: &mut H, path: &Path) -> Result<PartId> {
		self.save_and_close(host);

		let open_error = |source: EngineError| SessionError::Open {
			path: path.to_path_buf(),
			source,
		};
		let package = host.open_package(path).map_err(open_error)?;
		let part = match host.get_part(package, 0) {
			Ok(part) => part,
			Err(source) => {
				host.close_package(package);
				return Err(open_error(source));
			}
		};
		if let Err(source) = host.bind_part(Some(part)) {
			host.release_part(part);
			host.close_package(package);
			return Err(open_error(source));
		}

		self.package = Some(package);
		self.active = Some(part);
		info!(path = %path.display(), parts = host.part_count(package), %part, "opened package");
		Ok(part)
	}

	/// Unbinds and releases the active part, then closes the package.
	///
	/// Idempotent. Unsaved changes are discarded.
	pub fn close<H: InkHost + ?Sized>(&mut self, host: &mut H) {
		let Some(package) = self.package.take() else {
			return;
		};
		if let Some(part) = self.active.take() {
			if let Err(error) = host.bind_part(None) {
				warn!(%part, %error, "close: unbind reported an error");
			}
			host.release_part(part);
		}
		host.close_package(package);
		info!(%package, "closed package");
	}

	/// Saves (best-effort, when configured) then closes.
	pub fn save_and_close<H: InkHost + ?Sized>(&mut self, host: &mut H) {
		if self.save_on_close
			&& let Some(package) = self.package
			&& let Err(error) = host.save_package(package)
		{
			warn!(%package, %error, "save before close failed; continuing");
		}
		self.close(host);
	}

	pub fn save<H: InkHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
		let package = self.package.ok_or(SessionError::NoActivePart)?;
		host.save_package(package).map_err(SessionError::Save)?;
		debug!(%package, "saved package");
		Ok(())
	}

	/// Saves under `name`, appending the package extension when missing.
	///
	/// Relative names resolve inside the packages directory.
	pub fn save_as<H: InkHost + ?Sized>(&mut self, host: &mut H, name: &str) -> Result<PathBuf> {
		let package = self.package.ok_or(SessionError::NoActivePart)?;
		let name = name.trim();
		if name.is_empty() {
			return Err(SessionError::MissingInput("file name"));
		}
		let file_name = if name.to_lowercase().ends_with(&self.extension.to_lowercase()) {
			name.to_string()
		} else {
			format!("{name}{}", self.extension)
		};
		let path = self.packages_dir.join(file_name);
		host.save_package_as(package, &path).map_err(SessionError::Save)?;
		info!(%package, path = %path.display(), "saved package as");
		Ok(path)
	}

	/// `"<package file name> - <part type>"`, or empty with no active part.
	pub fn title<H: InkHost + ?Sized>(&self, host: &H) -> String {
		let Ok((package, part)) = self.require_active() else {
			return String::new();
		};
		let name = host
			.package_path(package)
			.and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
			.unwrap_or_default();
		let part_type = host.part_type(part).map(|t| t.to_string()).unwrap_or_default();
		format!("{name} - {part_type}")
	}

	/// Adds a block of `kind` at `at`.
	///
	/// Kinds that accept initial data require `(format, data)` with a listed
	/// format and non-blank data.
	pub fn add_block<H: InkHost + ?Sized>(
		&mut self,
		host: &mut H,
		at: Point,
		kind: &BlockKind,
		data: Option<(MimeType, &str)>,
	) -> Result<()> {
		self.require_active()?;
		if !host.supported_add_block_types().contains(kind) {
			return Err(SessionError::ActionUnavailable(format!("add {kind}")));
		}
		let formats = host.supported_add_block_data_mime_types(kind);
		let data = match (formats.is_empty(), data) {
			(true, None) => None,
			(true, Some((mime, _))) => return Err(SessionError::UnsupportedFormat(mime)),
			(false, None) => return Err(SessionError::MissingInput("block data")),
			(false, Some((mime, _))) if !formats.contains(&mime) => {
				return Err(SessionError::UnsupportedFormat(mime));
			}
			(false, Some((_, text))) if text.trim().is_empty() => return Err(SessionError::BlankData),
			(false, Some(data)) => Some(data),
		};
		host.add_block(at, kind, data).map_err(SessionError::Edit)?;
		debug!(%kind, x = at.x, y = at.y, "added block");
		Ok(())
	}

	pub fn remove<H: InkHost + ?Sized>(&mut self, host: &mut H, block: &ContentBlock) -> Result<()> {
		self.require_active()?;
		let is_root = host.root_block().is_some_and(|root| root.same_block(block));
		if is_root || block.is_container() {
			return Err(SessionError::ActionUnavailable(format!("remove {}", block.kind)));
		}
		host.remove_block(block).map_err(SessionError::Edit)?;
		debug!(block = %block.id, "removed block");
		Ok(())
	}

	/// Converts `block` to the first target state the engine offers.
	pub fn convert<H: InkHost + ?Sized>(&mut self, host: &mut H, block: &ContentBlock) -> Result<ConversionState> {
		self.require_active()?;
		self.convert_to_first(host, Some(block))
	}

	/// Converts the whole active part to the first target state the engine
	/// offers.
	pub fn convert_all<H: InkHost + ?Sized>(&mut self, host: &mut H) -> Result<ConversionState> {
		self.require_active()?;
		self.convert_to_first(host, None)
	}

	fn convert_to_first<H: InkHost + ?Sized>(
		&mut self,
		host: &mut H,
		block: Option<&ContentBlock>,
	) -> Result<ConversionState> {
		let target = host
			.supported_target_conversion_states(block)
			.first()
			.copied()
			.ok_or_else(|| SessionError::ActionUnavailable("convert".into()))?;
		host.convert(block, target).map_err(SessionError::Edit)?;
		debug!(block = ?block.map(|b| b.id.to_string()), %target, "converted");
		Ok(target)
	}

	pub fn copy<H: InkHost + ?Sized>(&mut self, host: &mut H, block: &ContentBlock) -> Result<()> {
		self.require_active()?;
		host.copy(block).map_err(SessionError::Edit)
	}

	pub fn paste<H: InkHost + ?Sized>(&mut self, host: &mut H, at: Point) -> Result<()> {
		self.require_active()?;
		host.paste(at).map_err(SessionError::Edit)
	}

	/// Reverts the active part's last edit.
	pub fn undo<H: InkHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
		let (_, part) = self.require_active()?;
		if !host.can_undo() {
			return Err(SessionError::ActionUnavailable("undo".into()));
		}
		host.undo().map_err(SessionError::Edit)?;
		debug!(%part, "undo");
		Ok(())
	}

	pub fn redo<H: InkHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
		let (_, part) = self.require_active()?;
		if !host.can_redo() {
			return Err(SessionError::ActionUnavailable("redo".into()));
		}
		host.redo().map_err(SessionError::Edit)?;
		debug!(%part, "redo");
		Ok(())
	}
}
