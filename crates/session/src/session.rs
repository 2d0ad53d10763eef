use std::path::{Path, PathBuf};

use quire_engine::{ContentBlock, InkHost, MimeType, PartId, PartType, Point};
use tracing::debug;

use crate::capability::{self, CapabilitySnapshot};
use crate::clipboard::ClipboardSink;
use crate::config::SessionConfig;
use crate::controller::SessionController;
use crate::dispatch::{self, ActionMenu, CommandInput, EditAction, Route, SessionCommand};
use crate::error::{Result, SessionError};
use crate::gate::StructuralGate;
use crate::parts::SeqDirection;
use crate::selection::{Selected, SelectionContext};
use crate::transfer::{TransferDirection, TransferNegotiator};

/// An editing session over one engine.
///
/// Owns the engine host, the controller, the selection, and the transfer
/// negotiator, and exposes the operations the UI layer calls. Structural
/// operations hold the [`StructuralGate`] and clear the selection.
pub struct Session<H, C> {
	host: H,
	controller: SessionController,
	selection: SelectionContext,
	negotiator: TransferNegotiator<C>,
	gate: StructuralGate,
	config: SessionConfig,
}

impl<H: InkHost, C: ClipboardSink> Session<H, C> {
	/// Configures `host` from `config` and starts an empty session.
	pub fn new(mut host: H, clipboard: C, config: SessionConfig) -> Result<Self> {
		host.configure(&config.engine_options())
			.map_err(|source| SessionError::Creation {
				what: "engine configuration",
				source,
			})?;
		Ok(Self {
			controller: SessionController::new(&config),
			host,
			selection: SelectionContext::new(),
			negotiator: TransferNegotiator::new(clipboard),
			gate: StructuralGate::new(),
			config,
		})
	}

	pub fn host(&self) -> &H {
		&self.host
	}

	pub fn host_mut(&mut self) -> &mut H {
		&mut self.host
	}

	pub fn config(&self) -> &SessionConfig {
		&self.config
	}

	pub fn controller(&self) -> &SessionController {
		&self.controller
	}

	pub fn clipboard(&self) -> &C {
		self.negotiator.clipboard()
	}

	/// Handle UI glue can use to observe or wait on structural operations.
	pub fn gate(&self) -> StructuralGate {
		self.gate.clone()
	}

	pub fn active_part(&self) -> Option<PartId> {
		self.controller.active_part()
	}

	pub fn title(&self) -> String {
		self.controller.title(&self.host)
	}

	pub fn selection(&self) -> Option<&Selected> {
		self.selection.current()
	}

	/// Starts a new package with one part of `part_type`, or of the
	/// configured default type.
	pub fn create_package(&mut self, part_type: Option<&PartType>) -> Result<PartId> {
		let _guard = self.gate.try_enter()?;
		self.selection.clear();
		let part_type = part_type.unwrap_or(&self.config.default_part_type);
		self.controller.create_new(&mut self.host, part_type)
	}

	/// Adds a part of `part_type`, starting a new package when none is open.
	pub fn new_part(&mut self, part_type: &PartType) -> Result<PartId> {
		if self.controller.active_part().is_none() {
			return self.create_package(Some(part_type));
		}
		self.switch_part(part_type)
	}

	pub fn switch_part(&mut self, part_type: &PartType) -> Result<PartId> {
		let _guard = self.gate.try_enter()?;
		self.selection.clear();
		self.controller.switch_part(&mut self.host, part_type)
	}

	pub fn navigate(&mut self, direction: SeqDirection) -> Result<PartId> {
		let _guard = self.gate.try_enter()?;
		self.selection.clear();
		self.controller.navigate(&mut self.host, direction)
	}

	/// Opens `path`; relative paths resolve inside the packages directory.
	pub fn open_package(&mut self, path: &Path) -> Result<PartId> {
		let _guard = self.gate.try_enter()?;
		self.selection.clear();
		let path = self.package_path(path);
		self.controller.open_package(&mut self.host, &path)
	}

	pub fn close(&mut self) -> Result<()> {
		let _guard = self.gate.try_enter()?;
		self.selection.clear();
		self.controller.close(&mut self.host);
		Ok(())
	}

	pub fn save(&mut self) -> Result<()> {
		self.controller.save(&mut self.host)
	}

	pub fn save_as(&mut self, name: &str) -> Result<PathBuf> {
		self.controller.save_as(&mut self.host, name)
	}

	fn package_path(&self, path: &Path) -> PathBuf {
		if path.is_absolute() {
			path.to_path_buf()
		} else {
			self.controller.packages_dir().join(path)
		}
	}

	/// Hit-tests `point` and makes the result the current selection.
	pub fn select_at(&mut self, point: Point) -> Option<Selected> {
		if self.controller.active_part().is_none() {
			self.selection.clear();
			return None;
		}
		self.selection.select_at(&self.host, point).cloned()
	}

	/// Makes `block` the current selection.
	///
	/// Returns `None` and clears the selection when no part is active or the
	/// block is not in the active part.
	pub fn select_block(&mut self, block: ContentBlock, point: Point) -> Option<Selected> {
		if self.controller.active_part().is_none() || !self.host.contains_block(&block) {
			self.selection.clear();
			return None;
		}
		Some(self.selection.select_block(block, point).clone())
	}

	/// Legal actions for `block` in `part`.
	pub fn resolve(&self, part: PartId, block: &ContentBlock) -> Result<CapabilitySnapshot> {
		capability::resolve(&self.host, part, block)
	}

	/// Action menu for the current selection, freshly resolved.
	pub fn menu(&self) -> Result<ActionMenu> {
		let selected = self
			.selection
			.current()
			.ok_or(SessionError::MissingInput("selection"))?;
		let part = self.controller.active_part().ok_or(SessionError::NoActivePart)?;
		let snapshot = capability::resolve(&self.host, part, &selected.block)?;
		Ok(dispatch::build_menu(&snapshot, selected.generation))
	}

	/// Runs `command` on the selection taken at `generation`.
	///
	/// Capabilities are resolved again at dispatch time, so a command that
	/// became illegal since the menu was built is refused.
	pub async fn dispatch(&mut self, generation: u64, command: &SessionCommand, input: CommandInput) -> Result<()> {
		let selected = self.selection.checked(generation)?.clone();
		let part = self.controller.active_part().ok_or(SessionError::NoActivePart)?;
		let snapshot = capability::resolve(&self.host, part, &selected.block)?;
		if !command.permitted(&snapshot) {
			return Err(SessionError::ActionUnavailable(command.to_string()));
		}
		debug!(%command, block = %selected.block.id, generation, "dispatch");

		let export_dir = self.controller.packages_dir().to_path_buf();
		match dispatch::route(command, input, selected.point, &export_dir)? {
			Route::Edit(action) => self.edit(action, &selected.block),
			Route::Transfer(request) => {
				let target = match request.direction() {
					TransferDirection::Import => &selected.block,
					_ => &snapshot.export_target,
				};
				self.negotiator.execute(&mut self.host, target, &request).await
			}
		}
	}

	fn edit(&mut self, action: EditAction, block: &ContentBlock) -> Result<()> {
		let host = &mut self.host;
		match action {
			EditAction::AddBlock { kind, at, data } => {
				let data = data.as_ref().map(|(format, data)| (*format, data.as_str()));
				self.controller.add_block(host, at, &kind, data)
			}
			EditAction::Remove => {
				self.controller.remove(host, block)?;
				self.selection.clear();
				Ok(())
			}
			EditAction::Convert => self.controller.convert(host, block).map(|_| ()),
			EditAction::Copy => self.controller.copy(host, block),
			EditAction::Paste { at } => self.controller.paste(host, at),
		}
	}

	/// Returns true when the active part has an edit to undo.
	pub fn can_undo(&self) -> bool {
		self.controller.active_part().is_some() && self.host.can_undo()
	}

	pub fn can_redo(&self) -> bool {
		self.controller.active_part().is_some() && self.host.can_redo()
	}

	/// Reverts the active part's last edit.
	///
	/// Clears the selection, since the selected block may no longer exist.
	pub fn undo(&mut self) -> Result<()> {
		self.selection.clear();
		self.controller.undo(&mut self.host)
	}

	pub fn redo(&mut self) -> Result<()> {
		self.selection.clear();
		self.controller.redo(&mut self.host)
	}

	/// Converts the whole active part.
	pub fn convert_all(&mut self) -> Result<()> {
		self.controller.convert_all(&mut self.host).map(|_| ())
	}

	pub async fn export(&mut self, block: &ContentBlock, format: MimeType, destination: &Path) -> Result<()> {
		self.negotiator.export(&mut self.host, block, format, destination).await
	}

	pub fn import(&mut self, block: &ContentBlock, format: MimeType, data: &str) -> Result<()> {
		self.negotiator.import(&mut self.host, block, format, data)
	}

	pub async fn copy_to_clipboard(&mut self, block: &ContentBlock) -> Result<()> {
		self.negotiator.export_to_clipboard(&mut self.host, block).await
	}
}
