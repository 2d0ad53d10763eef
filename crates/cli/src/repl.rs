//! Executes script commands against one session.

use std::io::Write;

use anyhow::Context;
use quire_engine::memory::MemoryEngine;
use quire_engine::{ContentBlock, InkHost};
use quire_session::{ActionMenu, CommandInput, MemoryClipboard, Session, SessionCommand};
use tracing::debug;

use crate::script::{self, Command, HELP};

pub type CliSession = Session<MemoryEngine, MemoryClipboard>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
	Continue,
	Quit,
}

pub struct Repl {
	session: CliSession,
	/// Last printed menu; `invoke` indexes into it.
	menu: Option<ActionMenu>,
}

impl Repl {
	pub fn new(session: CliSession) -> Self {
		Self { session, menu: None }
	}

	pub fn session(&self) -> &CliSession {
		&self.session
	}

	/// Parses and runs one line, reporting failures to `err`.
	///
	/// Returns whether the line succeeded along with the control flow.
	pub async fn run_line(&mut self, line: &str, out: &mut impl Write, err: &mut impl Write) -> (bool, Flow) {
		let result = match script::parse(line) {
			Ok(Some(command)) => self.execute(command, out).await,
			Ok(None) => Ok(Flow::Continue),
			Err(e) => Err(e),
		};
		match result {
			Ok(flow) => (true, flow),
			Err(e) => {
				let _ = writeln!(err, "error: {e:#}");
				(false, Flow::Continue)
			}
		}
	}

	pub async fn execute(&mut self, command: Command, out: &mut impl Write) -> anyhow::Result<Flow> {
		debug!(?command, "execute");
		match command {
			Command::New(part_type) => {
				self.session.create_package(part_type.as_ref())?;
				self.structural_done(out)?;
			}
			Command::Part(part_type) => {
				self.session.new_part(&part_type)?;
				self.structural_done(out)?;
			}
			Command::Navigate(direction) => {
				self.session.navigate(direction)?;
				self.structural_done(out)?;
			}
			Command::Open(path) => {
				self.session.open_package(&path)?;
				self.structural_done(out)?;
			}
			Command::Close => {
				self.session.close()?;
				self.menu = None;
				writeln!(out, "closed")?;
			}
			Command::Save => {
				self.session.save()?;
				writeln!(out, "saved")?;
			}
			Command::SaveAs(name) => {
				let path = self.session.save_as(&name)?;
				writeln!(out, "saved as {}", path.display())?;
			}
			Command::Select(point) => {
				self.menu = None;
				match self.session.select_at(point) {
					Some(selected) => writeln!(
						out,
						"selected {} ({}) [gen {}]",
						selected.block.id, selected.block.kind, selected.generation
					)?,
					None => writeln!(out, "nothing selected")?,
				}
			}
			Command::Menu => {
				let menu = self.session.menu()?;
				print_menu(&menu, out)?;
				self.menu = Some(menu);
			}
			Command::Invoke { entry, input } => self.invoke(entry, input, out).await?,
			Command::Export { format, name } => {
				let target = self.export_target()?;
				let dir = self.session.controller().packages_dir();
				let destination = quire_session::resolve_export_path(dir, &name, format);
				self.session.export(&target, format, &destination).await?;
				writeln!(out, "exported {}", destination.display())?;
			}
			Command::Import { format, data } => {
				let block = self.selected_block()?;
				self.session.import(&block, format, &data)?;
				writeln!(out, "imported {format}")?;
			}
			Command::Clipboard => {
				let target = self.export_target()?;
				self.session.copy_to_clipboard(&target).await?;
				let bytes = self.session.clipboard().content().map_or(0, |e| e.bytes.len());
				writeln!(out, "clipboard holds {bytes} bytes")?;
			}
			Command::ConvertAll => {
				self.session.convert_all()?;
				writeln!(out, "converted")?;
			}
			Command::Undo => {
				self.session.undo()?;
				self.menu = None;
				writeln!(out, "undone")?;
			}
			Command::Redo => {
				self.session.redo()?;
				self.menu = None;
				writeln!(out, "redone")?;
			}
			Command::Ink(text) => {
				self.session.host_mut().write_ink(text)?;
			}
			Command::Settle => self.session.host_mut().settle(),
			Command::Title => writeln!(out, "{}", self.session.title())?,
			Command::Types => {
				for part_type in self.session.host().supported_part_types() {
					writeln!(out, "{part_type}")?;
				}
			}
			Command::Help => writeln!(out, "{HELP}")?,
			Command::Quit => return Ok(Flow::Quit),
		}
		Ok(Flow::Continue)
	}

	async fn invoke(&mut self, entry: usize, input: Option<String>, out: &mut impl Write) -> anyhow::Result<()> {
		let menu = self.menu.as_ref().context("no menu; run 'menu' first")?;
		let picked = menu
			.entries
			.get(entry - 1)
			.with_context(|| format!("menu has {} entries", menu.entries.len()))?;
		let generation = menu.generation;
		let command = picked.command.clone();
		let input = command_input(&command, input)?;

		self.session.dispatch(generation, &command, input).await?;
		writeln!(out, "done: {command}")?;
		if matches!(command, SessionCommand::Remove) {
			self.menu = None;
		}
		Ok(())
	}

	fn structural_done(&mut self, out: &mut impl Write) -> anyhow::Result<()> {
		self.menu = None;
		writeln!(out, "{}", self.session.title())?;
		Ok(())
	}

	fn selected_block(&self) -> anyhow::Result<ContentBlock> {
		self.session
			.selection()
			.map(|s| s.block.clone())
			.context("nothing selected; run 'select' first")
	}

	fn export_target(&self) -> anyhow::Result<ContentBlock> {
		let block = self.selected_block()?;
		let part = self.session.active_part().context("no active part")?;
		Ok(self.session.resolve(part, &block)?.export_target)
	}
}

/// Builds dispatch input from the free text after `invoke <n>`.
fn command_input(command: &SessionCommand, input: Option<String>) -> anyhow::Result<CommandInput> {
	let Some(input) = input else {
		return Ok(CommandInput::default());
	};
	let input = match command {
		SessionCommand::AddBlock(_) => {
			let (format, data) = input
				.split_once(char::is_whitespace)
				.context("block data needs '<format> <data>'")?;
			CommandInput::block_data(script::mime_type(format)?, data.trim())
		}
		SessionCommand::Import(_) => CommandInput::data(input),
		SessionCommand::Export(_) => CommandInput::file_name(input),
		_ => CommandInput::default(),
	};
	Ok(input)
}

fn print_menu(menu: &ActionMenu, out: &mut impl Write) -> std::io::Result<()> {
	if menu.is_empty() {
		return writeln!(out, "no actions");
	}
	for (i, entry) in menu.entries.iter().enumerate() {
		let group = entry.group.map(|g| format!("{g} > ")).unwrap_or_default();
		let state = if entry.enabled { "" } else { " (disabled)" };
		writeln!(out, "{:>3}. {group}{}{state}", i + 1, entry.label)?;
	}
	Ok(())
}
