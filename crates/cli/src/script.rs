//! Line grammar for session scripts.
//!
//! One command per line. Blank lines and lines starting with `#` are
//! skipped. Arguments are whitespace separated; the last argument of
//! `ink`, `import`, `save-as`, and `invoke` takes the rest of the line.

use std::path::PathBuf;

use anyhow::{Context, bail};
use quire_engine::{MimeType, PartType, Point};
use quire_session::SeqDirection;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
	/// Start a new package, optionally with a given part type.
	New(Option<PartType>),
	/// Add a part to the open package, or start one.
	Part(PartType),
	Navigate(SeqDirection),
	Open(PathBuf),
	Save,
	SaveAs(String),
	Close,
	Select(Point),
	Menu,
	/// Invoke the 1-based entry of the last printed menu.
	Invoke { entry: usize, input: Option<String> },
	Export { format: MimeType, name: String },
	Import { format: MimeType, data: String },
	Clipboard,
	ConvertAll,
	Undo,
	Redo,
	Ink(String),
	Settle,
	Title,
	Types,
	Help,
	Quit,
}

pub const HELP: &str = "\
commands:
  new [type]              start a package
  part <type>             add and activate a part
  next | prev             move to a neighbouring part
  open <path>             open a package
  save | save-as <name>   save the package
  close                   close without saving
  select <x> <y>          select the block at a point
  menu                    list actions for the selection
  invoke <n> [input]      run menu entry n
  export <format> <name>  export the selection
  import <format> <data>  import into the selection
  clipboard               copy the selection to the clipboard
  convert-all             convert the whole part
  undo | redo             revert or re-apply the last edit
  ink <text>              write a stroke that recognizes as text
  settle                  finish pending recognition
  title | types | help | quit";

/// Parses one script line; `None` for blank and comment lines.
pub fn parse(line: &str) -> anyhow::Result<Option<Command>> {
	let line = line.trim();
	if line.is_empty() || line.starts_with('#') {
		return Ok(None);
	}
	let (word, rest) = match line.split_once(char::is_whitespace) {
		Some((word, rest)) => (word, rest.trim()),
		None => (line, ""),
	};

	let command = match word {
		"new" => Command::New(optional(rest).map(part_type).transpose()?),
		"part" | "switch" => Command::Part(part_type(required(rest, "part type")?)?),
		"next" => Command::Navigate(SeqDirection::Next),
		"prev" => Command::Navigate(SeqDirection::Prev),
		"open" => Command::Open(PathBuf::from(required(rest, "package path")?)),
		"save" => Command::Save,
		"save-as" => Command::SaveAs(required(rest, "package name")?.to_string()),
		"close" => Command::Close,
		"select" => {
			let mut coords = rest.split_whitespace();
			let x = coordinate(coords.next())?;
			let y = coordinate(coords.next())?;
			Command::Select(Point::new(x, y))
		}
		"menu" => Command::Menu,
		"invoke" => {
			let (entry, input) = match rest.split_once(char::is_whitespace) {
				Some((entry, input)) => (entry, optional(input.trim())),
				None => (required(rest, "menu entry")?, None),
			};
			let entry = entry
				.parse::<usize>()
				.with_context(|| format!("invalid menu entry '{entry}'"))?;
			if entry == 0 {
				bail!("menu entries start at 1");
			}
			Command::Invoke {
				entry,
				input: input.map(str::to_string),
			}
		}
		"export" => {
			let (format, name) = format_and_rest(rest, "export file name")?;
			Command::Export { format, name }
		}
		"import" => {
			let (format, data) = format_and_rest(rest, "import data")?;
			Command::Import { format, data }
		}
		"clipboard" => Command::Clipboard,
		"convert-all" => Command::ConvertAll,
		"undo" => Command::Undo,
		"redo" => Command::Redo,
		"ink" => Command::Ink(required(rest, "ink text")?.to_string()),
		"settle" => Command::Settle,
		"title" => Command::Title,
		"types" => Command::Types,
		"help" | "?" => Command::Help,
		"quit" | "exit" => Command::Quit,
		other => bail!("unknown command '{other}'"),
	};
	Ok(Some(command))
}

/// Resolves a part type by name, ignoring case, spaces, and dashes.
pub fn part_type(name: &str) -> anyhow::Result<PartType> {
	let wanted = squash(name);
	PartType::KNOWN
		.into_iter()
		.find(|ty| squash(ty.as_str()) == wanted)
		.with_context(|| format!("unknown part type '{name}'"))
}

/// Resolves a format by MIME type name or by file extension.
pub fn mime_type(name: &str) -> anyhow::Result<MimeType> {
	if let Some(format) = MimeType::from_type_name(name) {
		return Ok(format);
	}
	let ext = format!(".{}", name.trim_start_matches('.').to_lowercase());
	MimeType::ALL
		.into_iter()
		.find(|m| m.file_extensions().contains(&ext.as_str()))
		.with_context(|| format!("unknown format '{name}'"))
}

fn squash(s: &str) -> String {
	s.chars()
		.filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
		.flat_map(char::to_lowercase)
		.collect()
}

fn optional(rest: &str) -> Option<&str> {
	(!rest.is_empty()).then_some(rest)
}

fn required<'a>(rest: &'a str, what: &str) -> anyhow::Result<&'a str> {
	optional(rest).with_context(|| format!("missing {what}"))
}

fn coordinate(arg: Option<&str>) -> anyhow::Result<f32> {
	let arg = arg.context("select needs x and y")?;
	arg.parse::<f32>()
		.with_context(|| format!("invalid coordinate '{arg}'"))
}

fn format_and_rest(rest: &str, what: &str) -> anyhow::Result<(MimeType, String)> {
	let (name, tail) = rest
		.split_once(char::is_whitespace)
		.with_context(|| format!("missing {what}"))?;
	Ok((mime_type(name)?, tail.trim().to_string()))
}
