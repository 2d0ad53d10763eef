use std::path::PathBuf;

use pretty_assertions::assert_eq;
use quire_engine::{BlockId, ContentBlock, ConversionState, PartType, Rect};

use super::*;

fn snapshot() -> CapabilitySnapshot {
	let root = ContentBlock::new(BlockId::new("root"), BlockKind::TextDocument, Rect::default());
	CapabilitySnapshot {
		part_type: PartType::TextDocument,
		export_target: root.clone(),
		block: root,
		is_root: true,
		is_empty: true,
		is_container: false,
		add_block: vec![BlockKind::Text, BlockKind::Math],
		export: vec![MimeType::Docx, MimeType::Html],
		import: vec![],
		convert: vec![],
		clipboard: false,
		copy: false,
		paste: true,
		remove: false,
	}
}

fn labels(menu: &ActionMenu) -> Vec<(&str, Option<&str>, bool)> {
	menu.entries
		.iter()
		.map(|e| (e.label.as_str(), e.group, e.enabled))
		.collect()
}

#[test]
fn text_document_root_layout() {
	let menu = build_menu(&snapshot(), 7);
	assert_eq!(menu.generation, 7);
	assert_eq!(
		labels(&menu),
		vec![
			("Add Text", Some("Add..."), true),
			("Add Math", Some("Add..."), true),
			("Copy", Some("Copy/Paste..."), false),
			(CLIPBOARD_LABEL, Some("Copy/Paste..."), false),
			("Paste", Some("Copy/Paste..."), true),
			("Export application/vnd.openxmlformats-officedocument.wordprocessingml.document", Some("Import/Export..."), true),
			("Export text/html", Some("Import/Export..."), true),
		]
	);
}

#[test]
fn child_block_layout() {
	let block = ContentBlock::new(BlockId::new("b1"), BlockKind::Diagram, Rect::default());
	let caps = CapabilitySnapshot {
		block: block.clone(),
		export_target: block,
		is_root: false,
		is_empty: false,
		add_block: vec![],
		export: vec![MimeType::Svg, MimeType::OfficeClipboard],
		import: vec![MimeType::Jiix],
		convert: vec![ConversionState::DigitalEdit],
		clipboard: true,
		copy: true,
		paste: false,
		remove: true,
		..snapshot()
	};
	let menu = build_menu(&caps, 1);
	let commands: Vec<&SessionCommand> = menu.entries.iter().map(|e| &e.command).collect();
	assert_eq!(
		commands,
		vec![
			&SessionCommand::Remove,
			&SessionCommand::Convert,
			&SessionCommand::Copy,
			&SessionCommand::CopyToClipboard,
			&SessionCommand::Paste,
			&SessionCommand::Import(MimeType::Jiix),
			&SessionCommand::Export(MimeType::Svg),
			&SessionCommand::Export(MimeType::OfficeClipboard),
		]
	);
	assert_eq!(menu.enabled().count(), 7);
	assert_eq!(menu.find(&SessionCommand::Convert).unwrap().category(), MenuCategory::Convert);
}

#[test]
fn inert_snapshot_builds_empty_menu() {
	let block = ContentBlock::new(BlockId::new("c"), BlockKind::Container, Rect::default());
	let caps = CapabilitySnapshot::inert(PartType::TextDocument, block, true);
	assert!(build_menu(&caps, 0).is_empty());
}

#[test]
fn every_entry_is_permitted_by_its_snapshot_when_enabled() {
	let caps = snapshot();
	for entry in build_menu(&caps, 0).entries {
		assert_eq!(entry.command.permitted(&caps), entry.enabled, "{}", entry.label);
	}
}

#[test]
fn route_export_normalizes_destination() {
	let route = route(
		&SessionCommand::Export(MimeType::Html),
		CommandInput::file_name("page"),
		Point::default(),
		Path::new("/exports"),
	)
	.unwrap();
	assert_eq!(
		route,
		Route::Transfer(TransferRequest::Export {
			format: MimeType::Html,
			destination: PathBuf::from("/exports/page.html"),
		})
	);
}

#[test]
fn route_reports_missing_input() {
	let dir = Path::new("/exports");
	let at = Point::default();
	assert!(matches!(
		route(&SessionCommand::Export(MimeType::Svg), CommandInput::file_name("  "), at, dir),
		Err(SessionError::MissingInput(_))
	));
	assert!(matches!(
		route(&SessionCommand::Import(MimeType::Text), CommandInput::default(), at, dir),
		Err(SessionError::MissingInput(_))
	));
	assert!(matches!(
		route(&SessionCommand::AddBlock(BlockKind::Text), CommandInput::data("x"), at, dir),
		Err(SessionError::MissingInput(_))
	));
}

#[test]
fn route_edits_carry_selection_point() {
	let at = Point::new(3.0, 4.0);
	let dir = Path::new("/");
	assert_eq!(
		route(&SessionCommand::Paste, CommandInput::default(), at, dir).unwrap(),
		Route::Edit(EditAction::Paste { at })
	);
	assert_eq!(
		route(
			&SessionCommand::AddBlock(BlockKind::Text),
			CommandInput::block_data(MimeType::Text, "hi"),
			at,
			dir
		)
		.unwrap(),
		Route::Edit(EditAction::AddBlock {
			kind: BlockKind::Text,
			at,
			data: Some((MimeType::Text, "hi".into())),
		})
	);
	assert_eq!(
		route(&SessionCommand::CopyToClipboard, CommandInput::default(), at, dir).unwrap(),
		Route::Transfer(TransferRequest::Clipboard)
	);
}
