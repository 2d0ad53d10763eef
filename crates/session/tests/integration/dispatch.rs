use quire_engine::{BlockKind, InkHost, MimeType, PartType, Point, Rect};
use quire_session::{CLIPBOARD_LABEL, CommandInput, SessionCommand, SessionError};

use crate::common::session_with_parts;

const ORIGIN: Point = Point::new(10.0, 10.0);

#[test]
fn text_document_root_menu() {
	let (_dir, mut session) = session_with_parts(&[PartType::TextDocument]);
	let selected = session.select_at(ORIGIN).unwrap();
	assert_eq!(Some(&selected.block), session.host().root_block().as_ref());

	let menu = session.menu().unwrap();
	assert_eq!(menu.generation, selected.generation);

	let added: Vec<&str> = menu
		.entries
		.iter()
		.filter(|e| e.group == Some("Add..."))
		.map(|e| e.label.as_str())
		.collect();
	assert_eq!(added, ["Add Text", "Add Math", "Add Diagram", "Add Drawing"]);
	assert!(menu.find(&SessionCommand::Remove).is_none());

	assert!(!menu.find(&SessionCommand::Copy).unwrap().enabled);
	assert!(menu.find(&SessionCommand::Paste).unwrap().enabled);
	let clipboard = menu.find(&SessionCommand::CopyToClipboard).unwrap();
	assert_eq!(clipboard.label, CLIPBOARD_LABEL);
	assert!(!clipboard.enabled);
}

#[test]
fn menu_needs_a_selection() {
	let (_dir, session) = session_with_parts(&[PartType::Text]);
	assert!(matches!(session.menu(), Err(SessionError::MissingInput("selection"))));
}

#[tokio::test]
async fn add_block_with_initial_data() {
	let (_dir, mut session) = session_with_parts(&[PartType::TextDocument]);
	let generation = session.select_at(ORIGIN).unwrap().generation;

	session
		.dispatch(
			generation,
			&SessionCommand::AddBlock(BlockKind::Text),
			CommandInput::block_data(MimeType::Text, "hello"),
		)
		.await
		.unwrap();
	assert_eq!(session.host().block_count(), 2);

	let selected = session.select_at(Point::new(20.0, 20.0)).unwrap();
	assert_eq!(selected.block.kind, BlockKind::Text);
	assert_eq!(session.host().block_text(&selected.block.id).as_deref(), Some("hello"));

	let menu = session.menu().unwrap();
	assert!(menu.find(&SessionCommand::Remove).is_some_and(|e| e.enabled));
	assert!(menu.find(&SessionCommand::Convert).is_some());
	assert!(menu.find(&SessionCommand::Copy).unwrap().enabled);
	assert!(!menu.find(&SessionCommand::Paste).unwrap().enabled);
}

#[tokio::test]
async fn stale_generation_is_refused() {
	let (_dir, mut session) = session_with_parts(&[PartType::TextDocument]);
	let stale = session.select_at(ORIGIN).unwrap().generation;
	let fresh = session.select_at(ORIGIN).unwrap().generation;
	assert!(fresh > stale);

	let err = session
		.dispatch(stale, &SessionCommand::AddBlock(BlockKind::Math), CommandInput::default())
		.await
		.unwrap_err();
	assert!(matches!(err, SessionError::StaleSelection));
	assert_eq!(session.host().block_count(), 1);
}

#[tokio::test]
async fn disabled_command_is_refused() {
	let (_dir, mut session) = session_with_parts(&[PartType::TextDocument]);
	let generation = session.select_at(ORIGIN).unwrap().generation;

	let err = session
		.dispatch(generation, &SessionCommand::Copy, CommandInput::default())
		.await
		.unwrap_err();
	assert!(matches!(err, SessionError::ActionUnavailable(ref label) if label == "Copy"));
}

#[tokio::test]
async fn capabilities_are_resolved_again_at_dispatch() {
	let (_dir, mut session) = session_with_parts(&[PartType::Math]);
	let generation = session.select_at(ORIGIN).unwrap().generation;
	assert!(session.menu().unwrap().find(&SessionCommand::Convert).is_none());

	session.host_mut().write_ink("x").unwrap();
	session.host_mut().settle();
	session
		.dispatch(generation, &SessionCommand::Convert, CommandInput::default())
		.await
		.unwrap();
}

#[tokio::test]
async fn export_entry_writes_normalized_name() {
	let (dir, mut session) = session_with_parts(&[PartType::TextDocument]);
	let generation = session.select_at(ORIGIN).unwrap().generation;
	let command = SessionCommand::Export(MimeType::Docx);
	assert!(session.menu().unwrap().find(&command).is_some_and(|e| e.enabled));

	session
		.dispatch(generation, &command, CommandInput::file_name(" report "))
		.await
		.unwrap();
	assert!(dir.path().join("report.docx").is_file());
}

#[tokio::test]
async fn export_without_file_name_is_missing_input() {
	let (_dir, mut session) = session_with_parts(&[PartType::Text]);
	let generation = session.select_at(ORIGIN).unwrap().generation;
	let err = session
		.dispatch(generation, &SessionCommand::Export(MimeType::Text), CommandInput::file_name("  "))
		.await
		.unwrap_err();
	assert!(matches!(err, SessionError::MissingInput("export file name")));
}

#[tokio::test]
async fn remove_clears_the_selection() {
	let (_dir, mut session) = session_with_parts(&[PartType::TextDocument]);
	let block = session
		.host_mut()
		.insert_block(BlockKind::Drawing, Rect::new(0.0, 0.0, 50.0, 50.0), "", None)
		.unwrap();
	let selected = session.select_at(ORIGIN).unwrap();
	assert_eq!(selected.block, block);

	session
		.dispatch(selected.generation, &SessionCommand::Remove, CommandInput::default())
		.await
		.unwrap();
	assert!(session.selection().is_none());
	assert_eq!(session.host().block_count(), 1);
}

#[tokio::test]
async fn raw_content_exports_the_whole_canvas() {
	let (dir, mut session) = session_with_parts(&[PartType::RawContent]);
	session
		.host_mut()
		.insert_block(BlockKind::Text, Rect::new(0.0, 0.0, 50.0, 50.0), "inner", None)
		.unwrap();
	let selected = session.select_at(ORIGIN).unwrap();
	assert_eq!(selected.block.kind, BlockKind::Text);

	let menu = session.menu().unwrap();
	assert!(menu.find(&SessionCommand::CopyToClipboard).unwrap().enabled);
	session
		.dispatch(
			selected.generation,
			&SessionCommand::Export(MimeType::Svg),
			CommandInput::file_name("canvas"),
		)
		.await
		.unwrap();
	let svg = std::fs::read_to_string(dir.path().join("canvas.svg")).unwrap();
	assert!(svg.contains("inner"));
}

#[tokio::test]
async fn import_targets_the_selected_block() {
	let (_dir, mut session) = session_with_parts(&[PartType::TextDocument]);
	let block = session
		.host_mut()
		.insert_block(BlockKind::Math, Rect::new(0.0, 0.0, 50.0, 50.0), "", None)
		.unwrap();
	let generation = session.select_at(ORIGIN).unwrap().generation;

	session
		.dispatch(generation, &SessionCommand::Import(MimeType::Latex), CommandInput::data("a+b"))
		.await
		.unwrap();
	assert_eq!(session.host().block_text(&block.id).as_deref(), Some("a+b"));

	let err = session
		.dispatch(generation, &SessionCommand::Import(MimeType::Latex), CommandInput::data(" "))
		.await
		.unwrap_err();
	assert!(matches!(err, SessionError::BlankData));
}
