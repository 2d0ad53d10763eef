use proptest::prelude::*;
use quire_engine::{BlockKind, ConversionState, InkHost, PartType, Point, Rect};
use quire_session::SessionError;
use rstest::rstest;

use crate::common::{active, session, session_with_parts};

#[rstest]
#[case::text_document(PartType::TextDocument, false)]
#[case::raw_content(PartType::RawContent, true)]
#[case::diagram(PartType::Diagram, true)]
#[case::math(PartType::Math, true)]
#[case::drawing(PartType::Drawing, true)]
#[case::text(PartType::Text, true)]
fn root_copy_rule(#[case] part_type: PartType, #[case] copyable: bool) {
	let (_dir, session) = session_with_parts(&[part_type]);
	let root = session.host().root_block().unwrap();
	let caps = session.resolve(active(&session), &root).unwrap();
	assert!(caps.is_root);
	assert_eq!(caps.copy, copyable);
	assert!(caps.paste);
}

#[rstest]
#[case::text(BlockKind::Text)]
#[case::math(BlockKind::Math)]
#[case::diagram(BlockKind::Diagram)]
fn child_blocks_of_text_document_are_copyable(#[case] kind: BlockKind) {
	let (_dir, mut session) = session_with_parts(&[PartType::TextDocument]);
	let block = session
		.host_mut()
		.insert_block(kind, Rect::new(0.0, 0.0, 100.0, 100.0), "x", None)
		.unwrap();
	let caps = session.resolve(active(&session), &block).unwrap();
	assert!(caps.copy);
	assert!(!caps.paste);
	assert!(caps.remove);
}

#[test]
fn raw_content_convert_appears_after_first_stroke() {
	let (_dir, mut session) = session();
	session.create_package(Some(&PartType::RawContent)).unwrap();
	let part = active(&session);
	let root = session.host().root_block().unwrap();

	let caps = session.resolve(part, &root).unwrap();
	assert!(caps.is_empty);
	assert!(caps.convert.is_empty());

	session.host_mut().write_ink("circle").unwrap();
	let caps = session.resolve(part, &root).unwrap();
	assert!(!caps.is_empty);
	assert_eq!(caps.convert, vec![ConversionState::DigitalEdit]);
}

#[test]
fn snapshot_reflects_mutations_between_calls() {
	let (_dir, mut session) = session_with_parts(&[PartType::TextDocument]);
	let part = active(&session);
	let root = session.host().root_block().unwrap();
	let before = session.resolve(part, &root).unwrap();

	session.host_mut().write_ink("word").unwrap();
	let after = session.resolve(part, &root).unwrap();
	assert_ne!(before, after);
	assert!(before.convert.is_empty());
	assert!(!after.convert.is_empty());
}

#[test]
fn undo_and_redo_change_what_resolves() {
	let (_dir, mut session) = session_with_parts(&[PartType::TextDocument]);
	let part = active(&session);
	session.host_mut().write_ink("word").unwrap();
	session.host_mut().settle();
	let selected = session.select_at(Point::new(5.0, 5.0)).unwrap();
	assert!(!session.resolve(part, &selected.block).unwrap().convert.is_empty());

	assert!(session.can_undo());
	session.undo().unwrap();
	assert!(session.selection().is_none());
	let selected = session.select_at(Point::new(5.0, 5.0)).unwrap();
	let caps = session.resolve(part, &selected.block).unwrap();
	assert!(caps.is_empty);
	assert!(caps.convert.is_empty());
	assert!(!session.can_undo());

	session.redo().unwrap();
	let caps = session.resolve(part, &selected.block).unwrap();
	assert!(!caps.is_empty);
	assert!(!caps.convert.is_empty());
}

#[test]
fn undo_with_empty_history_is_unavailable() {
	let (_dir, mut session) = session();
	assert!(matches!(session.undo(), Err(SessionError::NoActivePart)));
	assert!(!session.can_undo());

	session.create_package(Some(&PartType::Text)).unwrap();
	assert!(matches!(session.undo(), Err(SessionError::ActionUnavailable(_))));
	assert!(matches!(session.redo(), Err(SessionError::ActionUnavailable(_))));
}

#[test]
fn undone_block_removal_brings_the_block_back() {
	let (_dir, mut session) = session_with_parts(&[PartType::TextDocument]);
	let part = active(&session);
	let block = session
		.host_mut()
		.insert_block(BlockKind::Math, Rect::new(0.0, 0.0, 100.0, 100.0), "x", None)
		.unwrap();
	session.host_mut().remove_block(&block).unwrap();
	assert!(matches!(
		session.resolve(part, &block),
		Err(SessionError::UnknownBlock(_))
	));

	session.undo().unwrap();
	let caps = session.resolve(part, &block).unwrap();
	assert!(caps.remove);
}

#[test]
fn blocks_do_not_carry_over_between_parts() {
	let (_dir, mut session) = session_with_parts(&[PartType::TextDocument]);
	let math = session
		.host_mut()
		.insert_block(BlockKind::Math, Rect::new(0.0, 0.0, 100.0, 100.0), "x", None)
		.unwrap();
	let other = session.new_part(&PartType::TextDocument).unwrap();

	assert!(matches!(
		session.resolve(other, &math),
		Err(SessionError::UnknownBlock(id)) if id == math.id
	));
	assert!(session.select_block(math.clone(), Point::new(1.0, 1.0)).is_none());
	assert!(session.selection().is_none());

	let root = session.host().root_block().unwrap();
	assert!(session.select_block(root, Point::new(1.0, 1.0)).is_some());
	assert!(session.menu().is_ok());
}

#[test]
fn select_block_needs_an_active_part() {
	let (_dir, mut session) = session_with_parts(&[PartType::Text]);
	let root = session.host().root_block().unwrap();
	session.close().unwrap();
	assert!(session.select_block(root, Point::new(0.0, 0.0)).is_none());
	assert!(session.selection().is_none());
}

fn kind() -> impl Strategy<Value = BlockKind> {
	prop::sample::select(vec![
		BlockKind::Text,
		BlockKind::Math,
		BlockKind::Diagram,
		BlockKind::Drawing,
		BlockKind::Container,
		BlockKind::Image,
	])
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(32))]

	#[test]
	fn resolve_is_deterministic_without_mutation(
		blocks in prop::collection::vec((kind(), 0u8..8, 0u8..8, any::<bool>()), 0..6),
		x in 0f32..800.0,
		y in 0f32..800.0,
	) {
		let (_dir, mut session) = session_with_parts(&[PartType::TextDocument]);
		for (kind, col, row, has_text) in blocks {
			let bounds = Rect::new(f32::from(col) * 100.0, f32::from(row) * 100.0, 150.0, 150.0);
			let text = if has_text { "content" } else { "" };
			session.host_mut().insert_block(kind, bounds, text, None).unwrap();
		}
		let part = active(&session);
		let selected = session.select_at(Point::new(x, y)).unwrap();

		let first = session.resolve(part, &selected.block).unwrap();
		let second = session.resolve(part, &selected.block).unwrap();
		prop_assert_eq!(&first, &second);
		prop_assert_eq!(session.menu().unwrap(), session.menu().unwrap());
		prop_assert!(!selected.block.is_container() || first.is_root);
	}
}
