use proptest::prelude::*;
use quire_engine::{InkHost, PartType};
use quire_session::{SeqDirection, SessionError};

use crate::common::{active, active_index, assert_single_active, session, session_with_parts};

#[derive(Debug, Clone)]
enum Op {
	Switch(PartType),
	Navigate(SeqDirection),
}

fn op() -> impl Strategy<Value = Op> {
	prop_oneof![
		prop::sample::select(PartType::KNOWN.to_vec()).prop_map(Op::Switch),
		Just(Op::Navigate(SeqDirection::Next)),
		Just(Op::Navigate(SeqDirection::Prev)),
	]
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(48))]

	#[test]
	fn exactly_one_part_active_after_any_sequence(ops in prop::collection::vec(op(), 1..20)) {
		let (_dir, mut session) = session_with_parts(&[PartType::Text]);
		session.host_mut().refuse_activation_of(PartType::Diagram);

		for op in ops {
			let before = active(&session);
			let result = match &op {
				Op::Switch(ty) => session.switch_part(ty),
				Op::Navigate(direction) => session.navigate(*direction),
			};
			match result {
				Ok(part) => {
					prop_assert_eq!(session.active_part(), Some(part));
				}
				Err(SessionError::Activation(_) | SessionError::NoNavigableTarget { .. }) => {
					prop_assert_eq!(session.active_part(), Some(before));
				}
				Err(other) => prop_assert!(false, "unexpected error for {:?}: {}", op, other),
			}
			assert_single_active(&session);
		}
	}
}

#[test]
fn exhausted_scan_keeps_original_part() {
	let (_dir, mut session) = session_with_parts(&[PartType::Text, PartType::Math, PartType::Drawing, PartType::Text]);
	session.navigate(SeqDirection::Prev).unwrap();
	session.navigate(SeqDirection::Prev).unwrap();
	assert_eq!(active_index(&session), Some(1));
	let before = active(&session);

	let package = session.controller().current_package().unwrap();
	session.host_mut().refuse_activation(package, 2).unwrap();
	session.host_mut().refuse_activation(package, 3).unwrap();

	let err = session.navigate(SeqDirection::Next).unwrap_err();
	assert!(matches!(err, SessionError::NoNavigableTarget { origin, .. } if origin == before));
	assert_eq!(session.active_part(), Some(before));
	assert_single_active(&session);
}

#[test]
fn three_parts_last_fails_to_activate() {
	let (_dir, mut session) = session_with_parts(&[PartType::Text, PartType::Math, PartType::Drawing]);
	session.navigate(SeqDirection::Prev).unwrap();
	let b = active(&session);
	assert_eq!(active_index(&session), Some(1));

	let package = session.controller().current_package().unwrap();
	session.host_mut().refuse_activation(package, 2).unwrap();

	assert!(matches!(
		session.navigate(SeqDirection::Next),
		Err(SessionError::NoNavigableTarget { direction: SeqDirection::Next, .. })
	));
	assert_eq!(session.active_part(), Some(b));
	assert_eq!(active_index(&session), Some(1));
	assert_single_active(&session);
}

#[test]
fn navigation_skips_corrupt_neighbour() {
	let (_dir, mut session) = session_with_parts(&[PartType::Text, PartType::Math, PartType::Drawing]);
	let package = session.controller().current_package().unwrap();
	session.host_mut().refuse_activation(package, 1).unwrap();

	session.navigate(SeqDirection::Prev).unwrap();
	assert_eq!(active_index(&session), Some(0));
	assert_single_active(&session);
}

#[test]
fn new_part_without_package_creates_one() {
	let (dir, mut session) = session();
	session.new_part(&PartType::RawContent).unwrap();
	assert_eq!(session.title(), "File1.iink - Raw Content");
	assert!(dir.path().join("tmp").join("File1.iink-file").is_dir());
}

#[test]
fn structural_ops_clear_selection() {
	let (_dir, mut session) = session_with_parts(&[PartType::Text, PartType::Math]);
	assert!(session.select_at(quire_engine::Point::new(1.0, 1.0)).is_some());
	session.navigate(SeqDirection::Prev).unwrap();
	assert!(session.selection().is_none());
	assert!(session.menu().is_err());
}

#[test]
fn structural_ops_refused_while_gate_held() {
	let (_dir, mut session) = session_with_parts(&[PartType::Text, PartType::Math]);
	let gate = session.gate();
	let guard = gate.try_enter().unwrap();
	assert!(matches!(session.navigate(SeqDirection::Prev), Err(SessionError::Busy)));
	assert_eq!(active_index(&session), Some(1));
	drop(guard);
	session.navigate(SeqDirection::Prev).unwrap();
	assert_eq!(active_index(&session), Some(0));
}

#[test]
fn open_failure_is_not_rolled_back() {
	let (dir, mut session) = session_with_parts(&[PartType::Text]);
	let err = session.open_package(&dir.path().join("nope.iink")).unwrap_err();
	assert!(matches!(err, SessionError::Open { .. }));
	assert_eq!(session.active_part(), None);
	assert_eq!(session.title(), "");
	assert_eq!(session.host().open_package_count(), 0);
	// The replaced package was saved before it was closed.
	assert!(dir.path().join("File1.iink").is_file());
}

#[test]
fn reopen_by_relative_name() {
	let (_dir, mut session) = session_with_parts(&[PartType::Math, PartType::Text]);
	let saved = session.save_as("algebra").unwrap();
	session.close().unwrap();
	assert_single_active(&session);

	session.open_package(std::path::Path::new("algebra.iink")).unwrap();
	assert_eq!(session.title(), "algebra.iink - Math");
	assert_eq!(session.host().package_path(session.controller().current_package().unwrap()), Some(saved));
}
