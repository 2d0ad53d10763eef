//! Common utilities for session integration tests.

use quire_engine::memory::MemoryEngine;
use quire_engine::{InkHost, PartId, PartType};
use quire_session::{MemoryClipboard, Session, SessionConfig};

pub type TestSession = Session<MemoryEngine, MemoryClipboard>;

/// Session over a memory engine rooted in a fresh temp directory.
pub fn session() -> (tempfile::TempDir, TestSession) {
	let _ = tracing_subscriber::fmt::try_init();
	let dir = tempfile::tempdir().expect("failed to create temp dir");
	let config = SessionConfig {
		packages_dir: Some(dir.path().to_path_buf()),
		..SessionConfig::default()
	};
	let session = Session::new(MemoryEngine::default(), MemoryClipboard::new(), config)
		.expect("memory engine accepts configuration");
	(dir, session)
}

/// Session holding one package with parts of `types`; the last one is active.
pub fn session_with_parts(types: &[PartType]) -> (tempfile::TempDir, TestSession) {
	let (dir, mut session) = session();
	for ty in types {
		session.new_part(ty).expect("part activates");
	}
	(dir, session)
}

/// Index of the active part in the current package.
pub fn active_index(session: &TestSession) -> Option<usize> {
	let part = session.active_part()?;
	let package = session.controller().current_package()?;
	session.host().index_of_part(package, part)
}

/// Asserts the single-active-part invariant against the engine's view.
pub fn assert_single_active(session: &TestSession) {
	let engine = session.host();
	assert!(engine.violations().is_empty(), "engine violations: {:?}", engine.violations());
	assert_eq!(engine.bound_part(), session.active_part());
	if let Some(part) = session.active_part() {
		let package = session
			.controller()
			.current_package()
			.expect("active part implies a current package");
		assert!(engine.index_of_part(package, part).is_some());
		assert_eq!(engine.open_package_count(), 1);
	}
}

pub fn active(session: &TestSession) -> PartId {
	session.active_part().expect("a part is active")
}
