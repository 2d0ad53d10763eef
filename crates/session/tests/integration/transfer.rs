use std::time::Duration;

use quire_engine::{InkHost, MimeType, PartType};
use quire_session::SessionError;

use crate::common::session_with_parts;

#[test]
fn blank_import_is_rejected_before_engine() {
	let (_dir, mut session) = session_with_parts(&[PartType::Text]);
	let root = session.host().root_block().unwrap();
	session.import(&root, MimeType::Text, "original").unwrap();
	let journal = session.host().journal().to_vec();

	for blank in ["", " ", "\t\n  "] {
		assert!(matches!(
			session.import(&root, MimeType::Text, blank),
			Err(SessionError::BlankData)
		));
	}
	assert_eq!(session.host().journal(), journal.as_slice());
	assert_eq!(session.host().block_text(&root.id).as_deref(), Some("original"));
}

#[tokio::test]
async fn export_suspends_until_engine_idle() {
	let (dir, mut session) = session_with_parts(&[PartType::Text]);
	session.host_mut().write_ink("hello").unwrap();
	session.host_mut().write_ink("world").unwrap();
	assert!(!session.host().is_idle());

	let root = session.host().root_block().unwrap();
	let out = dir.path().join("hello.txt");
	let recognition = session.host().recognition();
	let finish = async move {
		tokio::time::sleep(Duration::from_millis(20)).await;
		recognition.complete();
	};

	let export = session.export(&root, MimeType::Text, &out);
	let (result, ()) = tokio::join!(export, finish);
	result.unwrap();
	assert_eq!(std::fs::read_to_string(&out).unwrap(), "hello world");
}

#[tokio::test]
async fn export_does_not_start_before_idle() {
	let (dir, mut session) = session_with_parts(&[PartType::Text]);
	session.host_mut().write_ink("pending").unwrap();
	let root = session.host().root_block().unwrap();
	let out = dir.path().join("never.txt");

	let timed_out = tokio::time::timeout(
		Duration::from_millis(30),
		session.export(&root, MimeType::Text, &out),
	)
	.await
	.is_err();
	assert!(timed_out);
	assert!(!out.exists());
}

#[tokio::test]
async fn clipboard_copy_of_raw_content() {
	let (_dir, mut session) = session_with_parts(&[PartType::RawContent]);
	session.host_mut().write_ink("shape").unwrap();
	session.host_mut().settle();
	let root = session.host().root_block().unwrap();

	session.copy_to_clipboard(&root).await.unwrap();
	let entry = session.clipboard().content().unwrap();
	assert_eq!(entry.format, MimeType::CLIPBOARD.type_name());
	assert!(entry.bytes.ends_with(b"shape"));

	let leftovers = std::fs::read_dir(session.host().temp_folder())
		.unwrap()
		.filter_map(Result::ok)
		.filter(|e| e.path().extension().is_some_and(|x| x == "gvml"))
		.count();
	assert_eq!(leftovers, 0);
}

#[tokio::test]
async fn export_failure_surfaces_destination() {
	let (dir, mut session) = session_with_parts(&[PartType::Drawing]);
	session.host_mut().fail_exports(true);
	let root = session.host().root_block().unwrap();
	let out = dir.path().join("drawing.svg");

	let err = session.export(&root, MimeType::Svg, &out).await.unwrap_err();
	assert!(matches!(err, SessionError::Export { ref path, .. } if path == &out));
	crate::common::assert_single_active(&session);
}
