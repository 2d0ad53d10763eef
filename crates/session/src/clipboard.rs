//! Platform clipboard seam.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
	/// The platform clipboard could not be opened or written.
	#[error("clipboard unavailable: {0}")]
	Unavailable(String),
}

/// Destination for rich clipboard payloads.
///
/// Publishing replaces the whole clipboard content; callers clear first so a
/// failed publish never leaves a stale payload behind.
pub trait ClipboardSink {
	fn clear(&mut self) -> Result<(), ClipboardError>;

	/// Publishes `bytes` under the MIME type name `format`.
	fn publish(&mut self, format: &str, bytes: Vec<u8>) -> Result<(), ClipboardError>;
}

/// A published clipboard payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardEntry {
	pub format: String,
	pub bytes: Vec<u8>,
}

/// Process-local clipboard.
///
/// Clones share the same content, so a caller can keep one clone to inspect
/// what the session published.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
	content: Rc<RefCell<Option<ClipboardEntry>>>,
}

impl MemoryClipboard {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn content(&self) -> Option<ClipboardEntry> {
		self.content.borrow().clone()
	}
}

impl ClipboardSink for MemoryClipboard {
	fn clear(&mut self) -> Result<(), ClipboardError> {
		self.content.borrow_mut().take();
		Ok(())
	}

	fn publish(&mut self, format: &str, bytes: Vec<u8>) -> Result<(), ClipboardError> {
		*self.content.borrow_mut() = Some(ClipboardEntry {
			format: format.to_string(),
			bytes,
		});
		Ok(())
	}
}
