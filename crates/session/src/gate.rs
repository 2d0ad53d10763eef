use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

use crate::error::{Result, SessionError};

/// Single-slot gate for structural operations (new, open, switch, navigate,
/// close).
///
/// A structural operation runs to completion or rollback before the next one
/// is accepted. Contention only comes from interleaved async continuations on
/// one thread, so entry fails fast with [`SessionError::Busy`] instead of
/// queueing.
#[derive(Debug, Clone, Default)]
pub struct StructuralGate {
	busy: Arc<AtomicBool>,
	/// Notification for the gate reopening.
	released: Arc<Notify>,
}

impl StructuralGate {
	pub fn new() -> Self {
		Self::default()
	}

	/// Claims the slot, returning a guard that must be held until the
	/// operation finishes.
	pub fn try_enter(&self) -> Result<StructuralGuard> {
		if self
			.busy
			.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
			.is_err()
		{
			return Err(SessionError::Busy);
		}
		Ok(StructuralGuard {
			busy: self.busy.clone(),
			released: self.released.clone(),
		})
	}

	/// Returns true while a structural operation is in flight.
	pub fn is_busy(&self) -> bool {
		self.busy.load(Ordering::SeqCst)
	}

	/// Waits until no structural operation is in flight.
	pub async fn wait_free(&self) {
		loop {
			// `notify_waiters` only wakes futures created before it runs.
			let notified = self.released.notified();

			if !self.is_busy() {
				return;
			}

			notified.await;
		}
	}
}

/// Guard holding the structural slot.
#[derive(Debug)]
pub struct StructuralGuard {
	busy: Arc<AtomicBool>,
	released: Arc<Notify>,
}

impl Drop for StructuralGuard {
	fn drop(&mut self) {
		let was_busy = self.busy.swap(false, Ordering::SeqCst);
		debug_assert!(was_busy, "structural gate released twice");
		self.released.notify_waiters();
	}
}
