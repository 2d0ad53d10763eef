//! Scan-and-skip part navigation.
//!
//! ```text
//!            ┌──────── candidate failed: release it, try next ───────┐
//!            ▼                                                       │
//!   ┌──────────────┐  candidate bound   ┌───────────┐                │
//!   │   Scanning   │───────────────────▶│ Committed │                │
//!   └──────────────┘                    └───────────┘                │
//!            │ │                                                     │
//!            │ └─────────────────────────────────────────────────────┘
//!            │ candidates exhausted
//!            ▼
//!   ┌──────────────┐
//!   │  RolledBack  │  caller rebinds the origin part
//!   └──────────────┘
//! ```
//!
//! The origin handle is never touched by the scan. The caller releases it on
//! commit and rebinds it on rollback.

use std::collections::VecDeque;

use quire_engine::{EngineError, InkHost, PackageId, PartId};

use crate::parts::SeqDirection;

#[derive(Debug)]
enum ScanState {
	Scanning,
	Committed { part: PartId, index: usize },
	RolledBack,
}

/// Terminal result of a scan.
#[derive(Debug)]
pub(super) enum ScanOutcome {
	/// `part` at `index` is bound to the surface.
	Committed { part: PartId, index: usize },
	/// No candidate could be bound; the surface is unbound.
	RolledBack {
		skipped: usize,
		last_error: Option<EngineError>,
	},
}

#[derive(Debug)]
pub(super) struct NavigationScan {
	origin: PartId,
	direction: SeqDirection,
	candidates: VecDeque<usize>,
	state: ScanState,
	skipped: usize,
	last_error: Option<EngineError>,
}

impl NavigationScan {
	pub fn new(origin: PartId, direction: SeqDirection, candidates: Vec<usize>) -> Self {
		Self {
			origin,
			direction,
			candidates: candidates.into(),
			state: ScanState::Scanning,
			skipped: 0,
			last_error: None,
		}
	}

	/// Tries the next candidate.
	fn step<H: InkHost + ?Sized>(&mut self, host: &mut H, package: PackageId) {
		let Some(index) = self.candidates.pop_front() else {
			self.state = ScanState::RolledBack;
			return;
		};

		let part = match host.get_part(package, index) {
			Ok(part) => part,
			Err(error) => {
				self.skip(index, error);
				return;
			}
		};
		match host.bind_part(Some(part)) {
			Ok(()) => self.state = ScanState::Committed { part, index },
			Err(error) => {
				host.release_part(part);
				self.skip(index, error);
			}
		}
	}

	fn skip(&mut self, index: usize, error: EngineError) {
		tracing::debug!(
			origin = %self.origin,
			direction = ?self.direction,
			index,
			%error,
			"navigate: skipping part"
		);
		self.skipped += 1;
		self.last_error = Some(error);
	}

	/// Runs the scan to a terminal state.
	pub fn run<H: InkHost + ?Sized>(mut self, host: &mut H, package: PackageId) -> ScanOutcome {
		while matches!(self.state, ScanState::Scanning) {
			self.step(host, package);
		}
		match self.state {
			ScanState::Committed { part, index } => ScanOutcome::Committed { part, index },
			ScanState::Scanning | ScanState::RolledBack => ScanOutcome::RolledBack {
				skipped: self.skipped,
				last_error: self.last_error,
			},
		}
	}
}
