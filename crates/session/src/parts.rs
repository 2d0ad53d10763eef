//! Read-only view over a package's ordered parts.

use std::fmt;

use quire_engine::{InkHost, PackageId, PartId};

/// Sequential direction for part navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeqDirection {
	Next,
	Prev,
}

impl fmt::Display for SeqDirection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Next => "after",
			Self::Prev => "before",
		})
	}
}

/// Ordered parts of one package, as the engine reports them.
///
/// Borrowing the host keeps the view from outliving a structural change.
pub struct PartSequence<'a, H: InkHost + ?Sized> {
	host: &'a H,
	package: PackageId,
}

impl<'a, H: InkHost + ?Sized> PartSequence<'a, H> {
	pub fn new(host: &'a H, package: PackageId) -> Self {
		Self { host, package }
	}

	pub fn package(&self) -> PackageId {
		self.package
	}

	pub fn len(&self) -> usize {
		self.host.part_count(self.package)
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Position of `part` in the sequence, if it belongs to this package.
	pub fn index_of(&self, part: PartId) -> Option<usize> {
		self.host.index_of_part(self.package, part)
	}

	/// Returns true when no index exists past `index` in `direction`.
	pub fn at_bound(&self, index: usize, direction: SeqDirection) -> bool {
		match direction {
			SeqDirection::Next => index + 1 >= self.len(),
			SeqDirection::Prev => index == 0,
		}
	}

	/// Indices adjacent to `from` in `direction`, nearest first.
	pub fn candidates(&self, from: usize, direction: SeqDirection) -> Vec<usize> {
		match direction {
			SeqDirection::Next => (from + 1..self.len()).collect(),
			SeqDirection::Prev => (0..from.min(self.len())).rev().collect(),
		}
	}
}
