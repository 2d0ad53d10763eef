//! Opaque engine handles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle to an open content package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackageId(pub u64);

/// Handle to an acquired content part.
///
/// Every acquisition (create or get-by-index) yields a fresh handle. The
/// handle must be released through [`InkHost::release_part`] once it is no
/// longer bound or referenced.
///
/// [`InkHost::release_part`]: crate::InkHost::release_part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartId(pub u64);

/// Engine-assigned identifier of a content block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub String);

impl BlockId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for PackageId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "package#{}", self.0)
	}
}

impl fmt::Display for PartId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "part#{}", self.0)
	}
}

impl fmt::Display for BlockId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
