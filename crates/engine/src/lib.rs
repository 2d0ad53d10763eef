#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Ink engine collaborator boundary.
//!
//! The session core never talks to a recognition engine directly. Everything
//! it needs (packages, parts, the editor surface, capability queries, and the
//! transfer primitives) goes through the [`InkHost`] trait defined here.
//!
//! # Main Types
//!
//! - [`InkHost`] - Engine + editor surface operations consumed by the session
//! - [`PartType`], [`BlockKind`], [`MimeType`], [`ConversionState`] - Closed
//!   tag sets with an explicit `Unknown` escape hatch where the engine may
//!   report identifiers this crate does not know
//! - [`ContentBlock`] - Transient value describing a region of the bound part
//! - [`memory::MemoryEngine`] - Headless reference engine for tests and the CLI
//!
//! # Handles
//!
//! ```text
//! PackageId ──owns──▶ stored parts (index order)
//!                      ▲
//! PartId ──────refers─┘   one id per acquired handle, released explicitly
//! ```
//!
//! A [`PartId`] is a handle, not a part: acquiring the same stored part twice
//! yields two distinct ids. Identity comparisons in the session use handles.

mod block;
mod error;
mod geometry;
mod host;
mod ids;
mod kinds;
pub mod memory;
mod mime;
mod options;

pub use block::ContentBlock;
pub use error::{EngineError, Result};
pub use geometry::{Point, Rect};
pub use host::InkHost;
pub use ids::{BlockId, PackageId, PartId};
pub use kinds::{BlockKind, ConversionState, PartType};
pub use mime::MimeType;
pub use options::{EngineOptions, RawContentOptions};
