#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Editing session core for ink documents.
//!
//! A session owns one open package and at most one active part of it, works
//! out which actions are legal for whatever the user selected, and moves data
//! in and out of the engine. The engine itself sits behind
//! [`quire_engine::InkHost`].
//!
//! # Main Types
//!
//! - [`Session`] - Facade the UI layer drives
//! - [`SessionController`] - Active part ownership with atomic switch, navigate, open
//! - [`resolve`] / [`CapabilitySnapshot`] - Legal actions for a (part, block) pair
//! - [`TransferNegotiator`] - Export, import, and clipboard exchange
//! - [`build_menu`] / [`route`] - Menu layout and command routing
//! - [`SelectionContext`] - Generation-stamped "last selected block"
//!
//! # Control flow
//!
//! ```text
//! select_at ──▶ SelectionContext ──▶ resolve ──▶ build_menu
//!                                                    │
//!                        dispatch(generation, cmd) ◀─┘
//!                           │
//!              ┌────────────┴────────────┐
//!              ▼                         ▼
//!      SessionController         TransferNegotiator
//!      (structure, edits)        (export, import, clipboard)
//! ```

mod capability;
mod clipboard;
mod config;
mod controller;
mod dispatch;
mod error;
mod gate;
mod parts;
mod selection;
mod session;
mod transfer;
mod untitled;

pub use capability::{CapabilitySnapshot, resolve};
pub use clipboard::{ClipboardEntry, ClipboardError, ClipboardSink, MemoryClipboard};
pub use config::{ConfigError, SessionConfig};
pub use controller::SessionController;
pub use dispatch::{
	ActionMenu, CLIPBOARD_LABEL, CommandInput, EditAction, MenuCategory, MenuEntry, Route, SessionCommand,
	build_menu, route,
};
pub use error::{Result, SessionError};
pub use gate::{StructuralGate, StructuralGuard};
pub use parts::{PartSequence, SeqDirection};
pub use selection::{Selected, SelectionContext};
pub use session::Session;
pub use transfer::{
	TransferDirection, TransferNegotiator, TransferRequest, normalize_export_filename, resolve_export_path,
};
pub use untitled::UntitledNamer;
