#![allow(unused_crate_dependencies)]

#[path = "integration/common/mod.rs"]
mod common;

#[path = "integration/navigation.rs"]
mod navigation;

#[path = "integration/capabilities.rs"]
mod capabilities;

#[path = "integration/transfer.rs"]
mod transfer;

#[path = "integration/dispatch.rs"]
mod dispatch;
