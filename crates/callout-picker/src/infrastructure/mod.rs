//! Infrastructure layer for the callout picker.
//!
//! Contains host-facing adapters: plugin data storage, the harness config
//! file, editor/notification/registration adapters, and the host bridge
//! commands.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `callout_core`, but MUST NOT be imported by the `application` or domain
//! layers.

pub mod host;
pub mod storage;
pub mod ui_bridge;
