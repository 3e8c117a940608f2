//! callout-picker library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does the picker do?
//!
//! The user triggers the `insert-callout` command (or the ribbon icon), types
//! a few letters, and picks a callout type from the filtered list.  The
//! chosen callout is inserted at the cursor, wrapping any selected text.
//! A settings tab lists one toggle per callout type; disabled types are no
//! longer offered by the picker.

/// Application layer: registry, picker session, settings panel, host ports.
pub mod application;

/// Infrastructure layer: storage adapters, host adapters, and host bridge.
pub mod infrastructure;
