//! Host adapters implementing the application ports.
//!
//! A real host application supplies its own editor, toasts, and registration
//! API.  This module provides the adapters used by the headless harness and
//! by tests:
//!
//! - `buffer_editor` – in-memory document with a cursor/selection.
//! - `log` – notifications and registrations written to the `tracing` log.
//! - `mock` – recording doubles for integration tests.

pub mod buffer_editor;
pub mod log;
pub mod mock;
