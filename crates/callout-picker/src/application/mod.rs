//! Application layer use cases for the callout picker.
//!
//! Use cases in this layer orchestrate `callout_core` domain objects to fulfil
//! a user goal and depend only on the traits in [`ports`], never on a concrete
//! host, editor, or file system.
//!
//! # Sub-modules
//!
//! - **`ports`** – Traits the host application implements: editor handle,
//!   notifications, and command registration.
//!
//! - **`configuration_store`** – Loads the enabled flags from the host's
//!   plugin data blob and writes them back after every change.
//!
//! - **`callout_registry`** – Owns the catalog and the live configuration;
//!   computes suggestions and performs the insertion when a callout is chosen.
//!
//! - **`picker_session`** – The `Open -> Committed -> Closed` state machine of
//!   one picker overlay.
//!
//! - **`settings_panel`** – Generates one toggle per catalog entry and routes
//!   every toggle through the same handler.

pub mod callout_registry;
pub mod configuration_store;
pub mod picker_session;
pub mod ports;
pub mod settings_panel;
