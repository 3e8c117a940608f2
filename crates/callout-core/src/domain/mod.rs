//! Domain entities for the callout picker.
//!
//! This module contains pure logic with no host or storage dependencies.
//! Everything here can be compiled and tested without an editor, a settings
//! panel, or a file system.
//!
//! Code in outer layers (application, infrastructure, host bridge) depends on
//! the domain, but the domain never depends on them.

/// The fixed list of known callout types.
pub mod catalog;

/// Enabled/disabled flag per callout identifier.
pub mod configuration;

/// Query filtering over the catalog.
pub mod suggest;
