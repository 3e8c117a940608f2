//! # callout-core
//!
//! Shared library for the callout picker containing the callout catalog, the
//! per-type enabled configuration, the suggestion filter, and the markup a
//! chosen callout expands to.
//!
//! It has zero dependencies on host editors, storage, or UI toolkits.
//!
//! # Architecture overview
//!
//! A *callout* is a labelled block inside a markdown-like document:
//!
//! ```text
//! > [!warning]
//! > Back up the vault before upgrading.
//! ```
//!
//! The picker lets the user choose the label from a filterable list.  This
//! crate defines:
//!
//! - **`domain`** – The build-time [`Catalog`] of [`CalloutType`]s, the
//!   [`Configuration`] deciding which of them are offered, and
//!   [`suggest`], the pure query filter behind the picker list.
//!
//! - **`markup`** – The text inserted into the document for a chosen callout,
//!   optionally wrapping the user's current selection.

pub mod domain;
pub mod markup;

pub use domain::catalog::{CalloutType, Catalog, CatalogError};
pub use domain::configuration::Configuration;
pub use domain::suggest::suggest;
pub use markup::render_callout;
