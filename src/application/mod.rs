//! Application layer holding the selection state manager.
//!
//! This module sits between the domain types and the presentation layer:
//! it owns the catalog, the selection index, and the label, and exposes
//! one operation per UI event.

pub mod state;

pub use state::*;
