//! Infrastructure layer providing durable local storage.
//!
//! This module holds the file-backed state store the selection manager
//! persists its single record into.

pub mod persistence;

pub use persistence::*;
