//! Funsel - Funnel Selector Library
//!
//! A terminal multi-select dropdown over CRM funnels and their stages,
//! with pluralized summary labels and persistent selection state.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
