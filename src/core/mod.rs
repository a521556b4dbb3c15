//! Record model and path access.
//!
//! This module contains the pure data layer every other component builds on:
//! - `Value`, the dynamic representation of an edited record
//! - `path::get` / `path::set`, dotted-path reads and copy-on-write writes
//!
//! Nothing in here has side effects; `set` always returns a new record.

pub mod path;
mod value;

pub use value::{Fields, Value};
