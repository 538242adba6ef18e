//! Alert persistence
//!
//! Alerts live in a single JSON file holding a top-level array. Every append
//! rewrites the whole file, so writes are O(n) in the number of stored alerts.

mod json_file;

pub use json_file::AlertStore;
