//! Diagnostic check handlers.

pub mod store;
