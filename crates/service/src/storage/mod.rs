//! Storage abstractions for service layer
//!
//! Contains the file-backed document collection used when no database
//! is configured.

pub mod json_collection;
