//! Storage Module
//!
//! Persistent storage layer: one JSON file per record collection.
//!
//! ## Responsibilities
//! - Load a whole collection from disk in stored order
//! - Rewrite a whole collection atomically (temp file + rename)
//! - Report whether a collection file still needs bootstrapping
//!
//! ## File Format
//! ```text
//! ┌────────────────────────────────────────┐
//! │ [                                      │
//! │     { record 0 fields ... },           │
//! │     { record 1 fields ... },           │
//! │     ...                                │
//! │ ]                                      │
//! └────────────────────────────────────────┘
//! ```
//!
//! Records are written in the order they are handed to `save` and read
//! back in that same order. No other module touches the files.

mod gateway;

pub use gateway::PersistenceGateway;
