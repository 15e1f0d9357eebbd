//! # Rollbook
//!
//! A small file-backed record store with:
//! - A student roster kept sorted by roll number, searched by binary search
//! - Roll number uniqueness enforced on every add
//! - Whole-file atomic rewrites (temp file + rename) after each mutation
//! - A separate title-keyed book catalog searched by linear scan
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CLI / Menu Loop                          │
//! │             (input validation, bootstrapping)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │RosterService│          │   Catalog   │
//!   │ (write lock)│          │ (append)    │
//!   └──┬───────┬──┘          └──────┬──────┘
//!      │       │                    │
//!      ▼       ▼                    ▼
//! ┌────────┐ ┌──────────────────────────────┐
//! │ Sorted │ │     PersistenceGateway       │
//! │ Index  │ │ (JSON file, atomic rewrite)  │
//! └────────┘ └──────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod storage;
pub mod index;
pub mod roster;
pub mod catalog;
pub mod seed;
pub mod input;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, RollbookError};
pub use config::Config;
pub use record::{Book, Grade, Student};
pub use roster::RosterService;
pub use catalog::Catalog;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of Rollbook
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
