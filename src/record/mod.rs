//! Record Module
//!
//! The record shapes Rollbook persists.
//!
//! ## Serialized Shapes
//! ```text
//! Student: { "name": str, "roll_number": u32, "grade": "A".."F" }
//! Book:    { "title": str, "author": str, "publication_year": i32 }
//! ```
//!
//! Both shapes reject unknown and missing fields when decoded, so a hand
//! edited file that drifts from the shape fails to load instead of being
//! silently patched up.

mod book;
mod student;

use std::fmt::Debug;

pub use book::Book;
pub use student::{Grade, Student};

/// A record with a single ordering key
///
/// `SortedIndex` orders and searches records through this trait.
pub trait Keyed {
    /// The key type; must be totally ordered
    type Key: Ord + Copy + Debug;

    /// The record's key
    fn key(&self) -> Self::Key;
}
