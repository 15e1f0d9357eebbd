//! Seed Module
//!
//! Synthetic record generation for bootstrapping empty collection files.
//!
//! Generators are plain collaborators: the roster and catalog ask one for
//! `count` records and persist whatever comes back. Given the same seed a
//! generator always produces the same records, which keeps tests and demo
//! data reproducible.

mod generators;
mod rng;

pub use generators::{BookGenerator, StudentGenerator};
pub use rng::SplitMix64;

/// Produces synthetic records of type `R`
pub trait RecordGenerator<R> {
    /// Generate up to `count` records
    fn generate(&mut self, count: usize) -> Vec<R>;
}
