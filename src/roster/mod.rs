//! Roster Module
//!
//! The sorted student roster: the only entry point for reading and changing
//! the roster file.
//!
//! ## Responsibilities
//! - Enforce roll number uniqueness on add and seed
//! - Answer point lookups by binary search
//! - Update a student's grade in place
//! - Write the whole roster back after every successful mutation
//!
//! ## State Model
//! The roster file is the single source of truth. Every call loads a fresh
//! snapshot, acts on it, and (for mutations) saves it before returning.
//! Nothing is cached between calls.

mod service;

pub use service::RosterService;
