//! Configuration for Rollbook
//!
//! Centralized configuration with sensible defaults.

use std::ops::RangeInclusive;
use std::path::PathBuf;

use crate::error::{Result, RollbookError};

/// Main configuration for a Rollbook data directory
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for the record files
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── student_data.json   (sorted roster)
    ///     └── book_data.json      (book catalog)
    pub data_dir: PathBuf,

    /// File name of the student roster inside `data_dir`
    pub roster_file: String,

    /// File name of the book catalog inside `data_dir`
    pub catalog_file: String,

    /// Whether saves fsync the temp file before renaming it into place
    pub durability: Durability,

    // -------------------------------------------------------------------------
    // Roster Configuration
    // -------------------------------------------------------------------------
    /// Smallest roll number accepted on add and drawn by the generator
    pub key_min: u32,

    /// Largest roll number accepted on add and drawn by the generator
    pub key_max: u32,

    /// Number of synthetic records written when a file is bootstrapped
    pub seed_count: usize,

    // -------------------------------------------------------------------------
    // Catalog Configuration
    // -------------------------------------------------------------------------
    /// Latest publication year accepted for a book
    pub max_publication_year: i32,
}

/// How hard a save pushes bytes to the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Durability {
    /// fsync the temp file before the rename (safest, slowest)
    Fsync,

    /// Flush userspace buffers only and leave syncing to the OS
    BufferedOnly,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            roster_file: "student_data.json".to_string(),
            catalog_file: "book_data.json".to_string(),
            durability: Durability::Fsync,
            key_min: 1000,
            key_max: 9999,
            seed_count: 10,
            max_publication_year: 2024,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Full path of the roster file
    pub fn roster_path(&self) -> PathBuf {
        self.data_dir.join(&self.roster_file)
    }

    /// Full path of the catalog file
    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(&self.catalog_file)
    }

    /// Inclusive range of valid roll numbers
    pub fn key_range(&self) -> RangeInclusive<u32> {
        self.key_min..=self.key_max
    }

    /// Check the settings are usable together
    pub fn validate(&self) -> Result<()> {
        if self.key_min > self.key_max {
            return Err(RollbookError::Config(format!(
                "key range is empty: {} > {}",
                self.key_min, self.key_max
            )));
        }
        if self.roster_file.is_empty() || self.catalog_file.is_empty() {
            return Err(RollbookError::Config(
                "record file names must not be empty".to_string(),
            ));
        }
        if self.roster_file == self.catalog_file {
            return Err(RollbookError::Config(format!(
                "roster and catalog cannot share the file {}",
                self.roster_file
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for all record files)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the roster file name
    pub fn roster_file(mut self, name: impl Into<String>) -> Self {
        self.config.roster_file = name.into();
        self
    }

    /// Set the catalog file name
    pub fn catalog_file(mut self, name: impl Into<String>) -> Self {
        self.config.catalog_file = name.into();
        self
    }

    /// Set the save durability
    pub fn durability(mut self, durability: Durability) -> Self {
        self.config.durability = durability;
        self
    }

    /// Set the inclusive roll number range
    pub fn key_range(mut self, min: u32, max: u32) -> Self {
        self.config.key_min = min;
        self.config.key_max = max;
        self
    }

    /// Set the bootstrap record count
    pub fn seed_count(mut self, count: usize) -> Self {
        self.config.seed_count = count;
        self
    }

    /// Set the latest accepted publication year
    pub fn max_publication_year(mut self, year: i32) -> Self {
        self.config.max_publication_year = year;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
