//! Roster Service
//!
//! Coordinates the persistence gateway and the sorted index.

use std::path::Path;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Result, RollbookError};
use crate::index::SortedIndex;
use crate::record::{Grade, Student};
use crate::seed::RecordGenerator;
use crate::storage::PersistenceGateway;

/// Sorted, uniquely keyed student roster backed by one JSON file
///
/// ## Concurrency Model
///
/// - **Mutations** (add/update/seed/bootstrap): serialized by `write_lock`,
///   so two threads sharing one service never interleave their
///   load-modify-save cycles.
/// - **Reads** (search/list): take no lock. The gateway's rename-based save
///   means a reader sees either the old or the new file.
///
/// Separate processes (or separate services over the same file) are NOT
/// coordinated: the second save silently overwrites the first.
pub struct RosterService {
    /// Service configuration
    config: Config,

    /// The roster file
    gateway: PersistenceGateway<Student>,

    /// Serializes load-modify-save cycles within this process
    write_lock: Mutex<()>,
}

impl RosterService {
    /// Open a roster using `config.roster_path()`
    ///
    /// Does not touch the file; a missing file surfaces on first use.
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;
        let gateway = PersistenceGateway::open(config.roster_path(), config.durability);

        Ok(Self {
            config,
            gateway,
            write_lock: Mutex::new(()),
        })
    }

    /// Open with a data directory (convenience method)
    ///
    /// Uses default config with the specified data directory
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().data_dir(path).build())
    }

    /// Add a new student
    ///
    /// Steps:
    /// 1. Acquire write lock
    /// 2. Load the current roster
    /// 3. Reject an existing roll number (nothing is written)
    /// 4. Insert at the sorted position and save
    pub fn add(&self, name: &str, roll_number: u32, grade: Grade) -> Result<Student> {
        let _write_guard = self.write_lock.lock();

        let mut index = self.load_snapshot()?;

        if index.find(roll_number).is_some() {
            debug!(roll_number, "add rejected: roll number taken");
            return Err(RollbookError::DuplicateKey(roll_number));
        }

        let student = Student::new(name, roll_number, grade);
        let pos = index.insert(student.clone());
        self.gateway.save(index.as_slice())?;

        info!(roll_number, position = pos, total = index.len(), "student added");
        Ok(student)
    }

    /// Look up a student by roll number
    ///
    /// Returns:
    /// - `Ok(Some(student))`: found
    /// - `Ok(None)`: no student has this roll number
    pub fn search(&self, roll_number: u32) -> Result<Option<Student>> {
        let index = self.load_snapshot()?;
        Ok(index
            .find(roll_number)
            .and_then(|pos| index.get(pos))
            .cloned())
    }

    /// Change one student's grade
    ///
    /// Name, roll number and position stay as they are. Fails with
    /// `NotFound` (and writes nothing) if the roll number is absent.
    pub fn update(&self, roll_number: u32, grade: Grade) -> Result<Student> {
        let _write_guard = self.write_lock.lock();

        let mut index = self.load_snapshot()?;

        let pos = index
            .find(roll_number)
            .ok_or(RollbookError::NotFound(roll_number))?;

        let updated = match index.get_mut(pos) {
            Some(student) => {
                student.grade = grade;
                student.clone()
            }
            None => return Err(RollbookError::NotFound(roll_number)),
        };

        self.gateway.save(index.as_slice())?;

        info!(roll_number, grade = %grade, "grade updated");
        Ok(updated)
    }

    /// All students, ascending by roll number
    pub fn list(&self) -> Result<Vec<Student>> {
        Ok(self.load_snapshot()?.into_inner())
    }

    /// Replace the roster with `count` generated students
    ///
    /// Returns the number of students written. Fails with `DuplicateKey`
    /// (nothing written) if the generator repeats a roll number.
    pub fn seed<G>(&self, generator: &mut G, count: usize) -> Result<usize>
    where
        G: RecordGenerator<Student>,
    {
        let _write_guard = self.write_lock.lock();
        self.seed_internal(generator, count)
    }

    /// Seed only if the roster file is missing or empty
    ///
    /// Returns whether seeding happened.
    pub fn bootstrap<G>(&self, generator: &mut G, count: usize) -> Result<bool>
    where
        G: RecordGenerator<Student>,
    {
        let _write_guard = self.write_lock.lock();

        if !self.gateway.is_empty() {
            return Ok(false);
        }

        info!(path = %self.gateway.path().display(), "roster file empty, bootstrapping");
        self.seed_internal(generator, count)?;
        Ok(true)
    }

    /// True if the roster file is missing or zero bytes
    pub fn needs_bootstrap(&self) -> bool {
        self.gateway.is_empty()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Seed implementation (called with write lock held)
    fn seed_internal<G>(&self, generator: &mut G, count: usize) -> Result<usize>
    where
        G: RecordGenerator<Student>,
    {
        let index = SortedIndex::from_unsorted(generator.generate(count));

        if let Some(dup) = index.first_duplicate() {
            return Err(RollbookError::DuplicateKey(dup));
        }

        self.gateway.save(index.as_slice())?;

        info!(students = index.len(), "roster seeded");
        Ok(index.len())
    }

    /// Load the roster and re-establish the ordering invariants
    ///
    /// An out-of-order file is re-sorted in memory (and written back sorted
    /// on the next mutation). A file with a repeated roll number is rejected.
    fn load_snapshot(&self) -> Result<SortedIndex<Student>> {
        let records = self.gateway.load()?;

        let was_sorted = SortedIndex::<Student>::is_sorted_slice(&records);
        let index = SortedIndex::from_unsorted(records);

        if !was_sorted {
            warn!(path = %self.gateway.path().display(), "roster file was not sorted; re-sorted on load");
        }

        if let Some(dup) = index.first_duplicate() {
            return Err(RollbookError::Storage(format!(
                "{} contains roll number {} more than once",
                self.gateway.path().display(),
                dup
            )));
        }

        Ok(index)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Path of the roster file
    pub fn path(&self) -> &Path {
        self.gateway.path()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
