//! Persistence Gateway
//!
//! Reads and rewrites one collection file in full.
//!
//! ## Responsibilities
//! - Decode the whole file into records, preserving stored order
//! - Encode records into a private sibling temp file, then rename it into place
//! - Never leave a truncated mix of old and new content behind

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::config::Durability;
use crate::error::{Result, RollbookError};

/// Whole-file JSON persistence for a collection of `R`
///
/// Holds no records itself; every `load` goes to disk.
pub struct PersistenceGateway<R> {
    /// The collection file
    path: PathBuf,

    /// Whether `save` fsyncs before the rename
    durability: Durability,

    _record: PhantomData<fn() -> R>,
}

impl<R> PersistenceGateway<R>
where
    R: Serialize + DeserializeOwned,
{
    const TMP_SUFFIX: &'static str = ".tmp";
    const INDENT: &'static [u8] = b"    ";

    /// Create a gateway over `path`. No I/O happens until `load`/`save`.
    pub fn open(path: impl Into<PathBuf>, durability: Durability) -> Self {
        Self {
            path: path.into(),
            durability,
            _record: PhantomData,
        }
    }

    /// Read the full collection in stored order
    ///
    /// Fails with:
    /// - `Storage` if the file does not exist
    /// - `Io` if it exists but cannot be read
    /// - `Serialization` if the content is not an array of the record shape
    pub fn load(&self) -> Result<Vec<R>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(RollbookError::Storage(format!(
                    "record file {} does not exist",
                    self.path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let records: Vec<R> = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            RollbookError::Serialization(format!("{}: {}", self.path.display(), e))
        })?;

        debug!(path = %self.path.display(), records = records.len(), "loaded collection");
        Ok(records)
    }

    /// Replace the file's content with `records`, in the given order
    ///
    /// Steps:
    /// 1. Create the parent directory if needed
    /// 2. Write the whole collection to a uniquely named temp file beside it
    /// 3. Flush (and fsync, per `Durability`)
    /// 4. Rename the temp file over the collection file
    /// 5. Fsync the directory so the rename survives a crash (`Fsync` only)
    ///
    /// Each save gets its own temp file, so concurrent savers never collide;
    /// the last rename wins. A temp file is removed if the save fails.
    pub fn save(&self, records: &[R]) -> Result<()> {
        // Step 1: Make sure the directory exists
        let dir = self.dir();
        fs::create_dir_all(&dir)?;

        // Step 2 + 3: Write the temp file (dropped, and so deleted, on error)
        let tmp = self.write_tmp(&dir, records)?;

        // Step 4: Atomic swap
        if let Err(e) = tmp.persist(&self.path) {
            warn!(path = %self.path.display(), error = %e.error, "rename of temp file failed");
            return Err(RollbookError::Storage(format!(
                "failed to replace {}: {}",
                self.path.display(),
                e.error
            )));
        }

        // Step 5: Make the rename itself durable
        // Best effort: not every platform can open a directory as a file
        if self.durability == Durability::Fsync {
            if let Ok(handle) = File::open(&dir) {
                let _ = handle.sync_all();
            }
        }

        debug!(path = %self.path.display(), records = records.len(), "saved collection");
        Ok(())
    }

    /// True when the file is missing or holds zero bytes
    ///
    /// This is the bootstrap trigger: such a file has never been seeded.
    pub fn is_empty(&self) -> bool {
        fs::metadata(&self.path)
            .map(|meta| meta.len() == 0)
            .unwrap_or(true)
    }

    /// Path of the collection file
    pub fn path(&self) -> &Path {
        &self.path
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Directory holding the collection file
    fn dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Write `records` to `.<file>.<random>.tmp` in `dir`
    fn write_tmp(&self, dir: &Path, records: &[R]) -> Result<NamedTempFile> {
        let prefix = match self.path.file_name() {
            Some(name) => format!(".{}.", name.to_string_lossy()),
            None => String::from(".collection."),
        };
        let mut tmp = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(Self::TMP_SUFFIX)
            .tempfile_in(dir)?;

        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            let formatter = PrettyFormatter::with_indent(Self::INDENT);
            let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
            records.serialize(&mut serializer)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }

        if self.durability == Durability::Fsync {
            tmp.as_file().sync_all()?;
        }

        Ok(tmp)
    }
}
