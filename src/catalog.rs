//! Catalog Module
//!
//! Book catalog: an unordered, append-only list searched by linear scan.
//!
//! Unlike the roster there is no key and no uniqueness rule. Two books may
//! share a title (or even title and author); a title search returns every
//! match. The catalog therefore keeps its own store and never goes through
//! `SortedIndex`.

use std::path::Path;

use parking_lot::Mutex;
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::record::Book;
use crate::seed::RecordGenerator;
use crate::storage::PersistenceGateway;

/// Book catalog backed by one JSON file
pub struct Catalog {
    /// Catalog configuration
    config: Config,

    /// The catalog file
    gateway: PersistenceGateway<Book>,

    /// Serializes load-append-save cycles within this process
    write_lock: Mutex<()>,
}

impl Catalog {
    /// Open a catalog using `config.catalog_path()`
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;
        let gateway = PersistenceGateway::open(config.catalog_path(), config.durability);

        Ok(Self {
            config,
            gateway,
            write_lock: Mutex::new(()),
        })
    }

    /// Append a book and save
    pub fn add(&self, title: &str, author: &str, publication_year: i32) -> Result<Book> {
        let _write_guard = self.write_lock.lock();

        let mut books = self.gateway.load()?;
        let book = Book::new(title, author, publication_year);
        books.push(book.clone());
        self.gateway.save(&books)?;

        info!(title, author, total = books.len(), "book added");
        Ok(book)
    }

    /// All books in insertion order
    pub fn list(&self) -> Result<Vec<Book>> {
        self.gateway.load()
    }

    /// Every book whose title equals `title`, ignoring case
    pub fn search_by_title(&self, title: &str) -> Result<Vec<Book>> {
        let wanted = title.to_lowercase();
        Ok(self
            .gateway
            .load()?
            .into_iter()
            .filter(|b| b.title.to_lowercase() == wanted)
            .collect())
    }

    /// First book matching both title and author, ignoring case
    pub fn find_exact(&self, title: &str, author: &str) -> Result<Option<Book>> {
        let (title, author) = (title.to_lowercase(), author.to_lowercase());
        Ok(self
            .gateway
            .load()?
            .into_iter()
            .find(|b| b.title.to_lowercase() == title && b.author.to_lowercase() == author))
    }

    /// Replace the catalog with `count` generated books
    pub fn seed<G>(&self, generator: &mut G, count: usize) -> Result<usize>
    where
        G: RecordGenerator<Book>,
    {
        let _write_guard = self.write_lock.lock();
        self.seed_internal(generator, count)
    }

    /// Seed only if the catalog file is missing or empty
    pub fn bootstrap<G>(&self, generator: &mut G, count: usize) -> Result<bool>
    where
        G: RecordGenerator<Book>,
    {
        let _write_guard = self.write_lock.lock();

        if !self.gateway.is_empty() {
            return Ok(false);
        }

        info!(path = %self.gateway.path().display(), "catalog file empty, bootstrapping");
        self.seed_internal(generator, count)?;
        Ok(true)
    }

    fn seed_internal<G>(&self, generator: &mut G, count: usize) -> Result<usize>
    where
        G: RecordGenerator<Book>,
    {
        let books = generator.generate(count);
        self.gateway.save(&books)?;
        info!(books = books.len(), "catalog seeded");
        Ok(books.len())
    }

    /// Path of the catalog file
    pub fn path(&self) -> &Path {
        self.gateway.path()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
