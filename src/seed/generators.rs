//! Student and book generators

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use super::{RecordGenerator, SplitMix64};
use crate::record::{Book, Grade, Student};

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bruno", "Chloe", "Dmitri", "Elena", "Farid", "Grace", "Hiro", "Ines", "Jonas",
    "Kavya", "Liam", "Maya", "Nikolai", "Olivia", "Pablo", "Quinn", "Rosa", "Samir", "Tara",
    "Umar", "Vera", "Wes", "Ximena", "Yusuf", "Zoe",
];

const LAST_NAMES: &[&str] = &[
    "Anderson", "Baker", "Castillo", "Dubois", "Eriksen", "Fischer", "Garcia", "Hughes",
    "Ivanova", "Jensen", "Kowalski", "Lopez", "Moreau", "Nakamura", "Okafor", "Patel",
    "Quintero", "Rossi", "Schmidt", "Tanaka", "Ulrich", "Varga", "Walker", "Young", "Zhang",
];

const PHRASE_ADJECTIVES: &[&str] = &[
    "Adaptive", "Balanced", "Centralized", "Distributed", "Enhanced", "Focused", "Grass-roots",
    "Horizontal", "Integrated", "Multi-layered", "Networked", "Optimized", "Proactive",
    "Reactive", "Seamless", "Universal", "Versatile",
];

const PHRASE_DESCRIPTORS: &[&str] = &[
    "asynchronous", "bottom-line", "client-driven", "dynamic", "executive", "fault-tolerant",
    "global", "heuristic", "interactive", "local", "mission-critical", "modular", "real-time",
    "scalable", "tangible", "zero-defect",
];

const PHRASE_NOUNS: &[&str] = &[
    "algorithm", "architecture", "capability", "database", "encoding", "framework", "hierarchy",
    "initiative", "interface", "matrix", "middleware", "model", "paradigm", "protocol",
    "strategy", "toolset",
];

/// Earliest publication year the book generator produces
const EARLIEST_YEAR: i32 = 1970;

fn person_name(rng: &mut SplitMix64) -> String {
    format!("{} {}", rng.choose(FIRST_NAMES), rng.choose(LAST_NAMES))
}

// =============================================================================
// Students
// =============================================================================

/// Generates students with unique roll numbers from a fixed range
pub struct StudentGenerator {
    rng: SplitMix64,
    key_range: RangeInclusive<u32>,
}

impl StudentGenerator {
    pub fn new(key_range: RangeInclusive<u32>, seed: u64) -> Self {
        Self {
            rng: SplitMix64::new(seed),
            key_range,
        }
    }

    pub fn from_entropy(key_range: RangeInclusive<u32>) -> Self {
        Self {
            rng: SplitMix64::from_entropy(),
            key_range,
        }
    }

    /// Number of distinct keys the range can supply
    fn key_capacity(&self) -> u64 {
        let (lo, hi) = (*self.key_range.start(), *self.key_range.end());
        if lo > hi {
            0
        } else {
            u64::from(hi - lo) + 1
        }
    }

    /// Draw `count` distinct keys (count must not exceed capacity)
    fn distinct_keys(&mut self, count: usize) -> Vec<u32> {
        let (lo, hi) = (*self.key_range.start(), *self.key_range.end());

        // Dense request: shuffle the whole range and take a prefix
        if (count as u64) * 2 > self.key_capacity() {
            let mut all: Vec<u32> = (lo..=hi).collect();
            for i in 0..count {
                let j = i + self.rng.below((all.len() - i) as u64) as usize;
                all.swap(i, j);
            }
            all.truncate(count);
            return all;
        }

        // Sparse request: rejection sampling
        let mut seen = BTreeSet::new();
        let mut keys = Vec::with_capacity(count);
        while keys.len() < count {
            let key = self.rng.range_u32(lo, hi);
            if seen.insert(key) {
                keys.push(key);
            }
        }
        keys
    }
}

impl RecordGenerator<Student> for StudentGenerator {
    /// At most as many students as the key range has keys
    fn generate(&mut self, count: usize) -> Vec<Student> {
        let count = (count as u64).min(self.key_capacity()) as usize;
        self.distinct_keys(count)
            .into_iter()
            .map(|roll_number| {
                let name = person_name(&mut self.rng);
                let grade = *self.rng.choose(&Grade::ALL);
                Student::new(name, roll_number, grade)
            })
            .collect()
    }
}

// =============================================================================
// Books
// =============================================================================

/// Generates books with catch-phrase titles
pub struct BookGenerator {
    rng: SplitMix64,
    max_year: i32,
}

impl BookGenerator {
    pub fn new(max_year: i32, seed: u64) -> Self {
        Self {
            rng: SplitMix64::new(seed),
            max_year,
        }
    }

    pub fn from_entropy(max_year: i32) -> Self {
        Self {
            rng: SplitMix64::from_entropy(),
            max_year,
        }
    }

    fn catch_phrase(&mut self) -> String {
        format!(
            "{} {} {}",
            self.rng.choose(PHRASE_ADJECTIVES),
            self.rng.choose(PHRASE_DESCRIPTORS),
            self.rng.choose(PHRASE_NOUNS)
        )
    }

    fn year(&mut self) -> i32 {
        if self.max_year <= EARLIEST_YEAR {
            return self.max_year;
        }
        let span = (self.max_year - EARLIEST_YEAR) as u64 + 1;
        EARLIEST_YEAR + self.rng.below(span) as i32
    }
}

impl RecordGenerator<Book> for BookGenerator {
    fn generate(&mut self, count: usize) -> Vec<Book> {
        (0..count)
            .map(|_| {
                let title = self.catch_phrase();
                let author = person_name(&mut self.rng);
                let year = self.year();
                Book::new(title, author, year)
            })
            .collect()
    }
}
