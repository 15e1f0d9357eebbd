//! Student record and grade enumeration

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Keyed;

/// A student on the roster, keyed by roll number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Student {
    pub name: String,
    pub roll_number: u32,
    pub grade: Grade,
}

impl Student {
    pub fn new(name: impl Into<String>, roll_number: u32, grade: Grade) -> Self {
        Self {
            name: name.into(),
            roll_number,
            grade,
        }
    }
}

impl Keyed for Student {
    type Key = u32;

    fn key(&self) -> u32 {
        self.roll_number
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Roll Number: {}, Grade: {}",
            self.name, self.roll_number, self.grade
        )
    }
}

/// Letter grade, A (best) through F
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Grade {
    /// Every grade, best first
    pub const ALL: [Grade; 6] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::E, Grade::F];

    pub fn as_char(self) -> char {
        match self {
            Grade::A => 'A',
            Grade::B => 'B',
            Grade::C => 'C',
            Grade::D => 'D',
            Grade::E => 'E',
            Grade::F => 'F',
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Returned when text is not one of the six grade letters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid grade {0:?}: must be one of A, B, C, D, E, F")]
pub struct ParseGradeError(pub String);

impl FromStr for Grade {
    type Err = ParseGradeError;

    /// Case-insensitive; surrounding whitespace is ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Grade::A),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            "D" => Ok(Grade::D),
            "E" => Ok(Grade::E),
            "F" => Ok(Grade::F),
            _ => Err(ParseGradeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_parse_error_message() {
        let err = "G".parse::<Grade>().unwrap_err();
        assert_eq!(err, ParseGradeError("G".to_string()));
        assert_eq!(
            err.to_string(),
            "invalid grade \"G\": must be one of A, B, C, D, E, F"
        );
    }

    #[test]
    fn test_grade_parse_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new("x".parse::<Grade>().unwrap_err());
        assert!(err.source().is_none());
    }
}
