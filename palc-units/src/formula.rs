//! One-directional conversion formulas
//!
//! Every kitchen conversion is affine: `to = from * factor + offset`.
//! Proportional units (oz -> gm) have no offset; temperatures do. Keeping
//! the shape explicit makes the inverse exact instead of guessed.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Affine conversion `x * factor + offset`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Formula {
    pub factor: f64,
    #[serde(default)]
    pub offset: f64,
}

impl Formula {
    /// Proportional conversion with no offset
    pub const fn scale(factor: f64) -> Self {
        Self { factor, offset: 0.0 }
    }

    /// Conversion with offset (temperatures)
    pub const fn affine(factor: f64, offset: f64) -> Self {
        Self { factor, offset }
    }

    pub const fn identity() -> Self {
        Self::scale(1.0)
    }

    /// Convert a value
    pub fn apply(&self, x: f64) -> f64 {
        x * self.factor + self.offset
    }

    /// The formula going the other way: `(y - offset) / factor`
    pub fn inverse(&self) -> Result<Formula, ConversionError> {
        if self.factor == 0.0 || !self.factor.is_finite() {
            return Err(ConversionError::NotInvertible(self.to_string()));
        }
        Ok(Formula {
            factor: 1.0 / self.factor,
            offset: -self.offset / self.factor,
        })
    }

    /// Apply `self`, then `next`
    pub fn then(&self, next: &Formula) -> Formula {
        Formula {
            factor: self.factor * next.factor,
            offset: self.offset * next.factor + next.offset,
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.offset == 0.0 {
            write!(f, "x * {}", self.factor)
        } else if self.offset < 0.0 {
            write!(f, "x * {} - {}", self.factor, -self.offset)
        } else {
            write!(f, "x * {} + {}", self.factor, self.offset)
        }
    }
}

/// Errors that can occur while building conversions
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Unit name not known to the table
    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    /// Formula key is not of the form "from_to"
    #[error("invalid formula key: {0}")]
    InvalidKey(String),

    /// Formula has no inverse (zero factor)
    #[error("formula cannot be inverted: {0}")]
    NotInvertible(String),
}

impl From<ConversionError> for palc_core::PalcError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::UnknownUnit(name) => palc_core::PalcError::unknown_unit(&name),
            other => palc_core::PalcError::invalid_formula(other.to_string()),
        }
    }
}
