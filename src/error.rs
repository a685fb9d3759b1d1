//! Errors that only the fallible `try_*` entry points report.
//!
//! The display, storage and time operations never fail; they degrade to a readable string.

use thiserror::Error;

/// Failures while producing a calendar string.
#[derive(Debug, Error)]
pub enum DateError {
    /// The Umm al-Qura tables do not cover this Gregorian year.
    #[error("no Hijri conversion table for Gregorian year {0}")]
    HijriOutOfRange(i16),

    /// The Hijri backend rejected the date.
    #[error("Hijri conversion failed: {0}")]
    HijriConversion(String),

    /// `jiff` could not format the instant.
    #[error("cannot format date: {0}")]
    Format(#[from] jiff::Error),
}

/// The default result of this crate.
pub type Result<T, E = DateError> = std::result::Result<T, E>;
