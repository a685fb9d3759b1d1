//! Date engine for a local-first notes and checklists app.
//!
//! Converts millisecond timestamps into display and storage strings in the Gregorian, Jalali
//! (Persian solar Hijri) and Hijri (Islamic lunar) calendars. The engine holds no mutable state;
//! the time zone is fixed at construction and the locale is handed in per call.
pub mod calendar;
pub mod engine;
pub mod error;
pub mod hijri;
pub mod jalali;
pub mod locale;
pub mod service;

pub use calendar::CalendarKind;
pub use engine::DateEngine;
pub use error::{DateError, Result};
pub use locale::{Language, Locale};
