//! The date engine: renders millisecond timestamps in the selected calendar.
//!
//! Every operation here is total. Failures inside a calendar backend degrade to a readable
//! string; the `try_*` variants expose the underlying [`DateError`] for callers that care.

use jiff::{Timestamp, Zoned, fmt::strtime, tz::TimeZone};
use tracing::{debug, warn};

use crate::{
    calendar::CalendarKind,
    error::{DateError, Result},
    hijri,
    jalali::JalaliDate,
    locale::Locale,
};

/// Stateless formatter bound to one time zone.
///
/// Cheap to clone and safe to share between threads; it owns nothing mutable.
#[derive(Clone, Debug, PartialEq)]
pub struct DateEngine {
    time_zone: TimeZone,
}

impl DateEngine {
    /// Long Gregorian form, e.g. `Tuesday, 3 June 2025`.
    pub const DISPLAY_FORMAT: &str = "%A, %-d %B %Y";

    /// Locale independent Gregorian form for records.
    pub const STORAGE_FORMAT: &str = "%Y/%m/%d";

    pub fn new(time_zone: TimeZone) -> Self {
        Self { time_zone }
    }

    /// An engine in the system time zone (UTC if it cannot be determined).
    pub fn system() -> Self {
        Self::new(TimeZone::system())
    }

    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    /// The local time of a Unix millisecond timestamp.
    ///
    /// Values beyond what `jiff` can represent (roughly ±9999 years) saturate to its limits.
    pub fn zoned(&self, timestamp: i64) -> Zoned {
        Timestamp::from_millisecond(timestamp)
            .unwrap_or_else(|_| {
                debug!(timestamp, "timestamp out of range, saturating");
                if timestamp < 0 {
                    Timestamp::MIN
                } else {
                    Timestamp::MAX
                }
            })
            .to_zoned(self.time_zone.clone())
    }

    /// The calendar actually shown: Persian locales see Jalali where Gregorian was asked for.
    pub fn effective_kind(kind: CalendarKind, locale: &Locale) -> CalendarKind {
        if kind == CalendarKind::Gregorian && locale.is_persian() {
            debug!(locale = %locale, "Persian locale, showing Jalali instead of Gregorian");
            CalendarKind::Jalali
        } else {
            kind
        }
    }

    /// A long, human readable date in the effective calendar of `kind` under `locale`.
    pub fn format_for_display(&self, timestamp: i64, kind: CalendarKind, locale: &Locale) -> String {
        let zoned = self.zoned(timestamp);
        match Self::effective_kind(kind, locale) {
            CalendarKind::Gregorian => Self::gregorian(&zoned, Self::DISPLAY_FORMAT),
            CalendarKind::Jalali => JalaliDate::from(zoned.date()).to_string(),
            CalendarKind::Hijri => Self::hijri(&zoned).unwrap_or_else(|e| {
                warn!(error = %e, "Hijri formatting unavailable, using Gregorian fallback");
                hijri::fallback(zoned.date())
            }),
        }
    }

    /// A compact `year/MM/DD` string to keep beside a record.
    ///
    /// Unlike [`Self::format_for_display`] this honors `kind` literally, whatever the locale.
    pub fn format_for_storage(&self, timestamp: i64, kind: CalendarKind) -> String {
        let zoned = self.zoned(timestamp);
        match kind {
            CalendarKind::Jalali => JalaliDate::from(zoned.date()).to_storage_string(),
            CalendarKind::Gregorian | CalendarKind::Hijri => {
                Self::gregorian(&zoned, Self::STORAGE_FORMAT)
            }
        }
    }

    /// Local `HH:mm` of the timestamp, regardless of calendar.
    pub fn current_time_string(&self, timestamp: i64) -> String {
        let zoned = self.zoned(timestamp);
        format!("{:02}:{:02}", zoned.hour(), zoned.minute())
    }

    /// The Jalali date of the timestamp with its Persian names.
    pub fn jalali_date(&self, timestamp: i64) -> JalaliDate {
        JalaliDate::from(self.zoned(timestamp).date())
    }

    /// The Hijri display string, or why it cannot be produced.
    pub fn try_format_hijri(&self, timestamp: i64) -> Result<String> {
        Self::hijri(&self.zoned(timestamp))
    }

    /// Format with `jiff`, reporting failures instead of hiding them.
    pub fn try_format_gregorian(&self, timestamp: i64, format: &str) -> Result<String> {
        Ok(strtime::format(format, &self.zoned(timestamp))?)
    }

    fn hijri(zoned: &Zoned) -> Result<String, DateError> {
        hijri::to_hijri(zoned.date()).map(|date| date.to_string())
    }

    fn gregorian(zoned: &Zoned, format: &str) -> String {
        strtime::format(format, zoned).unwrap_or_else(|e| {
            warn!(error = %e, format, "cannot format Gregorian date, using ISO 8601");
            zoned.date().to_string()
        })
    }
}

impl Default for DateEngine {
    fn default() -> Self {
        Self::system()
    }
}
