//! Collaborator seams around the engine and a presenter that ties them together.
//!
//! The preference store, locale and clock live outside this crate. The traits here are the
//! contract the engine's callers rely on; the small implementations back tests and the CLI.

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use jiff::Timestamp;
use tracing::debug;

use crate::{
    calendar::CalendarKind,
    engine::DateEngine,
    locale::{Language, Locale},
};

/// Preference key of the selected calendar.
pub const CALENDAR_KEY: &str = "calendar_type";

/// Preference key of the selected language.
pub const LANGUAGE_KEY: &str = "language";

/// Where the selected calendar is kept.
pub trait CalendarPreferences {
    /// The stored calendar, [`CalendarKind::Gregorian`] when missing or unreadable.
    fn calendar_kind(&self) -> CalendarKind;

    fn save_calendar_kind(&self, kind: CalendarKind);
}

impl<T: CalendarPreferences + ?Sized> CalendarPreferences for Arc<T> {
    fn calendar_kind(&self) -> CalendarKind {
        (**self).calendar_kind()
    }

    fn save_calendar_kind(&self, kind: CalendarKind) {
        (**self).save_calendar_kind(kind)
    }
}

/// Supplies the active UI locale.
pub trait LocaleProvider {
    fn locale(&self) -> Locale;
}

/// Supplies the current time in Unix milliseconds.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// A thread safe in-memory settings store keeping raw string codes like a key-value store would.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw stored value of a key.
    pub fn get(&self, key: &str) -> Option<String> {
        // a writer panicking mid-insert leaves the map intact, so poisoning is harmless here
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        values.get(key).cloned()
    }

    /// Store a raw value, bypassing any encoding.
    pub fn set(&self, key: &str, value: impl Into<String>) {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_owned(), value.into());
    }

    /// The stored language, [`Language::English`] when missing or unreadable.
    pub fn language(&self) -> Language {
        self.get(LANGUAGE_KEY)
            .map(|code| Language::from_code(&code))
            .unwrap_or_default()
    }

    pub fn save_language(&self, language: Language) {
        self.set(LANGUAGE_KEY, language.code());
    }
}

impl CalendarPreferences for MemoryPreferences {
    fn calendar_kind(&self) -> CalendarKind {
        self.get(CALENDAR_KEY)
            .map(|code| CalendarKind::from_code(&code))
            .unwrap_or_default()
    }

    fn save_calendar_kind(&self, kind: CalendarKind) {
        self.set(CALENDAR_KEY, kind.code());
    }
}

/// The UI language chosen in the preferences drives the locale.
impl LocaleProvider for MemoryPreferences {
    fn locale(&self) -> Locale {
        self.language().into()
    }
}

/// A locale fixed at construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticLocale(pub Locale);

impl LocaleProvider for StaticLocale {
    fn locale(&self) -> Locale {
        self.0.clone()
    }
}

/// The locale of the process environment, read on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvLocale;

impl LocaleProvider for EnvLocale {
    fn locale(&self) -> Locale {
        Locale::from_env()
    }
}

/// The wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Timestamp::now().as_millisecond()
    }
}

/// A clock stuck at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// Presents dates according to the stored calendar preference and the active locale.
///
/// Reads the collaborators on every call so a changed preference shows up immediately.
#[derive(Debug)]
pub struct DateService<P, L, C> {
    engine: DateEngine,
    preferences: P,
    locale: L,
    clock: C,
}

impl<P, L, C> DateService<P, L, C>
where
    P: CalendarPreferences,
    L: LocaleProvider,
    C: Clock,
{
    pub fn new(engine: DateEngine, preferences: P, locale: L, clock: C) -> Self {
        Self {
            engine,
            preferences,
            locale,
            clock,
        }
    }

    pub fn engine(&self) -> &DateEngine {
        &self.engine
    }

    pub fn preferences(&self) -> &P {
        &self.preferences
    }

    /// The stored calendar (before any locale override).
    pub fn active_calendar(&self) -> CalendarKind {
        self.preferences.calendar_kind()
    }

    pub fn set_calendar(&self, kind: CalendarKind) {
        debug!(%kind, "saving calendar preference");
        self.preferences.save_calendar_kind(kind);
    }

    /// Today in display form.
    pub fn today(&self) -> String {
        self.engine.format_for_display(
            self.clock.now_millis(),
            self.active_calendar(),
            &self.locale.locale(),
        )
    }

    /// Today in storage form.
    pub fn today_for_storage(&self) -> String {
        self.engine
            .format_for_storage(self.clock.now_millis(), self.active_calendar())
    }

    /// The current `HH:mm`.
    pub fn current_time(&self) -> String {
        self.engine.current_time_string(self.clock.now_millis())
    }

    /// The display date of a record, `""` when the record has no usable timestamp.
    pub fn formatted_date(&self, timestamp: Option<i64>) -> String {
        match timestamp {
            Some(ts) if ts > 0 => {
                self.engine
                    .format_for_display(ts, self.active_calendar(), &self.locale.locale())
            }
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, tz::TimeZone};

    use super::*;

    /// 2025-06-03T10:30:00Z
    const NOW: i64 = 1_748_946_600_000;

    fn service(locale: &str) -> DateService<MemoryPreferences, StaticLocale, FixedClock> {
        DateService::new(
            DateEngine::new(TimeZone::UTC),
            MemoryPreferences::new(),
            StaticLocale(Locale::new(locale)),
            FixedClock(NOW),
        )
    }

    #[test]
    fn test_now_constant() {
        let expected = date(2025, 6, 3).at(10, 30, 0, 0).to_zoned(TimeZone::UTC).unwrap();
        assert_eq!(expected.timestamp().as_millisecond(), NOW);
    }

    #[test]
    fn test_missing_preference_is_gregorian() {
        let service = service("en");
        assert_eq!(service.active_calendar(), CalendarKind::Gregorian);
        assert_eq!(service.today(), "Tuesday, 3 June 2025");
        assert_eq!(service.today_for_storage(), "2025/06/03");
        assert_eq!(service.current_time(), "10:30");
    }

    #[test]
    fn test_corrupt_preference_is_gregorian() {
        let service = service("en");
        service.preferences().set(CALENDAR_KEY, "persian??");
        assert_eq!(service.active_calendar(), CalendarKind::Gregorian);
    }

    #[test]
    fn test_saved_calendar_takes_effect() {
        let service = service("en");
        service.set_calendar(CalendarKind::Jalali);
        assert_eq!(
            service.preferences().get(CALENDAR_KEY).as_deref(),
            Some("jalali")
        );
        assert_eq!(service.today(), "سه\u{200c}شنبه 13 خرداد 1404");
        assert_eq!(service.today_for_storage(), "1404/03/13");
    }

    #[test]
    fn test_persian_locale_display_only() {
        let service = service("fa_IR.UTF-8");
        assert_eq!(service.active_calendar(), CalendarKind::Gregorian);
        assert_eq!(service.today(), "سه\u{200c}شنبه 13 خرداد 1404");
        // storage keeps the stored calendar
        assert_eq!(service.today_for_storage(), "2025/06/03");
    }

    #[test]
    fn test_formatted_date() {
        let service = service("en");
        assert_eq!(service.formatted_date(None), "");
        assert_eq!(service.formatted_date(Some(0)), "");
        assert_eq!(service.formatted_date(Some(-5)), "");
        assert_eq!(service.formatted_date(Some(NOW)), "Tuesday, 3 June 2025");
    }

    #[test]
    fn test_language_drives_locale() {
        let preferences = Arc::new(MemoryPreferences::new());
        assert_eq!(preferences.locale(), Locale::new("en"));

        preferences.save_language(Language::Persian);
        assert_eq!(preferences.language(), Language::Persian);

        let service = DateService::new(
            DateEngine::new(TimeZone::UTC),
            Arc::clone(&preferences),
            StaticLocale(preferences.locale()),
            FixedClock(NOW),
        );
        assert_eq!(service.today(), "سه\u{200c}شنبه 13 خرداد 1404");

        preferences.set(LANGUAGE_KEY, "klingon");
        assert_eq!(preferences.language(), Language::English);
    }

    #[test]
    fn test_shared_between_threads() {
        let preferences = Arc::new(MemoryPreferences::new());
        std::thread::scope(|scope| {
            for kind in CalendarKind::ALL {
                let preferences = Arc::clone(&preferences);
                scope.spawn(move || preferences.save_calendar_kind(kind));
            }
        });
        assert!(CalendarKind::ALL.contains(&preferences.calendar_kind()));
    }
}
