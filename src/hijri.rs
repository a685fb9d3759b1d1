//! Hijri (Umm al-Qura) dates through the `hijri_date` tables, plus the Arabic names used to render
//! them and the Gregorian fallback.

use std::fmt;

use hijri_date::HijriDate;
use jiff::civil::{self, Weekday};
use tracing::trace;

use crate::error::{DateError, Result};

/// First Gregorian year the conversion tables cover.
pub const HIJRI_MIN_YEAR: i16 = 1938;

/// Last Gregorian year the conversion tables cover.
pub const HIJRI_MAX_YEAR: i16 = 2076;

/// Hijri month names in Arabic.
pub const HIJRI_MONTHS_AR: [&str; 12] = [
    "محرم",
    "صفر",
    "ربيع الأول",
    "ربيع الآخر",
    "جمادى الأولى",
    "جمادى الآخرة",
    "رجب",
    "شعبان",
    "رمضان",
    "شوال",
    "ذو القعدة",
    "ذو الحجة",
];

/// Sunday based weekdays in Arabic.
pub const WEEKDAYS_AR: [&str; 7] = [
    "الأحد",
    "الاثنين",
    "الثلاثاء",
    "الأربعاء",
    "الخميس",
    "الجمعة",
    "السبت",
];

/// Gregorian months as written in Arabic locales.
pub const GREGORIAN_MONTHS_AR: [&str; 12] = [
    "يناير",
    "فبراير",
    "مارس",
    "أبريل",
    "مايو",
    "يونيو",
    "يوليو",
    "أغسطس",
    "سبتمبر",
    "أكتوبر",
    "نوفمبر",
    "ديسمبر",
];

/// Era suffix of Hijri years ("after the Hijra").
pub const HIJRI_ERA: &str = "هـ";

/// Prefix shown when the Hijri calendar cannot be rendered ("Hijri (needs configuration)").
pub const FALLBACK_NOTICE: &str = "هجری (نیاز به تنظیمات):";

/// A Hijri date paired with the weekday of the Gregorian day it was converted from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HijriYmd {
    pub year: i32,
    pub month: i8,
    pub day: i8,
    pub weekday: Weekday,
}

impl HijriYmd {
    pub fn month_name(&self) -> &'static str {
        name_of(&HIJRI_MONTHS_AR, self.month)
    }

    pub fn weekday_name(&self) -> &'static str {
        arabic_weekday_name(self.weekday)
    }
}

impl fmt::Display for HijriYmd {
    /// `<weekday>، <day> <month> <year> هـ`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}، {} {} {} {}",
            self.weekday_name(),
            self.day,
            self.month_name(),
            self.year,
            HIJRI_ERA,
        )
    }
}

/// Convert with the Umm al-Qura tables, failing outside [`HIJRI_MIN_YEAR`]..=[`HIJRI_MAX_YEAR`].
pub fn to_hijri(date: civil::Date) -> Result<HijriYmd> {
    let year = date.year();
    if !(HIJRI_MIN_YEAR..=HIJRI_MAX_YEAR).contains(&year) {
        return Err(DateError::HijriOutOfRange(year));
    }

    // the range check above keeps every field positive
    let hijri = HijriDate::from_gr(year as usize, date.month() as usize, date.day() as usize)
        .map_err(|e| DateError::HijriConversion(e.to_string()))?;

    let converted = HijriYmd {
        year: hijri.year() as i32,
        month: hijri.month() as i8,
        day: hijri.day() as i8,
        weekday: date.weekday(),
    };
    trace!(%date, ?converted, "converted Gregorian to Hijri");
    Ok(converted)
}

/// The Arabic name of a weekday.
pub fn arabic_weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAYS_AR[weekday.to_sunday_zero_offset() as usize]
}

/// The Arabic name of a Gregorian month (1..=12), else `""`.
pub fn arabic_gregorian_month_name(month: i8) -> &'static str {
    name_of(&GREGORIAN_MONTHS_AR, month)
}

/// The Gregorian date in Arabic month names behind the [`FALLBACK_NOTICE`].
pub fn fallback(date: civil::Date) -> String {
    format!(
        "{} {} {} {}",
        FALLBACK_NOTICE,
        date.day(),
        arabic_gregorian_month_name(date.month()),
        date.year(),
    )
}

fn name_of(table: &[&'static str; 12], month: i8) -> &'static str {
    usize::try_from(month)
        .ok()
        .and_then(|m| m.checked_sub(1))
        .and_then(|i| table.get(i))
        .copied()
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_to_hijri_known_dates() {
        // 1 Ramadan 1445
        let ramadan = to_hijri(date(2024, 3, 11)).unwrap();
        assert_eq!((ramadan.year, ramadan.month, ramadan.day), (1445, 9, 1));
        assert_eq!(ramadan.month_name(), "رمضان");
        assert_eq!(ramadan.weekday_name(), "الاثنين");

        // 10 Dhu al-Hijjah 1446
        let eid = to_hijri(date(2025, 6, 6)).unwrap();
        assert_eq!((eid.year, eid.month, eid.day), (1446, 12, 10));
    }

    #[test]
    fn test_to_hijri_out_of_range() {
        assert!(matches!(
            to_hijri(date(1900, 1, 1)),
            Err(DateError::HijriOutOfRange(1900))
        ));
        assert!(matches!(
            to_hijri(date(2100, 1, 1)),
            Err(DateError::HijriOutOfRange(2100))
        ));
        assert!(to_hijri(date(-500, 1, 1)).is_err());
    }

    #[test]
    fn test_display() {
        let hijri = HijriYmd {
            year: 1446,
            month: 12,
            day: 7,
            weekday: Weekday::Tuesday,
        };
        assert_eq!(hijri.to_string(), "الثلاثاء، 7 ذو الحجة 1446 هـ");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(
            fallback(date(1900, 6, 3)),
            "هجری (نیاز به تنظیمات): 3 يونيو 1900"
        );
    }

    #[test]
    fn test_names_out_of_range() {
        assert_eq!(arabic_gregorian_month_name(0), "");
        assert_eq!(arabic_gregorian_month_name(13), "");
        assert_eq!(arabic_gregorian_month_name(1), "يناير");
        assert_eq!(arabic_weekday_name(Weekday::Saturday), "السبت");
    }
}
