//! Gregorian to Jalali conversion with integer arithmetic and the Persian name tables.
//!
//! The conversion counts days from a 1600 Gregorian reference, shifts them onto the Jalali
//! epoch and peels off 33 year cycles, 4 year blocks and finally months. It needs no calendar
//! library and is total: every input lands on a month in `1..=12` and a day in `1..=31`.

use std::fmt;

use jiff::civil::{self, Weekday};
use tracing::trace;

/// Persian weekday names, Saturday first as the Persian week starts.
pub const PERSIAN_WEEKDAYS: [&str; 7] = [
    "شنبه",
    "یکشنبه",
    "دوشنبه",
    "سه\u{200c}شنبه",
    "چهارشنبه",
    "پنجشنبه",
    "جمعه",
];

/// Jalali month names in Persian.
// Farvardin .. Esfand
pub const JALALI_MONTHS_FA: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

const GREGORIAN_DAYS_IN_MONTH: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

const JALALI_DAYS_IN_MONTH: [i64; 12] = [31, 31, 31, 31, 31, 31, 30, 30, 30, 30, 30, 29];

/// Gregorian year the day count starts from.
const GREGORIAN_REFERENCE_YEAR: i64 = 1600;

/// Jalali year that starts [`EPOCH_OFFSET_DAYS`] after the Gregorian reference.
const JALALI_REFERENCE_YEAR: i64 = 979;

/// Days between 1600-01-01 and 979-01-01 (Jalali).
const EPOCH_OFFSET_DAYS: i64 = 79;

/// Days in one 33 year Jalali cycle (8 leap years).
const CYCLE_DAYS: i64 = 12053;

const CYCLE_YEARS: i64 = 33;

/// Days in a 4 year block with one leap year.
const BLOCK_DAYS: i64 = 1461;

/// A Jalali year, month (1..=12) and day (1..=31).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JalaliYmd {
    pub year: i32,
    pub month: i8,
    pub day: i8,
}

impl JalaliYmd {
    /// `year/MM/DD` with zero padded month and day.
    pub fn to_storage_string(&self) -> String {
        format!("{}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

impl From<civil::Date> for JalaliYmd {
    fn from(value: civil::Date) -> Self {
        gregorian_to_jalali(value.year().into(), value.month(), value.day())
    }
}

/// Proleptic Gregorian leap year rule.
pub const fn is_gregorian_leap(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Convert a Gregorian date to Jalali.
///
/// `gm` is clamped to `1..=12` and `gd` to `1..=31`. Floor division keeps dates before the 1600
/// reference inside valid month and day ranges, though such results are only approximations.
pub fn gregorian_to_jalali(gy: i32, gm: i8, gd: i8) -> JalaliYmd {
    let gy = i64::from(gy);
    let gm = usize::from(gm.clamp(1, 12).unsigned_abs());
    let gd = i64::from(gd.clamp(1, 31));

    // days since 1600-01-01
    let gy2 = gy - GREGORIAN_REFERENCE_YEAR;
    let mut g_day_no = 365 * gy2 + (gy2 + 3).div_euclid(4) - (gy2 + 99).div_euclid(100)
        + (gy2 + 399).div_euclid(400);
    g_day_no += GREGORIAN_DAYS_IN_MONTH[..gm - 1].iter().sum::<i64>();
    if gm > 2 && is_gregorian_leap(gy) {
        g_day_no += 1;
    }
    g_day_no += gd - 1;

    let mut j_day_no = g_day_no - EPOCH_OFFSET_DAYS;
    let cycles = j_day_no.div_euclid(CYCLE_DAYS);
    j_day_no = j_day_no.rem_euclid(CYCLE_DAYS);

    let mut jy = JALALI_REFERENCE_YEAR + CYCLE_YEARS * cycles + 4 * (j_day_no / BLOCK_DAYS);
    j_day_no %= BLOCK_DAYS;

    // the first year of a block is the leap one
    if j_day_no >= 366 {
        jy += (j_day_no - 1) / 365;
        j_day_no = (j_day_no - 1) % 365;
    }

    let mut month = 0;
    while month < 11 && j_day_no >= JALALI_DAYS_IN_MONTH[month] {
        j_day_no -= JALALI_DAYS_IN_MONTH[month];
        month += 1;
    }

    let result = JalaliYmd {
        // jiff years fit comfortably, the clamp only guards direct callers with extreme input
        year: jy.clamp(i32::MIN.into(), i32::MAX.into()) as i32,
        month: month as i8 + 1,
        day: j_day_no as i8 + 1,
    };
    trace!(gy, gm, gd, ?result, "converted Gregorian to Jalali");
    result
}

/// The Persian name of a weekday.
pub const fn persian_weekday_name(weekday: Weekday) -> &'static str {
    PERSIAN_WEEKDAYS[match weekday {
        Weekday::Saturday => 0,
        Weekday::Sunday => 1,
        Weekday::Monday => 2,
        Weekday::Tuesday => 3,
        Weekday::Wednesday => 4,
        Weekday::Thursday => 5,
        Weekday::Friday => 6,
    }]
}

/// The Persian name of a weekday numbered 1 (Sunday) to 7 (Saturday), else `""`.
pub fn weekday_name_sunday_one(weekday: i8) -> &'static str {
    Weekday::from_sunday_one_offset(weekday)
        .map(persian_weekday_name)
        .unwrap_or("")
}

/// The Persian name of a Jalali month (1..=12), else `""`.
pub fn jalali_month_name(month: i8) -> &'static str {
    usize::try_from(month)
        .ok()
        .and_then(|m| m.checked_sub(1))
        .and_then(|i| JALALI_MONTHS_FA.get(i))
        .copied()
        .unwrap_or("")
}

/// A converted date with its Persian names, recomputed on every call and never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JalaliDate {
    pub year: i32,
    pub month: i8,
    pub day: i8,
    pub weekday_name: &'static str,
    pub month_name: &'static str,
}

impl JalaliDate {
    /// Year, month and day without the names.
    pub fn ymd(&self) -> JalaliYmd {
        JalaliYmd {
            year: self.year,
            month: self.month,
            day: self.day,
        }
    }

    /// See [`JalaliYmd::to_storage_string`].
    pub fn to_storage_string(&self) -> String {
        self.ymd().to_storage_string()
    }
}

impl From<civil::Date> for JalaliDate {
    fn from(value: civil::Date) -> Self {
        let JalaliYmd { year, month, day } = value.into();
        Self {
            year,
            month,
            day,
            weekday_name: persian_weekday_name(value.weekday()),
            month_name: jalali_month_name(month),
        }
    }
}

impl fmt::Display for JalaliDate {
    /// `<weekday> <day> <month> <year>` as in `سه‌شنبه 13 خرداد 1404`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.weekday_name, self.day, self.month_name, self.year
        )
    }
}
