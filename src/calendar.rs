//! Holds the calendar selector shared by preferences, the engine and the command line.

use std::{convert::Infallible, fmt, str::FromStr};

/// The calendar a date is rendered in.
///
/// Persisted as a short code (see [`Self::code`]). Decoding never fails: anything that is not a
/// known code becomes [`CalendarKind::Gregorian`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CalendarKind {
    #[default]
    Gregorian,
    Jalali,
    Hijri,
}

impl CalendarKind {
    /// Every kind in declaration order.
    pub const ALL: [CalendarKind; 3] = [Self::Gregorian, Self::Jalali, Self::Hijri];

    /// The stored code of this kind.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Gregorian => "gregorian",
            Self::Jalali => "jalali",
            Self::Hijri => "hijri",
        }
    }

    /// Decode a stored code, falling back to [`CalendarKind::Gregorian`].
    ///
    /// Matching is exact (the store only ever writes [`Self::code`] values).
    pub fn from_code(code: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .unwrap_or_default()
    }
}

impl fmt::Display for CalendarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.code().fmt(f)
    }
}

impl FromStr for CalendarKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_code(s))
    }
}

impl From<&str> for CalendarKind {
    fn from(value: &str) -> Self {
        Self::from_code(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_known() {
        assert_eq!(CalendarKind::from_code("gregorian"), CalendarKind::Gregorian);
        assert_eq!(CalendarKind::from_code("jalali"), CalendarKind::Jalali);
        assert_eq!(CalendarKind::from_code("hijri"), CalendarKind::Hijri);
    }

    #[test]
    fn test_from_code_fallback() {
        assert_eq!(CalendarKind::from_code("bogus"), CalendarKind::Gregorian);
        assert_eq!(CalendarKind::from_code(""), CalendarKind::Gregorian);
        // stored codes are lowercase, anything else is treated as corrupt
        assert_eq!(CalendarKind::from_code("Jalali"), CalendarKind::Gregorian);
        assert_eq!(CalendarKind::from_code(" jalali"), CalendarKind::Gregorian);
    }

    #[test]
    fn test_code_round_trip() {
        for kind in CalendarKind::ALL {
            assert_eq!(CalendarKind::from_code(kind.code()), kind);
            assert_eq!(kind.to_string().parse::<CalendarKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_default_is_gregorian() {
        assert_eq!(CalendarKind::default(), CalendarKind::Gregorian);
    }
}
