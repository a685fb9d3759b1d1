use clap::{
    Arg, ArgAction, ArgMatches, Command, CommandFactory, FromArgMatches, command,
    error::ErrorKind,
};
use jiff::{Timestamp, civil, tz::TimeZone};

use notecal::{CalendarKind, Locale};

use crate::clap_helper::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum When {
    /// Delay the value as far as possible.
    Now,
    /// The given Unix timestamp in milliseconds.
    Given(i64),
}

/// Which of the engine's strings to print.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Output {
    /// The long, localized date.
    #[default]
    Display,
    /// The compact `year/MM/DD` form.
    Storage,
    /// `HH:mm` only.
    Time,
}

#[derive(Debug, PartialEq)]
pub struct Args {
    pub calendar: CalendarKind,
    pub locale: Locale,
    pub timezone: TimeZone,
    pub when: When,
    pub output: Output,
    pub debug: bool,
}

impl Args {
    pub const CALENDAR_LONG: &str = "calendar";
    pub const CALENDAR_PAIRS: StaticMap<CalendarKind> = StaticMap(&[
        (CalendarKind::Gregorian.code(), CalendarKind::Gregorian),
        (CalendarKind::Jalali.code(), CalendarKind::Jalali),
        (CalendarKind::Hijri.code(), CalendarKind::Hijri),
    ]);
    pub const LOCALE_LONG: &str = "locale";
    pub const UTC_LONG: &str = "utc";
    pub const DATE_LONG: &str = "date";
    pub const STORAGE_LONG: &str = "storage";
    pub const TIME_LONG: &str = "time";
    pub const DEBUG_LONG: &str = "debug";

    pub const OUTPUT_ARGS: &[&str] = &[Self::STORAGE_LONG, Self::TIME_LONG];

    pub fn args() -> [Arg; 7] {
        [
            Arg::new(Self::CALENDAR_LONG)
                .long(Self::CALENDAR_LONG)
                .short('c')
                .value_name("CALENDAR")
                .ignore_case(true)
                .overrides_with(Self::CALENDAR_LONG)
                .help("calendar to print the date in")
                .value_parser(Self::CALENDAR_PAIRS),
            Arg::new(Self::LOCALE_LONG)
                .long(Self::LOCALE_LONG)
                .short('l')
                .value_name("TAG")
                .help("as if the UI language is the given tag (e.g. `fa-IR`) [default: from LC_ALL, LC_MESSAGES or LANG]"),
            Arg::new(Self::UTC_LONG)
                .long(Self::UTC_LONG)
                .short('u')
                .visible_alias("universal")
                .help("as if timezone is Coordinated Universal Time (UTC)")
                .action(ArgAction::SetTrue),
            Arg::new(Self::DATE_LONG)
                .long(Self::DATE_LONG)
                .short('d')
                .value_name("WHEN")
                .allow_negative_numbers(true)
                .overrides_with(Self::DATE_LONG)
                .help("Unix milliseconds, an RFC 3339 timestamp or a local `YYYY-MM-DD[THH:MM]` instead of now"),
            Arg::new(Self::STORAGE_LONG)
                .long(Self::STORAGE_LONG)
                .short('s')
                .overrides_with_all(Self::OUTPUT_ARGS)
                .help("print the compact form saved beside records")
                .action(ArgAction::SetTrue),
            Arg::new(Self::TIME_LONG)
                .long(Self::TIME_LONG)
                .short('t')
                .overrides_with_all(Self::OUTPUT_ARGS)
                .help("print the local time as `HH:mm`")
                .action(ArgAction::SetTrue),
            Arg::new(Self::DEBUG_LONG)
                .long(Self::DEBUG_LONG)
                .help("enable debug logs in STDERR")
                .action(ArgAction::SetTrue),
        ]
    }

    /// Read a point in time: milliseconds, a zoned timestamp or a civil date and time in `tz`.
    pub fn parse_when(s: &str, tz: &TimeZone) -> Result<i64, jiff::Error> {
        let s = s.trim();
        if let Ok(millis) = s.parse::<i64>() {
            return Ok(millis);
        }
        if let Ok(timestamp) = s.parse::<Timestamp>() {
            return Ok(timestamp.as_millisecond());
        }
        let datetime = match s.parse::<civil::DateTime>() {
            Ok(v) => v,
            Err(_) => s.parse::<civil::Date>()?.to_datetime(civil::Time::midnight()),
        };
        Ok(datetime.to_zoned(tz.clone())?.timestamp().as_millisecond())
    }
}

impl CommandFactory for Args {
    fn command() -> Command {
        command!(/* with version, about and author */)
            .after_help(
                "A Persian locale prints Jalali dates where Gregorian is selected, except with\n\
                 --storage which always follows --calendar.",
            )
            .args(Self::args())
    }

    fn command_for_update() -> Command {
        Self::command()
    }
}

impl Default for Args {
    fn default() -> Self {
        Self {
            calendar: CalendarKind::default(),
            locale: Locale::from_env(),
            timezone: TimeZone::system(),
            when: When::Now,
            output: Output::default(),
            debug: false,
        }
    }
}

impl FromArgMatches for Args {
    fn from_arg_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let mut v = Self::default();
        v.update_from_arg_matches(matches)?;
        Ok(v)
    }

    fn update_from_arg_matches(&mut self, matches: &ArgMatches) -> Result<(), clap::Error> {
        if matches.get_flag(Self::UTC_LONG) {
            self.timezone = TimeZone::UTC;
        }

        self.debug = self.debug || matches.get_flag(Self::DEBUG_LONG);

        if let Some(v) = matches.get_one::<CalendarKind>(Self::CALENDAR_LONG) {
            self.calendar = *v;
        }

        if let Some(v) = matches.get_one::<String>(Self::LOCALE_LONG) {
            self.locale = Locale::new(v.as_str());
        }

        if matches.get_flag(Self::STORAGE_LONG) {
            self.output = Output::Storage;
        } else if matches.get_flag(Self::TIME_LONG) {
            self.output = Output::Time;
        }

        if let Some(v) = matches.get_one::<String>(Self::DATE_LONG) {
            self.when = match Self::parse_when(v, &self.timezone) {
                Ok(v) => When::Given(v),
                Err(e) => return Err(Self::error(ErrorKind::InvalidValue, e)),
            };
        }

        Ok(())
    }
}
