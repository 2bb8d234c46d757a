//! The date record a scan populates, and the flag set describing which of
//! its fields were found.

use bitflags::bitflags;

/// Number of seconds in a nominal day.
pub const SECONDS_PER_DAY: i64 = 86_400;

bitflags! {
    /// Which parts of a [`DateFields`] record a scan populated, plus
    /// assembly requests left for the caller.
    ///
    /// Reconciliation never reads a field whose bit is not set.
    pub struct DateFlags: u32 {
        /// The matching token may be absent from the input.
        const OPTIONAL = 1 << 0;
        /// `local_seconds` was set directly (`%s`).
        const LOCAL_SECONDS = 1 << 2;
        /// `julian_day` was set (`%J`).
        const JULIAN_DAY = 1 << 3;
        /// A time-of-day component was set.
        const TIME = 1 << 4;
        /// A time zone designator was bound.
        const ZONE = 1 << 5;
        /// The century is explicit (`%C`, or a 4-digit `%Y`).
        const CENTURY = 1 << 6;
        /// `day_of_month` was set.
        const DAY_OF_MONTH = 1 << 7;
        /// `day_of_year` was set.
        const DAY_OF_YEAR = 1 << 8;
        /// `month` was set.
        const MONTH = 1 << 9;
        /// `year` was set.
        const YEAR = 1 << 10;
        /// `iso8601_year` was set.
        const ISO8601_YEAR = 1 << 12;
        /// Week-based date information (week number, weekday, AM/PM group)
        /// is in play; dropped by reconciliation when a calendar date wins.
        const ISO8601 = 1 << 13;
        /// The ISO week-based year carries an explicit century (`%G`).
        const ISO8601_CENTURY = 1 << 14;
        /// The digit run accepts a leading sign.
        const SIGNED = 1 << 15;

        /// Any date-identifying part.
        const DATE = Self::JULIAN_DAY.bits
            | Self::DAY_OF_MONTH.bits
            | Self::DAY_OF_YEAR.bits
            | Self::MONTH.bits
            | Self::YEAR.bits
            | Self::ISO8601_YEAR.bits
            | Self::ISO8601.bits;

        /// Post-scan validation of the assembled date was requested.
        const VALIDATE = 1 << 27;
        /// Assemble `julian_day` from year/month/day.
        const ASSEMBLE_JULIAN_DAY = 1 << 29;
        /// Assemble epoch seconds from `local_seconds` and `second_of_day`.
        const ASSEMBLE_SECONDS = 1 << 30;
    }
}

/// Era of a year.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Era {
    /// Before the common era.
    Bce,
    /// The common era.
    Ce,
}

impl Default for Era {
    fn default() -> Self {
        Era::Ce
    }
}

/// Meridian: AM, PM, or 24-hour style.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Meridian {
    /// Ante meridiem.
    Am,
    /// Post meridiem.
    Pm,
    /// 24-hour clock, no marker.
    Hour24,
}

impl Default for Meridian {
    fn default() -> Self {
        Meridian::Hour24
    }
}

/// Date/time fields accumulated while scanning.
///
/// Every field consulted by reconciliation is either set during the scan
/// with its corresponding [`DateFlags`] bit, or left at zero and treated as
/// absent. The record is undefined when a scan returns an error.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DateFields {
    /// Time expressed in seconds from the epoch (assembled by the caller).
    pub seconds_from_epoch: i64,
    /// Local time in nominal seconds from the epoch (`%s`).
    pub local_seconds: i64,
    /// Time zone offset in seconds east of Greenwich.
    pub tz_offset: i32,
    /// Julian Day Number (`%J`).
    pub julian_day: i64,
    /// Era of `year`.
    pub era: Era,
    /// Year of the era.
    pub year: i32,
    /// Month number, January is 1.
    pub month: i32,
    /// Day of the month.
    pub day_of_month: i32,
    /// Day of the year, 1 January is 1.
    pub day_of_year: i32,
    /// ISO 8601 week-based year.
    pub iso8601_year: i32,
    /// ISO 8601 week number.
    pub iso8601_week: i32,
    /// Day of the week, Monday is 1 through Sunday 7.
    pub day_of_week: i32,
    /// Hour of the day.
    pub hour: i32,
    /// Minute of the hour.
    pub minute: i32,
    /// Second of the minute.
    pub second_of_minute: i64,
    /// Second of the day, assembled from the time fields.
    pub second_of_day: i64,
    /// Meridian the hour is expressed in.
    pub meridian: Meridian,
    /// Explicit century (`%C`), combined with a two-digit year.
    pub century: i32,
    /// Which fields were set during the scan, plus assembly requests.
    pub flags: DateFlags,
}

impl Default for DateFields {
    fn default() -> Self {
        Self {
            seconds_from_epoch: 0,
            local_seconds: 0,
            tz_offset: 0,
            julian_day: 0,
            era: Era::default(),
            year: 0,
            month: 0,
            day_of_month: 0,
            day_of_year: 0,
            iso8601_year: 0,
            iso8601_week: 0,
            day_of_week: 0,
            hour: 0,
            minute: 0,
            second_of_minute: 0,
            second_of_day: 0,
            meridian: Meridian::default(),
            century: 0,
            flags: DateFlags::empty(),
        }
    }
}

/// Convert an hour/minute/second triple under a meridian into seconds of
/// the day.
///
/// # Examples
///
/// ```
/// use clockscan::{to_seconds, Meridian};
///
/// assert_eq!(to_seconds(12, 30, 0, Meridian::Pm), 45_000);
/// ```
#[must_use]
pub fn to_seconds(hours: i32, minutes: i32, seconds: i64, meridian: Meridian) -> i64 {
    let hours = i64::from(hours);
    let minutes = i64::from(minutes);
    match meridian {
        Meridian::Hour24 => (hours * 60 + minutes) * 60 + seconds,
        Meridian::Am => ((hours % 12) * 60 + minutes) * 60 + seconds,
        Meridian::Pm => ((hours % 12 + 12) * 60 + minutes) * 60 + seconds,
    }
}
