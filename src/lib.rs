#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(unknown_lints)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unused_qualifications)]
#![warn(variant_size_differences)]
// Enable feature callouts in generated documentation:
// https://doc.rust-lang.org/beta/unstable-book/language-features/doc-cfg.html
//
// This approach is borrowed from tokio.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, feature(doc_alias))]

/*!
This crate scans date/time strings under the control of a format string made
of literal runs and `%`-prefixed conversion directives, producing a populated
[`DateFields`] record.

Format strings are compiled once into a token program and shared across all
users of the same format through a process-wide intern cache with
reference-counted handles and a bounded LIFO garbage collector (see
[`FormatCache`]). Locale-sensitive directives (month names, weekday names,
AM/PM markers, era labels, localized numerals) are matched greedily against
word lists supplied by a [`LocaleCatalog`], backed by a lowercased radix trie
([`StrIdxTree`]) so that unique prefixes such as `"Jun"` resolve in time
proportional to the input, not the list.

## Directives

| Directive        | Matches                                                              |
|------------------|----------------------------------------------------------------------|
| `%d`, `%e`       | Day of the month, 1 or 2 digits.                                     |
| `%m`             | Month number, 1 or 2 digits.                                         |
| `%b`, `%B`, `%h` | Month by localized name, full or abbreviated, longest match wins.    |
| `%y`             | Year without century, 1 or 2 digits, expanded by the century switch. |
| `%Y`             | Year with century, 4 digits.                                         |
| `%C`             | Century, 1 or 2 digits, combined with `%y`.                          |
| `%H`, `%k`       | Hour of the day, 1 or 2 digits.                                      |
| `%I`, `%l`       | Hour of the 12-hour clock, 1 or 2 digits.                            |
| `%M`             | Minute, 1 or 2 digits.                                               |
| `%S`             | Second of the minute, 1 or 2 digits.                                 |
| `%p`, `%P`       | Localized AM/PM marker.                                              |
| `%j`             | Day of the year, 1 to 3 digits.                                      |
| `%J`             | Julian Day Number, unbounded digits.                                 |
| `%g`             | ISO 8601 week-based year without century, 2 digits.                  |
| `%G`             | ISO 8601 week-based year, 4 digits.                                  |
| `%V`             | ISO 8601 week number, 1 or 2 digits.                                 |
| `%a`, `%A`       | Weekday by localized name, full or abbreviated.                      |
| `%u`, `%w`       | Weekday as a digit, `0` and `7` both meaning Sunday.                 |
| `%z`, `%Z`       | Time zone: `±H`, `±HH`, `±HHMM`, `±HH:MM`, `±HHMMSS`, `±HH:MM:SS`, or an alphanumeric abbreviation of up to 4 characters. Optional. |
| `%s`             | Signed seconds since the epoch, unbounded digits.                    |
| `%EE`            | Localized era label (`BCE`/`CE` and variants).                       |
| `%Ey`            | Year in localized numerals, matched but not captured.                |
| `%Od` … `%Ow`    | `d e m y H k I l M S u w` in localized numerals.                     |
| `%%`             | A literal `%`.                                                       |

A space in the format matches a whitespace run in the input: one-or-more
bytes in strict mode, zero-or-more otherwise. Any other character following
`%` falls back to a literal. After the walk, conflicting date fields are
reconciled by a fixed precedence policy (day-of-year vs. month+day, ISO week
vs. Gregorian, two-digit-year century expansion) and, when requested, second
assembly via [`to_seconds`].

## Example

```
use clockscan::{scan, Locale, ScanEnv, ScanOptions};

let locale = Locale::english();
let env = ScanEnv::new(&locale);
let date = scan("%Y-%m-%d", "2023-01-17", &ScanOptions::default(), &env)?;
assert_eq!(date.year, 2023);
assert_eq!(date.month, 1);
assert_eq!(date.day_of_month, 17);
# Ok::<(), clockscan::ScanError>(())
```
*/

#![doc(html_root_url = "https://docs.rs/clockscan/0.1.0")]

// Ensure code blocks in `README.md` compile
#[cfg(doctest)]
#[doc = include_str!("../README.md")]
mod readme {}

mod cache;
mod date;
mod idx_tree;
mod locale;
mod scan;
mod utf8;

#[cfg(test)]
mod tests;

use core::fmt;

pub use cache::{CompiledFormat, FormatCache, DEFAULT_GC_CAPACITY};
pub use date::{to_seconds, DateFields, DateFlags, Era, Meridian, SECONDS_PER_DAY};
pub use idx_tree::StrIdxTree;
pub use locale::{Locale, LocaleCatalog, LocaleKey};
pub use scan::{
    ScanEnv, ScanOptions, TimeZoneResolver, DEFAULT_CENTURY_SWITCH, DEFAULT_YEAR_CENTURY,
};

/// Error type returned by the scan functions.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ScanError {
    /// Input fails to match the format after all tokens and options applied.
    BadInputString,
    /// Numeric overflow while scanning a digit run.
    DateTooLarge,
    /// A numeric weekday greater than 7.
    BadDayOfWeek,
    /// The locale catalog has no list for a required key.
    LocaleMissing,
    /// A time zone designator the resolver does not recognize.
    BadTimezone,
}

impl ScanError {
    /// Short machine-readable tag identifying the error kind.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            ScanError::BadInputString => "badInputString",
            ScanError::DateTooLarge => "dateTooLarge",
            ScanError::BadDayOfWeek => "badDayOfWeek",
            ScanError::LocaleMissing => "localeError",
            ScanError::BadTimezone => "badTimezone",
        }
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::BadInputString => {
                write!(f, "input string does not match supplied format")
            }
            ScanError::DateTooLarge => write!(f, "requested date too large to represent"),
            ScanError::BadDayOfWeek => write!(f, "day of week is greater than 7"),
            ScanError::LocaleMissing => write!(f, "locale catalog is missing a required list"),
            ScanError::BadTimezone => write!(f, "unable to bind the time zone designator"),
        }
    }
}

impl std::error::Error for ScanError {}

/// Scan `input` under `format`, interning the compiled format in the
/// process-default cache.
///
/// See the [crate-level documentation](crate) for the recognized directives.
///
/// # Examples
///
/// ```
/// use clockscan::{scan, Locale, ScanEnv, ScanOptions};
///
/// let locale = Locale::english();
/// let env = ScanEnv::new(&locale);
/// let date = scan("%H:%M", "09:41", &ScanOptions::default(), &env)?;
/// assert_eq!((date.hour, date.minute), (9, 41));
/// # Ok::<(), clockscan::ScanError>(())
/// ```
///
/// # Errors
///
/// Returns a [`ScanError`] when the input does not match the format, a
/// number overflows, a weekday is out of range, a locale list is missing,
/// or a time zone designator cannot be bound.
pub fn scan(
    format: &str,
    input: &str,
    opts: &ScanOptions,
    env: &ScanEnv<'_>,
) -> Result<DateFields, ScanError> {
    FormatCache::global().get_or_compile(format).scan(input, opts, env)
}
