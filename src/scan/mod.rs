//! Scan runtime: walks a compiled token sequence over an input string and
//! reconciles the fields it collects into a canonical date record.

pub(crate) mod compile;

use std::sync::Arc;

use crate::date::{to_seconds, DateFields, DateFlags, Era, Meridian, SECONDS_PER_DAY};
use crate::idx_tree::StrIdxTree;
use crate::locale::{LocaleCatalog, LocaleKey};
use crate::utf8;
use crate::ScanError;

use self::compile::{FieldSink, ParserKind, ScanProgram, ScanToken, TokenKind};

/// Default century two-digit years are expanded into.
pub const DEFAULT_YEAR_CENTURY: i32 = 2000;

/// Default two-digit-year cutoff: values at or above it land in the
/// previous century.
pub const DEFAULT_CENTURY_SWITCH: i32 = 38;

/// Options controlling a single scan.
#[derive(Debug, Default, Copy, Clone)]
pub struct ScanOptions {
    /// Require whitespace in the input exactly where the format has it;
    /// leading and trailing whitespace is still tolerated.
    pub strict: bool,
    /// Do not let `%s` short-circuit field-based reconciliation.
    pub extended: bool,
    /// Request external post-validation of the assembled date.
    pub validate: bool,
}

/// Resolver binding a scanned time zone designator to a UTC offset.
pub trait TimeZoneResolver {
    /// Offset in seconds east of Greenwich for `zone`, if known.
    fn utc_offset(&self, zone: &str) -> Option<i32>;
}

/// Collaborators and policy a scan runs against.
///
/// The catalog supplies localized word lists, the resolver (if any) binds
/// time zone designators, and the century pair drives two-digit-year
/// expansion.
pub struct ScanEnv<'a> {
    /// Localized word lists and their index trees.
    pub catalog: &'a dyn LocaleCatalog,
    /// Time zone resolver consulted by `%z`/`%Z`. Without one, numeric
    /// offsets are decoded directly and named zones fail to bind.
    pub timezones: Option<&'a dyn TimeZoneResolver>,
    /// Century two-digit years are expanded into.
    pub current_century: i32,
    /// Two-digit-year cutoff; values at or above it land in the previous
    /// century.
    pub century_switch: i32,
}

impl<'a> ScanEnv<'a> {
    /// Construct an environment over `catalog` with the default century
    /// policy and no time zone resolver.
    pub fn new(catalog: &'a dyn LocaleCatalog) -> Self {
        Self {
            catalog,
            timezones: None,
            current_century: DEFAULT_YEAR_CENTURY,
            century_switch: DEFAULT_CENTURY_SWITCH,
        }
    }

    /// Attach a time zone resolver.
    #[must_use]
    pub fn with_timezones(mut self, timezones: &'a dyn TimeZoneResolver) -> Self {
        self.timezones = Some(timezones);
        self
    }
}

impl core::fmt::Debug for ScanEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScanEnv")
            .field("timezones", &self.timezones.is_some())
            .field("current_century", &self.current_century)
            .field("century_switch", &self.century_switch)
            .finish_non_exhaustive()
    }
}

/// Outcome of a per-token parser: matched, or no match at this position.
///
/// "No match" is recoverable for `OPTIONAL` tokens; hard errors propagate
/// as `ScanError`.
enum Lookup {
    Found,
    NoMatch,
}

/// Walk `program` over `input`, filling `rec`.
pub(crate) fn run(
    program: &ScanProgram,
    input: &str,
    opts: &ScanOptions,
    env: &ScanEnv<'_>,
    rec: &mut DateFields,
) -> Result<(), ScanError> {
    rec.meridian = Meridian::Hour24;

    let bytes = input.as_bytes();
    let end = bytes.len();
    let tokens = program.tokens();
    let mut flags = DateFlags::empty();

    // whitespace at the edges is tolerated in every mode
    let mut p = skip_spaces(bytes, 0);

    let mut ti = 0;
    while ti < tokens.len() {
        let tok = &tokens[ti];
        let map = tok.map;
        if !opts.strict && !matches!(map.kind, TokenKind::Space | TokenKind::Word) {
            p = skip_spaces(bytes, p);
        }
        if p >= end {
            break;
        }
        match map.kind {
            TokenKind::Digits => {
                let mut sign = 1;
                if map.flags.contains(DateFlags::SIGNED) {
                    if bytes[p] == b'+' {
                        p += 1;
                    } else if bytes[p] == b'-' {
                        p += 1;
                        sign = -1;
                    }
                }
                let start = p;
                let mut size = usize::from(map.max_size);
                if map.max_size != map.min_size && tok.lookahead > 0 {
                    // the window stretches over digits reserved for the
                    // following same-kind tokens (and embedded spaces),
                    // then the cursor backs off what it borrowed
                    let reserved = usize::from(tok.lookahead);
                    let mut spaces = 0;
                    size += reserved;
                    let mut x = (start + size).min(end);
                    let mut pe = x;
                    while p < x {
                        let b = bytes[p];
                        if b.is_ascii_whitespace() {
                            if pe > p {
                                pe = p;
                            }
                            if x < end {
                                x += 1;
                            }
                            p += 1;
                            spaces += 1;
                            continue;
                        }
                        if b.is_ascii_digit() {
                            p += 1;
                            continue;
                        }
                        break;
                    }
                    p = (p as isize - (reserved + spaces) as isize).max(start as isize) as usize;
                    p = p.min(pe);
                } else {
                    let x = (start + size).min(end);
                    while p < x && bytes[p].is_ascii_digit() {
                        p += 1;
                    }
                }
                if p - start < usize::from(map.min_size) {
                    // missing input
                    if map.flags.contains(DateFlags::OPTIONAL) {
                        ti += 1;
                        continue;
                    }
                    return Err(ScanError::BadInputString);
                }
                let value = scan_int(&bytes[start..p], sign)?;
                write_field(rec, map.sink, value);
                flags.remove(map.clear_flags);
                flags.insert(map.flags);
            }
            TokenKind::Parser => {
                let mut cur = p;
                match dispatch(program, tokens, ti, input, &mut cur, env, rec)? {
                    Lookup::Found => {
                        p = cur;
                        flags.remove(map.clear_flags);
                        flags.insert(map.flags);
                    }
                    Lookup::NoMatch => {
                        if map.flags.contains(DateFlags::OPTIONAL) {
                            ti += 1;
                            continue;
                        }
                        return Err(ScanError::BadInputString);
                    }
                }
            }
            TokenKind::Space => {
                // at least one space in strict mode
                if opts.strict {
                    if !bytes[p].is_ascii_whitespace() {
                        return Err(ScanError::BadInputString);
                    }
                    p += 1;
                }
                p = skip_spaces(bytes, p);
            }
            TokenKind::Word => {
                let word = program.word(tok);
                let matched = utf8::common_prefix(&input[p..], word);
                if matched < word.len() {
                    return Err(ScanError::BadInputString);
                }
                p += matched;
            }
        }
        ti += 1;
    }

    // anything left beyond trailing whitespace is a mismatch
    p = skip_spaces(bytes, p);
    if p < end {
        return Err(ScanError::BadInputString);
    }
    // input exhausted: only an optional token (or a space outside strict
    // mode) may remain
    if let Some(tok) = tokens.get(ti) {
        let skippable = (!opts.strict && tok.map.kind == TokenKind::Space)
            || tok.map.flags.contains(DateFlags::OPTIONAL);
        if !skippable {
            return Err(ScanError::BadInputString);
        }
    }

    reconcile(flags, opts, env, rec);
    Ok(())
}

fn skip_spaces(bytes: &[u8], mut p: usize) -> usize {
    while p < bytes.len() && bytes[p].is_ascii_whitespace() {
        p += 1;
    }
    p
}

/// Parse a digit run as a signed integer, watching the accumulator for a
/// direction reversal; that catches positive and negative overflow
/// uniformly.
fn scan_int(digits: &[u8], sign: i64) -> Result<i64, ScanError> {
    let mut val: i64 = 0;
    let mut prev: i64 = 0;
    if sign >= 0 {
        for &d in digits {
            val = val.wrapping_mul(10).wrapping_add(i64::from(d - b'0'));
            if val < prev {
                return Err(ScanError::DateTooLarge);
            }
            prev = val;
        }
    } else {
        for &d in digits {
            val = val.wrapping_mul(10).wrapping_sub(i64::from(d - b'0'));
            if val > prev {
                return Err(ScanError::DateTooLarge);
            }
            prev = val;
        }
    }
    Ok(val)
}

fn write_field(rec: &mut DateFields, sink: FieldSink, value: i64) {
    match sink {
        FieldSink::None => {}
        FieldSink::Year => rec.year = value as i32,
        FieldSink::Month => rec.month = value as i32,
        FieldSink::DayOfMonth => rec.day_of_month = value as i32,
        FieldSink::DayOfYear => rec.day_of_year = value as i32,
        FieldSink::JulianDay => rec.julian_day = value,
        FieldSink::Century => rec.century = value as i32,
        FieldSink::Iso8601Year => rec.iso8601_year = value as i32,
        FieldSink::Iso8601Week => rec.iso8601_week = value as i32,
        FieldSink::Hour => rec.hour = value as i32,
        FieldSink::Minute => rec.minute = value as i32,
        FieldSink::SecondOfMinute => rec.second_of_minute = value,
        FieldSink::LocalSeconds => rec.local_seconds = value,
    }
}

/// Bounds for a greedy word match at `p`: at most what leaves the rest of
/// the program its minimum input, at least up to the next anchor (the end
/// of the word when nothing follows, or the first byte of a following
/// literal).
fn greedy_len(
    program: &ScanProgram,
    tokens: &[ScanToken],
    ti: usize,
    input: &str,
    p: usize,
) -> (usize, usize) {
    let bytes = input.as_bytes();
    let end = bytes.len();
    let max_len = (end - p).saturating_sub(usize::from(tokens[ti].end_distance));
    let mut min_len = 0;
    match tokens.get(ti + 1) {
        None => {
            let mut q = p;
            while q < end && !bytes[q].is_ascii_whitespace() {
                q += 1;
            }
            min_len = q - p;
        }
        Some(next) if next.map.kind == TokenKind::Word => {
            let first = program.format().as_bytes()[next.word.0 as usize];
            let mut q = p;
            while q < end && bytes[q] != first {
                q += 1;
            }
            min_len = q - p;
        }
        Some(_) => {}
    }
    (min_len, max_len.max(min_len))
}

/// Largest char boundary in `input` not beyond `p + len`.
fn window_end(input: &str, p: usize, len: usize) -> usize {
    let mut lim = (p + len).min(input.len());
    while !input.is_char_boundary(lim) {
        lim -= 1;
    }
    lim
}

/// Search an index tree against the window at `*p`, advancing the cursor
/// over the matched bytes.
fn tree_search(
    tree: &StrIdxTree,
    input: &str,
    p: &mut usize,
    min_len: usize,
    max_len: usize,
) -> Option<usize> {
    let lim = window_end(input, *p, max_len);
    let (consumed, value) = tree.find(&input[*p..lim])?;
    if consumed < min_len {
        return None;
    }
    *p += consumed;
    Some(value)
}

/// Case-insensitive greedy search of a short word list, preferring the
/// entry that consumes the most input.
fn list_search(
    input: &str,
    p: &mut usize,
    entries: &[&str],
    mut min_len: usize,
    max_len: usize,
) -> Option<usize> {
    let lim = window_end(input, *p, max_len);
    let window = &input[*p..lim];
    let mut fallback = None;
    for (i, entry) in entries.iter().enumerate() {
        if entry.len() < min_len {
            continue;
        }
        let (l, _) = utf8::common_prefix_fold(window, entry);
        if l == 0 || l < min_len {
            continue;
        }
        if l < window.len() && min_len != max_len {
            // partial use of the window: remember it, then look for a
            // longer match
            fallback = Some(i);
            min_len = l + 1;
            continue;
        }
        *p += l;
        return Some(i);
    }
    if let Some(i) = fallback {
        *p += min_len - 1;
        return Some(i);
    }
    None
}

fn index_tree(env: &ScanEnv<'_>, key: LocaleKey) -> Result<Arc<StrIdxTree>, ScanError> {
    env.catalog.index_tree(key).ok_or(ScanError::LocaleMissing)
}

fn dispatch(
    program: &ScanProgram,
    tokens: &[ScanToken],
    ti: usize,
    input: &str,
    cur: &mut usize,
    env: &ScanEnv<'_>,
    rec: &mut DateFields,
) -> Result<Lookup, ScanError> {
    let tok = &tokens[ti];
    let map = tok.map;
    let (min_len, max_len) = greedy_len(program, tokens, ti, input, *cur);
    match map.parser {
        ParserKind::Month => {
            let tree = index_tree(env, LocaleKey::MonthsComb)?;
            match tree_search(&tree, input, cur, min_len, max_len) {
                Some(value) => {
                    rec.month = value as i32 + 1;
                    Ok(Lookup::Found)
                }
                None => Ok(Lookup::NoMatch),
            }
        }
        ParserKind::DayOfWeek => parse_day_of_week(program, tok, input, cur, env, rec, min_len, max_len),
        ParserKind::AmPm => {
            let am = env
                .catalog
                .word_list(LocaleKey::Am)
                .and_then(<[String]>::first);
            let pm = env
                .catalog
                .word_list(LocaleKey::Pm)
                .and_then(<[String]>::first);
            let (Some(am), Some(pm)) = (am, pm) else {
                return Err(ScanError::LocaleMissing);
            };
            match list_search(input, cur, &[am.as_str(), pm.as_str()], min_len, max_len) {
                Some(0) => {
                    rec.meridian = Meridian::Am;
                    Ok(Lookup::Found)
                }
                Some(_) => {
                    rec.meridian = Meridian::Pm;
                    Ok(Lookup::Found)
                }
                None => Ok(Lookup::NoMatch),
            }
        }
        ParserKind::Era => {
            let keys = [
                LocaleKey::Bce,
                LocaleKey::Ce,
                LocaleKey::Bce2,
                LocaleKey::Ce2,
                LocaleKey::Bce3,
                LocaleKey::Ce3,
            ];
            let labels: Vec<&str> = keys
                .iter()
                .map(|&key| {
                    env.catalog
                        .word_list(key)
                        .and_then(<[String]>::first)
                        .map_or("", String::as_str)
                })
                .collect();
            if labels[0].is_empty() || labels[1].is_empty() {
                return Err(ScanError::LocaleMissing);
            }
            match list_search(input, cur, &labels, min_len, max_len) {
                Some(value) => {
                    rec.era = if value % 2 == 1 { Era::Ce } else { Era::Bce };
                    Ok(Lookup::Found)
                }
                None => Ok(Lookup::NoMatch),
            }
        }
        ParserKind::LocaleList => {
            let Some(key) = map.data else {
                return Ok(Lookup::NoMatch);
            };
            let tree = index_tree(env, key)?;
            match tree_search(&tree, input, cur, min_len, max_len) {
                Some(value) => {
                    write_field(rec, map.sink, value as i64);
                    Ok(Lookup::Found)
                }
                None => Ok(Lookup::NoMatch),
            }
        }
        ParserKind::TimeZone => parse_time_zone(input, cur, env, rec, min_len, max_len),
        ParserKind::None => Ok(Lookup::NoMatch),
    }
}

#[allow(clippy::too_many_arguments)]
fn parse_day_of_week(
    program: &ScanProgram,
    tok: &ScanToken,
    input: &str,
    cur: &mut usize,
    env: &ScanEnv<'_>,
    rec: &mut DateFields,
    min_len: usize,
    max_len: usize,
) -> Result<Lookup, ScanError> {
    let bytes = input.as_bytes();
    let directive = program.word(tok).as_bytes()[0];

    // %u %w %Ou %Ow: a lone digit, or a localized numeral
    if directive != b'a'
        && directive != b'A'
        && ((min_len <= 1 && max_len >= 1) || tok.map.data.is_some())
    {
        let value = if let Some(key) = tok.map.data {
            let tree = index_tree(env, key)?;
            match tree_search(&tree, input, cur, min_len, max_len) {
                Some(value) => value,
                None => return Ok(Lookup::NoMatch),
            }
        } else {
            let b = bytes[*cur];
            if !b.is_ascii_digit() {
                return Ok(Lookup::NoMatch);
            }
            *cur += 1;
            usize::from(b - b'0')
        };
        let value = if value == 0 { 7 } else { value };
        if value > 7 {
            return Err(ScanError::BadDayOfWeek);
        }
        rec.day_of_week = value as i32;
        return Ok(Lookup::Found);
    }

    // %a %A: combined short and long day names
    let tree = index_tree(env, LocaleKey::DaysOfWeekComb)?;
    match tree_search(&tree, input, cur, min_len, max_len) {
        Some(value) => {
            rec.day_of_week = if value == 0 { 7 } else { value as i32 };
            Ok(Lookup::Found)
        }
        None => Ok(Lookup::NoMatch),
    }
}

/// Maximum bytes of a numeric zone, "+00:00:00".
const MAX_ZONE_LEN: usize = 9;

fn parse_time_zone(
    input: &str,
    cur: &mut usize,
    env: &ScanEnv<'_>,
    rec: &mut DateFields,
    min_len: usize,
    mut max_len: usize,
) -> Result<Lookup, ScanError> {
    let bytes = input.as_bytes();
    let end = bytes.len();
    let start = *cur;
    let mut q = start;

    if bytes[q] == b'+' || bytes[q] == b'-' {
        // numeric offset, cumulated without the colons
        let mut designator = String::with_capacity(MAX_ZONE_LEN);
        designator.push(bytes[q] as char);
        q += 1;
        let mut len = 1;
        max_len = max_len.min(MAX_ZONE_LEN);
        while len + 1 < max_len {
            if q >= end || !bytes[q].is_ascii_digit() {
                break;
            }
            designator.push(bytes[q] as char);
            q += 1;
            len += 1;
            if q >= end || !bytes[q].is_ascii_digit() {
                break;
            }
            designator.push(bytes[q] as char);
            q += 1;
            len += 1;
            if len + 2 < max_len && q < end && bytes[q] == b':' {
                q += 1;
                len += 1;
            }
        }
        if len < min_len {
            return Ok(Lookup::NoMatch);
        }
        bind_zone(env, rec, &designator)?;
        *cur = q;
        Ok(Lookup::Found)
    } else {
        // legacy alphanumeric zone like UTC, CEST
        let cap = max_len.min(4);
        while q < end && q - start < cap && bytes[q].is_ascii_alphanumeric() {
            q += 1;
        }
        if q - start < min_len {
            return Ok(Lookup::NoMatch);
        }
        bind_zone(env, rec, &input[start..q])?;
        *cur = q;
        Ok(Lookup::Found)
    }
}

fn bind_zone(env: &ScanEnv<'_>, rec: &mut DateFields, zone: &str) -> Result<(), ScanError> {
    let offset = match env.timezones {
        Some(resolver) => resolver.utc_offset(zone),
        None => decode_numeric_zone(zone),
    };
    match offset {
        Some(offset) => {
            rec.tz_offset = offset;
            Ok(())
        }
        None => Err(ScanError::BadTimezone),
    }
}

/// Decode `±H`, `±HH`, `±HHMM` or `±HHMMSS` (colons already dropped) into
/// seconds east of Greenwich.
fn decode_numeric_zone(zone: &str) -> Option<i32> {
    let bytes = zone.as_bytes();
    let sign = match bytes.first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let digits = &bytes[1..];
    if digits.is_empty() || digits.len() > 6 || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let num = |s: &[u8]| s.iter().fold(0, |acc, b| acc * 10 + i32::from(b - b'0'));
    let (hours, minutes, seconds) = match digits.len() {
        1 | 2 => (num(digits), 0, 0),
        3 | 4 => {
            let split = digits.len() - 2;
            (num(&digits[..split]), num(&digits[split..]), 0)
        }
        _ => {
            let split = digits.len() - 4;
            (
                num(&digits[..split]),
                num(&digits[split..split + 2]),
                num(&digits[split + 2..]),
            )
        }
    };
    if minutes > 59 || seconds > 59 {
        return None;
    }
    Some(sign * (hours * 3600 + minutes * 60 + seconds))
}

/// Resolve conflicting date fields by the precedence policy and assemble
/// the second of the day.
fn reconcile(mut flags: DateFlags, opts: &ScanOptions, env: &ScanEnv<'_>, rec: &mut DateFields) {
    // %s takes precedence over all other tokens unless extended
    if opts.extended || !flags.contains(DateFlags::LOCAL_SECONDS) {
        if flags.intersects(DateFlags::DATE) && !flags.contains(DateFlags::JULIAN_DAY) {
            rec.flags
                .insert(DateFlags::ASSEMBLE_SECONDS | DateFlags::ASSEMBLE_JULIAN_DAY);

            // day-of-month yields to day-of-year unless the month is known
            let dmy = flags & (DateFlags::MONTH | DateFlags::DAY_OF_YEAR | DateFlags::DAY_OF_MONTH);
            if dmy == DateFlags::DAY_OF_YEAR | DateFlags::DAY_OF_MONTH
                || dmy == DateFlags::DAY_OF_YEAR
            {
                flags.remove(DateFlags::DAY_OF_MONTH);
                // a day of year also beats a naked weekday
                if !flags.contains(DateFlags::ISO8601_YEAR) {
                    flags.remove(DateFlags::ISO8601);
                }
            } else if dmy
                == DateFlags::MONTH | DateFlags::DAY_OF_YEAR | DateFlags::DAY_OF_MONTH
                || dmy == DateFlags::MONTH | DateFlags::DAY_OF_MONTH
                || dmy == DateFlags::DAY_OF_MONTH
            {
                // month and day beat day-of-year, and beat a naked weekday
                flags.remove(DateFlags::DAY_OF_YEAR);
                if !flags.contains(DateFlags::ISO8601_YEAR) {
                    flags.remove(DateFlags::ISO8601);
                }
            }

            // a year-week-day date yields to a year-month-day one
            if flags.contains(DateFlags::ISO8601)
                && (flags.contains(DateFlags::YEAR | DateFlags::DAY_OF_YEAR)
                    || flags.contains(
                        DateFlags::YEAR | DateFlags::MONTH | DateFlags::DAY_OF_MONTH,
                    ))
            {
                if !flags.contains(DateFlags::ISO8601_CENTURY)
                    && flags.contains(DateFlags::CENTURY)
                {
                    // the ISO year has no century but the Gregorian one does
                    flags.remove(DateFlags::ISO8601);
                } else if !flags.contains(DateFlags::ISO8601_YEAR) {
                    flags.remove(DateFlags::ISO8601);
                }
            }

            if flags.contains(DateFlags::ISO8601) {
                if rec.iso8601_year < 100 {
                    if flags.contains(DateFlags::ISO8601_CENTURY) {
                        rec.iso8601_year += rec.century * 100;
                    } else {
                        if rec.iso8601_year >= env.century_switch {
                            rec.iso8601_year -= 100;
                        }
                        rec.iso8601_year += env.current_century;
                    }
                }
            } else if rec.year < 100 {
                if flags.contains(DateFlags::CENTURY) {
                    rec.year += rec.century * 100;
                } else {
                    if rec.year >= env.century_switch {
                        rec.year -= 100;
                    }
                    rec.year += env.current_century;
                }
            }
        }

        // no time at all: the day starts at midnight
        if !flags.intersects(DateFlags::TIME | DateFlags::LOCAL_SECONDS) {
            rec.flags.insert(DateFlags::ASSEMBLE_SECONDS);
            rec.local_seconds = 0;
        }

        if flags.contains(DateFlags::TIME) {
            rec.flags.insert(DateFlags::ASSEMBLE_SECONDS);
            rec.second_of_day =
                to_seconds(rec.hour, rec.minute, rec.second_of_minute, rec.meridian);
        } else if !flags.contains(DateFlags::LOCAL_SECONDS) {
            rec.flags.insert(DateFlags::ASSEMBLE_SECONDS);
            rec.second_of_day = rec.local_seconds % SECONDS_PER_DAY;
        }
    }

    if opts.validate {
        rec.flags.insert(DateFlags::VALIDATE);
    }

    // tell the caller which fields were found
    rec.flags.insert(flags);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_int_positive() {
        assert_eq!(scan_int(b"0", 1), Ok(0));
        assert_eq!(scan_int(b"2023", 1), Ok(2023));
        assert_eq!(scan_int(b"9223372036854775807", 1), Ok(i64::MAX));
        assert_eq!(
            scan_int(b"9223372036854775808", 1),
            Err(ScanError::DateTooLarge)
        );
        assert_eq!(
            scan_int(b"99999999999999999999", 1),
            Err(ScanError::DateTooLarge)
        );
    }

    #[test]
    fn test_scan_int_negative() {
        assert_eq!(scan_int(b"2023", -1), Ok(-2023));
        assert_eq!(scan_int(b"9223372036854775808", -1), Ok(i64::MIN));
        assert_eq!(
            scan_int(b"9223372036854775809", -1),
            Err(ScanError::DateTooLarge)
        );
    }

    #[test]
    fn test_decode_numeric_zone() {
        assert_eq!(decode_numeric_zone("+1"), Some(3600));
        assert_eq!(decode_numeric_zone("+01"), Some(3600));
        assert_eq!(decode_numeric_zone("-0130"), Some(-5400));
        assert_eq!(decode_numeric_zone("+0100"), Some(3600));
        assert_eq!(decode_numeric_zone("+010203"), Some(3723));
        assert_eq!(decode_numeric_zone("-000030"), Some(-30));
        assert_eq!(decode_numeric_zone("+"), None);
        assert_eq!(decode_numeric_zone("UTC"), None);
        assert_eq!(decode_numeric_zone("+0199"), None);
    }
}
