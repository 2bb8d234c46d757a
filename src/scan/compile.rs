//! Scan-format compilation: the directive tables and the tokenizer turning
//! a format string into an ordered sequence of typed scan tokens.

use crate::date::DateFlags;
use crate::locale::LocaleKey;

/// Kind of a compiled scan token.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum TokenKind {
    /// A bounded digit run written into a record field.
    Digits,
    /// A semantic parser dispatched on [`ParserKind`].
    Parser,
    /// A whitespace run.
    Space,
    /// A literal word matched exactly.
    Word,
}

/// Record field a token writes into.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum FieldSink {
    None,
    Year,
    Month,
    DayOfMonth,
    DayOfYear,
    JulianDay,
    Century,
    Iso8601Year,
    Iso8601Week,
    Hour,
    Minute,
    SecondOfMinute,
    LocalSeconds,
}

/// Semantic parser a [`TokenKind::Parser`] token dispatches to.
///
/// An enum discriminant rather than a function pointer keeps the directive
/// table trivially copyable.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum ParserKind {
    None,
    Month,
    DayOfWeek,
    AmPm,
    Era,
    LocaleList,
    TimeZone,
}

/// One row of a directive table.
#[derive(Debug)]
pub(crate) struct TokenMap {
    pub(crate) kind: TokenKind,
    pub(crate) flags: DateFlags,
    pub(crate) clear_flags: DateFlags,
    pub(crate) min_size: u16,
    pub(crate) max_size: u16,
    pub(crate) sink: FieldSink,
    pub(crate) parser: ParserKind,
    pub(crate) data: Option<LocaleKey>,
}

/// One compiled token: a table row plus its position-dependent context.
#[derive(Debug)]
pub(crate) struct ScanToken {
    pub(crate) map: &'static TokenMap,
    /// Byte span in the format string: the matched word for
    /// [`TokenKind::Word`], the directive character otherwise.
    pub(crate) word: (u32, u32),
    /// Sum of minimum sizes of all following tokens.
    pub(crate) end_distance: u16,
    /// Input reserved for following adjacent tokens of the same kind.
    pub(crate) lookahead: u16,
}

/// A compiled format: the token sequence shared through the intern cache.
#[derive(Debug)]
pub(crate) struct ScanProgram {
    format: Box<str>,
    tokens: Box<[ScanToken]>,
    space_count: u32,
}

impl ScanProgram {
    /// The format string this program was compiled from.
    pub(crate) fn format(&self) -> &str {
        &self.format
    }

    pub(crate) fn tokens(&self) -> &[ScanToken] {
        &self.tokens
    }

    /// Number of mandatory space tokens in the format.
    pub(crate) fn mandatory_space_count(&self) -> u32 {
        self.space_count
    }

    /// The format substring a token covers.
    pub(crate) fn word(&self, tok: &ScanToken) -> &str {
        &self.format[tok.word.0 as usize..tok.word.1 as usize]
    }
}

const fn fl(bits: u32) -> DateFlags {
    DateFlags::from_bits_truncate(bits)
}

const fn digits(flags: DateFlags, min_size: u16, max_size: u16, sink: FieldSink) -> TokenMap {
    TokenMap {
        kind: TokenKind::Digits,
        flags,
        clear_flags: DateFlags::empty(),
        min_size,
        max_size,
        sink,
        parser: ParserKind::None,
        data: None,
    }
}

const fn parser(
    flags: DateFlags,
    parser: ParserKind,
    sink: FieldSink,
    data: Option<LocaleKey>,
) -> TokenMap {
    TokenMap {
        kind: TokenKind::Parser,
        flags,
        clear_flags: DateFlags::empty(),
        min_size: 0,
        max_size: 0,
        sink,
        parser,
        data,
    }
}

/// Directive characters of the standard table, in row order.
static STD_INDEX: &str = "dmbyYHMSpJjCgGVazs";

static STD_MAP: [TokenMap; 18] = [
    // %d %e
    digits(DateFlags::DAY_OF_MONTH, 1, 2, FieldSink::DayOfMonth),
    // %m
    digits(DateFlags::MONTH, 1, 2, FieldSink::Month),
    // %b %B %h
    parser(DateFlags::MONTH, ParserKind::Month, FieldSink::None, None),
    // %y
    digits(DateFlags::YEAR, 1, 2, FieldSink::Year),
    // %Y
    digits(
        fl(DateFlags::YEAR.bits() | DateFlags::CENTURY.bits()),
        4,
        4,
        FieldSink::Year,
    ),
    // %H %k %I %l
    digits(DateFlags::TIME, 1, 2, FieldSink::Hour),
    // %M
    digits(DateFlags::TIME, 1, 2, FieldSink::Minute),
    // %S
    digits(DateFlags::TIME, 1, 2, FieldSink::SecondOfMinute),
    // %p %P
    parser(DateFlags::ISO8601, ParserKind::AmPm, FieldSink::None, None),
    // %J
    digits(DateFlags::JULIAN_DAY, 1, u16::MAX, FieldSink::JulianDay),
    // %j
    digits(DateFlags::DAY_OF_YEAR, 1, 3, FieldSink::DayOfYear),
    // %C
    digits(
        fl(DateFlags::CENTURY.bits() | DateFlags::ISO8601_CENTURY.bits()),
        1,
        2,
        FieldSink::Century,
    ),
    // %g
    digits(
        fl(DateFlags::ISO8601_YEAR.bits() | DateFlags::ISO8601.bits()),
        2,
        2,
        FieldSink::Iso8601Year,
    ),
    // %G
    digits(
        fl(DateFlags::ISO8601_YEAR.bits()
            | DateFlags::ISO8601.bits()
            | DateFlags::ISO8601_CENTURY.bits()),
        4,
        4,
        FieldSink::Iso8601Year,
    ),
    // %V
    digits(DateFlags::ISO8601, 1, 2, FieldSink::Iso8601Week),
    // %a %A %u %w
    parser(
        DateFlags::ISO8601,
        ParserKind::DayOfWeek,
        FieldSink::None,
        None,
    ),
    // %z %Z
    parser(
        fl(DateFlags::OPTIONAL.bits() | DateFlags::ZONE.bits()),
        ParserKind::TimeZone,
        FieldSink::None,
        None,
    ),
    // %s
    digits(
        fl(DateFlags::LOCAL_SECONDS.bits() | DateFlags::SIGNED.bits()),
        1,
        u16::MAX,
        FieldSink::LocalSeconds,
    ),
];

/// Aliases resolved onto standard rows.
static STD_WRAP: [&str; 2] = ["eBhkIlPAuwZ", "dbbHHHpaaaz"];

/// Directive characters of the `%E` (locale era) table.
static E_INDEX: &str = "Ey";

static E_MAP: [TokenMap; 2] = [
    // %EE
    parser(DateFlags::empty(), ParserKind::Era, FieldSink::None, None),
    // %Ey, parsed but not captured
    parser(
        DateFlags::empty(),
        ParserKind::LocaleList,
        FieldSink::None,
        Some(LocaleKey::LocaleNumerals),
    ),
];

static E_WRAP: [&str; 2] = ["", ""];

/// Directive characters of the `%O` (localized numerals) table.
static O_INDEX: &str = "dmyHMSu";

static O_MAP: [TokenMap; 7] = [
    // %Od %Oe
    parser(
        DateFlags::DAY_OF_MONTH,
        ParserKind::LocaleList,
        FieldSink::DayOfMonth,
        Some(LocaleKey::LocaleNumerals),
    ),
    // %Om
    parser(
        DateFlags::MONTH,
        ParserKind::LocaleList,
        FieldSink::Month,
        Some(LocaleKey::LocaleNumerals),
    ),
    // %Oy
    parser(
        DateFlags::YEAR,
        ParserKind::LocaleList,
        FieldSink::Year,
        Some(LocaleKey::LocaleNumerals),
    ),
    // %OH %Ok %OI %Ol
    parser(
        DateFlags::TIME,
        ParserKind::LocaleList,
        FieldSink::Hour,
        Some(LocaleKey::LocaleNumerals),
    ),
    // %OM
    parser(
        DateFlags::TIME,
        ParserKind::LocaleList,
        FieldSink::Minute,
        Some(LocaleKey::LocaleNumerals),
    ),
    // %OS
    parser(
        DateFlags::TIME,
        ParserKind::LocaleList,
        FieldSink::SecondOfMinute,
        Some(LocaleKey::LocaleNumerals),
    ),
    // %Ou %Ow
    parser(
        DateFlags::ISO8601,
        ParserKind::DayOfWeek,
        FieldSink::None,
        Some(LocaleKey::LocaleNumerals),
    ),
];

static O_WRAP: [&str; 2] = ["ekIlw", "dHHHu"];

static SPACE_MAP: TokenMap = TokenMap {
    kind: TokenKind::Space,
    flags: DateFlags::empty(),
    clear_flags: DateFlags::empty(),
    min_size: 0,
    max_size: u16::MAX,
    sink: FieldSink::None,
    parser: ParserKind::None,
    data: None,
};

static WORD_MAP: TokenMap = TokenMap {
    kind: TokenKind::Word,
    flags: DateFlags::empty(),
    clear_flags: DateFlags::empty(),
    min_size: 1,
    max_size: 0,
    sink: FieldSink::None,
    parser: ParserKind::None,
    data: None,
};

/// Find the table row for a directive character, consulting the wrap map on
/// a primary-index miss.
fn lookup(
    index: &str,
    map: &'static [TokenMap],
    wrap: &[&str; 2],
    directive: u8,
) -> Option<&'static TokenMap> {
    if !directive.is_ascii() {
        return None;
    }
    if let Some(row) = index.bytes().position(|b| b == directive) {
        return Some(&map[row]);
    }
    let alias = wrap[0].bytes().position(|b| b == directive)?;
    let target = wrap[1].as_bytes()[alias];
    index.bytes().position(|b| b == target).map(|row| &map[row])
}

/// Compile a format string into a scan program.
pub(crate) fn compile(format: &str) -> ScanProgram {
    let bytes = format.as_bytes();
    // one token per directive plus interleaved literals
    let estimate = bytes.iter().filter(|&&b| b == b'%').count() * 2 + 1;
    let mut tokens: Vec<ScanToken> = Vec::with_capacity(estimate);
    let mut space_count = 0;

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 1 < bytes.len() => {
                let mut d = i + 1;
                if bytes[d] == b'%' {
                    // a literal "%"; starts its own token so the directive
                    // never merges into the preceding literal run
                    tokens.push(ScanToken {
                        map: &WORD_MAP,
                        word: (d as u32, d as u32 + 1),
                        end_distance: 0,
                        lookahead: 0,
                    });
                    i = d + 1;
                    continue;
                }
                let (index, map, wrap): (&str, &'static [TokenMap], &[&str; 2]) = match bytes[d] {
                    b'E' if d + 1 < bytes.len() => {
                        d += 1;
                        (E_INDEX, &E_MAP, &E_WRAP)
                    }
                    b'O' if d + 1 < bytes.len() => {
                        d += 1;
                        (O_INDEX, &O_MAP, &O_WRAP)
                    }
                    _ => (STD_INDEX, &STD_MAP, &STD_WRAP),
                };
                match lookup(index, map, wrap, bytes[d]) {
                    Some(row) => {
                        // reserve input for this token in every preceding
                        // adjacent token of the same kind
                        if row.min_size > 0 {
                            for prev in tokens.iter_mut().rev() {
                                if prev.map.kind != row.kind {
                                    break;
                                }
                                prev.lookahead += row.min_size;
                            }
                        }
                        tokens.push(ScanToken {
                            map: row,
                            word: (d as u32, d as u32 + 1),
                            end_distance: 0,
                            lookahead: 0,
                        });
                        i = d + 1;
                    }
                    None => {
                        // unknown directive falls through to literal; an
                        // unmodified directive keeps its "%", a modified
                        // one restarts at the modifier character
                        let fallback = d - 1;
                        push_literal(&mut tokens, fallback, fallback + 1);
                        i = fallback + 1;
                    }
                }
            }
            b' ' => {
                tokens.push(ScanToken {
                    map: &SPACE_MAP,
                    word: (i as u32, i as u32 + 1),
                    end_distance: 0,
                    lookahead: 0,
                });
                space_count += 1;
                i += 1;
            }
            _ => {
                let len = char_len(bytes[i]);
                push_literal(&mut tokens, i, i + len);
                i += len;
            }
        }
    }

    // reverse pass: how much input the rest of the program needs at minimum
    let mut end_dist: u32 = 0;
    for tok in tokens.iter_mut().rev() {
        tok.end_distance = end_dist.min(u32::from(u16::MAX)) as u16;
        end_dist += match tok.map.kind {
            TokenKind::Word => tok.word.1 - tok.word.0,
            _ => u32::from(tok.map.min_size),
        };
    }

    ScanProgram {
        format: Box::from(format),
        tokens: tokens.into_boxed_slice(),
        space_count,
    }
}

/// Extend the trailing literal token, or open a new one.
fn push_literal(tokens: &mut Vec<ScanToken>, start: usize, end: usize) {
    if let Some(last) = tokens.last_mut() {
        if last.map.kind == TokenKind::Word && last.word.1 as usize == start {
            last.word.1 = end as u32;
            return;
        }
    }
    tokens.push(ScanToken {
        map: &WORD_MAP,
        word: (start as u32, end as u32),
        end_distance: 0,
        lookahead: 0,
    });
}

/// Byte length of the UTF-8 sequence starting with `lead`.
fn char_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        _ => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(program: &ScanProgram) -> Vec<TokenKind> {
        program.tokens().iter().map(|t| t.map.kind).collect()
    }

    #[test]
    fn test_tables_match_their_indexes() {
        assert_eq!(STD_INDEX.len(), STD_MAP.len());
        assert_eq!(E_INDEX.len(), E_MAP.len());
        assert_eq!(O_INDEX.len(), O_MAP.len());
        assert_eq!(STD_WRAP[0].len(), STD_WRAP[1].len());
        assert_eq!(O_WRAP[0].len(), O_WRAP[1].len());
        // every wrap target resolves in its primary index
        for target in STD_WRAP[1].bytes() {
            assert!(STD_INDEX.bytes().any(|b| b == target));
        }
        for target in O_WRAP[1].bytes() {
            assert!(O_INDEX.bytes().any(|b| b == target));
        }
    }

    #[test]
    fn test_tokenize_iso_format() {
        let program = compile("%Y-%m-%dT%H:%M:%S%z");
        use TokenKind::{Digits, Parser, Word};
        assert_eq!(
            kinds(&program),
            [
                Digits, Word, Digits, Word, Digits, Word, Digits, Word, Digits, Word, Digits,
                Parser,
            ]
        );
        assert_eq!(program.word(&program.tokens()[3]), "-");
        assert_eq!(program.word(&program.tokens()[5]), "T");
        assert_eq!(program.tokens()[11].map.parser, ParserKind::TimeZone);
    }

    #[test]
    fn test_adjacent_digits_lookahead() {
        let program = compile("%Y%m%d");
        let la: Vec<u16> = program.tokens().iter().map(|t| t.lookahead).collect();
        assert_eq!(la, [2, 1, 0]);
    }

    #[test]
    fn test_lookahead_stops_at_kind_change() {
        let program = compile("%Y-%m%d");
        let la: Vec<u16> = program.tokens().iter().map(|t| t.lookahead).collect();
        assert_eq!(la, [0, 0, 1, 0]);
    }

    #[test]
    fn test_end_distance() {
        let program = compile("%y-%m-%d");
        let ed: Vec<u16> = program.tokens().iter().map(|t| t.end_distance).collect();
        assert_eq!(ed, [4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_word_end_distance_counts_bytes() {
        let program = compile("abc%d");
        let ed: Vec<u16> = program.tokens().iter().map(|t| t.end_distance).collect();
        assert_eq!(ed, [1, 0]);
        assert_eq!(program.word(&program.tokens()[0]), "abc");
    }

    #[test]
    fn test_percent_literal_not_merged_backward() {
        let program = compile("a%%b");
        use TokenKind::Word;
        assert_eq!(kinds(&program), [Word, Word]);
        assert_eq!(program.word(&program.tokens()[0]), "a");
        assert_eq!(program.word(&program.tokens()[1]), "%b");
    }

    #[test]
    fn test_unknown_directive_is_literal() {
        let program = compile("%q");
        assert_eq!(kinds(&program), [TokenKind::Word]);
        assert_eq!(program.word(&program.tokens()[0]), "%q");
    }

    #[test]
    fn test_trailing_percent_is_literal() {
        let program = compile("%");
        assert_eq!(kinds(&program), [TokenKind::Word]);
        assert_eq!(program.word(&program.tokens()[0]), "%");
    }

    #[test]
    fn test_wrapped_aliases_share_rows() {
        let a = compile("%d");
        let b = compile("%e");
        assert!(core::ptr::eq(a.tokens()[0].map, b.tokens()[0].map));
        let h = compile("%H");
        let i = compile("%I");
        assert!(core::ptr::eq(h.tokens()[0].map, i.tokens()[0].map));
    }

    #[test]
    fn test_modified_tables() {
        let era = compile("%EE");
        assert_eq!(era.tokens()[0].map.parser, ParserKind::Era);
        let oy = compile("%Oy");
        assert_eq!(oy.tokens()[0].map.parser, ParserKind::LocaleList);
        assert_eq!(oy.tokens()[0].map.sink, FieldSink::Year);
        let ou = compile("%Ou");
        assert_eq!(ou.tokens()[0].map.parser, ParserKind::DayOfWeek);
        assert_eq!(ou.tokens()[0].map.data, Some(LocaleKey::LocaleNumerals));
        // %Ok wraps onto the %OH row
        let ok = compile("%Ok");
        assert_eq!(ok.tokens()[0].map.sink, FieldSink::Hour);
    }

    #[test]
    fn test_space_tokens_counted() {
        let program = compile("%d %b %Y");
        assert_eq!(program.mandatory_space_count(), 2);
        assert_eq!(compile("%d-%b-%Y").mandatory_space_count(), 0);
    }

    #[test]
    fn test_directive_char_recorded() {
        let program = compile("%u");
        assert_eq!(program.word(&program.tokens()[0]), "u");
        let program = compile("%a");
        assert_eq!(program.word(&program.tokens()[0]), "a");
    }

    #[test]
    fn test_multibyte_literal() {
        let program = compile("à%d");
        assert_eq!(program.word(&program.tokens()[0]), "à");
        assert_eq!(program.tokens()[0].end_distance, 1);
    }
}
