//! UTF-8 longest-common-prefix helpers.
//!
//! These back literal-word matching, word-list search and the index tree.
//! The case-folding variants return independent byte advances for both
//! sides, since Unicode lowercasing is not length-preserving.

/// Byte length of the longest common prefix of `a` and `b`, comparing
/// Unicode scalars exactly. The advance is the same on both sides.
pub(crate) fn common_prefix(a: &str, b: &str) -> usize {
    let mut n = 0;
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca != cb {
            break;
        }
        n += ca.len_utf8();
    }
    n
}

/// Byte lengths of the longest common prefix of `a` and `b` under Unicode
/// lowercasing of both sides.
pub(crate) fn common_prefix_fold(a: &str, b: &str) -> (usize, usize) {
    let (mut na, mut nb) = (0, 0);
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca != cb && !ca.to_lowercase().eq(cb.to_lowercase()) {
            break;
        }
        na += ca.len_utf8();
        nb += cb.len_utf8();
    }
    (na, nb)
}

/// As [`common_prefix_fold`], but `b` is known to be lowercase already.
///
/// Hot path of the index tree search; only the left side is folded.
pub(crate) fn common_prefix_fold_lower(a: &str, b_lower: &str) -> (usize, usize) {
    let (mut na, mut nb) = (0, 0);
    for (ca, cb) in a.chars().zip(b_lower.chars()) {
        if ca != cb && !ca.to_lowercase().eq(core::iter::once(cb)) {
            break;
        }
        na += ca.len_utf8();
        nb += cb.len_utf8();
    }
    (na, nb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_prefix() {
        assert_eq!(common_prefix("March", "Mar"), 3);
        assert_eq!(common_prefix("Mar", "March"), 3);
        assert_eq!(common_prefix("March", "May"), 2);
        assert_eq!(common_prefix("march", "March"), 0);
        assert_eq!(common_prefix("", "March"), 0);
        assert_eq!(common_prefix("März", "Märchen"), 4);
    }

    #[test]
    fn test_common_prefix_fold() {
        assert_eq!(common_prefix_fold("MARCH", "march"), (5, 5));
        assert_eq!(common_prefix_fold("MaRZO", "marzo"), (5, 5));
        assert_eq!(common_prefix_fold("MÄRZ", "märz"), (5, 5));
        assert_eq!(common_prefix_fold("May", "March"), (2, 2));
        assert_eq!(common_prefix_fold("x", "y"), (0, 0));
    }

    #[test]
    fn test_common_prefix_fold_uneven_advance() {
        // U+212A KELVIN SIGN is three bytes but lowercases to a one-byte 'k'.
        assert_eq!(common_prefix_fold("\u{212a}m", "km"), (4, 2));
        assert_eq!(common_prefix_fold("km", "\u{212a}m"), (2, 4));
    }

    #[test]
    fn test_common_prefix_fold_lower() {
        assert_eq!(common_prefix_fold_lower("JANUAR", "januar"), (6, 6));
        assert_eq!(common_prefix_fold_lower("Juni", "juli"), (2, 2));
        assert_eq!(common_prefix_fold_lower("MÄRZ", "märz"), (5, 5));
        assert_eq!(common_prefix_fold_lower("\u{212a}elvin", "kelvin"), (8, 6));
        assert_eq!(common_prefix_fold_lower("", "juli"), (0, 0));
    }
}
