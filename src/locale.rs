//! Localized word lists consumed by the scanner, and the index trees built
//! over them.

use std::fmt;
use std::slice;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::idx_tree::StrIdxTree;

/// List of weekday names, Sunday first.
const DAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// List of month names.
const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Era labels, alternating before/after the common era.
const ERAS: [&str; 6] = ["BCE", "CE", "b.c.e.", "c.e.", "b.c.", "a.d."];

/// Name of a localized word list.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LocaleKey {
    /// Full month names, January first.
    MonthsFull,
    /// Abbreviated month names.
    MonthsAbbrev,
    /// Full and abbreviated month names merged into one index tree.
    MonthsComb,
    /// Full weekday names, Sunday first.
    DaysOfWeekFull,
    /// Abbreviated weekday names.
    DaysOfWeekAbbrev,
    /// Full and abbreviated weekday names merged into one index tree.
    DaysOfWeekComb,
    /// Ante-meridiem marker.
    Am,
    /// Post-meridiem marker.
    Pm,
    /// Label of years before the common era.
    Bce,
    /// Label of years of the common era.
    Ce,
    /// Second spelling of [`LocaleKey::Bce`].
    Bce2,
    /// Second spelling of [`LocaleKey::Ce`].
    Ce2,
    /// Third spelling of [`LocaleKey::Bce`].
    Bce3,
    /// Third spelling of [`LocaleKey::Ce`].
    Ce3,
    /// Numerals zero upward in localized spelling, for the `%O` and `%Ey`
    /// directives.
    LocaleNumerals,
}

/// Source of localized word lists.
///
/// The scanner fetches lists by [`LocaleKey`] and matches them through
/// index trees. Implementations should cache the trees they hand out; the
/// default [`index_tree`] builds a fresh tree on every call.
///
/// [`index_tree`]: LocaleCatalog::index_tree
pub trait LocaleCatalog {
    /// The word list stored under `key`, if this locale defines one.
    ///
    /// Single labels (AM/PM markers, era spellings) are one-element lists.
    fn word_list(&self, key: LocaleKey) -> Option<&[String]>;

    /// An index tree spanning the lists behind `key`.
    ///
    /// For the `*Comb` keys the tree merges the full list before the
    /// abbreviated one, so that longer keys are inserted first.
    fn index_tree(&self, key: LocaleKey) -> Option<Arc<StrIdxTree>> {
        let single = [key];
        let keys: &[LocaleKey] = match key {
            LocaleKey::MonthsComb => &[LocaleKey::MonthsFull, LocaleKey::MonthsAbbrev],
            LocaleKey::DaysOfWeekComb => {
                &[LocaleKey::DaysOfWeekFull, LocaleKey::DaysOfWeekAbbrev]
            }
            _ => &single,
        };
        let mut tree = StrIdxTree::new();
        let mut found = false;
        for &k in keys {
            if let Some(words) = self.word_list(k) {
                tree.extend_from_list(words);
                found = true;
            }
        }
        found.then(|| Arc::new(tree))
    }
}

/// An owned locale: word lists plus lazily built, cached index trees.
///
/// Trees are built on first use and shared as snapshots; a tree is never
/// mutated once built, so scans on other threads can keep using it.
pub struct Locale {
    months_full: Vec<String>,
    months_abbrev: Vec<String>,
    days_full: Vec<String>,
    days_abbrev: Vec<String>,
    am: String,
    pm: String,
    eras: [String; 6],
    numerals: Vec<String>,
    months_tree: OnceCell<Arc<StrIdxTree>>,
    days_tree: OnceCell<Arc<StrIdxTree>>,
    numerals_tree: OnceCell<Arc<StrIdxTree>>,
}

impl Locale {
    /// Construct a locale from its word lists.
    ///
    /// Abbreviated lists must parallel their full lists entry for entry.
    /// Era labels and numerals start at the English defaults; see
    /// [`with_eras`] and [`with_numerals`].
    ///
    /// [`with_eras`]: Locale::with_eras
    /// [`with_numerals`]: Locale::with_numerals
    #[must_use]
    pub fn new(
        months_full: Vec<String>,
        months_abbrev: Vec<String>,
        days_full: Vec<String>,
        days_abbrev: Vec<String>,
        am: String,
        pm: String,
    ) -> Self {
        Self {
            months_full,
            months_abbrev,
            days_full,
            days_abbrev,
            am,
            pm,
            eras: ERAS.map(String::from),
            numerals: Vec::new(),
            months_tree: OnceCell::new(),
            days_tree: OnceCell::new(),
            numerals_tree: OnceCell::new(),
        }
    }

    /// The English locale: month and day names with three-letter
    /// abbreviations, `AM`/`PM`, and `BCE`/`CE` era labels.
    #[must_use]
    pub fn english() -> Self {
        Self::new(
            MONTHS.iter().map(|s| String::from(*s)).collect(),
            MONTHS.iter().map(|s| String::from(&s[..3])).collect(),
            DAYS.iter().map(|s| String::from(*s)).collect(),
            DAYS.iter().map(|s| String::from(&s[..3])).collect(),
            String::from("AM"),
            String::from("PM"),
        )
    }

    /// Replace the era labels. `eras` alternates before/after spellings,
    /// the first pair being the preferred one.
    #[must_use]
    pub fn with_eras(mut self, eras: [String; 6]) -> Self {
        self.eras = eras;
        self
    }

    /// Attach localized numerals, index zero first, enabling the `%O` and
    /// `%Ey` directives.
    #[must_use]
    pub fn with_numerals(mut self, numerals: Vec<String>) -> Self {
        self.numerals = numerals;
        self.numerals_tree = OnceCell::new();
        self
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Debug for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Locale")
            .field("months_full", &self.months_full)
            .field("days_full", &self.days_full)
            .field("am", &self.am)
            .field("pm", &self.pm)
            .finish_non_exhaustive()
    }
}

impl LocaleCatalog for Locale {
    fn word_list(&self, key: LocaleKey) -> Option<&[String]> {
        match key {
            LocaleKey::MonthsFull => Some(&self.months_full),
            LocaleKey::MonthsAbbrev => Some(&self.months_abbrev),
            LocaleKey::DaysOfWeekFull => Some(&self.days_full),
            LocaleKey::DaysOfWeekAbbrev => Some(&self.days_abbrev),
            LocaleKey::Am => Some(slice::from_ref(&self.am)),
            LocaleKey::Pm => Some(slice::from_ref(&self.pm)),
            LocaleKey::Bce => Some(slice::from_ref(&self.eras[0])),
            LocaleKey::Ce => Some(slice::from_ref(&self.eras[1])),
            LocaleKey::Bce2 => Some(slice::from_ref(&self.eras[2])),
            LocaleKey::Ce2 => Some(slice::from_ref(&self.eras[3])),
            LocaleKey::Bce3 => Some(slice::from_ref(&self.eras[4])),
            LocaleKey::Ce3 => Some(slice::from_ref(&self.eras[5])),
            LocaleKey::LocaleNumerals => {
                (!self.numerals.is_empty()).then_some(self.numerals.as_slice())
            }
            LocaleKey::MonthsComb | LocaleKey::DaysOfWeekComb => None,
        }
    }

    fn index_tree(&self, key: LocaleKey) -> Option<Arc<StrIdxTree>> {
        match key {
            LocaleKey::MonthsComb => Some(Arc::clone(self.months_tree.get_or_init(|| {
                Arc::new(StrIdxTree::from_lists(&[
                    &self.months_full[..],
                    &self.months_abbrev[..],
                ]))
            }))),
            LocaleKey::DaysOfWeekComb => Some(Arc::clone(self.days_tree.get_or_init(|| {
                Arc::new(StrIdxTree::from_lists(&[
                    &self.days_full[..],
                    &self.days_abbrev[..],
                ]))
            }))),
            LocaleKey::LocaleNumerals => {
                if self.numerals.is_empty() {
                    return None;
                }
                Some(Arc::clone(self.numerals_tree.get_or_init(|| {
                    Arc::new(StrIdxTree::from_lists(&[&self.numerals[..]]))
                })))
            }
            key => {
                let words = self.word_list(key)?;
                let mut tree = StrIdxTree::new();
                tree.extend_from_list(words);
                Some(Arc::new(tree))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_lists() {
        let locale = Locale::english();
        let months = locale.word_list(LocaleKey::MonthsFull).unwrap();
        assert_eq!(months.len(), 12);
        assert_eq!(months[0], "January");
        let abbrev = locale.word_list(LocaleKey::MonthsAbbrev).unwrap();
        assert_eq!(abbrev[8], "Sep");
        let days = locale.word_list(LocaleKey::DaysOfWeekFull).unwrap();
        assert_eq!(days[0], "Sunday");
        assert_eq!(locale.word_list(LocaleKey::Am).unwrap(), ["AM"]);
        assert_eq!(locale.word_list(LocaleKey::Bce3).unwrap(), ["b.c."]);
        assert_eq!(locale.word_list(LocaleKey::LocaleNumerals), None);
    }

    #[test]
    fn test_month_tree_greedy() {
        let locale = Locale::english();
        let tree = locale.index_tree(LocaleKey::MonthsComb).unwrap();
        // the full name wins over its abbreviation
        assert_eq!(tree.find("March"), Some((5, 2)));
        assert_eq!(tree.find("Mar"), Some((3, 2)));
        assert_eq!(tree.find("Ma"), None);
        assert_eq!(tree.find("May"), Some((3, 4)));
        assert_eq!(tree.find("Jun"), Some((3, 5)));
        assert_eq!(tree.find("ju"), None);
    }

    #[test]
    fn test_day_tree() {
        let locale = Locale::english();
        let tree = locale.index_tree(LocaleKey::DaysOfWeekComb).unwrap();
        assert_eq!(tree.find("Sunday"), Some((6, 0)));
        assert_eq!(tree.find("mon"), Some((3, 1)));
        assert_eq!(tree.find("S"), None);
        assert_eq!(tree.find("Tue"), Some((3, 2)));
        assert_eq!(tree.find("Thu"), Some((3, 4)));
    }

    #[test]
    fn test_tree_is_cached() {
        let locale = Locale::english();
        let a = locale.index_tree(LocaleKey::MonthsComb).unwrap();
        let b = locale.index_tree(LocaleKey::MonthsComb).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_numerals() {
        let numerals: Vec<String> = (0..10).map(|n| format!("<{n}>")).collect();
        let locale = Locale::english().with_numerals(numerals);
        let tree = locale.index_tree(LocaleKey::LocaleNumerals).unwrap();
        assert_eq!(tree.find("<7>"), Some((3, 7)));
        assert_eq!(tree.find("<1"), None);
    }

    #[test]
    fn test_default_trait_tree() {
        // a catalog relying on the trait's composing default
        struct Minimal(Vec<String>);
        impl LocaleCatalog for Minimal {
            fn word_list(&self, key: LocaleKey) -> Option<&[String]> {
                (key == LocaleKey::MonthsFull).then_some(self.0.as_slice())
            }
        }
        let catalog = Minimal(vec![String::from("vendémiaire"), String::from("brumaire")]);
        let tree = catalog.index_tree(LocaleKey::MonthsComb).unwrap();
        assert_eq!(tree.find("brumaire"), Some((8, 1)));
        assert_eq!(tree.find("Vend"), Some((4, 0)));
        assert_eq!(catalog.index_tree(LocaleKey::DaysOfWeekComb), None);
    }
}
