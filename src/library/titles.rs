//! Title normalization.
//!
//! Two operations live here and must not be confused:
//!
//! - [`simplify`] normalizes one title on its own (case, diacritics,
//!   punctuation, whitespace). It is what gets stored as `simple_title`.
//! - [`condense`] works across a whole title list, merging entries that only
//!   differ superficially into one search term per equivalence class.
//!
//! [`reduce`] combines both: condensation first, per-title simplification as
//! the fallback when condensation has nothing to offer.

use crate::constants::{library::DEFAULT_SHOW_TYPE, titles::ARTICLES};
use crate::models::show::ShowSnapshot;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Canonical text form (Unicode NFC) used for every stored free-text field.
#[must_use]
pub fn canonical_text(text: &str) -> String {
    text.nfc().collect()
}

/// Lowercases, strips diacritics and apostrophes, and collapses every other
/// run of punctuation, underscores, or whitespace into a single space.
#[must_use]
pub fn simplify(title: &str) -> String {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();

    let separators = SEPARATORS.get_or_init(|| Regex::new(r"[\W_]+").expect("Invalid Regex"));

    let stripped = title
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| !matches!(c, '\'' | '\u{2019}' | '`'))
        .collect::<String>()
        .to_lowercase();

    separators.replace_all(&stripped, " ").trim().to_string()
}

/// Equivalence key for condensation: simplified tokens without articles,
/// sorted so token order does not matter.
fn condensation_key(simplified: &str) -> String {
    let mut tokens: Vec<&str> = simplified
        .split_whitespace()
        .filter(|token| !ARTICLES.contains(token))
        .collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Merges titles that differ only in punctuation, articles, or token order.
///
/// Keeps the simplified form of the first title seen in each class, in input
/// order. Titles that simplify to nothing (or to articles only) are dropped,
/// so the result can be empty even for non-empty input.
#[must_use]
pub fn condense<S: AsRef<str>>(titles: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut condensed = Vec::new();

    for title in titles {
        let simplified = simplify(title.as_ref());
        let key = condensation_key(&simplified);
        if key.is_empty() {
            continue;
        }
        if seen.insert(key) {
            condensed.push(simplified);
        }
    }

    condensed
}

/// Condenses `titles`, falling back to one simplified entry per input title
/// when condensation yields nothing.
#[must_use]
pub fn reduce<S: AsRef<str>>(titles: &[S]) -> Vec<String> {
    let condensed = condense(titles);
    if !condensed.is_empty() {
        return condensed;
    }

    titles.iter().map(|t| simplify(t.as_ref())).collect()
}

/// Result of a title lookup: a single best term or the full list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TitleQuery {
    First(Option<String>),
    All(Vec<String>),
}

impl TitleQuery {
    /// The best search term, if any.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::First(title) => title.as_deref(),
            Self::All(titles) => titles.first().map(String::as_str),
        }
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::First(title) => title.into_iter().collect(),
            Self::All(titles) => titles,
        }
    }
}

#[must_use]
pub fn pick_first_or_all(titles: Vec<String>, first: bool) -> TitleQuery {
    if first {
        TitleQuery::First(titles.into_iter().next())
    } else {
        TitleQuery::All(titles)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    pub first: bool,
    pub condense: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            first: true,
            condense: true,
        }
    }
}

/// Search titles for a show snapshot. Non-show records are not ours to
/// answer for and yield `None`.
#[must_use]
pub fn query(show: &ShowSnapshot, options: QueryOptions) -> Option<TitleQuery> {
    if show.show_type != DEFAULT_SHOW_TYPE {
        return None;
    }

    let titles = show.title_strings();
    let titles = if options.condense {
        reduce(&titles)
    } else {
        titles
    };

    Some(pick_first_or_all(titles, options.first))
}
