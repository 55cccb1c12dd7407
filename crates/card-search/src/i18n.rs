//! Keyword and message localization.
//!
//! The parser never reaches for a global translation table. A [`Translator`]
//! is handed to [`crate::QueryParser`] once and shared with every query it
//! produces.

use std::collections::BTreeMap;

use fnv::FnvHashMap;

use crate::query::ErrorValue;

/// Maps canonical tags to locale text.
pub trait Translator: Send + Sync {
    /// Locale text for `tag`. Implementations return the tag itself when they
    /// have no entry, so a missing keyword is still typeable.
    fn translate(&self, tag: &str) -> String;

    /// Renders the message for an error `tag` with its offending value.
    fn translate_with(&self, tag: &str, value: &ErrorValue) -> String;
}

/// Built-in English keywords and messages.
pub const ENGLISH: &[(&str, &str)] = &[
    // Operators
    ("operator-board", "board"),
    ("operator-board-abbrev", "b"),
    ("operator-swimlane", "swimlane"),
    ("operator-swimlane-abbrev", "s"),
    ("operator-list", "list"),
    ("operator-list-abbrev", "l"),
    ("operator-label", "label"),
    ("operator-label-abbrev", "#"),
    ("operator-user", "user"),
    ("operator-user-abbrev", "@"),
    ("operator-member", "member"),
    ("operator-member-abbrev", "m"),
    ("operator-assignee", "assignee"),
    ("operator-assignee-abbrev", "a"),
    ("operator-status", "status"),
    ("operator-due", "due"),
    ("operator-created", "created"),
    ("operator-modified", "modified"),
    ("operator-comment", "comment"),
    ("operator-has", "has"),
    ("operator-sort", "sort"),
    ("operator-limit", "limit"),
    // Predicates
    ("predicate-archived", "archived"),
    ("predicate-all", "all"),
    ("predicate-open", "open"),
    ("predicate-ended", "ended"),
    ("predicate-public", "public"),
    ("predicate-private", "private"),
    ("predicate-overdue", "overdue"),
    ("predicate-week", "week"),
    ("predicate-month", "month"),
    ("predicate-quarter", "quarter"),
    ("predicate-year", "year"),
    ("predicate-due", "due"),
    ("predicate-created", "created"),
    ("predicate-modified", "modified"),
    ("predicate-description", "description"),
    ("predicate-checklist", "checklist"),
    ("predicate-attachment", "attachment"),
    ("predicate-start", "start"),
    ("predicate-end", "end"),
    ("predicate-assignee", "assignee"),
    ("predicate-member", "member"),
    // Label colors
    ("color-white", "white"),
    ("color-green", "green"),
    ("color-yellow", "yellow"),
    ("color-orange", "orange"),
    ("color-red", "red"),
    ("color-purple", "purple"),
    ("color-blue", "blue"),
    ("color-sky", "sky"),
    ("color-lime", "lime"),
    ("color-pink", "pink"),
    ("color-black", "black"),
    ("color-silver", "silver"),
    ("color-peachpuff", "peachpuff"),
    ("color-crimson", "crimson"),
    ("color-plum", "plum"),
    ("color-darkgreen", "darkgreen"),
    ("color-slateblue", "slateblue"),
    ("color-magenta", "magenta"),
    ("color-gold", "gold"),
    ("color-navy", "navy"),
    ("color-gray", "gray"),
    ("color-saddlebrown", "saddlebrown"),
    ("color-paleturquoise", "paleturquoise"),
    ("color-mistyrose", "mistyrose"),
    ("color-indigo", "indigo"),
    // Messages
    ("operator-unknown-error", "%s is not an operator"),
    (
        "operator-number-expected",
        "operator __operator__ expected a number, got '__value__'",
    ),
    ("operator-sort-invalid", "sort of '%s' is invalid"),
    ("operator-status-invalid", "'%s' is not a valid status"),
    ("operator-has-invalid", "%s is not a valid existence check"),
    (
        "operator-limit-invalid",
        "%s is not a valid limit.  Limit should be a positive integer.",
    ),
    ("board-title-not-found", "Board '%s' not found."),
    ("swimlane-title-not-found", "Swimlane '%s' not found."),
    ("list-title-not-found", "List '%s' not found."),
    ("label-not-found", "Label '%s' not found."),
    ("label-color-not-found", "Label color %s not found."),
    ("user-username-not-found", "Username '%s' not found."),
    (
        "comment-not-found",
        "Card with comment containing text '%s' not found.",
    ),
];

/// A tag → text table implementing [`Translator`].
#[derive(Debug, Clone, Default)]
pub struct KeywordCatalog {
    entries: FnvHashMap<String, String>,
}

impl KeywordCatalog {
    pub fn english() -> Self {
        Self::from_pairs(ENGLISH.iter().copied())
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(tag, text)| (tag.to_string(), text.to_string()))
                .collect(),
        }
    }

    /// Layers `overrides` on top of the current entries.
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, String>) -> Self {
        for (tag, text) in overrides {
            self.entries.insert(tag.clone(), text.clone());
        }
        self
    }

    pub fn get(&self, tag: &str) -> Option<&str> {
        self.entries.get(tag).map(String::as_str)
    }
}

impl Translator for KeywordCatalog {
    fn translate(&self, tag: &str) -> String {
        match self.get(tag) {
            Some(text) => text.to_string(),
            None => {
                log::debug!("no translation for tag {tag:?}");
                tag.to_string()
            }
        }
    }

    fn translate_with(&self, tag: &str, value: &ErrorValue) -> String {
        let template = self.translate(tag);
        match value {
            ErrorValue::Text(text) => template.replace("%s", text),
            ErrorValue::OperatorValue { operator, value } => template
                .replace("__operator__", operator)
                .replace("__value__", value)
                .replace("%s", value),
        }
    }
}
