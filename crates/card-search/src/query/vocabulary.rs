//! Locale keyword tables.
//!
//! Keywords are obtained from a [`Translator`], lower-cased, and indexed so the
//! resolver can map typed words back onto canonical operators and predicates.

use std::hash::Hash;

use fnv::FnvHashMap;

use crate::colors::ColorCatalog;
use crate::i18n::Translator;

use super::operator::{DueKeyword, HasField, Operator, Period, SortField, Status};

// ---------------------------------------------------------------------------
// Tag tables
// ---------------------------------------------------------------------------

pub(crate) const OPERATOR_TAGS: &[(&str, Operator)] = &[
    ("operator-board", Operator::Board),
    ("operator-board-abbrev", Operator::Board),
    ("operator-swimlane", Operator::Swimlane),
    ("operator-swimlane-abbrev", Operator::Swimlane),
    ("operator-list", Operator::List),
    ("operator-list-abbrev", Operator::List),
    ("operator-label", Operator::Label),
    ("operator-label-abbrev", Operator::Label),
    ("operator-user", Operator::User),
    ("operator-user-abbrev", Operator::User),
    ("operator-member", Operator::Member),
    ("operator-member-abbrev", Operator::Member),
    ("operator-assignee", Operator::Assignee),
    ("operator-assignee-abbrev", Operator::Assignee),
    ("operator-status", Operator::Status),
    ("operator-due", Operator::Due),
    ("operator-created", Operator::CreatedAt),
    ("operator-modified", Operator::ModifiedAt),
    ("operator-comment", Operator::Comment),
    ("operator-has", Operator::Has),
    ("operator-sort", Operator::Sort),
    ("operator-limit", Operator::Limit),
];

/// Abbreviations that work in every locale.
const FIXED_ABBREVIATIONS: &[(&str, Operator)] = &[("#", Operator::Label), ("@", Operator::User)];

const DUE_TAGS: &[(&str, DueKeyword)] = &[("predicate-overdue", DueKeyword::Overdue)];

const PERIOD_TAGS: &[(&str, Period)] = &[
    ("predicate-week", Period::Week),
    ("predicate-month", Period::Month),
    ("predicate-quarter", Period::Quarter),
    ("predicate-year", Period::Year),
];

const STATUS_TAGS: &[(&str, Status)] = &[
    ("predicate-archived", Status::Archived),
    ("predicate-all", Status::All),
    ("predicate-open", Status::Open),
    ("predicate-ended", Status::Ended),
    ("predicate-public", Status::Public),
    ("predicate-private", Status::Private),
];

const SORT_TAGS: &[(&str, SortField)] = &[
    ("predicate-due", SortField::DueAt),
    ("predicate-created", SortField::CreatedAt),
    ("predicate-modified", SortField::ModifiedAt),
];

const HAS_TAGS: &[(&str, HasField)] = &[
    ("predicate-description", HasField::Description),
    ("predicate-checklist", HasField::Checklist),
    ("predicate-attachment", HasField::Attachment),
    ("predicate-start", HasField::StartAt),
    ("predicate-end", HasField::EndAt),
    ("predicate-due", HasField::DueAt),
    ("predicate-assignee", HasField::Assignees),
    ("predicate-member", HasField::Members),
];

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

/// Keyword lookup tables for one locale. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    operators: FnvHashMap<String, Operator>,
    due: FnvHashMap<String, DueKeyword>,
    periods: FnvHashMap<String, Period>,
    statuses: FnvHashMap<String, Status>,
    sorts: FnvHashMap<String, SortField>,
    has: FnvHashMap<String, HasField>,
    colors: FnvHashMap<String, String>,
}

impl Vocabulary {
    pub fn build(translator: &dyn Translator, colors: &dyn ColorCatalog) -> Self {
        let mut operators = keyword_table(translator, OPERATOR_TAGS);
        for (abbreviation, operator) in FIXED_ABBREVIATIONS {
            operators.insert((*abbreviation).to_string(), *operator);
        }

        Self {
            operators,
            due: keyword_table(translator, DUE_TAGS),
            periods: keyword_table(translator, PERIOD_TAGS),
            statuses: keyword_table(translator, STATUS_TAGS),
            sorts: keyword_table(translator, SORT_TAGS),
            has: keyword_table(translator, HAS_TAGS),
            colors: colors
                .color_map()
                .into_iter()
                .map(|(name, token)| (name.to_lowercase(), token))
                .collect(),
        }
    }

    /// `keyword` must already be lower-cased.
    pub fn operator(&self, keyword: &str) -> Option<Operator> {
        self.operators.get(keyword).copied()
    }

    pub fn due_keyword(&self, value: &str) -> Option<DueKeyword> {
        lookup(&self.due, value)
    }

    pub fn period(&self, value: &str) -> Option<Period> {
        lookup(&self.periods, value)
    }

    pub fn status(&self, value: &str) -> Option<Status> {
        lookup(&self.statuses, value)
    }

    pub fn sort_field(&self, value: &str) -> Option<SortField> {
        lookup(&self.sorts, value)
    }

    pub fn has_field(&self, value: &str) -> Option<HasField> {
        lookup(&self.has, value)
    }

    /// Canonical color token for a color display name.
    pub fn color(&self, value: &str) -> Option<&str> {
        self.colors.get(&value.to_lowercase()).map(String::as_str)
    }
}

fn keyword_table<T: Copy + Eq + Hash>(
    translator: &dyn Translator,
    tags: &[(&str, T)],
) -> FnvHashMap<String, T> {
    let mut table = FnvHashMap::default();
    for (tag, value) in tags {
        let keyword = translator.translate(tag).trim().to_lowercase();
        if keyword.is_empty() {
            log::warn!("keyword for {tag:?} is empty; it cannot be typed");
            continue;
        }
        if let Some(previous) = table.insert(keyword.clone(), *value) {
            if previous != *value {
                log::warn!("keyword {keyword:?} for {tag:?} shadows an earlier entry");
            }
        }
    }
    table
}

fn lookup<T: Copy>(table: &FnvHashMap<String, T>, value: &str) -> Option<T> {
    table.get(&value.to_lowercase()).copied()
}
