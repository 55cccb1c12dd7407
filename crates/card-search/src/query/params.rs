//! Resolved predicates and residual text of one parse.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::operator::{HasField, Operator, SortField, SortOrder};

/// Comparison applied to a date bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    #[serde(rename = "$lt")]
    Lt,
    #[serde(rename = "$gte")]
    Gte,
}

/// A typed constraint value. The variant is determined by the owning operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PredicateValue {
    /// Date bound. `date` is `YYYY-MM-DD` for rollovers and a full timestamp
    /// for day offsets.
    Range {
        #[serde(rename = "operator")]
        comparator: Comparator,
        #[serde(rename = "value")]
        date: String,
    },
    Sort {
        #[serde(rename = "name")]
        field: SortField,
        order: SortOrder,
    },
    Has {
        field: HasField,
        exists: bool,
    },
    Scalar(String),
    IntegerBound(u32),
    /// Canonical label color token.
    ColorLabel(String),
}

impl PredicateValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) | Self::ColorLabel(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

/// Ordered multi-map from operator to resolved values plus free text.
///
/// Every operator keeps all of its values, including ones a consumer treats
/// as singular (`status`, `due`, `sort`, `limit`). [`QueryParams::get_predicate`]
/// only ever returns the first of them; later repeats are kept but unread.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryParams {
    params: IndexMap<Operator, Vec<PredicateValue>>,
    text: String,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_operator(&self, operator: Operator) -> bool {
        self.params
            .get(&operator)
            .is_some_and(|values| !values.is_empty())
    }

    pub fn add_predicate(&mut self, operator: Operator, predicate: PredicateValue) {
        self.params.entry(operator).or_default().push(predicate);
    }

    /// Replaces every value of `operator`.
    pub fn set_predicates(&mut self, operator: Operator, predicates: Vec<PredicateValue>) {
        self.params.insert(operator, predicates);
    }

    pub fn get_predicate(&self, operator: Operator) -> Option<&PredicateValue> {
        self.params.get(&operator).and_then(|values| values.first())
    }

    pub fn get_predicates(&self, operator: Operator) -> &[PredicateValue] {
        self.params
            .get(&operator)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All operators and their values, in first-seen order.
    pub fn params(&self) -> impl Iterator<Item = (Operator, &[PredicateValue])> {
        self.params
            .iter()
            .map(|(operator, values)| (*operator, values.as_slice()))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Appends a free-text fragment, space-separated from earlier ones.
    pub fn push_text(&mut self, fragment: &str) {
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(fragment);
    }
}
