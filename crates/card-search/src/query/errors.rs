//! Structured query errors.
//!
//! Only tags and offending values are stored. Message text is rendered by the
//! [`Translator`] when [`QueryErrors::error_messages`] is called.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use crate::colors::ColorCatalog;
use crate::error::{Result, SearchError};
use crate::i18n::Translator;

use super::operator::Operator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorTag {
    #[serde(rename = "operator-unknown-error")]
    UnknownOperator,
    #[serde(rename = "operator-number-expected")]
    NumberExpected,
    #[serde(rename = "operator-sort-invalid")]
    SortInvalid,
    #[serde(rename = "operator-status-invalid")]
    StatusInvalid,
    #[serde(rename = "operator-has-invalid")]
    HasInvalid,
    #[serde(rename = "operator-limit-invalid")]
    LimitInvalid,
    #[serde(rename = "board-title-not-found")]
    BoardNotFound,
    #[serde(rename = "swimlane-title-not-found")]
    SwimlaneNotFound,
    #[serde(rename = "list-title-not-found")]
    ListNotFound,
    #[serde(rename = "label-not-found")]
    LabelNotFound,
    #[serde(rename = "label-color-not-found")]
    LabelColorNotFound,
    #[serde(rename = "user-username-not-found")]
    UserNotFound,
    #[serde(rename = "comment-not-found")]
    CommentNotFound,
}

impl ErrorTag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnknownOperator => "operator-unknown-error",
            Self::NumberExpected => "operator-number-expected",
            Self::SortInvalid => "operator-sort-invalid",
            Self::StatusInvalid => "operator-status-invalid",
            Self::HasInvalid => "operator-has-invalid",
            Self::LimitInvalid => "operator-limit-invalid",
            Self::BoardNotFound => "board-title-not-found",
            Self::SwimlaneNotFound => "swimlane-title-not-found",
            Self::ListNotFound => "list-title-not-found",
            Self::LabelNotFound => "label-not-found",
            Self::LabelColorNotFound => "label-color-not-found",
            Self::UserNotFound => "user-username-not-found",
            Self::CommentNotFound => "comment-not-found",
        }
    }
}

impl fmt::Display for ErrorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The offending part of the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorValue {
    Text(String),
    /// Keyword as typed together with the value it rejected.
    OperatorValue { operator: String, value: String },
}

impl ErrorValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryError {
    pub tag: ErrorTag,
    pub value: ErrorValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

impl QueryError {
    pub fn new(tag: ErrorTag, value: ErrorValue) -> Self {
        Self {
            tag,
            value,
            color: None,
        }
    }
}

/// Errors of one parse, grouped by operator in first-seen order.
pub struct QueryErrors {
    errors: IndexMap<Operator, Vec<QueryError>>,
    translator: Arc<dyn Translator>,
    colors: Arc<dyn ColorCatalog>,
}

impl QueryErrors {
    pub fn new(translator: Arc<dyn Translator>, colors: Arc<dyn ColorCatalog>) -> Self {
        Self {
            errors: IndexMap::new(),
            translator,
            colors,
        }
    }

    pub fn add_error(&mut self, operator: Operator, error: QueryError) {
        self.errors.entry(operator).or_default().push(error);
    }

    /// Records that `value` did not resolve to anything for `operator`.
    ///
    /// Fails for operators that do not name things (status, due, sort, ...).
    pub fn add_not_found(&mut self, operator: Operator, value: &str) -> Result<()> {
        let error = match operator {
            Operator::Label => {
                let color = self.colors.is_label_color(value);
                let tag = if color {
                    ErrorTag::LabelColorNotFound
                } else {
                    ErrorTag::LabelNotFound
                };
                QueryError {
                    tag,
                    value: ErrorValue::text(value),
                    color: Some(color),
                }
            }
            _ => {
                let tag = not_found_tag(operator).ok_or_else(|| {
                    SearchError::InvalidInput(format!(
                        "operator {operator} has no not-found error"
                    ))
                })?;
                QueryError::new(tag, ErrorValue::text(value))
            }
        };
        self.add_error(operator, error);
        Ok(())
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Errors recorded for one operator, in the order they were added.
    pub fn errors_for(&self, operator: Operator) -> &[QueryError] {
        self.errors
            .get(&operator)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn errors(&self) -> Vec<&QueryError> {
        self.errors.values().flatten().collect()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors
            .values()
            .flatten()
            .map(|error| {
                self.translator
                    .translate_with(error.tag.as_str(), &error.value)
            })
            .collect()
    }
}

impl fmt::Debug for QueryErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryErrors")
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

impl Serialize for QueryErrors {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.errors.serialize(serializer)
    }
}

fn not_found_tag(operator: Operator) -> Option<ErrorTag> {
    match operator {
        Operator::Board => Some(ErrorTag::BoardNotFound),
        Operator::Swimlane => Some(ErrorTag::SwimlaneNotFound),
        Operator::List => Some(ErrorTag::ListNotFound),
        Operator::Label => Some(ErrorTag::LabelNotFound),
        Operator::Comment => Some(ErrorTag::CommentNotFound),
        Operator::User | Operator::Assignee | Operator::Member => Some(ErrorTag::UserNotFound),
        _ => None,
    }
}
