//! Per-operator value grammar.

use std::fmt;

use chrono::TimeZone;

use super::dates::{Direction, OffsetUnit, RelativeDates};
use super::errors::{ErrorTag, ErrorValue, QueryError};
use super::operator::{DueKeyword, Operator, SortOrder};
use super::params::{Comparator, PredicateValue};
use super::tokenizer::OperatorToken;
use super::vocabulary::Vocabulary;

/// Outcome of resolving one operator token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Predicate(Operator, PredicateValue),
    Error(Operator, QueryError),
}

/// Turns operator tokens into typed predicates.
pub struct PredicateResolver<'a, Tz: TimeZone> {
    vocabulary: &'a Vocabulary,
    dates: &'a RelativeDates<Tz>,
}

impl<'a, Tz: TimeZone> PredicateResolver<'a, Tz>
where
    Tz::Offset: fmt::Display,
{
    pub fn new(vocabulary: &'a Vocabulary, dates: &'a RelativeDates<Tz>) -> Self {
        Self { vocabulary, dates }
    }

    pub fn resolve(&self, token: &OperatorToken<'_>) -> Resolution {
        let keyword = token.keyword.to_lowercase();
        let Some(operator) = self.vocabulary.operator(&keyword) else {
            return Resolution::Error(
                Operator::Unknown,
                QueryError::new(ErrorTag::UnknownOperator, ErrorValue::Text(keyword)),
            );
        };

        let value = token.value;
        let resolved = match operator {
            Operator::Label => Ok(self.resolve_label(value)),
            Operator::Sort => self.resolve_sort(token),
            Operator::Status => self.resolve_status(value),
            Operator::Has => self.resolve_has(token),
            Operator::Limit => resolve_limit(value),
            date if date.is_date() => self.resolve_date(date, &keyword, value),
            // board, swimlane, list, user, member, assignee and comment values
            // are names checked against live data after parsing
            _ => Ok(PredicateValue::Scalar(value.to_string())),
        };

        match resolved {
            Ok(predicate) => Resolution::Predicate(operator, predicate),
            Err((group, error)) => Resolution::Error(group, error),
        }
    }

    fn resolve_label(&self, value: &str) -> PredicateValue {
        match self.vocabulary.color(value) {
            Some(color) => PredicateValue::ColorLabel(color.to_string()),
            None => PredicateValue::Scalar(value.to_string()),
        }
    }

    /// Date errors are always filed under `due`, whichever date operator
    /// produced them.
    fn resolve_date(
        &self,
        operator: Operator,
        keyword: &str,
        value: &str,
    ) -> Result<PredicateValue, (Operator, QueryError)> {
        let number_expected = || {
            (
                Operator::Due,
                QueryError::new(
                    ErrorTag::NumberExpected,
                    ErrorValue::OperatorValue {
                        operator: keyword.to_string(),
                        value: value.to_string(),
                    },
                ),
            )
        };

        if let Some(days) = parse_day_count(value) {
            // due:N covers today through N days ahead; created/modified:N look back N days
            let bound = if operator == Operator::Due {
                days.checked_add(1)
                    .and_then(|days| {
                        self.dates
                            .offset_date(days, OffsetUnit::Days, Direction::Forward)
                    })
                    .map(|date| (Comparator::Lt, date))
            } else {
                self.dates
                    .offset_date(days, OffsetUnit::Days, Direction::Backward)
                    .map(|date| (Comparator::Gte, date))
            };
            return bound
                .map(|(comparator, date)| {
                    range(comparator, RelativeDates::<Tz>::format_timestamp(&date))
                })
                .ok_or_else(number_expected);
        }

        if let Some(period) = self.vocabulary.period(value) {
            return self
                .dates
                .rollover(period)
                .map(|date| range(Comparator::Lt, RelativeDates::<Tz>::format_date(date)))
                .ok_or_else(number_expected);
        }

        if operator == Operator::Due
            && self.vocabulary.due_keyword(value) == Some(DueKeyword::Overdue)
        {
            let today = RelativeDates::<Tz>::format_date(self.dates.today());
            return Ok(range(Comparator::Lt, today));
        }

        Err(number_expected())
    }

    fn resolve_sort(
        &self,
        token: &OperatorToken<'_>,
    ) -> Result<PredicateValue, (Operator, QueryError)> {
        let name = token.unnegated();
        let field = self.vocabulary.sort_field(name).ok_or_else(|| {
            (
                Operator::Sort,
                QueryError::new(ErrorTag::SortInvalid, ErrorValue::text(name)),
            )
        })?;
        let order = if token.negated {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        };
        Ok(PredicateValue::Sort { field, order })
    }

    fn resolve_status(&self, value: &str) -> Result<PredicateValue, (Operator, QueryError)> {
        let status = self.vocabulary.status(value).ok_or_else(|| {
            (
                Operator::Status,
                QueryError::new(ErrorTag::StatusInvalid, ErrorValue::text(value)),
            )
        })?;
        Ok(PredicateValue::Scalar(status.as_str().to_string()))
    }

    fn resolve_has(
        &self,
        token: &OperatorToken<'_>,
    ) -> Result<PredicateValue, (Operator, QueryError)> {
        let name = token.unnegated();
        let field = self.vocabulary.has_field(name).ok_or_else(|| {
            (
                Operator::Has,
                QueryError::new(ErrorTag::HasInvalid, ErrorValue::text(name)),
            )
        })?;
        Ok(PredicateValue::Has {
            field,
            exists: !token.negated,
        })
    }
}

fn resolve_limit(value: &str) -> Result<PredicateValue, (Operator, QueryError)> {
    match value.parse::<u32>() {
        Ok(limit) if limit >= 1 => Ok(PredicateValue::IntegerBound(limit)),
        _ => Err((
            Operator::Limit,
            QueryError::new(ErrorTag::LimitInvalid, ErrorValue::text(value)),
        )),
    }
}

/// A whole-number day count. Signs and trailing text are not numbers here.
fn parse_day_count(value: &str) -> Option<u32> {
    if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

fn range(comparator: Comparator, date: String) -> PredicateValue {
    PredicateValue::Range { comparator, date }
}
