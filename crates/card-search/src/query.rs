//! Card search query language.
//!
//! This module turns a free-form query such as
//! `board:"Sprint 12" #red -status:archived due:week design review` into
//! structured parameters:
//! - Tokenization into operator pairs and free text
//! - Keyword lookup against the active locale
//! - Predicate resolution, including relative date ranges
//! - Error collection with translated messages

mod dates;
mod errors;
mod operator;
mod params;
mod parser;
mod resolver;
mod tokenizer;
mod vocabulary;

// Re-export public types
pub use dates::{Direction, OffsetUnit, RelativeDates, DATE_FORMAT, TIMESTAMP_FORMAT};
pub use errors::{ErrorTag, ErrorValue, QueryError, QueryErrors};
pub use operator::{DueKeyword, HasField, Operator, Period, SortField, SortOrder, Status};
pub use params::{Comparator, PredicateValue, QueryParams};
pub use parser::{Query, QueryParser};
pub use resolver::{PredicateResolver, Resolution};
pub use tokenizer::{
    match_bare_word, match_loose_operator, match_quoted_text, match_unquoted_operator,
    OperatorToken, RuleMatch, Token, Tokenizer, NEGATION_MARKER,
};
pub use vocabulary::Vocabulary;

pub(crate) use tokenizer::is_keyword;
pub(crate) use vocabulary::OPERATOR_TAGS;
