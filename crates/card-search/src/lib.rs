//! Card search query parsing library.
//!
//! This crate provides the search box language for kanban boards:
//! - Locale-aware operator keywords and abbreviations
//! - Tokenization and predicate resolution into query parameters
//! - Relative date ranges anchored at the caller's clock
//! - Translated error messages for unknown operators and values

pub mod colors;
pub mod config;
pub mod error;
pub mod i18n;
pub mod query;

// Re-export main types
pub use colors::{ColorCatalog, LabelColorCatalog, LABEL_COLORS};
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use i18n::{KeywordCatalog, Translator};
pub use query::{
    Operator, PredicateValue, Query, QueryError, QueryErrors, QueryParams, QueryParser,
    RelativeDates,
};
