//! Top-level parse pass.

use std::fmt;
use std::sync::Arc;

use chrono::TimeZone;

use crate::colors::{ColorCatalog, LabelColorCatalog, LABEL_COLORS};
use crate::config::SearchConfig;
use crate::error::Result;
use crate::i18n::{KeywordCatalog, Translator};

use super::dates::RelativeDates;
use super::errors::{QueryError, QueryErrors};
use super::operator::Operator;
use super::params::{PredicateValue, QueryParams};
use super::resolver::{PredicateResolver, Resolution};
use super::tokenizer::{Token, Tokenizer};
use super::vocabulary::Vocabulary;

// ---------------------------------------------------------------------------
// Query parser
// ---------------------------------------------------------------------------

/// Parses card search strings for one locale.
///
/// The vocabulary is built once here and shared read-only by every parse, so
/// a parser can sit behind an `Arc` and serve concurrent requests.
pub struct QueryParser {
    vocabulary: Vocabulary,
    translator: Arc<dyn Translator>,
    colors: Arc<dyn ColorCatalog>,
}

impl QueryParser {
    pub fn new(translator: Arc<dyn Translator>, colors: Arc<dyn ColorCatalog>) -> Self {
        let vocabulary = Vocabulary::build(translator.as_ref(), colors.as_ref());
        Self {
            vocabulary,
            translator,
            colors,
        }
    }

    /// Parser with the built-in English keywords and board label colors.
    pub fn english() -> Self {
        let translator = Arc::new(KeywordCatalog::english());
        let colors = Arc::new(LabelColorCatalog::new(translator.as_ref(), LABEL_COLORS));
        Self::new(translator, colors)
    }

    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        config.validate()?;
        let translator = Arc::new(config.translator());
        let colors = Arc::new(config.color_catalog(translator.as_ref()));
        Ok(Self::new(translator, colors))
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Parses `input` with relative dates anchored to the local clock.
    pub fn parse(&self, input: &str) -> Query {
        self.parse_at(input, &RelativeDates::now())
    }

    /// Parses `input` with relative dates anchored to `dates`.
    ///
    /// Never fails: malformed operator values become entries in
    /// [`Query::errors`] and the rest of the query is still honored.
    pub fn parse_at<Tz: TimeZone>(&self, input: &str, dates: &RelativeDates<Tz>) -> Query
    where
        Tz::Offset: fmt::Display,
    {
        let mut query = Query::new(self.translator.clone(), self.colors.clone());
        let resolver = PredicateResolver::new(&self.vocabulary, dates);

        for token in Tokenizer::new(input) {
            log::debug!("query token: {token:?}");
            match token {
                Token::Operator(token) => match resolver.resolve(&token) {
                    Resolution::Predicate(operator, predicate) => {
                        query.add_predicate(operator, predicate)
                    }
                    Resolution::Error(operator, error) => query.add_error(operator, error),
                },
                Token::Text(fragment) => {
                    if !fragment.is_empty() {
                        query.params.push_text(fragment);
                    }
                }
            }
        }

        log::debug!("query params: {:?}", query.params);
        query
    }
}

impl fmt::Debug for QueryParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryParser")
            .field("vocabulary", &self.vocabulary)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Result of one parse: resolved predicates, residual text and errors.
#[derive(Debug)]
pub struct Query {
    params: QueryParams,
    errors: QueryErrors,
}

impl Query {
    fn new(translator: Arc<dyn Translator>, colors: Arc<dyn ColorCatalog>) -> Self {
        Self {
            params: QueryParams::new(),
            errors: QueryErrors::new(translator, colors),
        }
    }

    pub fn query_params(&self) -> &QueryParams {
        &self.params
    }

    pub fn add_predicate(&mut self, operator: Operator, predicate: PredicateValue) {
        self.params.add_predicate(operator, predicate);
    }

    fn add_error(&mut self, operator: Operator, error: QueryError) {
        self.errors.add_error(operator, error);
    }

    /// Values that still have to be resolved against live board data.
    ///
    /// Each unresolved one should be reported back through
    /// [`Query::add_not_found`].
    pub fn name_lookups(&self) -> Vec<(Operator, String)> {
        self.params
            .params()
            .filter(|(operator, _)| operator.is_name_lookup())
            .flat_map(|(operator, values)| {
                values
                    .iter()
                    .filter_map(move |value| value.as_str().map(|name| (operator, name.to_string())))
            })
            .collect()
    }

    pub fn add_not_found(&mut self, operator: Operator, value: &str) -> Result<()> {
        self.errors.add_not_found(operator, value)
    }

    pub fn has_errors(&self) -> bool {
        self.errors.has_errors()
    }

    pub fn errors(&self) -> Vec<&QueryError> {
        self.errors.errors()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.error_messages()
    }

    pub fn query_errors(&self) -> &QueryErrors {
        &self.errors
    }

    pub fn into_parts(self) -> (QueryParams, QueryErrors) {
        (self.params, self.errors)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::error::SearchError;
    use crate::query::errors::{ErrorTag, ErrorValue};
    use crate::query::operator::{HasField, SortField, SortOrder};
    use crate::query::params::Comparator;

    fn parse(input: &str) -> Query {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 14, 0, 0).unwrap();
        QueryParser::english().parse_at(input, &RelativeDates::anchored_at(&now))
    }

    fn scalar(value: &str) -> PredicateValue {
        PredicateValue::Scalar(value.to_string())
    }

    #[test]
    fn blank_query() {
        let query = parse("   ");
        assert_eq!(query.query_params(), &QueryParams::new());
        assert!(!query.has_errors());
    }

    #[test]
    fn quoted_board_name() {
        let query = parse(r#"board:"Release 1""#);
        let params = query.query_params();
        assert_eq!(params.get_predicates(Operator::Board), &[scalar("Release 1")]);
        assert_eq!(params.text(), "");
        assert!(!query.has_errors());
    }

    #[test]
    fn label_color_abbreviation() {
        let query = parse("#red");
        assert_eq!(
            query.query_params().get_predicate(Operator::Label),
            Some(&PredicateValue::ColorLabel("red".into()))
        );
    }

    #[test]
    fn overdue_is_before_today() {
        let query = parse("due:overdue");
        assert_eq!(
            query.query_params().get_predicate(Operator::Due),
            Some(&PredicateValue::Range {
                comparator: Comparator::Lt,
                date: "2026-10-18".into(),
            })
        );
    }

    #[test]
    fn due_in_days() {
        let query = parse("due:7");
        assert_eq!(
            query.query_params().get_predicate(Operator::Due),
            Some(&PredicateValue::Range {
                comparator: Comparator::Lt,
                date: "2026-10-26T00:00:00+00:00".into(),
            })
        );
    }

    #[test]
    fn descending_sort() {
        let query = parse("sort:-created");
        assert_eq!(
            query.query_params().get_predicate(Operator::Sort),
            Some(&PredicateValue::Sort {
                field: SortField::CreatedAt,
                order: SortOrder::Descending,
            })
        );
    }

    #[test]
    fn invalid_sort_is_reported_not_recorded() {
        let query = parse("sort:bogus");
        assert!(!query.query_params().has_operator(Operator::Sort));
        assert_eq!(
            query.errors(),
            vec![&QueryError::new(ErrorTag::SortInvalid, ErrorValue::text("bogus"))]
        );
        assert_eq!(query.error_messages(), vec!["sort of 'bogus' is invalid"]);
    }

    #[test]
    fn status_with_residual_text() {
        let query = parse("status:open urgent meeting");
        let params = query.query_params();
        assert_eq!(params.get_predicate(Operator::Status), Some(&scalar("open")));
        assert_eq!(params.text(), "urgent meeting");
    }

    #[test]
    fn zero_limit_is_invalid() {
        let query = parse("limit:0");
        assert!(!query.query_params().has_operator(Operator::Limit));
        assert_eq!(query.errors()[0].tag, ErrorTag::LimitInvalid);
    }

    #[test]
    fn negated_has() {
        let query = parse("has:-description");
        assert_eq!(
            query.query_params().get_predicate(Operator::Has),
            Some(&PredicateValue::Has {
                field: HasField::Description,
                exists: false,
            })
        );
    }

    #[test]
    fn repeated_status_keeps_all_values_first_wins() {
        let query = parse("status:open status:archived");
        let params = query.query_params();
        assert_eq!(
            params.get_predicates(Operator::Status),
            &[scalar("open"), scalar("archived")]
        );
        assert_eq!(params.get_predicate(Operator::Status), Some(&scalar("open")));
    }

    #[test]
    fn residual_text_keeps_order() {
        let query = parse(r#"fix "login page" list:Doing 'two words' again"#);
        assert_eq!(query.query_params().text(), "fix login page two words again");
        assert_eq!(
            query.query_params().get_predicates(Operator::List),
            &[scalar("Doing")]
        );
    }

    #[test]
    fn bad_tokens_do_not_stop_the_parse() {
        let query = parse("colour:red due:soon #blocked limit:x @alice notes");
        let params = query.query_params();
        assert_eq!(params.get_predicates(Operator::Label), &[scalar("blocked")]);
        assert_eq!(params.get_predicates(Operator::User), &[scalar("alice")]);
        assert_eq!(params.text(), "notes");

        let tags: Vec<_> = query.errors().iter().map(|error| error.tag).collect();
        assert_eq!(
            tags,
            vec![
                ErrorTag::UnknownOperator,
                ErrorTag::NumberExpected,
                ErrorTag::LimitInvalid,
            ]
        );
        assert_eq!(
            query.error_messages(),
            vec![
                "colour is not an operator".to_string(),
                "operator due expected a number, got 'soon'".to_string(),
                "x is not a valid limit.  Limit should be a positive integer.".to_string(),
            ]
        );
    }

    #[test]
    fn created_date_errors_are_grouped_under_due() {
        let query = parse("created:soon");
        let errors = query.query_errors();
        assert!(errors.errors_for(Operator::CreatedAt).is_empty());
        assert_eq!(errors.errors_for(Operator::Due).len(), 1);
    }

    #[test]
    fn not_found_round_trip() {
        let mut query = parse("board:Ops #navy label:blocked @ghost status:open");
        let lookups = query.name_lookups();
        assert_eq!(
            lookups,
            vec![
                (Operator::Board, "Ops".to_string()),
                (Operator::Label, "navy".to_string()),
                (Operator::Label, "blocked".to_string()),
                (Operator::User, "ghost".to_string()),
            ]
        );

        for (operator, value) in &lookups {
            query.add_not_found(*operator, value).unwrap();
        }
        assert_eq!(
            query.error_messages(),
            vec![
                "Board 'Ops' not found.".to_string(),
                "Label color navy not found.".to_string(),
                "Label 'blocked' not found.".to_string(),
                "Username 'ghost' not found.".to_string(),
            ]
        );
        assert!(matches!(
            query.add_not_found(Operator::Status, "open"),
            Err(SearchError::InvalidInput(_))
        ));
    }

    #[test]
    fn localized_keywords() {
        let mut config = SearchConfig::default();
        config.language = "fr".to_string();
        config
            .keywords
            .insert("operator-board".to_string(), "tableau".to_string());
        config
            .keywords
            .insert("predicate-open".to_string(), "ouvert".to_string());
        let parser = QueryParser::from_config(&config).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 14, 0, 0).unwrap();
        let query = parser.parse_at(
            "Tableau:Ops status:ouvert board:Ops",
            &RelativeDates::anchored_at(&now),
        );

        assert_eq!(
            query.query_params().get_predicates(Operator::Board),
            &[scalar("Ops")]
        );
        assert_eq!(
            query.query_params().get_predicate(Operator::Status),
            Some(&scalar("open"))
        );
        assert_eq!(query.errors()[0].value, ErrorValue::text("board"));
    }

    #[test]
    fn parser_is_reusable_across_parses() {
        let parser = QueryParser::english();
        let first = parser.parse("limit:0");
        let second = parser.parse("limit:5");
        assert!(first.has_errors());
        assert!(!second.has_errors());
        assert_eq!(
            second.query_params().get_predicate(Operator::Limit),
            Some(&PredicateValue::IntegerBound(5))
        );
    }

    #[test]
    fn into_parts_hands_over_params() {
        let (params, errors) = parse("list:Done sort:nope").into_parts();
        assert!(params.has_operator(Operator::List));
        assert!(errors.has_errors());
    }
}
