use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::colors::{LabelColorCatalog, LABEL_COLORS};
use crate::error::{Result, SearchError};
use crate::i18n::{KeywordCatalog, Translator};
use crate::query::{is_keyword, OPERATOR_TAGS};

pub const DEFAULT_LANGUAGE: &str = "en";

/// Parser settings, usually stored as JSON next to the application config.
///
/// ```json
/// {
///   "language": "fr",
///   "keywords": { "operator-board": "tableau", "operator-board-abbrev": "t" },
///   "label_colors": ["red", "green"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Locale name, kept as metadata and logged on load. The keywords
    /// themselves come from `keywords`.
    pub language: String,
    /// Tag → text overrides layered on the built-in English catalog.
    pub keywords: BTreeMap<String, String>,
    /// Canonical label color tokens.
    pub label_colors: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            keywords: BTreeMap::new(),
            label_colors: LABEL_COLORS.iter().map(|color| color.to_string()).collect(),
        }
    }
}

impl SearchConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| SearchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&raw)?;
        log::info!(
            "loaded search config for language {:?} from {}",
            config.language,
            path.display()
        );
        Ok(config)
    }

    /// Rejects operator keywords the tokenizer could never produce. Message,
    /// predicate and color tags are free text and are not checked.
    pub fn validate(&self) -> Result<()> {
        for (tag, text) in &self.keywords {
            if !is_operator_tag(tag) {
                continue;
            }
            let valid = if tag.ends_with("-abbrev") {
                is_typeable_abbreviation(text)
            } else {
                is_keyword(text)
            };
            if !valid {
                return Err(SearchError::InvalidConfig(format!(
                    "keyword {text:?} for {tag} cannot be typed as an operator"
                )));
            }
        }
        Ok(())
    }

    pub fn translator(&self) -> KeywordCatalog {
        KeywordCatalog::english().with_overrides(&self.keywords)
    }

    pub fn color_catalog(&self, translator: &dyn Translator) -> LabelColorCatalog {
        LabelColorCatalog::new(translator, self.label_colors.as_slice())
    }
}

fn is_operator_tag(tag: &str) -> bool {
    OPERATOR_TAGS.iter().any(|(operator_tag, _)| *operator_tag == tag)
}

/// Abbreviations are either `#`/`@` or a word used before `:`.
fn is_typeable_abbreviation(text: &str) -> bool {
    matches!(text, "#" | "@") || is_keyword(text)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::query::{ErrorValue, Operator, QueryParser};

    #[test]
    fn defaults_are_english() {
        let config = SearchConfig::default();
        assert_eq!(config.language, "en");
        assert_eq!(config.label_colors.len(), LABEL_COLORS.len());
        assert!(config.validate().is_ok());
        assert_eq!(config.translator().translate("operator-due"), "due");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = SearchConfig::from_json_str(r#"{ "language": "de" }"#).unwrap();
        assert_eq!(config.language, "de");
        assert!(config.keywords.is_empty());
        assert_eq!(config.label_colors.len(), LABEL_COLORS.len());
    }

    #[test]
    fn rejects_untypeable_keywords() {
        let result = SearchConfig::from_json_str(
            r#"{ "keywords": { "operator-board": "my board" } }"#,
        );
        assert!(matches!(result, Err(SearchError::InvalidConfig(_))));

        let result = SearchConfig::from_json_str(
            r#"{ "keywords": { "operator-label-abbrev": "%" } }"#,
        );
        assert!(matches!(result, Err(SearchError::InvalidConfig(_))));
    }

    #[test]
    fn messages_and_predicates_are_not_validated_as_keywords() {
        let config = SearchConfig::from_json_str(
            r#"{ "keywords": {
                "operator-unknown-error": "%s ist kein Operator",
                "predicate-open": "offen"
            } }"#,
        )
        .unwrap();
        assert_eq!(config.keywords.len(), 2);
    }

    #[test]
    fn every_message_tag_can_be_localized() {
        let config = SearchConfig::from_json_str(
            r#"{ "language": "de", "keywords": {
                "operator-unknown-error": "%s ist kein Operator",
                "operator-number-expected": "Operator __operator__ erwartet eine Zahl, nicht '__value__'",
                "operator-sort-invalid": "Sortierung '%s' ist ungültig",
                "operator-status-invalid": "'%s' ist kein gültiger Status",
                "operator-has-invalid": "%s ist keine gültige Prüfung",
                "operator-limit-invalid": "%s ist kein gültiges Limit.",
                "board-title-not-found": "Board '%s' nicht gefunden.",
                "label-color-not-found": "Labelfarbe %s nicht gefunden."
            } }"#,
        )
        .unwrap();

        let translator = config.translator();
        assert_eq!(
            translator.translate_with("operator-sort-invalid", &ErrorValue::text("bogus")),
            "Sortierung 'bogus' ist ungültig"
        );
        assert_eq!(
            translator.translate_with(
                "operator-number-expected",
                &ErrorValue::OperatorValue {
                    operator: "due".to_string(),
                    value: "bald".to_string(),
                },
            ),
            "Operator due erwartet eine Zahl, nicht 'bald'"
        );
    }

    #[test]
    fn keywords_with_non_latin_marks_are_typeable() {
        let config = SearchConfig::from_json_str(
            r#"{ "language": "th", "keywords": { "operator-label": "\u0e1b\u0e49\u0e32\u0e22" } }"#,
        )
        .unwrap();
        let parser = QueryParser::from_config(&config).unwrap();
        assert_eq!(
            parser.vocabulary().operator("\u{0E1B}\u{0E49}\u{0E32}\u{0E22}"),
            Some(Operator::Label)
        );
    }

    #[test]
    fn language_is_metadata_only() {
        let config = SearchConfig::from_json_str(r#"{ "language": "" }"#).unwrap();
        assert_eq!(config.translator().translate("operator-board"), "board");
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let result = SearchConfig::from_json_str("{ language: ");
        assert!(matches!(result, Err(SearchError::Serialization(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "language": "fr", "keywords": {{ "operator-board": "tableau" }} }}"#
        )
        .unwrap();

        let config = SearchConfig::load(file.path()).unwrap();
        assert_eq!(config.language, "fr");
        assert_eq!(config.translator().translate("operator-board"), "tableau");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = SearchConfig::load(&dir.path().join("search.json"));
        assert!(matches!(result, Err(SearchError::Io { .. })));
    }
}
