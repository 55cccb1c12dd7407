//! Label color catalog.

use std::collections::BTreeMap;

use crate::i18n::Translator;

/// Canonical label color tokens of a board.
pub const LABEL_COLORS: &[&str] = &[
    "white",
    "green",
    "yellow",
    "orange",
    "red",
    "purple",
    "blue",
    "sky",
    "lime",
    "pink",
    "black",
    "silver",
    "peachpuff",
    "crimson",
    "plum",
    "darkgreen",
    "slateblue",
    "magenta",
    "gold",
    "navy",
    "gray",
    "saddlebrown",
    "paleturquoise",
    "mistyrose",
    "indigo",
];

/// Distinguishes label colors from label names.
pub trait ColorCatalog: Send + Sync {
    /// Display name → canonical color token.
    fn color_map(&self) -> BTreeMap<String, String>;

    /// Every canonical color token.
    fn label_colors(&self) -> &[String];

    fn is_label_color(&self, token: &str) -> bool {
        self.label_colors().iter().any(|color| color == token)
    }
}

/// Color catalog whose display names come from `color-<token>` translations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelColorCatalog {
    colors: Vec<String>,
    display_names: BTreeMap<String, String>,
}

impl LabelColorCatalog {
    pub fn new<S: AsRef<str>>(translator: &dyn Translator, colors: &[S]) -> Self {
        let colors: Vec<String> = colors.iter().map(|c| c.as_ref().to_string()).collect();
        let display_names = colors
            .iter()
            .map(|color| (translator.translate(&format!("color-{color}")), color.clone()))
            .collect();
        Self {
            colors,
            display_names,
        }
    }
}

impl ColorCatalog for LabelColorCatalog {
    fn color_map(&self) -> BTreeMap<String, String> {
        self.display_names.clone()
    }

    fn label_colors(&self) -> &[String] {
        &self.colors
    }
}
