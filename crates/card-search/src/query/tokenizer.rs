//! Query tokenizer.
//!
//! A cursor walks the query left to right. At each position the match rules
//! are tried in order against the remaining input:
//!
//! 1. unquoted operator: `label:red`, `#red`, `@alice`
//! 2. loose operator: `board:"Release 1"`, `due:7`, `#'to do'`
//! 3. quoted text: `"weekly sync"`
//! 4. bare word: `urgent`
//!
//! Every rule consumes at least one character plus any trailing whitespace, so
//! the scan always terminates.

use std::sync::OnceLock;

use regex::Regex;

static KEYWORD_RUN: OnceLock<Regex> = OnceLock::new();

// ---------------------------------------------------------------------------
// Token types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Operator(OperatorToken<'a>),
    Text(&'a str),
}

/// An `operator:value` pair as typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorToken<'a> {
    /// Keyword before `:`, or the abbreviation character. Not yet lower-cased.
    pub keyword: &'a str,
    /// Value with quotes removed.
    pub value: &'a str,
    /// Whether the value starts with the negation marker.
    pub negated: bool,
}

pub const NEGATION_MARKER: char = '-';

impl<'a> OperatorToken<'a> {
    fn new(keyword: &'a str, value: &'a str) -> Self {
        Self {
            keyword,
            value,
            negated: value.starts_with(NEGATION_MARKER),
        }
    }

    /// The value with a leading negation marker removed.
    pub fn unnegated(&self) -> &'a str {
        if self.negated {
            &self.value[NEGATION_MARKER.len_utf8()..]
        } else {
            self.value
        }
    }
}

/// A rule matched at the cursor: the token and how many bytes it consumed.
pub type RuleMatch<'a> = (Token<'a>, usize);

type Rule = for<'a> fn(&'a str) -> Option<RuleMatch<'a>>;

const RULES: &[Rule] = &[
    match_unquoted_operator,
    match_loose_operator,
    match_quoted_text,
    match_bare_word,
];

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

pub struct Tokenizer<'a> {
    input: &'a str,
    cursor: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        let input = input.trim();
        Self { input, cursor: 0 }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let input = self.input;
        let rest = input[self.cursor..].trim_start();
        self.cursor = input.len() - rest.len();
        if rest.is_empty() {
            return None;
        }

        let (token, consumed) = RULES.iter().find_map(|rule| rule(rest))?;
        debug_assert!(consumed > 0);
        self.cursor += consumed;
        Some(token)
    }
}

// ---------------------------------------------------------------------------
// Match rules
// ---------------------------------------------------------------------------

/// `<letters>:<letters>` or `#<letters>` / `@<letters>`, followed by
/// whitespace or end of input.
pub fn match_unquoted_operator(rest: &str) -> Option<RuleMatch<'_>> {
    let (keyword, value_start) = operator_prefix(rest)?;
    let value_end = value_start + keyword_run_len(&rest[value_start..]);
    if value_end == value_start {
        return None;
    }
    let end = trailing_whitespace_end(rest, value_end)?;
    let token = OperatorToken::new(keyword, &rest[value_start..value_end]);
    Some((Token::Operator(token), end))
}

/// `<letters>:` or `#` / `@`, an optional run of quote characters, then the
/// shortest value followed by the same quote run and whitespace or end of
/// input. Shorter quote runs are tried when no closing run is found, so an
/// unbalanced quote becomes part of the value.
pub fn match_loose_operator(rest: &str) -> Option<RuleMatch<'_>> {
    let (keyword, after_prefix) = operator_prefix(rest)?;
    let quote_run = rest[after_prefix..]
        .bytes()
        .take_while(|byte| is_quote(char::from(*byte)))
        .count();

    (0..=quote_run).rev().find_map(|quote_len| {
        let quote = &rest[after_prefix..after_prefix + quote_len];
        let value_start = after_prefix + quote_len;
        let (value_end, end) = closing_delimiter(rest, value_start, quote)?;
        let token = OperatorToken::new(keyword, &rest[value_start..value_end]);
        Some((Token::Operator(token), end))
    })
}

/// A span delimited by matching `"` or `'`, followed by whitespace or end of
/// input.
pub fn match_quoted_text(rest: &str) -> Option<RuleMatch<'_>> {
    let quote = rest.chars().next().filter(|ch| is_quote(*ch))?;
    let start = quote.len_utf8();
    let (text_end, end) = closing_delimiter(rest, start, &rest[..start])?;
    Some((Token::Text(&rest[start..text_end]), end))
}

/// The next run of non-whitespace characters.
pub fn match_bare_word(rest: &str) -> Option<RuleMatch<'_>> {
    let word_end = rest
        .char_indices()
        .find(|(_, ch)| ch.is_whitespace())
        .map_or(rest.len(), |(index, _)| index);
    if word_end == 0 {
        return None;
    }
    let end = trailing_whitespace_end(rest, word_end)?;
    Some((Token::Text(&rest[..word_end]), end))
}

// ---------------------------------------------------------------------------
// Scanning helpers
// ---------------------------------------------------------------------------

/// Returns the keyword and the byte offset just past the operator prefix.
fn operator_prefix(rest: &str) -> Option<(&str, usize)> {
    let first = rest.chars().next()?;
    if is_abbreviation(first) {
        return Some((&rest[..first.len_utf8()], first.len_utf8()));
    }
    let keyword_end = keyword_run_len(rest);
    if keyword_end == 0 || !rest[keyword_end..].starts_with(':') {
        return None;
    }
    Some((&rest[..keyword_end], keyword_end + 1))
}

/// Finds the first position at or after `start` where `quote` is followed by
/// whitespace or end of input. Returns the value end and the end of the
/// trailing whitespace. Values never cross a line break.
fn closing_delimiter(rest: &str, start: usize, quote: &str) -> Option<(usize, usize)> {
    let mut position = start;
    loop {
        if rest[position..].starts_with(quote) {
            if let Some(end) = trailing_whitespace_end(rest, position + quote.len()) {
                return Some((position, end));
            }
        }
        let ch = rest[position..].chars().next()?;
        if is_line_break(ch) {
            return None;
        }
        position += ch.len_utf8();
    }
}

/// End of the whitespace run starting at `position`, or `None` when neither
/// whitespace nor end of input is there.
fn trailing_whitespace_end(rest: &str, position: usize) -> Option<usize> {
    let tail = &rest[position..];
    if tail.is_empty() {
        return Some(position);
    }
    let trimmed = tail.trim_start();
    if trimmed.len() == tail.len() {
        return None;
    }
    Some(rest.len() - trimmed.len())
}

/// Length of the leading run of letters and marks. Marks are included so
/// keywords in decomposed form, or in scripts that write vowels and tones as
/// marks, scan as one word.
fn keyword_run_len(text: &str) -> usize {
    keyword_run().find(text).map_or(0, |run| run.end())
}

fn keyword_run() -> &'static Regex {
    KEYWORD_RUN.get_or_init(|| {
        Regex::new(r"^[\p{L}\p{M}]*").expect("keyword run pattern is a valid regex")
    })
}

/// Whether `text` is a non-empty run of letters and marks, i.e. something the
/// tokenizer reads as an operator keyword.
pub(crate) fn is_keyword(text: &str) -> bool {
    !text.is_empty() && keyword_run_len(text) == text.len()
}

fn is_abbreviation(ch: char) -> bool {
    matches!(ch, '#' | '@')
}

fn is_quote(ch: char) -> bool {
    matches!(ch, '"' | '\'')
}

fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
