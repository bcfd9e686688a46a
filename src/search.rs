//! Search expression compiler and matcher.
//!
//! Supports a small subset of the host's search syntax:
//! - `ab` finds items containing a word beginning with `ab` (`ab*` is the same)
//! - `*ab` finds items containing a word ending with `ab`
//! - `*ab*` finds items containing `ab` anywhere
//! - `ab ba` requires both tokens to match (implicit AND)
//! - `"a green apple"` finds the literal phrase
//!
//! Matching is case-insensitive. Malformed input never fails: an unterminated
//! quote simply falls back to word tokens.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// Splits raw input into quoted phrases and word tokens (word chars and `*`).
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]+)"|([*\w]+)"#).expect("token pattern is valid"));

/// Kind of a compiled search token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Token must begin a word (`word`, `word*`)
    Prefix,
    /// Token may start mid-word but must end a word (`*word`)
    Suffix,
    /// Token may appear anywhere (`*word*`)
    Contains,
    /// Quoted phrase, matched as a literal substring
    Phrase,
}

/// One compiled matcher unit.
#[derive(Debug, Clone)]
pub struct SearchToken {
    kind: TokenKind,
    text: String,
    regex: Regex,
}

impl SearchToken {
    fn new(kind: TokenKind, text: String) -> Option<Self> {
        let escaped = regex::escape(&text);
        let pattern = match kind {
            TokenKind::Prefix => format!(r"\b{}", escaped),
            TokenKind::Suffix => format!(r"{}\b", escaped),
            TokenKind::Contains | TokenKind::Phrase => escaped,
        };

        match RegexBuilder::new(&pattern).case_insensitive(true).build() {
            Ok(regex) => Some(Self { kind, text, regex }),
            Err(e) => {
                tracing::debug!("dropping search token {:?}: {}", text, e);
                None
            }
        }
    }

    /// Returns the token kind.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Returns the token text with wildcard markers removed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns true if the token matches somewhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// A compiled search expression: an ordered set of tokens combined with AND.
///
/// An empty expression accepts everything.
#[derive(Debug, Clone, Default)]
pub struct SearchMatcher {
    tokens: Vec<SearchToken>,
}

impl SearchMatcher {
    /// Compiles a raw search expression.
    ///
    /// # Examples
    /// ```
    /// use catlist::SearchMatcher;
    ///
    /// let matcher = SearchMatcher::compile("*ab*");
    /// assert!(matcher.test("xyzaby"));
    /// ```
    pub fn compile(expression: &str) -> Self {
        let mut tokens = Vec::new();

        for caps in TOKEN_RE.captures_iter(expression) {
            let token = if let Some(phrase) = caps.get(1) {
                SearchToken::new(TokenKind::Phrase, phrase.as_str().to_string())
            } else if let Some(word) = caps.get(2) {
                classify_word(word.as_str())
            } else {
                None
            };

            if let Some(token) = token {
                tokens.push(token);
            }
        }

        Self { tokens }
    }

    /// Returns true if every token matches somewhere in `text`.
    pub fn test(&self, text: &str) -> bool {
        self.tokens.iter().all(|token| token.is_match(text))
    }

    /// Returns true if the expression has no tokens (matches everything).
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the compiled tokens in input order.
    pub fn tokens(&self) -> &[SearchToken] {
        &self.tokens
    }
}

/// Turns a word token into a matcher. Wildcard-only tokens are ignored.
fn classify_word(word: &str) -> Option<SearchToken> {
    let text: String = word.chars().filter(|c| *c != '*').collect();
    if text.is_empty() {
        return None;
    }

    let leading = word.starts_with('*');
    let trailing = word.len() > 1 && word.ends_with('*');

    let kind = match (leading, trailing) {
        (true, true) => TokenKind::Contains,
        (true, false) => TokenKind::Suffix,
        (false, _) => TokenKind::Prefix,
    };

    SearchToken::new(kind, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_expression_matches_everything() {
        let matcher = SearchMatcher::compile("");
        assert!(matcher.is_empty());
        assert!(matcher.test("anything"));
        assert!(matcher.test(""));

        let blank = SearchMatcher::compile("   ");
        assert!(blank.is_empty());
        assert!(blank.test("x"));
    }

    #[test]
    fn test_bare_word_matches_word_start() {
        let matcher = SearchMatcher::compile("ab");
        assert!(matcher.test("abacus"));
        assert!(matcher.test("the abacus"));
        assert!(!matcher.test("xyzab"));
        assert_eq!(matcher.tokens()[0].kind(), TokenKind::Prefix);
    }

    #[test]
    fn test_trailing_wildcard_is_prefix() {
        let matcher = SearchMatcher::compile("ab*");
        assert!(matcher.test("abacus"));
        assert!(!matcher.test("xyzab"));
        assert_eq!(matcher.tokens()[0].text(), "ab");
    }

    #[test]
    fn test_surrounding_wildcards_match_anywhere() {
        let matcher = SearchMatcher::compile("*ab*");
        assert!(matcher.test("xyzaby"));
        assert!(matcher.test("AB"));
        assert_eq!(matcher.tokens()[0].kind(), TokenKind::Contains);
    }

    #[test]
    fn test_leading_wildcard_requires_word_end() {
        let matcher = SearchMatcher::compile("*ab");
        assert!(matcher.test("grab"));
        assert!(matcher.test("grab bag"));
        assert!(!matcher.test("grabby"));
        assert_eq!(matcher.tokens()[0].kind(), TokenKind::Suffix);
    }

    #[test]
    fn test_phrase_is_literal() {
        let matcher = SearchMatcher::compile("\"a b\"");
        assert!(matcher.test("a b c"));
        assert!(!matcher.test("ab c"));
        assert_eq!(matcher.tokens()[0].kind(), TokenKind::Phrase);
    }

    #[test]
    fn test_phrase_ignores_word_boundaries() {
        let matcher = SearchMatcher::compile("\"en app\"");
        assert!(matcher.test("Green Apple"));
    }

    #[test]
    fn test_tokens_are_anded() {
        let matcher = SearchMatcher::compile("ab ba");
        assert!(!matcher.test("abba"));
        assert!(matcher.test("abba ball"));
        assert!(!matcher.test("ab only"));
    }

    #[test]
    fn test_case_insensitive() {
        let matcher = SearchMatcher::compile("APP");
        assert!(matcher.test("apple"));
        assert!(SearchMatcher::compile("\"GREEN apple\"").test("a green Apple"));
    }

    #[test]
    fn test_metacharacters_are_literal_in_phrases() {
        let matcher = SearchMatcher::compile("\"a.c\"");
        assert!(matcher.test("a.c"));
        assert!(!matcher.test("abc"));

        let parens = SearchMatcher::compile("\"(x)\"");
        assert!(parens.test("value (x)"));
        assert!(!parens.test("value x"));
    }

    #[test]
    fn test_punctuation_splits_words() {
        // "a.b" is two prefix tokens, not a pattern with a wildcard dot
        let matcher = SearchMatcher::compile("a.b");
        assert_eq!(matcher.tokens().len(), 2);
        assert!(matcher.test("alpha beta"));
        assert!(!matcher.test("axb"));
    }

    #[test]
    fn test_unterminated_quote_degrades_to_words() {
        let matcher = SearchMatcher::compile("\"green apple");
        assert_eq!(matcher.tokens().len(), 2);
        assert!(matcher.test("apple, green"));
        assert!(!matcher.test("green pear"));
    }

    #[test]
    fn test_wildcard_only_tokens_are_ignored() {
        let matcher = SearchMatcher::compile("* **");
        assert!(matcher.is_empty());
        assert!(matcher.test("anything"));
    }

    #[test]
    fn test_internal_wildcards_are_stripped() {
        let matcher = SearchMatcher::compile("a*b");
        assert_eq!(matcher.tokens()[0].text(), "ab");
        assert!(matcher.test("abc"));
        assert!(!matcher.test("axb"));
    }
}
