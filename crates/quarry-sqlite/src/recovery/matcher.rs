//! Fuzzy scoring of literals against stored values

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

/// Scores stored values against one literal
///
/// Matching is case-insensitive and whitespace separates atoms, so
/// `"zoro ark"` scores against `"ZORRO ARK"`. No pattern syntax
/// (`^`, `$`, `!`) is interpreted.
pub struct ValueScorer {
    matcher: Matcher,
    pattern: Pattern,
    buf: Vec<char>,
}

impl ValueScorer {
    pub fn new(literal: &str) -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
            pattern: Pattern::new(
                literal,
                CaseMatching::Ignore,
                Normalization::Smart,
                AtomKind::Fuzzy,
            ),
            buf: Vec::new(),
        }
    }

    /// Score for `value`, `None` when it does not match at all
    pub fn score(&mut self, value: &str) -> Option<u32> {
        let haystack = Utf32Str::new(value, &mut self.buf);
        self.pattern.score(haystack, &mut self.matcher)
    }
}
