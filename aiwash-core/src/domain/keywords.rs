//! Keyword pre-filter for technology-related sentences
//!
//! Upstream extraction keeps only sentences mentioning at least one term
//! from a configured keyword list (one term per line, `#` comments allowed).
//! Single tokens match with word-ish boundaries so hyphenated terms still
//! work; multi-word phrases tolerate flexible whitespace.

use crate::error::Result;
use regex::Regex;

/// Minimum sentence length considered for keyword matching
const MIN_SENTENCE_CHARS: usize = 4;

/// Compiled keyword matcher over a normalized term list.
#[derive(Debug)]
pub struct KeywordFilter {
    keywords: Vec<String>,
    pattern: Option<Regex>,
}

impl KeywordFilter {
    /// Build a filter from an iterator of terms. Terms are lowercased and
    /// deduplicated, preserving first-seen order. An empty list matches
    /// nothing.
    pub fn new<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keywords: Vec<String> = Vec::new();
        for term in terms {
            let term = term.as_ref().trim().to_lowercase();
            if term.is_empty() || keywords.contains(&term) {
                continue;
            }
            keywords.push(term);
        }

        let pattern = if keywords.is_empty() {
            None
        } else {
            let alternatives = keywords
                .iter()
                .map(|kw| {
                    kw.split_whitespace()
                        .map(regex::escape)
                        .collect::<Vec<_>>()
                        .join(r"\s+")
                })
                .collect::<Vec<_>>()
                .join("|");
            // word-ish boundaries: no letter or digit directly adjacent, so
            // "ml" does not match inside "html" but "GPT-4" still matches
            let source =
                format!(r"(?i)(?:^|[^A-Za-z0-9])(?:{alternatives})(?:[^A-Za-z0-9]|$)");
            Some(Regex::new(&source)?)
        };

        Ok(Self { keywords, pattern })
    }

    /// Parse a keyword file body: one term per line, `#` starts a comment,
    /// surrounding quotes are stripped.
    pub fn from_lines(body: &str) -> Result<Self> {
        let terms = body.lines().filter_map(|raw| {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                return None;
            }
            let unquoted = line
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .or_else(|| line.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
                .unwrap_or(line);
            let unquoted = unquoted.trim();
            (!unquoted.is_empty()).then(|| unquoted.to_string())
        });
        Self::new(terms)
    }

    /// The normalized keyword list, in first-seen order
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Whether a sentence mentions any keyword
    pub fn matches(&self, sentence: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|p| p.is_match(sentence))
    }

    /// Keep the sentences that mention a keyword, skipping very short or
    /// digit-only lines.
    pub fn filter<S: AsRef<str>>(&self, sentences: &[S]) -> Vec<String> {
        sentences
            .iter()
            .map(|s| s.as_ref().trim())
            .filter(|s| s.len() >= MIN_SENTENCE_CHARS)
            .filter(|s| !s.chars().all(|c| c.is_ascii_digit()))
            .filter(|s| self.matches(s))
            .map(|s| s.to_string())
            .collect()
    }
}
