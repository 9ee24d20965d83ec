//! Fragment repair for pagination-mangled sentence segments
//!
//! Plain-text filings interleave page markers ("— 12 —") and pagination
//! artifacts with running text, so upstream sentence segmentation emits a
//! mix of complete sentences, page-number lines, and mid-sentence fragments.
//! This module repairs those segments into display-ready sentences:
//!
//! 1. [`FragmentReconstructor::merge_page_fragments`] removes page markers
//!    and re-joins sentences split across page breaks, preferring recovery
//!    from the raw source text when it is available.
//! 2. [`FragmentReconstructor::merge_sentence_fragments`] drops boilerplate
//!    lines, merges dangling continuations, and normalizes the result.
//!
//! Reconstruction never fails: malformed input worst-cases to the cleaned-up
//! fragment itself. Only structural well-formedness is guaranteed, not
//! semantic correctness of the merge.

use regex::Regex;
use tracing::warn;

/// Characters that terminate a sentence
const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// How far (in bytes) to scan the raw source text on each side of a located
/// fragment when recovering the full surrounding sentence
pub const RAW_CONTEXT_WINDOW: usize = 180;

/// Repairs raw sentence-segmentation output into well-formed sentences.
#[derive(Debug)]
pub struct FragmentReconstructor {
    page_marker: Regex,
    page_number_line: Regex,
}

impl Default for FragmentReconstructor {
    fn default() -> Self {
        Self::new()
    }
}

impl FragmentReconstructor {
    /// Create a reconstructor with the standard page-marker patterns.
    pub fn new() -> Self {
        Self {
            // dash, digits, dash with ASCII hyphen, en dash, and em dash variants
            page_marker: Regex::new(r"[-\u{2013}\u{2014}]\s*\d+\s*[-\u{2013}\u{2014}]")
                .expect("static page marker pattern"),
            page_number_line: Regex::new(r"^\s*\d+\s*$").expect("static page number pattern"),
        }
    }

    /// Run both repair passes and return display-ready sentences.
    pub fn reconstruct(&self, segments: &[String], raw_source_text: Option<&str>) -> Vec<String> {
        let page_merged = self.merge_page_fragments(segments, raw_source_text);
        self.merge_sentence_fragments(&page_merged)
    }

    /// Re-join sentences that were split by an inline page marker.
    ///
    /// A segment is page-fragment-shaped when it contains a page marker and
    /// is not itself a complete sentence (no uppercase start, or no terminal
    /// punctuation). Complete sentences pass through unchanged. Fragments are
    /// recovered from `raw_source_text` when possible, otherwise rebuilt by
    /// concatenating the neighbors that the fragment visibly belongs to.
    ///
    /// Running this pass on its own output is a no-op.
    pub fn merge_page_fragments(
        &self,
        segments: &[String],
        raw_source_text: Option<&str>,
    ) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(segments.len());
        let mut i = 0;

        while i < segments.len() {
            let segment = segments[i].as_str();
            if !self.is_page_fragment(segment) {
                out.push(segment.to_string());
                i += 1;
                continue;
            }

            let stripped = collapse_whitespace(&self.strip_page_markers(segment));
            if stripped.is_empty() {
                // marker-only line: explicit boilerplate, dropped
                i += 1;
                continue;
            }

            if let Some(raw) = raw_source_text {
                if let Some(recovered) = self.recover_from_raw(segment, &stripped, raw) {
                    let mut next = i + 1;
                    // the recovered sentence may already cover the following
                    // segment; consume it rather than emitting it twice
                    if let Some(following) = segments.get(i + 1) {
                        let following = collapse_whitespace(following);
                        if !following.is_empty()
                            && collapse_whitespace(&recovered).contains(&following)
                        {
                            next = i + 2;
                        }
                    }
                    out.push(normalize_sentence(&recovered));
                    i = next;
                    continue;
                }
                warn!(
                    fragment = segment,
                    "page fragment not found in raw source text; falling back to concatenation"
                );
            }

            // Literal concatenation fallback: previous emitted sentence (when
            // the fragment continues it), the stripped fragment, and the next
            // segment (when the fragment is left unterminated).
            let mut pieces: Vec<String> = Vec::new();
            if starts_lowercase(&stripped) {
                if let Some(previous) = out.pop() {
                    pieces.push(previous);
                }
            }
            let fragment_terminated = ends_with_terminator(&stripped);
            pieces.push(stripped);
            let mut next = i + 1;
            if !fragment_terminated {
                if let Some(following) = segments.get(i + 1) {
                    let following = collapse_whitespace(following);
                    if !following.is_empty() {
                        pieces.push(following);
                        next = i + 2;
                    }
                }
            }
            let merged = self.strip_page_markers(&pieces.join(" "));
            out.push(normalize_sentence(&merged));
            i = next;
        }

        out
    }

    /// Merge dangling continuation fragments and normalize each sentence.
    ///
    /// Page-number-only lines and "Table of Contents" entries are skipped.
    /// While a segment is incomplete (trailing semicolon, or no terminal
    /// punctuation), the next non-boilerplate segment is appended if it
    /// starts with a lowercase letter; otherwise merging stops and the
    /// segment is normalized as-is.
    pub fn merge_sentence_fragments(&self, segments: &[String]) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(segments.len());
        let mut i = 0;

        while i < segments.len() {
            let segment = segments[i].trim();
            if self.is_boilerplate(segment) {
                i += 1;
                continue;
            }

            let mut acc = segment.to_string();
            let mut next = i + 1;
            while is_incomplete(&acc) {
                let mut candidate = next;
                while candidate < segments.len()
                    && self.is_boilerplate(segments[candidate].trim())
                {
                    candidate += 1;
                }
                match segments.get(candidate) {
                    Some(following) if starts_lowercase(following.trim()) => {
                        let lead = acc.trim_end().trim_end_matches(';').trim_end().to_string();
                        acc = format!("{} {}", lead, following.trim());
                        next = candidate + 1;
                    }
                    _ => break,
                }
            }

            out.push(normalize_sentence(&acc));
            i = next;
        }

        out
    }

    /// Whether a segment looks like a sentence broken by a page marker
    fn is_page_fragment(&self, segment: &str) -> bool {
        if !self.page_marker.is_match(segment) {
            return false;
        }
        let trimmed = segment.trim();
        !starts_uppercase(trimmed) || !ends_with_terminator(trimmed)
    }

    /// Remove every page-marker occurrence from a string
    fn strip_page_markers(&self, text: &str) -> String {
        self.page_marker.replace_all(text, " ").into_owned()
    }

    /// Boilerplate segments that are dropped outright
    fn is_boilerplate(&self, segment: &str) -> bool {
        segment.is_empty()
            || self.page_number_line.is_match(segment)
            || segment.eq_ignore_ascii_case("table of contents")
            || self.strip_page_markers(segment).trim().is_empty()
    }

    /// Locate a fragment in the raw source text and recover the full
    /// sentence around it.
    ///
    /// Lookup order: the literal segment, the marker-stripped fragment, then
    /// a whitespace-tolerant pattern built from the fragment's tokens. On a
    /// hit, the match is expanded to the nearest sentence terminators within
    /// [`RAW_CONTEXT_WINDOW`] bytes on each side.
    fn recover_from_raw(&self, segment: &str, stripped: &str, raw: &str) -> Option<String> {
        let span = find_exact(raw, segment.trim())
            .or_else(|| find_exact(raw, stripped))
            .or_else(|| find_tolerant(raw, stripped));
        let (start, end) = span?;

        let sentence_start = scan_back_to_terminator(raw, start);
        let sentence_end = scan_forward_to_terminator(raw, end);
        if sentence_start >= sentence_end {
            return None;
        }

        let recovered = self.strip_page_markers(&raw[sentence_start..sentence_end]);
        let recovered = collapse_whitespace(&recovered);
        if recovered.is_empty() {
            None
        } else {
            Some(recovered)
        }
    }
}

/// Crate-level entry point: repair a sequence of raw segments into
/// display-ready sentences, optionally consulting the raw source text the
/// segments came from.
pub fn reconstruct_sentences(segments: &[String], raw_source_text: Option<&str>) -> Vec<String> {
    FragmentReconstructor::new().reconstruct(segments, raw_source_text)
}

fn find_exact(raw: &str, needle: &str) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return None;
    }
    raw.find(needle).map(|start| (start, start + needle.len()))
}

fn find_tolerant(raw: &str, fragment: &str) -> Option<(usize, usize)> {
    let tokens: Vec<&str> = fragment.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }
    let pattern = tokens
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join(r"\s+");
    let re = Regex::new(&pattern).ok()?;
    re.find(raw).map(|m| (m.start(), m.end()))
}

/// Walk back from `pos` to just after the previous sentence terminator,
/// bounded by [`RAW_CONTEXT_WINDOW`].
fn scan_back_to_terminator(raw: &str, pos: usize) -> usize {
    let mut window_start = pos.saturating_sub(RAW_CONTEXT_WINDOW);
    while window_start > 0 && !raw.is_char_boundary(window_start) {
        window_start -= 1;
    }
    let slice = &raw[window_start..pos];
    match slice.char_indices().rev().find(|(_, c)| SENTENCE_TERMINATORS.contains(c)) {
        Some((idx, c)) => window_start + idx + c.len_utf8(),
        None => window_start,
    }
}

/// Walk forward from `pos` through the next sentence terminator, bounded by
/// [`RAW_CONTEXT_WINDOW`].
fn scan_forward_to_terminator(raw: &str, pos: usize) -> usize {
    let mut window_end = (pos + RAW_CONTEXT_WINDOW).min(raw.len());
    while window_end < raw.len() && !raw.is_char_boundary(window_end) {
        window_end += 1;
    }
    let slice = &raw[pos..window_end];
    match slice.char_indices().find(|(_, c)| SENTENCE_TERMINATORS.contains(c)) {
        Some((idx, c)) => pos + idx + c.len_utf8(),
        None => window_end,
    }
}

/// Collapse internal whitespace runs to single spaces and trim.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collapse whitespace, capitalize a lowercase leading letter, and ensure a
/// terminal `.` when no terminator is present. Empty input stays empty.
fn normalize_sentence(text: &str) -> String {
    let collapsed = collapse_whitespace(text);
    if collapsed.is_empty() {
        return collapsed;
    }

    let mut chars = collapsed.chars();
    let first = chars.next().unwrap_or_default();
    let mut normalized = if first.is_lowercase() {
        let mut s: String = first.to_uppercase().collect();
        s.push_str(chars.as_str());
        s
    } else {
        collapsed
    };

    if !ends_with_terminator(&normalized) {
        normalized.push('.');
    }
    normalized
}

fn starts_uppercase(text: &str) -> bool {
    text.chars().next().is_some_and(|c| c.is_uppercase())
}

fn starts_lowercase(text: &str) -> bool {
    text.chars().next().is_some_and(|c| c.is_lowercase())
}

fn ends_with_terminator(text: &str) -> bool {
    text.trim_end()
        .chars()
        .next_back()
        .is_some_and(|c| SENTENCE_TERMINATORS.contains(&c))
}

fn is_incomplete(sentence: &str) -> bool {
    let trimmed = sentence.trim_end();
    trimmed.ends_with(';') || !ends_with_terminator(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reconstructor() -> FragmentReconstructor {
        FragmentReconstructor::new()
    }

    #[test]
    fn detects_page_fragment_shapes() {
        let r = reconstructor();
        assert!(r.is_page_fragment("supports forecasting — 12 —"));
        assert!(r.is_page_fragment("Our AI platform supports forecasting — 12 —"));
        assert!(!r.is_page_fragment("Our platform — 12 — is deployed."));
        assert!(!r.is_page_fragment("No marker here at all."));
    }

    #[test]
    fn strips_all_dash_variants() {
        let r = reconstructor();
        for marker in ["- 3 -", "– 3 –", "— 3 —"] {
            let text = format!("before {marker} after");
            let stripped = r.strip_page_markers(&text);
            assert!(!r.page_marker.is_match(&stripped), "marker survived: {stripped}");
        }
    }

    #[test]
    fn marker_only_segment_is_dropped() {
        let r = reconstructor();
        let segments = vec!["— 7 —".to_string(), "A complete sentence.".to_string()];
        let merged = r.merge_page_fragments(&segments, None);
        assert_eq!(merged, vec!["A complete sentence.".to_string()]);
    }

    #[test]
    fn raw_text_recovery_prefers_original_sentence() {
        let r = reconstructor();
        let raw = "Earlier text ends here. Our AI platform supports forecasting \
                   — 12 — across the retail business. Unrelated trailing text.";
        let segments = vec![
            "Our AI platform supports forecasting — 12 —".to_string(),
            "across the retail business.".to_string(),
        ];
        let merged = r.merge_page_fragments(&segments, Some(raw));
        assert_eq!(
            merged,
            vec!["Our AI platform supports forecasting across the retail business.".to_string()]
        );
    }

    #[test]
    fn raw_text_recovery_with_reflowed_whitespace() {
        let r = reconstructor();
        let raw = "Start. Our AI platform   supports\nforecasting — 12 — across the business. End.";
        let segments = vec!["Our AI platform supports forecasting — 12 —".to_string()];
        let merged = r.merge_page_fragments(&segments, Some(raw));
        assert_eq!(merged.len(), 1);
        assert!(merged[0].starts_with("Our AI platform supports forecasting"));
        assert!(merged[0].ends_with("across the business."));
        assert!(!merged[0].contains("12"));
    }

    #[test]
    fn fallback_consumes_next_only_when_used() {
        let r = reconstructor();
        let segments = vec![
            "supports forecasting — 12 — across the business.".to_string(),
            "The next sentence stands alone.".to_string(),
        ];
        let merged = r.merge_page_fragments(&segments, None);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1], "The next sentence stands alone.");
    }

    #[test]
    fn fallback_joins_previous_when_fragment_continues_it() {
        let r = reconstructor();
        let segments = vec![
            "Our AI platform supports forecasting".to_string(),
            "and recommendations — 12 — across the business.".to_string(),
        ];
        let merged = r.merge_page_fragments(&segments, None);
        assert_eq!(merged.len(), 1);
        assert!(merged[0].starts_with("Our AI platform supports forecasting and recommendations"));
        assert!(!merged[0].contains('—'));
    }

    #[test]
    fn skips_page_numbers_and_table_of_contents() {
        let r = reconstructor();
        let segments = vec![
            "12".to_string(),
            "Table of Contents".to_string(),
            "TABLE OF CONTENTS".to_string(),
            "We deploy machine learning in production.".to_string(),
        ];
        let merged = r.merge_sentence_fragments(&segments);
        assert_eq!(merged, vec!["We deploy machine learning in production.".to_string()]);
    }

    #[test]
    fn merges_semicolon_continuations_across_boilerplate() {
        let r = reconstructor();
        let segments = vec![
            "We use AI for fraud detection;".to_string(),
            "17".to_string(),
            "and for demand forecasting.".to_string(),
        ];
        let merged = r.merge_sentence_fragments(&segments);
        assert_eq!(
            merged,
            vec!["We use AI for fraud detection and for demand forecasting.".to_string()]
        );
    }

    #[test]
    fn stops_merging_at_uppercase_candidate() {
        let r = reconstructor();
        let segments = vec![
            "our models power personalization".to_string(),
            "The board approved the budget.".to_string(),
        ];
        let merged = r.merge_sentence_fragments(&segments);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], "Our models power personalization.");
        assert_eq!(merged[1], "The board approved the budget.");
    }

    #[test]
    fn normalization_capitalizes_and_terminates() {
        assert_eq!(normalize_sentence("hello   world"), "Hello world.");
        assert_eq!(normalize_sentence("Already done!"), "Already done!");
        assert_eq!(normalize_sentence(""), "");
    }

    #[test]
    fn raw_window_bounds_respect_char_boundaries() {
        // em dashes are multi-byte; scanning must not split them
        let raw = "———————— Our AI platform supports forecasting — 12 — across. ————————";
        let segments = vec!["Our AI platform supports forecasting — 12 —".to_string()];
        let merged = reconstructor().merge_page_fragments(&segments, Some(raw));
        assert_eq!(merged.len(), 1);
        assert!(merged[0].contains("across"));
    }
}
