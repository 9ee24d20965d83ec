//! Integration tests for fragment repair

use aiwash_core::{reconstruct_sentences, FragmentReconstructor};
use proptest::prelude::*;

fn segs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn merges_page_split_sentence() {
    let lines = segs(&[
        "The Company continues to invest in artificial intelligence and machine \
         learning to enhance its products — 4 —",
        " and services in the coming year.",
    ]);

    let merged = FragmentReconstructor::new().merge_page_fragments(&lines, None);

    assert_eq!(merged.len(), 1);
    let result = &merged[0];
    assert!(!result.contains('—'));
    assert!(result.starts_with("The Company"));
    assert!(result.ends_with('.'));
}

#[test]
fn complete_sentences_pass_through_unchanged() {
    let lines = segs(&["This sentence is complete and has no fragment."]);
    let merged = FragmentReconstructor::new().merge_page_fragments(&lines, None);
    assert_eq!(merged, lines);
}

#[test]
fn removes_page_marker_and_normalizes_sentence_end() {
    let lines = segs(&[
        "Our AI platform supports forecasting and recommendations — 12 —",
        " across the retail business",
    ]);

    let merged = FragmentReconstructor::new().merge_page_fragments(&lines, None);

    assert_eq!(merged.len(), 1);
    let result = &merged[0];
    assert!(!result.contains("12"));
    assert!(!result.contains('—'));
    assert!(result.chars().next().unwrap().is_uppercase());
    assert!(result.ends_with('.'));
}

#[test]
fn full_reconstruction_produces_wellformed_sentences() {
    let segments = segs(&[
        "Table of Contents",
        "Our AI platform supports forecasting and recommendations — 12 —",
        " across the retail business",
        "17",
        "we also provide model monitoring;",
        "and drift detection for deployed models.",
        "RISK FACTORS.",
    ]);

    let sentences = reconstruct_sentences(&segments, None);

    assert!(!sentences.is_empty());
    for sentence in &sentences {
        let first = sentence.chars().next().unwrap();
        assert!(
            !first.is_lowercase(),
            "sentence starts lowercase: {sentence:?}"
        );
        assert!(
            sentence.ends_with(['.', '!', '?']),
            "sentence lacks terminator: {sentence:?}"
        );
        assert!(!sentence.contains('—'), "marker survived: {sentence:?}");
    }
    assert!(sentences
        .iter()
        .any(|s| s.contains("forecasting and recommendations across the retail business")));
    assert!(sentences
        .iter()
        .any(|s| s.contains("model monitoring and drift detection")));
}

#[test]
fn reconstruction_never_drops_content_segments() {
    let segments = segs(&[
        "First complete sentence about machine learning.",
        "Second complete sentence about deployment.",
        "Third complete sentence about operations.",
    ]);
    let sentences = reconstruct_sentences(&segments, None);
    assert_eq!(sentences.len(), segments.len());
}

fn arb_segment() -> impl Strategy<Value = String> {
    // a &str pattern is itself a (Copy) string strategy
    let base = "[A-Za-z0-9 ,;]{0,30}";
    prop_oneof![
        base,
        base.prop_map(|s| format!("{s}.")),
        (base, base).prop_map(|(a, b)| format!("{a} — 12 — {b}")),
        base.prop_map(|s| format!("{s} — 7 —")),
        Just("— 3 —".to_string()),
        Just("42".to_string()),
        Just("Table of Contents".to_string()),
    ]
}

proptest! {
    #[test]
    fn page_fragment_merge_is_idempotent(segments in prop::collection::vec(arb_segment(), 0..8)) {
        let reconstructor = FragmentReconstructor::new();
        let once = reconstructor.merge_page_fragments(&segments, None);
        let twice = reconstructor.merge_page_fragments(&once, None);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn sentence_merge_never_grows_output(segments in prop::collection::vec(arb_segment(), 0..8)) {
        let reconstructor = FragmentReconstructor::new();
        let merged = reconstructor.merge_sentence_fragments(&segments);
        prop_assert!(merged.len() <= segments.len());
    }

    #[test]
    fn reconstructed_sentences_are_wellformed(segments in prop::collection::vec(arb_segment(), 0..8)) {
        for sentence in reconstruct_sentences(&segments, None) {
            prop_assert!(!sentence.is_empty());
            prop_assert!(sentence.ends_with(['.', '!', '?']));
            let first = sentence.chars().next().unwrap();
            prop_assert!(!first.is_lowercase());
        }
    }
}
