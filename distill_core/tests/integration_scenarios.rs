//! End-to-end distillation scenarios with the provider tier out of the way.
//!
//! These tests drive `distill_locally` and `Distiller` over realistic page
//! shapes and check the length, order and density guarantees of the digest.

use distill_core::summarize::{clean, split_sentences};
use distill_core::{
    CompressionPolicy, ContentCategory, Distiller, PageText, Tier, classify, distill_locally,
};

const FILLER: &[&str] = &[
    "plants",
    "convert",
    "light",
    "into",
    "chemical",
    "energy",
    "through",
    "photosynthesis",
    "inside",
    "leaf",
    "cells",
    "using",
    "water",
    "carbon",
];

const LESSON_SENTENCE_LEN: usize = 195;

/// A sentence of exactly `len` characters with no internal stops.
fn sized_sentence(i: usize, len: usize) -> String {
    let mut s = format!("Part {i} of the lesson explains how");
    let mut k = 0;
    while s.chars().count() < len {
        s.push(' ');
        s.push_str(FILLER[(i + k) % FILLER.len()]);
        k += 1;
    }
    // The final word always ends in 'z' so it can never read as an abbreviation.
    let mut s: String = s.chars().take(len - 2).collect();
    if s.ends_with(' ') {
        s.pop();
        s.push('s');
    }
    s.push_str("z.");
    s
}

fn lesson_sentence(i: usize) -> String {
    sized_sentence(i, LESSON_SENTENCE_LEN)
}

fn news_document() -> (String, String) {
    let lead = "The council said the bridge budget was approved on Monday.".to_string();
    let body = (1..=24)
        .map(|i| {
            format!("Residents of ward {i} said the council approved the bridge budget too quickly on Monday.")
        })
        .collect::<Vec<_>>()
        .join(" ");
    (lead.clone(), format!("{lead} {body}"))
}

fn mixed_inputs() -> Vec<String> {
    let (_, news) = news_document();
    vec![
        String::new(),
        "Tiny.".to_string(),
        "word ".repeat(500),
        news,
        (0..26).map(lesson_sentence).collect::<Vec<_>>().join(" "),
        "[SECTION: Menu] Home. About. Contact. [LINK: /shop] Shop now!".repeat(20),
        "日本語の文章です。とても長い説明が続きます。".repeat(30),
    ]
}

#[test]
fn test_three_short_sentences_are_returned_verbatim() {
    let text = "The cat sat on the warm mat. The dog slept by the old door. The bird sang in the tall tree.";
    let policy = CompressionPolicy::for_category(ContentCategory::Blog);
    let digest = distill_locally(text, ContentCategory::Blog, &policy);

    assert_eq!(digest.text, clean(text));
    assert_eq!(digest.report.tier, Tier::Passthrough);
}

#[test]
fn test_few_long_sentences_pass_through_under_the_cap() {
    let sentences: Vec<String> = (0..4).map(|i| sized_sentence(i, 150)).collect();
    let text = sentences.join(" ");
    let policy = CompressionPolicy::for_category(ContentCategory::Form);
    assert!(sentences.len() <= policy.min_sentences);
    assert!(text.chars().count() > policy.char_cap);

    let digest = distill_locally(&text, ContentCategory::Form, &policy);

    assert_eq!(digest.report.tier, Tier::Passthrough);
    assert!(digest.report.truncated);
    assert_eq!(digest.report.selected_length, text.chars().count());
    assert!(digest.text.chars().count() <= policy.char_cap);
    assert_eq!(digest.text, sentences[0]);
}

#[test]
fn test_news_lead_is_kept() {
    let (lead, document) = news_document();
    assert!(document.chars().count() >= 2000, "document should be about 2000 chars");

    let policy = CompressionPolicy::for_category(ContentCategory::News);
    let digest = distill_locally(&document, ContentCategory::News, &policy);

    assert_eq!(digest.report.tier, Tier::Extractive);
    assert!(
        digest.text.starts_with(&lead),
        "News digest should open with the lead, got: {}",
        digest.text
    );
    assert!(digest.text.chars().count() <= policy.char_cap);
}

#[test]
fn test_long_educational_document_ratio() {
    let document = (0..26).map(lesson_sentence).collect::<Vec<_>>().join(" ");
    assert_eq!(document.chars().count(), 26 * LESSON_SENTENCE_LEN + 25);

    let policy = CompressionPolicy::for_category(ContentCategory::Educational);
    let digest = distill_locally(&document, ContentCategory::Educational, &policy);
    let report = &digest.report;

    assert_eq!(report.tier, Tier::Extractive);
    assert!(
        (0.55..=0.85).contains(&report.actual_ratio),
        "actual ratio {} out of range",
        report.actual_ratio
    );
    assert!((6..=15).contains(&report.selected_sentences));
    assert!(digest.text.chars().count() <= policy.char_cap);
    assert!(report.capped_ratio() <= report.actual_ratio);
}

#[test]
fn test_digest_never_exceeds_cap() {
    for text in mixed_inputs() {
        for category in ContentCategory::ALL {
            let policy = CompressionPolicy::for_category(category);
            let digest = distill_locally(&text, category, &policy);
            assert!(
                digest.text.chars().count() <= policy.char_cap,
                "{category} digest exceeded cap {}",
                policy.char_cap
            );
        }
    }
}

#[test]
fn test_short_input_is_a_no_op() {
    let text = "  Opening   hours: [IMAGE: clock] nine to five.\n\nClosed on Sundays. ";
    for category in ContentCategory::ALL {
        let policy = CompressionPolicy::for_category(category);
        assert_eq!(distill_locally(text, category, &policy).text, clean(text));
    }
}

#[test]
fn test_extractive_path_is_deterministic() {
    for text in mixed_inputs() {
        let category = classify(&text);
        let policy = CompressionPolicy::for_category(category);
        let first = distill_locally(&text, category, &policy);
        let second = distill_locally(&text, category, &policy);
        assert_eq!(first, second);
    }
}

#[test]
fn test_selected_sentences_keep_document_order() {
    let document = (0..26).map(lesson_sentence).collect::<Vec<_>>().join(" ");
    // Cap large enough that nothing is cut.
    let policy = CompressionPolicy::new(0.6, 3, 8, 10_000, 2);
    let digest = distill_locally(&document, ContentCategory::Unknown, &policy);

    let offsets: Vec<usize> = split_sentences(&digest.text)
        .iter()
        .map(|s| document.find(s.as_str()).unwrap_or(usize::MAX))
        .collect();
    assert!(offsets.iter().all(|&o| o != usize::MAX));
    assert!(offsets.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_minimum_sentence_density() {
    let (_, news) = news_document();
    let lesson = (0..26).map(lesson_sentence).collect::<Vec<_>>().join(" ");
    for text in [news, lesson] {
        for category in ContentCategory::ALL {
            let policy = CompressionPolicy::for_category(category);
            let report = distill_locally(&text, category, &policy).report;
            assert!(
                report.selected_sentences >= policy.min_sentences.min(report.available_sentences),
                "{category}: {} selected of {} available",
                report.selected_sentences,
                report.available_sentences
            );
        }
    }
}

#[test]
fn test_classifier_tie_prefers_canonical_order() {
    // One news match and one educational match.
    assert_eq!(classify("The tutorial was announced."), ContentCategory::News);
}

#[tokio::test]
async fn test_distiller_without_provider_matches_local_path() {
    let distiller = Distiller::new().with_provider_enabled(false);
    let (_, document) = news_document();

    let Some(digest) = distiller.process(&PageText::new(document.clone())).await else {
        panic!("successful extraction should produce a digest");
    };
    let category = distiller.classify(&document);
    assert_eq!(digest.category(), category);
    assert_eq!(digest, distill_locally(&document, category, &distiller.policy(category)));
}
