//! Adaptive sentence selection and reassembly.

use std::cmp::Ordering;

use super::scoring::ScoredSentence;
use crate::policy::CompressionPolicy;

/// Highest score first, earlier position on ties.
fn by_score(a: &ScoredSentence, b: &ScoredSentence) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.position.cmp(&b.position))
}

/// Pick sentences under the policy's length and count budgets.
///
/// Only positive-score sentences enter the greedy pass. Below
/// `min_sentences` a sentence is always accepted; past it, a sentence is
/// accepted only if it fits in `original_length × target_ratio`, and one
/// that would overflow is skipped rather than ending the pass. Nothing is
/// accepted past `max_sentences`. If the minimum is still unmet, the
/// remaining sentences top the selection up in score order.
///
/// The returned sentences are in original document order.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Lengths stay far below f64 mantissa range and the target is non-negative"
)]
pub fn select(
    mut scored: Vec<ScoredSentence>,
    original_length: usize,
    policy: &CompressionPolicy,
) -> Vec<ScoredSentence> {
    scored.sort_by(by_score);
    let target_length = (original_length as f64 * policy.target_ratio).floor() as usize;

    let mut selected: Vec<ScoredSentence> = Vec::new();
    let mut remaining: Vec<ScoredSentence> = Vec::new();
    let mut accumulated = 0;

    for sentence in scored {
        let len = sentence.char_len();
        let accept = sentence.score > 0.0
            && selected.len() < policy.max_sentences
            && (selected.len() < policy.min_sentences || accumulated + len <= target_length);
        if accept {
            accumulated += len;
            selected.push(sentence);
        } else {
            remaining.push(sentence);
        }
    }

    if selected.len() < policy.min_sentences {
        let needed = policy.min_sentences - selected.len();
        selected.extend(remaining.into_iter().take(needed));
    }

    selected.sort_by_key(|s| s.position);
    selected
}

fn ends_with_terminal(text: &str) -> bool {
    text.trim_end_matches(['"', '\'', '”', '’', ')', ']', '»'])
        .chars()
        .last()
        .is_some_and(|c| matches!(c, '.' | '!' | '?' | '…' | '。' | '！' | '？'))
}

/// Join sentences with single spaces, each ending in terminal punctuation.
#[must_use]
pub fn reassemble(sentences: &[ScoredSentence]) -> String {
    sentences
        .iter()
        .map(|s| {
            let text = s.text.trim();
            if ends_with_terminal(text) {
                text.to_string()
            } else {
                format!("{text}.")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(position: usize, score: f64, len: usize) -> ScoredSentence {
        ScoredSentence {
            text: format!("{position:02}{}", "x".repeat(len.saturating_sub(2))),
            score,
            position,
        }
    }

    fn policy(target_ratio: f64, min: usize, max: usize) -> CompressionPolicy {
        CompressionPolicy::new(target_ratio, min, max, 400, 2)
    }

    fn positions(selected: &[ScoredSentence]) -> Vec<usize> {
        selected.iter().map(|s| s.position).collect()
    }

    #[test]
    fn result_is_in_document_order() {
        let scored = vec![
            sentence(0, 0.1, 40),
            sentence(1, 0.9, 40),
            sentence(2, 0.5, 40),
            sentence(3, 0.7, 40),
        ];
        let selected = select(scored, 160, &policy(0.5, 1, 8));
        assert_eq!(positions(&selected), vec![1, 3]);
    }

    #[test]
    fn minimum_overrides_length_budget() {
        let scored = (0..6).map(|i| sentence(i, 1.0, 100)).collect();
        // Budget fits one sentence, minimum demands three.
        let selected = select(scored, 600, &policy(0.2, 3, 8));
        assert_eq!(selected.len(), 3);
    }

    #[test]
    fn maximum_is_a_hard_stop() {
        let scored = (0..20).map(|i| sentence(i, 1.0, 30)).collect();
        let selected = select(scored, 600, &policy(1.0, 2, 5));
        assert_eq!(selected.len(), 5);
    }

    #[test]
    fn overflowing_sentence_is_skipped_not_terminal() {
        let scored = vec![
            sentence(0, 0.9, 50),
            sentence(1, 0.8, 120),
            sentence(2, 0.7, 40),
        ];
        // Target 100: 50 fits, 120 would overflow, 40 still fits.
        let selected = select(scored, 200, &policy(0.5, 1, 8));
        assert_eq!(positions(&selected), vec![0, 2]);
    }

    #[test]
    fn zero_scores_only_used_for_top_up() {
        let scored = vec![
            sentence(0, 0.0, 40),
            sentence(1, 0.5, 40),
            sentence(2, 0.0, 40),
            sentence(3, 0.0, 40),
        ];
        let selected = select(scored, 160, &policy(1.0, 1, 8));
        assert_eq!(positions(&selected), vec![1]);
    }

    #[test]
    fn top_up_prefers_score_then_earliest_position() {
        let scored = vec![
            sentence(0, 0.0, 40),
            sentence(1, 0.5, 40),
            sentence(2, 0.0, 40),
            sentence(3, 0.0, 40),
        ];
        let selected = select(scored, 160, &policy(0.1, 3, 8));
        assert_eq!(positions(&selected), vec![0, 1, 2]);
    }

    #[test]
    fn top_up_stops_when_candidates_run_out() {
        let scored = vec![sentence(0, 0.0, 40), sentence(1, 0.0, 40)];
        let selected = select(scored, 80, &policy(0.5, 4, 8));
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn reassemble_adds_missing_periods() {
        let sentences = vec![
            ScoredSentence {
                text: "First sentence without stop".to_string(),
                score: 1.0,
                position: 0,
            },
            ScoredSentence {
                text: "Second one ends fine!".to_string(),
                score: 1.0,
                position: 1,
            },
            ScoredSentence {
                text: "第三句。".to_string(),
                score: 1.0,
                position: 2,
            },
        ];
        assert_eq!(
            reassemble(&sentences),
            "First sentence without stop. Second one ends fine! 第三句。"
        );
    }
}
