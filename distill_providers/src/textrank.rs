//! `TextRank`: sentences as nodes, word-overlap cosine similarity as edges,
//! `PageRank` iteration over the resulting graph.

use std::collections::HashMap;

use async_trait::async_trait;
use distill_core::summarize::{frequency::content_words, segment};
use distill_core::{ProviderCapabilities, ProviderDescriptor, SummaryProvider};
use rayon::prelude::*;
use tracing::debug;

/// Damping factor for `PageRank` iteration.
const DAMPING: f64 = 0.85;
/// Convergence threshold.
const CONVERGENCE: f64 = 1e-6;
/// Maximum iterations.
const MAX_ITERATIONS: usize = 100;

type WordVector = HashMap<String, f64>;

fn word_vector(sentence: &str) -> WordVector {
    let mut vector = WordVector::new();
    for word in content_words(sentence) {
        *vector.entry(word).or_insert(0.0) += 1.0;
    }
    vector
}

fn cosine_similarity(a: &WordVector, b: &WordVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(word, x)| large.get(word).map(|y| x * y))
        .sum();
    if dot <= 0.0 {
        return 0.0;
    }
    let norm_a = a.values().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.values().map(|x| x * x).sum::<f64>().sqrt();
    dot / (norm_a * norm_b)
}

/// Score each sentence by its `PageRank` centrality.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "Sentence counts stay far below f64 mantissa range"
)]
pub fn rank_sentences(sentences: &[String]) -> Vec<f64> {
    let n = sentences.len();
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![1.0];
    }

    let vectors: Vec<WordVector> = sentences.par_iter().map(|s| word_vector(s)).collect();
    let similarity: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|i| {
            (0..n)
                .map(|j| {
                    if i == j {
                        0.0
                    } else {
                        cosine_similarity(&vectors[i], &vectors[j])
                    }
                })
                .collect()
        })
        .collect();
    let out_sums: Vec<f64> = similarity.iter().map(|row| row.iter().sum()).collect();

    let teleport = (1.0 - DAMPING) / n as f64;
    let mut scores = vec![1.0 / n as f64; n];
    for iteration in 0..MAX_ITERATIONS {
        let next: Vec<f64> = (0..n)
            .map(|i| {
                let inbound: f64 = (0..n)
                    .filter(|&j| out_sums[j] > f64::EPSILON)
                    .map(|j| similarity[j][i] * scores[j] / out_sums[j])
                    .sum();
                DAMPING.mul_add(inbound, teleport)
            })
            .collect();
        let max_diff = next
            .iter()
            .zip(&scores)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        scores = next;
        if max_diff < CONVERGENCE {
            debug!("TextRank converged after {} iterations", iteration + 1);
            break;
        }
    }
    scores
}

/// The `count` most central sentences of `text`, in document order.
pub fn summarize_text(text: &str, count: usize) -> anyhow::Result<String> {
    let sentences: Vec<String> = segment(text).into_iter().map(|s| s.text).collect();
    if sentences.is_empty() {
        anyhow::bail!("no rankable sentences");
    }
    if sentences.len() <= count {
        return Ok(sentences.join(" "));
    }

    let scores = rank_sentences(&sentences);
    let mut order: Vec<usize> = (0..sentences.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then_with(|| a.cmp(&b)));
    let mut top: Vec<usize> = order.into_iter().take(count.max(1)).collect();
    top.sort_unstable();

    Ok(top
        .into_iter()
        .map(|i| sentences[i].as_str())
        .collect::<Vec<_>>()
        .join(" "))
}

/// Offline graph-ranking summarizer.
#[derive(Debug, Default)]
pub struct TextRankProvider {
    ready: bool,
}

impl TextRankProvider {
    #[must_use]
    pub const fn new() -> Self {
        Self { ready: false }
    }
}

#[async_trait]
impl SummaryProvider for TextRankProvider {
    fn descriptor(&self) -> ProviderDescriptor {
        ProviderDescriptor {
            name: "textrank".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            capabilities: ProviderCapabilities {
                gpu: false,
                network: false,
            },
        }
    }

    async fn initialize(&mut self) -> anyhow::Result<()> {
        self.ready = true;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    async fn summarize(&self, text: &str, target_sentences: usize) -> anyhow::Result<String> {
        let text = text.to_string();
        tokio::task::spawn_blocking(move || summarize_text(&text, target_sentences)).await?
    }

    async fn cleanup(&mut self) {
        self.ready = false;
    }
}
