//! Structural segmentation of decoded contract text into numbered clauses.
//!
//! Two strategies share one contract: paragraphs are split on blank lines,
//! each paragraph is cut into candidate clauses at clause markers, candidates
//! with too few words are dropped, and survivors are numbered 1..N in
//! document order. The strategy is picked once at startup through
//! [`build_segmenter`]; callers only ever see [`ClauseSegmenter`].

pub mod markers;
pub mod regex_fallback;
pub mod sentence_aware;

pub use regex_fallback::RegexSegmenter;
pub use sentence_aware::SentenceAwareSegmenter;

use crate::config::{SegmentationConfig, SegmentationStrategy};
use crate::model::Clause;
use markers::PARAGRAPH_BREAK;

pub trait ClauseSegmenter: Send + Sync {
    /// Ordered clauses for `text`. Empty or whitespace-only text yields an
    /// empty vector.
    fn segment(&self, text: &str) -> Vec<Clause>;
}

pub fn build_segmenter(cfg: &SegmentationConfig) -> Box<dyn ClauseSegmenter> {
    match cfg.strategy {
        SegmentationStrategy::SentenceAware => Box::new(SentenceAwareSegmenter::new(cfg.min_words)),
        SegmentationStrategy::Regex => Box::new(RegexSegmenter::new(cfg.min_words)),
    }
}

/// Paragraph loop shared by every strategy. `split` turns one trimmed,
/// non-empty paragraph into candidate clause texts.
pub(crate) fn segment_paragraphs<F>(
    text: &str,
    min_words: usize,
    strategy: &'static str,
    split: F,
) -> Vec<Clause>
where
    F: Fn(&str) -> Vec<String>,
{
    if text.trim().is_empty() {
        return Vec::new();
    }

    let normalized = text.replace("\r\n", "\n");
    let mut paragraphs = 0usize;
    let mut candidates = Vec::new();
    for para in PARAGRAPH_BREAK.split(&normalized) {
        let para = para.trim();
        if para.is_empty() {
            continue;
        }
        paragraphs += 1;
        candidates.extend(split(para));
    }

    let candidate_count = candidates.len();
    let clauses = number_clauses(candidates, min_words);
    tracing::debug!(
        strategy,
        paragraphs,
        candidates = candidate_count,
        kept = clauses.len(),
        "segmented contract text"
    );
    clauses
}

/// Drop candidates of `min_words` words or fewer, then assign 1-based ids.
fn number_clauses(candidates: Vec<String>, min_words: usize) -> Vec<Clause> {
    candidates
        .into_iter()
        .filter(|c| c.split_whitespace().count() > min_words)
        .enumerate()
        .map(|(idx, text)| Clause::new(idx + 1, text))
        .collect()
}
