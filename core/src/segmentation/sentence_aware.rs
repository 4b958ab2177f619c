use super::markers::{line_marker_offsets, split_at_offsets, SENTENCE_MARKER};
use super::{segment_paragraphs, ClauseSegmenter};
use crate::model::Clause;
use unicode_segmentation::UnicodeSegmentation;

/// Segmenter that also honours markers opening a sentence mid-line, as in
/// flattened PDF text: `... upon breach. 2. The Supplier shall ...`.
///
/// Sentence boundaries follow UAX #29. Line-start markers are recognised
/// exactly as in [`super::RegexSegmenter`]. A mid-line split is only taken
/// when both sides keep more than `min_words` words, so every word the
/// line-start segmenter would keep is still kept.
#[derive(Debug, Clone)]
pub struct SentenceAwareSegmenter {
    min_words: usize,
}

impl SentenceAwareSegmenter {
    pub fn new(min_words: usize) -> Self {
        Self { min_words }
    }
}

impl Default for SentenceAwareSegmenter {
    fn default() -> Self {
        Self::new(3)
    }
}

impl ClauseSegmenter for SentenceAwareSegmenter {
    fn segment(&self, text: &str) -> Vec<Clause> {
        segment_paragraphs(text, self.min_words, "sentence_aware", |para| {
            let line_offsets = line_marker_offsets(para);
            let sentence_offsets = sentence_marker_offsets(para);

            let mut bounds = Vec::with_capacity(line_offsets.len() + 2);
            bounds.push(0);
            bounds.extend(line_offsets.iter().copied().filter(|&o| o > 0));
            bounds.push(para.len());
            bounds.dedup();

            let mut offsets = Vec::with_capacity(line_offsets.len() + sentence_offsets.len());
            for w in bounds.windows(2) {
                let (start, end) = (w[0], w[1]);
                offsets.push(start);
                let mut piece_start = start;
                for &s in sentence_offsets.iter().filter(|&&s| s > start && s < end) {
                    if word_count(&para[piece_start..s]) > self.min_words
                        && word_count(&para[s..end]) > self.min_words
                    {
                        offsets.push(s);
                        piece_start = s;
                    }
                }
            }
            split_at_offsets(para, &offsets)
        })
    }
}

fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

fn sentence_marker_offsets(paragraph: &str) -> Vec<usize> {
    let mut out = Vec::new();
    let mut prev_start = 0usize;
    for (offset, _) in paragraph.split_sentence_bound_indices() {
        if offset > 0 {
            let starts_line = paragraph[..offset].ends_with('\n');
            let prev = paragraph[prev_start..offset].trim_end();
            let closes_sentence = prev.ends_with(|c: char| matches!(c, '.' | ';' | ':'));
            if !starts_line && closes_sentence && SENTENCE_MARKER.is_match(&paragraph[offset..]) {
                out.push(offset);
            }
        }
        prev_start = offset;
    }
    out
}
