use super::markers::{line_marker_offsets, split_at_offsets};
use super::{segment_paragraphs, ClauseSegmenter};
use crate::model::Clause;

/// Marker-driven segmenter: paragraphs split on line-start enumerations.
#[derive(Debug, Clone)]
pub struct RegexSegmenter {
    min_words: usize,
}

impl RegexSegmenter {
    pub fn new(min_words: usize) -> Self {
        Self { min_words }
    }
}

impl Default for RegexSegmenter {
    fn default() -> Self {
        Self::new(3)
    }
}

impl ClauseSegmenter for RegexSegmenter {
    fn segment(&self, text: &str) -> Vec<Clause> {
        segment_paragraphs(text, self.min_words, "regex", |para| {
            split_at_offsets(para, &line_marker_offsets(para))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_numbered_paragraph() {
        let seg = RegexSegmenter::default();
        let clauses =
            seg.segment("1. Pay within 30 days of invoice.\n2. Either party may terminate upon breach.");
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].id, 1);
        assert!(clauses[0].text.starts_with("1."));
        assert_eq!(clauses[1].id, 2);
        assert!(clauses[1].text.starts_with("2."));
    }

    #[test]
    fn unmarked_paragraph_is_one_clause() {
        let seg = RegexSegmenter::default();
        let clauses = seg.segment("This Agreement is made between the Supplier and the Customer.");
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].word_count, 10);
    }

    #[test]
    fn inline_markers_do_not_split() {
        let seg = RegexSegmenter::default();
        let clauses = seg.segment("1. Fees are payable monthly. 2. Either party may terminate early.");
        assert_eq!(clauses.len(), 1);
    }
}
