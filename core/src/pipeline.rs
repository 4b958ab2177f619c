use crate::config::AnalyzerConfig;
use crate::error::{CoreError, CoreResult};
use crate::model::{RiskLabel, Verdict};
use crate::risk::{summarize, KeywordRiskScorer, RiskScorer, SummaryStats};
use crate::segmentation::{build_segmenter, ClauseSegmenter};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Verdicts in document order plus the document summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    pub backend: String,
    pub verdicts: Vec<Verdict>,
    pub summary: SummaryStats,
}

impl AnalysisReport {
    pub fn with_label(&self, label: RiskLabel) -> impl Iterator<Item = &Verdict> + '_ {
        self.verdicts.iter().filter(move |v| v.label == label)
    }
}

/// Text to verdicts. The segmenter and scorer are chosen by the caller once;
/// the analyzer never switches strategy on its own.
pub struct ContractAnalyzer {
    segmenter: Box<dyn ClauseSegmenter>,
    scorer: Box<dyn RiskScorer>,
}

impl ContractAnalyzer {
    pub fn new(segmenter: Box<dyn ClauseSegmenter>, scorer: Box<dyn RiskScorer>) -> Self {
        Self { segmenter, scorer }
    }

    /// Configured segmenter with the keyword rule engine.
    pub fn with_rules(cfg: &AnalyzerConfig) -> Self {
        Self::new(
            build_segmenter(&cfg.segmentation),
            Box::new(KeywordRiskScorer::new(&cfg.risk)),
        )
    }

    pub fn backend(&self) -> &'static str {
        self.scorer.backend()
    }

    pub fn analyze(&self, text: &str) -> CoreResult<AnalysisReport> {
        if text.trim().is_empty() {
            return Err(CoreError::EmptyInput);
        }
        let clauses = self.segmenter.segment(text);
        if clauses.is_empty() {
            return Err(CoreError::NoClausesFound);
        }
        let verdicts = clauses
            .iter()
            .map(|c| self.scorer.score(c))
            .collect::<CoreResult<Vec<_>>>()?;
        let summary = summarize(&verdicts);
        info!(
            backend = self.scorer.backend(),
            clauses = summary.total,
            risky = summary.risky_count,
            risk_percentage = summary.risk_percentage,
            "analyzed contract"
        );
        Ok(AnalysisReport {
            backend: self.scorer.backend().to_string(),
            verdicts,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn whitespace_is_empty_input() {
        let a = ContractAnalyzer::with_rules(&AnalyzerConfig::default());
        assert_eq!(a.analyze(" \n\t ").unwrap_err().kind(), ErrorKind::EMPTY_INPUT);
    }

    #[test]
    fn only_short_fragments_is_no_clauses() {
        let a = ContractAnalyzer::with_rules(&AnalyzerConfig::default());
        let err = a.analyze("AGREEMENT\n\nSection one").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NO_CLAUSES_FOUND);
    }

    #[test]
    fn label_filter_keeps_document_order() {
        let a = ContractAnalyzer::with_rules(&AnalyzerConfig::default());
        let text = "1. Either party may terminate upon breach.\n\
                    2. Payment is due within 30 days of invoice date.\n\
                    3. Supplier shall indemnify the Customer against claims.";
        let r = a.analyze(text).unwrap();
        let risky: Vec<usize> = r.with_label(RiskLabel::Risky).map(|v| v.clause.id).collect();
        assert_eq!(risky, vec![1, 3]);
        assert_eq!(r.summary.total, 3);
        assert_eq!(r.backend, "keyword_rules");
    }
}
