use super::RiskScorer;
use crate::config::RiskRuleConfig;
use crate::error::CoreResult;
use crate::model::{Clause, RiskLabel, Verdict};
use std::collections::BTreeSet;

/// Keyword-driven risk classifier.
///
/// Counts distinct configured keywords found (case-insensitive substring) in
/// the clause. At or above the threshold the clause is Risky, otherwise Safe.
/// Confidence is the configured constant for the label, independent of how
/// many keywords matched. Matched keywords are reported as configured.
#[derive(Debug, Clone)]
pub struct KeywordRiskScorer {
    /// (configured spelling, lowercased needle), distinct by needle.
    keywords: Vec<(String, String)>,
    threshold: usize,
    risky_confidence: f64,
    safe_confidence: f64,
}

impl KeywordRiskScorer {
    pub fn new(cfg: &RiskRuleConfig) -> Self {
        let mut keywords: Vec<(String, String)> = cfg
            .keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(|k| (k.to_string(), k.to_lowercase()))
            .collect();
        // stable sort: the first configured spelling of a needle wins
        keywords.sort_by(|a, b| a.1.cmp(&b.1));
        keywords.dedup_by(|later, first| later.1 == first.1);
        Self {
            keywords,
            threshold: cfg.keyword_threshold,
            risky_confidence: cfg.risky_confidence,
            safe_confidence: cfg.safe_confidence,
        }
    }

    /// Distinct keywords contained in `text`.
    pub fn matches(&self, text: &str) -> BTreeSet<String> {
        let lower = text.to_lowercase();
        self.keywords
            .iter()
            .filter(|(_, needle)| lower.contains(needle.as_str()))
            .map(|(display, _)| display.clone())
            .collect()
    }

    pub fn verdict(&self, clause: &Clause) -> Verdict {
        let matched_keywords = self.matches(&clause.text);
        let (label, confidence) = if matched_keywords.len() >= self.threshold {
            (RiskLabel::Risky, self.risky_confidence)
        } else {
            (RiskLabel::Safe, self.safe_confidence)
        };
        Verdict {
            clause: clause.clone(),
            label,
            confidence,
            matched_keywords,
        }
    }
}

impl Default for KeywordRiskScorer {
    fn default() -> Self {
        Self::new(&RiskRuleConfig::default())
    }
}

impl RiskScorer for KeywordRiskScorer {
    fn backend(&self) -> &'static str {
        "keyword_rules"
    }

    fn score(&self, clause: &Clause) -> CoreResult<Verdict> {
        Ok(self.verdict(clause))
    }
}
