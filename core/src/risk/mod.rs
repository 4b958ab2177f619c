//! Per-clause risk scoring and document-level aggregation.

pub mod keyword_rules;
pub mod model_scorer;
pub mod summary;

pub use crate::model::{Clause, RiskLabel, Verdict};
pub use keyword_rules::KeywordRiskScorer;
pub use model_scorer::ModelRiskScorer;
pub use summary::{summarize, RiskBand, SummaryStats};

use crate::error::CoreResult;

/// One scoring backend. Implementations hold no mutable state, so a single
/// scorer can serve many documents.
pub trait RiskScorer: Send + Sync {
    /// Short stable name, used in logs and reports.
    fn backend(&self) -> &'static str;

    fn score(&self, clause: &Clause) -> CoreResult<Verdict>;
}
