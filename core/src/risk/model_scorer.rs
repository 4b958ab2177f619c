use super::RiskScorer;
use crate::config::ArtifactConfig;
use crate::error::{CoreError, CoreResult};
use crate::features::FittedExtractor;
use crate::model::{Clause, RiskLabel, Verdict};
use crate::training::{load_artifacts, Classifier, FittedModel};
use std::collections::BTreeSet;

/// Scores clauses with a trained model projected through its paired
/// extractor. Risky when P(risky) > 0.5; confidence is the probability of the
/// chosen label.
#[derive(Debug, Clone)]
pub struct ModelRiskScorer {
    name: String,
    extractor: FittedExtractor,
    model: FittedModel,
}

impl ModelRiskScorer {
    pub fn new(name: impl Into<String>, extractor: FittedExtractor, model: FittedModel) -> CoreResult<Self> {
        if model.feature_dim() != extractor.dim() {
            return Err(CoreError::ArtifactMismatch(format!(
                "model expects {} features but extractor produces {}",
                model.feature_dim(),
                extractor.dim()
            )));
        }
        Ok(Self {
            name: name.into(),
            extractor,
            model,
        })
    }

    pub fn load(cfg: &ArtifactConfig) -> CoreResult<Self> {
        let loaded = load_artifacts(cfg)?;
        Self::new(loaded.artifact.name, loaded.extractor, loaded.artifact.model)
    }

    pub fn model_name(&self) -> &str {
        &self.name
    }
}

impl RiskScorer for ModelRiskScorer {
    fn backend(&self) -> &'static str {
        "trained_model"
    }

    fn score(&self, clause: &Clause) -> CoreResult<Verdict> {
        let x = self.extractor.transform_one(&clause.text)?;
        let p_risky = self.model.predict_proba(&x)?;
        let (label, confidence) = if p_risky > 0.5 {
            (RiskLabel::Risky, p_risky)
        } else {
            (RiskLabel::Safe, 1.0 - p_risky)
        };
        Ok(Verdict {
            clause: clause.clone(),
            label,
            confidence,
            matched_keywords: BTreeSet::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeatureConfig;
    use crate::features::TfidfVectorizer;
    use crate::training::linear::LogisticRegression;

    fn extractor() -> FittedExtractor {
        TfidfVectorizer::new(&FeatureConfig::default())
            .fit(&["terminate without notice", "payment within days"])
            .unwrap()
    }

    #[test]
    fn confidence_is_probability_of_chosen_label() {
        let fx = extractor();
        let mut weights = vec![0.0; fx.dim()];
        let idx = fx.term_index("terminate").unwrap() as usize;
        weights[idx] = 10.0;
        let model = FittedModel::LogisticRegression(LogisticRegression {
            weights,
            bias: -1.0,
            n_iter: 1,
        });
        let scorer = ModelRiskScorer::new("Logistic Regression", fx, model).unwrap();

        let risky = scorer.score(&Clause::new(1, "Seller may terminate at will")).unwrap();
        assert_eq!(risky.label, RiskLabel::Risky);
        assert!(risky.confidence > 0.5);
        assert!(risky.matched_keywords.is_empty());

        let safe = scorer.score(&Clause::new(2, "Payment within thirty days")).unwrap();
        assert_eq!(safe.label, RiskLabel::Safe);
        assert!(safe.confidence > 0.5);
    }

    #[test]
    fn mismatched_pair_is_rejected() {
        let model = FittedModel::LogisticRegression(LogisticRegression {
            weights: vec![0.0; 3],
            bias: 0.0,
            n_iter: 0,
        });
        let err = ModelRiskScorer::new("m", extractor(), model).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::ARTIFACT_MISMATCH);
    }
}
