use super::linear::LogisticRegression;
use super::tree::DecisionTree;
use super::Classifier;
use crate::config::TrainingConfig;
use crate::error::{CoreError, CoreResult};
use crate::features::FeatureVector;
use crate::model::RiskLabel;
use serde::{Deserialize, Serialize};
use tracing::info;

pub const LOGISTIC_REGRESSION: &str = "Logistic Regression";
pub const DECISION_TREE: &str = "Decision Tree";

/// A trained candidate from one of the supported classifier families.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum FittedModel {
    LogisticRegression(LogisticRegression),
    DecisionTree(DecisionTree),
}

impl Classifier for FittedModel {
    fn feature_dim(&self) -> usize {
        match self {
            Self::LogisticRegression(m) => m.feature_dim(),
            Self::DecisionTree(m) => m.feature_dim(),
        }
    }

    fn predict_proba(&self, x: &FeatureVector) -> CoreResult<f64> {
        match self {
            Self::LogisticRegression(m) => m.predict_proba(x),
            Self::DecisionTree(m) => m.predict_proba(x),
        }
    }
}

/// Per-sample weights `n / (2 * n_label)`, so each label carries the same
/// total weight regardless of how skewed the corpus is.
pub fn balanced_weights(ys: &[RiskLabel]) -> Vec<f64> {
    let n = ys.len() as f64;
    let risky = ys.iter().filter(|y| **y == RiskLabel::Risky).count() as f64;
    let safe = n - risky;
    ys.iter()
        .map(|y| {
            let n_c = if *y == RiskLabel::Risky { risky } else { safe };
            n / (2.0 * n_c)
        })
        .collect()
}

/// Fit every candidate family on the same weighted training set. The result
/// is in training order, which is also the model-selection tie-break order.
pub fn train(
    xs: &[FeatureVector],
    ys: &[RiskLabel],
    cfg: &TrainingConfig,
) -> CoreResult<Vec<(String, FittedModel)>> {
    if xs.is_empty() || xs.len() != ys.len() {
        return Err(CoreError::TrainingData(format!(
            "need one label per vector, got {} vectors and {} labels",
            xs.len(),
            ys.len()
        )));
    }
    if !ys.contains(&RiskLabel::Safe) || !ys.contains(&RiskLabel::Risky) {
        return Err(CoreError::TrainingData(
            "training split must contain both labels".to_string(),
        ));
    }
    let dim = xs[0].dim();
    if let Some(bad) = xs.iter().find(|x| x.dim() != dim) {
        return Err(CoreError::UnfittedExtractor(format!(
            "mixed feature dimensions {} and {}",
            dim,
            bad.dim()
        )));
    }

    let weights = balanced_weights(ys);
    let mut models = Vec::with_capacity(2);

    let lr = LogisticRegression::fit(xs, ys, &weights, dim, &cfg.linear);
    info!(model = LOGISTIC_REGRESSION, iterations = lr.n_iter, "trained model");
    models.push((LOGISTIC_REGRESSION.to_string(), FittedModel::LogisticRegression(lr)));

    let tree = DecisionTree::fit(xs, ys, &weights, dim, &cfg.tree);
    info!(
        model = DECISION_TREE,
        nodes = tree.nodes.len(),
        depth = tree.depth(),
        "trained model"
    );
    models.push((DECISION_TREE.to_string(), FittedModel::DecisionTree(tree)));

    Ok(models)
}
