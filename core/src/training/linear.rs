use super::Classifier;
use crate::config::LinearModelConfig;
use crate::error::CoreResult;
use crate::features::FeatureVector;
use crate::model::RiskLabel;
use serde::{Deserialize, Serialize};

/// Binary logistic regression fitted by full-batch gradient descent on the
/// sample-weighted log loss with an L2 penalty on the weights (not the bias).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogisticRegression {
    pub weights: Vec<f64>,
    pub bias: f64,
    pub n_iter: usize,
}

const GRADIENT_TOLERANCE: f64 = 1e-6;

impl LogisticRegression {
    pub fn fit(
        xs: &[FeatureVector],
        ys: &[RiskLabel],
        sample_weights: &[f64],
        dim: usize,
        cfg: &LinearModelConfig,
    ) -> Self {
        let total_weight: f64 = sample_weights.iter().sum();
        let mut weights = vec![0.0; dim];
        let mut bias = 0.0;
        let mut n_iter = 0;

        if total_weight <= 0.0 {
            return Self {
                weights,
                bias,
                n_iter,
            };
        }

        let mut grad = vec![0.0; dim];
        for _ in 0..cfg.max_iter {
            n_iter += 1;
            grad.iter_mut().for_each(|g| *g = 0.0);
            let mut grad_bias = 0.0;

            for ((x, y), w) in xs.iter().zip(ys).zip(sample_weights) {
                let target = if *y == RiskLabel::Risky { 1.0 } else { 0.0 };
                let err = w * (sigmoid(x.dot(&weights) + bias) - target) / total_weight;
                for (i, v) in x.iter() {
                    grad[i as usize] += err * v;
                }
                grad_bias += err;
            }

            let mut norm_sq = grad_bias * grad_bias;
            for (g, w) in grad.iter_mut().zip(&weights) {
                *g += cfg.l2 * w;
                norm_sq += *g * *g;
            }
            for (w, g) in weights.iter_mut().zip(&grad) {
                *w -= cfg.learning_rate * g;
            }
            bias -= cfg.learning_rate * grad_bias;

            if norm_sq.sqrt() < GRADIENT_TOLERANCE {
                break;
            }
        }

        Self {
            weights,
            bias,
            n_iter,
        }
    }
}

impl Classifier for LogisticRegression {
    fn feature_dim(&self) -> usize {
        self.weights.len()
    }

    fn predict_proba(&self, x: &FeatureVector) -> CoreResult<f64> {
        self.check_dim(x)?;
        Ok(sigmoid(x.dot(&self.weights) + self.bias))
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
