use super::Classifier;
use crate::config::TreeModelConfig;
use crate::error::{CoreError, CoreResult};
use crate::features::FeatureVector;
use crate::model::RiskLabel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum TreeNode {
    Leaf {
        /// Weighted fraction of risky samples that reached this leaf.
        p_risky: f64,
    },
    Split {
        feature: u32,
        /// Values `<= threshold` go left.
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// CART classifier over sample-weighted Gini impurity. Nodes are stored in a
/// flat arena; node 0 is the root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionTree {
    pub dim: usize,
    pub nodes: Vec<TreeNode>,
}

struct Builder<'a> {
    xs: &'a [FeatureVector],
    targets: Vec<f64>,
    weights: &'a [f64],
    cfg: &'a TreeModelConfig,
    nodes: Vec<TreeNode>,
}

struct Candidate {
    feature: u32,
    threshold: f64,
    score: f64,
}

impl DecisionTree {
    pub fn fit(
        xs: &[FeatureVector],
        ys: &[RiskLabel],
        sample_weights: &[f64],
        dim: usize,
        cfg: &TreeModelConfig,
    ) -> Self {
        let mut b = Builder {
            xs,
            targets: ys
                .iter()
                .map(|y| if *y == RiskLabel::Risky { 1.0 } else { 0.0 })
                .collect(),
            weights: sample_weights,
            cfg,
            nodes: Vec::new(),
        };
        let rows: Vec<usize> = (0..xs.len()).collect();
        b.grow(&rows, 0);
        Self {
            dim,
            nodes: b.nodes,
        }
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[TreeNode], i: usize) -> usize {
            match nodes.get(i) {
                Some(TreeNode::Split { left, right, .. }) => {
                    1 + walk(nodes, *left).max(walk(nodes, *right))
                }
                _ => 0,
            }
        }
        walk(&self.nodes, 0)
    }
}

impl Builder<'_> {
    /// Push the subtree for `rows` and return its node index.
    fn grow(&mut self, rows: &[usize], depth: usize) -> usize {
        let (w_total, w_risky) = self.weight_sums(rows);
        let p_risky = if w_total > 0.0 { w_risky / w_total } else { 0.0 };
        let idx = self.nodes.len();
        self.nodes.push(TreeNode::Leaf { p_risky });

        let pure = w_risky <= 0.0 || w_risky >= w_total;
        if pure || depth >= self.cfg.max_depth || rows.len() < self.cfg.min_samples_split {
            return idx;
        }
        let Some(best) = self.best_split(rows, w_total) else {
            return idx;
        };

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .iter()
            .partition(|&&r| self.xs[r].get(best.feature) <= best.threshold);
        let left = self.grow(&left_rows, depth + 1);
        let right = self.grow(&right_rows, depth + 1);
        self.nodes[idx] = TreeNode::Split {
            feature: best.feature,
            threshold: best.threshold,
            left,
            right,
        };
        idx
    }

    fn weight_sums(&self, rows: &[usize]) -> (f64, f64) {
        rows.iter().fold((0.0, 0.0), |(t, r), &i| {
            (t + self.weights[i], r + self.weights[i] * self.targets[i])
        })
    }

    /// Lowest weighted child impurity over every feature present in `rows`.
    /// Features and thresholds are scanned in ascending order and only a
    /// strictly better score replaces the incumbent.
    fn best_split(&self, rows: &[usize], w_total: f64) -> Option<Candidate> {
        let features: BTreeSet<u32> = rows
            .iter()
            .flat_map(|&r| self.xs[r].iter().map(|(i, _)| i))
            .collect();
        let (_, all_risky) = self.weight_sums(rows);

        let mut best: Option<Candidate> = None;
        for feature in features {
            let mut values: Vec<(f64, usize)> =
                rows.iter().map(|&r| (self.xs[r].get(feature), r)).collect();
            values.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left_total = 0.0;
            let mut left_risky = 0.0;
            for k in 0..values.len() - 1 {
                let (v, r) = values[k];
                left_total += self.weights[r];
                left_risky += self.weights[r] * self.targets[r];
                let next = values[k + 1].0;
                if next <= v {
                    continue;
                }
                let right_total = w_total - left_total;
                let right_risky = all_risky - left_risky;
                let score = (left_total * gini(left_total, left_risky)
                    + right_total * gini(right_total, right_risky))
                    / w_total;
                if best.as_ref().map_or(true, |b| score < b.score) {
                    best = Some(Candidate {
                        feature,
                        threshold: v + (next - v) / 2.0,
                        score,
                    });
                }
            }
        }
        best
    }
}

fn gini(total: f64, risky: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    let p = risky / total;
    1.0 - p * p - (1.0 - p) * (1.0 - p)
}

impl Classifier for DecisionTree {
    fn feature_dim(&self) -> usize {
        self.dim
    }

    fn predict_proba(&self, x: &FeatureVector) -> CoreResult<f64> {
        self.check_dim(x)?;
        let mut i = 0;
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(i) {
                Some(TreeNode::Leaf { p_risky }) => return Ok(*p_risky),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    i = if x.get(*feature) <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                None => break,
            }
        }
        Err(CoreError::ArtifactMismatch(format!(
            "decision tree walk did not reach a leaf (stopped at node {})",
            i
        )))
    }
}
