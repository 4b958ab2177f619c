use super::Classifier;
use crate::error::{CoreError, CoreResult};
use crate::features::FeatureVector;
use crate::model::RiskLabel;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassMetrics {
    pub label: RiskLabel,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelReport {
    pub name: String,
    /// Safe first, then Risky.
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_f1: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Evaluation {
    /// One report per candidate, in the order the candidates were given.
    pub reports: Vec<ModelReport>,
    pub best: String,
}

impl Evaluation {
    pub fn best_report(&self) -> Option<&ModelReport> {
        self.reports.iter().find(|r| r.name == self.best)
    }
}

/// Per-class precision/recall/F1 with support. Any ratio whose denominator is
/// zero is reported as 0.
pub fn classification_report(name: &str, y_true: &[RiskLabel], y_pred: &[RiskLabel]) -> ModelReport {
    let classes: Vec<ClassMetrics> = [RiskLabel::Safe, RiskLabel::Risky]
        .into_iter()
        .map(|label| {
            let mut tp = 0usize;
            let mut fp = 0usize;
            let mut fn_ = 0usize;
            for (t, p) in y_true.iter().zip(y_pred) {
                match (*t == label, *p == label) {
                    (true, true) => tp += 1,
                    (false, true) => fp += 1,
                    (true, false) => fn_ += 1,
                    (false, false) => {}
                }
            }
            let precision = ratio(tp, tp + fp);
            let recall = ratio(tp, tp + fn_);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };
            ClassMetrics {
                label,
                precision,
                recall,
                f1,
                support: tp + fn_,
            }
        })
        .collect();

    let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    let macro_f1 = classes.iter().map(|c| c.f1).sum::<f64>() / classes.len() as f64;
    ModelReport {
        name: name.to_string(),
        classes,
        accuracy: ratio(correct, y_true.len()),
        macro_f1,
    }
}

/// Score every candidate on the held-out set and pick the highest macro F1.
/// A later candidate replaces the incumbent only when strictly better, so an
/// exact tie goes to the candidate listed first.
pub fn evaluate<C: Classifier>(
    models: &[(String, C)],
    xs: &[FeatureVector],
    ys: &[RiskLabel],
) -> CoreResult<Evaluation> {
    if models.is_empty() {
        return Err(CoreError::TrainingData("no candidate models to evaluate".to_string()));
    }
    if xs.is_empty() || xs.len() != ys.len() {
        return Err(CoreError::TrainingData(format!(
            "need one label per test vector, got {} vectors and {} labels",
            xs.len(),
            ys.len()
        )));
    }

    let mut reports = Vec::with_capacity(models.len());
    let mut best: Option<(usize, f64)> = None;
    for (i, (name, model)) in models.iter().enumerate() {
        let y_pred = xs
            .iter()
            .map(|x| model.predict(x))
            .collect::<CoreResult<Vec<_>>>()?;
        let report = classification_report(name, ys, &y_pred);
        info!(
            model = %name,
            macro_f1 = report.macro_f1,
            accuracy = report.accuracy,
            "evaluated model"
        );
        if best.map_or(true, |(_, f)| report.macro_f1 > f) {
            best = Some((i, report.macro_f1));
        }
        reports.push(report);
    }

    let (idx, f1) = best.unwrap_or((0, 0.0));
    let best = models[idx].0.clone();
    info!(model = %best, macro_f1 = f1, "selected model");
    Ok(Evaluation { reports, best })
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl fmt::Display for ModelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(
            f,
            "{:>12} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        for c in &self.classes {
            writeln!(
                f,
                "{:>12} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                format!("{} ({})", c.label, c.label.flag()),
                c.precision,
                c.recall,
                c.f1,
                c.support
            )?;
        }
        writeln!(f, "{:>12} {:>9.2}", "accuracy", self.accuracy)?;
        write!(f, "{:>12} {:>9.4}", "macro f1", self.macro_f1)
    }
}
