//! Offline training job: labelled corpus in, paired model + extractor
//! artifacts out.
//!
//! The flow is corpus validation, a stratified seeded split, TF-IDF fitting
//! on the training side only, fitting each classifier family, held-out
//! evaluation with macro-F1 selection, and persistence of the winner.

pub mod artifacts;
pub mod corpus;
pub mod evaluator;
pub mod linear;
pub mod split;
pub mod trainer;
pub mod tree;

pub use artifacts::{load_artifacts, persist, LoadedArtifacts, ModelArtifact, PersistedPaths};
pub use corpus::{demo_corpus, load_corpus_csv, TrainingExample};
pub use evaluator::{evaluate, ClassMetrics, Evaluation, ModelReport};
pub use split::{stratified_split, Split};
pub use trainer::{train, FittedModel};

use crate::config::AnalyzerConfig;
use crate::error::{CoreError, CoreResult};
use crate::features::{FeatureVector, FittedExtractor, TfidfVectorizer};
use crate::model::RiskLabel;
use tracing::info;

/// Binary probabilistic classifier over fitted feature vectors.
pub trait Classifier {
    /// Dimensionality the classifier was fitted on.
    fn feature_dim(&self) -> usize;

    /// Probability that `x` is Risky.
    fn predict_proba(&self, x: &FeatureVector) -> CoreResult<f64>;

    fn predict(&self, x: &FeatureVector) -> CoreResult<RiskLabel> {
        Ok(if self.predict_proba(x)? > 0.5 {
            RiskLabel::Risky
        } else {
            RiskLabel::Safe
        })
    }

    fn check_dim(&self, x: &FeatureVector) -> CoreResult<()> {
        if x.dim() != self.feature_dim() {
            return Err(CoreError::UnfittedExtractor(format!(
                "feature vector has {} dimensions, classifier expects {}",
                x.dim(),
                self.feature_dim()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub train_size: usize,
    pub test_size: usize,
    pub evaluation: Evaluation,
    pub artifact: ModelArtifact,
    pub extractor: FittedExtractor,
    pub paths: PersistedPaths,
}

/// Run the whole job and persist the selected model under `cfg.artifacts`.
pub fn run_training(examples: &[TrainingExample], cfg: &AnalyzerConfig) -> CoreResult<TrainingOutcome> {
    corpus::validate_corpus(examples)?;
    let labels = examples
        .iter()
        .map(TrainingExample::label)
        .collect::<CoreResult<Vec<_>>>()?;

    let split = stratified_split(&labels, cfg.training.test_fraction, cfg.training.random_seed)?;
    info!(
        examples = examples.len(),
        train = split.train.len(),
        test = split.test.len(),
        "split corpus"
    );

    let texts_of = |rows: &[usize]| -> Vec<String> {
        rows.iter().map(|&i| examples[i].clause_text.clone()).collect()
    };
    let labels_of = |rows: &[usize]| -> Vec<RiskLabel> { rows.iter().map(|&i| labels[i]).collect() };

    let train_texts = texts_of(&split.train);
    let extractor = TfidfVectorizer::new(&cfg.features).fit(&train_texts)?;
    info!(vocabulary = extractor.dim(), "fitted feature extractor");
    let x_train = extractor.transform(&train_texts)?;
    let x_test = extractor.transform(&texts_of(&split.test))?;
    let y_train = labels_of(&split.train);
    let y_test = labels_of(&split.test);

    let models = train(&x_train, &y_train, &cfg.training)?;
    let evaluation = evaluate(&models, &x_test, &y_test)?;

    let macro_f1 = evaluation.best_report().map_or(0.0, |r| r.macro_f1);
    let model = models
        .into_iter()
        .find(|(name, _)| *name == evaluation.best)
        .map(|(_, m)| m)
        .ok_or_else(|| CoreError::TrainingData(format!("selected model {} vanished", evaluation.best)))?;
    let artifact = ModelArtifact {
        name: evaluation.best.clone(),
        model,
        macro_f1,
    };
    let paths = persist(&artifact, &extractor, &cfg.artifacts)?;

    Ok(TrainingOutcome {
        train_size: split.train.len(),
        test_size: split.test.len(),
        evaluation,
        artifact,
        extractor,
        paths,
    })
}
