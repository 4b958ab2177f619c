use clause_risk_core::config::AnalyzerConfig;
use clause_risk_core::error::{CoreResult, ErrorKind};
use clause_risk_core::features::FeatureVector;
use clause_risk_core::model::RiskLabel;
use clause_risk_core::training::{
    demo_corpus, evaluate, load_corpus_csv, run_training, stratified_split, Classifier,
};
use std::fs;

/// Predicts Risky exactly when feature 0 is present, or always a fixed label.
struct Stub {
    keyed: bool,
    constant: f64,
}

impl Classifier for Stub {
    fn feature_dim(&self) -> usize {
        2
    }

    fn predict_proba(&self, x: &FeatureVector) -> CoreResult<f64> {
        self.check_dim(x)?;
        if self.keyed {
            Ok(if x.get(0) > 0.0 { 0.9 } else { 0.1 })
        } else {
            Ok(self.constant)
        }
    }
}

fn test_set() -> (Vec<FeatureVector>, Vec<RiskLabel>) {
    (
        vec![
            FeatureVector::from_pairs(2, vec![(0, 1.0)]),
            FeatureVector::from_pairs(2, vec![(1, 1.0)]),
            FeatureVector::from_pairs(2, vec![(0, 0.5), (1, 0.5)]),
            FeatureVector::from_pairs(2, vec![(1, 0.3)]),
        ],
        vec![RiskLabel::Risky, RiskLabel::Safe, RiskLabel::Risky, RiskLabel::Safe],
    )
}

#[test]
fn dominant_model_wins_regardless_of_position() {
    let (xs, ys) = test_set();
    let models = vec![
        ("always safe".to_string(), Stub { keyed: false, constant: 0.2 }),
        ("keyed".to_string(), Stub { keyed: true, constant: 0.0 }),
    ];
    let eval = evaluate(&models, &xs, &ys).unwrap();
    assert_eq!(eval.best, "keyed");
    assert_eq!(eval.reports.len(), 2);
    assert_eq!(eval.reports[0].name, "always safe");
    assert_eq!(eval.best_report().unwrap().macro_f1, 1.0);
}

#[test]
fn exact_tie_goes_to_first_trained() {
    let (xs, ys) = test_set();
    let models = vec![
        ("first".to_string(), Stub { keyed: true, constant: 0.0 }),
        ("second".to_string(), Stub { keyed: true, constant: 0.0 }),
    ];
    assert_eq!(evaluate(&models, &xs, &ys).unwrap().best, "first");

    let reversed = vec![
        ("second".to_string(), Stub { keyed: true, constant: 0.0 }),
        ("first".to_string(), Stub { keyed: true, constant: 0.0 }),
    ];
    assert_eq!(evaluate(&reversed, &xs, &ys).unwrap().best, "second");
}

#[test]
fn evaluation_rejects_wrong_dimension() {
    let models = vec![("keyed".to_string(), Stub { keyed: true, constant: 0.0 })];
    let xs = vec![FeatureVector::from_pairs(3, vec![(0, 1.0)])];
    let err = evaluate(&models, &xs, &[RiskLabel::Risky]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UNFITTED_EXTRACTOR);
}

#[test]
fn split_is_reproducible_and_stratified() {
    let labels: Vec<RiskLabel> = demo_corpus().iter().map(|e| e.label().unwrap()).collect();
    let a = stratified_split(&labels, 0.2, 42).unwrap();
    let b = stratified_split(&labels, 0.2, 42).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.test.len(), 2);
    let risky_in_test = a.test.iter().filter(|&&i| labels[i] == RiskLabel::Risky).count();
    assert_eq!(risky_in_test, 1);
}

#[test]
fn demo_training_persists_a_loadable_pair() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cfg = AnalyzerConfig::default();
    cfg.artifacts.dir = tmp.path().join("models");

    let outcome = run_training(&demo_corpus(), &cfg).unwrap();
    assert_eq!(outcome.train_size, 8);
    assert_eq!(outcome.test_size, 2);
    assert_eq!(outcome.evaluation.reports.len(), 2);
    assert_eq!(outcome.evaluation.reports[0].name, "Logistic Regression");
    assert_eq!(outcome.evaluation.reports[1].name, "Decision Tree");
    assert_eq!(outcome.artifact.name, outcome.evaluation.best);
    assert!(outcome.paths.model_path.ends_with("best_model.json"));
    assert!(outcome.paths.extractor_path.ends_with("tfidf_vectorizer.json"));
    assert!(outcome.paths.model_path.exists());
    assert!(outcome.paths.extractor_path.exists());
    assert_eq!(outcome.paths.extractor_sha256.len(), 64);
}

#[test]
fn repeated_runs_select_the_same_model() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cfg = AnalyzerConfig::default();
    cfg.artifacts.dir = tmp.path().to_path_buf();
    let a = run_training(&demo_corpus(), &cfg).unwrap();
    let b = run_training(&demo_corpus(), &cfg).unwrap();
    assert_eq!(a.evaluation, b.evaluation);
    assert_eq!(a.artifact, b.artifact);
}

#[test]
fn csv_corpus_errors_are_training_data() {
    let tmp = tempfile::tempdir().unwrap();

    let wrong_cols = tmp.path().join("wrong.csv");
    fs::write(&wrong_cols, "text,label\nsome clause text,1\n").unwrap();
    assert_eq!(load_corpus_csv(&wrong_cols).unwrap_err().kind(), ErrorKind::TRAINING_DATA);

    let one_class = tmp.path().join("one.csv");
    fs::write(&one_class, "clause_text,is_risky\nfirst clause text,0\nsecond clause text,0\n").unwrap();
    assert_eq!(load_corpus_csv(&one_class).unwrap_err().kind(), ErrorKind::TRAINING_DATA);

    let missing = tmp.path().join("missing.csv");
    assert_eq!(load_corpus_csv(&missing).unwrap_err().kind(), ErrorKind::IO);
}

#[test]
fn csv_corpus_trains_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("corpus.csv");
    let mut body = String::from("clause_text,is_risky\n");
    for ex in demo_corpus() {
        body.push_str(&format!("\"{}\",{}\n", ex.clause_text, ex.is_risky));
    }
    fs::write(&path, body).unwrap();

    let examples = load_corpus_csv(&path).unwrap();
    assert_eq!(examples, demo_corpus());

    let mut cfg = AnalyzerConfig::default();
    cfg.artifacts.dir = tmp.path().join("out");
    let outcome = run_training(&examples, &cfg).unwrap();
    assert!(outcome.artifact.macro_f1 >= 0.0 && outcome.artifact.macro_f1 <= 1.0);
}
