use clause_risk_core::config::AnalyzerConfig;
use clause_risk_core::error::{CoreResult, ErrorKind};
use clause_risk_core::model::{Clause, RiskLabel, Verdict};
use clause_risk_core::pipeline::ContractAnalyzer;
use clause_risk_core::risk::{ModelRiskScorer, RiskBand, RiskScorer};
use clause_risk_core::segmentation::{build_segmenter, RegexSegmenter};
use clause_risk_core::training::{demo_corpus, run_training};
use std::collections::BTreeSet;
use std::fs;

const CONTRACT: &str = "SERVICES AGREEMENT\n\n\
    1. The Supplier shall provide the Services described in Schedule 1.\n\
    2. Either party may terminate this Agreement on 30 days notice.\n\
    3. Payment is due within 30 days of invoice date.\n\n\
    4. The Customer shall indemnify the Supplier against third-party claims.";

#[test]
fn rules_backend_end_to_end() {
    let analyzer = ContractAnalyzer::with_rules(&AnalyzerConfig::default());
    let report = analyzer.analyze(CONTRACT).unwrap();
    let labels: Vec<RiskLabel> = report.verdicts.iter().map(|v| v.label).collect();
    assert_eq!(
        labels,
        vec![RiskLabel::Safe, RiskLabel::Risky, RiskLabel::Safe, RiskLabel::Risky]
    );
    assert_eq!(report.summary.total, 4);
    assert_eq!(report.summary.risk_percentage, 50.0);
    assert_eq!(report.summary.band(), RiskBand::High);
    let safe_ids: Vec<usize> = report.with_label(RiskLabel::Safe).map(|v| v.clause.id).collect();
    assert_eq!(safe_ids, vec![1, 3]);
}

#[test]
fn empty_input_and_no_clauses_are_distinct_errors() {
    let analyzer = ContractAnalyzer::with_rules(&AnalyzerConfig::default());
    assert_eq!(analyzer.analyze("").unwrap_err().kind(), ErrorKind::EMPTY_INPUT);
    assert_eq!(
        analyzer.analyze("Heading\n\n1. Short one").unwrap_err().kind(),
        ErrorKind::NO_CLAUSES_FOUND
    );
}

struct Failing;

impl RiskScorer for Failing {
    fn backend(&self) -> &'static str {
        "failing"
    }

    fn score(&self, _clause: &Clause) -> CoreResult<Verdict> {
        Err(clause_risk_core::error::CoreError::UnfittedExtractor(
            "no vocabulary".to_string(),
        ))
    }
}

#[test]
fn scorer_errors_are_not_swallowed() {
    let analyzer = ContractAnalyzer::new(Box::new(RegexSegmenter::default()), Box::new(Failing));
    let err = analyzer.analyze(CONTRACT).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UNFITTED_EXTRACTOR);
}

struct Echo;

impl RiskScorer for Echo {
    fn backend(&self) -> &'static str {
        "echo"
    }

    fn score(&self, clause: &Clause) -> CoreResult<Verdict> {
        Ok(Verdict {
            clause: clause.clone(),
            label: RiskLabel::Safe,
            confidence: 1.0,
            matched_keywords: BTreeSet::new(),
        })
    }
}

#[test]
fn injected_scorer_sees_every_clause_in_order() {
    let analyzer = ContractAnalyzer::new(Box::new(RegexSegmenter::default()), Box::new(Echo));
    let report = analyzer.analyze(CONTRACT).unwrap();
    assert_eq!(report.backend, "echo");
    let ids: Vec<usize> = report.verdicts.iter().map(|v| v.clause.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(report.summary.risk_percentage, 0.0);
}

#[test]
fn model_backend_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cfg = AnalyzerConfig::default();
    cfg.artifacts.dir = tmp.path().to_path_buf();
    run_training(&demo_corpus(), &cfg).unwrap();

    let analyzer = ContractAnalyzer::new(
        build_segmenter(&cfg.segmentation),
        Box::new(ModelRiskScorer::load(&cfg.artifacts).unwrap()),
    );
    assert_eq!(analyzer.backend(), "trained_model");
    let report = analyzer.analyze(CONTRACT).unwrap();
    assert_eq!(report.verdicts.len(), 4);
    assert!(report.verdicts.iter().all(|v| v.matched_keywords.is_empty()));
    assert_eq!(
        report.summary.risky_count + report.summary.safe_count,
        report.summary.total
    );
}

#[test]
fn config_file_overrides_a_subset() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("analyzer.json");
    fs::write(
        &path,
        r#"{"risk": {"keywords": ["schedule"], "safe_confidence": 0.5},
            "segmentation": {"strategy": "regex"}}"#,
    )
    .unwrap();
    let cfg = AnalyzerConfig::load(&path).unwrap();
    assert_eq!(cfg.risk.risky_confidence, 0.85);
    assert_eq!(cfg.features.max_features, 10_000);

    let report = ContractAnalyzer::with_rules(&cfg).analyze(CONTRACT).unwrap();
    assert_eq!(report.verdicts[0].label, RiskLabel::Risky);
    assert_eq!(report.verdicts[1].label, RiskLabel::Safe);
    assert_eq!(report.verdicts[1].confidence, 0.5);
}

#[test]
fn invalid_config_file_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("bad.json");
    fs::write(&path, r#"{"risk": {"keyword_threshold": 0}}"#).unwrap();
    assert_eq!(AnalyzerConfig::load(&path).unwrap_err().kind(), ErrorKind::INVALID_CONFIG);
}

#[test]
fn segmentation_strategy_does_not_change_verdicts() {
    let text = "Deliveries occur weekly as agreed between the parties. 2. Penalty applies.\n\n\
                The Customer agrees as follows. 1. Fees are payable monthly in advance. \
                2. The Supplier may suspend service for late payment. 3. Interest accrues.";
    let mut regex_cfg = AnalyzerConfig::default();
    regex_cfg.segmentation.strategy = clause_risk_core::config::SegmentationStrategy::Regex;

    let inline = ContractAnalyzer::with_rules(&AnalyzerConfig::default()).analyze(text).unwrap();
    let fallback = ContractAnalyzer::with_rules(&regex_cfg).analyze(text).unwrap();

    assert_eq!(fallback.verdicts[0].label, RiskLabel::Risky);
    assert_eq!(inline.verdicts[0], fallback.verdicts[0]);
    assert!(inline.verdicts[0].matched_keywords.contains("penalty"));

    let words = |r: &clause_risk_core::pipeline::AnalysisReport| -> usize {
        r.verdicts.iter().map(|v| v.clause.word_count).sum()
    };
    assert_eq!(words(&inline), words(&fallback));
    let risky_text = |r: &clause_risk_core::pipeline::AnalysisReport| -> String {
        r.with_label(RiskLabel::Risky)
            .map(|v| v.clause.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    };
    assert!(risky_text(&inline).contains("Interest accrues."));
    assert!(risky_text(&fallback).contains("Interest accrues."));
}
