use clause_risk_core::config::{AnalyzerConfig, RiskRuleConfig, DEFAULT_RISK_KEYWORDS};
use clause_risk_core::model::{Clause, RiskLabel};
use clause_risk_core::risk::{summarize, KeywordRiskScorer, RiskBand, RiskScorer};

#[test]
fn terminate_in_any_case_is_risky_at_085() {
    let scorer = KeywordRiskScorer::default();
    for text in [
        "Either party may terminate upon breach.",
        "Either party may Terminate upon breach.",
        "EITHER PARTY MAY TERMINATE UPON BREACH.",
    ] {
        let v = scorer.score(&Clause::new(1, text)).unwrap();
        assert_eq!(v.label, RiskLabel::Risky);
        assert_eq!(v.confidence, 0.85);
        assert!(v.matched_keywords.contains("terminate"));
    }
}

#[test]
fn payment_clause_is_safe_at_092() {
    let scorer = KeywordRiskScorer::default();
    let v = scorer
        .score(&Clause::new(1, "Payment is due within 30 days of invoice date."))
        .unwrap();
    assert_eq!(v.label, RiskLabel::Safe);
    assert_eq!(v.confidence, 0.92);
    assert!(v.matched_keywords.is_empty());
}

#[test]
fn scoring_is_deterministic_and_independent_of_order() {
    let scorer = KeywordRiskScorer::default();
    let a = Clause::new(1, "The Licensee shall indemnify and hold harmless the Licensor.");
    let b = Clause::new(2, "Notices shall be delivered by courier to the registered address.");
    let first = (scorer.score(&a).unwrap(), scorer.score(&b).unwrap());
    let second = (scorer.score(&b).unwrap(), scorer.score(&a).unwrap());
    assert_eq!(first.0, second.1);
    assert_eq!(first.1, second.0);
}

#[test]
fn every_default_keyword_triggers_on_its_own() {
    let scorer = KeywordRiskScorer::default();
    for kw in DEFAULT_RISK_KEYWORDS {
        let text = format!("This clause mentions {} explicitly here.", kw.to_uppercase());
        let v = scorer.score(&Clause::new(1, text)).unwrap();
        assert!(v.is_risky(), "{} did not trigger", kw);
        assert!(v.matched_keywords.contains(*kw));
    }
}

#[test]
fn injected_keywords_and_confidences_are_honoured() {
    let cfg = RiskRuleConfig {
        keywords: vec!["Exclusivity".to_string()],
        keyword_threshold: 1,
        risky_confidence: 0.6,
        safe_confidence: 0.7,
    };
    let scorer = KeywordRiskScorer::new(&cfg);
    let risky = scorer.score(&Clause::new(1, "Exclusivity applies worldwide for ten years.")).unwrap();
    assert_eq!((risky.label, risky.confidence), (RiskLabel::Risky, 0.6));
    assert!(risky.matched_keywords.contains("Exclusivity"));
    let safe = scorer.score(&Clause::new(2, "Either party may terminate upon breach.")).unwrap();
    assert_eq!((safe.label, safe.confidence), (RiskLabel::Safe, 0.7));
}

#[test]
fn summary_counts_add_up() {
    let scorer = KeywordRiskScorer::new(&AnalyzerConfig::default().risk);
    let verdicts: Vec<_> = [
        "Either party may terminate upon breach.",
        "Payment is due within 30 days of invoice date.",
        "The Supplier accepts unlimited liability for data loss.",
        "The parties will meet quarterly to review progress.",
    ]
    .iter()
    .enumerate()
    .map(|(i, t)| scorer.score(&Clause::new(i + 1, *t)).unwrap())
    .collect();

    let s = summarize(&verdicts);
    assert_eq!(s.total, 4);
    assert_eq!(s.risky_count + s.safe_count, s.total);
    assert_eq!(s.risky_count, 2);
    assert_eq!(s.risk_percentage, 50.0);
    assert_eq!(s.band(), RiskBand::High);

    let empty = summarize(&[]);
    assert_eq!(empty.risk_percentage, 0.0);
    assert_eq!(empty.risky_count + empty.safe_count, empty.total);
}
