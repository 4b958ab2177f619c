use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Curated legal risk terms, grouped by category.
pub const DEFAULT_RISK_KEYWORDS: &[&str] = &[
    // Liability & indemnity
    "indemnify", "indemnification", "indemnified", "hold harmless",
    "liability", "unlimited liability", "gross negligence",
    // Termination & penalties
    "terminate", "termination", "penalty", "penalties", "liquidated damages",
    "forfeiture", "default",
    // Dispute resolution
    "arbitration", "arbitral", "waive", "waiver", "waived",
    "jurisdiction", "governing law",
    // Intellectual property
    "irrevocable", "perpetual", "royalty-free", "sublicense",
    "assign", "assignment", "transfer of rights",
    // Confidentiality
    "non-disclosure", "proprietary", "trade secret", "confidential information",
    // Financial risk
    "interest rate", "compound interest", "late payment", "surcharge",
    "deduct", "withhold", "escrow",
    // Employment / non-compete
    "non-compete", "non-solicitation", "garden leave", "restraint of trade",
];

/// Process-wide analyzer configuration. Built once at startup and passed by
/// reference into the components that need it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub segmentation: SegmentationConfig,
    pub risk: RiskRuleConfig,
    pub features: FeatureConfig,
    pub training: TrainingConfig,
    pub artifacts: ArtifactConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SegmentationStrategy {
    SentenceAware,
    Regex,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SegmentationConfig {
    pub strategy: SegmentationStrategy,
    /// Candidates with this many words or fewer are dropped.
    pub min_words: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            strategy: SegmentationStrategy::SentenceAware,
            min_words: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RiskRuleConfig {
    pub keywords: Vec<String>,
    pub keyword_threshold: usize,
    pub risky_confidence: f64,
    pub safe_confidence: f64,
}

impl Default for RiskRuleConfig {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_RISK_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            keyword_threshold: 1,
            risky_confidence: 0.85,
            safe_confidence: 0.92,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeatureConfig {
    pub max_features: usize,
    pub ngram_range: (usize, usize),
    pub sublinear_tf: bool,
    pub strip_accents: bool,
    pub lowercase: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            max_features: 10_000,
            ngram_range: (1, 2),
            sublinear_tf: true,
            strip_accents: true,
            lowercase: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrainingConfig {
    pub random_seed: u64,
    pub test_fraction: f64,
    pub linear: LinearModelConfig,
    pub tree: TreeModelConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            random_seed: 42,
            test_fraction: 0.2,
            linear: LinearModelConfig::default(),
            tree: TreeModelConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LinearModelConfig {
    pub max_iter: usize,
    pub learning_rate: f64,
    pub l2: f64,
}

impl Default for LinearModelConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            learning_rate: 0.5,
            l2: 1e-4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TreeModelConfig {
    pub max_depth: usize,
    pub min_samples_split: usize,
}

impl Default for TreeModelConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            min_samples_split: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArtifactConfig {
    pub dir: PathBuf,
    pub model_filename: String,
    pub extractor_filename: String,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("models"),
            model_filename: "best_model.json".to_string(),
            extractor_filename: "tfidf_vectorizer.json".to_string(),
        }
    }
}

impl ArtifactConfig {
    pub fn model_path(&self) -> PathBuf {
        self.dir.join(&self.model_filename)
    }

    pub fn extractor_path(&self) -> PathBuf {
        self.dir.join(&self.extractor_filename)
    }
}

impl AnalyzerConfig {
    /// Read a JSON config file. Sections or fields left out keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let bytes = fs::read(path.as_ref())?;
        let cfg: AnalyzerConfig = serde_json::from_slice(&bytes)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> CoreResult<()> {
        let risk = &self.risk;
        if risk.keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(CoreError::InvalidConfig(
                "risk.keywords must contain at least one term".to_string(),
            ));
        }
        if risk.keyword_threshold == 0 {
            return Err(CoreError::InvalidConfig(
                "risk.keyword_threshold must be >= 1".to_string(),
            ));
        }
        for (name, v) in [
            ("risk.risky_confidence", risk.risky_confidence),
            ("risk.safe_confidence", risk.safe_confidence),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(CoreError::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, v
                )));
            }
        }

        let feat = &self.features;
        if feat.max_features == 0 {
            return Err(CoreError::InvalidConfig(
                "features.max_features must be >= 1".to_string(),
            ));
        }
        let (lo, hi) = feat.ngram_range;
        if lo == 0 || lo > hi {
            return Err(CoreError::InvalidConfig(format!(
                "features.ngram_range ({}, {}) is not a valid range",
                lo, hi
            )));
        }

        let tf = self.training.test_fraction;
        if !(tf > 0.0 && tf < 1.0) {
            return Err(CoreError::InvalidConfig(format!(
                "training.test_fraction must be within (0, 1), got {}",
                tf
            )));
        }
        let linear = &self.training.linear;
        if !(linear.learning_rate.is_finite() && linear.learning_rate > 0.0) {
            return Err(CoreError::InvalidConfig(format!(
                "training.linear.learning_rate must be finite and > 0, got {}",
                linear.learning_rate
            )));
        }
        if !(linear.l2.is_finite() && linear.l2 >= 0.0) {
            return Err(CoreError::InvalidConfig(format!(
                "training.linear.l2 must be finite and >= 0, got {}",
                linear.l2
            )));
        }
        let tree = &self.training.tree;
        if tree.max_depth == 0 {
            return Err(CoreError::InvalidConfig(
                "training.tree.max_depth must be >= 1".to_string(),
            ));
        }
        if tree.min_samples_split < 2 {
            return Err(CoreError::InvalidConfig(format!(
                "training.tree.min_samples_split must be >= 2, got {}",
                tree.min_samples_split
            )));
        }

        if self.artifacts.model_filename == self.artifacts.extractor_filename {
            return Err(CoreError::InvalidConfig(
                "model and extractor artifacts need distinct filenames".to_string(),
            ));
        }
        Ok(())
    }
}
