use super::tokenize::{ngrams, preprocess, tokens};
use super::vector::FeatureVector;
use crate::config::FeatureConfig;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

pub const EXTRACTOR_SCHEMA_VERSION: &str = "CLAUSE_RISK_TFIDF_V1";

/// Unfitted TF-IDF configuration. [`TfidfVectorizer::fit`] is the only way to
/// obtain a [`FittedExtractor`].
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    cfg: FeatureConfig,
}

impl TfidfVectorizer {
    pub fn new(cfg: &FeatureConfig) -> Self {
        Self { cfg: cfg.clone() }
    }

    /// Learn the vocabulary and inverse document frequencies.
    ///
    /// The vocabulary keeps the `max_features` terms with the highest corpus
    /// frequency (ties broken alphabetically) and is then indexed
    /// alphabetically. IDF is smoothed: `ln((1 + n) / (1 + df)) + 1`.
    pub fn fit<S: AsRef<str>>(&self, texts: &[S]) -> CoreResult<FittedExtractor> {
        if texts.is_empty() {
            return Err(CoreError::TrainingData(
                "cannot fit feature extractor on an empty corpus".to_string(),
            ));
        }

        // term -> (document frequency, corpus frequency)
        let mut stats: HashMap<String, (usize, usize)> = HashMap::new();
        for text in texts {
            let terms = analyze(text.as_ref(), &self.cfg);
            let mut seen: HashSet<&str> = HashSet::new();
            for term in &terms {
                let entry = stats.entry(term.clone()).or_insert((0, 0));
                entry.1 += 1;
                if seen.insert(term.as_str()) {
                    entry.0 += 1;
                }
            }
        }
        if stats.is_empty() {
            return Err(CoreError::TrainingData(
                "training texts produced an empty vocabulary".to_string(),
            ));
        }

        let mut ranked: Vec<(String, (usize, usize))> = stats.into_iter().collect();
        if ranked.len() > self.cfg.max_features {
            ranked.sort_by(|a, b| b.1 .1.cmp(&a.1 .1).then_with(|| a.0.cmp(&b.0)));
            ranked.truncate(self.cfg.max_features);
        }
        ranked.sort_by(|a, b| a.0.cmp(&b.0));

        let n = texts.len() as f64;
        let idf = ranked
            .iter()
            .map(|(_, (df, _))| ((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();
        let terms = ranked.into_iter().map(|(t, _)| t).collect();

        FittedExtractor::try_from(ExtractorState {
            schema_version: EXTRACTOR_SCHEMA_VERSION.to_string(),
            params: self.cfg.clone(),
            n_documents: texts.len(),
            terms,
            idf,
        })
    }
}

/// Fitted, immutable TF-IDF projection. Shared read-only between training
/// and inference; nothing mutates it after fitting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ExtractorState", into = "ExtractorState")]
pub struct FittedExtractor {
    state: ExtractorState,
    index: HashMap<String, u32>,
}

/// On-disk form of a [`FittedExtractor`]. The term index is rebuilt and
/// checked on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorState {
    schema_version: String,
    params: FeatureConfig,
    n_documents: usize,
    terms: Vec<String>,
    idf: Vec<f64>,
}

impl TryFrom<ExtractorState> for FittedExtractor {
    type Error = CoreError;

    fn try_from(state: ExtractorState) -> CoreResult<Self> {
        if state.schema_version != EXTRACTOR_SCHEMA_VERSION {
            return Err(CoreError::ArtifactMismatch(format!(
                "expected {}, got {}",
                EXTRACTOR_SCHEMA_VERSION, state.schema_version
            )));
        }
        if state.terms.len() != state.idf.len() {
            return Err(CoreError::ArtifactMismatch(format!(
                "extractor has {} terms but {} idf weights",
                state.terms.len(),
                state.idf.len()
            )));
        }
        let mut index = HashMap::with_capacity(state.terms.len());
        for (i, term) in state.terms.iter().enumerate() {
            if index.insert(term.clone(), i as u32).is_some() {
                return Err(CoreError::ArtifactMismatch(format!(
                    "duplicate vocabulary term {:?}",
                    term
                )));
            }
        }
        Ok(Self { state, index })
    }
}

impl From<FittedExtractor> for ExtractorState {
    fn from(fx: FittedExtractor) -> Self {
        fx.state
    }
}

impl FittedExtractor {
    /// Feature dimensionality, fixed at fit time.
    pub fn dim(&self) -> usize {
        self.state.terms.len()
    }

    pub fn params(&self) -> &FeatureConfig {
        &self.state.params
    }

    pub fn n_documents(&self) -> usize {
        self.state.n_documents
    }

    pub fn term_index(&self, term: &str) -> Option<u32> {
        self.index.get(term).copied()
    }

    /// Project texts into the fitted feature space. Terms outside the
    /// vocabulary are ignored; the vocabulary is never extended.
    pub fn transform<S: AsRef<str>>(&self, texts: &[S]) -> CoreResult<Vec<FeatureVector>> {
        texts.iter().map(|t| self.transform_one(t.as_ref())).collect()
    }

    pub fn transform_one(&self, text: &str) -> CoreResult<FeatureVector> {
        if self.dim() == 0 {
            return Err(CoreError::UnfittedExtractor(
                "extractor has no fitted vocabulary".to_string(),
            ));
        }

        let mut counts: BTreeMap<u32, f64> = BTreeMap::new();
        for term in analyze(text, &self.state.params) {
            if let Some(&idx) = self.index.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let sublinear = self.state.params.sublinear_tf;
        let mut pairs: Vec<(u32, f64)> = counts
            .into_iter()
            .map(|(idx, tf)| {
                let tf = if sublinear { 1.0 + tf.ln() } else { tf };
                (idx, tf * self.state.idf[idx as usize])
            })
            .collect();

        let norm = pairs.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, v) in &mut pairs {
                *v /= norm;
            }
        }
        Ok(FeatureVector::from_pairs(self.dim(), pairs))
    }
}

fn analyze(text: &str, cfg: &FeatureConfig) -> Vec<String> {
    let prepared = preprocess(text, cfg.strip_accents, cfg.lowercase);
    ngrams(&tokens(&prepared), cfg.ngram_range)
}
