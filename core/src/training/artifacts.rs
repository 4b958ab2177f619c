use super::trainer::FittedModel;
use super::Classifier;
use crate::config::ArtifactConfig;
use crate::error::{CoreError, CoreResult};
use crate::features::FittedExtractor;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const MODEL_SCHEMA_VERSION: &str = "CLAUSE_RISK_MODEL_V1";

/// The selected model, ready to be persisted next to its extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelArtifact {
    pub name: String,
    pub model: FittedModel,
    pub macro_f1: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ModelFile {
    schema_version: String,
    name: String,
    macro_f1: f64,
    feature_dim: usize,
    extractor_sha256: String,
    trained_at_utc: String,
    model: FittedModel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedPaths {
    pub model_path: PathBuf,
    pub extractor_path: PathBuf,
    pub extractor_sha256: String,
}

#[derive(Debug, Clone)]
pub struct LoadedArtifacts {
    pub artifact: ModelArtifact,
    pub extractor: FittedExtractor,
    pub trained_at_utc: String,
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    hex::encode(h.finalize())
}

/// Write the extractor, then the model that fingerprints it. Each file lands
/// under a temporary name first and is renamed into place, so a reader never
/// sees a half-written file. Concurrent writers to one directory race; the
/// last rename wins.
pub fn persist(
    artifact: &ModelArtifact,
    extractor: &FittedExtractor,
    cfg: &ArtifactConfig,
) -> CoreResult<PersistedPaths> {
    if artifact.model.feature_dim() != extractor.dim() {
        return Err(CoreError::ArtifactMismatch(format!(
            "model expects {} features but extractor produces {}",
            artifact.model.feature_dim(),
            extractor.dim()
        )));
    }
    fs::create_dir_all(&cfg.dir)?;

    let extractor_bytes = serde_json::to_vec(extractor)?;
    let extractor_sha256 = sha256_hex(&extractor_bytes);
    let model_file = ModelFile {
        schema_version: MODEL_SCHEMA_VERSION.to_string(),
        name: artifact.name.clone(),
        macro_f1: artifact.macro_f1,
        feature_dim: extractor.dim(),
        extractor_sha256: extractor_sha256.clone(),
        trained_at_utc: now_rfc3339_utc(),
        model: artifact.model.clone(),
    };
    let model_bytes = serde_json::to_vec_pretty(&model_file)?;

    let extractor_path = cfg.extractor_path();
    let model_path = cfg.model_path();
    write_atomic(&extractor_path, &extractor_bytes)?;
    write_atomic(&model_path, &model_bytes)?;
    info!(
        model = %artifact.name,
        model_path = %model_path.display(),
        extractor_path = %extractor_path.display(),
        "persisted artifacts"
    );

    Ok(PersistedPaths {
        model_path,
        extractor_path,
        extractor_sha256,
    })
}

/// Load and cross-check the persisted pair. Fails with `ArtifactMismatch`
/// when only one file exists, when the extractor bytes do not match the
/// fingerprint recorded in the model file, or when dimensions disagree.
pub fn load_artifacts(cfg: &ArtifactConfig) -> CoreResult<LoadedArtifacts> {
    let model_path = cfg.model_path();
    let extractor_path = cfg.extractor_path();
    match (model_path.exists(), extractor_path.exists()) {
        (true, true) => {}
        (false, false) => {
            return Err(CoreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no trained artifacts under {}", cfg.dir.display()),
            )))
        }
        (has_model, _) => {
            let missing = if has_model { &extractor_path } else { &model_path };
            return Err(mismatch(format!("missing paired file {}", missing.display())));
        }
    }

    let model_file: ModelFile = serde_json::from_slice(&fs::read(&model_path)?)?;
    if model_file.schema_version != MODEL_SCHEMA_VERSION {
        return Err(mismatch(format!(
            "expected {}, got {}",
            MODEL_SCHEMA_VERSION, model_file.schema_version
        )));
    }
    let extractor_bytes = fs::read(&extractor_path)?;
    let actual_sha = sha256_hex(&extractor_bytes);
    if actual_sha != model_file.extractor_sha256 {
        return Err(mismatch(format!(
            "extractor sha256 {} does not match {} recorded by the model",
            actual_sha, model_file.extractor_sha256
        )));
    }
    let extractor: FittedExtractor = serde_json::from_slice(&extractor_bytes)?;
    let model_dim = model_file.model.feature_dim();
    if extractor.dim() != model_file.feature_dim || model_dim != model_file.feature_dim {
        return Err(mismatch(format!(
            "feature dimensions disagree: extractor {}, model {}, recorded {}",
            extractor.dim(),
            model_dim,
            model_file.feature_dim
        )));
    }

    info!(
        model = %model_file.name,
        feature_dim = model_file.feature_dim,
        "loaded artifacts"
    );
    Ok(LoadedArtifacts {
        artifact: ModelArtifact {
            name: model_file.name,
            model: model_file.model,
            macro_f1: model_file.macro_f1,
        },
        extractor,
        trained_at_utc: model_file.trained_at_utc,
    })
}

fn mismatch(msg: String) -> CoreError {
    warn!(reason = %msg, "artifact pair rejected");
    CoreError::ArtifactMismatch(msg)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> CoreResult<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn now_rfc3339_utc() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}
