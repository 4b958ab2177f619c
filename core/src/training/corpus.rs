use crate::error::{CoreError, CoreResult};
use crate::model::RiskLabel;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

pub const TEXT_COLUMN: &str = "clause_text";
pub const LABEL_COLUMN: &str = "is_risky";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrainingExample {
    pub clause_text: String,
    pub is_risky: u8,
}

impl TrainingExample {
    pub fn new(clause_text: impl Into<String>, label: RiskLabel) -> Self {
        Self {
            clause_text: clause_text.into(),
            is_risky: label.flag(),
        }
    }

    pub fn label(&self) -> CoreResult<RiskLabel> {
        RiskLabel::from_flag(self.is_risky).ok_or_else(|| {
            CoreError::TrainingData(format!(
                "{} must be 0 or 1, got {}",
                LABEL_COLUMN, self.is_risky
            ))
        })
    }
}

pub fn load_corpus_csv(path: impl AsRef<Path>) -> CoreResult<Vec<TrainingExample>> {
    let file = std::fs::File::open(path.as_ref())?;
    read_corpus(file)
}

/// Parse a labelled corpus. The header must be exactly `clause_text,is_risky`
/// in either order; labels must be `0` or `1`.
pub fn read_corpus<R: Read>(reader: R) -> CoreResult<Vec<TrainingExample>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();
    let names: Vec<&str> = headers.iter().map(str::trim).collect();
    let text_idx = names.iter().position(|h| *h == TEXT_COLUMN);
    let label_idx = names.iter().position(|h| *h == LABEL_COLUMN);
    let (text_idx, label_idx) = match (text_idx, label_idx) {
        (Some(t), Some(l)) if names.len() == 2 => (t, l),
        _ => {
            return Err(CoreError::TrainingData(format!(
                "corpus columns must be exactly [{}, {}], got {:?}",
                TEXT_COLUMN, LABEL_COLUMN, names
            )))
        }
    };

    let mut out = Vec::new();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let text = rec.get(text_idx).unwrap_or("").to_string();
        let raw = rec.get(label_idx).unwrap_or("").trim();
        let label = match raw {
            "0" => RiskLabel::Safe,
            "1" => RiskLabel::Risky,
            other => {
                return Err(CoreError::TrainingData(format!(
                    "row {}: {} must be 0 or 1, got {:?}",
                    row + 1,
                    LABEL_COLUMN,
                    other
                )))
            }
        };
        out.push(TrainingExample::new(text, label));
    }
    validate_corpus(&out)?;
    Ok(out)
}

/// A usable corpus is non-empty and contains both labels.
pub fn validate_corpus(examples: &[TrainingExample]) -> CoreResult<()> {
    if examples.is_empty() {
        return Err(CoreError::TrainingData("corpus is empty".to_string()));
    }
    let mut safe = 0usize;
    let mut risky = 0usize;
    for ex in examples {
        match ex.label()? {
            RiskLabel::Safe => safe += 1,
            RiskLabel::Risky => risky += 1,
        }
    }
    if safe == 0 || risky == 0 {
        return Err(CoreError::TrainingData(format!(
            "corpus must contain both labels (safe={}, risky={})",
            safe, risky
        )));
    }
    Ok(())
}

/// Ten hand-labelled clauses for smoke-testing the training job.
pub fn demo_corpus() -> Vec<TrainingExample> {
    const ROWS: &[(&str, u8)] = &[
        ("The party may terminate this agreement without notice at any time.", 1),
        ("Either party shall provide 30 days written notice before termination.", 0),
        ("Liability is limited to the total fees paid in the preceding month.", 1),
        ("The vendor assumes no liability for indirect or consequential damages.", 1),
        ("Confidential information must not be disclosed to any third parties.", 0),
        ("All disputes shall be resolved through binding arbitration.", 1),
        ("Payment is due within 30 days of invoice date.", 0),
        ("The client retains full intellectual property rights over deliverables.", 0),
        ("The contractor may subcontract work without prior written consent.", 1),
        ("Governing law shall be the laws of the State of New York.", 0),
    ];
    ROWS.iter()
        .map(|(text, flag)| TrainingExample {
            clause_text: text.to_string(),
            is_risky: *flag,
        })
        .collect()
}
