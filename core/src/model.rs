use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One unit of contract text, numbered in document order starting at 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Clause {
    pub id: usize,
    pub text: String,
    pub word_count: usize,
}

impl Clause {
    pub fn new(id: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        let word_count = text.split_whitespace().count();
        Self {
            id,
            text,
            word_count,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RiskLabel {
    Safe,
    Risky,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "Safe",
            Self::Risky => "Risky",
        }
    }

    /// Corpus encoding: 0 = Safe, 1 = Risky.
    pub fn from_flag(flag: u8) -> Option<Self> {
        match flag {
            0 => Some(Self::Safe),
            1 => Some(Self::Risky),
            _ => None,
        }
    }

    pub fn flag(&self) -> u8 {
        match self {
            Self::Safe => 0,
            Self::Risky => 1,
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk decision for exactly one clause.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Verdict {
    pub clause: Clause,
    pub label: RiskLabel,
    pub confidence: f64,
    /// Keywords that triggered the rule engine. Always empty for model verdicts.
    pub matched_keywords: BTreeSet<String>,
}

impl Verdict {
    pub fn is_risky(&self) -> bool {
        self.label == RiskLabel::Risky
    }
}
