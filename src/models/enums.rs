use serde::{Deserialize, Serialize};

/// Symptom severity with canonical casing as stored in the `symptoms` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
        }
    }

    /// Canonicalize free-text input, case-insensitively.
    ///
    /// Unrecognized input falls back to `Mild` — the most conservative
    /// reading of an answer we could not interpret. Never an error: the
    /// dialogue stores answers as given and defers validity to this step.
    pub fn from_input(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "severe" | "bad" | "terrible" | "intense" | "unbearable" => Self::Severe,
            "moderate" | "medium" | "noticeable" => Self::Moderate,
            _ => Self::Mild,
        }
    }
}
