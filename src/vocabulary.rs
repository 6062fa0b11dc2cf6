//! Region-specific terminology used to parametrize intent patterns.
//!
//! Pure data. Loaded once, immutable, shared freely across conversations.
//! The same pattern template recognizes "GP" for an Australian user and
//! "PCP" for an American one.

use serde::{Deserialize, Serialize};

/// Jurisdiction the user's profile is registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Australia,
    UnitedKingdom,
    UnitedStates,
}

impl Region {
    /// All regions with a dedicated vocabulary.
    pub const ALL: [Region; 3] = [
        Region::Australia,
        Region::UnitedKingdom,
        Region::UnitedStates,
    ];

    /// Parse a region code, case-insensitively.
    ///
    /// Unrecognized codes return None; callers fall back to the broadest
    /// (default) vocabulary rather than failing.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "AU" | "AUS" => Some(Self::Australia),
            "UK" | "GB" => Some(Self::UnitedKingdom),
            "US" | "USA" => Some(Self::UnitedStates),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Australia => "AU",
            Self::UnitedKingdom => "UK",
            Self::UnitedStates => "USA",
        }
    }
}

/// Terminology for one region, interpolated into rule templates.
#[derive(Debug, Clone, Copy)]
pub struct RegionalVocabulary {
    pub doctor_terms: &'static [&'static str],
    pub pharmacy_terms: &'static [&'static str],
    pub appointment_terms: &'static [&'static str],
}

const AU_VOCABULARY: RegionalVocabulary = RegionalVocabulary {
    doctor_terms: &["gp", "doctor", "specialist"],
    pharmacy_terms: &["chemist", "pharmacy"],
    appointment_terms: &["appointment", "consult", "checkup"],
};

const UK_VOCABULARY: RegionalVocabulary = RegionalVocabulary {
    doctor_terms: &["gp", "doctor", "consultant"],
    pharmacy_terms: &["chemist", "pharmacy"],
    appointment_terms: &["appointment", "surgery visit", "checkup"],
};

const US_VOCABULARY: RegionalVocabulary = RegionalVocabulary {
    doctor_terms: &["pcp", "primary care doctor", "doctor", "physician"],
    pharmacy_terms: &["pharmacy", "drugstore"],
    appointment_terms: &["appointment", "visit", "checkup"],
};

/// Union of every regional set. Used when the region is unknown so an
/// unrecognized code degrades recognition, never breaks it.
const DEFAULT_VOCABULARY: RegionalVocabulary = RegionalVocabulary {
    doctor_terms: &[
        "gp",
        "pcp",
        "primary care doctor",
        "doctor",
        "physician",
        "specialist",
        "consultant",
    ],
    pharmacy_terms: &["chemist", "pharmacy", "drugstore"],
    appointment_terms: &["appointment", "consult", "visit", "surgery visit", "checkup"],
};

/// Vocabulary for a region, or the broadest set when unspecified.
pub fn vocabulary_for(region: Option<Region>) -> RegionalVocabulary {
    match region {
        Some(Region::Australia) => AU_VOCABULARY,
        Some(Region::UnitedKingdom) => UK_VOCABULARY,
        Some(Region::UnitedStates) => US_VOCABULARY,
        None => DEFAULT_VOCABULARY,
    }
}
