use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::CONFIDENCE_THRESHOLD;

/// What the user wants to do. Closed set, known at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    AddSymptom,
    AddMedication,
    AddAppointment,
    AddMood,
    AddSleep,
    AddNote,
    QueryData,
    AnalyzeSymptoms,
    AnalyzeMedications,
    AnalyzeMood,
    AnalyzeSleep,
    Unknown,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddSymptom => "add_symptom",
            Self::AddMedication => "add_medication",
            Self::AddAppointment => "add_appointment",
            Self::AddMood => "add_mood",
            Self::AddSleep => "add_sleep",
            Self::AddNote => "add_note",
            Self::QueryData => "query_data",
            Self::AnalyzeSymptoms => "analyze_symptoms",
            Self::AnalyzeMedications => "analyze_medications",
            Self::AnalyzeMood => "analyze_mood",
            Self::AnalyzeSleep => "analyze_sleep",
            Self::Unknown => "unknown",
        }
    }

    /// Record-creation intents. Only these can open a collection session
    /// (and of these, only the ones with a registered schema do).
    pub fn is_data_entry(&self) -> bool {
        matches!(
            self,
            Self::AddSymptom
                | Self::AddMedication
                | Self::AddAppointment
                | Self::AddMood
                | Self::AddSleep
                | Self::AddNote
        )
    }

    /// AI-analysis requests, answered by the language model, never by a
    /// collection session.
    pub fn is_analysis(&self) -> bool {
        matches!(
            self,
            Self::AnalyzeSymptoms
                | Self::AnalyzeMedications
                | Self::AnalyzeMood
                | Self::AnalyzeSleep
        )
    }
}

/// One classification result. Produced fresh per call, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentMatch {
    pub intent: Intent,
    /// Always within [0, 1].
    pub confidence: f32,
    /// Opportunistically extracted structured values (severity, dosage,
    /// onset...). Absence of a slot is normal, never an error.
    pub slots: HashMap<String, String>,
    /// Route template the UI can navigate to for this intent.
    pub suggested_route: String,
}

impl IntentMatch {
    /// The "no opinion" result: classification below threshold or an
    /// utterance matching nothing.
    pub fn unknown() -> Self {
        Self {
            intent: Intent::Unknown,
            confidence: 0.0,
            slots: HashMap::new(),
            suggested_route: String::new(),
        }
    }

    pub fn is_confident(&self) -> bool {
        self.confidence >= CONFIDENCE_THRESHOLD
    }
}

/// Intents ranked by confidence, ties kept in rule-table declaration
/// order (the sort is stable).
#[derive(Debug, Clone, Default)]
pub struct RankedIntents {
    matches: Vec<IntentMatch>,
}

impl RankedIntents {
    pub fn new(matches: Vec<IntentMatch>) -> Self {
        Self { matches }
    }

    /// All ranked matches, best first, before thresholding.
    pub fn all(&self) -> &[IntentMatch] {
        &self.matches
    }

    /// Best match, or the unknown result when nothing clears the
    /// confidence threshold.
    pub fn top1(&self) -> IntentMatch {
        match self.matches.first() {
            Some(best) if best.is_confident() => best.clone(),
            _ => IntentMatch::unknown(),
        }
    }

    /// Best match plus an optional distinct runner-up that also clears
    /// the threshold. Used for "did you also mean..." disambiguation.
    pub fn top2(&self) -> (IntentMatch, Option<IntentMatch>) {
        let primary = self.top1();
        if primary.intent == Intent::Unknown {
            return (primary, None);
        }
        let secondary = self
            .matches
            .iter()
            .skip(1)
            .find(|m| m.is_confident() && m.intent != primary.intent)
            .cloned();
        (primary, secondary)
    }
}
