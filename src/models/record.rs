use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::enums::Severity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomRecord {
    pub description: String,
    pub start_date: String,
    pub severity: Severity,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationRecord {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodRecord {
    pub mood: String,
    /// 1..=10 self-rating.
    pub rating: i64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryRecord {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub notes: Option<String>,
}

/// A completed, normalized record ready for the persistence gateway.
///
/// One variant per collection schema. Produced in a single normalization
/// step at session completion so field access is typed everywhere past
/// that point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HealthRecord {
    Symptom(SymptomRecord),
    Medication(MedicationRecord),
    Mood(MoodRecord),
    Diary(DiaryRecord),
}

impl HealthRecord {
    /// Destination table, exactly as the data service names it.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Symptom(_) => "symptoms",
            Self::Medication(_) => "medications",
            Self::Mood(_) => "mood_entries",
            Self::Diary(_) => "diary_entries",
        }
    }

    /// Short human label for confirmation messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Symptom(_) => "symptom",
            Self::Medication(_) => "medication",
            Self::Mood(_) => "mood entry",
            Self::Diary(_) => "diary entry",
        }
    }

    /// Flat field map handed to the gateway. Field names match the
    /// schema registry exactly; declined notes serialize as null.
    pub fn payload(&self) -> Value {
        match self {
            Self::Symptom(r) => json!({
                "description": r.description,
                "start_date": r.start_date,
                "severity": r.severity.as_str(),
                "notes": r.notes,
            }),
            Self::Medication(r) => json!({
                "name": r.name,
                "dosage": r.dosage,
                "frequency": r.frequency,
                "notes": r.notes,
            }),
            Self::Mood(r) => json!({
                "mood": r.mood,
                "rating": r.rating,
                "notes": r.notes,
            }),
            Self::Diary(r) => json!({
                "title": r.title,
                "content": r.content,
                "tags": r.tags,
                "notes": r.notes,
            }),
        }
    }

    /// The field interpolated into the "Saved ..." confirmation.
    pub fn headline(&self) -> &str {
        match self {
            Self::Symptom(r) => &r.description,
            Self::Medication(r) => &r.name,
            Self::Mood(r) => &r.mood,
            Self::Diary(r) => &r.title,
        }
    }
}
