//! Schema registry: per record type, the ordered required fields, the
//! optional fields, and the prompt wording for each field.
//!
//! Declarative only. Required-field order is also the question order the
//! dialogue follows, so reordering a list here changes the conversation.

use crate::intent::Intent;

/// Field specification for one record type.
#[derive(Debug, Clone, Copy)]
pub struct RecordSchema {
    /// Destination table at the data service.
    pub table: &'static str,
    /// Required fields, in the order they are asked.
    pub required: &'static [&'static str],
    /// Optional fields. Never asked for except `notes`, which gets its
    /// own follow-up turn; others are filled from classifier slots.
    pub optional: &'static [&'static str],
    prompts: &'static [(&'static str, &'static str)],
    pub notes_prompt: &'static str,
}

impl RecordSchema {
    /// Prompt wording for a field.
    ///
    /// Unknown fields get a generic phrasing instead of a panic, so
    /// adding a schema field before its prompt only degrades wording.
    pub fn prompt(&self, field: &str) -> String {
        self.prompts
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, prompt)| (*prompt).to_string())
            .unwrap_or_else(|| format!("What's the {field}?"))
    }

    /// Whether this schema takes a trailing free-text notes turn.
    pub fn supports_notes(&self) -> bool {
        self.optional.contains(&"notes")
    }

    /// Whether a field name belongs to this schema (required, optional,
    /// or the notes marker).
    pub fn knows_field(&self, field: &str) -> bool {
        field == "notes"
            || self.required.contains(&field)
            || self.optional.contains(&field)
    }

    /// First required field not present in `filled`.
    pub fn next_unfilled<'a>(&self, filled: &[(String, String)]) -> Option<&'static str> {
        self.required
            .iter()
            .find(|field| !filled.iter().any(|(name, _)| name == **field))
            .copied()
    }
}

pub static SYMPTOM_SCHEMA: RecordSchema = RecordSchema {
    table: "symptoms",
    required: &["description", "start_date", "severity"],
    optional: &["notes"],
    prompts: &[
        ("description", "What symptom are you experiencing?"),
        ("start_date", "When did it start?"),
        ("severity", "How severe is it? (mild, moderate, or severe)"),
    ],
    notes_prompt: "Anything else worth noting about this symptom?",
};

pub static MEDICATION_SCHEMA: RecordSchema = RecordSchema {
    table: "medications",
    required: &["name", "dosage", "frequency"],
    optional: &["notes"],
    prompts: &[
        ("name", "What's the medication called?"),
        ("dosage", "What's the dosage? (e.g. 500mg)"),
        ("frequency", "How often do you take it?"),
    ],
    notes_prompt: "Any notes about this medication? (side effects, instructions)",
};

pub static MOOD_SCHEMA: RecordSchema = RecordSchema {
    table: "mood_entries",
    required: &["mood", "rating"],
    optional: &["notes"],
    prompts: &[
        ("mood", "How are you feeling? (one word is fine)"),
        ("rating", "On a scale of 1 to 10, how would you rate it?"),
    ],
    notes_prompt: "Would you like to add anything about why you feel this way?",
};

pub static DIARY_SCHEMA: RecordSchema = RecordSchema {
    table: "diary_entries",
    required: &["title", "content"],
    optional: &["tags", "notes"],
    prompts: &[
        ("title", "What should we call this entry?"),
        ("content", "Go ahead, I'm listening. What happened?"),
    ],
    notes_prompt: "Anything else to add before I save it?",
};

/// Schema for a record-creation intent.
///
/// Query and analysis intents collect nothing and return None; session
/// start is a no-op for them.
pub fn schema_for_intent(intent: Intent) -> Option<&'static RecordSchema> {
    match intent {
        Intent::AddSymptom => Some(&SYMPTOM_SCHEMA),
        Intent::AddMedication => Some(&MEDICATION_SCHEMA),
        Intent::AddMood => Some(&MOOD_SCHEMA),
        Intent::AddNote => Some(&DIARY_SCHEMA),
        _ => None,
    }
}
