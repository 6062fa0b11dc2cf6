pub mod enums;
pub mod record;

pub use enums::Severity;
pub use record::{DiaryRecord, HealthRecord, MedicationRecord, MoodRecord, SymptomRecord};
