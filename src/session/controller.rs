//! Dialogue session controller: the per-conversation state machine that
//! walks a record schema one field per turn.
//!
//! One session at most per conversation, owned here explicitly. A new
//! `start` while a session is active discards the old one first
//! (last-writer-wins, no queueing). On completion the controller awaits
//! the gateway insert and only then clears the session, so an utterance
//! arriving mid-insert can never be attributed to a phantom session.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::gateway::PersistenceGateway;
use crate::intent::Intent;
use crate::schema::{schema_for_intent, RecordSchema};

use super::normalize::{build_record, is_decline};
use super::responses;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    CollectingRequired,
    CollectingNotes,
    Complete,
}

/// The only mutable entity in the engine. Mutated once per user turn.
#[derive(Debug)]
pub struct DialogueSession {
    pub schema: &'static RecordSchema,
    /// Field values in collection order. Only ever holds schema fields
    /// or the notes marker.
    pub collected: Vec<(String, String)>,
    pub phase: SessionPhase,
    /// Next unfilled required field, "notes" during the notes turn,
    /// None once complete.
    pub current_field: Option<String>,
    pub conversation_id: Uuid,
}

/// What the caller should do after a turn.
#[derive(Debug, Clone, PartialEq)]
pub enum NextStep {
    /// Ask for the named required field.
    AskField { field: String, prompt: String },
    /// All required fields collected; offer the notes follow-up.
    AskNotes { prompt: String },
    /// Record persisted. `table` doubles as the refresh signal for the
    /// caller's data views.
    Saved {
        table: &'static str,
        record_id: Option<String>,
        message: String,
    },
    /// Gateway refused or failed; the session is already gone and
    /// nothing partial was written.
    SaveFailed { message: String },
    /// No active session; the utterance should be reclassified.
    Inactive,
}

pub struct DialogueController {
    session: Option<DialogueSession>,
    gateway: Arc<dyn PersistenceGateway>,
    conversation_id: Uuid,
}

impl DialogueController {
    pub fn new(gateway: Arc<dyn PersistenceGateway>, conversation_id: Uuid) -> Self {
        Self {
            session: None,
            gateway,
            conversation_id,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DialogueSession> {
        self.session.as_ref()
    }

    /// Open a collection session for a record-creation intent.
    ///
    /// Intents without a schema (queries, analysis requests) are a
    /// logged no-op. Classifier slots that map onto schema fields are
    /// prefilled so the user is not asked for what they already said.
    pub fn start(&mut self, intent: Intent, slots: &HashMap<String, String>) -> Option<NextStep> {
        let Some(schema) = schema_for_intent(intent) else {
            tracing::warn!(intent = intent.as_str(), "intent has no collection schema");
            return None;
        };

        if let Some(old) = self.session.take() {
            tracing::info!(
                old_table = old.schema.table,
                new_table = schema.table,
                "replacing active session"
            );
        }

        // Prefill in schema order so collection order stays deterministic.
        let mut collected: Vec<(String, String)> = Vec::new();
        for field in schema.required.iter().chain(schema.optional.iter()) {
            if *field == "notes" {
                continue;
            }
            if let Some(value) = slot_for_field(schema.table, field, slots) {
                collected.push(((*field).to_string(), value));
            }
        }

        let step = match schema.next_unfilled(&collected) {
            Some(field) => {
                self.session = Some(DialogueSession {
                    schema,
                    collected,
                    phase: SessionPhase::CollectingRequired,
                    current_field: Some(field.to_string()),
                    conversation_id: self.conversation_id,
                });
                NextStep::AskField {
                    field: field.to_string(),
                    prompt: schema.prompt(field),
                }
            }
            // Everything required came in through slots; only the notes
            // follow-up is left.
            None => {
                self.session = Some(DialogueSession {
                    schema,
                    collected,
                    phase: SessionPhase::CollectingNotes,
                    current_field: Some("notes".to_string()),
                    conversation_id: self.conversation_id,
                });
                NextStep::AskNotes {
                    prompt: schema.notes_prompt.to_string(),
                }
            }
        };

        tracing::info!(
            table = schema.table,
            conversation = %self.conversation_id,
            "session started"
        );
        Some(step)
    }

    /// Process one user answer while a session is active.
    pub async fn advance(&mut self, answer: &str) -> NextStep {
        let Some(session) = self.session.as_mut() else {
            tracing::debug!("advance with no active session");
            return NextStep::Inactive;
        };

        match session.phase {
            SessionPhase::CollectingRequired => {
                let Some(field) = session.current_field.clone() else {
                    // Unreachable by construction; recover by closing.
                    self.session = None;
                    return NextStep::Inactive;
                };
                session.collected.push((field, answer.to_string()));

                if let Some(next) = session.schema.next_unfilled(&session.collected) {
                    session.current_field = Some(next.to_string());
                    return NextStep::AskField {
                        field: next.to_string(),
                        prompt: session.schema.prompt(next),
                    };
                }

                let notes_pending = session.schema.supports_notes()
                    && !session.collected.iter().any(|(key, _)| key == "notes");
                if notes_pending {
                    session.phase = SessionPhase::CollectingNotes;
                    session.current_field = Some("notes".to_string());
                    return NextStep::AskNotes {
                        prompt: session.schema.notes_prompt.to_string(),
                    };
                }

                self.finish().await
            }
            SessionPhase::CollectingNotes => {
                if is_decline(answer) {
                    tracing::debug!("notes declined");
                } else {
                    session
                        .collected
                        .push(("notes".to_string(), answer.to_string()));
                }
                self.finish().await
            }
            SessionPhase::Complete => {
                // Complete sessions are cleared immediately, so this
                // state is never externally re-enterable.
                self.session = None;
                NextStep::Inactive
            }
        }
    }

    /// Discard the active session unconditionally.
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!(table = session.schema.table, "session cancelled");
        }
    }

    /// Normalize, persist, and tear down. Exactly one gateway call per
    /// completed session; the session is cleared only after the insert
    /// resolves.
    async fn finish(&mut self) -> NextStep {
        let (table, record) = {
            let Some(session) = self.session.as_mut() else {
                return NextStep::Inactive;
            };
            session.phase = SessionPhase::Complete;
            session.current_field = None;

            match build_record(session.schema.table, &session.collected) {
                Some(record) => (session.schema.table, record),
                None => {
                    self.session = None;
                    return NextStep::SaveFailed {
                        message: "Something went wrong assembling that record.".to_string(),
                    };
                }
            }
        };

        let result = self.gateway.insert(table, record.payload()).await;

        // Clear only now: a message arriving while the insert was in
        // flight must not land in a phantom session.
        self.session = None;

        match result {
            Ok(receipt) => {
                tracing::info!(table, id = ?receipt.inserted_id, "record saved");
                NextStep::Saved {
                    table,
                    record_id: receipt.inserted_id,
                    message: responses::saved_confirmation(&record),
                }
            }
            Err(error) => {
                tracing::warn!(table, %error, "gateway insert failed");
                NextStep::SaveFailed {
                    message: responses::save_failed(&record, &error),
                }
            }
        }
    }
}

/// Map a classifier slot onto a schema field, if any slot fits.
fn slot_for_field(table: &str, field: &str, slots: &HashMap<String, String>) -> Option<String> {
    slots
        .iter()
        .find(|(slot, _)| aliased_field(table, slot) == field)
        .map(|(_, value)| value.clone())
}

/// Slot names mostly match field names; the exceptions live here.
fn aliased_field<'a>(table: &str, slot: &'a str) -> &'a str {
    match (table, slot) {
        ("symptoms", "onset") => "start_date",
        _ => slot,
    }
}
