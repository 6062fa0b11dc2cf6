//! Per-conversation facade over the classifier and the session
//! controller: the surface the chat transport calls.
//!
//! One engine per conversation. The classifier is shared read-only
//! across conversations; the dialogue state is exclusively owned here.

use std::sync::Arc;

use uuid::Uuid;

use crate::gateway::PersistenceGateway;
use crate::intent::{IntentClassifier, IntentMatch, RankedIntents};
use crate::session::{DialogueController, NextStep};
use crate::vocabulary::Region;

pub struct ConversationEngine {
    classifier: Arc<IntentClassifier>,
    controller: DialogueController,
    conversation_id: Uuid,
}

impl ConversationEngine {
    pub fn new(classifier: Arc<IntentClassifier>, gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self::with_conversation_id(classifier, gateway, Uuid::new_v4())
    }

    pub fn with_conversation_id(
        classifier: Arc<IntentClassifier>,
        gateway: Arc<dyn PersistenceGateway>,
        conversation_id: Uuid,
    ) -> Self {
        Self {
            classifier,
            controller: DialogueController::new(gateway, conversation_id),
            conversation_id,
        }
    }

    pub fn conversation_id(&self) -> Uuid {
        self.conversation_id
    }

    /// Rank intents for an utterance. Pure; no session side effects.
    pub fn classify(&self, utterance: &str, region: Option<Region>) -> RankedIntents {
        self.classifier.classify(utterance, region)
    }

    /// Best intent above threshold, else Unknown.
    pub fn detect_top1(&self, utterance: &str, region: Option<Region>) -> IntentMatch {
        self.classifier.detect_top1(utterance, region)
    }

    /// Best intent plus an optional confident, distinct runner-up.
    pub fn detect_top2(
        &self,
        utterance: &str,
        region: Option<Region>,
    ) -> (IntentMatch, Option<IntentMatch>) {
        self.classifier.detect_top2(utterance, region)
    }

    /// Open a collection session for a confirmed intent match,
    /// prefilling from its extracted slots. Returns the first prompt,
    /// or None when the intent collects nothing.
    pub fn start_session(&mut self, matched: &IntentMatch) -> Option<NextStep> {
        self.controller.start(matched.intent, &matched.slots)
    }

    /// Feed one user answer to the active session.
    pub async fn advance_session(&mut self, answer: &str) -> NextStep {
        self.controller.advance(answer).await
    }

    /// Drop the active session, keeping nothing.
    pub fn cancel_session(&mut self) {
        self.controller.cancel();
    }

    pub fn has_active_session(&self) -> bool {
        self.controller.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::RecordingGateway;
    use crate::intent::Intent;

    fn engine() -> (ConversationEngine, Arc<RecordingGateway>) {
        let gateway = Arc::new(RecordingGateway::default());
        let engine = ConversationEngine::new(Arc::new(IntentClassifier::new()), gateway.clone());
        (engine, gateway)
    }

    #[tokio::test]
    async fn utterance_to_saved_record_end_to_end() {
        let (mut engine, gateway) = engine();

        let matched = engine.detect_top1(
            "add a new symptom, severe headache since this morning",
            Some(Region::UnitedStates),
        );
        assert_eq!(matched.intent, Intent::AddSymptom);
        assert!(matched.is_confident());

        // severity and start_date arrive via slots; only description is
        // asked before notes.
        let step = engine.start_session(&matched).unwrap();
        assert!(matches!(step, NextStep::AskField { ref field, .. } if field == "description"));

        let step = engine.advance_session("throbbing headache").await;
        assert!(matches!(step, NextStep::AskNotes { .. }));

        let step = engine.advance_session("no thanks").await;
        let NextStep::Saved { table, message, record_id } = step else {
            panic!("expected Saved, got {step:?}");
        };
        assert_eq!(table, "symptoms");
        assert!(record_id.is_some());
        assert!(message.contains("throbbing headache"));

        let inserts = gateway.inserts.lock().unwrap();
        assert_eq!(inserts.len(), 1);
        assert_eq!(inserts[0].1["severity"], "Severe");
        assert_eq!(inserts[0].1["start_date"], "this morning");
        assert!(inserts[0].1["notes"].is_null());
        drop(inserts);

        assert!(!engine.has_active_session());
    }

    #[tokio::test]
    async fn query_intent_never_opens_a_session() {
        let (mut engine, gateway) = engine();
        let matched = engine.detect_top1("show me my records", None);
        assert_eq!(matched.intent, Intent::QueryData);

        assert!(engine.start_session(&matched).is_none());
        assert!(!engine.has_active_session());
        assert_eq!(engine.advance_session("anything").await, NextStep::Inactive);
        assert!(gateway.inserts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn new_intent_mid_session_replaces_it() {
        let (mut engine, gateway) = engine();

        let symptom = engine.detect_top1("add a new symptom", None);
        engine.start_session(&symptom).unwrap();
        engine.advance_session("sore throat").await;

        // User changes their mind mid-collection.
        let medication = engine.detect_top1("add a new medication", None);
        engine.start_session(&medication).unwrap();

        engine.advance_session("aspirin").await;
        engine.advance_session("100mg").await;
        engine.advance_session("daily").await;
        engine.advance_session("none").await;

        let inserts = gateway.inserts.lock().unwrap();
        assert_eq!(inserts.len(), 1, "abandoned session must not insert");
        assert_eq!(inserts[0].0, "medications");
    }

    #[tokio::test]
    async fn cancelled_session_leaves_clean_state() {
        let (mut engine, gateway) = engine();
        let matched = engine.detect_top1("write in my diary", None);
        assert_eq!(matched.intent, Intent::AddNote);

        engine.start_session(&matched).unwrap();
        assert!(engine.has_active_session());
        engine.cancel_session();
        assert!(!engine.has_active_session());
        assert!(gateway.inserts.lock().unwrap().is_empty());
    }

    #[test]
    fn classifier_is_shareable_across_engines() {
        let classifier = Arc::new(IntentClassifier::new());
        let gateway: Arc<RecordingGateway> = Arc::new(RecordingGateway::default());
        let a = ConversationEngine::new(classifier.clone(), gateway.clone());
        let b = ConversationEngine::new(classifier, gateway);
        assert_ne!(a.conversation_id(), b.conversation_id());
    }
}
