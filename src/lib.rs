//! Meeka's conversational data-entry engine.
//!
//! Turns free-text chat into structured health-journal records: a
//! region-aware intent classifier ranks what the user wants, and a
//! per-conversation dialogue session walks the matching record schema
//! one field per turn, normalizes the answers, and hands one typed
//! record to the persistence gateway.
//!
//! The engine is a library: response phrasing, transport, auth, and
//! storage all live with its callers.

pub mod config;
pub mod engine;
pub mod gateway;
pub mod intent;
pub mod models;
pub mod schema;
pub mod session;
pub mod vocabulary;

pub use engine::ConversationEngine;
pub use gateway::{GatewayError, InsertReceipt, PersistenceGateway};
pub use intent::{Intent, IntentClassifier, IntentMatch, RankedIntents};
pub use models::HealthRecord;
pub use session::{DialogueController, NextStep};
pub use vocabulary::Region;
