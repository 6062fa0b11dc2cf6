pub mod classify;
pub mod rules;
pub mod slots;
pub mod types;

pub use classify::IntentClassifier;
pub use types::{Intent, IntentMatch, RankedIntents};
