/// Application-level constants
pub const APP_NAME: &str = "Meeka";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minimum confidence for a classified intent to be acted on.
/// Below this the classifier reports `Intent::Unknown`.
pub const CONFIDENCE_THRESHOLD: f32 = 0.4;

/// Flat bonus applied when the utterance contains a generic action
/// keyword ("record", "log", "add", "track") or a per-intent trigger.
pub const KEYWORD_BONUS: f32 = 0.2;

/// Ceiling for a keyword-boosted partial match.
pub const KEYWORD_CAP: f32 = 0.9;

/// Bonus applied when a matched phrase covers most of the utterance.
pub const COVERAGE_BOOST: f32 = 0.1;

/// Ceiling for the coverage boost.
pub const HIGH_COVERAGE_CAP: f32 = 0.95;

/// Fraction of the utterance a match must cover to earn COVERAGE_BOOST.
pub const HIGH_COVERAGE_RATIO: f32 = 0.7;
