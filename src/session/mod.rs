pub mod controller;
pub mod normalize;
pub mod responses;

pub use controller::{DialogueController, DialogueSession, NextStep, SessionPhase};
