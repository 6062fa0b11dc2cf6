//! Ranked intent classification over the declarative rule table.
//!
//! Pure and synchronous: for well-formed string input this never errors
//! and never panics; "no opinion" is expressed as `Intent::Unknown`.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::config::{COVERAGE_BOOST, HIGH_COVERAGE_CAP, HIGH_COVERAGE_RATIO, KEYWORD_BONUS, KEYWORD_CAP};
use crate::vocabulary::Region;

use super::rules::{rules_for, IntentRule, ACTION_KEYWORDS};
use super::slots::extract_slots;
use super::types::{IntentMatch, RankedIntents};

/// Region-aware intent classifier.
///
/// Rule tables for every region (plus the default vocabulary) are built
/// once at construction; classification itself allocates only the
/// result. Immutable after construction, so a single instance can be
/// shared across conversations.
pub struct IntentClassifier {
    tables: Vec<(Option<Region>, Vec<IntentRule>)>,
}

impl IntentClassifier {
    pub fn new() -> Self {
        let mut tables: Vec<(Option<Region>, Vec<IntentRule>)> =
            Vec::with_capacity(Region::ALL.len() + 1);
        for region in Region::ALL {
            tables.push((Some(region), rules_for(Some(region))));
        }
        tables.push((None, rules_for(None)));
        Self { tables }
    }

    fn table(&self, region: Option<Region>) -> &[IntentRule] {
        self.tables
            .iter()
            .find(|(key, _)| *key == region)
            // The default table is always last.
            .or_else(|| self.tables.last())
            .map(|(_, rules)| rules.as_slice())
            .unwrap_or(&[])
    }

    /// Rank every intent against the utterance.
    ///
    /// Slots are extracted only for the top two ranks, the only ones a
    /// caller can surface.
    pub fn classify(&self, utterance: &str, region: Option<Region>) -> RankedIntents {
        let normalized = utterance.trim().to_lowercase();
        if normalized.is_empty() {
            return RankedIntents::default();
        }
        let utterance_len = normalized.chars().count();

        let mut scored: Vec<IntentMatch> = Vec::new();
        for rule in self.table(region) {
            let best = rule
                .phrases
                .iter()
                .filter(|phrase| normalized.contains(phrase.as_str()))
                .map(|phrase| coverage_score(phrase.chars().count(), utterance_len))
                .fold(None::<f32>, |acc, score| {
                    Some(acc.map_or(score, |a| a.max(score)))
                });

            // An intent with zero matching phrases is out of the running;
            // trigger words alone never create a match.
            let Some(mut confidence) = best else { continue };

            if confidence < KEYWORD_CAP && has_keyword(&normalized, rule.triggers) {
                confidence = (confidence + KEYWORD_BONUS).min(KEYWORD_CAP);
            }

            scored.push(IntentMatch {
                intent: rule.intent,
                confidence: confidence.clamp(0.0, 1.0),
                slots: HashMap::new(),
                suggested_route: rule.route.to_string(),
            });
        }

        // Stable: equal confidences keep rule-table declaration order.
        scored.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });

        for m in scored.iter_mut().take(2) {
            m.slots = extract_slots(m.intent, &normalized);
        }

        if scored.is_empty() {
            tracing::debug!(utterance_len, "no intent matched");
        }

        RankedIntents::new(scored)
    }

    /// Best intent above the confidence threshold, else Unknown.
    pub fn detect_top1(&self, utterance: &str, region: Option<Region>) -> IntentMatch {
        self.classify(utterance, region).top1()
    }

    /// Best intent plus an optional confident, distinct runner-up.
    pub fn detect_top2(
        &self,
        utterance: &str,
        region: Option<Region>,
    ) -> (IntentMatch, Option<IntentMatch>) {
        self.classify(utterance, region).top2()
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Length-coverage score for one matched phrase.
///
/// Exact full-string match scores 1.0; a match covering at least
/// HIGH_COVERAGE_RATIO of the utterance is boosted toward (and capped
/// at) HIGH_COVERAGE_CAP.
fn coverage_score(phrase_len: usize, utterance_len: usize) -> f32 {
    if phrase_len >= utterance_len {
        return 1.0;
    }
    let base = phrase_len as f32 / utterance_len as f32;
    if base >= HIGH_COVERAGE_RATIO {
        (base + COVERAGE_BOOST).min(HIGH_COVERAGE_CAP)
    } else {
        base
    }
}

fn has_keyword(normalized: &str, triggers: &[&str]) -> bool {
    ACTION_KEYWORDS
        .iter()
        .chain(triggers.iter())
        .any(|keyword| normalized.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIDENCE_THRESHOLD;
    use crate::intent::types::Intent;

    fn classifier() -> IntentClassifier {
        IntentClassifier::new()
    }

    #[test]
    fn gibberish_is_unknown_with_zero_confidence() {
        let best = classifier().detect_top1("xyzzy plugh quux", None);
        assert_eq!(best.intent, Intent::Unknown);
        assert_eq!(best.confidence, 0.0);
        assert!(best.slots.is_empty());
        assert!(best.suggested_route.is_empty());
    }

    #[test]
    fn empty_and_whitespace_are_unknown() {
        assert_eq!(classifier().detect_top1("", None).intent, Intent::Unknown);
        assert_eq!(classifier().detect_top1("   ", None).intent, Intent::Unknown);
    }

    #[test]
    fn exact_phrase_match_scores_full_confidence() {
        let best = classifier().detect_top1("add a new symptom", None);
        assert_eq!(best.intent, Intent::AddSymptom);
        assert_eq!(best.confidence, 1.0);
        assert_eq!(best.suggested_route, "/records/symptoms/new");
    }

    #[test]
    fn exact_match_survives_casing_and_whitespace() {
        let best = classifier().detect_top1("  Add A New Symptom  ", None);
        assert_eq!(best.intent, Intent::AddSymptom);
        assert_eq!(best.confidence, 1.0);
    }

    #[test]
    fn confidence_always_within_unit_interval() {
        let classifier = classifier();
        let utterances = [
            "add a new symptom, severe headache since this morning",
            "started taking 500mg metformin twice daily",
            "log my sleep now",
            "show me my records",
            "i feel",
            "hello there",
            "note",
        ];
        for utterance in utterances {
            for m in classifier.classify(utterance, None).all() {
                assert!(
                    (0.0..=1.0).contains(&m.confidence),
                    "{utterance:?} scored {}",
                    m.confidence
                );
            }
        }
    }

    #[test]
    fn symptom_example_scenario_usa() {
        let best = classifier().detect_top1(
            "add a new symptom, severe headache since this morning",
            Some(Region::UnitedStates),
        );
        assert_eq!(best.intent, Intent::AddSymptom);
        assert!(best.confidence >= CONFIDENCE_THRESHOLD);
        assert_eq!(best.slots.get("severity").map(String::as_str), Some("severe"));
        assert_eq!(best.slots.get("onset").map(String::as_str), Some("this morning"));
    }

    #[test]
    fn medication_slots_extracted_for_winner() {
        let best = classifier().detect_top1("started taking 500mg metformin twice daily", None);
        assert_eq!(best.intent, Intent::AddMedication);
        assert_eq!(best.slots.get("dosage").map(String::as_str), Some("500mg"));
        assert_eq!(best.slots.get("frequency").map(String::as_str), Some("twice daily"));
    }

    // "i feel" appears in both the symptom and the mood tables. The tie
    // goes to the earlier declaration: AddSymptom.
    #[test]
    fn confidence_tie_keeps_declaration_order() {
        let (primary, secondary) = classifier().detect_top2("i feel", None);
        assert_eq!(primary.intent, Intent::AddSymptom);
        assert_eq!(primary.confidence, 1.0);

        let secondary = secondary.expect("mood should be offered as secondary");
        assert_eq!(secondary.intent, Intent::AddMood);
        assert_eq!(secondary.confidence, 1.0);
    }

    #[test]
    fn secondary_is_confident_and_distinct() {
        let classifier = classifier();
        let utterances = ["i feel", "log my sleep", "add a note", "show me my records"];
        for utterance in utterances {
            let (primary, secondary) = classifier.detect_top2(utterance, None);
            if let Some(secondary) = secondary {
                assert!(secondary.confidence >= CONFIDENCE_THRESHOLD, "{utterance:?}");
                assert_ne!(secondary.intent, primary.intent, "{utterance:?}");
            }
        }
    }

    #[test]
    fn keyword_bonus_is_capped_for_partial_matches() {
        // "log my sleep" covers 12 of 16 chars (0.75): coverage boost to
        // 0.85, then the keyword bonus saturates at the 0.9 cap.
        let best = classifier().detect_top1("log my sleep now", None);
        assert_eq!(best.intent, Intent::AddSleep);
        assert!((best.confidence - KEYWORD_CAP).abs() < f32::EPSILON);
    }

    #[test]
    fn high_coverage_match_caps_below_certainty() {
        // "new diary entry" covers 15 of 17 chars; boosted and capped at
        // 0.95, and no keyword bonus can lower it.
        let best = classifier().detect_top1("new diary entries", None);
        assert_eq!(best.intent, Intent::AddNote);
        assert!((best.confidence - HIGH_COVERAGE_CAP).abs() < f32::EPSILON);
    }

    #[test]
    fn regional_phrasing_recognized_in_home_region_only() {
        let classifier = classifier();

        let au = classifier.detect_top1("book an appointment to see my gp", Some(Region::Australia));
        assert_eq!(au.intent, Intent::AddAppointment);
        assert!(au.confidence >= CONFIDENCE_THRESHOLD);

        let us = classifier.detect_top1("i need to see my pcp", Some(Region::UnitedStates));
        assert_eq!(us.intent, Intent::AddAppointment);
        assert!(us.confidence >= CONFIDENCE_THRESHOLD);

        // The default table understands both.
        assert_eq!(
            classifier.detect_top1("i need to see my pcp", None).intent,
            Intent::AddAppointment
        );
        assert_eq!(
            classifier.detect_top1("see my gp", None).intent,
            Intent::AddAppointment
        );
    }

    #[test]
    fn analysis_flavors_rank_over_their_entry_cousins() {
        let classifier = classifier();
        assert_eq!(
            classifier.detect_top1("any patterns in my symptoms", None).intent,
            Intent::AnalyzeSymptoms
        );
        assert_eq!(
            classifier.detect_top1("analyze my mood", None).intent,
            Intent::AnalyzeMood
        );
        assert_eq!(
            classifier.detect_top1("sleep trends", None).intent,
            Intent::AnalyzeSleep
        );
        assert_eq!(
            classifier.detect_top1("are my medications working", None).intent,
            Intent::AnalyzeMedications
        );
    }

    #[test]
    fn query_intent_detected() {
        let best = classifier().detect_top1("show me my records", None);
        assert_eq!(best.intent, Intent::QueryData);
        assert!(best.confidence >= CONFIDENCE_THRESHOLD);
        assert_eq!(best.suggested_route, "/records");
    }
}
