//! Anxiety scoring and context-aware reconciliation.
//!
//! `score_anxiety` follows a fixed step order (emergency short-circuit,
//! additive accumulation, history bonuses, duration/intensity
//! multipliers, stressor bonus, breadth boost, breakpoint mapping).
//! The multiplier stacking is asymmetric on purpose: the breakpoint
//! table was tuned against this exact order.

use crate::patterns::{
    self, BEHAVIORAL_DISTRESS, COMMUNICATION_DISTRESS, DIMENSION_PATTERNS, DURATION_MODIFIERS,
    EMERGENCY_PATTERNS, HIGH_ANXIETY_TRIGGERS, INTENSITY_MODIFIERS, LIFE_STRESSORS,
    MODERATE_DISTRESS, NEGATIVE_AFFECT, TOPIC_TOKENS,
};
use crate::types::*;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Rapid lengthening of user messages is read as a distress signal.
const ESCALATION_BONUS: f32 = 0.8;
/// A topical token shared with recent history.
const PERSISTENCE_BONUS: f32 = 0.5;
/// Floor for messages with only generic negative-affect vocabulary.
const NEGATIVE_AFFECT_BASELINE: u8 = 2;

/// Score momentary anxiety for one message against its history.
/// Returns `None` when the message carries no anxiety signal at all.
pub fn score_anxiety(message: &str, history: &[ConversationMessage]) -> Option<u8> {
    let text = message.to_lowercase();

    // 1. Emergency/risk language is dispositive; the table is ordered
    // most severe first and the first match wins.
    if let Some(hit) = patterns::weighted_hits(&EMERGENCY_PATTERNS, &text).first() {
        warn!("emergency pattern class '{}' fired", hit.label);
        return Some(hit.weight as u8);
    }

    // 2. Additive accumulation over every phrase and dimension table.
    let mut score: f32 = 0.0;
    let mut labels: Vec<&str> = Vec::new();
    for table in [
        &*MODERATE_DISTRESS,
        &*BEHAVIORAL_DISTRESS,
        &*COMMUNICATION_DISTRESS,
        &*DIMENSION_PATTERNS,
    ] {
        for hit in patterns::weighted_hits(table, &text) {
            score += hit.weight;
            labels.push(hit.label);
        }
    }

    // 3. Length escalation against the last three user messages.
    let recent: Vec<&ConversationMessage> =
        history.iter().filter(|m| m.is_user).rev().take(3).collect();
    if !recent.is_empty() {
        let avg = recent.iter().map(|m| m.text.chars().count()).sum::<usize>() as f32
            / recent.len() as f32;
        if message.chars().count() as f32 > avg * 1.5 {
            score += ESCALATION_BONUS;
        }
    }

    // 4. Topic persistence across recent history.
    if topic_persists(&text, &recent) {
        score += PERSISTENCE_BONUS;
    }

    // 5. Duration and intensity multipliers, each independent.
    let duration = patterns::max_multiplier(&DURATION_MODIFIERS, &text);
    let intensity = patterns::max_multiplier(&INTENSITY_MODIFIERS, &text);
    score *= duration * intensity;

    // 6. Life-stressor bonus, amplified when stressors co-occur.
    let stressors = patterns::weighted_hits(&LIFE_STRESSORS, &text);
    let mut stressor_bonus: f32 = stressors.iter().map(|p| p.weight).sum();
    if stressors.len() >= 3 {
        stressor_bonus *= 1.4;
    } else if stressors.len() == 2 {
        stressor_bonus *= 1.2;
    }
    score += stressor_bonus;

    // 7. Breadth boost over distinct matched labels, not stacked.
    let distinct = labels.iter().collect::<HashSet<_>>().len();
    if distinct >= 5 {
        score *= 1.5;
    } else if distinct >= 3 {
        score *= 1.3;
    }

    // 8. Nothing matched: visible negative affect still gets a floor.
    if labels.is_empty() && stressors.is_empty() {
        if NEGATIVE_AFFECT.is_match(&text) {
            return Some(NEGATIVE_AFFECT_BASELINE);
        }
        return None;
    }

    debug!(
        "anxiety raw={:.2} (labels={}, duration={:.1}, intensity={:.1}, stressors={})",
        score,
        distinct,
        duration,
        intensity,
        stressors.len()
    );

    Some(map_level(score))
}

/// Map a continuous raw score to the 1-10 band.
fn map_level(raw: f32) -> u8 {
    match raw {
        r if r <= 0.5 => 1,
        r if r <= 1.0 => 2,
        r if r <= 1.8 => 3,
        r if r <= 2.5 => 4,
        r if r <= 3.5 => 5,
        r if r <= 5.0 => 6,
        r if r <= 8.0 => 7,
        r if r <= 12.0 => 8,
        r if r <= 18.0 => 9,
        _ => 10,
    }
}

fn topic_persists(text: &str, recent: &[&ConversationMessage]) -> bool {
    TOPIC_TOKENS.iter().any(|token| {
        text.contains(token) && recent.iter().any(|m| m.text.to_lowercase().contains(token))
    })
}

/// Merge the raw anxiety score with the trigger picture into the final
/// level used downstream.
///
/// A detected trigger implies at least minimal anxiety, so a null raw
/// score with any qualifying trigger becomes a baseline of 1. Returns
/// `None` only when there was neither a score nor a trigger.
pub fn reconcile(raw: Option<u8>, triggers: &TriggerDetectionResult) -> Option<u8> {
    let base = match raw {
        Some(level) => level as f32,
        None if triggers.summary.total_triggers > 0 => 1.0,
        None => return None,
    };

    let mut level = base;

    // Trigger-count complexity.
    let total = triggers.summary.total_triggers;
    if total >= 4 {
        level *= 1.5;
    } else if total >= 2 {
        level *= 1.3;
    }

    // Known high-anxiety trigger subset.
    if triggers
        .all_triggers
        .iter()
        .any(|t| HIGH_ANXIETY_TRIGGERS.contains(&t.trigger.as_str()))
    {
        level *= 1.2;
    }

    // Compound patterns amplify further; multipliers stack.
    if triggers.summary.has_compound_pattern {
        level *= 1.4;
    }

    Some((level.round() as i64).clamp(0, 10) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triggers::detect_triggers;

    #[test]
    fn emergency_short_circuit_wins() {
        for text in [
            "I want to kill myself",
            "quiero quitarme la vida y además odio mi trabajo desde hace años",
            "não aguento mais",
        ] {
            let level = score_anxiety(text, &[]).unwrap();
            assert!((8..=10).contains(&level), "{text} -> {level}");
        }
        assert_eq!(score_anxiety("I want to kill myself", &[]), Some(10));
    }

    #[test]
    fn no_signal_returns_none() {
        assert_eq!(score_anxiety("what a lovely afternoon", &[]), None);
        assert_eq!(score_anxiety("", &[]), None);
    }

    #[test]
    fn negative_affect_baseline() {
        assert_eq!(score_anxiety("I feel really bad today", &[]), Some(2));
        assert_eq!(score_anxiety("me siento muy mal", &[]), Some(2));
    }

    #[test]
    fn severe_symptoms_score_high() {
        let level = score_anxiety(
            "my heart is racing, I can't breathe and I haven't slept in days, it's unbearable",
            &[],
        )
        .unwrap();
        assert!(level >= 6, "got {level}");
    }

    #[test]
    fn mild_symptoms_score_low() {
        let level = score_anxiety("I'm a little nervous", &[]).unwrap();
        assert!(level <= 3, "got {level}");
    }

    #[test]
    fn duration_amplifies() {
        let acute = score_anxiety("I'm overwhelmed", &[]).unwrap();
        let chronic = score_anxiety("I've been overwhelmed for years", &[]).unwrap();
        assert!(chronic >= acute);
    }

    #[test]
    fn stressor_co_occurrence_amplifies() {
        let one = score_anxiety("I'm worried, I lost my job", &[]).unwrap();
        let two = score_anxiety("I'm worried, I lost my job and I can't pay rent", &[]).unwrap();
        assert!(two > one, "{two} vs {one}");
    }

    #[test]
    fn escalation_bonus_applies() {
        let history = vec![
            ConversationMessage::user("ok", 1),
            ConversationMessage::assistant("tell me more", 2),
            ConversationMessage::user("fine", 3),
        ];
        let short = score_anxiety("I'm worried", &[]).unwrap();
        let escalated = score_anxiety(
            "I'm worried and it keeps getting worse and worse every single day",
            &history,
        )
        .unwrap();
        assert!(escalated >= short);
    }

    #[test]
    fn breakpoints() {
        assert_eq!(map_level(0.3), 1);
        assert_eq!(map_level(0.5), 1);
        assert_eq!(map_level(1.0), 2);
        assert_eq!(map_level(1.8), 3);
        assert_eq!(map_level(2.5), 4);
        assert_eq!(map_level(3.5), 5);
        assert_eq!(map_level(5.0), 6);
        assert_eq!(map_level(8.0), 7);
        assert_eq!(map_level(12.0), 8);
        assert_eq!(map_level(18.0), 9);
        assert_eq!(map_level(19.0), 10);
    }

    #[test]
    fn reconcile_floors_at_one_with_triggers() {
        let triggers = detect_triggers("I hate my job", &[]);
        assert!(triggers.summary.total_triggers >= 1);
        let level = reconcile(None, &triggers).unwrap();
        assert!(level >= 1);
    }

    #[test]
    fn reconcile_none_without_any_signal() {
        let triggers = detect_triggers("nice weather", &[]);
        assert_eq!(reconcile(None, &triggers), None);
    }

    #[test]
    fn reconcile_multipliers_stack_and_clamp() {
        let triggers = detect_triggers(
            "I crashed my car today and I might lose my job, and I don't have anybody to help me",
            &[],
        );
        assert!(triggers.summary.has_compound_pattern);
        // 8 * 1.3+ * 1.2 * 1.4 clamps at 10.
        assert_eq!(reconcile(Some(8), &triggers), Some(10));
        // Passthrough when no triggers qualify.
        let none = detect_triggers("nice weather", &[]);
        assert_eq!(reconcile(Some(4), &none), Some(4));
    }
}
