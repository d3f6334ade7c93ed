//! Multi-trigger detection: which real-life concerns are driving the
//! anxiety in a message, including compound-pattern recognition across
//! co-occurring triggers.

use crate::patterns::{self, COMPOUND_RULES, TRIGGER_DEFS};
use crate::types::*;
use std::collections::HashMap;
use tracing::debug;

/// Older context counts at reduced weight.
const HISTORY_WEIGHT: f32 = 0.3;
/// Minimum cumulative pattern weight for a trigger to qualify.
const QUALIFY_THRESHOLD: f32 = 0.5;

/// Detect every qualifying trigger for `message` given the session
/// history. Deterministic and total: no-signal input yields the empty
/// result, never an error.
pub fn detect_triggers(message: &str, history: &[ConversationMessage]) -> TriggerDetectionResult {
    let text = message.to_lowercase();
    let history_text = history
        .iter()
        .map(|m| m.text.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    let mut matches: Vec<TriggerMatch> = Vec::new();
    for def in TRIGGER_DEFS.iter() {
        let mut score = patterns::sum_matched(&def.patterns, &text);
        if !history_text.is_empty() {
            score += patterns::sum_matched(&def.patterns, &history_text) * HISTORY_WEIGHT;
        }
        if score >= QUALIFY_THRESHOLD {
            matches.push(TriggerMatch {
                trigger: def.key.to_string(),
                score,
                category: def.category.to_string(),
                description: def.description.to_string(),
                confidence: Confidence::from_score(score),
            });
        }
    }

    if matches.is_empty() {
        return TriggerDetectionResult::empty();
    }

    // Rank descending; scores are finite sums of static weights.
    matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());

    let keys: Vec<&str> = matches.iter().map(|m| m.trigger.as_str()).collect();
    let compound_patterns = detect_compounds(&keys);

    let mut triggers_by_category: HashMap<String, Vec<String>> = HashMap::new();
    for m in &matches {
        triggers_by_category
            .entry(m.category.clone())
            .or_default()
            .push(m.trigger.clone());
    }

    let high_confidence = matches
        .iter()
        .filter(|m| m.confidence == Confidence::High)
        .count();
    let summary = TriggerSummary {
        total_triggers: matches.len(),
        categories: triggers_by_category.len(),
        high_confidence,
        has_compound_pattern: !compound_patterns.is_empty(),
    };

    debug!(
        "detected {} trigger(s), primary={}, compounds={}",
        matches.len(),
        keys[0],
        compound_patterns.len()
    );

    let primary_trigger = matches.first().cloned();
    let secondary_triggers = matches[1..].to_vec();

    TriggerDetectionResult {
        all_triggers: matches,
        primary_trigger,
        secondary_triggers,
        triggers_by_category,
        compound_patterns,
        summary,
    }
}

/// Evaluate the fixed co-occurrence rules against the qualifying keys.
fn detect_compounds(keys: &[&str]) -> Vec<CompoundMatch> {
    let mut found = Vec::new();
    for rule in COMPOUND_RULES {
        let required_present = rule
            .required
            .iter()
            .all(|r| keys.iter().any(|k| k == r));
        if !required_present {
            continue;
        }

        let companions_present = if rule.any_other {
            keys.iter().any(|k| !rule.required.iter().any(|r| r == k))
        } else if rule.any_of.is_empty() {
            true
        } else {
            rule.any_of.iter().any(|a| keys.iter().any(|k| k == a))
        };
        if !companions_present {
            continue;
        }

        let triggers: Vec<String> = if rule.any_other {
            keys.iter().map(|k| k.to_string()).collect()
        } else {
            rule.required
                .iter()
                .chain(rule.any_of.iter().filter(|a| keys.iter().any(|k| k == *a)))
                .map(|s| s.to_string())
                .collect()
        };

        found.push(CompoundMatch {
            name: rule.name.to_string(),
            description: rule.description.to_string(),
            triggers,
        });
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_signal_is_empty_not_error() {
        let result = detect_triggers("the weather is nice today", &[]);
        assert!(result.primary_trigger.is_none());
        assert!(result.all_triggers.is_empty());
        assert!(!result.summary.has_compound_pattern);
    }

    #[test]
    fn work_message_yields_two_work_triggers() {
        let result = detect_triggers("I hate my job and nobody listens to me at work", &[]);
        assert!(result.summary.total_triggers >= 2);
        let primary = result.primary_trigger.unwrap();
        assert!(
            primary.trigger == "work_dissatisfaction" || primary.trigger == "work_communication",
            "unexpected primary {}",
            primary.trigger
        );
        assert!(!result.secondary_triggers.is_empty());
        let compounds: Vec<&str> = result
            .compound_patterns
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert!(compounds.contains(&"job_communication_frustration"));
    }

    #[test]
    fn crash_message_fires_compound_crisis() {
        let result = detect_triggers(
            "I crashed my car today and I might lose my job, and I don't have anybody to help me",
            &[],
        );
        let keys: Vec<&str> = result.all_triggers.iter().map(|t| t.trigger.as_str()).collect();
        assert!(keys.contains(&"transportation_crisis"), "{keys:?}");
        assert!(
            keys.contains(&"work_environment") || keys.contains(&"financial_security"),
            "{keys:?}"
        );
        assert!(keys.contains(&"social_disconnection"), "{keys:?}");
        assert!(result.summary.total_triggers >= 3);

        let names: Vec<&str> = result
            .compound_patterns
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert!(
            names.contains(&"accident_financial_job_crisis")
                || names.contains(&"isolated_multi_stressor"),
            "{names:?}"
        );
    }

    #[test]
    fn history_counts_at_reduced_weight() {
        // One 1.0-weight phrase in history only: 0.3 < threshold.
        let history = vec![ConversationMessage::user("I hate my job", 1)];
        let weak = detect_triggers("hello again", &history);
        assert!(weak.all_triggers.is_empty());

        // Same phrase in the current message qualifies outright.
        let strong = detect_triggers("I hate my job", &[]);
        assert_eq!(
            strong.primary_trigger.unwrap().trigger,
            "work_dissatisfaction"
        );

        // History can push a borderline message over the threshold.
        let history = vec![
            ConversationMessage::user("I hate my job, sick of my job", 1),
            ConversationMessage::assistant("that sounds hard", 2),
        ];
        let boosted = detect_triggers("work is draining", &history);
        let m = boosted
            .all_triggers
            .iter()
            .find(|t| t.trigger == "work_dissatisfaction")
            .expect("qualifies with history support");
        assert!(m.score > 0.8);
    }

    #[test]
    fn detection_is_deterministic() {
        let history = vec![ConversationMessage::user("no puedo pagar el alquiler", 1)];
        let msg = "me van a despedir y estoy solo en esto";
        let a = detect_triggers(msg, &history);
        let b = detect_triggers(msg, &history);
        assert_eq!(a.all_triggers, b.all_triggers);
        assert_eq!(a.compound_patterns, b.compound_patterns);
        assert_eq!(a.summary, b.summary);
    }

    #[test]
    fn confidence_bands() {
        assert_eq!(Confidence::from_score(2.5), Confidence::High);
        assert_eq!(Confidence::from_score(1.2), Confidence::Medium);
        assert_eq!(Confidence::from_score(0.6), Confidence::Low);
    }
}
