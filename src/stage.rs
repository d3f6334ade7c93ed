//! Session stage machine.
//!
//! The machine itself is text-agnostic: it is a pure function of
//! `(current stage, assistant intent, user message)` returning a
//! [`SessionUpdate`] delta. Free-text classification of the assistant
//! reply lives in a separate adapter ([`classify_assistant_reply`]),
//! so the fragile substring matching stays at the edge.

use crate::intervention::select_intervention;
use crate::patterns::{category_labels, CATEGORY_IDS};
use crate::types::*;
use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Structured cue flags derived from one assistant reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssistantIntent {
    pub asked_trigger: bool,
    pub mentioned_scale: bool,
    pub transition_to_intervention: bool,
    pub asked_current_rating: bool,
    pub asked_feedback: bool,
    pub signaled_closure: bool,
}

const ASKED_TRIGGER_CUES: &[&str] = &[
    "triggering your anxiety",
    "what is causing",
    "what's causing",
    "qué está causando",
    "desencadenando tu ansiedad",
    "o que está causando",
    "desencadeando sua ansiedade",
];

const SCALE_CUES: &[&str] = &["0 to 10", "0 a 10"];

const TRANSITION_CUES: &[&str] = &[
    "guide you through",
    "let's try",
    "te guiaré",
    "te voy a guiar",
    "vamos a intentar",
    "vou te guiar",
    "vamos tentar",
];

const CURRENT_RATING_CUES: &[&str] = &[
    "rate your anxiety",
    "anxiety right now",
    "how do you feel now",
    "tu ansiedad ahora",
    "cómo te sientes ahora",
    "sua ansiedade agora",
    "como você se sente agora",
];

const FEEDBACK_CUES: &[&str] = &[
    "what was helpful",
    "find helpful",
    "qué te ayudó",
    "qué fue útil",
    "o que te ajudou",
    "o que foi útil",
];

const CLOSURE_CUES: &[&str] = &[
    "thank you for sharing",
    "saved this information",
    "gracias por compartir",
    "guardado esta información",
    "obrigado por compartilhar",
    "salvei essas informações",
];

fn any_cue(text: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| text.contains(cue))
}

/// Classify an assistant reply into cue flags. This is the only place
/// that reads the reply's free text.
pub fn classify_assistant_reply(reply: &str) -> AssistantIntent {
    let text = reply.to_lowercase();
    AssistantIntent {
        asked_trigger: any_cue(&text, ASKED_TRIGGER_CUES),
        mentioned_scale: any_cue(&text, SCALE_CUES),
        transition_to_intervention: any_cue(&text, TRANSITION_CUES),
        asked_current_rating: any_cue(&text, CURRENT_RATING_CUES),
        asked_feedback: any_cue(&text, FEEDBACK_CUES),
        signaled_closure: any_cue(&text, CLOSURE_CUES),
    }
}

static FIRST_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+").expect("static pattern"));

/// First integer in the message if it is a valid 0-10 rating.
/// Out-of-range or missing numbers are a recoverable condition: the
/// caller re-prompts, nothing advances.
pub fn extract_rating(text: &str) -> Option<u8> {
    let m = FIRST_INT.find(text)?;
    let value: i64 = m.as_str().parse().ok()?;
    if (0..=10).contains(&value) {
        Some(value as u8)
    } else {
        None
    }
}

/// Scan a user message for a trigger-category id or one of its
/// language labels. First category in the static order wins.
pub fn match_category(user_message: &str) -> Option<&'static str> {
    let text = user_message.to_lowercase();
    CATEGORY_IDS.iter().copied().find(|cat| {
        text.contains(cat) || category_labels(cat).iter().any(|label| text.contains(label))
    })
}

/// Compute the stage transition for one turn. At most one rule fires;
/// unmatched stage/intent combinations return an empty update (the
/// session simply stalls for this turn, which is not an error).
pub fn advance<R: Rng>(
    session: &AnxietySession,
    user_message: &str,
    intent: &AssistantIntent,
    now: i64,
    rng: &mut R,
) -> SessionUpdate {
    let mut update = SessionUpdate::default();

    match session.stage {
        // Both are valid starting points for a new assessment cycle.
        Stage::Idle | Stage::Completed => {
            update.stage = Some(Stage::Assessing);
        }
        Stage::Assessing if intent.asked_trigger => {
            update.stage = Some(Stage::SelectingTrigger);
        }
        Stage::SelectingTrigger => {
            if let Some(category) = match_category(user_message) {
                update.trigger_category = Some(category.to_string());
                update.stage = Some(Stage::TriggerDescription);
            }
        }
        Stage::TriggerDescription if intent.mentioned_scale => {
            update.trigger_description = Some(user_message.to_string());
            update.stage = Some(Stage::AnxietyRating);
        }
        Stage::AnxietyRating => {
            if let Some(rating) = extract_rating(user_message) {
                let technique =
                    select_intervention(session.trigger_category.as_deref(), rating, rng);
                update.pre_anxiety_level = Some(rating);
                update.intervention = Some(technique.name.to_string());
                update.intervention_type = Some(technique.kind);
                update.stage = Some(Stage::DeliveringIntervention);
            } else if intent.transition_to_intervention && session.pre_anxiety_level.is_some() {
                // Secondary path: the assistant moved on without a new
                // number but a pre-rating already exists.
                update.stage = Some(Stage::DeliveringIntervention);
            }
        }
        Stage::DeliveringIntervention if intent.asked_current_rating => {
            update.stage = Some(Stage::PostRating);
        }
        Stage::PostRating => {
            if let Some(rating) = extract_rating(user_message) {
                update.post_anxiety_level = Some(rating);
                update.stage = Some(Stage::Feedback);
            }
        }
        Stage::Feedback if intent.asked_feedback => {
            update.notes = Some(user_message.to_string());
            if intent.signaled_closure {
                update.stage = Some(Stage::Completed);
                update.end_time = Some(now);
            }
        }
        _ => {}
    }

    if update.is_empty() {
        debug!(
            "no transition from stage '{}' for this turn",
            session.stage.as_str()
        );
    }

    update
}
