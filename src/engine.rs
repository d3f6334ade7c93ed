//! Per-message orchestration: detection, scoring, reconciliation,
//! reply generation and stage advancement for one inbound user turn.

use crate::reply_client::ReplyGenerator;
use crate::scoring::{reconcile, score_anxiety};
use crate::stage::{advance, classify_assistant_reply};
use crate::triggers::detect_triggers;
use crate::types::*;
use std::sync::Arc;
use tracing::{info, warn};

/// Main engine (thread-safe via Arc). Holds the reply-generation
/// collaborator; everything else is pure computation.
pub struct AnxietyEngine {
    reply_gen: Box<dyn ReplyGenerator>,
}

pub type SharedAnxietyEngine = Arc<AnxietyEngine>;

/// Everything one user turn produced: the reply to show, the signal
/// that shaped it, and the session delta to commit.
#[derive(Debug)]
pub struct TurnOutcome {
    pub reply: String,
    pub signal: EngineSignal,
    pub update: SessionUpdate,
}

impl AnxietyEngine {
    pub fn new(reply_gen: Box<dyn ReplyGenerator>) -> SharedAnxietyEngine {
        Arc::new(Self { reply_gen })
    }

    /// Run the analysis pipeline for one message: triggers, raw score,
    /// reconciled level, therapeutic notes. Pure and synchronous.
    pub fn analyze(
        &self,
        message: &str,
        history: &[ConversationMessage],
        stage: Stage,
    ) -> EngineSignal {
        // Step 1: which concerns are driving this message.
        let triggers = detect_triggers(message, history);

        // Step 2: raw anxiety score, trigger-agnostic.
        let raw = score_anxiety(message, history);

        // Step 3: merge into the final level used downstream.
        let anxiety_level = reconcile(raw, &triggers);

        let therapeutic_notes = build_notes(anxiety_level, &triggers);

        info!(
            "analyzed message: raw={:?}, level={:?}, triggers={}, compounds={}, stage={}",
            raw,
            anxiety_level,
            triggers.summary.total_triggers,
            triggers.compound_patterns.len(),
            stage.as_str()
        );

        EngineSignal {
            anxiety_level,
            triggers,
            therapeutic_notes,
            stage,
        }
    }

    /// Full turn: analyze, obtain the assistant reply, classify it and
    /// compute the stage transition. Reply-generation failure degrades
    /// to a language-appropriate fallback line; it never poisons the
    /// session.
    pub async fn process_message(
        &self,
        session: &AnxietySession,
        history: &[ConversationMessage],
        user_text: &str,
        now: i64,
    ) -> TurnOutcome {
        let signal = self.analyze(user_text, history, session.stage);

        let reply = match self
            .reply_gen
            .generate(&signal, history, user_text, session.language)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                warn!(
                    "reply generator '{}' failed: {e}; using fallback line",
                    self.reply_gen.name()
                );
                fallback_line(session.language).to_string()
            }
        };

        let intent = classify_assistant_reply(&reply);
        let update = advance(session, user_text, &intent, now, &mut rand::thread_rng());

        if let Some(stage) = update.stage {
            info!(
                "session {}: stage {} -> {}",
                session.id,
                session.stage.as_str(),
                stage.as_str()
            );
        }

        TurnOutcome {
            reply,
            signal,
            update,
        }
    }
}

/// Short English notes for the reply generator's system instructions.
/// No-signal messages get an empty list; we do not invent analytics.
fn build_notes(level: Option<u8>, triggers: &TriggerDetectionResult) -> Vec<String> {
    let mut notes = Vec::new();

    if let Some(ref primary) = triggers.primary_trigger {
        notes.push(format!(
            "primary concern: {} ({})",
            primary.description, primary.category
        ));
    }
    if !triggers.secondary_triggers.is_empty() {
        notes.push(format!(
            "{} additional concern(s) detected",
            triggers.secondary_triggers.len()
        ));
    }
    for compound in &triggers.compound_patterns {
        notes.push(format!("compound situation: {}", compound.description));
    }
    match level {
        Some(l) if l >= 7 => {
            notes.push("severity high: prioritize grounding and breathing".to_string())
        }
        Some(l) if l >= 4 => notes.push("severity moderate: mindfulness suits".to_string()),
        Some(_) => notes.push("severity low: cognitive work is viable".to_string()),
        None => {}
    }

    notes
}

fn fallback_line(language: Language) -> &'static str {
    match language {
        Language::En => "I'm here with you. Could you tell me a bit more about how you're feeling?",
        Language::Es => "Estoy aquí contigo. ¿Puedes contarme un poco más de cómo te sientes?",
        Language::Pt => "Estou aqui com você. Pode me contar um pouco mais sobre como se sente?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply_client::CannedReplyGen;

    #[test]
    fn no_signal_message_gets_empty_notes() {
        let engine = AnxietyEngine::new(Box::new(CannedReplyGen));
        let signal = engine.analyze("nice weather today", &[], Stage::Idle);
        assert_eq!(signal.anxiety_level, None);
        assert!(signal.therapeutic_notes.is_empty());
    }

    #[test]
    fn notes_name_primary_and_compounds() {
        let engine = AnxietyEngine::new(Box::new(CannedReplyGen));
        let signal = engine.analyze(
            "I crashed my car today and I might lose my job, and I don't have anybody to help me",
            &[],
            Stage::Assessing,
        );
        assert!(signal.anxiety_level.unwrap() >= 5);
        assert!(signal
            .therapeutic_notes
            .iter()
            .any(|n| n.starts_with("primary concern")));
        assert!(signal
            .therapeutic_notes
            .iter()
            .any(|n| n.starts_with("compound situation")));
    }

    #[tokio::test]
    async fn first_turn_moves_idle_to_assessing() {
        let engine = AnxietyEngine::new(Box::new(CannedReplyGen));
        let session = AnxietySession::new("s1", "u1", Language::En, 100);
        let outcome = engine
            .process_message(&session, &[], "I'm feeling anxious about work", 200)
            .await;
        assert_eq!(outcome.update.stage, Some(Stage::Assessing));
        assert!(!outcome.reply.is_empty());
    }
}
