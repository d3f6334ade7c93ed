//! Reply-generation collaborator boundary.
//!
//! The engine only supplies the structured signal; turning it into a
//! natural-language reply is this collaborator's job. `HttpReplyGen`
//! talks to an OpenAI-style chat endpoint; `CannedReplyGen` drives the
//! full protocol offline with stage-appropriate cue lines.

use crate::types::*;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("reply api returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("reply api transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("reply payload missing message content")]
    Malformed,
}

#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate(
        &self,
        signal: &EngineSignal,
        history: &[ConversationMessage],
        user_text: &str,
        language: Language,
    ) -> Result<String, ReplyError>;
}

/// HTTP client for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct HttpReplyGen {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl HttpReplyGen {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            client: reqwest::Client::new(),
        }
    }

    /// System instructions carrying the computed signal and the next
    /// protocol step the assistant should take for the current stage.
    fn system_instructions(signal: &EngineSignal, language: Language) -> String {
        let mut lines = vec![
            "You are a warm, concise anxiety-support companion.".to_string(),
            format!(
                "Reply in {}.",
                match language {
                    Language::En => "English",
                    Language::Es => "Spanish",
                    Language::Pt => "Portuguese",
                }
            ),
        ];

        if let Some(level) = signal.anxiety_level {
            lines.push(format!("Detected anxiety level: {level}/10."));
        }
        for note in &signal.therapeutic_notes {
            lines.push(format!("Note: {note}."));
        }

        let step = match signal.stage {
            Stage::Idle | Stage::Completed => {
                "Acknowledge the user's feelings and invite them to share more."
            }
            Stage::Assessing => {
                "Ask what the user thinks is triggering their anxiety (use the phrase 'triggering your anxiety')."
            }
            Stage::SelectingTrigger => "Ask the user to describe that concern in their own words.",
            Stage::TriggerDescription => {
                "Ask the user to rate their anxiety on a scale of 0 to 10."
            }
            Stage::AnxietyRating => {
                "Introduce the chosen technique; say you will guide them through it."
            }
            Stage::DeliveringIntervention => {
                "Walk through the technique, then ask the user to rate their anxiety right now."
            }
            Stage::PostRating => "Acknowledge the change and ask what was helpful.",
            Stage::Feedback => {
                "Ask what was helpful, thank them for sharing and say the information is saved."
            }
        };
        lines.push(format!("Next step: {step}"));

        lines.join("\n")
    }
}

#[async_trait]
impl ReplyGenerator for HttpReplyGen {
    fn name(&self) -> &'static str {
        "http_chat"
    }

    async fn generate(
        &self,
        signal: &EngineSignal,
        history: &[ConversationMessage],
        user_text: &str,
        language: Language,
    ) -> Result<String, ReplyError> {
        let mut messages = vec![ChatMessage {
            role: "system".to_string(),
            content: Self::system_instructions(signal, language),
        }];
        // Recent turns only; the analysis already consumed the full
        // history.
        for msg in history.iter().rev().take(10).rev() {
            messages.push(ChatMessage {
                role: if msg.is_user { "user" } else { "assistant" }.to_string(),
                content: msg.text.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: user_text.to_string(),
        });

        let url = format!("{}/v1/chat/completions", self.base_url);
        debug!("requesting reply from {url}");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&ChatRequest {
                model: &self.model,
                messages,
                temperature: 0.7,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ReplyError::Api { status, body });
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(ReplyError::Malformed)?;

        Ok(content)
    }
}

/// Offline generator: stage-appropriate canned lines carrying the cue
/// phrases the stage machine listens for, so the protocol runs end to
/// end without an LLM.
pub struct CannedReplyGen;

fn canned_line(stage: Stage, language: Language) -> &'static str {
    use Language::*;
    match (stage, language) {
        (Stage::Idle | Stage::Completed, En) => {
            "I hear you, and I'm glad you reached out. Tell me more about what's been going on."
        }
        (Stage::Idle | Stage::Completed, Es) => {
            "Te escucho, y me alegra que me escribas. Cuéntame más de lo que está pasando."
        }
        (Stage::Idle | Stage::Completed, Pt) => {
            "Estou te ouvindo, e fico feliz que você escreveu. Me conte mais sobre o que está acontecendo."
        }
        (Stage::Assessing, En) => {
            "Thank you for telling me. What do you think is triggering your anxiety right now: work, identity, social, practical, life path, existential or emotional concerns?"
        }
        (Stage::Assessing, Es) => {
            "Gracias por contarme. ¿Qué crees que está desencadenando tu ansiedad ahora mismo: trabajo, identidad, lo social, lo práctico, tu rumbo de vida, lo existencial o lo emocional?"
        }
        (Stage::Assessing, Pt) => {
            "Obrigado por me contar. O que você acha que está desencadeando sua ansiedade agora: trabalho, identidade, o social, o prático, seu rumo de vida, o existencial ou o emocional?"
        }
        (Stage::SelectingTrigger, En) => {
            "I understand. Can you describe what's been happening with that, in your own words?"
        }
        (Stage::SelectingTrigger, Es) => {
            "Entiendo. ¿Puedes describir qué ha estado pasando con eso, con tus propias palabras?"
        }
        (Stage::SelectingTrigger, Pt) => {
            "Entendo. Pode descrever o que tem acontecido com isso, com suas próprias palavras?"
        }
        (Stage::TriggerDescription, En) => {
            "That sounds really difficult. On a scale of 0 to 10, how intense is your anxiety right now?"
        }
        (Stage::TriggerDescription, Es) => {
            "Suena muy difícil. En una escala de 0 a 10, ¿qué tan intensa es tu ansiedad en este momento?"
        }
        (Stage::TriggerDescription, Pt) => {
            "Parece muito difícil. Em uma escala de 0 a 10, quão intensa está sua ansiedade neste momento?"
        }
        (Stage::AnxietyRating, En) => {
            "Let's try a technique together; I'll guide you through it step by step."
        }
        (Stage::AnxietyRating, Es) => {
            "Vamos a intentar una técnica juntos; te guiaré paso a paso."
        }
        (Stage::AnxietyRating, Pt) => {
            "Vamos tentar uma técnica juntos; vou te guiar passo a passo."
        }
        (Stage::DeliveringIntervention, En) => {
            "Take your time with it. When you're ready, how would you rate your anxiety right now, from 0 to 10?"
        }
        (Stage::DeliveringIntervention, Es) => {
            "Tómate tu tiempo. Cuando estés list@, ¿cómo calificarías tu ansiedad ahora, de 0 a 10?"
        }
        (Stage::DeliveringIntervention, Pt) => {
            "Vá no seu ritmo. Quando estiver pront@, como você avalia sua ansiedade agora, de 0 a 10?"
        }
        (Stage::PostRating, En) => {
            "That's real progress. What was helpful about this exercise for you?"
        }
        (Stage::PostRating, Es) => {
            "Eso es un avance real. ¿Qué te ayudó de este ejercicio?"
        }
        (Stage::PostRating, Pt) => {
            "Isso é um avanço real. O que te ajudou neste exercício?"
        }
        (Stage::Feedback, En) => {
            "What was helpful the most? Thank you for sharing; I've saved this information for your next session."
        }
        (Stage::Feedback, Es) => {
            "¿Qué fue útil sobre todo? Gracias por compartir; he guardado esta información para tu próxima sesión."
        }
        (Stage::Feedback, Pt) => {
            "O que foi útil acima de tudo? Obrigado por compartilhar; salvei essas informações para a sua próxima sessão."
        }
    }
}

#[async_trait]
impl ReplyGenerator for CannedReplyGen {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn generate(
        &self,
        signal: &EngineSignal,
        _history: &[ConversationMessage],
        _user_text: &str,
        language: Language,
    ) -> Result<String, ReplyError> {
        Ok(canned_line(signal.stage, language).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::classify_assistant_reply;

    #[test]
    fn canned_lines_carry_their_cue_in_every_language() {
        for language in [Language::En, Language::Es, Language::Pt] {
            assert!(
                classify_assistant_reply(canned_line(Stage::Assessing, language)).asked_trigger
            );
            assert!(
                classify_assistant_reply(canned_line(Stage::TriggerDescription, language))
                    .mentioned_scale
            );
            assert!(
                classify_assistant_reply(canned_line(Stage::AnxietyRating, language))
                    .transition_to_intervention
            );
            assert!(
                classify_assistant_reply(canned_line(Stage::DeliveringIntervention, language))
                    .asked_current_rating
            );
            let feedback = classify_assistant_reply(canned_line(Stage::Feedback, language));
            assert!(feedback.asked_feedback);
            assert!(feedback.signaled_closure);
        }
    }

    #[tokio::test]
    #[ignore] // Requires a reachable chat endpoint
    async fn http_reply_gen_integration() {
        let gen = HttpReplyGen::new("http://127.0.0.1:8090", "test-key", "test-model");
        let signal = EngineSignal {
            anxiety_level: Some(5),
            triggers: TriggerDetectionResult::empty(),
            therapeutic_notes: vec![],
            stage: Stage::Assessing,
        };
        let reply = gen.generate(&signal, &[], "hello", Language::En).await;
        assert!(reply.is_ok());
    }
}
