//! Core type definitions for the Sereno anxiety-support engine

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One chat message in a session's history.
///
/// Histories are append-only and ordered by insertion; a message is
/// never edited after being recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub text: String,
    pub is_user: bool,
    pub timestamp: i64, // unix seconds
}

impl ConversationMessage {
    pub fn user(text: impl Into<String>, timestamp: i64) -> Self {
        Self { text: text.into(), is_user: true, timestamp }
    }

    pub fn assistant(text: impl Into<String>, timestamp: i64) -> Self {
        Self { text: text.into(), is_user: false, timestamp }
    }
}

/// Session language. Pattern tables mix all three languages; this only
/// selects stage-machine labels and user-facing fallback lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
    Pt,
}

impl Language {
    pub fn from_code(code: &str) -> Self {
        match code.to_lowercase().as_str() {
            "es" => Language::Es,
            "pt" => Language::Pt,
            _ => Language::En,
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}

/// Conversation stage. The sole driver of protocol progression;
/// mutated only through [`crate::stage::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Idle,
    Assessing,
    SelectingTrigger,
    TriggerDescription,
    AnxietyRating,
    DeliveringIntervention,
    PostRating,
    Feedback,
    Completed,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Assessing => "assessing",
            Stage::SelectingTrigger => "selecting-trigger",
            Stage::TriggerDescription => "trigger-description",
            Stage::AnxietyRating => "anxiety-rating",
            Stage::DeliveringIntervention => "delivering-intervention",
            Stage::PostRating => "post-rating",
            Stage::Feedback => "feedback",
            Stage::Completed => "completed",
        }
    }
}

/// Confidence band for a detected trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn from_score(score: f32) -> Self {
        if score >= 2.0 {
            Confidence::High
        } else if score >= 1.0 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

/// One qualifying trigger for a message, ranked by score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggerMatch {
    pub trigger: String,
    pub score: f32,
    pub category: String,
    pub description: String,
    pub confidence: Confidence,
}

/// A named co-occurrence of triggers treated as a distinct, more
/// severe situation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompoundMatch {
    pub name: String,
    pub description: String,
    pub triggers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggerSummary {
    pub total_triggers: usize,
    pub categories: usize,
    pub high_confidence: usize,
    pub has_compound_pattern: bool,
}

/// Full output of the trigger detector for one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggerDetectionResult {
    pub all_triggers: Vec<TriggerMatch>,
    pub primary_trigger: Option<TriggerMatch>,
    pub secondary_triggers: Vec<TriggerMatch>,
    pub triggers_by_category: HashMap<String, Vec<String>>,
    pub compound_patterns: Vec<CompoundMatch>,
    pub summary: TriggerSummary,
}

impl TriggerDetectionResult {
    /// Valid result for a message with no identifiable trigger.
    pub fn empty() -> Self {
        Self {
            all_triggers: vec![],
            primary_trigger: None,
            secondary_triggers: vec![],
            triggers_by_category: HashMap::new(),
            compound_patterns: vec![],
            summary: TriggerSummary {
                total_triggers: 0,
                categories: 0,
                high_confidence: 0,
                has_compound_pattern: false,
            },
        }
    }
}

/// Type of therapeutic technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterventionType {
    Grounding,
    Breathing,
    Cognitive,
    Mindfulness,
    Physical,
}

/// Persisted anxiety session. Owned by the storage layer; its
/// lifecycle is driven exclusively by the stage machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnxietySession {
    pub id: String,
    pub user_id: String,
    pub language: Language,
    pub start_time: i64,
    pub end_time: Option<i64>,
    pub stage: Stage,
    pub trigger_category: Option<String>,
    pub trigger_description: Option<String>,
    pub pre_anxiety_level: Option<u8>,
    pub intervention: Option<String>,
    pub intervention_type: Option<InterventionType>,
    pub post_anxiety_level: Option<u8>,
    pub notes: Option<String>,
    pub ai_detected_insights: Option<String>,
}

impl AnxietySession {
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        language: Language,
        now: i64,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            language,
            start_time: now,
            end_time: None,
            stage: Stage::Idle,
            trigger_category: None,
            trigger_description: None,
            pre_anxiety_level: None,
            intervention: None,
            intervention_type: None,
            post_anxiety_level: None,
            notes: None,
            ai_detected_insights: None,
        }
    }
}

/// Partial session update returned by the stage machine. The core
/// never writes storage; callers commit this delta.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionUpdate {
    pub stage: Option<Stage>,
    pub trigger_category: Option<String>,
    pub trigger_description: Option<String>,
    pub pre_anxiety_level: Option<u8>,
    pub intervention: Option<String>,
    pub intervention_type: Option<InterventionType>,
    pub post_anxiety_level: Option<u8>,
    pub notes: Option<String>,
    pub end_time: Option<i64>,
}

impl SessionUpdate {
    pub fn is_empty(&self) -> bool {
        *self == SessionUpdate::default()
    }

    /// Apply the delta in place.
    pub fn apply(&self, session: &mut AnxietySession) {
        if let Some(stage) = self.stage {
            session.stage = stage;
        }
        if let Some(ref cat) = self.trigger_category {
            session.trigger_category = Some(cat.clone());
        }
        if let Some(ref desc) = self.trigger_description {
            session.trigger_description = Some(desc.clone());
        }
        if let Some(level) = self.pre_anxiety_level {
            session.pre_anxiety_level = Some(level);
        }
        if let Some(ref name) = self.intervention {
            session.intervention = Some(name.clone());
        }
        if let Some(kind) = self.intervention_type {
            session.intervention_type = Some(kind);
        }
        if let Some(level) = self.post_anxiety_level {
            session.post_anxiety_level = Some(level);
        }
        if let Some(ref notes) = self.notes {
            session.notes = Some(notes.clone());
        }
        if let Some(end) = self.end_time {
            session.end_time = Some(end);
        }
    }
}

/// Structured signal handed to the reply-generation collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct EngineSignal {
    pub anxiety_level: Option<u8>,
    pub triggers: TriggerDetectionResult,
    pub therapeutic_notes: Vec<String>,
    pub stage: Stage,
}
