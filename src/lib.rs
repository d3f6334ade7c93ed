//! Sereno - conversational anxiety-support engine
//!
//! Implements the text-signal analysis and session state machine:
//! - Weighted multilingual pattern library (EN/ES/PT)
//! - Anxiety scorer with emergency short-circuit
//! - Multi-trigger detector with compound-pattern recognition
//! - Context-aware score reconciliation
//! - Deterministic conversation-stage machine with randomized
//!   intervention selection

pub mod engine;
pub mod intervention;
pub mod patterns;
pub mod reply_client;
pub mod scoring;
pub mod server;
pub mod stage;
pub mod triggers;
pub mod types;

pub use engine::{AnxietyEngine, SharedAnxietyEngine, TurnOutcome};
pub use intervention::{candidates, select_intervention, Technique};
pub use reply_client::{CannedReplyGen, HttpReplyGen, ReplyGenerator};
pub use scoring::{reconcile, score_anxiety};
pub use stage::{advance, classify_assistant_reply, extract_rating, AssistantIntent};
pub use triggers::detect_triggers;
pub use types::*;
