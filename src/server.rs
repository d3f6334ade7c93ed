//! HTTP surface for the Sereno engine.
//!
//! Sessions and histories live in an in-memory store; the store lock
//! is held across each session's read-modify-write so stage
//! transitions are serialized per session id.

use axum::{extract::State, http::StatusCode, routing::get, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::Mutex;
use tracing::info;

use crate::engine::SharedAnxietyEngine;
use crate::types::*;

/// One live session and its message history.
pub struct SessionEntry {
    pub session: AnxietySession,
    pub history: Vec<ConversationMessage>,
}

/// In-memory session store.
#[derive(Default)]
pub struct SessionStore {
    inner: Mutex<HashMap<String, SessionEntry>>,
}

pub struct AppState {
    pub engine: SharedAnxietyEngine,
    pub store: SessionStore,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub session_id: String,
    pub user_id: Option<String>,
    pub text: String,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub session_id: String,
    pub reply: String,
    pub anxiety_level: Option<u8>,
    pub stage: Stage,
    pub trigger_summary: TriggerSummary,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Handle one inbound user message.
async fn message_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    if req.text.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "message text is empty".to_string(),
            }),
        ));
    }

    let now = unix_now();
    info!("message for session {}", req.session_id);

    let mut store = state.store.inner.lock().await;
    let entry = store
        .entry(req.session_id.clone())
        .or_insert_with(|| SessionEntry {
            session: AnxietySession::new(
                &req.session_id,
                req.user_id.clone().unwrap_or_default(),
                Language::from_code(req.language.as_deref().unwrap_or("en")),
                now,
            ),
            history: Vec::new(),
        });

    let outcome = state
        .engine
        .process_message(&entry.session, &entry.history, &req.text, now)
        .await;

    outcome.update.apply(&mut entry.session);
    entry
        .history
        .push(ConversationMessage::user(&req.text, now));
    entry
        .history
        .push(ConversationMessage::assistant(&outcome.reply, now));

    Ok(Json(MessageResponse {
        session_id: entry.session.id.clone(),
        reply: outcome.reply,
        anxiety_level: outcome.signal.anxiety_level,
        stage: entry.session.stage,
        trigger_summary: outcome.signal.triggers.summary,
    }))
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "sereno".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/message", post(message_handler))
        .with_state(state)
}

/// Run the HTTP server.
pub async fn run_server(engine: SharedAnxietyEngine, port: u16) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    info!("starting sereno server on {}", addr);

    let state = Arc::new(AppState {
        engine,
        store: SessionStore::default(),
    });
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::AnxietyEngine;
    use crate::reply_client::CannedReplyGen;

    fn state() -> Arc<AppState> {
        Arc::new(AppState {
            engine: AnxietyEngine::new(Box::new(CannedReplyGen)),
            store: SessionStore::default(),
        })
    }

    fn request(text: &str) -> MessageRequest {
        MessageRequest {
            session_id: "s1".to_string(),
            user_id: Some("u1".to_string()),
            text: text.to_string(),
            language: Some("en".to_string()),
        }
    }

    #[tokio::test]
    async fn sequential_messages_advance_one_session() {
        let state = state();

        let first = message_handler(State(state.clone()), Json(request("I'm so anxious lately")))
            .await
            .expect("first message accepted");
        assert_eq!(first.0.stage, Stage::Assessing);

        let second = message_handler(State(state.clone()), Json(request("it's getting worse")))
            .await
            .expect("second message accepted");
        assert_eq!(second.0.stage, Stage::SelectingTrigger);

        let store = state.store.inner.lock().await;
        let entry = store.get("s1").expect("session persisted");
        assert_eq!(entry.history.len(), 4);
        assert_eq!(entry.session.stage, Stage::SelectingTrigger);
    }

    #[tokio::test]
    async fn empty_text_is_rejected() {
        let result = message_handler(State(state()), Json(request("   "))).await;
        let (status, _) = result.expect_err("blank text rejected");
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
