//! Sereno HTTP server binary

use sereno::reply_client::{CannedReplyGen, HttpReplyGen};
use sereno::server;
use sereno::AnxietyEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    println!("Sereno anxiety-support server");
    println!("   Version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    let offline = std::env::args().any(|arg| arg == "--offline");

    let engine = if offline {
        println!("✓ Mode: OFFLINE canned replies (no LLM calls)");
        AnxietyEngine::new(Box::new(CannedReplyGen))
    } else {
        let base_url = std::env::var("REPLY_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com".to_string());
        let api_key = std::env::var("REPLY_API_KEY").unwrap_or_default();
        let model =
            std::env::var("REPLY_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        if api_key.is_empty() {
            eprintln!("⚠️  REPLY_API_KEY is not set; reply calls will fail and fall back");
            eprintln!("   (use --offline to run without an LLM)");
        }
        println!("✓ Mode: LLM replies via {}", base_url);
        println!("✓ Model: {}", model);

        AnxietyEngine::new(Box::new(HttpReplyGen::new(base_url, api_key, model)))
    };

    let port: u16 = std::env::var("SERENO_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8082);

    println!("✓ Engine initialized");
    println!("✓ Starting HTTP server on port {}...", port);
    println!();

    server::run_server(engine, port).await?;

    Ok(())
}
