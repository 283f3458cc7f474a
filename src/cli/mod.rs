use std::sync::Arc;

use clap::{Arg, Command};
use tracing::{error, info};

use crate::{chat_summary, FileStore, GeminiClient, MemoryStore, Planner, SessionStore};

/// CLI entry point for the trip-planner tool
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let matches = Command::new("trip-planner")
        .version("0.1.0")
        .about("Conversational travel itinerary generation backed by Gemini")
        .arg(
            Arg::new("message")
                .help("The travel request to send to the planner")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("The Gemini model to use")
                .default_value("gemini-2.5-pro"),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .help("Gemini API key (or set GEMINI_API_KEY env var)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help("Gemini API base URL (or set GEMINI_BASE_URL env var)"),
        )
        .arg(
            Arg::new("store-dir")
                .short('s')
                .long("store-dir")
                .value_name("DIR")
                .help("Directory for persisted sessions and plans (in-memory when omitted)"),
        )
        .get_matches();

    let api_key = matches
        .get_one::<String>("api-key")
        .cloned()
        .or_else(|| std::env::var("GEMINI_API_KEY").ok())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Gemini API key is required. Set GEMINI_API_KEY environment variable or use --api-key"
            )
        })?;

    let mut client = GeminiClient::new(api_key)
        .with_model(matches.get_one::<String>("model").unwrap().as_str());
    let base_url = matches
        .get_one::<String>("base-url")
        .cloned()
        .or_else(|| std::env::var("GEMINI_BASE_URL").ok());
    if let Some(base_url) = base_url {
        client = client.with_base_url(base_url);
    }

    let store: Arc<dyn SessionStore> = match matches.get_one::<String>("store-dir") {
        Some(dir) => Arc::new(FileStore::open(dir)?),
        None => Arc::new(MemoryStore::new()),
    };

    let planner = Planner::new(Arc::new(client), store);

    let message = matches.get_one::<String>("message").unwrap();
    info!("Submitting travel request: {}", message);

    match planner.submit(message).await {
        Ok(outcome) => {
            if let Some(plan) = &outcome.plan {
                println!("\n{}", chat_summary(plan));
                println!("\nPlan recorded as {}", outcome.plan_id);
            } else {
                println!("\n{}", outcome.turn.text);
            }
            info!("Submission completed");
        }
        Err(e) => {
            error!("Submission failed: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
