use std::future::Future;
use std::sync::Arc;

use quizmark_config::Config;
use quizmark_extractor::{AnswerExtractor, GeminiExtractor};
use tokio::signal;

mod controller;
mod events;
mod io;
mod overlay;
mod state;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // No OCR backend means no word index; refuse to start at all.
    let version = quizmark_ocr::tesseract_version()?;
    tracing::info!("Tesseract {}", version.trim());

    let config = Config::new();
    if config.extractor.api_key.is_empty() {
        tracing::warn!("GEMINI_API_KEY is not set; extraction requests will fail");
    }

    let extractor: Arc<dyn AnswerExtractor> = Arc::new(GeminiExtractor::new(
        config.extractor.api_key.clone(),
        config.extractor.api_url.clone(),
    ));

    let state = Arc::new(AppState::new(config));

    // Shutdown future (Ctrl+C)
    let shutdown = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl+c");
    };

    run(state, extractor, shutdown).await;
    Ok(())
}

pub async fn run(
    state: Arc<AppState>,
    extractor: Arc<dyn AnswerExtractor>,
    shutdown: impl Future<Output = ()>,
) {
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(extractor);

    tokio::select! {
        _ = shutdown => {
            tracing::info!("Shutdown requested");
            controller.shutdown();
        }
        result = tasks.join_next() => {
            match result {
                Some(Ok(Ok(()))) => tracing::warn!("a task exited"),
                Some(Ok(Err(e))) => tracing::error!("a task failed: {e}"),
                Some(Err(e)) => tracing::error!("a task panicked: {e}"),
                None => {}
            }
            controller.shutdown();
        }
    }
}
