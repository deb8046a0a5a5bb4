use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use quizmark_extractor::AnswerExtractor;
use quizmark_types::AppEvent;

use crate::state::AppState;

pub mod scan;

use scan::handle_scan;

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    extractor: Arc<dyn AnswerExtractor>,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Waiting for scan triggers");

    loop {
        let event = ui_to_app_rx.recv().await?;

        match event {
            AppEvent::TriggerScan => {
                handle_scan(state.clone(), extractor.as_ref(), &app_to_ui_tx).await?;
            }
            AppEvent::Shutdown => {
                tracing::info!("[EVENT_LOOP] Shutdown event");
                return Ok(());
            }
            other => {
                tracing::debug!("[EVENT_LOOP] Ignoring event: {:?}", other);
            }
        }
    }
}
