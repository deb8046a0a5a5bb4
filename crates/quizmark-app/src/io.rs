use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncSender;
use quizmark_types::AppEvent;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// Global hotkey watcher. Runs the poll loop on a blocking thread and turns
/// presses into `TriggerScan` events.
pub async fn watcher_io(
    state: Arc<AppState>,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let poll_interval = {
        let config = state.config.read().await;
        Duration::from_millis(config.poll_interval_ms)
    };

    let handle = tokio::task::spawn_blocking(move || {
        let hotkey_manager = match quizmark_ocr::HotkeyManager::new() {
            Ok(manager) => manager,
            Err(e) => {
                tracing::error!("Failed to create scan hotkey manager: {}", e);
                return;
            }
        };

        tracing::info!("Scan hotkey registered (Ctrl+Shift+Q)");

        loop {
            if cancel.is_cancelled() {
                break;
            }

            if hotkey_manager.poll() {
                tracing::info!("Scan hotkey pressed");

                if let Err(e) = event_tx.as_sync().send(AppEvent::TriggerScan) {
                    tracing::error!("Failed to send scan trigger: {}", e);
                    break;
                }
            }

            std::thread::sleep(poll_interval);
        }

        tracing::info!("Scan hotkey listener stopping");
    });

    handle.await?;
    Ok(())
}
