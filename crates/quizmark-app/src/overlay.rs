use std::collections::BTreeMap;
use std::sync::Arc;

use kanal::AsyncReceiver;
use quizmark_types::{AppEvent, Marker, MatchResult};

use crate::state::AppState;

/// Outward rendering contract.
///
/// A `found` marker is drawn centered at its position; a not-found marker is
/// anchored top-left and carries its label text. Implementations that own a
/// real display surface must be driven from the thread owning that surface;
/// that is the renderer's obligation, not the pipeline's.
pub trait OverlaySink: Send + Sync {
    fn show(&self, markers: &[Marker]) -> anyhow::Result<()>;
}

/// Renderer-less sink that reports markers through the log.
pub struct LogOverlay;

impl OverlaySink for LogOverlay {
    fn show(&self, markers: &[Marker]) -> anyhow::Result<()> {
        for marker in markers {
            if marker.found {
                tracing::info!(
                    "[OVERLAY] marker at ({}, {})",
                    marker.position.x,
                    marker.position.y
                );
            } else {
                tracing::info!(
                    "[OVERLAY] marker at ({}, {}) with label {:?} (not located)",
                    marker.position.x,
                    marker.position.y,
                    marker.label
                );
            }
        }
        Ok(())
    }
}

/// Flatten locator results into overlay drawing order (map key order).
pub fn markers_from_results(results: &BTreeMap<String, MatchResult>) -> Vec<Marker> {
    results
        .values()
        .map(|r| Marker {
            position: r.position,
            found: r.found,
            label: r.text.clone(),
        })
        .collect()
}

/// Consumes pipeline output events and forwards markers to the sink.
pub async fn overlay_loop(
    state: Arc<AppState>,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    sink: Arc<dyn OverlaySink>,
) -> anyhow::Result<()> {
    loop {
        let event = app_to_ui_rx.recv().await?;

        match event {
            AppEvent::ShowMarkers(markers) => {
                let display_ms = {
                    let config = state.config.read().await;
                    config.ui.display_ms
                };

                if let Err(e) = sink.show(&markers) {
                    tracing::error!("[OVERLAY] sink failed: {}", e);
                }

                // A real renderer would dismiss its windows after this.
                tracing::debug!(
                    "[OVERLAY] {} marker(s) shown, display window {} ms",
                    markers.len(),
                    display_ms
                );
            }
            AppEvent::ScanStatus { status, scanning } => {
                tracing::info!("[OVERLAY] status: {} (scanning: {})", status, scanning);
            }
            AppEvent::Shutdown => return Ok(()),
            other => {
                tracing::debug!("[OVERLAY] Ignoring event: {:?}", other);
            }
        }
    }
}
