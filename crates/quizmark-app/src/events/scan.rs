use std::sync::Arc;

use kanal::AsyncSender;
use quizmark_extractor::AnswerExtractor;
use quizmark_ocr::IndexOptions;
use quizmark_types::AppEvent;

use crate::overlay::markers_from_results;
use crate::state::AppState;

/// One full capture -> extract -> index -> locate pass.
///
/// Failures in any phase abort only this scan; status events keep the
/// overlay side informed either way.
pub async fn handle_scan(
    state: Arc<AppState>,
    extractor: &dyn AnswerExtractor,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let _ = app_to_ui_tx
        .send(AppEvent::ScanStatus {
            status: "Capturing...".to_string(),
            scanning: true,
        })
        .await;

    let (region, index_opts) = {
        let config = state.config.read().await;
        let opts = IndexOptions {
            language: config.ocr.language.clone(),
            page_seg_mode: config.ocr.page_seg_mode,
            engine_mode: config.ocr.engine_mode,
            grayscale: config.ocr.grayscale,
        };
        (config.ocr.capture_region, opts)
    };

    // Screen capture is blocking platform work
    let png = tokio::task::spawn_blocking(move || match region {
        Some(region) => quizmark_ocr::capture_screen_region(region),
        None => quizmark_ocr::capture_primary_screen(),
    })
    .await;

    let png = match png {
        Ok(Ok(png)) => png,
        Ok(Err(e)) => {
            tracing::error!(">>> [SCAN] Capture failed: {}", e);
            return send_failure(app_to_ui_tx, "Capture failed").await;
        }
        Err(e) => {
            tracing::error!(">>> [SCAN] Capture task error: {}", e);
            return send_failure(app_to_ui_tx, "Capture failed").await;
        }
    };

    let _ = app_to_ui_tx
        .send(AppEvent::ScanStatus {
            status: "Extracting answers...".to_string(),
            scanning: true,
        })
        .await;

    let queries = match extractor.extract(&png).await {
        Ok(queries) if !queries.is_empty() => queries,
        Ok(_) => {
            tracing::warn!(">>> [SCAN] Extractor returned no answers");
            return send_failure(app_to_ui_tx, "No answers found").await;
        }
        Err(e) => {
            tracing::error!(">>> [SCAN] Extraction failed: {}", e);
            return send_failure(app_to_ui_tx, "Extraction failed").await;
        }
    };

    tracing::info!(">>> [SCAN] {} answer(s) to locate", queries.len());
    for (id, query) in &queries {
        tracing::debug!(">>> [SCAN] Q{}: {}", id, query.answer);
    }

    // Tesseract is CPU-bound and blocking
    let index = tokio::task::spawn_blocking(move || {
        quizmark_ocr::build_word_index_from_png(&png, &index_opts)
    })
    .await;

    let words = match index {
        Ok(Ok(words)) => words,
        Ok(Err(e)) => {
            tracing::error!(">>> [SCAN] Word index failed: {}", e);
            return send_failure(app_to_ui_tx, "OCR failed").await;
        }
        Err(e) => {
            tracing::error!(">>> [SCAN] Word index task error: {}", e);
            return send_failure(app_to_ui_tx, "OCR failed").await;
        }
    };

    tracing::debug!(">>> [SCAN] Word index has {} words", words.len());

    let results = quizmark_core::locate(&words, &queries);
    let markers = markers_from_results(&results);

    let _ = app_to_ui_tx.send(AppEvent::ShowMarkers(markers)).await;
    let _ = app_to_ui_tx
        .send(AppEvent::ScanStatus {
            status: "Ready".to_string(),
            scanning: false,
        })
        .await;

    Ok(())
}

async fn send_failure(tx: &AsyncSender<AppEvent>, status: &str) -> anyhow::Result<()> {
    let _ = tx
        .send(AppEvent::ScanStatus {
            status: status.to_string(),
            scanning: false,
        })
        .await;
    Ok(())
}
