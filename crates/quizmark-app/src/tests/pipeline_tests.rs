//! Pipeline seams exercised without a display, network, or tesseract
//! binary: a fake extractor behind the capability trait and a recorded
//! word index driving the locator.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use quizmark_extractor::{AnswerExtractor, ExtractError, ProviderMetadata, QuestionId};
use quizmark_types::{AnswerQuery, AppEvent, Marker, Word};
use tokio::time::timeout;

use crate::overlay::{OverlaySink, markers_from_results, overlay_loop};

struct FakeExtractor {
    answers: BTreeMap<QuestionId, AnswerQuery>,
}

#[async_trait]
impl AnswerExtractor for FakeExtractor {
    async fn extract(
        &self,
        _png: &[u8],
    ) -> Result<BTreeMap<QuestionId, AnswerQuery>, ExtractError> {
        Ok(self.answers.clone())
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "fake".to_string(),
            requires_api_key: false,
        }
    }
}

/// A word index recorded from a real quiz capture, trimmed down.
const RECORDED_INDEX: &str = r#"[
    {"text": "What", "bbox": {"x": 20, "y": 40, "width": 44, "height": 16}, "confidence": 96.0, "block": 1, "line": 1},
    {"text": "is", "bbox": {"x": 70, "y": 40, "width": 14, "height": 16}, "confidence": 95.0, "block": 1, "line": 1},
    {"text": "the", "bbox": {"x": 90, "y": 40, "width": 30, "height": 16}, "confidence": 96.0, "block": 1, "line": 1},
    {"text": "capital", "bbox": {"x": 126, "y": 40, "width": 60, "height": 16}, "confidence": 94.0, "block": 1, "line": 1},
    {"text": "of", "bbox": {"x": 192, "y": 40, "width": 18, "height": 16}, "confidence": 95.0, "block": 1, "line": 1},
    {"text": "France?", "bbox": {"x": 216, "y": 40, "width": 70, "height": 16}, "confidence": 93.0, "block": 1, "line": 1},
    {"text": "A)", "bbox": {"x": 40, "y": 80, "width": 20, "height": 14}, "confidence": 92.0, "block": 2, "line": 1},
    {"text": "London", "bbox": {"x": 68, "y": 80, "width": 62, "height": 14}, "confidence": 95.0, "block": 2, "line": 1},
    {"text": "B)", "bbox": {"x": 40, "y": 104, "width": 20, "height": 14}, "confidence": 91.0, "block": 2, "line": 2},
    {"text": "Paris", "bbox": {"x": 68, "y": 104, "width": 44, "height": 14}, "confidence": 96.0, "block": 2, "line": 2}
]"#;

fn recorded_index() -> Vec<Word> {
    serde_json::from_str(RECORDED_INDEX).expect("recorded index parses")
}

#[tokio::test]
async fn extractor_output_feeds_the_locator() {
    let mut answers = BTreeMap::new();
    answers.insert(
        "1".to_string(),
        AnswerQuery {
            question: "What is the capital of France?".to_string(),
            answer: "B) Paris".to_string(),
        },
    );

    let extractor: Arc<dyn AnswerExtractor> = Arc::new(FakeExtractor { answers });
    let queries = extractor.extract(&[]).await.expect("fake never fails");

    let results = quizmark_core::locate(&recorded_index(), &queries);

    let r = &results["1"];
    assert!(r.found);
    // Center of the "B)" marker token.
    assert_eq!((r.position.x, r.position.y), (50, 111));
}

#[tokio::test]
async fn unmatched_answers_become_labelled_fallback_markers() {
    let mut answers = BTreeMap::new();
    answers.insert(
        "1".to_string(),
        AnswerQuery {
            question: "Q1".to_string(),
            answer: "B) Paris".to_string(),
        },
    );
    answers.insert(
        "2".to_string(),
        AnswerQuery {
            question: "Q2".to_string(),
            answer: "Mitochondria".to_string(),
        },
    );

    let results = quizmark_core::locate(&recorded_index(), &answers);
    let markers = markers_from_results(&results);

    assert_eq!(markers.len(), 2);
    assert!(markers[0].found);
    assert!(!markers[1].found);
    // Fallback column: second answer sits one step down.
    assert_eq!((markers[1].position.x, markers[1].position.y), (100, 150));
    assert_eq!(markers[1].label, "Mitochondria");
}

struct CollectSink {
    batches: Mutex<Vec<Vec<Marker>>>,
}

impl OverlaySink for CollectSink {
    fn show(&self, markers: &[Marker]) -> anyhow::Result<()> {
        self.batches.lock().unwrap().push(markers.to_vec());
        Ok(())
    }
}

#[tokio::test]
async fn overlay_loop_forwards_marker_batches_to_the_sink() {
    let (tx, rx) = kanal::bounded_async::<AppEvent>(8);
    let sink = Arc::new(CollectSink {
        batches: Mutex::new(Vec::new()),
    });
    let state = Arc::new(crate::state::AppState::new(quizmark_config::Config::new()));

    let task = tokio::spawn(overlay_loop(state, rx, sink.clone()));

    let markers = vec![Marker {
        position: quizmark_types::Point { x: 50, y: 111 },
        found: true,
        label: "B) Paris".to_string(),
    }];

    tx.send(AppEvent::ShowMarkers(markers.clone()))
        .await
        .expect("send failed");
    tx.send(AppEvent::Shutdown).await.expect("send failed");

    timeout(Duration::from_secs(2), task)
        .await
        .expect("overlay loop did not stop")
        .expect("overlay loop panicked")
        .expect("overlay loop errored");

    let batches = sink.batches.lock().unwrap();
    assert_eq!(batches.as_slice(), &[markers]);
}
