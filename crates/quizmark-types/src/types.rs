use serde::{Deserialize, Serialize};

/// Axis-aligned box in pixel space, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2,
            y: self.y + self.height / 2,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// One OCR-recognized token with geometry and grouping metadata.
///
/// `text` is stored trimmed with original casing; comparisons happen
/// lowercased in the locator. Words sharing `(block, line)` sit on the
/// same visual text line in OCR reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub bbox: BoundingBox,
    /// Advisory recognition confidence, not used for filtering.
    pub confidence: f32,
    pub block: u32,
    pub line: u32,
}

/// A target string to locate on screen, keyed externally by answer id.
///
/// Answer ids are decimal integers rendered as strings; the fallback
/// position formula parses them as such.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerQuery {
    /// Question text as reported by the extractor. Unused by the locator.
    pub question: String,
    /// The answer text to locate.
    pub answer: String,
}

/// Localization outcome for one answer query. Total: every query yields one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub position: Point,
    pub found: bool,
    /// Echo of the original target, rendered as a label when not found.
    pub text: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CaptureRegion {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// One overlay drawing instruction.
///
/// `found` markers are drawn centered at `position`; not-found markers are
/// anchored top-left and carry the `label` text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub position: Point,
    pub found: bool,
    pub label: String,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Run the capture -> extract -> locate pipeline once.
    TriggerScan,
    ShowMarkers(Vec<Marker>),
    ScanStatus {
        status: String,
        scanning: bool,
    },
    Shutdown,
}
