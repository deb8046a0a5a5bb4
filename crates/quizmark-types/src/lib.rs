pub mod types;

pub use types::{
    AnswerQuery, AppEvent, BoundingBox, CaptureRegion, Marker, MatchResult, Point, Word,
};
