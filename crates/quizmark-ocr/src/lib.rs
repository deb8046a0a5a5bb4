mod capture;
mod hotkey;
mod index;

pub use capture::{capture_primary_screen, capture_screen_region};
pub use hotkey::HotkeyManager;
pub use index::{IndexOptions, build_word_index, build_word_index_from_png, tesseract_version};
