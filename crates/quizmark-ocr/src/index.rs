use std::collections::HashMap;

use anyhow::{Context, Result, anyhow};
use image::DynamicImage;
use quizmark_types::{BoundingBox, Word};
use rusty_tesseract::{Args, DataOutput};

/// Recognition settings for one word-index pass.
#[derive(Debug, Clone)]
pub struct IndexOptions {
    pub language: String,
    /// Tesseract page segmentation mode; 3 = full page.
    pub page_seg_mode: i32,
    /// Tesseract engine mode; 3 = LSTM.
    pub engine_mode: i32,
    /// Collapse the image to a single intensity channel first. A deliberate
    /// simplification that tends to help recognition of rendered UI text.
    pub grayscale: bool,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            page_seg_mode: 3,
            engine_mode: 3,
            grayscale: true,
        }
    }
}

/// Probe the Tesseract installation.
///
/// A missing or broken binary is an infrastructure failure for the whole
/// pipeline; callers should refuse to start without it.
pub fn tesseract_version() -> Result<String> {
    rusty_tesseract::get_tesseract_version()
        .map_err(|e| anyhow!("Tesseract not available: {e}"))
}

/// Build the flat OCR word index for an image.
///
/// Emits one [`Word`] per recognized token in OCR emission order, text
/// trimmed with case preserved, whitespace-only tokens dropped. Grouping
/// keys `(block, line)` come from Tesseract's own page segmentation.
pub fn build_word_index(image: &DynamicImage, opts: &IndexOptions) -> Result<Vec<Word>> {
    let image = if opts.grayscale {
        image.grayscale()
    } else {
        image.clone()
    };

    let image = rusty_tesseract::Image::from_dynamic_image(&image)
        .map_err(|e| anyhow!("Failed to prepare image for OCR: {e}"))?;

    let args = Args {
        lang: opts.language.clone(),
        config_variables: HashMap::new(),
        dpi: None,
        psm: Some(opts.page_seg_mode),
        oem: Some(opts.engine_mode),
    };

    let output = rusty_tesseract::image_to_data(&image, &args)
        .map_err(|e| anyhow!("OCR recognition failed: {e}"))?;

    Ok(collect_words(&output))
}

/// Decode PNG bytes and build the word index.
pub fn build_word_index_from_png(png: &[u8], opts: &IndexOptions) -> Result<Vec<Word>> {
    let image = image::load_from_memory(png).context("Failed to decode captured image")?;
    build_word_index(&image, opts)
}

fn collect_words(output: &DataOutput) -> Vec<Word> {
    output
        .data
        .iter()
        .filter(|d| !d.text.trim().is_empty())
        .map(|d| Word {
            text: d.text.trim().to_string(),
            bbox: BoundingBox::new(d.left, d.top, d.width, d.height),
            confidence: d.conf,
            block: d.block_num as u32,
            line: d.line_num as u32,
        })
        .collect()
}
