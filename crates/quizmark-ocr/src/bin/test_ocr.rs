//! Word index smoke test - run with: cargo run -p quizmark-ocr --bin test_ocr

use anyhow::Result;
use quizmark_ocr::IndexOptions;

fn main() -> Result<()> {
    println!("=== Word Index Test ===\n");

    // 1. Check the OCR backend is actually present
    let version = quizmark_ocr::tesseract_version()?;
    println!("1. Tesseract: {}", version.trim());

    // 2. Capture primary screen
    println!("\n2. Capturing primary screen...");
    let start = std::time::Instant::now();
    let png_data = quizmark_ocr::capture_primary_screen()?;
    println!("   {} bytes in {:?}", png_data.len(), start.elapsed());

    // 3. Save for inspection
    std::fs::write("test_capture.png", &png_data)?;
    println!("   Saved to test_capture.png");

    // 4. Build the word index
    println!("\n3. Building word index...");
    let start = std::time::Instant::now();
    let words = quizmark_ocr::build_word_index_from_png(&png_data, &IndexOptions::default())?;
    println!("   {} words in {:?}", words.len(), start.elapsed());

    for word in words.iter().take(20) {
        println!(
            "   > {:?} at ({}, {}) [block {}, line {}, conf {:.0}]",
            word.text, word.bbox.x, word.bbox.y, word.block, word.line, word.confidence
        );
    }

    println!("\n=== Done ===");
    Ok(())
}
