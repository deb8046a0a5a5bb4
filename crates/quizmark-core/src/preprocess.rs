use unicode_normalization::UnicodeNormalization;

/// Normalize a target answer string for matching: trim, NFKC, lowercase,
/// collapse internal whitespace to single spaces so phrases line up with
/// the space-joined OCR line text.
pub fn normalize_target(text: &str) -> String {
    let text = text.trim();

    if text.is_empty() {
        return String::new();
    }

    // Unicode normalization (NFKC)
    let text: String = text.nfkc().collect();

    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(normalize_target("  B) Paris  "), "b) paris");
    }

    #[test]
    fn collapses_internal_whitespace() {
        assert_eq!(normalize_target("Eiffel \n Tower"), "eiffel tower");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(normalize_target("   "), "");
    }
}
