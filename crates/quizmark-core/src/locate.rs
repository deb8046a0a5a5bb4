use std::collections::BTreeMap;
use std::sync::LazyLock;

use quizmark_types::{AnswerQuery, MatchResult, Point, Word};
use regex::Regex;

use crate::preprocess::normalize_target;

/// Enumerated option head: a single letter that is either the whole target,
/// followed by `)` or `.`, or followed by whitespace and a body. A plain
/// word ("paris") must not trigger this.
static OPTION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z])(?:[).]|\s|$)").unwrap());

const FALLBACK_X: i32 = 100;
const FALLBACK_Y: i32 = 100;
const FALLBACK_STEP: i32 = 50;

/// Minimum length for a target sub-token to count as a distinctive keyword.
const KEYWORD_MIN_LEN: usize = 4;

/// Locate every answer on screen.
///
/// For each query the strategy cascade runs most-specific-first and stops at
/// the first hit; ties within a strategy go to the first occurrence in index
/// order. The result map is total: a query that matches nothing gets
/// `found = false` at a deterministic fallback position derived from its id.
///
/// Answer ids are expected to be decimal integers rendered as strings; the
/// fallback formula `(100, 100 + 50 * (ordinal - 1))` parses them so that
/// unresolved answers stack vertically without overlapping. A non-numeric id
/// degrades to ordinal 1 rather than failing the batch.
pub fn locate(
    words: &[Word],
    queries: &BTreeMap<String, AnswerQuery>,
) -> BTreeMap<String, MatchResult> {
    queries
        .iter()
        .map(|(id, query)| {
            let target = normalize_target(&query.answer);

            let position = if target.is_empty() {
                None
            } else {
                match_option_marker(words, &target)
                    .or_else(|| match_exact(words, &target))
                    .or_else(|| match_phrase(words, &target))
                    .or_else(|| match_keyword(words, &target))
            };

            let result = match position {
                Some(position) => MatchResult {
                    position,
                    found: true,
                    text: query.answer.clone(),
                },
                None => MatchResult {
                    position: fallback_position(id),
                    found: false,
                    text: query.answer.clone(),
                },
            };

            (id.clone(), result)
        })
        .collect()
}

/// Strategy 1: option-style targets like "B) Paris" or "c.".
///
/// Quiz UIs usually render the option marker as its own OCR token, so the
/// bare letter (or "letter)" / "letter.") is cheaper and more reliable to
/// find than a possibly long answer body.
fn match_option_marker(words: &[Word], target: &str) -> Option<Point> {
    let caps = OPTION_MARKER.captures(target)?;
    let letter = caps.get(1)?.as_str();
    let closed = format!("{letter})");
    let dotted = format!("{letter}.");

    words
        .iter()
        .find(|w| {
            let text = w.text.to_lowercase();
            text == letter || text == closed || text == dotted
        })
        .map(|w| w.bbox.center())
}

/// Strategy 2: the whole target equals a single OCR token.
fn match_exact(words: &[Word], target: &str) -> Option<Point> {
    words
        .iter()
        .find(|w| w.text.to_lowercase() == target)
        .map(|w| w.bbox.center())
}

/// Strategy 3: multi-word targets matched as a contiguous substring of a
/// reconstructed OCR line.
///
/// Groups scan in first-appearance order of `(block, line)` in the index,
/// which is deterministic but not necessarily visual order; the first
/// structural hit wins. (Ordering groups by top-edge y would be the visual
/// fix, deliberately not applied to keep matching behavior stable.)
fn match_phrase(words: &[Word], target: &str) -> Option<Point> {
    if target.split_whitespace().count() < 2 {
        return None;
    }

    for mut line in line_groups(words) {
        line.sort_by_key(|w| w.bbox.x);

        let lowered: Vec<String> = line.iter().map(|w| w.text.to_lowercase()).collect();
        let line_text = lowered.join(" ");

        let Some(start) = line_text.find(target) else {
            continue;
        };
        let end = start + target.len();

        // Recover the covering words by walking the joined string's word
        // boundaries: each word spans len + 1 bytes including its joining
        // space.
        let mut offset = 0;
        let mut start_word: Option<&Word> = None;
        let mut end_word: Option<&Word> = None;

        for (&word, text) in line.iter().zip(&lowered) {
            let next = offset + text.len() + 1;

            if start_word.is_none() && offset <= start && start < next {
                start_word = Some(word);
            }
            if offset < end && end <= next {
                end_word = Some(word);
                break;
            }

            offset = next;
        }

        if let (Some(first), Some(last)) = (start_word, end_word) {
            return Some(Point {
                x: (first.bbox.x + last.bbox.right()) / 2,
                y: (first.bbox.y + last.bbox.y) / 2,
            });
        }
    }

    None
}

/// Strategy 4: first distinctive target token contained in any OCR token.
///
/// Tokens shorter than [`KEYWORD_MIN_LEN`] are skipped as too common to be
/// distinctive; the threshold applies to the target's tokens, not to
/// candidate words. The first token with any hit wins outright.
fn match_keyword(words: &[Word], target: &str) -> Option<Point> {
    for token in target.split_whitespace() {
        if token.chars().count() < KEYWORD_MIN_LEN {
            continue;
        }

        if let Some(w) = words
            .iter()
            .find(|w| w.text.to_lowercase().contains(token))
        {
            return Some(w.bbox.center());
        }
    }

    None
}

/// Group words by `(block, line)` preserving first-appearance order so the
/// scan never depends on randomized map iteration.
fn line_groups(words: &[Word]) -> Vec<Vec<&Word>> {
    let mut keys: Vec<(u32, u32)> = Vec::new();
    let mut groups: Vec<Vec<&Word>> = Vec::new();

    for word in words {
        let key = (word.block, word.line);
        match keys.iter().position(|k| *k == key) {
            Some(i) => groups[i].push(word),
            None => {
                keys.push(key);
                groups.push(vec![word]);
            }
        }
    }

    groups
}

fn fallback_position(answer_id: &str) -> Point {
    let ordinal = answer_id.trim().parse::<i32>().unwrap_or(1);
    Point {
        x: FALLBACK_X,
        y: FALLBACK_Y + FALLBACK_STEP * (ordinal - 1),
    }
}
