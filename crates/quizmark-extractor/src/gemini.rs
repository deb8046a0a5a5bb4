use std::collections::BTreeMap;
use std::sync::LazyLock;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use quizmark_types::AnswerQuery;
use regex::Regex;
use serde_json::json;

use crate::{AnswerExtractor, ExtractError, ProviderMetadata, QuestionId};

static QUESTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Q(\d+):\s*(.*)").unwrap());
static ANSWER_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^A(\d+):\s*(.*)").unwrap());

const PROMPT: &str = "\
Analyze this quiz screenshot. For EACH question in the image:
1. Identify the question number or ID
2. Extract the question text
3. Determine the correct answer option - provide the EXACT text of the correct option

Format your response as:
Q1: [Question text]
A1: [Correct answer text]

Q2: [Question text]
A2: [Correct answer text]

And so on for all questions visible in the image.
If there's only one question, use the Q1/A1 format.";

/// Answer extraction backed by the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiExtractor {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl GeminiExtractor {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url,
        }
    }
}

#[async_trait]
impl AnswerExtractor for GeminiExtractor {
    async fn extract(
        &self,
        png: &[u8],
    ) -> Result<BTreeMap<QuestionId, AnswerQuery>, ExtractError> {
        if self.api_key.is_empty() {
            return Err(ExtractError::AuthenticationError);
        }

        let payload = json!({
            "contents": [{
                "parts": [
                    { "text": PROMPT },
                    { "inline_data": { "mime_type": "image/png", "data": BASE64.encode(png) } }
                ]
            }]
        });

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await?;

        if response.status() == 429 {
            return Err(ExtractError::RateLimitExceeded);
        }

        if response.status() == 403 {
            return Err(ExtractError::AuthenticationError);
        }

        if !response.status().is_success() {
            return Err(ExtractError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ExtractError::ApiError(format!("Failed to parse response: {}", e)))?;

        let text = body["candidates"]
            .get(0)
            .and_then(|c| c["content"]["parts"].get(0))
            .and_then(|p| p["text"].as_str())
            .ok_or(ExtractError::EmptyResponse)?;

        let answers = parse_answers(text);
        if answers.is_empty() {
            return Err(ExtractError::EmptyResponse);
        }

        Ok(answers)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "gemini".to_string(),
            requires_api_key: true,
        }
    }
}

/// Parse the model's `Q<n>:` / `A<n>:` line format.
///
/// A question counts only once its matching answer line arrives. When the
/// structured format is missing entirely, the first non-empty line is taken
/// as the answer to a single question with id "1".
fn parse_answers(text: &str) -> BTreeMap<QuestionId, AnswerQuery> {
    let mut answers = BTreeMap::new();
    let mut pending: Option<(String, String)> = None;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(caps) = QUESTION_LINE.captures(line) {
            pending = Some((caps[1].to_string(), caps[2].to_string()));
            continue;
        }

        if let Some(caps) = ANSWER_LINE.captures(line) {
            if let Some((id, question)) = pending.take() {
                if id == caps[1] {
                    answers.insert(
                        id,
                        AnswerQuery {
                            question,
                            answer: caps[2].to_string(),
                        },
                    );
                }
            }
        }
    }

    if answers.is_empty() {
        if let Some(line) = text.lines().map(str::trim).find(|l| !l.is_empty()) {
            answers.insert(
                "1".to_string(),
                AnswerQuery {
                    question: "Question".to_string(),
                    answer: line.to_string(),
                },
            );
        }
    }

    answers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_structured_qa_lines() {
        let text = "Q1: Capital of France?\nA1: B) Paris\n\nQ2: Tallest structure?\nA2: Eiffel Tower\n";
        let answers = parse_answers(text);

        assert_eq!(answers.len(), 2);
        assert_eq!(answers["1"].question, "Capital of France?");
        assert_eq!(answers["1"].answer, "B) Paris");
        assert_eq!(answers["2"].answer, "Eiffel Tower");
    }

    #[test]
    fn answer_must_follow_its_own_question() {
        // Mismatched numbering: A2 after Q1 is dropped.
        let text = "Q1: Something?\nA2: Wrong pairing\n";
        let answers = parse_answers(text);

        // Falls back to first-line mode since nothing structured survived.
        assert_eq!(answers.len(), 1);
        assert_eq!(answers["1"].answer, "Q1: Something?");
    }

    #[test]
    fn unstructured_reply_becomes_single_answer() {
        let answers = parse_answers("\n  The answer is Paris.  \nmore text");
        assert_eq!(answers.len(), 1);
        assert_eq!(answers["1"].answer, "The answer is Paris.");
        assert_eq!(answers["1"].question, "Question");
    }

    #[test]
    fn empty_reply_yields_no_answers() {
        assert!(parse_answers("   \n \n").is_empty());
    }
}
