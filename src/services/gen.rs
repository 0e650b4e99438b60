//! HTTP client for the generative text endpoint.
//!
//! All panels go through this one client. Requests are plain
//! `generateContent` calls; structured requests additionally carry a
//! response schema and ask for `application/json` back.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::GenConfig;
use crate::domain::{Exam, Flashcard};
use crate::error::{GenError, GenResult};

/// Which configured model a request should hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    /// Fast model for chat, sheets, mnemonics, schedules
    Text,
    /// Stronger model for exam generation and answer grading
    Exam,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(
        rename = "generationConfig",
        skip_serializing_if = "Option::is_none"
    )]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate. Empty output is an error
    /// so callers never render a blank result.
    fn into_text(self) -> GenResult<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(GenError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Response schema for exam papers, mirroring [`Exam`]'s wire format
pub fn exam_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "duration_seconds": { "type": "NUMBER" },
            "totalMaxMarks": { "type": "NUMBER" },
            "sections": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "context": { "type": "STRING" },
                        "questions": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "id": { "type": "STRING" },
                                    "type": {
                                        "type": "STRING",
                                        "description": "mcq, numerical, text, paragraph, case_based"
                                    },
                                    "text": { "type": "STRING" },
                                    "caseText": { "type": "STRING" },
                                    "paragraphText": { "type": "STRING" },
                                    "options": {
                                        "type": "ARRAY",
                                        "items": { "type": "STRING" }
                                    },
                                    "correctOption": { "type": "STRING" },
                                    "explanation": { "type": "STRING" },
                                    "marks": { "type": "NUMBER" }
                                },
                                "required": ["id", "type", "text", "correctOption", "explanation"]
                            }
                        }
                    },
                    "required": ["name", "questions"]
                }
            }
        },
        "required": ["duration_seconds", "sections"]
    })
}

/// Response schema for flashcard decks
pub fn flashcard_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "front": { "type": "STRING" },
                "back": { "type": "STRING" }
            },
            "required": ["front", "back"]
        }
    })
}

/// Client for the generation endpoint
#[derive(Debug, Clone)]
pub struct GenClient {
    http: Client,
    base_url: String,
    text_model: String,
    exam_model: String,
    api_key: String,
}

impl GenClient {
    /// Build a client from configuration. Fails fast when no API key is
    /// available so panels can surface the problem before any request.
    pub fn new(config: &GenConfig, api_key: Option<String>) -> GenResult<Self> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(GenError::MissingApiKey)?;
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| GenError::Request(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            text_model: config.text_model.clone(),
            exam_model: config.exam_model.clone(),
            api_key,
        })
    }

    fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Text => &self.text_model,
            ModelTier::Exam => &self.exam_model,
        }
    }

    async fn generate(
        &self,
        prompt: &str,
        tier: ModelTier,
        schema: Option<Value>,
    ) -> GenResult<String> {
        let model = self.model_for(tier);
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: schema.map(|s| GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: s,
            }),
        };

        debug!(model, prompt_len = prompt.len(), "sending generation request");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "generation request rejected");
            return Err(GenError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenError::Request(e.to_string()))?;
        parsed.into_text()
    }

    /// Free-form text generation
    pub async fn generate_text(&self, prompt: &str, tier: ModelTier) -> GenResult<String> {
        let text = self.generate(prompt, tier, None).await?;
        Ok(text.trim().to_string())
    }

    /// Structured generation constrained by a response schema
    pub async fn generate_json(
        &self,
        prompt: &str,
        schema: Value,
        tier: ModelTier,
    ) -> GenResult<Value> {
        let text = self.generate(prompt, tier, Some(schema)).await?;
        serde_json::from_str(text.trim()).map_err(|e| GenError::InvalidJson(e.to_string()))
    }

    /// Generate and validate a full exam paper
    pub async fn generate_exam(&self, prompt: &str) -> GenResult<Exam> {
        let value = self
            .generate_json(prompt, exam_schema(), ModelTier::Exam)
            .await?;
        let exam: Exam =
            serde_json::from_value(value).map_err(|e| GenError::InvalidShape(e.to_string()))?;
        exam.validate().map_err(GenError::InvalidShape)?;
        Ok(exam)
    }

    /// Generate a flashcard deck
    pub async fn generate_flashcards(&self, prompt: &str) -> GenResult<Vec<Flashcard>> {
        let value = self
            .generate_json(prompt, flashcard_schema(), ModelTier::Text)
            .await?;
        let cards: Vec<Flashcard> =
            serde_json::from_value(value).map_err(|e| GenError::InvalidShape(e.to_string()))?;
        if cards.is_empty() {
            return Err(GenError::InvalidShape("empty flashcard deck".to_string()));
        }
        Ok(cards)
    }
}

/// Which panel a finished generation belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenTarget {
    Exam,
    ExamAnalysis,
    Chat,
    Flashcards,
    Formulas,
    Grader,
    Mnemonic,
    Schedule,
    TaskBreakdown { parent_id: String },
    Paper,
}

/// Decoded result payload
#[derive(Debug, Clone)]
pub enum GenPayload {
    Text(String),
    Exam(Exam),
    Cards(Vec<Flashcard>),
}

/// One completed background generation, delivered over the app channel
#[derive(Debug)]
pub struct GenOutcome {
    pub target: GenTarget,
    pub result: GenResult<GenPayload>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GenClient {
        GenClient::new(&GenConfig::default(), Some("test-key".to_string())).unwrap()
    }

    #[test]
    fn test_missing_api_key_rejected() {
        assert!(matches!(
            GenClient::new(&GenConfig::default(), None),
            Err(GenError::MissingApiKey)
        ));
        assert!(matches!(
            GenClient::new(&GenConfig::default(), Some("   ".to_string())),
            Err(GenError::MissingApiKey)
        ));
    }

    #[test]
    fn test_model_tier_selection() {
        let c = client();
        assert_eq!(c.model_for(ModelTier::Text), "gemini-3-flash-preview");
        assert_eq!(c.model_for(ModelTier::Exam), "gemini-3-pro-preview");
    }

    #[test]
    fn test_response_text_extraction() {
        let resp: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "hello " }, { "text": "world" }] }
            }]
        }))
        .unwrap();
        assert_eq!(resp.into_text().unwrap(), "hello world");
    }

    #[test]
    fn test_empty_response_is_error() {
        let resp: GenerateResponse = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(resp.into_text(), Err(GenError::EmptyResponse)));

        let blank: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "   " }] } }]
        }))
        .unwrap();
        assert!(matches!(blank.into_text(), Err(GenError::EmptyResponse)));
    }

    #[test]
    fn test_exam_schema_shape() {
        let schema = exam_schema();
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(schema["required"][0], "duration_seconds");
        let question = &schema["properties"]["sections"]["items"]["properties"]["questions"]
            ["items"];
        assert_eq!(question["required"][3], "correctOption");
    }

    #[test]
    fn test_flashcard_schema_shape() {
        let schema = flashcard_schema();
        assert_eq!(schema["type"], "ARRAY");
        assert_eq!(schema["items"]["required"], json!(["front", "back"]));
    }

    #[test]
    fn test_request_serializes_generation_config_camel_case() {
        let req = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "hi".to_string(),
                }],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: flashcard_schema(),
            }),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
    }
}
