//! Classification client.
//!
//! Forwards free-text note content to an OpenAI-compatible chat-completions
//! endpoint and parses a constrained JSON reply. The model is told to answer
//! with bare JSON, but replies wrapped in Markdown code fences are tolerated
//! and stripped before parsing. Unknown type labels are coerced to the
//! default type; missing fields get fixed placeholders. No retry is
//! performed here; any failure surfaces as one classification error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use jot_core::util::compact_text;
use jot_core::NoteType;

use crate::config::ClassifierRuntimeConfig;

const DEFAULT_TYPE_REASON: &str = "auto-classified";
const DEFAULT_SUGGESTION: &str = "worth keeping";

const SYSTEM_PROMPT: &str = r#"You are a note classification assistant. Analyze the user's note and reply with JSON only (no prose, no code fences):
{
  "type": "idea|complaint|confusion|news|link",
  "typeReason": "short reason (a few words)",
  "tags": ["tag1", "tag2", "tag3"],
  "suggestions": "one practical suggestion (under 30 words)"
}

Type rules, by priority:
1. link: contains an http/https URL
2. complaint: venting, dissatisfaction, negative sentiment
3. confusion: a question, puzzlement, or request for help
4. news: a headline, article summary, or knowledge snippet
5. idea: a creative thought, plan, or spark

Tag rules: extract 3-5 short keywords covering the topic, action, and domain."#;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("Classifier HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Classifier API error: {0}")]
    Api(String),
    #[error("Classifier returned an empty reply")]
    EmptyReply,
    #[error("Classifier reply was not valid JSON: {0}")]
    MalformedReply(#[from] serde_json::Error),
}

/// The constrained classification reply, after coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    #[serde(rename = "type")]
    pub note_type: NoteType,
    pub type_reason: String,
    pub tags: Vec<String>,
    pub suggestions: String,
}

#[derive(Debug, Clone)]
pub struct ClassifierClient {
    client: reqwest::Client,
    config: ClassifierRuntimeConfig,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Raw reply shape before coercion; every field is optional on purpose.
#[derive(Debug, Deserialize)]
struct RawClassification {
    #[serde(rename = "type")]
    type_label: Option<String>,
    #[serde(rename = "typeReason")]
    type_reason: Option<String>,
    tags: Option<Vec<String>>,
    suggestions: Option<String>,
}

impl ClassifierClient {
    pub fn new(config: ClassifierRuntimeConfig) -> Result<Self, ClassifyError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub async fn classify(&self, content: &str) -> Result<Classification, ClassifyError> {
        let request_url = format!("{}/chat/completions", self.config.base_url);
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content,
                },
            ],
            temperature: 0.3,
        };

        let mut request = self.client.post(&request_url).json(&body);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifyError::Api(format!(
                "HTTP {status}: {}",
                compact_text(&body)
            )));
        }

        let payload = response.json::<ChatResponse>().await?;
        let reply = payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ClassifyError::EmptyReply)?;

        parse_reply(&reply)
    }
}

/// Parse the model reply into a [`Classification`], coercing loose output.
fn parse_reply(reply: &str) -> Result<Classification, ClassifyError> {
    let stripped = strip_code_fences(reply);
    let raw = serde_json::from_str::<RawClassification>(stripped)?;

    let note_type = raw
        .type_label
        .as_deref()
        .and_then(NoteType::from_label)
        .unwrap_or_default();

    Ok(Classification {
        note_type,
        type_reason: raw
            .type_reason
            .filter(|reason| !reason.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TYPE_REASON.to_string()),
        tags: raw.tags.unwrap_or_default(),
        suggestions: raw
            .suggestions
            .filter(|suggestion| !suggestion.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SUGGESTION.to_string()),
    })
}

/// Remove a leading ```` ```json ```` / ```` ``` ```` fence and, when
/// present, the trailing fence. A reply missing its closing fence still
/// parses after the opening fence is gone.
fn strip_code_fences(reply: &str) -> &str {
    let mut text = reply.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}
