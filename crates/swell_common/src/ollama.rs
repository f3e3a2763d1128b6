//! Ollama-backed scorer.
//!
//! Talks to a local Ollama instance directly instead of going through a
//! scoring service. The rubric is sent as the system prompt and the model is
//! asked for `{ "xp": number, "note": string }`.
//!
//! Endpoint used:
//! - POST /api/chat - non-streaming chat completion

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::scorer::{ScoreReply, ScoreRequest, Scorer, ScorerError};

/// Default Ollama API endpoint
pub const OLLAMA_DEFAULT_URL: &str = "http://127.0.0.1:11434";

pub const DEFAULT_MODEL: &str = "llama3.1";

/// Default timeout for a scoring completion (ms)
pub const GENERATE_TIMEOUT_MS: u64 = 60_000;

/// System prompt carrying the effort rubric.
pub const SCORING_RUBRIC: &str = "\
You are Riff, a calm Swell coach.

You read:
- the mission text
- a short reflection of what they actually did

Assign XP from 10 to 60 based ONLY on effort and specificity.

Rules:
- 10-14: they did not do it, or it's clearly \"no\", \"nothing\", or stalling.
- 15-25: tiny or vague effort, not very specific.
- 26-40: clear, concrete real action that matches the mission.
- 41-50: strong follow-through with impact or thoughtfulness.
- 51-60: high-friction, vulnerable, or very meaningful behavior.

Stretch missions can lean slightly higher, easy missions slightly lower,
but never give more than 20 XP if they admit they did nothing.

Return ONLY valid JSON:
{ \"xp\": number, \"note\": \"one short kind sentence\" }";

/// User message for one scoring request.
pub fn user_prompt(request: &ScoreRequest) -> String {
    format!(
        "Mission: \"{}\"\nTier: \"{}\"\nReflection: \"{}\"\nCurrent XP: {}\nStreak: {}",
        request.mission_text, request.tier, request.reflection, request.current_xp, request.streak
    )
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    stream: bool,
    options: ChatOptions,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ChatReplyMessage {
    #[serde(default)]
    content: String,
}

/// Extract `{xp, note}` from model output.
///
/// Models often wrap the object in prose or code fences, so the outermost
/// braces are parsed. Unparseable output yields an empty reply, which the
/// pipeline fills with defaults.
pub fn parse_model_content(content: &str) -> ScoreReply {
    let candidate = match (content.find('{'), content.rfind('}')) {
        (Some(start), Some(end)) if start < end => &content[start..=end],
        _ => content,
    };

    match serde_json::from_str::<Value>(candidate) {
        Ok(value) => ScoreReply::from_value(&value),
        Err(e) => {
            warn!(error = %e, content = %content, "Model reply was not valid JSON");
            ScoreReply::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct OllamaScorer {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaScorer {
    pub fn new(base_url: &str, model: &str, timeout_ms: u64) -> Result<Self, ScorerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| ScorerError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Scorer for OllamaScorer {
    async fn score(&self, request: &ScoreRequest) -> Result<ScoreReply, ScorerError> {
        request.validate()?;

        let user = user_prompt(request);
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SCORING_RUBRIC,
                },
                ChatMessage {
                    role: "user",
                    content: &user,
                },
            ],
            stream: false,
            options: ChatOptions { temperature: 0.3 },
        };

        let url = format!("{}/api/chat", self.base_url);
        debug!(url = %url, model = %self.model, "Scoring via Ollama");

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(ScorerError::transport)?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %text, "Ollama error");
            return Err(ScorerError::Status(status.as_u16()));
        }

        let chat: ChatResponse = resp
            .json()
            .await
            .map_err(|e| ScorerError::Malformed(e.to_string()))?;

        Ok(parse_model_content(&chat.message.content))
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swell_shared::Tier;

    #[test]
    fn test_user_prompt_layout() {
        let request = ScoreRequest {
            mission_text: "Take 3 slow breaths".into(),
            reflection: "before standup".into(),
            current_xp: 75,
            streak: 2,
            tier: Tier::Easy,
        };
        let prompt = user_prompt(&request);
        assert_eq!(
            prompt,
            "Mission: \"Take 3 slow breaths\"\nTier: \"easy\"\nReflection: \"before standup\"\nCurrent XP: 75\nStreak: 2"
        );
    }

    #[test]
    fn test_parse_plain_json() {
        let reply = parse_model_content(r#"{"xp": 41, "note": "Strong follow-through."}"#);
        assert_eq!(reply, ScoreReply::new(41.0, "Strong follow-through."));
    }

    #[test]
    fn test_parse_fenced_json() {
        let content = "Here you go:\n```json\n{ \"xp\": 27, \"note\": \"Concrete.\" }\n```";
        assert_eq!(parse_model_content(content), ScoreReply::new(27.0, "Concrete."));
    }

    #[test]
    fn test_parse_garbage_yields_empty_reply() {
        assert_eq!(parse_model_content("I think 30?"), ScoreReply::default());
        assert_eq!(parse_model_content("{oops}"), ScoreReply::default());
    }

    #[test]
    fn test_rubric_mentions_bounds() {
        assert!(SCORING_RUBRIC.contains("10 to 60"));
        assert!(SCORING_RUBRIC.contains("never give more than 20 XP"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let scorer = OllamaScorer::new("http://127.0.0.1:11434/", DEFAULT_MODEL, 1000).unwrap();
        assert_eq!(scorer.base_url, "http://127.0.0.1:11434");
        assert_eq!(scorer.model(), "llama3.1");
    }
}
