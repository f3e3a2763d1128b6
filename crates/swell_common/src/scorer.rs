//! Scorer trait abstraction.
//!
//! A scorer reads a mission and the user's reflection and proposes an XP
//! value with a short note. The pipeline treats every scorer as unreliable:
//! whatever comes back is re-checked, bonused and clamped locally.
//!
//! Production code uses `HttpScorer` or `OllamaScorer`. Tests and offline
//! runs use `FakeScorer` / `OfflineScorer`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use swell_shared::{Mission, Tier};
use thiserror::Error;

use crate::config::{ScorerKind, SwellConfig};
use crate::http_scorer::HttpScorer;
use crate::ollama::OllamaScorer;

// ============================================================================
// Wire types
// ============================================================================

/// Body of a scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub mission_text: String,
    pub reflection: String,
    pub current_xp: u64,
    pub streak: u32,
    pub tier: Tier,
}

impl ScoreRequest {
    pub fn new(mission: &Mission, reflection: &str, current_xp: u64, streak: u32) -> Self {
        Self {
            mission_text: mission.label.clone(),
            reflection: reflection.trim().to_string(),
            current_xp,
            streak,
            tier: mission.tier,
        }
    }

    /// Reject requests the scorer cannot judge.
    pub fn validate(&self) -> Result<(), ScorerError> {
        if self.mission_text.trim().is_empty() {
            return Err(ScorerError::Validation("missionText is required".to_string()));
        }
        Ok(())
    }
}

/// What a scorer proposed. Fields are optional because scorers are allowed
/// to be sloppy; the pipeline fills the gaps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreReply {
    pub xp: Option<f64>,
    pub note: Option<String>,
}

impl ScoreReply {
    pub fn new(xp: f64, note: &str) -> Self {
        Self {
            xp: Some(xp),
            note: Some(note.to_string()),
        }
    }

    /// Pick `xp` (number) and `note` (string) out of a JSON object.
    /// Anything of the wrong type is treated as missing.
    pub fn from_value(value: &Value) -> Self {
        Self {
            xp: value.get("xp").and_then(Value::as_f64),
            note: value
                .get("note")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    /// Parse a response body. Only a body that is not a JSON object at all
    /// is an error.
    pub fn parse(body: &str) -> Result<Self, ScorerError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| ScorerError::Malformed(e.to_string()))?;
        if !value.is_object() {
            return Err(ScorerError::Malformed(format!(
                "expected a JSON object, got: {}",
                truncate(body, 80)
            )));
        }
        Ok(Self::from_value(&value))
    }

    /// Both fields present and the score is a finite number.
    pub fn is_complete(&self) -> bool {
        self.xp.is_some_and(f64::is_finite) && self.note.is_some()
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScorerError {
    #[error("Invalid scoring request: {0}")]
    Validation(String),

    #[error("Scorer unavailable: {0}")]
    Unavailable(String),

    #[error("Scorer request timed out")]
    Timeout,

    #[error("Scorer returned status {0}")]
    Status(u16),

    #[error("Malformed scorer response: {0}")]
    Malformed(String),
}

impl ScorerError {
    /// Map a transport-level reqwest failure.
    pub(crate) fn transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ScorerError::Timeout
        } else {
            ScorerError::Unavailable(e.to_string())
        }
    }
}

// ============================================================================
// Scorer trait
// ============================================================================

#[async_trait]
pub trait Scorer: Send + Sync {
    /// Score one reflection. Called at most once per claim; never retried.
    async fn score(&self, request: &ScoreRequest) -> Result<ScoreReply, ScorerError>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Build the scorer selected in configuration.
pub fn build_scorer(config: &SwellConfig) -> Result<Box<dyn Scorer>, ScorerError> {
    Ok(match config.scorer.kind {
        ScorerKind::Http => Box::new(HttpScorer::new(
            &config.scorer.url,
            config.scorer.timeout_ms,
        )?),
        ScorerKind::Ollama => Box::new(OllamaScorer::new(
            &config.ollama.url,
            &config.ollama.model,
            config.ollama.timeout_ms,
        )?),
        ScorerKind::Offline => Box::new(OfflineScorer),
    })
}

// ============================================================================
// Offline / fake scorers
// ============================================================================

/// Scorer that is never reachable. Every scored claim gets the minimal reward.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineScorer;

#[async_trait]
impl Scorer for OfflineScorer {
    async fn score(&self, _request: &ScoreRequest) -> Result<ScoreReply, ScorerError> {
        Err(ScorerError::Unavailable("offline mode".to_string()))
    }

    fn name(&self) -> &'static str {
        "offline"
    }
}

/// Scorer with a canned outcome that records how it was called.
///
/// Clones share the call counter, so a test can keep one handle and box the
/// other.
#[derive(Debug, Clone)]
pub struct FakeScorer {
    outcome: Result<ScoreReply, ScorerError>,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<ScoreRequest>>>,
}

impl FakeScorer {
    pub fn replying(xp: f64, note: &str) -> Self {
        Self::with_outcome(Ok(ScoreReply::new(xp, note)))
    }

    pub fn with_reply(reply: ScoreReply) -> Self {
        Self::with_outcome(Ok(reply))
    }

    pub fn failing(error: ScorerError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<ScoreReply, ScorerError>) -> Self {
        Self {
            outcome,
            calls: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Number of `score` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ScoreRequest> {
        self.last_request.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl Scorer for FakeScorer {
    async fn score(&self, request: &ScoreRequest) -> Result<ScoreReply, ScorerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_request.lock() {
            *guard = Some(request.clone());
        }
        request.validate()?;
        self.outcome.clone()
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let request = ScoreRequest {
            mission_text: "Ask one direct question".into(),
            reflection: "asked my lead about scope".into(),
            current_xp: 120,
            streak: 3,
            tier: Tier::Stretch,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["missionText"], "Ask one direct question");
        assert_eq!(json["currentXp"], 120);
        assert_eq!(json["streak"], 3);
        assert_eq!(json["tier"], "stretch");
    }

    #[test]
    fn test_validate_requires_mission_text() {
        let mut request = ScoreRequest {
            mission_text: "  ".into(),
            reflection: "did it".into(),
            current_xp: 0,
            streak: 0,
            tier: Tier::Core,
        };
        assert!(matches!(request.validate(), Err(ScorerError::Validation(_))));
        request.mission_text = "Breathe".into();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_parse_reply_fields() {
        let reply = ScoreReply::parse(r#"{"xp": 33, "note": "Good rep."}"#).unwrap();
        assert_eq!(reply, ScoreReply::new(33.0, "Good rep."));
        assert!(reply.is_complete());
    }

    #[test]
    fn test_parse_reply_wrong_types_become_missing() {
        let reply = ScoreReply::parse(r#"{"xp": "lots", "note": 7}"#).unwrap();
        assert_eq!(reply, ScoreReply::default());
        assert!(!reply.is_complete());
    }

    #[test]
    fn test_non_finite_score_is_incomplete() {
        let reply = ScoreReply {
            xp: Some(f64::NAN),
            note: Some("?".into()),
        };
        assert!(!reply.is_complete());
    }

    #[test]
    fn test_parse_reply_rejects_non_objects() {
        assert!(matches!(
            ScoreReply::parse("not json"),
            Err(ScorerError::Malformed(_))
        ));
        assert!(matches!(ScoreReply::parse("42"), Err(ScorerError::Malformed(_))));
    }

    #[test]
    fn test_build_offline_scorer() {
        let mut config = SwellConfig::default();
        config.scorer.kind = ScorerKind::Offline;
        let scorer = build_scorer(&config).unwrap();
        assert_eq!(scorer.name(), "offline");
    }
}
