//! JSON-over-HTTP scoring client.
//!
//! POSTs `{missionText, reflection, currentXp, streak, tier}` and expects
//! `{xp, note}` back. Any non-2xx status is a scorer failure.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use crate::scorer::{ScoreReply, ScoreRequest, Scorer, ScorerError};

/// Default scoring endpoint
pub const DEFAULT_SCORER_URL: &str = "http://127.0.0.1:4000/score-mission";

/// Default request timeout (ms)
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

#[derive(Debug, Clone)]
pub struct HttpScorer {
    client: reqwest::Client,
    url: String,
}

impl HttpScorer {
    pub fn new(url: &str, timeout_ms: u64) -> Result<Self, ScorerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| ScorerError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Scorer for HttpScorer {
    async fn score(&self, request: &ScoreRequest) -> Result<ScoreReply, ScorerError> {
        request.validate()?;
        debug!(url = %self.url, tier = %request.tier, "Sending scoring request");

        let resp = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(ScorerError::transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "Scorer rejected request");
            return Err(ScorerError::Status(status.as_u16()));
        }

        let body = resp.text().await.map_err(ScorerError::transport)?;
        ScoreReply::parse(&body)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
