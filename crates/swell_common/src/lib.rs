//! Swell Common - scoring services, reward pipeline and claim sessions.
//!
//! Builds on the pure logic in `swell-shared` and adds everything that
//! touches the network or the environment: scorer clients, configuration
//! and the async claim flow.

pub mod config;
pub mod http_scorer;
pub mod ollama;
pub mod pipeline;
pub mod scorer;
pub mod session;

pub use config::{ScorerKind, SwellConfig};
pub use http_scorer::HttpScorer;
pub use ollama::OllamaScorer;
pub use pipeline::RewardPipeline;
pub use scorer::{
    build_scorer, FakeScorer, OfflineScorer, ScoreReply, ScoreRequest, Scorer, ScorerError,
};
pub use session::{ClaimOutcome, ClaimPhase, ClaimStart, Session};
