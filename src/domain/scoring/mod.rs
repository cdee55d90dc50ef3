//! Scoring domain module

mod score_band;
mod score_result;

pub use score_band::ScoreBand;
pub use score_result::{ScoreOutcome, ScoreResult};
