//! Score result value object and response parsing

use serde::Deserialize;

use super::ScoreBand;
use crate::domain::error::ScoreParseError;

// Wire format of the scoring service

#[derive(Debug, Deserialize)]
struct ScoreDocument {
    score: ScoreSection,
    #[serde(default)]
    improve: Option<ImproveSection>,
}

#[derive(Debug, Deserialize)]
struct ScoreSection {
    specificity: i64,
    context: i64,
    clarity: i64,
    structure: i64,
    #[serde(default)]
    key_issues: Vec<String>,
    overall: i64,
}

#[derive(Debug, Deserialize)]
struct ImproveSection {
    #[serde(default)]
    prompt: String,
    original_score: Option<i64>,
    improved_score: Option<i64>,
    improvement: Option<i64>,
}

/// Structured score returned by the scoring service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreResult {
    pub specificity: i64,
    pub context: i64,
    pub clarity: i64,
    pub structure: i64,
    pub overall: i64,
    pub key_issues: Vec<String>,
    pub improved_prompt: String,
    pub original_score: Option<i64>,
    pub improved_score: Option<i64>,
    pub improvement_delta: Option<i64>,
}

impl ScoreResult {
    /// Parse a raw response body.
    ///
    /// Fails on invalid JSON or when the body does not match the score schema.
    pub fn parse(body: &str) -> Result<Self, ScoreParseError> {
        if body.trim().is_empty() {
            return Err(ScoreParseError::Empty);
        }

        let document: ScoreDocument = serde_json::from_str(body)
            .map_err(|e| ScoreParseError::InvalidDocument(e.to_string()))?;

        let improve = document.improve.unwrap_or(ImproveSection {
            prompt: String::new(),
            original_score: None,
            improved_score: None,
            improvement: None,
        });

        Ok(Self {
            specificity: document.score.specificity,
            context: document.score.context,
            clarity: document.score.clarity,
            structure: document.score.structure,
            overall: document.score.overall,
            key_issues: document.score.key_issues,
            improved_prompt: improve.prompt,
            original_score: improve.original_score,
            improved_score: improve.improved_score,
            improvement_delta: improve.improvement,
        })
    }

    /// Whether the service produced an improved prompt
    pub fn has_improvement(&self) -> bool {
        !self.improved_prompt.trim().is_empty()
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_overall(self.overall)
    }
}

/// Result of interpreting a scoring response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreOutcome {
    /// The response decoded into a score
    Structured(ScoreResult),
    /// The response could not be decoded; the text is shown as-is
    Unstructured(String),
}

impl ScoreOutcome {
    /// Interpret a raw body, falling back to the raw text on parse failure
    pub fn from_body(body: &str) -> Self {
        match ScoreResult::parse(body) {
            Ok(result) => Self::Structured(result),
            Err(_) => Self::Unstructured(body.to_string()),
        }
    }

    pub fn structured(&self) -> Option<&ScoreResult> {
        match self {
            Self::Structured(result) => Some(result),
            Self::Unstructured(_) => None,
        }
    }
}
