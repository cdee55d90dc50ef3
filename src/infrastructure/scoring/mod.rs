//! Scoring service adapters

mod http;

pub use http::HttpScoringClient;
