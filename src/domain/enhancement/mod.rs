//! Enhancement domain module

mod enhanced_prompt;

pub use enhanced_prompt::{EnhancedPromptState, DEFAULT_ENHANCEMENT_TTL_SECS};
