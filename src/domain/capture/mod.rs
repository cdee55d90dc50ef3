//! Capture domain module

mod capture_result;
mod text_range;

pub use capture_result::CaptureResult;
pub use text_range::{splice_utf16, TextRange};
