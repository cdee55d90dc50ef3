//! PromptLens - score and improve the text you are writing, from any application
//!
//! A global hotkey captures the focused text through the platform
//! accessibility API, sends it to a prompt scoring service and shows the
//! result as a notification or dialog. A second hotkey writes the improved
//! prompt back into the same field.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Score parsing, the enhancement record, the coordinator state machine
//! - **Application**: Port traits, the analysis coordinator and the presentation router
//! - **Infrastructure**: Adapters (accessibility, HTTP scoring, clipboard, notifications, hotkeys)
//! - **CLI**: Command-line interface, daemon runner, IPC and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
