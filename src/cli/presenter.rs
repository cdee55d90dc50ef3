//! CLI presenter for output formatting

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::surface::{Surface, SurfaceTone};

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
    is_spinner_active: Arc<AtomicBool>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self {
            spinner: None,
            is_spinner_active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
        self.is_spinner_active.store(true, Ordering::SeqCst);
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
        self.is_spinner_active.store(false, Ordering::SeqCst);
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
        self.is_spinner_active.store(false, Ordering::SeqCst);
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout (the payload a caller may pipe)
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Format an overall score as a bar
    pub fn format_score(&self, overall: i64) -> String {
        let clamped = overall.clamp(0, 100) as usize;

        let bar_width = 20;
        let filled = clamped * bar_width / 100;
        let empty = bar_width - filled;

        format!(
            "[{}{}] {:>3}/100",
            "█".repeat(filled).cyan(),
            "░".repeat(empty),
            overall
        )
    }

    /// Print a surface to stderr
    pub fn surface(&self, surface: &Surface) {
        let title = match surface.tone {
            SurfaceTone::Positive | SurfaceTone::Success => surface.title.green(),
            SurfaceTone::Caution | SurfaceTone::Warning => surface.title.yellow(),
            SurfaceTone::Negative | SurfaceTone::Error => surface.title.red(),
            SurfaceTone::Info => surface.title.cyan(),
        };
        eprintln!("{}", title.bold());

        if let Some(subtitle) = &surface.subtitle {
            eprintln!("{}", subtitle.dimmed());
        }
        for line in surface.body.lines() {
            eprintln!("  {}", line);
        }

        if !surface.actions.is_empty() {
            let labels: Vec<&str> = surface.actions.iter().map(|a| a.label()).collect();
            eprintln!("{} {}", "Actions:".dimmed(), labels.join(" · ").dimmed());
        }
    }

    /// Print daemon status
    pub fn daemon_status(&self, state: &str) {
        eprintln!("{} Daemon: {}", "●".cyan(), state);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
