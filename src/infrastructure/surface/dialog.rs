//! Modal dialog renderer
//!
//! Uses `osascript` on macOS and `zenity` elsewhere. Dialog buttons are the
//! surface's action labels.

use std::io::ErrorKind;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::{Child, Command};
use tokio::sync::oneshot;

use crate::application::ports::{PendingAction, RenderError, SurfaceRenderer};
use crate::domain::surface::{Surface, SurfaceAction, SurfaceTone};

/// Label of the button that dismisses a dialog without an action
const CLOSE_LABEL: &str = "Close";

/// AppleScript dialogs hold at most three buttons
const MAX_APPLESCRIPT_BUTTONS: usize = 3;

/// Seconds before an AppleScript dialog without a close button dismisses itself
const GIVE_UP_AFTER_SECS: u32 = 120;

/// Renders surfaces as modal dialogs, each in its own process
#[derive(Debug, Default)]
pub struct DialogRenderer;

impl DialogRenderer {
    pub fn new() -> Self {
        Self
    }
}

fn dialog_text(surface: &Surface) -> String {
    match &surface.subtitle {
        Some(subtitle) => format!("{}\n\n{}", subtitle, surface.body),
        None => surface.body.clone(),
    }
}

fn applescript_string(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Build the `display dialog` script for a surface
pub(crate) fn applescript(surface: &Surface) -> String {
    let mut buttons: Vec<&str> = surface.actions.iter().map(|a| a.label()).collect();
    let closable = buttons.len() < MAX_APPLESCRIPT_BUTTONS;
    if closable {
        buttons.push(CLOSE_LABEL);
    }

    let button_list = buttons
        .iter()
        .map(|b| applescript_string(b))
        .collect::<Vec<_>>()
        .join(", ");

    let icon = match surface.tone {
        SurfaceTone::Negative | SurfaceTone::Error => "stop",
        SurfaceTone::Caution | SurfaceTone::Warning => "caution",
        _ => "note",
    };

    let mut script = format!(
        "display dialog {} with title {} buttons {{{}}} default button {} with icon {}",
        applescript_string(&dialog_text(surface)),
        applescript_string(&surface.title),
        button_list,
        applescript_string(buttons[0]),
        icon,
    );
    if closable {
        script.push_str(&format!(" cancel button {}", applescript_string(CLOSE_LABEL)));
    } else {
        script.push_str(&format!(" giving up after {}", GIVE_UP_AFTER_SECS));
    }
    script
}

/// Parse `button returned:<label>, gave up:false`
pub(crate) fn parse_applescript(stdout: &str) -> Option<SurfaceAction> {
    let (_, rest) = stdout.split_once("button returned:")?;
    let label = rest.split(',').next().unwrap_or_default();
    SurfaceAction::from_label(label)
}

fn pango_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Build zenity arguments for a surface
pub(crate) fn zenity_args(surface: &Surface) -> Vec<String> {
    let icon = match surface.tone {
        SurfaceTone::Negative | SurfaceTone::Error => "dialog-error",
        SurfaceTone::Caution | SurfaceTone::Warning => "dialog-warning",
        _ => "dialog-information",
    };

    let mut args = Vec::new();
    match surface.actions.split_first() {
        None => args.push("--info".to_string()),
        Some((first, rest)) => {
            args.push("--question".to_string());
            args.push(format!("--ok-label={}", first.label()));
            args.push(format!("--cancel-label={}", CLOSE_LABEL));
            for action in rest {
                args.push(format!("--extra-button={}", action.label()));
            }
        }
    }

    args.push(format!("--title={}", surface.title));
    args.push(format!("--text={}", pango_escape(&dialog_text(surface))));
    args.push(format!("--icon-name={}", icon));
    args.push("--no-wrap".to_string());
    args
}

/// zenity exits 0 for the OK button and prints the label of an extra button
pub(crate) fn parse_zenity(
    surface: &Surface,
    success: bool,
    stdout: &str,
) -> Option<SurfaceAction> {
    if success {
        return surface.actions.first().copied();
    }
    SurfaceAction::from_label(stdout).filter(|a| surface.has_action(*a))
}

/// A non-zero AppleScript exit is the close button
fn parse_output(surface: &Surface, success: bool, stdout: &str) -> Option<SurfaceAction> {
    if cfg!(target_os = "macos") {
        success.then(|| parse_applescript(stdout)).flatten()
    } else {
        parse_zenity(surface, success, stdout)
    }
}

fn spawn_dialog(program: &'static str, args: Vec<String>) -> Result<Child, RenderError> {
    Command::new(program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                RenderError::ToolNotFound(program)
            } else {
                RenderError::ShowFailed(e.to_string())
            }
        })
}

#[async_trait]
impl SurfaceRenderer for DialogRenderer {
    async fn render(&self, surface: &Surface) -> Result<PendingAction, RenderError> {
        let (program, args) = if cfg!(target_os = "macos") {
            ("osascript", vec!["-e".to_string(), applescript(surface)])
        } else {
            ("zenity", zenity_args(surface))
        };
        let child = spawn_dialog(program, args)?;

        let surface = surface.clone();
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let action = match child.wait_with_output().await {
                Ok(output) => parse_output(
                    &surface,
                    output.status.success(),
                    String::from_utf8_lossy(&output.stdout).trim(),
                ),
                Err(e) => {
                    tracing::warn!(error = %e, program, "dialog failed");
                    None
                }
            };
            let _ = tx.send(action);
        });
        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::surface::{ActionPayload, SurfaceKind};

    fn summary() -> Surface {
        Surface {
            kind: SurfaceKind::Summary,
            title: "Prompt Score: 72/100".to_string(),
            subtitle: Some("From Notes".to_string()),
            body: "Improvement: +15\n• say \"which\" file".to_string(),
            tone: SurfaceTone::Positive,
            actions: vec![
                SurfaceAction::CopyEnhanced,
                SurfaceAction::CopyOriginal,
                SurfaceAction::ViewDetails,
            ],
            payload: ActionPayload::default(),
        }
    }

    #[test]
    fn applescript_escapes_quotes() {
        let script = applescript(&summary());
        assert!(script.contains(r#"say \"which\" file"#));
        assert!(script.contains(r#"buttons {"Copy Enhanced", "Copy Original", "View Details"}"#));
        assert!(script.contains("giving up after"));
    }

    #[test]
    fn applescript_guidance_has_close_button() {
        let surface = Surface::guidance("PromptLens", "Select some text", SurfaceTone::Info);
        let script = applescript(&surface);
        assert!(script.contains(r#"buttons {"Close"}"#));
        assert!(script.contains(r#"cancel button "Close""#));
    }

    #[test]
    fn parses_button_returned() {
        assert_eq!(
            parse_applescript("button returned:View Details, gave up:false"),
            Some(SurfaceAction::ViewDetails)
        );
        assert_eq!(parse_applescript("button returned:Close"), None);
        assert_eq!(parse_applescript("gave up:true"), None);
    }

    #[test]
    fn zenity_buttons_follow_actions() {
        let args = zenity_args(&summary());
        assert_eq!(args[0], "--question");
        assert!(args.contains(&"--ok-label=Copy Enhanced".to_string()));
        assert!(args.contains(&"--extra-button=Copy Original".to_string()));
        assert!(args.contains(&"--extra-button=View Details".to_string()));
    }

    #[test]
    fn zenity_guidance_is_info() {
        let surface = Surface::guidance("PromptLens", "a < b", SurfaceTone::Info);
        let args = zenity_args(&surface);
        assert_eq!(args[0], "--info");
        assert!(args.contains(&"--text=a &lt; b".to_string()));
    }

    #[test]
    fn zenity_result_mapping() {
        let surface = summary();
        assert_eq!(
            parse_zenity(&surface, true, ""),
            Some(SurfaceAction::CopyEnhanced)
        );
        assert_eq!(
            parse_zenity(&surface, false, "View Details"),
            Some(SurfaceAction::ViewDetails)
        );
        assert_eq!(parse_zenity(&surface, false, ""), None);
        assert_eq!(parse_zenity(&surface, false, "Copy Feedback"), None);
    }
}
