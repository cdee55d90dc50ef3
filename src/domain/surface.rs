//! Rendered surface model
//!
//! A surface is what the user sees after a command: a notification or a
//! modal dialog, with a fixed set of actions.

use crate::domain::scoring::ScoreBand;

/// Which kind of surface this is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// First surface shown after scoring
    Summary,
    /// Secondary surface opened from a view action
    Details,
    /// Informational message without actions
    Guidance,
}

/// Icon category of a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceTone {
    Positive,
    Caution,
    Negative,
    Info,
    Success,
    Warning,
    Error,
}

impl From<ScoreBand> for SurfaceTone {
    fn from(band: ScoreBand) -> Self {
        match band {
            ScoreBand::Positive => Self::Positive,
            ScoreBand::Caution => Self::Caution,
            ScoreBand::Negative => Self::Negative,
        }
    }
}

/// User actions offered on a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceAction {
    CopyEnhanced,
    CopyOriginal,
    ViewDetails,
    CopyFeedback,
    ViewFeedback,
}

/// All actions, in display order
pub const ALL_ACTIONS: &[SurfaceAction] = &[
    SurfaceAction::CopyEnhanced,
    SurfaceAction::CopyOriginal,
    SurfaceAction::ViewDetails,
    SurfaceAction::CopyFeedback,
    SurfaceAction::ViewFeedback,
];

impl SurfaceAction {
    /// Stable identifier used by notification action buttons
    pub const fn identifier(&self) -> &'static str {
        match self {
            Self::CopyEnhanced => "COPY_ENHANCED_PROMPT",
            Self::CopyOriginal => "COPY_ORIGINAL_TEXT",
            Self::ViewDetails => "VIEW_DETAILS",
            Self::CopyFeedback => "COPY_FEEDBACK",
            Self::ViewFeedback => "VIEW_FEEDBACK",
        }
    }

    /// Button label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CopyEnhanced => "Copy Enhanced",
            Self::CopyOriginal => "Copy Original",
            Self::ViewDetails => "View Details",
            Self::CopyFeedback => "Copy Feedback",
            Self::ViewFeedback => "View Feedback",
        }
    }

    pub fn from_identifier(identifier: &str) -> Option<Self> {
        ALL_ACTIONS
            .iter()
            .copied()
            .find(|a| a.identifier() == identifier)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        ALL_ACTIONS.iter().copied().find(|a| a.label() == label)
    }

    /// Whether this action opens a secondary surface
    pub const fn is_view(&self) -> bool {
        matches!(self, Self::ViewDetails | Self::ViewFeedback)
    }
}

/// Data carried with every action so it can be handled without re-querying
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionPayload {
    pub original_text: String,
    pub enhanced_text: Option<String>,
    pub feedback: String,
}

/// A rendered notification or dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    pub kind: SurfaceKind,
    pub title: String,
    pub subtitle: Option<String>,
    pub body: String,
    pub tone: SurfaceTone,
    pub actions: Vec<SurfaceAction>,
    pub payload: ActionPayload,
}

impl Surface {
    /// A message surface without actions
    pub fn guidance(title: impl Into<String>, body: impl Into<String>, tone: SurfaceTone) -> Self {
        Self {
            kind: SurfaceKind::Guidance,
            title: title.into(),
            subtitle: None,
            body: body.into(),
            tone,
            actions: Vec::new(),
            payload: ActionPayload::default(),
        }
    }

    pub fn has_action(&self, action: SurfaceAction) -> bool {
        self.actions.contains(&action)
    }
}
