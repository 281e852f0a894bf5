use crate::{Phase, SettingsDraft, Theme, TrackStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input_value: String,
    pub busy: bool,
    /// Whether the download affordance should be enabled.
    pub can_submit: bool,
    pub connected: bool,
    pub rows: Vec<QueueRowView>,
    pub total: usize,
    /// Items the backend has started on or finished (status outside
    /// Queued/Link Found), for the compact `completed/total` badge.
    pub completed: usize,
    pub progress: ProgressView,
    pub theme: Theme,
    /// Present while the settings form is open.
    pub settings: Option<SettingsFormView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueRowView {
    pub artist: String,
    pub title: String,
    pub status: TrackStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SettingsFormView {
    pub draft: SettingsDraft,
    pub save_notice: bool,
}

/// Visual treatment of the progress bar. One variant per phase, so exactly
/// one style holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressStyle {
    /// Neutral/informational, no animation (Idle).
    #[default]
    Info,
    /// Active, animated (Running).
    Active,
    /// Error/attention (Stopped: the backend halted before completion).
    Attention,
    /// Terminal/settled (Complete).
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressView {
    /// Bar width in percent, clamped to 0..=100.
    pub width_pct: u8,
    pub style: ProgressStyle,
}

/// Pure mapping from backend-reported (percent, phase) to the bar's visual
/// descriptor.
pub fn progress_view(percent_complete: u8, phase: Phase) -> ProgressView {
    ProgressView {
        width_pct: percent_complete.min(100),
        style: match phase {
            Phase::Idle => ProgressStyle::Info,
            Phase::Running => ProgressStyle::Active,
            Phase::Stopped => ProgressStyle::Attention,
            Phase::Complete => ProgressStyle::Settled,
        },
    }
}
