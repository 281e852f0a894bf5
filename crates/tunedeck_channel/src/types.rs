use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Names of the messages travelling over the channel.
pub mod event {
    pub const SUBMIT_DOWNLOAD: &str = "submit-download";
    pub const CLEAR_QUEUE: &str = "clear-queue";
    pub const LOAD_SETTINGS: &str = "load-settings";
    pub const UPDATE_SETTINGS: &str = "update-settings";
    pub const SUBMISSION_RESULT: &str = "submission-result";
    pub const PROGRESS_STATUS: &str = "progress-status";
    pub const SETTINGS_LOADED: &str = "settings-loaded";
}

/// Client-to-server messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    SubmitDownload { link: String },
    ClearQueue,
    LoadSettings,
    UpdateSettings(SettingsPayload),
}

impl ClientEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::SubmitDownload { .. } => event::SUBMIT_DOWNLOAD,
            ClientEvent::ClearQueue => event::CLEAR_QUEUE,
            ClientEvent::LoadSettings => event::LOAD_SETTINGS,
            ClientEvent::UpdateSettings(_) => event::UPDATE_SETTINGS,
        }
    }
}

/// Server-to-client messages, decoded from the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    SubmissionResult(SubmissionPayload),
    ProgressStatus(SnapshotPayload),
    SettingsLoaded(SettingsPayload),
}

/// Outcome field of a `submission-result` message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum SubmissionStatus {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub outcome: SubmissionStatus,
    /// Error message; populated on failure.
    #[serde(default)]
    pub data: String,
}

/// Queue run phase as declared by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Stopped,
    Complete,
}

/// One row of a `progress-status` snapshot. The status stays a plain string
/// on the wire side; callers map known values to their own vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRow {
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: String,
}

/// Full queue snapshot; always a total replacement of the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SnapshotPayload {
    pub items: Vec<TrackRow>,
    /// Clamped to 0..=100 during decode.
    pub percent_complete: u8,
    pub phase: Phase,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPayload {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default)]
    pub sleep_interval_seconds: u32,
}

/// What `ChannelHandle::try_recv` yields, FIFO per connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    Connected,
    Disconnected,
    Server(ServerEvent),
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("invalid server url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("websocket error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("codec error: {0}")]
    Codec(#[from] crate::CodecError),
}
