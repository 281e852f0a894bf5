//! Tunedeck core: pure queue-synchronization state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, OutboundEvent, REVERT_DELAY_MS, SAVE_NOTICE_DELAY_MS};
pub use msg::Msg;
pub use state::{
    AppState, Epoch, Phase, QueueItem, SettingsDraft, Snapshot, SubmissionOutcome, Theme,
    TrackStatus,
};
pub use update::update;
pub use view_model::{
    progress_view, AppViewModel, ProgressStyle, ProgressView, QueueRowView, SettingsFormView,
};
