use crate::view_model::{progress_view, AppViewModel, QueueRowView, SettingsFormView};

/// Monotonic counter used to supersede one-shot timers: a fired timer is
/// honoured only if it carries the current epoch.
pub type Epoch = u64;

/// Backend-declared status of a single queue item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackStatus {
    Queued,
    LinkFound,
    Downloading,
    Done,
    Error,
    /// Forward-compatible catch-all for statuses a newer backend may emit.
    Other(String),
}

impl TrackStatus {
    /// True while the backend has not started working on the item yet.
    pub fn is_pending(&self) -> bool {
        matches!(self, TrackStatus::Queued | TrackStatus::LinkFound)
    }

    pub fn label(&self) -> &str {
        match self {
            TrackStatus::Queued => "Queued",
            TrackStatus::LinkFound => "Link Found",
            TrackStatus::Downloading => "Downloading",
            TrackStatus::Done => "Done",
            TrackStatus::Error => "Error",
            TrackStatus::Other(label) => label,
        }
    }
}

/// One entry of the backend's import queue. Owned entirely by the backend;
/// the client only ever replaces the whole list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueItem {
    pub artist: String,
    pub title: String,
    pub status: TrackStatus,
}

/// Backend-declared lifecycle stage of the current queue run. The client
/// never self-transitions between phases; it mirrors what the backend says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Stopped,
    Complete,
}

/// A full, self-contained description of the queue. Every snapshot fully
/// replaces the previous one; partial updates are not a valid input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub items: Vec<QueueItem>,
    pub percent_complete: u8,
    pub phase: Phase,
}

/// Backend verdict on a submitted link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success,
    Failure { message: String },
}

/// Editable contents of the settings form, round-tripped with the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SettingsDraft {
    pub client_id: String,
    pub client_secret: String,
    pub sleep_interval_seconds: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Client-local state, wholly owned by the UI event loop. All mutation goes
/// through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input_value: String,
    busy: bool,
    snapshot: Snapshot,
    revert_epoch: Epoch,
    revert_pending: bool,
    settings_open: bool,
    settings_draft: SettingsDraft,
    save_notice: bool,
    notice_epoch: Epoch,
    theme: Theme,
    connected: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State seeded with a previously persisted theme preference.
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    /// Derives the render model. Counts are recomputed on every call, never
    /// cached across snapshots.
    pub fn view(&self) -> AppViewModel {
        let rows: Vec<QueueRowView> = self
            .snapshot
            .items
            .iter()
            .map(|item| QueueRowView {
                artist: item.artist.clone(),
                title: item.title.clone(),
                status: item.status.clone(),
            })
            .collect();
        let completed = self
            .snapshot
            .items
            .iter()
            .filter(|item| !item.status.is_pending())
            .count();

        AppViewModel {
            input_value: self.input_value.clone(),
            busy: self.busy,
            can_submit: self.can_submit(),
            connected: self.connected,
            total: rows.len(),
            completed,
            rows,
            progress: progress_view(self.snapshot.percent_complete, self.snapshot.phase),
            theme: self.theme,
            settings: self.settings_open.then(|| SettingsFormView {
                draft: self.settings_draft.clone(),
                save_notice: self.save_notice,
            }),
        }
    }

    /// Returns whether a render is due and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    pub fn busy(&self) -> bool {
        self.busy
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// User keystroke. A pending revert is cancelled so the timer never
    /// clobbers an edit made after the error message appeared.
    pub(crate) fn set_input(&mut self, text: String) {
        self.input_value = text;
        self.revert_pending = false;
        self.mark_dirty();
    }

    pub(crate) fn can_submit(&self) -> bool {
        !self.busy && !self.input_value.trim().is_empty()
    }

    pub(crate) fn begin_submission(&mut self) -> String {
        self.busy = true;
        self.mark_dirty();
        self.input_value.clone()
    }

    pub(crate) fn apply_ack_success(&mut self) {
        self.busy = false;
        self.input_value.clear();
        self.revert_pending = false;
        self.mark_dirty();
    }

    /// Surfaces the failure message in the input field and arms a fresh
    /// revert, superseding any pending one. Returns the epoch to schedule.
    pub(crate) fn apply_ack_failure(&mut self, message: String) -> Epoch {
        self.busy = false;
        self.input_value = message;
        self.revert_pending = true;
        self.revert_epoch += 1;
        self.mark_dirty();
        self.revert_epoch
    }

    pub(crate) fn apply_revert(&mut self, epoch: Epoch) {
        if self.revert_pending && epoch == self.revert_epoch {
            self.input_value.clear();
            self.revert_pending = false;
            self.mark_dirty();
        }
    }

    pub(crate) fn apply_snapshot(&mut self, snapshot: Snapshot) {
        if snapshot.percent_complete >= 100 {
            // Queue drained: second, independent busy-clearing signal.
            self.busy = false;
        }
        self.snapshot = snapshot;
        self.mark_dirty();
    }

    pub(crate) fn open_settings(&mut self) {
        self.settings_open = true;
        self.save_notice = false;
        self.mark_dirty();
    }

    pub(crate) fn close_settings(&mut self) {
        self.settings_open = false;
        self.save_notice = false;
        self.mark_dirty();
    }

    pub(crate) fn settings_open(&self) -> bool {
        self.settings_open
    }

    pub(crate) fn set_settings_draft(&mut self, draft: SettingsDraft) {
        self.settings_draft = draft;
        self.mark_dirty();
    }

    pub(crate) fn settings_draft(&self) -> &SettingsDraft {
        &self.settings_draft
    }

    pub(crate) fn show_save_notice(&mut self) -> Epoch {
        self.save_notice = true;
        self.notice_epoch += 1;
        self.mark_dirty();
        self.notice_epoch
    }

    pub(crate) fn apply_save_notice_expiry(&mut self, epoch: Epoch) {
        if self.save_notice && epoch == self.notice_epoch {
            self.save_notice = false;
            self.mark_dirty();
        }
    }

    pub(crate) fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.mark_dirty();
        self.theme
    }

    pub(crate) fn set_connected(&mut self, connected: bool) {
        if self.connected != connected {
            self.connected = connected;
            self.mark_dirty();
        }
    }
}
