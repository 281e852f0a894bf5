#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the link input box.
    InputChanged(String),
    /// User activated the download affordance (pointer or keyboard).
    SubmitPressed,
    /// User asked the backend to drop its queue.
    ClearQueuePressed,
    /// Backend verdict on the last submitted link.
    SubmissionAck(crate::SubmissionOutcome),
    /// Full queue snapshot; replaces all previously held queue state.
    SnapshotReceived(crate::Snapshot),
    /// The revert timer armed for `epoch` elapsed.
    RevertTimerFired { epoch: crate::Epoch },
    /// The save-notice timer armed for `epoch` elapsed.
    SaveNoticeTimerFired { epoch: crate::Epoch },
    /// User opened the settings form.
    SettingsOpened,
    /// User dismissed the settings form.
    SettingsClosed,
    /// User edited a settings field.
    SettingsEdited(crate::SettingsDraft),
    /// Backend answered a `load-settings` request.
    SettingsLoaded(crate::SettingsDraft),
    /// User pressed Save in the settings form.
    SettingsSavePressed,
    /// User toggled the light/dark theme.
    ThemeToggled,
    /// Event channel (re-)established its connection.
    ChannelUp,
    /// Event channel lost its connection.
    ChannelDown,
    /// Fallback for placeholder wiring.
    NoOp,
}
