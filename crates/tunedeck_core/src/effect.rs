/// Delay before a backend failure message is cleared from the input box.
pub const REVERT_DELAY_MS: u64 = 2000;
/// Delay before the transient "Saved" notice in the settings form hides.
pub const SAVE_NOTICE_DELAY_MS: u64 = 1000;

/// Message the shell should hand to the event channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    SubmitDownload { link: String },
    ClearQueue,
    LoadSettings,
    UpdateSettings(crate::SettingsDraft),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Send(OutboundEvent),
    /// Arm the one-shot input revert ([`REVERT_DELAY_MS`]); supersedes any
    /// previously armed revert.
    StartRevertTimer { epoch: crate::Epoch },
    /// Arm the one-shot save-notice expiry ([`SAVE_NOTICE_DELAY_MS`]).
    StartSaveNoticeTimer { epoch: crate::Epoch },
    PersistTheme(crate::Theme),
}
