use crate::{AppState, Effect, Msg, OutboundEvent, SubmissionOutcome};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SubmitPressed => {
            // Submitting while busy or with an empty input is a no-op; the
            // shell additionally disables the affordance, but the guard
            // lives here so keyboard and pointer activation cannot diverge.
            if !state.can_submit() {
                return (state, Vec::new());
            }
            let link = state.begin_submission();
            vec![Effect::Send(OutboundEvent::SubmitDownload { link })]
        }
        Msg::ClearQueuePressed => {
            vec![Effect::Send(OutboundEvent::ClearQueue)]
        }
        Msg::SubmissionAck(outcome) => match outcome {
            SubmissionOutcome::Success => {
                state.apply_ack_success();
                Vec::new()
            }
            SubmissionOutcome::Failure { message } => {
                let epoch = state.apply_ack_failure(message);
                vec![Effect::StartRevertTimer { epoch }]
            }
        },
        Msg::SnapshotReceived(snapshot) => {
            state.apply_snapshot(snapshot);
            Vec::new()
        }
        Msg::RevertTimerFired { epoch } => {
            state.apply_revert(epoch);
            Vec::new()
        }
        Msg::SaveNoticeTimerFired { epoch } => {
            state.apply_save_notice_expiry(epoch);
            Vec::new()
        }
        Msg::SettingsOpened => {
            state.open_settings();
            vec![Effect::Send(OutboundEvent::LoadSettings)]
        }
        Msg::SettingsClosed => {
            state.close_settings();
            Vec::new()
        }
        Msg::SettingsEdited(draft) => {
            if state.settings_open() {
                state.set_settings_draft(draft);
            }
            Vec::new()
        }
        Msg::SettingsLoaded(draft) => {
            // A late `settings-loaded` after the form closed must not
            // resurrect it.
            if state.settings_open() {
                state.set_settings_draft(draft);
            }
            Vec::new()
        }
        Msg::SettingsSavePressed => {
            if !state.settings_open() {
                return (state, Vec::new());
            }
            let draft = state.settings_draft().clone();
            let epoch = state.show_save_notice();
            vec![
                Effect::Send(OutboundEvent::UpdateSettings(draft)),
                Effect::StartSaveNoticeTimer { epoch },
            ]
        }
        Msg::ThemeToggled => {
            let theme = state.toggle_theme();
            vec![Effect::PersistTheme(theme)]
        }
        Msg::ChannelUp => {
            state.set_connected(true);
            Vec::new()
        }
        Msg::ChannelDown => {
            state.set_connected(false);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
