use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use client_logging::{client_debug, client_info};
use tunedeck_channel::{
    ChannelEvent, ChannelHandle, ChannelSender, ClientEvent, ServerEvent, SettingsPayload,
    SubmissionStatus, TrackRow,
};
use tunedeck_core::{
    Effect, Msg, OutboundEvent, Phase, QueueItem, SettingsDraft, Snapshot, SubmissionOutcome,
    TrackStatus, REVERT_DELAY_MS, SAVE_NOTICE_DELAY_MS,
};

use crate::persistence::{save_preferences, Preferences};
use crate::timers::Timers;

/// Executes core effects: channel sends, timer arms, preference writes.
pub struct EffectRunner {
    sender: ChannelSender,
    prefs_dir: PathBuf,
}

impl EffectRunner {
    /// Takes ownership of the channel handle, moving it to a pump thread
    /// that forwards inbound events as core messages; keeps only the
    /// send-side for outbound traffic.
    pub fn new(channel: ChannelHandle, msg_tx: mpsc::Sender<Msg>, prefs_dir: PathBuf) -> Self {
        let sender = channel.sender();
        spawn_channel_pump(channel, msg_tx);
        Self { sender, prefs_dir }
    }

    pub fn run(&self, effects: Vec<Effect>, timers: &mut Timers, prefs: &mut Preferences) {
        let now = Instant::now();
        for effect in effects {
            match effect {
                Effect::Send(event) => {
                    client_debug!("effect: send {:?}", event);
                    self.sender.send(map_outbound(event));
                }
                Effect::StartRevertTimer { epoch } => {
                    timers.arm(
                        now,
                        Duration::from_millis(REVERT_DELAY_MS),
                        Msg::RevertTimerFired { epoch },
                    );
                }
                Effect::StartSaveNoticeTimer { epoch } => {
                    timers.arm(
                        now,
                        Duration::from_millis(SAVE_NOTICE_DELAY_MS),
                        Msg::SaveNoticeTimerFired { epoch },
                    );
                }
                Effect::PersistTheme(theme) => {
                    prefs.theme = theme;
                    save_preferences(&self.prefs_dir, prefs);
                }
            }
        }
    }
}

/// Forwards channel events to the UI message queue until the UI goes away.
fn spawn_channel_pump(channel: ChannelHandle, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        loop {
            if let Some(event) = channel.try_recv() {
                if msg_tx.send(map_channel_event(event)).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        }
        client_info!("channel pump stopped");
        // Dropping the handle closes the connection.
    });
}

fn map_outbound(event: OutboundEvent) -> ClientEvent {
    match event {
        OutboundEvent::SubmitDownload { link } => ClientEvent::SubmitDownload { link },
        OutboundEvent::ClearQueue => ClientEvent::ClearQueue,
        OutboundEvent::LoadSettings => ClientEvent::LoadSettings,
        OutboundEvent::UpdateSettings(draft) => ClientEvent::UpdateSettings(SettingsPayload {
            client_id: draft.client_id,
            client_secret: draft.client_secret,
            sleep_interval_seconds: draft.sleep_interval_seconds,
        }),
    }
}

pub fn map_channel_event(event: ChannelEvent) -> Msg {
    match event {
        ChannelEvent::Connected => Msg::ChannelUp,
        ChannelEvent::Disconnected => Msg::ChannelDown,
        ChannelEvent::Server(ServerEvent::SubmissionResult(payload)) => {
            Msg::SubmissionAck(match payload.outcome {
                SubmissionStatus::Success => SubmissionOutcome::Success,
                SubmissionStatus::Failure => SubmissionOutcome::Failure {
                    message: payload.data,
                },
            })
        }
        ChannelEvent::Server(ServerEvent::ProgressStatus(snapshot)) => {
            Msg::SnapshotReceived(Snapshot {
                items: snapshot.items.into_iter().map(map_track_row).collect(),
                percent_complete: snapshot.percent_complete,
                phase: map_phase(snapshot.phase),
            })
        }
        ChannelEvent::Server(ServerEvent::SettingsLoaded(payload)) => {
            Msg::SettingsLoaded(SettingsDraft {
                client_id: payload.client_id,
                client_secret: payload.client_secret,
                sleep_interval_seconds: payload.sleep_interval_seconds,
            })
        }
    }
}

fn map_track_row(row: TrackRow) -> QueueItem {
    QueueItem {
        artist: row.artist,
        title: row.title,
        status: map_status(row.status),
    }
}

fn map_status(status: String) -> TrackStatus {
    match status.as_str() {
        "Queued" => TrackStatus::Queued,
        "Link Found" => TrackStatus::LinkFound,
        "Downloading" => TrackStatus::Downloading,
        "Done" => TrackStatus::Done,
        "Error" => TrackStatus::Error,
        _ => TrackStatus::Other(status),
    }
}

fn map_phase(phase: tunedeck_channel::Phase) -> Phase {
    match phase {
        tunedeck_channel::Phase::Idle => Phase::Idle,
        tunedeck_channel::Phase::Running => Phase::Running,
        tunedeck_channel::Phase::Stopped => Phase::Stopped,
        tunedeck_channel::Phase::Complete => Phase::Complete,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tunedeck_channel::{SnapshotPayload, SubmissionPayload};

    #[test]
    fn wire_statuses_map_to_the_core_vocabulary() {
        assert_eq!(map_status("Queued".to_string()), TrackStatus::Queued);
        assert_eq!(map_status("Link Found".to_string()), TrackStatus::LinkFound);
        assert_eq!(
            map_status("Downloading".to_string()),
            TrackStatus::Downloading
        );
        assert_eq!(map_status("Done".to_string()), TrackStatus::Done);
        assert_eq!(map_status("Error".to_string()), TrackStatus::Error);
        assert_eq!(
            map_status("Retrying".to_string()),
            TrackStatus::Other("Retrying".to_string())
        );
    }

    #[test]
    fn submission_results_become_acks() {
        let failure = ChannelEvent::Server(ServerEvent::SubmissionResult(SubmissionPayload {
            outcome: SubmissionStatus::Failure,
            data: "Invalid link".to_string(),
        }));
        assert_eq!(
            map_channel_event(failure),
            Msg::SubmissionAck(SubmissionOutcome::Failure {
                message: "Invalid link".to_string(),
            })
        );

        let success = ChannelEvent::Server(ServerEvent::SubmissionResult(SubmissionPayload {
            outcome: SubmissionStatus::Success,
            data: String::new(),
        }));
        assert_eq!(
            map_channel_event(success),
            Msg::SubmissionAck(SubmissionOutcome::Success)
        );
    }

    #[test]
    fn snapshots_carry_over_field_for_field() {
        let event = ChannelEvent::Server(ServerEvent::ProgressStatus(SnapshotPayload {
            items: vec![TrackRow {
                artist: "A".to_string(),
                title: "T".to_string(),
                status: "Downloading".to_string(),
            }],
            percent_complete: 50,
            phase: tunedeck_channel::Phase::Running,
        }));

        let expected = Msg::SnapshotReceived(Snapshot {
            items: vec![QueueItem {
                artist: "A".to_string(),
                title: "T".to_string(),
                status: TrackStatus::Downloading,
            }],
            percent_complete: 50,
            phase: Phase::Running,
        });
        assert_eq!(map_channel_event(event), expected);
    }

    #[test]
    fn connection_status_maps_to_channel_msgs() {
        assert_eq!(map_channel_event(ChannelEvent::Connected), Msg::ChannelUp);
        assert_eq!(
            map_channel_event(ChannelEvent::Disconnected),
            Msg::ChannelDown
        );
    }
}
