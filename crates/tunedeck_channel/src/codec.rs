use client_logging::client_warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::types::{
    event, ClientEvent, Phase, ServerEvent, SettingsPayload, SnapshotPayload, SubmissionPayload,
    TrackRow,
};

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid message json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown event name: {0}")]
    UnknownEvent(String),
    #[error("bad payload for {event}: {source}")]
    Payload {
        event: &'static str,
        source: serde_json::Error,
    },
}

/// One frame on the wire: a named message with an optional payload.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<'a> {
    event: std::borrow::Cow<'a, str>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    data: Value,
}

/// Serializes a client event into its wire frame.
pub fn encode_client_event(event: &ClientEvent) -> String {
    let data = match event {
        ClientEvent::SubmitDownload { link } => serde_json::json!({ "link": link }),
        ClientEvent::ClearQueue | ClientEvent::LoadSettings => Value::Null,
        ClientEvent::UpdateSettings(settings) => {
            serde_json::to_value(settings).unwrap_or(Value::Null)
        }
    };
    let envelope = Envelope {
        event: event.name().into(),
        data,
    };
    serde_json::to_string(&envelope).expect("envelope serializes")
}

/// Decodes one inbound frame. Unknown event names and malformed payloads are
/// reported as errors so the pump can skip them; they are never fatal.
pub fn decode_server_event(text: &str) -> Result<ServerEvent, CodecError> {
    let envelope: Envelope<'_> = serde_json::from_str(text)?;
    match envelope.event.as_ref() {
        event::SUBMISSION_RESULT => {
            let payload: SubmissionPayload =
                serde_json::from_value(envelope.data).map_err(|source| CodecError::Payload {
                    event: event::SUBMISSION_RESULT,
                    source,
                })?;
            Ok(ServerEvent::SubmissionResult(payload))
        }
        event::PROGRESS_STATUS => {
            let raw: RawSnapshot =
                serde_json::from_value(envelope.data).map_err(|source| CodecError::Payload {
                    event: event::PROGRESS_STATUS,
                    source,
                })?;
            Ok(ServerEvent::ProgressStatus(raw.into()))
        }
        event::SETTINGS_LOADED => {
            let payload: SettingsPayload =
                serde_json::from_value(envelope.data).map_err(|source| CodecError::Payload {
                    event: event::SETTINGS_LOADED,
                    source,
                })?;
            Ok(ServerEvent::SettingsLoaded(payload))
        }
        other => Err(CodecError::UnknownEvent(other.to_string())),
    }
}

/// Wire form of `progress-status`. Every field is optional so a sparse or
/// sloppy snapshot still renders instead of crashing the session.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    #[serde(default)]
    items: Vec<TrackRow>,
    #[serde(default)]
    percent_complete: f64,
    #[serde(default, deserialize_with = "lenient_phase")]
    phase: Phase,
}

impl From<RawSnapshot> for SnapshotPayload {
    fn from(raw: RawSnapshot) -> Self {
        let percent = raw.percent_complete.clamp(0.0, 100.0);
        SnapshotPayload {
            items: raw.items,
            // NaN saturates to 0 here.
            percent_complete: percent as u8,
            phase: raw.phase,
        }
    }
}

/// A phase value the client does not recognize degrades to Idle rather than
/// discarding the whole snapshot.
fn lenient_phase<'de, D>(deserializer: D) -> Result<Phase, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value.clone()).unwrap_or_else(|_| {
        client_warn!("unrecognized phase {value}, treating as Idle");
        Phase::default()
    }))
}
