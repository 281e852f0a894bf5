//! Tunedeck channel: the persistent named-message connection to the worker.
mod backoff;
mod channel;
mod codec;
mod types;

pub use backoff::ReconnectPolicy;
pub use channel::{connect_url, ChannelConfig, ChannelHandle, ChannelSender};
pub use codec::{decode_server_event, encode_client_event, CodecError};
pub use types::{
    ChannelEvent, ChannelError, ClientEvent, Phase, ServerEvent, SettingsPayload, SnapshotPayload,
    SubmissionPayload, SubmissionStatus, TrackRow,
};
