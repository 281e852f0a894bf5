use std::sync::mpsc;
use std::thread;

use client_logging::{client_debug, client_info, client_warn};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use url::Url;

use crate::codec::{decode_server_event, encode_client_event};
use crate::types::{ChannelError, ChannelEvent, ClientEvent};
use crate::ReconnectPolicy;

/// Connection parameters for one channel.
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// WebSocket endpoint, e.g. `ws://localhost:5002/channel`.
    pub server_url: String,
    /// Opaque identity tagged onto the connection; `None` connects an
    /// anonymous session.
    pub user: Option<String>,
    pub reconnect: ReconnectPolicy,
}

/// Builds the connect URL, appending the `user` query parameter when an
/// identity is present.
pub fn connect_url(server_url: &str, user: Option<&str>) -> Result<Url, ChannelError> {
    let mut url = Url::parse(server_url)?;
    if let Some(user) = user {
        url.query_pairs_mut().append_pair("user", user);
    }
    Ok(url)
}

enum ChannelCommand {
    Send(ClientEvent),
    Shutdown,
}

/// Handle to the single long-lived channel connection.
///
/// Sends are fire-and-forget; while the connection is down they are dropped
/// with a warning rather than queued, so a reconnect never replays stale
/// submissions. Inbound events are polled with [`try_recv`] and arrive in
/// delivery order per connection.
///
/// [`try_recv`]: ChannelHandle::try_recv
pub struct ChannelHandle {
    cmd_tx: UnboundedSender<ChannelCommand>,
    event_rx: mpsc::Receiver<ChannelEvent>,
}

impl ChannelHandle {
    /// Spawns the connection supervisor on its own runtime thread and
    /// returns immediately; the first [`ChannelEvent::Connected`] signals a
    /// live connection.
    pub fn connect(config: ChannelConfig) -> Self {
        let (cmd_tx, cmd_rx) = unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            runtime.block_on(supervise(config, cmd_rx, event_tx));
        });

        Self { cmd_tx, event_rx }
    }

    pub fn send(&self, event: ClientEvent) {
        let _ = self.cmd_tx.send(ChannelCommand::Send(event));
    }

    /// Cheap clonable send-side, for callers that move the handle itself to
    /// a polling thread.
    pub fn sender(&self) -> ChannelSender {
        ChannelSender {
            cmd_tx: self.cmd_tx.clone(),
        }
    }

    pub fn try_recv(&self) -> Option<ChannelEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Closes the connection and stops the supervisor. Idempotent; also
    /// runs on drop.
    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(ChannelCommand::Shutdown);
    }
}

impl Drop for ChannelHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Send-only view of a [`ChannelHandle`]. Same fire-and-forget semantics.
#[derive(Clone)]
pub struct ChannelSender {
    cmd_tx: UnboundedSender<ChannelCommand>,
}

impl ChannelSender {
    pub fn send(&self, event: ClientEvent) {
        let _ = self.cmd_tx.send(ChannelCommand::Send(event));
    }
}

enum PumpExit {
    Shutdown,
    Dropped,
}

async fn supervise(
    config: ChannelConfig,
    mut cmd_rx: UnboundedReceiver<ChannelCommand>,
    event_tx: mpsc::Sender<ChannelEvent>,
) {
    let url = match connect_url(&config.server_url, config.user.as_deref()) {
        Ok(url) => url,
        Err(err) => {
            client_warn!("channel misconfigured, giving up: {err}");
            return;
        }
    };

    let mut attempt = 0u32;
    loop {
        match connect_async(url.as_str()).await {
            Ok((stream, _response)) => {
                client_info!("channel connected to {}", config.server_url);
                attempt = 0;
                let _ = event_tx.send(ChannelEvent::Connected);
                let exit = pump(stream, &mut cmd_rx, &event_tx).await;
                let _ = event_tx.send(ChannelEvent::Disconnected);
                if matches!(exit, PumpExit::Shutdown) {
                    return;
                }
            }
            Err(err) => {
                client_warn!("channel connect failed: {err}");
            }
        }

        let delay = config.reconnect.delay(attempt);
        attempt = attempt.saturating_add(1);
        client_info!("reconnecting in {delay:?}");
        if !wait_for_reconnect(delay, &mut cmd_rx).await {
            return;
        }
    }
}

/// Sleeps out the backoff window while still servicing commands: queued
/// sends are dropped with a warning, a shutdown aborts the supervisor.
/// Returns false when the supervisor should stop.
async fn wait_for_reconnect(
    delay: std::time::Duration,
    cmd_rx: &mut UnboundedReceiver<ChannelCommand>,
) -> bool {
    let deadline = tokio::time::Instant::now() + delay;
    loop {
        tokio::select! {
            _ = tokio::time::sleep_until(deadline) => return true,
            cmd = cmd_rx.recv() => match cmd {
                Some(ChannelCommand::Send(event)) => {
                    client_warn!("channel disconnected, dropping {}", event.name());
                }
                Some(ChannelCommand::Shutdown) | None => return false,
            },
        }
    }
}

async fn pump(
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    cmd_rx: &mut UnboundedReceiver<ChannelCommand>,
    event_tx: &mpsc::Sender<ChannelEvent>,
) -> PumpExit {
    let (mut sink, mut source) = stream.split();
    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => match cmd {
                Some(ChannelCommand::Send(event)) => {
                    let frame = encode_client_event(&event);
                    client_debug!("-> {}", event.name());
                    if let Err(err) = sink.send(Message::Text(frame)).await {
                        client_warn!("channel send failed: {err}");
                        return PumpExit::Dropped;
                    }
                }
                Some(ChannelCommand::Shutdown) | None => {
                    let _ = sink.send(Message::Close(None)).await;
                    return PumpExit::Shutdown;
                }
            },
            frame = source.next() => match frame {
                Some(Ok(Message::Text(text))) => match decode_server_event(text.as_str()) {
                    Ok(event) => {
                        let _ = event_tx.send(ChannelEvent::Server(event));
                    }
                    Err(err) => {
                        // Bad frames are skipped, never fatal.
                        client_warn!("skipping undecodable frame: {err}");
                    }
                },
                Some(Ok(Message::Close(_))) | None => {
                    client_info!("channel closed by server");
                    return PumpExit::Dropped;
                }
                // Pings are answered by the library; other frame kinds
                // carry nothing for us.
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    client_warn!("channel read failed: {err}");
                    return PumpExit::Dropped;
                }
            },
        }
    }
}
