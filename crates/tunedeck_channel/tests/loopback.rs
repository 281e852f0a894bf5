use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{accept_async, accept_hdr_async};
use tunedeck_channel::{
    ChannelConfig, ChannelEvent, ChannelHandle, ClientEvent, Phase, ReconnectPolicy, ServerEvent,
};

async fn next_event(handle: &ChannelHandle) -> ChannelEvent {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(event) = handle.try_recv() {
            return event;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "timed out waiting for channel event"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn submits_and_receives_snapshots_over_a_live_socket() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let (uri_tx, uri_rx) = std::sync::mpsc::channel::<String>();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let callback = move |req: &tokio_tungstenite::tungstenite::handshake::server::Request,
                             resp| {
            let _ = uri_tx.send(req.uri().to_string());
            Ok(resp)
        };
        let mut ws = accept_hdr_async(stream, callback).await.expect("handshake");

        let frame = ws.next().await.expect("frame").expect("read");
        let value: serde_json::Value =
            serde_json::from_str(frame.to_text().expect("text frame")).expect("json frame");
        assert_eq!(value["event"], "submit-download");
        assert_eq!(value["data"]["link"], "https://open.example.com/track/abc");

        let reply = json!({
            "event": "progress-status",
            "data": {
                "items": [{ "artist": "A", "title": "T", "status": "Downloading" }],
                "percentComplete": 50,
                "phase": "Running"
            }
        });
        ws.send(Message::Text(reply.to_string())).await.expect("send");
        let _ = ws.close(None).await;
    });

    let handle = ChannelHandle::connect(ChannelConfig {
        server_url: format!("ws://{addr}"),
        user: Some("tester".to_string()),
        reconnect: ReconnectPolicy::default(),
    });
    handle.send(ClientEvent::SubmitDownload {
        link: "https://open.example.com/track/abc".to_string(),
    });

    assert_eq!(next_event(&handle).await, ChannelEvent::Connected);
    match next_event(&handle).await {
        ChannelEvent::Server(ServerEvent::ProgressStatus(snapshot)) => {
            assert_eq!(snapshot.items.len(), 1);
            assert_eq!(snapshot.percent_complete, 50);
            assert_eq!(snapshot.phase, Phase::Running);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(next_event(&handle).await, ChannelEvent::Disconnected);

    server.await.expect("server task");
    let uri = uri_rx.recv().expect("handshake uri");
    assert!(uri.contains("user=tester"), "identity missing from {uri}");
    handle.shutdown();
}

#[tokio::test]
async fn reconnects_after_a_dropped_connection() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");

    let server = tokio::spawn(async move {
        // First connection dies right away.
        let (stream, _) = listener.accept().await.expect("accept");
        let mut ws = accept_async(stream).await.expect("handshake");
        let _ = ws.close(None).await;

        // The client comes back and is fully usable again.
        let (stream, _) = listener.accept().await.expect("second accept");
        let mut ws = accept_async(stream).await.expect("second handshake");
        let frame = ws.next().await.expect("frame").expect("read");
        let value: serde_json::Value =
            serde_json::from_str(frame.to_text().expect("text frame")).expect("json frame");
        assert_eq!(value["event"], "load-settings");
        let _ = ws.close(None).await;
    });

    let handle = ChannelHandle::connect(ChannelConfig {
        server_url: format!("ws://{addr}"),
        user: None,
        reconnect: ReconnectPolicy {
            initial: Duration::from_millis(200),
            max: Duration::from_millis(500),
        },
    });

    assert_eq!(next_event(&handle).await, ChannelEvent::Connected);
    assert_eq!(next_event(&handle).await, ChannelEvent::Disconnected);

    // A send in the gap is dropped quietly, never an error.
    handle.send(ClientEvent::ClearQueue);

    assert_eq!(next_event(&handle).await, ChannelEvent::Connected);
    handle.send(ClientEvent::LoadSettings);
    assert_eq!(next_event(&handle).await, ChannelEvent::Disconnected);

    server.await.expect("server task");
    handle.shutdown();
}
