//! Gateway round-trip tests
//!
//! These tests require a running PostgreSQL instance and the DATABASE_URL
//! environment variable; they return early when it is absent.
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use futures_util::{SinkExt, StreamExt};
use integration_tests::{check_test_env, unique_poem_id, TestGateway, SAMPLE_COMMENT};
use std::time::Duration;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use verse_core::{ClientIntent, ServerEvent};

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Read frames until a server event of interest arrives
async fn next_event(stream: &mut WsStream) -> Option<ServerEvent> {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(5), stream.next())
            .await
            .ok()??
            .ok()?;
        match msg {
            Message::Text(text) => {
                if let Ok(event) = ServerEvent::from_json(&text) {
                    return Some(event);
                }
            }
            Message::Close(_) => return None,
            _ => {}
        }
    }
}

async fn send_intent(stream: &mut WsStream, intent: &ClientIntent) {
    let json = intent.to_json().expect("serialize intent");
    stream.send(Message::Text(json)).await.expect("send intent");
}

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let gateway = TestGateway::start().await.expect("Failed to start gateway");
    let response = reqwest::get(gateway.http_url("/health"))
        .await
        .expect("Request failed");
    assert!(response.status().is_success());
}

#[tokio::test]
async fn test_connect_receives_snapshot_first() {
    if !check_test_env().await {
        return;
    }

    let gateway = TestGateway::start().await.expect("Failed to start gateway");
    let (mut stream, _) = connect_async(gateway.ws_url()).await.expect("connect");

    let event = next_event(&mut stream).await.expect("snapshot event");
    assert!(
        matches!(event, ServerEvent::InitialData(_)),
        "first frame must be the snapshot, got {event:?}"
    );
}

#[tokio::test]
async fn test_like_round_trip_reaches_sender() {
    if !check_test_env().await {
        return;
    }

    let gateway = TestGateway::start().await.expect("Failed to start gateway");
    let (mut stream, _) = connect_async(gateway.ws_url()).await.expect("connect");

    // Drain the snapshot
    let _ = next_event(&mut stream).await.expect("snapshot event");

    let poem_id = unique_poem_id();
    send_intent(&mut stream, &ClientIntent::LikePoem(poem_id.clone())).await;

    // The sender observes its own write through the broadcast
    let event = next_event(&mut stream).await.expect("update event");
    match event {
        ServerEvent::EngagementUpdate(update) => {
            assert_eq!(update.poem_id, poem_id);
            assert_eq!(update.data.likes, 1);
            assert!(update.data.comments.is_empty());
        }
        other => panic!("expected engagement_update, got {other:?}"),
    }
}

#[tokio::test]
async fn test_comment_broadcast_and_notification_routing() {
    if !check_test_env().await {
        return;
    }

    let gateway = TestGateway::start().await.expect("Failed to start gateway");

    let (mut sender, _) = connect_async(gateway.ws_url()).await.expect("connect sender");
    let (mut observer, _) = connect_async(gateway.ws_url()).await.expect("connect observer");

    let _ = next_event(&mut sender).await.expect("sender snapshot");
    let _ = next_event(&mut observer).await.expect("observer snapshot");

    let poem_id = unique_poem_id();
    send_intent(
        &mut sender,
        &ClientIntent::AddComment(verse_core::AddCommentIntent {
            poem_id: poem_id.clone(),
            text: SAMPLE_COMMENT.to_string(),
        }),
    )
    .await;

    // The sender gets the update but never its own notification
    let event = next_event(&mut sender).await.expect("sender update");
    match event {
        ServerEvent::EngagementUpdate(update) => {
            assert_eq!(update.poem_id, poem_id);
            assert_eq!(update.data.comments.len(), 1);
            assert_eq!(update.data.comments[0].text, SAMPLE_COMMENT);
        }
        other => panic!("expected engagement_update, got {other:?}"),
    }

    // The observer gets both the update and the toast, in some order
    let mut saw_update = false;
    let mut saw_notification = false;
    for _ in 0..2 {
        match next_event(&mut observer).await.expect("observer event") {
            ServerEvent::EngagementUpdate(update) => {
                assert_eq!(update.poem_id, poem_id);
                saw_update = true;
            }
            ServerEvent::Notification(message) => {
                assert!(message.contains(poem_id.as_str()));
                saw_notification = true;
            }
            ServerEvent::InitialData(_) => panic!("unexpected second snapshot"),
        }
    }
    assert!(saw_update && saw_notification);
}

#[tokio::test]
async fn test_reply_to_unknown_comment_is_silent() {
    if !check_test_env().await {
        return;
    }

    let gateway = TestGateway::start().await.expect("Failed to start gateway");
    let (mut stream, _) = connect_async(gateway.ws_url()).await.expect("connect");
    let _ = next_event(&mut stream).await.expect("snapshot event");

    let poem_id = unique_poem_id();
    send_intent(
        &mut stream,
        &ClientIntent::AddReply(verse_core::AddReplyIntent {
            poem_id: poem_id.clone(),
            comment_id: verse_core::EngagementId::new(424_242),
            text: "into the void".to_string(),
        }),
    )
    .await;

    // No broadcast may arrive; prove the connection still works with a like
    send_intent(&mut stream, &ClientIntent::LikePoem(poem_id.clone())).await;

    let event = next_event(&mut stream).await.expect("update event");
    match event {
        ServerEvent::EngagementUpdate(update) => {
            assert_eq!(update.poem_id, poem_id);
            assert_eq!(update.data.likes, 1);
            assert!(
                update.data.comments.is_empty(),
                "the dropped reply left no trace"
            );
        }
        other => panic!("expected engagement_update, got {other:?}"),
    }
}

#[tokio::test]
async fn test_sync_client_reconciles_like() {
    if !check_test_env().await {
        return;
    }

    let gateway = TestGateway::start().await.expect("Failed to start gateway");
    let client = verse_client::SyncClient::connect(&gateway.ws_url(), verse_client::NullView)
        .await
        .expect("sync client connect");

    let poem_id = unique_poem_id();
    assert!(client.like_poem(&poem_id), "first like sends");
    assert!(!client.like_poem(&poem_id), "second like suppressed locally");

    // Wait for the broadcast round-trip to land in the projection
    let mut likes = 0;
    for _ in 0..50 {
        tokio::time::sleep(Duration::from_millis(100)).await;
        likes = client.with_projection(|p| p.likes(&poem_id));
        if likes > 0 {
            break;
        }
    }
    assert_eq!(likes, 1, "projection reconciled from the broadcast");

    client.close().await;
}
