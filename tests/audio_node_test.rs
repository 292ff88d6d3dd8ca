//! End-to-end tests for the audio node
//!
//! Drive [`AudioNode`] with the real [`MediaFetcher`] against temporary files
//! and a local HTTP server, and collect results through [`ChannelSink`].

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use chatbot_audio::media::FetchError;
use chatbot_audio::{
    AudioNode, AudioNodeConfig, AudioNodeError, ChannelSink, FetchConfig, InboundEvent,
    MediaFetcher, NodeSink, Payload,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn node(config: AudioNodeConfig) -> Arc<AudioNode> {
    Arc::new(AudioNode::new(config, Arc::new(MediaFetcher::new().unwrap())))
}

// ==================== local files ====================

#[tokio::test]
async fn test_local_mp3_to_slack() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("Morning Briefing.mp3");
    std::fs::write(&file, b"\xff\xfbaudio-frames").unwrap();

    let event = InboundEvent::new(
        "slack",
        "C024BE91L",
        Payload::Text(file.display().to_string()),
    )
    .with_message_id("1700000000.000100");

    let outbound = node(AudioNodeConfig::named("news"))
        .process(event)
        .await
        .unwrap()
        .expect("slack carries audio");

    assert_eq!(
        outbound.payload.content,
        Bytes::from_static(b"\xff\xfbaudio-frames")
    );
    assert_eq!(outbound.payload.filename, "Morning Briefing.mp3");
    assert_eq!(outbound.payload.chat_id, Some(json!("C024BE91L")));
    assert_eq!(outbound.payload.message_id, Some(json!("1700000000.000100")));
    assert!(!outbound.payload.inbound);

    let wire = serde_json::to_value(&outbound).unwrap();
    assert_eq!(wire["payload"]["type"], "audio");
    assert_eq!(wire["payload"]["content"]["type"], "Buffer");
    assert_eq!(wire["originalMessage"]["transport"], "slack");
}

#[tokio::test]
async fn test_missing_local_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("gone.mp3");
    let event = InboundEvent::new("telegram", 42, Payload::Text(file.display().to_string()));

    let err = node(AudioNodeConfig::default())
        .process(event)
        .await
        .unwrap_err();
    assert!(matches!(err, AudioNodeError::Fetch(FetchError::NotFound(_))));
}

#[tokio::test]
async fn test_config_audio_path_overrides_payload() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("jingle.mp3");
    std::fs::write(&file, b"jingle").unwrap();

    let config = AudioNodeConfig::named("bot")
        .with_audio(file.display().to_string())
        .with_caption("Our jingle");
    let event = InboundEvent::new("facebook", "u-7", Payload::Text("ignored text".into()));

    let outbound = node(config).process(event).await.unwrap().unwrap();
    assert_eq!(outbound.payload.content, Bytes::from_static(b"jingle"));
    assert_eq!(outbound.payload.caption.as_deref(), Some("Our jingle"));
    assert_eq!(outbound.payload.filename, "jingle.mp3");
}

#[tokio::test]
async fn test_configured_path_filename_sends_base_name_only() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("show.mp3");
    std::fs::write(&file, b"show").unwrap();

    let config = AudioNodeConfig::named("bot").with_filename(file.display().to_string());
    let event = InboundEvent::new("telegram", 42, Payload::Empty);

    let outbound = node(config).process(event).await.unwrap().unwrap();
    assert_eq!(outbound.payload.content, Bytes::from_static(b"show"));
    assert_eq!(outbound.payload.filename, "show.mp3");
}

// ==================== buffers ====================

#[tokio::test]
async fn test_buffer_without_any_name() {
    let event = InboundEvent::new(
        "telegram",
        42,
        Payload::Buffer(Bytes::from_static(b"raw-bytes")),
    );

    let outbound = node(AudioNodeConfig::named(""))
        .process(event)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(outbound.payload.filename, "");
    assert_eq!(outbound.payload.content, Bytes::from_static(b"raw-bytes"));
}

#[tokio::test]
async fn test_buffer_from_node_style_json() {
    let event: InboundEvent = serde_json::from_value(json!({
        "payload": { "type": "Buffer", "data": [1, 2, 3] },
        "filename": "/var/spool/voice note.mp3",
        "originalMessage": { "transport": "slack", "chatId": "D1" }
    }))
    .unwrap();

    let outbound = node(AudioNodeConfig::named("bot"))
        .process(event)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(outbound.payload.content, Bytes::from_static(&[1, 2, 3]));
    assert_eq!(outbound.payload.filename, "voice note.mp3");
}

// ==================== URLs ====================

#[tokio::test]
async fn test_url_download() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/podcast/episode-12"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "audio/mpeg")
                .set_body_bytes(b"mp3-bytes".to_vec()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let event = InboundEvent::new(
        "telegram",
        42,
        Payload::Text(format!("{}/podcast/episode-12", server.uri())),
    );

    let outbound = node(AudioNodeConfig::named("Podcast"))
        .process(event)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(outbound.payload.content, Bytes::from_static(b"mp3-bytes"));
    assert_eq!(outbound.payload.filename, "Podcast");
}

#[tokio::test]
async fn test_url_with_unsupported_format() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/clip"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "audio/ogg")
                .set_body_bytes(b"ogg".to_vec()),
        )
        .mount(&server)
        .await;

    let event = InboundEvent::new("facebook", "u1", Payload::Text(format!("{}/clip", server.uri())));

    let err = node(AudioNodeConfig::default())
        .process(event)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unsupported file format for audio node, allowed formats: .mp3"
    );
}

#[tokio::test]
async fn test_url_too_large() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 2048]))
        .mount(&server)
        .await;

    let fetcher = MediaFetcher::with_config(FetchConfig {
        max_size: 1024,
        ..Default::default()
    })
    .unwrap();
    let node = AudioNode::new(AudioNodeConfig::default(), Arc::new(fetcher));
    let event = InboundEvent::new("telegram", 1, Payload::Text(format!("{}/big.mp3", server.uri())));

    let err = node.process(event).await.unwrap_err();
    assert!(matches!(
        err,
        AudioNodeError::Fetch(FetchError::TooLarge { limit: 1024, .. })
    ));
}

// ==================== sink delivery ====================

#[tokio::test]
async fn test_handle_input_delivers_concurrently() {
    let dir = tempfile::tempdir().unwrap();
    let node = node(AudioNodeConfig::named("bot"));
    let (sink, mut outbound_rx, mut error_rx) = ChannelSink::channel(16);
    let sink: Arc<dyn NodeSink> = Arc::new(sink);

    let mut handles = Vec::new();
    for i in 0..5 {
        let file = dir.path().join(format!("track-{i}.mp3"));
        std::fs::write(&file, format!("track {i}")).unwrap();
        let event = InboundEvent::new("slack", format!("C{i}"), Payload::Text(file.display().to_string()));
        handles.push(node.handle_input(event, Arc::clone(&sink)));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let mut names = Vec::new();
    for _ in 0..5 {
        let outbound = outbound_rx.recv().await.unwrap();
        names.push(outbound.payload.filename);
    }
    names.sort();
    assert_eq!(
        names,
        (0..5).map(|i| format!("track-{i}.mp3")).collect::<Vec<_>>()
    );
    assert!(error_rx.try_recv().is_err());
}

#[tokio::test]
async fn test_handle_input_reports_errors() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("memo.wav");
    std::fs::write(&file, b"RIFF").unwrap();

    let node = node(AudioNodeConfig::default());
    let (sink, mut outbound_rx, mut error_rx) = ChannelSink::channel(4);
    let event = InboundEvent::new("telegram", 9, Payload::Text(file.display().to_string()));

    node.handle_input(event, Arc::new(sink)).await.unwrap();

    let err = tokio::time::timeout(Duration::from_secs(1), error_rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        err,
        AudioNodeError::UnsupportedFormat {
            allowed: ".mp3".into()
        }
    );
    assert!(outbound_rx.try_recv().is_err());
}

#[tokio::test]
async fn test_handle_input_silent_halt() {
    let node = node(AudioNodeConfig::default());
    let (sink, mut outbound_rx, mut error_rx) = ChannelSink::channel(4);
    let event = InboundEvent::new("irc", "#music", Payload::Text("/tmp/a.mp3".into()));

    node.handle_input(event, Arc::new(sink)).await.unwrap();

    assert!(outbound_rx.try_recv().is_err());
    assert!(error_rx.try_recv().is_err());
}
