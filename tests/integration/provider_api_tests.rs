/*!
 * Integration tests for the MiniMax client against a local mock server
 */

use anyhow::Result;
use mockito::{Matcher, Server};
use serde_json::json;

use blogcast::app_config::{Config, TtsConfig};
use blogcast::errors::ProviderError;
use blogcast::providers::minimax::MiniMax;
use blogcast::providers::Synthesizer;
use blogcast::Controller;
use crate::common;

const PATH: &str = "/v1/t2a_v2";

fn settings_for(server_url: &str) -> TtsConfig {
    TtsConfig {
        endpoint: format!("{}{}", server_url, PATH),
        timeout_secs: 5,
        ..TtsConfig::default()
    }
}

#[tokio::test]
async fn test_synthesize_withValidResponse_shouldSendSettingsAndDecodeAudio() -> Result<()> {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_header("authorization", "Bearer test-key")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "model": "speech-2.8-hd",
            "text": "Hello world",
            "stream": false,
            "language_boost": "auto",
            "voice_setting": { "voice_id": "English_expressive_narrator", "pitch": 0 },
            "audio_setting": { "sample_rate": 32000, "bitrate": 128000, "format": "mp3", "channel": 1 }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(common::audio_response_body(b"ID3 fake mp3"))
        .create_async()
        .await;

    let client = MiniMax::new(settings_for(&server.url()));
    let audio = client.synthesize("Hello world", "test-key").await?;

    assert_eq!(audio, b"ID3 fake mp3".to_vec());
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_synthesize_withUnauthorizedStatus_shouldReturnAuthError() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(401)
        .with_body(r#"{"error": "invalid api key"}"#)
        .create_async()
        .await;

    let client = MiniMax::new(settings_for(&server.url()));
    match client.synthesize("Hello", "bad-key").await {
        Err(ProviderError::AuthenticationError(message)) => assert!(message.contains("invalid api key")),
        other => panic!("Expected authentication error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_synthesize_withServerError_shouldReturnApiError() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(503)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let client = MiniMax::new(settings_for(&server.url()));
    match client.synthesize("Hello", "key").await {
        Err(ProviderError::ApiError { status_code, message }) => {
            assert_eq!(status_code, 503);
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("Expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_synthesize_withoutAudioField_shouldReturnParseError() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(r#"{"data": null, "base_resp": {"status_code": 0, "status_msg": "success"}}"#)
        .create_async()
        .await;

    let client = MiniMax::new(settings_for(&server.url()));
    match client.synthesize("Hello", "key").await {
        Err(ProviderError::ParseError(message)) => assert!(message.contains("No audio data in response")),
        other => panic!("Expected parse error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_synthesize_withServiceAuthStatus_shouldReturnAuthError() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(r#"{"base_resp": {"status_code": 1004, "status_msg": "authorization failed"}}"#)
        .create_async()
        .await;

    let client = MiniMax::new(settings_for(&server.url()));
    let result = client.synthesize("Hello", "key").await;
    assert!(matches!(result, Err(ProviderError::AuthenticationError(_))), "got {:?}", result);
}

#[tokio::test]
async fn test_synthesize_withUnreachableEndpoint_shouldReturnRequestFailed() {
    let settings = TtsConfig {
        endpoint: "http://127.0.0.1:1/v1/t2a_v2".to_string(),
        timeout_secs: 2,
        ..TtsConfig::default()
    };

    let result = MiniMax::new(settings).synthesize("Hello", "key").await;
    assert!(matches!(result, Err(ProviderError::RequestFailed(_))), "got {:?}", result);
}

#[tokio::test]
async fn test_controller_withMiniMaxClient_shouldWriteDecodedAudio() -> Result<()> {
    let audio = vec![0xFFu8; 4096];
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_body(Matcher::PartialJson(json!({ "text": common::FIXTURE_NARRATION })))
        .with_status(200)
        .with_body(common::audio_response_body(&audio))
        .expect(1)
        .create_async()
        .await;

    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_post(temp_dir.path())?;
    let output = temp_dir.path().join("narration.mp3");

    let mut config = Config::default();
    config.tts = settings_for(&server.url());
    let client = MiniMax::new(config.tts.clone());

    let report = Controller::with_config(config)
        .run(&input, &output, Some("key"), &client)
        .await?;

    mock.assert_async().await;
    assert_eq!(std::fs::read(&output)?, audio);
    assert_eq!(report.bytes_written, 4096);
    assert!(report.undersized);
    Ok(())
}
