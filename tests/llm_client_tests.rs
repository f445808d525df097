use mockito::Matcher;
use serde_json::json;
use summo::ai::{CompletionBackend, LlmClient};
use summo::errors::SummoError;

fn client_for(server: &mockito::ServerGuard, org_id: Option<&str>) -> LlmClient {
    LlmClient::new(
        "sk-test".to_string(),
        org_id.map(str::to_string),
        "gpt-3.5-turbo-instruct".to_string(),
        server.url(),
    )
}

#[tokio::test]
async fn test_complete_sends_fixed_parameters_and_returns_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_header("openai-organization", "org-123")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-3.5-turbo-instruct",
            "prompt": "Alice: hi tl;dr",
            "max_tokens": 60,
            "top_p": 1.0,
            "frequency_penalty": 0.0,
            "presence_penalty": 1.0,
            "temperature": 0.7
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[{"text":"\n- Alice: said hi","index":0}]}"#)
        .create_async()
        .await;

    let client = client_for(&server, Some("org-123"));
    let text = client.complete("Alice: hi tl;dr").await.unwrap();

    assert_eq!(text.as_deref(), Some("\n- Alice: said hi"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_complete_without_choices_is_none() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    let text = client_for(&server, None).complete("prompt").await.unwrap();
    assert!(text.is_none());
}

#[tokio::test]
async fn test_non_success_status_is_classified() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/completions")
        .with_status(429)
        .with_body(r#"{"error":{"message":"Rate limit reached"}}"#)
        .create_async()
        .await;

    let err = client_for(&server, None).complete("prompt").await.unwrap_err();
    match err {
        SummoError::OpenAIStatus { status, reason } => {
            assert_eq!(status, 429);
            assert_eq!(reason, "Too Many Requests");
        }
        other => panic!("Unexpected error type: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_classified() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let err = client_for(&server, None).complete("prompt").await.unwrap_err();
    assert!(matches!(err, SummoError::OpenAIError(_)), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_host_is_http_error() {
    let client = LlmClient::new(
        "sk-test".to_string(),
        None,
        "gpt-3.5-turbo-instruct".to_string(),
        "http://127.0.0.1:1".to_string(),
    );

    let err = client.complete("prompt").await.unwrap_err();
    assert!(matches!(err, SummoError::HttpError(_)), "got {err:?}");
}
