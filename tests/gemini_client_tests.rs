use serde_json::json;
use trip_planner_rs::{GeminiClient, GenerationBackend, PlannerError};

fn reply_body(text: &str) -> String {
    json!({
        "candidates": [{
            "content": {
                "parts": [{ "text": text }]
            }
        }]
    })
    .to_string()
}

#[tokio::test]
async fn test_generate_returns_reply_text_verbatim() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-2.5-pro:generateContent")
        .match_query(mockito::Matcher::UrlEncoded("key".into(), "test-key".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(reply_body("```json\n{\"content\": \"hi\"}\n```"))
        .create_async()
        .await;

    let client = GeminiClient::new("test-key".to_string()).with_base_url(server.url());
    let raw = client.generate("plan a trip").await.unwrap();

    // Raw text comes back exactly as received; repair happens elsewhere
    assert_eq!(raw, "```json\n{\"content\": \"hi\"}\n```");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_error_surfaces_api_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/gemini-2.5-pro:generateContent")
        .match_query(mockito::Matcher::Any)
        .with_status(400)
        .with_body(json!({ "error": { "message": "API key not valid" } }).to_string())
        .create_async()
        .await;

    let client = GeminiClient::new("bad-key".to_string()).with_base_url(server.url());
    let err = client.generate("plan a trip").await.unwrap_err();

    match err {
        PlannerError::Backend(message) => {
            assert!(message.contains("API key not valid"));
        }
        other => panic!("expected Backend error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_payload_with_ok_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/gemini-2.5-pro:generateContent")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(json!({ "error": { "message": "model overloaded" } }).to_string())
        .create_async()
        .await;

    let client = GeminiClient::new("test-key".to_string()).with_base_url(server.url());
    let err = client.generate("plan a trip").await.unwrap_err();
    assert!(err.to_string().contains("model overloaded"));
}

#[tokio::test]
async fn test_missing_candidates_is_backend_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/gemini-2.5-pro:generateContent")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(json!({ "candidates": [] }).to_string())
        .create_async()
        .await;

    let client = GeminiClient::new("test-key".to_string()).with_base_url(server.url());
    let err = client.generate("plan a trip").await.unwrap_err();
    assert!(matches!(err, PlannerError::Backend(_)));
}

#[tokio::test]
async fn test_custom_model_changes_path() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-flash:generateContent")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(reply_body("ok"))
        .create_async()
        .await;

    let client = GeminiClient::new("test-key".to_string())
        .with_base_url(server.url())
        .with_model("gemini-flash");
    let raw = client.generate("plan a trip").await.unwrap();

    assert_eq!(raw, "ok");
    mock.assert_async().await;
}
