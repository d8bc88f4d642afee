// tests/chat_api.rs


use axum::http::StatusCode;
use edumentor::llm::{LlmError, Role};
use serde_json::json;
use test_helpers::{ScriptedProvider, create_test_app, create_uninitialized_app, send};

#[tokio::test]
async fn test_root_is_alive_without_tutor() {
    let app = create_uninitialized_app();
    let (status, _, body) = send(&app, "GET", "/", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("running"));
}

#[tokio::test]
async fn test_uninitialized_tutor_returns_500() {
    let app = create_uninitialized_app();

    let (status, _, body) = send(&app, "POST", "/chat", None, Some(json!({"message": "hi"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["message"],
        "Chatbot not initialized. Please check server logs."
    );

    let (status, _, _) = send(&app, "GET", "/achievements", None, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_blank_chat_asks_for_input() {
    let provider = ScriptedProvider::new(vec![]);
    let app = create_test_app(provider.clone());

    let (status, _, body) = send(&app, "POST", "/chat", Some("s1"), Some(json!({"message": "  "}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "Please ask something.");
    assert!(provider.requests().is_empty());
}

#[tokio::test]
async fn test_chat_turn_classifies_then_answers() {
    let provider = ScriptedProvider::new(vec![
        Ok("EXPLANATION".to_string()),
        Ok("Photosynthesis turns light into sugar.".to_string()),
    ]);
    let app = create_test_app(provider.clone());

    let (status, headers, body) = send(
        &app,
        "POST",
        "/chat",
        Some("s1"),
        Some(json!({"message": "What is photosynthesis?"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "Photosynthesis turns light into sugar.");
    assert_eq!(headers["x-session-id"], "s1");

    let requests = provider.requests();
    assert_eq!(requests.len(), 2);
    let outbound = &requests[1];
    assert_eq!(outbound[0].role, Role::System);
    assert!(outbound[0].content.contains("CURRENT CONTEXT:"));
    assert_eq!(outbound.last().unwrap().role, Role::User);
    assert_eq!(outbound.last().unwrap().content, "What is photosynthesis?");
}

#[tokio::test]
async fn test_missing_session_header_is_issued() {
    let app = create_test_app(ScriptedProvider::new(vec![]));

    let (_, headers, _) = send(&app, "POST", "/chat", None, Some(json!({"message": "hello"}))).await;
    let issued = headers["x-session-id"].to_str().unwrap().to_string();
    assert_eq!(issued.len(), 36);
}

#[tokio::test]
async fn test_sessions_do_not_share_history() {
    let provider = ScriptedProvider::new(vec![]);
    let app = create_test_app(provider.clone());

    send(&app, "POST", "/chat", Some("alice"), Some(json!({"message": "first"}))).await;
    send(&app, "POST", "/chat", Some("bob"), Some(json!({"message": "second"}))).await;

    let requests = provider.requests();
    // bob's chat call: system + his own user turn only
    let bob_chat = &requests[3];
    assert_eq!(bob_chat.len(), 2);
    assert!(bob_chat.iter().all(|m| m.content != "first"));
}

#[tokio::test]
async fn test_subject_command_short_circuits() {
    let provider = ScriptedProvider::new(vec![]);
    let app = create_test_app(provider.clone());

    let (_, _, body) = send(
        &app,
        "POST",
        "/chat",
        Some("s1"),
        Some(json!({"message": "/subject Math"})),
    )
    .await;
    assert_eq!(body["reply"], "Great! Subject set to math.");

    let (_, _, body) = send(
        &app,
        "POST",
        "/chat",
        Some("s1"),
        Some(json!({"message": "/subject chemistry"})),
    )
    .await;
    assert_eq!(
        body["reply"],
        "Invalid subject. Use math, science, history, or languages."
    );
    assert!(provider.requests().is_empty());

    send(&app, "POST", "/chat", Some("s1"), Some(json!({"message": "help"}))).await;
    let requests = provider.requests();
    assert!(requests[1][0].content.contains("- Current Subject: math"));
}

#[tokio::test]
async fn test_rate_limit_degrades_chat_reply() {
    let provider = ScriptedProvider::new(vec![
        Ok("DEFAULT".to_string()),
        Err(LlmError::RateLimited),
    ]);
    let app = create_test_app(provider);

    let (status, _, body) = send(&app, "POST", "/chat", Some("s1"), Some(json!({"message": "hi"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["reply"].as_str().unwrap().contains("Too many requests"));
}

#[tokio::test]
async fn test_generate_normalizes_history() {
    let provider = ScriptedProvider::new(vec![Ok("Sure.".to_string())]);
    let app = create_test_app(provider.clone());

    let (status, _, body) = send(
        &app,
        "POST",
        "/generate",
        None,
        Some(json!({
            "prompt": "explain fractions",
            "history": [
                {"role": "user", "content": "hi"},
                {"role": "model", "content": "hello"},
                {"role": "assistant", "content": "how can I help?"}
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Sure.");
    assert_eq!(body["history"].as_array().unwrap().len(), 5);
    assert_eq!(body["history"][4]["role"], "assistant");

    let requests = provider.requests();
    let outbound = &requests[0];
    assert_eq!(outbound.len(), 3);
    assert_eq!(outbound[1].content, "hello how can I help?");
    assert_eq!(outbound[2].content, "explain fractions");
}

#[tokio::test]
async fn test_generate_rejects_blank_prompt() {
    let provider = ScriptedProvider::new(vec![]);
    let app = create_test_app(provider.clone());

    let (status, _, body) = send(&app, "POST", "/generate", None, Some(json!({"prompt": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Prompt is required and cannot be empty.");
    assert!(provider.requests().is_empty());
}
