mod common;

use common::TestApp;
use portfolio_service::services::providers::Role;
use portfolio_service::services::{ProviderError, ScriptedProvider};
use reqwest::StatusCode;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn chat_without_credentials_returns_500() {
    let app = TestApp::spawn_unconfigured().await;

    for question in ["What does Mwenda build?", ""] {
        let response = app.post_chat(json!({ "question": question })).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        assert_eq!(body["error"], "Configuration error");
        assert_eq!(
            body["details"],
            "Chatbot service is currently unavailable due to a configuration error."
        );
    }

    app.cleanup().await;
}

#[tokio::test]
async fn chat_answers_and_echoes_session_id() {
    let provider = Arc::new(ScriptedProvider::replying([
        "Mwenda works mostly with React and FastAPI.",
    ]));
    let app = TestApp::spawn_with(provider.clone()).await;

    let response = app
        .post_chat(json!({
            "question": "Which frameworks does Mwenda use?",
            "session_id": "session_1700000000"
        }))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["answer"], "Mwenda works mostly with React and FastAPI.");
    assert_eq!(body["session_id"], "session_1700000000");

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.params.max_tokens, 250);
    assert_eq!(request.params.temperature, 0.5);
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, Role::System);
    assert!(request.messages[0]
        .content
        .contains("You are a helpful AI assistant for Mwenda_Dipark Solutions."));
    assert!(request.messages[0].content.contains("TaskFlow Pro Manager"));
    assert_eq!(request.messages[1].role, Role::User);
    assert_eq!(request.messages[1].content, "Which frameworks does Mwenda use?");

    app.cleanup().await;
}

#[tokio::test]
async fn chat_without_session_id_returns_null_session() {
    let provider = Arc::new(ScriptedProvider::replying(["Hello!"]));
    let app = TestApp::spawn_with(provider).await;

    let response = app.post_chat(json!({ "question": "Hi" })).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["answer"], "Hello!");
    assert!(body["session_id"].is_null());

    app.cleanup().await;
}

#[tokio::test]
async fn empty_model_answer_is_replaced_with_apology() {
    let provider = Arc::new(ScriptedProvider::new());
    provider.push_empty().push_reply("   ");
    let app = TestApp::spawn_with(provider).await;

    for _ in 0..2 {
        let response = app.post_chat(json!({ "question": "Anything?" })).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        assert_eq!(
            body["answer"],
            "I'm sorry, I couldn't generate a response at this moment."
        );
    }

    app.cleanup().await;
}

#[tokio::test]
async fn upstream_failure_returns_503_with_cause() {
    let provider = Arc::new(ScriptedProvider::new());
    provider.push_error(ProviderError::NetworkError("operation timed out".to_string()));
    let app = TestApp::spawn_with(provider.clone()).await;

    let response = app.post_chat(json!({ "question": "Are you there?" })).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let details = body["details"].as_str().expect("details should be a string");
    assert!(details.starts_with("Error processing chat message:"));
    assert!(details.contains("operation timed out"));

    // Failed calls are not retried
    assert_eq!(provider.requests().len(), 1);

    app.cleanup().await;
}

#[tokio::test]
async fn missing_question_is_rejected() {
    let provider = Arc::new(ScriptedProvider::new());
    let app = TestApp::spawn_with(provider.clone()).await;

    let response = app.post_chat(json!({ "session_id": "abc" })).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(provider.requests().is_empty());

    app.cleanup().await;
}

#[tokio::test]
async fn chat_is_served_under_routes_prefix() {
    let provider = Arc::new(ScriptedProvider::replying(["Yes."]));
    let app = TestApp::spawn_with(provider).await;

    let response = app
        .client
        .post(app.url("/routes/chatbot/chat"))
        .json(&json!({ "question": "Available for hire?" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["answer"], "Yes.");

    app.cleanup().await;
}
