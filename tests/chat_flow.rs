//! End-to-end: wiremock chat function → ChatClient → Conversation.

use storechat_client::ChatClient;
use storechat_conversation::Conversation;
use storechat_types::{ChatMessage, Role};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sse(contents: &[&str]) -> ResponseTemplate {
    let mut body = String::new();
    for content in contents {
        let chunk = serde_json::json!({"choices": [{"index": 0, "delta": {"content": content}}]});
        body.push_str(&format!("data: {chunk}\n\n"));
    }
    body.push_str("data: [DONE]\n\n");
    ResponseTemplate::new(200).set_body_raw(body, "text/event-stream")
}

#[tokio::test]
async fn streamed_reply_lands_in_conversation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/functions/v1/chat"))
        .respond_with(sse(&["Returns are ", "free within ", "30 days."]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ChatClient::new(mock_server.uri(), "pk");
    let mut conversation = Conversation::new();
    conversation
        .send_message(&client, "What is your return policy?")
        .await;

    assert_eq!(
        conversation.messages(),
        &[
            ChatMessage::user("What is your return policy?"),
            ChatMessage::assistant("Returns are free within 30 days."),
        ]
    );
    assert!(!conversation.is_loading());
    assert!(conversation.error().is_none());
}

#[tokio::test]
async fn rejection_is_stored_as_conversation_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/functions/v1/chat"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": "Rate limits exceeded, please try again later."
            })),
        )
        .mount(&mock_server)
        .await;

    let client = ChatClient::new(mock_server.uri(), "pk");
    let mut conversation = Conversation::new();
    conversation.send_message(&client, "hello").await;

    assert_eq!(
        conversation.error(),
        Some("Rate limits exceeded, please try again later.")
    );
    assert!(!conversation.is_loading());
    assert_eq!(conversation.messages().len(), 1);
}

#[tokio::test]
async fn unreachable_backend_reports_send_failure() {
    let client = ChatClient::new("http://127.0.0.1:1", "pk");
    let mut conversation = Conversation::new();
    conversation.send_message(&client, "anyone there?").await;

    assert_eq!(conversation.error(), Some("Failed to send message"));
    assert!(!conversation.is_loading());
}

#[tokio::test]
async fn second_turn_sends_previous_reply() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/functions/v1/chat"))
        .respond_with(sse(&["Yes."]))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = ChatClient::new(mock_server.uri(), "pk");
    let mut conversation = Conversation::new();
    conversation.send_message(&client, "Is it in stock?").await;
    conversation.send_message(&client, "In blue?").await;

    let requests = mock_server.received_requests().await.unwrap();
    let second: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(
        second,
        serde_json::json!({"messages": [
            {"role": "user", "content": "Is it in stock?"},
            {"role": "assistant", "content": "Yes."},
            {"role": "user", "content": "In blue?"}
        ]})
    );

    let roles: Vec<Role> = conversation.messages().iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User, Role::Assistant]);
}
