//! End-to-end chat client tests against an in-process Ollama stand-in.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use ai_llm_service::error_handler::{
    COMMUNICATION_ERROR_REPLY, EMPTY_CONTENT_REPLY, NO_VALID_RESPONSE_REPLY,
};
use ai_llm_service::{
    ChatCompletionClient, ChatError, ChatMessage, ChatModelConfig, DocumentError,
    DocumentSource, HealthService, PdfDocument, render_reply,
};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};

type Responder = fn(&Value) -> (StatusCode, String);

#[derive(Clone)]
struct MockState {
    seen: Arc<Mutex<Vec<Value>>>,
    respond: Responder,
}

async fn chat_handler(State(st): State<MockState>, Json(body): Json<Value>) -> (StatusCode, String) {
    let out = (st.respond)(&body);
    st.seen.lock().unwrap().push(body);
    out
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Starts a fake `/api/chat` and returns its base URL plus the recorded bodies.
async fn spawn_ollama(respond: Responder) -> (String, Arc<Mutex<Vec<Value>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/api/chat", post(chat_handler))
        .with_state(MockState {
            seen: seen.clone(),
            respond,
        });
    (serve(app).await, seen)
}

fn echo_last(body: &Value) -> (StatusCode, String) {
    let last = body["messages"]
        .as_array()
        .and_then(|m| m.last())
        .and_then(|m| m["content"].as_str())
        .unwrap_or_default();
    let reply = json!({
        "model": body["model"],
        "message": { "role": "assistant", "content": last },
        "done": true
    });
    (StatusCode::OK, reply.to_string())
}

fn internal_error(_: &Value) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, "model crashed".into())
}

fn empty_message(_: &Value) -> (StatusCode, String) {
    (StatusCode::OK, r#"{"message":{}}"#.into())
}

fn empty_content(_: &Value) -> (StatusCode, String) {
    (StatusCode::OK, r#"{"message":{"role":"assistant","content":""}}"#.into())
}

fn not_json(_: &Value) -> (StatusCode, String) {
    (StatusCode::OK, "definitely not json".into())
}

struct FixedText(&'static str);

impl DocumentSource for FixedText {
    async fn load_text(&self) -> Result<String, DocumentError> {
        Ok(self.0.to_string())
    }
}

fn client_for(base: &str) -> ChatCompletionClient<PdfDocument> {
    let cfg = ChatModelConfig::new(base, "llama2:latest");
    ChatCompletionClient::new(cfg, PdfDocument::new("Documents/career-profiles.pdf")).unwrap()
}

#[tokio::test]
async fn simple_complete_echo_round_trip() {
    let (base, seen) = spawn_ollama(echo_last).await;
    let client = client_for(&base);

    let out = client.simple_complete("hello").await.unwrap();
    assert_eq!(out, "hello");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1, "exactly one POST");
    assert_eq!(
        seen[0],
        json!({
            "model": "llama2:latest",
            "stream": false,
            "messages": [{ "role": "user", "content": "hello" }]
        })
    );
}

#[tokio::test]
async fn history_is_sent_in_order_with_new_message_last() {
    let (base, seen) = spawn_ollama(echo_last).await;
    let client = client_for(&base);

    let history = vec![
        ChatMessage::user("I enjoy biology"),
        ChatMessage::assistant("Have you considered nursing?"),
        ChatMessage::user("Maybe, what else?"),
        ChatMessage::assistant("Lab technician."),
    ];
    let out = client
        .complete_with_history("Something outdoors?", &history)
        .await
        .unwrap();
    assert_eq!(out, "Something outdoors?");

    let seen = seen.lock().unwrap();
    let messages = seen[0]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), history.len() + 1);

    let roles: Vec<_> = messages.iter().map(|m| m["role"].as_str().unwrap()).collect();
    assert_eq!(roles, ["user", "assistant", "user", "assistant", "user"]);
    assert_eq!(messages[1]["content"], "Have you considered nursing?");
    assert_eq!(messages[4]["content"], "Something outdoors?");
}

#[tokio::test]
async fn server_error_maps_to_communication_placeholder() {
    let (base, _) = spawn_ollama(internal_error).await;
    let client = client_for(&base);

    let result = client.simple_complete("hi").await;
    match &result {
        Err(ChatError::HttpStatus { status, snippet, .. }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(snippet, "model crashed");
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(render_reply(result), COMMUNICATION_ERROR_REPLY);
}

#[tokio::test]
async fn missing_content_maps_to_no_valid_response() {
    let (base, _) = spawn_ollama(empty_message).await;
    let client = client_for(&base);

    let result = client.complete_with_history("hi", &[]).await;
    assert!(matches!(result, Err(ChatError::NoValidResponse)));
    assert_eq!(render_reply(result), NO_VALID_RESPONSE_REPLY);
}

#[tokio::test]
async fn empty_content_maps_to_no_response() {
    let (base, _) = spawn_ollama(empty_content).await;
    let client = client_for(&base);

    assert_eq!(
        render_reply(client.simple_complete("hi").await),
        EMPTY_CONTENT_REPLY
    );
}

#[tokio::test]
async fn malformed_json_is_rendered_as_error_string() {
    let (base, _) = spawn_ollama(not_json).await;
    let client = client_for(&base);

    let result = client.simple_complete("hi").await;
    assert!(matches!(result, Err(ChatError::Decode(_))));
    assert!(render_reply(result).starts_with("Error: "));
}

#[tokio::test]
async fn missing_pdf_renders_error_and_sends_nothing() {
    let (base, seen) = spawn_ollama(echo_last).await;
    let cfg = ChatModelConfig::new(&base, "llama2:latest");
    let client =
        ChatCompletionClient::new(cfg, PdfDocument::new("Documents/no-such-profile.pdf")).unwrap();

    let result = client.complete_with_document_context("I like math").await;
    assert!(matches!(result, Err(ChatError::Document(DocumentError::Io { .. }))));

    let reply = render_reply(result);
    assert!(reply.starts_with("Error: "), "{reply}");
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn document_context_is_inlined_into_one_user_message() {
    let (base, seen) = spawn_ollama(echo_last).await;
    let cfg = ChatModelConfig::new(&base, "llama2:latest");
    let doc = "Data Analyst\nTurns numbers into decisions.\n\nCarpenter\nBuilds with wood.\n";
    let client = ChatCompletionClient::new(cfg, FixedText(doc)).unwrap();

    let out = client
        .complete_with_document_context("I like spreadsheets")
        .await
        .unwrap();

    let seen = seen.lock().unwrap();
    let messages = seen[0]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["role"], "user");

    let content = messages[0]["content"].as_str().unwrap();
    assert_eq!(out, content);
    assert!(content.starts_with("You are a career guidance assistant."));
    assert!(content.contains(doc));
    assert!(content.ends_with("User's interests and skills: I like spreadsheets"));
}

#[tokio::test]
async fn pdf_text_reaches_the_prompt() {
    let (base, seen) = spawn_ollama(echo_last).await;
    let cfg = ChatModelConfig::new(&base, "llama2:latest");
    let pdf = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/career-profile.pdf");
    let client = ChatCompletionClient::new(cfg, PdfDocument::new(pdf)).unwrap();

    let out = client
        .complete_with_document_context("I like helping people")
        .await
        .unwrap();

    let seen = seen.lock().unwrap();
    let content = seen[0]["messages"][0]["content"].as_str().unwrap();
    assert_eq!(out, content);
    assert!(content.contains("Nurse cares for patients"), "{content}");
    assert!(content.ends_with("User's interests and skills: I like helping people"));
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    // Grab a free port, then close it so nothing is listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{addr}"));
    let result = client.simple_complete("hi").await;
    assert!(matches!(result, Err(ChatError::Transport(_))));
    assert!(render_reply(result).starts_with("Error: "));
}

#[tokio::test]
async fn slow_endpoint_hits_timeout() {
    let app = Router::new().route(
        "/api/chat",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            (StatusCode::OK, r#"{"message":{"content":"late"}}"#)
        }),
    );
    let base = serve(app).await;

    let mut cfg = ChatModelConfig::new(&base, "llama2:latest");
    cfg.timeout_secs = 1;
    let client = ChatCompletionClient::new(cfg, PdfDocument::new("x.pdf")).unwrap();

    match client.simple_complete("hi").await {
        Err(ChatError::Transport(e)) => assert!(e.is_timeout(), "{e}"),
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn health_reports_model_presence() {
    let app = Router::new().route(
        "/api/tags",
        get(|| async {
            Json(json!({ "models": [{ "name": "llama2:latest" }, { "name": "mistral:7b" }] }))
        }),
    );
    let base = serve(app).await;

    let health = HealthService::new(ChatModelConfig::new(&base, "llama2:latest")).unwrap();
    let status = health.check().await;
    assert!(status.ok, "{}", status.message);

    let health = HealthService::new(ChatModelConfig::new(&base, "phi3:mini")).unwrap();
    let status = health.check().await;
    assert!(!status.ok);
    assert!(status.message.contains("model not found"));
}

#[tokio::test]
async fn health_never_fails_on_dead_endpoint() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let health =
        HealthService::new(ChatModelConfig::new(format!("http://{addr}"), "llama2:latest")).unwrap();
    let status = health.check().await;
    assert!(!status.ok);
    assert!(!status.message.is_empty());
}
