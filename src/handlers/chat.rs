use crate::{services::chat::ChatChunk, AppState};
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::post,
    Json, Router,
};
use futures::stream::{self, Stream};
use serde::Deserialize;
use std::convert::Infallible;
use tokio::sync::mpsc;
use tracing::info;

pub fn chat_routes() -> Router<AppState> {
    Router::new().route("/", post(chat_message))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest {
    message: String,
    branch_id: i32,
}

/// Streams the chat reply as server-sent events: `{"content": ...}` chunks
/// terminated by `{"done": true}`. This endpoint never errors; upstream
/// failures degrade to the fallback responder inside the service.
async fn chat_message(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!(branch_id = request.branch_id, "Chat message received");

    let (tx, rx) = mpsc::channel::<ChatChunk>(32);
    let chat = state.chat.clone();
    tokio::spawn(async move {
        chat.stream_reply(&request.message, request.branch_id, tx)
            .await;
    });

    let stream = stream::unfold(rx, |mut rx| async move {
        let chunk = rx.recv().await?;
        let payload = match chunk {
            ChatChunk::Content(content) => serde_json::json!({ "content": content }),
            ChatChunk::Done => serde_json::json!({ "done": true }),
        };
        Some((Ok(Event::default().data(payload.to_string())), rx))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
