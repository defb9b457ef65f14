use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::ai::{AiChatRequest, AiChatResponse};
use crate::http::request::RequestId;
use crate::http::response::ApiError;
use crate::http::server::AppState;

/// `POST /ai/chat`
pub async fn ai_chat(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<AiChatRequest>, JsonRejection>,
) -> Result<Json<AiChatResponse>, ApiError> {
    let Json(request) = payload?;
    let response = state.ai.chat(&request, request_id.as_str()).await?;
    Ok(Json(response))
}
