use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;

use crate::{
    error::AppError,
    state::State as ServerState,
    thoughts::{NewThought, ThoughtResponse},
};

#[derive(Serialize)]
pub struct LikeResponse {
    pub success: bool,
    pub response: String,
}

pub async fn hello_handler() -> impl IntoResponse {
    (StatusCode::OK, "Hello Technigo API!")
}

pub async fn list_thoughts_handler(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<ThoughtResponse>>, AppError> {
    let thoughts = state.thoughts.list_recent().await?;

    Ok(Json(thoughts.into_iter().map(Into::into).collect()))
}

pub async fn create_thought_handler(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<NewThought>,
) -> Result<Json<ThoughtResponse>, AppError> {
    let thought = state.thoughts.create(&payload.message).await?;

    Ok(Json(thought.into()))
}

pub async fn like_thought_handler(
    State(state): State<Arc<ServerState>>,
    Path(thought_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let thought = state.thoughts.like(&thought_id).await?;

    let body = LikeResponse {
        success: true,
        response: format!("Happy thought: {} has been updated", thought.message),
    };

    Ok((StatusCode::CREATED, Json(body)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_confirmation_references_message() {
        let body = LikeResponse {
            success: true,
            response: format!("Happy thought: {} has been updated", "Hello world"),
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(
            value["response"],
            "Happy thought: Hello world has been updated"
        );
    }
}
