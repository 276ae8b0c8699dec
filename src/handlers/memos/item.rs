use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;

use crate::database::memos;
use crate::database::models::Memo;
use crate::error::ApiError;
use crate::handlers::memos::utils::{parse_memo_id, MemoPayload};
use crate::middleware::SessionUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// GET /api/memos/:id - fetch one memo owned by the caller.
///
/// A memo owned by someone else 404s exactly like a memo that does not
/// exist; the response never distinguishes the two.
pub async fn memo_get(
    State(state): State<AppState>,
    Extension(session_user): Extension<SessionUser>,
    Path(id): Path<String>,
) -> Result<Json<Memo>, ApiError> {
    let id = parse_memo_id(&id)?;

    let memo = memos::find_owned(&state.pool, id, session_user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("memo not found"))?;

    Ok(Json(memo))
}

/// PUT /api/memos/:id - overwrite title and content.
pub async fn memo_put(
    State(state): State<AppState>,
    Extension(session_user): Extension<SessionUser>,
    Path(id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<MemoPayload>, ApiError>,
) -> Result<Json<Memo>, ApiError> {
    payload.validate()?;
    let id = parse_memo_id(&id)?;

    let memo = memos::update_owned(
        &state.pool,
        id,
        session_user.user_id,
        &payload.title,
        &payload.content,
    )
    .await?
    .ok_or_else(|| ApiError::not_found("memo not found"))?;

    tracing::debug!(memo_id = %memo.id, "memo updated");

    Ok(Json(memo))
}

/// DELETE /api/memos/:id - remove one memo owned by the caller.
pub async fn memo_delete(
    State(state): State<AppState>,
    Extension(session_user): Extension<SessionUser>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_memo_id(&id)?;

    let deleted = memos::delete_owned(&state.pool, id, session_user.user_id).await?;
    if !deleted {
        return Err(ApiError::not_found("memo not found"));
    }

    tracing::debug!(memo_id = %id, "memo deleted");

    Ok(Json(DeleteResponse {
        message: "memo deleted".to_string(),
    }))
}
