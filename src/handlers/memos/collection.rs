use axum::{extract::State, http::StatusCode, response::Json, Extension};
use axum_extra::extract::WithRejection;

use crate::database::memos;
use crate::database::models::Memo;
use crate::error::ApiError;
use crate::handlers::memos::utils::MemoPayload;
use crate::middleware::SessionUser;
use crate::state::AppState;

/// GET /api/memos - the caller's memos, most recently updated first.
pub async fn memos_get(
    State(state): State<AppState>,
    Extension(session_user): Extension<SessionUser>,
) -> Result<Json<Vec<Memo>>, ApiError> {
    let memos = memos::list_for_user(&state.pool, session_user.user_id).await?;
    Ok(Json(memos))
}

/// POST /api/memos - create a memo owned by the caller.
pub async fn memos_post(
    State(state): State<AppState>,
    Extension(session_user): Extension<SessionUser>,
    WithRejection(Json(payload), _): WithRejection<Json<MemoPayload>, ApiError>,
) -> Result<(StatusCode, Json<Memo>), ApiError> {
    payload.validate()?;

    let memo = memos::insert(
        &state.pool,
        session_user.user_id,
        &payload.title,
        &payload.content,
    )
    .await?;

    tracing::debug!(memo_id = %memo.id, user_id = %memo.user_id, "memo created");

    Ok((StatusCode::CREATED, Json(memo)))
}
