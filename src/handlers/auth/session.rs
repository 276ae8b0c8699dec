use axum::{extract::State, response::Json, Extension};
use serde::Serialize;
use uuid::Uuid;

use crate::database::users;
use crate::error::ApiError;
use crate::middleware::SessionUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
}

/// GET /api/auth/session - who the current session belongs to.
///
/// Loads the account fresh rather than echoing token claims, so a token
/// for a deleted account stops resolving immediately.
pub async fn session_get(
    State(state): State<AppState>,
    Extension(session_user): Extension<SessionUser>,
) -> Result<Json<SessionResponse>, ApiError> {
    let user = users::find_by_id(&state.pool, session_user.user_id)
        .await?
        .ok_or_else(|| ApiError::auth("authentication required"))?;

    Ok(Json(SessionResponse {
        id: user.id,
        email: user.email,
        name: user.name,
    }))
}
