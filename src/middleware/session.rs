use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::session::{self, Claims};
use crate::state::AppState;

/// Authenticated caller context, inserted into request extensions by
/// [`require_session`] and read by handlers via `Extension<SessionUser>`.
#[derive(Clone, Copy, Debug)]
pub struct SessionUser {
    pub user_id: Uuid,
}

impl From<Claims> for SessionUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
        }
    }
}

/// Session middleware guarding the memo routes. Requests without a valid
/// session token are rejected with 401 before any handler runs.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let cookie_name = &state.config.session.cookie_name;
    let token = session::session_token_from_headers(request.headers(), cookie_name)
        .ok_or_else(|| ApiError::auth("authentication required"))?;

    let claims =
        session::verify_session_token(&token, &state.config.session.secret).map_err(|e| {
            tracing::debug!("rejected session token: {}", e);
            ApiError::auth("authentication required")
        })?;

    request.extensions_mut().insert(SessionUser::from(claims));

    Ok(next.run(request).await)
}
