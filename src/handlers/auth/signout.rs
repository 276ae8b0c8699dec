use axum::{extract::State, response::Json};
use axum_extra::extract::CookieJar;
use serde::Serialize;

use crate::session;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SignoutResponse {
    pub message: String,
}

/// POST /api/auth/signout - clear the session cookie.
///
/// Deliberately unguarded: signing out with an expired or absent session
/// succeeds, so clients can always reset to a clean state.
pub async fn signout_post(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<SignoutResponse>) {
    let jar = jar.remove(session::session_cookie_for_removal(&state.config.session));

    (
        jar,
        Json(SignoutResponse {
            message: "signed out".to_string(),
        }),
    )
}
