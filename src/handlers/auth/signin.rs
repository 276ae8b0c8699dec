use axum::{extract::State, response::Json};
use axum_extra::extract::{CookieJar, WithRejection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::users;
use crate::error::ApiError;
use crate::password;
use crate::session::{self, Claims};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninResponse {
    pub message: String,
    pub user_id: Uuid,
}

/// POST /api/auth/signin - verify credentials and open a session.
///
/// Unknown email and wrong password produce the same 401 body, and the
/// unknown-email path still burns a hash so the two cases are not
/// distinguishable by timing either.
pub async fn signin_post(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(payload), _): WithRejection<Json<SigninRequest>, ApiError>,
) -> Result<(CookieJar, Json<SigninResponse>), ApiError> {
    let email = payload.email.trim();
    if email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::validation("email and password are required"));
    }

    let user = match users::find_by_email(&state.pool, email).await? {
        Some(user) => user,
        None => {
            password::dummy_verify(payload.password, state.config.security.bcrypt_cost).await;
            return Err(ApiError::auth("invalid email or password"));
        }
    };

    let verified = password::verify_password(payload.password, user.password_hash.clone()).await?;
    if !verified {
        return Err(ApiError::auth("invalid email or password"));
    }

    let claims = Claims::new(user.id, state.config.session.ttl_hours);
    let token =
        session::mint_session_token(&claims, &state.config.session.secret).map_err(|e| {
            tracing::error!("failed to mint session token: {}", e);
            ApiError::internal("an error occurred while processing your request")
        })?;

    let jar = jar.add(session::session_cookie(&state.config.session, token));

    tracing::info!(user_id = %user.id, "session opened");

    Ok((
        jar,
        Json(SigninResponse {
            message: "signed in".to_string(),
            user_id: user.id,
        }),
    ))
}
