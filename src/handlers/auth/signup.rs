use axum::{extract::State, http::StatusCode, response::Json};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::users;
use crate::error::ApiError;
use crate::password;
use crate::state::AppState;

/// Signup body. Missing fields deserialize to their blank forms, so
/// "absent" and "blank" are rejected by the same check.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub message: String,
    pub user_id: Uuid,
}

/// POST /api/auth/signup - create an account from email and password.
pub async fn signup_post(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<SignupRequest>, ApiError>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let email = payload.email.trim();
    if email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::validation("email and password are required"));
    }

    if users::find_by_email(&state.pool, email).await?.is_some() {
        return Err(ApiError::conflict("email is already registered"));
    }

    let password_hash =
        password::hash_password(payload.password, state.config.security.bcrypt_cost).await?;

    // A blank display name is stored as NULL, same as an omitted one.
    let name = payload
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    let user = match users::insert(&state.pool, email, name, &password_hash).await {
        Ok(user) => user,
        // Lost the race against a concurrent signup for the same email.
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(ApiError::conflict("email is already registered"));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = %user.id, "account created");

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "signup complete".to_string(),
            user_id: user.id,
        }),
    ))
}
