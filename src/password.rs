//! Password hashing.
//!
//! bcrypt work runs on the blocking pool so a burst of signups or signins
//! cannot stall the async runtime.

use crate::error::ApiError;

pub async fn hash_password(password: String, cost: u32) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| {
            tracing::error!("password hashing task failed: {}", e);
            ApiError::internal("an error occurred while processing your request")
        })?
        .map_err(|e| {
            tracing::error!("password hashing failed: {}", e);
            ApiError::internal("an error occurred while processing your request")
        })
}

pub async fn verify_password(password: String, hash: String) -> Result<bool, ApiError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| {
            tracing::error!("password verification task failed: {}", e);
            ApiError::internal("an error occurred while processing your request")
        })?
        .map_err(|e| {
            tracing::error!("password verification failed: {}", e);
            ApiError::internal("an error occurred while processing your request")
        })
}

/// Burn the same work as a real verification. Called on signin when the
/// email does not resolve to a user, so response timing does not reveal
/// which emails are registered.
pub async fn dummy_verify(password: String, cost: u32) {
    let _ = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    // bcrypt::MIN_COST keeps the tests fast; production cost comes from config.
    const TEST_COST: u32 = 4;

    #[tokio::test]
    async fn hash_then_verify() {
        let hash = hash_password("hunter2".to_string(), TEST_COST).await.unwrap();
        assert!(hash.starts_with("$2"));

        let ok = verify_password("hunter2".to_string(), hash).await.unwrap();
        assert!(ok);
    }

    #[tokio::test]
    async fn wrong_password_does_not_verify() {
        let hash = hash_password("hunter2".to_string(), TEST_COST).await.unwrap();
        let ok = verify_password("*******".to_string(), hash).await.unwrap();
        assert!(!ok);
    }

    #[tokio::test]
    async fn hashes_are_salted() {
        let a = hash_password("same".to_string(), TEST_COST).await.unwrap();
        let b = hash_password("same".to_string(), TEST_COST).await.unwrap();
        assert_ne!(a, b);
    }
}
