use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

/// Body shared by create and update: full title and content, no partial
/// updates. Missing fields deserialize blank and fail the same check.
#[derive(Debug, Deserialize)]
pub struct MemoPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl MemoPayload {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(ApiError::validation("title and content are required"));
        }
        Ok(())
    }
}

/// A path id that is not a UUID cannot match any memo, so it gets the
/// same 404 as a missing record rather than a parse error.
pub fn parse_memo_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found("memo not found"))
}
