use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVER: &str = "http://localhost:3000";

/// Stored session: which server we talk to and, once signed in, the
/// session cookie to send back. Lives in `session.json` under the CLI
/// config directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFile {
    pub server: String,
    pub cookie: Option<String>,
    pub email: Option<String>,
    pub saved_at: DateTime<Utc>,
}

impl SessionFile {
    pub fn signed_out(server: String) -> Self {
        Self {
            server,
            cookie: None,
            email: None,
            saved_at: Utc::now(),
        }
    }

    pub fn signed_in(server: String, cookie: String, email: String) -> Self {
        Self {
            server,
            cookie: Some(cookie),
            email: Some(email),
            saved_at: Utc::now(),
        }
    }
}

impl Default for SessionFile {
    fn default() -> Self {
        Self::signed_out(DEFAULT_SERVER.to_string())
    }
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("MEMO_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME")
            .map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("memo").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn load_session() -> anyhow::Result<SessionFile> {
    let session_file = get_config_dir()?.join("session.json");

    if !session_file.exists() {
        return Ok(SessionFile::default());
    }

    let content = fs::read_to_string(session_file)?;
    let session: SessionFile = serde_json::from_str(&content)?;
    Ok(session)
}

pub fn save_session(session: &SessionFile) -> anyhow::Result<()> {
    let session_file = get_config_dir()?.join("session.json");

    let content = serde_json::to_string_pretty(session)?;
    fs::write(session_file, content)?;
    Ok(())
}

/// Forget the cookie but keep the server, so `memo status` and the next
/// login still point at the right place.
pub fn clear_session() -> anyhow::Result<()> {
    let session = load_session()?;
    save_session(&SessionFile::signed_out(session.server))
}

/// Server resolution order: explicit flag, then the stored session,
/// then the local default.
pub fn resolve_server(override_url: Option<String>, session: &SessionFile) -> String {
    override_url.unwrap_or_else(|| session.server.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_session_points_at_local_server() {
        let session = SessionFile::default();
        assert_eq!(session.server, DEFAULT_SERVER);
        assert!(session.cookie.is_none());
    }

    #[test]
    fn resolve_server_prefers_override() {
        let session = SessionFile::signed_in(
            "http://stored:3000".to_string(),
            "memo_session=tok".to_string(),
            "a@b.c".to_string(),
        );

        assert_eq!(
            resolve_server(Some("http://flag:4000".to_string()), &session),
            "http://flag:4000"
        );
        assert_eq!(resolve_server(None, &session), "http://stored:3000");
    }
}
