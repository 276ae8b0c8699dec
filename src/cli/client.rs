//! HTTP client for the memo-api server. Carries the stored session
//! cookie and turns `{error}` bodies into typed errors, so commands can
//! print what the server actually said.

use reqwest::{header, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::cli::config::{self, SessionFile};
use crate::database::models::Memo;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with an `{error}` body.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("not signed in (run 'memo auth login' first)")]
    NotSignedIn,

    #[error("server did not return a session cookie")]
    MissingSessionCookie,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupReply {
    pub message: String,
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninReply {
    pub message: String,
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct MessageReply {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionReply {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    cookie: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            cookie: None,
        }
    }

    /// Client pointed at the session's server (or the override), sending
    /// the stored cookie when there is one.
    pub fn from_session(session: &SessionFile, override_url: Option<String>) -> Self {
        let base_url = config::resolve_server(override_url, session);
        let mut client = Self::new(&base_url);
        client.cookie = session.cookie.clone();
        client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_signed_in(&self) -> bool {
        self.cookie.is_some()
    }

    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<SignupReply, ClientError> {
        let mut body = json!({ "email": email, "password": password });
        if let Some(name) = name {
            body["name"] = json!(name);
        }

        let response = self
            .http
            .post(self.url("/api/auth/signup"))
            .json(&body)
            .send()
            .await?;

        Self::into_result(response).await
    }

    /// Sign in and capture the session cookie from the Set-Cookie header.
    pub async fn signin(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(SigninReply, String), ClientError> {
        let response = self
            .http
            .post(self.url("/api/auth/signin"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        // Grab the cookie pair before the body consumes the response.
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|pair| pair.to_string());

        let reply: SigninReply = Self::into_result(response).await?;
        let cookie = cookie.ok_or(ClientError::MissingSessionCookie)?;

        Ok((reply, cookie))
    }

    pub async fn signout(&self) -> Result<MessageReply, ClientError> {
        let mut request = self.http.post(self.url("/api/auth/signout"));
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }

        Self::into_result(request.send().await?).await
    }

    pub async fn session(&self) -> Result<SessionReply, ClientError> {
        let response = self
            .http
            .get(self.url("/api/auth/session"))
            .header(header::COOKIE, self.session_cookie()?)
            .send()
            .await?;

        Self::into_result(response).await
    }

    pub async fn list_memos(&self) -> Result<Vec<Memo>, ClientError> {
        let response = self
            .http
            .get(self.url("/api/memos"))
            .header(header::COOKIE, self.session_cookie()?)
            .send()
            .await?;

        Self::into_result(response).await
    }

    pub async fn create_memo(&self, title: &str, content: &str) -> Result<Memo, ClientError> {
        let response = self
            .http
            .post(self.url("/api/memos"))
            .header(header::COOKIE, self.session_cookie()?)
            .json(&json!({ "title": title, "content": content }))
            .send()
            .await?;

        Self::into_result(response).await
    }

    pub async fn get_memo(&self, id: &str) -> Result<Memo, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/api/memos/{}", id)))
            .header(header::COOKIE, self.session_cookie()?)
            .send()
            .await?;

        Self::into_result(response).await
    }

    pub async fn update_memo(
        &self,
        id: &str,
        title: &str,
        content: &str,
    ) -> Result<Memo, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/api/memos/{}", id)))
            .header(header::COOKIE, self.session_cookie()?)
            .json(&json!({ "title": title, "content": content }))
            .send()
            .await?;

        Self::into_result(response).await
    }

    pub async fn delete_memo(&self, id: &str) -> Result<MessageReply, ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/api/memos/{}", id)))
            .header(header::COOKIE, self.session_cookie()?)
            .send()
            .await?;

        Self::into_result(response).await
    }

    /// Health probe. Transport failures surface as errors; a degraded
    /// server still yields its status body.
    pub async fn health(&self) -> Result<(StatusCode, Value), ClientError> {
        let response = self
            .http
            .get(self.url("/health"))
            .timeout(std::time::Duration::from_secs(5))
            .send()
            .await?;

        let status = response.status();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);

        Ok((status, body))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn session_cookie(&self) -> Result<&str, ClientError> {
        self.cookie.as_deref().ok_or(ClientError::NotSignedIn)
    }

    async fn into_result<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("server returned {}", status),
        };

        Err(ClientError::Api { status, message })
    }
}
