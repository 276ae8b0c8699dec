use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::json;

static SERVER: OnceLock<TestServer> = OnceLock::new();
static EMAIL_COUNTER: AtomicU32 = AtomicU32::new(0);

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/memo-api");
        cmd.env("MEMO_API_PORT", port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server can see DATABASE_URL from .env
        // (loaded by the server itself)
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            port,
            base_url,
            child,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                // Ready even when degraded; tests that need the database
                // check db_available themselves.
                if resp.status() == StatusCode::OK
                    || resp.status() == StatusCode::SERVICE_UNAVAILABLE
                {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Whether the server can reach its database. Tests that create real
/// accounts and memos skip themselves when it cannot.
pub async fn db_available(server: &TestServer) -> bool {
    let client = reqwest::Client::new();
    let url = format!("{}/health", server.base_url);

    match client.get(&url).send().await {
        Ok(resp) => match resp.json::<serde_json::Value>().await {
            Ok(body) => body["database"] == "ok",
            Err(_) => false,
        },
        Err(_) => false,
    }
}

/// Unique email per call so tests never collide on the UNIQUE constraint,
/// even across repeated runs against the same database.
pub fn unique_email(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    let counter = EMAIL_COUNTER.fetch_add(1, Ordering::Relaxed);

    format!(
        "{}-{}-{}-{}@example.com",
        prefix,
        std::process::id(),
        nanos,
        counter
    )
}

/// The `name=value` pair of the session cookie from a signin response.
pub fn session_cookie(resp: &reqwest::Response) -> Option<String> {
    resp.headers()
        .get(reqwest::header::SET_COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .next()
        .map(|pair| pair.to_string())
}

/// Sign up a fresh account and sign in, returning the email and the
/// session cookie pair to send on authenticated requests.
pub async fn signup_and_signin(
    client: &reqwest::Client,
    server: &TestServer,
    prefix: &str,
) -> Result<(String, String)> {
    let email = unique_email(prefix);
    let password = "correct horse battery staple";

    let resp = client
        .post(format!("{}/api/auth/signup", server.base_url))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await?;
    anyhow::ensure!(
        resp.status() == StatusCode::CREATED,
        "signup failed with {}",
        resp.status()
    );

    let resp = client
        .post(format!("{}/api/auth/signin", server.base_url))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await?;
    anyhow::ensure!(
        resp.status() == StatusCode::OK,
        "signin failed with {}",
        resp.status()
    );

    let cookie = session_cookie(&resp).context("signin response had no session cookie")?;

    Ok((email, cookie))
}
