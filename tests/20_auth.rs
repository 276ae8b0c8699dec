mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

// ---- DB-independent: validation and the session guard ----

#[tokio::test]
async fn signup_requires_email_and_password() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    for payload in [
        json!({}),
        json!({ "email": "someone@example.com" }),
        json!({ "password": "secret" }),
        json!({ "email": "", "password": "secret" }),
        json!({ "email": "someone@example.com", "password": "" }),
    ] {
        let res = client
            .post(format!("{}/api/auth/signup", server.base_url))
            .json(&payload)
            .send()
            .await?;

        assert_eq!(
            res.status(),
            StatusCode::BAD_REQUEST,
            "payload {} should be rejected",
            payload
        );

        let body = res.json::<serde_json::Value>().await?;
        assert!(
            body["error"].is_string(),
            "error body should be {{error}}: {}",
            body
        );
    }

    Ok(())
}

#[tokio::test]
async fn signin_requires_email_and_password() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/auth/signin", server.base_url))
        .json(&json!({ "email": "someone@example.com" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["error"].is_string(), "unexpected body: {}", body);

    Ok(())
}

#[tokio::test]
async fn malformed_json_yields_error_body() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/auth/signup", server.base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert!(
        body["error"].is_string(),
        "malformed JSON should still get {{error}}: {}",
        body
    );

    Ok(())
}

#[tokio::test]
async fn memo_routes_require_a_session() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let id = Uuid::new_v4();

    let attempts = [
        client.get(format!("{}/api/memos", server.base_url)),
        client
            .post(format!("{}/api/memos", server.base_url))
            .json(&json!({ "title": "t", "content": "c" })),
        client.get(format!("{}/api/memos/{}", server.base_url, id)),
        client
            .put(format!("{}/api/memos/{}", server.base_url, id))
            .json(&json!({ "title": "t", "content": "c" })),
        client.delete(format!("{}/api/memos/{}", server.base_url, id)),
    ];

    for attempt in attempts {
        let res = attempt.send().await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let body = res.json::<serde_json::Value>().await?;
        assert!(body["error"].is_string(), "unexpected body: {}", body);
    }

    Ok(())
}

#[tokio::test]
async fn garbage_tokens_are_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/memos", server.base_url))
        .header("authorization", "Bearer not-a-real-token")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/api/memos", server.base_url))
        .header("cookie", "memo_session=not-a-real-token")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn session_endpoint_requires_auth() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/auth/session", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn signout_works_without_a_session() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/auth/signout", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["message"].is_string(), "unexpected body: {}", body);

    Ok(())
}

// ---- DB-backed: accounts and sessions ----

#[tokio::test]
async fn signup_creates_account_once() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::db_available(server).await {
        eprintln!("skipping signup_creates_account_once: database not available");
        return Ok(());
    }
    let client = reqwest::Client::new();

    let email = common::unique_email("signup");
    let payload = json!({ "email": email, "password": "secret", "name": "Test User" });

    let res = client
        .post(format!("{}/api/auth/signup", server.base_url))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = res.json::<serde_json::Value>().await?;
    assert!(body["message"].is_string(), "unexpected body: {}", body);
    let user_id = body["userId"].as_str().unwrap_or_default();
    assert!(
        Uuid::parse_str(user_id).is_ok(),
        "userId should be a UUID: {}",
        body
    );

    // Same email again fails, and the hash never leaks.
    let res = client
        .post(format!("{}/api/auth/signup", server.base_url))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["error"].is_string(), "unexpected body: {}", body);

    Ok(())
}

#[tokio::test]
async fn signin_rejects_bad_credentials_identically() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::db_available(server).await {
        eprintln!("skipping signin_rejects_bad_credentials_identically: database not available");
        return Ok(());
    }
    let client = reqwest::Client::new();

    let email = common::unique_email("badcreds");
    client
        .post(format!("{}/api/auth/signup", server.base_url))
        .json(&json!({ "email": email, "password": "right-password" }))
        .send()
        .await?;

    let wrong_password = client
        .post(format!("{}/api/auth/signin", server.base_url))
        .json(&json!({ "email": email, "password": "wrong-password" }))
        .send()
        .await?;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password_body = wrong_password.json::<serde_json::Value>().await?;

    let unknown_email = client
        .post(format!("{}/api/auth/signin", server.base_url))
        .json(&json!({ "email": common::unique_email("ghost"), "password": "whatever" }))
        .send()
        .await?;
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let unknown_email_body = unknown_email.json::<serde_json::Value>().await?;

    // The two failures must be indistinguishable.
    assert_eq!(wrong_password_body, unknown_email_body);

    Ok(())
}

#[tokio::test]
async fn signin_issues_a_working_session_cookie() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::db_available(server).await {
        eprintln!("skipping signin_issues_a_working_session_cookie: database not available");
        return Ok(());
    }
    let client = reqwest::Client::new();

    let email = common::unique_email("cookie");
    client
        .post(format!("{}/api/auth/signup", server.base_url))
        .json(&json!({ "email": email, "password": "secret" }))
        .send()
        .await?;

    let res = client
        .post(format!("{}/api/auth/signin", server.base_url))
        .json(&json!({ "email": email, "password": "secret" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let raw_cookie = res
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        raw_cookie.contains("HttpOnly"),
        "session cookie should be HttpOnly: {}",
        raw_cookie
    );
    assert!(
        raw_cookie.contains("SameSite=Lax"),
        "session cookie should be SameSite=Lax: {}",
        raw_cookie
    );

    let cookie = common::session_cookie(&res).expect("missing session cookie");

    // The cookie resolves back to the account that signed in.
    let res = client
        .get(format!("{}/api/auth/session", server.base_url))
        .header("cookie", &cookie)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["email"], email.as_str());
    assert!(body["id"].is_string(), "unexpected body: {}", body);
    assert!(
        body.get("password").is_none() && body.get("passwordHash").is_none(),
        "password material must never appear: {}",
        body
    );

    Ok(())
}

#[tokio::test]
async fn bearer_header_works_like_the_cookie() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::db_available(server).await {
        eprintln!("skipping bearer_header_works_like_the_cookie: database not available");
        return Ok(());
    }
    let client = reqwest::Client::new();

    let (_email, cookie) = common::signup_and_signin(&client, server, "bearer").await?;
    let token = cookie.split_once('=').map(|(_, v)| v).unwrap_or_default();

    let res = client
        .get(format!("{}/api/memos", server.base_url))
        .header("authorization", format!("Bearer {}", token))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    Ok(())
}
