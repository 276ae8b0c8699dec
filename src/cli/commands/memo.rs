use serde_json::json;

use crate::cli::client::ApiClient;
use crate::cli::config;
use crate::cli::utils::{confirm, output_memo, output_memo_list, output_success, resolve_content};
use crate::cli::OutputFormat;

pub async fn list(server: Option<String>, output_format: OutputFormat) -> anyhow::Result<()> {
    let session = config::load_session()?;
    let client = ApiClient::from_session(&session, server);

    let memos = client.list_memos().await?;
    output_memo_list(&output_format, &memos)
}

pub async fn show(
    id: String,
    server: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let session = config::load_session()?;
    let client = ApiClient::from_session(&session, server);

    let memo = client.get_memo(&id).await?;
    output_memo(&output_format, &memo)
}

pub async fn create(
    title: String,
    content: Option<String>,
    server: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let session = config::load_session()?;
    let client = ApiClient::from_session(&session, server);

    let content = resolve_content(content)?;
    let memo = client.create_memo(title.trim(), content.trim()).await?;

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&memo)?),
        OutputFormat::Text => println!("✓ Created memo {}", memo.id),
    }
    Ok(())
}

pub async fn edit(
    id: String,
    title: Option<String>,
    content: Option<String>,
    server: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let session = config::load_session()?;
    let client = ApiClient::from_session(&session, server);

    // The server takes full replacements, so start from the current
    // record and overlay whatever was passed.
    let current = client.get_memo(&id).await?;
    let title = title.unwrap_or(current.title);
    let content = content.unwrap_or(current.content);

    let memo = client.update_memo(&id, title.trim(), content.trim()).await?;

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&memo)?),
        OutputFormat::Text => println!("✓ Updated memo {}", memo.id),
    }
    Ok(())
}

pub async fn delete(
    id: String,
    yes: bool,
    server: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let session = config::load_session()?;
    let client = ApiClient::from_session(&session, server);

    if !yes {
        // Show what would go before asking.
        let memo = client.get_memo(&id).await?;
        if !confirm(&format!("Delete memo '{}'?", memo.title))? {
            println!("Aborted");
            return Ok(());
        }
    }

    let reply = client.delete_memo(&id).await?;
    output_success(&output_format, &reply.message, None)
}

pub async fn status(server: Option<String>, output_format: OutputFormat) -> anyhow::Result<()> {
    let session = config::load_session()?;
    let client = ApiClient::from_session(&session, server);

    let health = client.health().await;

    match output_format {
        OutputFormat::Json => {
            let health_value = match &health {
                Ok((status, body)) => json!({
                    "reachable": true,
                    "status": status.as_u16(),
                    "body": body,
                }),
                Err(e) => json!({ "reachable": false, "error": e.to_string() }),
            };

            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "server": client.base_url(),
                    "health": health_value,
                    "signed_in": session.email,
                }))?
            );
        }
        OutputFormat::Text => {
            println!("Server: {}", client.base_url());
            match &health {
                Ok((status, _)) if status.is_success() => println!("Health: ok"),
                Ok((status, _)) => println!("Health: degraded ({})", status),
                Err(e) => println!("Health: unreachable ({})", e),
            }
            match (&session.cookie, &session.email) {
                (Some(_), Some(email)) => println!("Session: signed in as {}", email),
                _ => println!("Session: not signed in"),
            }
        }
    }
    Ok(())
}
