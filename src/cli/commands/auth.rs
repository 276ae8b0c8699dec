use clap::Subcommand;
use serde_json::json;

use crate::cli::client::ApiClient;
use crate::cli::config::{self, SessionFile};
use crate::cli::utils::{output_success, resolve_password};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Create an account on the server")]
    Signup {
        #[arg(help = "Email address")]
        email: String,
        #[arg(long, help = "Display name")]
        name: Option<String>,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Sign in and store the session")]
    Login {
        #[arg(help = "Email address")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Sign out and clear the stored session")]
    Logout,

    #[command(about = "Show the signed-in account")]
    Whoami,
}

pub async fn handle(
    cmd: AuthCommands,
    server: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let session = config::load_session()?;

    match cmd {
        AuthCommands::Signup {
            email,
            name,
            password,
        } => {
            let password = resolve_password(password)?;
            let client = ApiClient::from_session(&session, server);
            let reply = client.signup(&email, &password, name.as_deref()).await?;

            output_success(
                &output_format,
                &reply.message,
                Some(json!({ "userId": reply.user_id })),
            )
        }

        AuthCommands::Login { email, password } => {
            let password = resolve_password(password)?;
            let client = ApiClient::from_session(&session, server);
            let (_reply, cookie) = client.signin(&email, &password).await?;

            config::save_session(&SessionFile::signed_in(
                client.base_url().to_string(),
                cookie,
                email.clone(),
            ))?;

            output_success(&output_format, &format!("Signed in as {}", email), None)
        }

        AuthCommands::Logout => {
            let client = ApiClient::from_session(&session, server);
            if client.is_signed_in() {
                // Best effort; the local session is cleared regardless.
                if let Err(e) = client.signout().await {
                    eprintln!("Warning: signout request failed: {}", e);
                }
            }
            config::clear_session()?;

            output_success(&output_format, "Signed out", None)
        }

        AuthCommands::Whoami => {
            let client = ApiClient::from_session(&session, server);
            let reply = client.session().await?;

            match output_format {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "id": reply.id,
                        "email": reply.email,
                        "name": reply.name,
                    }))?
                ),
                OutputFormat::Text => {
                    match &reply.name {
                        Some(name) => println!("{} <{}>", name, reply.email),
                        None => println!("{}", reply.email),
                    }
                    println!("id: {}", reply.id);
                }
            }
            Ok(())
        }
    }
}
