pub mod client;
pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "memo")]
#[command(about = "memo CLI - personal memos over the memo-api server")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Server URL (overrides the stored session's server)")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Account and session management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "List your memos, most recently updated first")]
    List,

    #[command(about = "Show one memo")]
    Show {
        #[arg(help = "Memo id")]
        id: String,
    },

    #[command(about = "Create a memo")]
    Create {
        #[arg(help = "Memo title")]
        title: String,
        #[arg(long, help = "Memo content (reads stdin if not provided)")]
        content: Option<String>,
    },

    #[command(about = "Edit a memo, keeping fields you do not pass")]
    Edit {
        #[arg(help = "Memo id")]
        id: String,
        #[arg(long, help = "New title")]
        title: Option<String>,
        #[arg(long, help = "New content")]
        content: Option<String>,
    },

    #[command(about = "Delete a memo")]
    Delete {
        #[arg(help = "Memo id")]
        id: String,
        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },

    #[command(about = "Show server health and session status")]
    Status,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let server_override = cli.server.clone();

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, server_override, output_format).await,
        Commands::List => commands::memo::list(server_override, output_format).await,
        Commands::Show { id } => commands::memo::show(id, server_override, output_format).await,
        Commands::Create { title, content } => {
            commands::memo::create(title, content, server_override, output_format).await
        }
        Commands::Edit { id, title, content } => {
            commands::memo::edit(id, title, content, server_override, output_format).await
        }
        Commands::Delete { id, yes } => {
            commands::memo::delete(id, yes, server_override, output_format).await
        }
        Commands::Status => commands::memo::status(server_override, output_format).await,
    }
}
