use std::io::{self, BufRead, Read, Write};

use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::database::models::Memo;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(obj), Some(extra)) = (response.as_object_mut(), data.as_ref().and_then(Value::as_object)) {
                obj.extend(extra.clone());
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Print a memo list: JSON as-is, text as one line per memo.
pub fn output_memo_list(output_format: &OutputFormat, memos: &[Memo]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(memos)?);
        }
        OutputFormat::Text => {
            if memos.is_empty() {
                println!("No memos yet");
                return Ok(());
            }

            for memo in memos {
                println!(
                    "{}  {}  (updated {})",
                    memo.id,
                    memo.title,
                    memo.updated_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
    }
    Ok(())
}

pub fn output_memo(output_format: &OutputFormat, memo: &Memo) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(memo)?);
        }
        OutputFormat::Text => {
            println!("{}", memo.title);
            println!("id: {}", memo.id);
            println!("updated: {}", memo.updated_at.format("%Y-%m-%d %H:%M"));
            println!();
            println!("{}", memo.content);
        }
    }
    Ok(())
}

/// Ask for a yes/no confirmation on stdin. Anything but y/yes is a no.
pub fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Password from the flag when given, otherwise a no-echo prompt.
pub fn resolve_password(provided: Option<String>) -> anyhow::Result<String> {
    match provided {
        Some(password) => Ok(password),
        None => Ok(rpassword::prompt_password("Password: ")?),
    }
}

/// Memo content from the flag when given, otherwise the rest of stdin.
pub fn resolve_content(provided: Option<String>) -> anyhow::Result<String> {
    match provided {
        Some(content) => Ok(content),
        None => {
            let mut content = String::new();
            io::stdin().lock().read_to_string(&mut content)?;
            Ok(content)
        }
    }
}
