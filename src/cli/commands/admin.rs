//! Admin credentials command handler

use std::io::{self, BufRead, Write};

use crate::config::Config;
use crate::db::Provisioned;
use crate::state::SharedState;

pub async fn cmd_admin(
    config: &Config,
    username: &str,
    password: Option<String>,
) -> anyhow::Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt_password(&mut io::stdin().lock())?,
    };

    let shared = SharedState::new(config.clone()).await?;

    match shared
        .auth_service
        .provision_admin(username, &password)
        .await?
    {
        Provisioned::Updated => println!("Updated user '{username}'."),
        Provisioned::Created => println!("Created user '{username}'."),
    }

    println!("Done.");
    Ok(())
}

/// Reads the password twice and requires both entries to match.
fn prompt_password(input: &mut impl BufRead) -> anyhow::Result<String> {
    let password = read_entry(input, "Password: ")?;
    let confirmation = read_entry(input, "Repeat for confirmation: ")?;

    if password.is_empty() {
        anyhow::bail!("Password must not be empty");
    }
    if password != confirmation {
        anyhow::bail!("The two entered values do not match");
    }

    Ok(password)
}

fn read_entry(input: &mut impl BufRead, prompt: &str) -> anyhow::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        anyhow::bail!("No password given on stdin");
    }

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
