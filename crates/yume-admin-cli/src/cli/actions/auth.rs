use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::{info, warn};
use yume_admin_core::auth::{login_admin, signup as create_account, NewAccount};

use crate::cli::globals::GlobalArgs;

#[derive(Debug)]
pub struct LoginArgs {
    pub email: Option<String>,
}

#[derive(Debug)]
pub struct SignupArgs {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Read one line from stdin, showing `default` in the prompt when present.
pub(crate) fn prompt_line(label: &str, default: Option<&str>) -> Result<String> {
    match default {
        Some(d) => print!("{} [{}]: ", label, d),
        None => print!("{}: ", label),
    }
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    let line = line.trim();
    Ok(match (line.is_empty(), default) {
        (true, Some(d)) => d.to_string(),
        _ => line.to_string(),
    })
}

/// # Errors
/// Returns an error if the prompt fails or the backend rejects the login.
pub async fn login(args: LoginArgs, globals: &GlobalArgs) -> Result<()> {
    let email = match args.email {
        Some(email) => email,
        None => prompt_line("Email", globals.config.last_email.as_deref())?,
    };
    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;

    let client = globals.client()?;
    let login = login_admin(&client, &email, &password)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    info!(role = ?login.role, "Signed in");

    let mut config = globals.config.clone();
    config.last_email = Some(email.trim().to_string());
    if let Err(e) = config.save() {
        warn!(error = %e, "Failed to remember email");
    }
    Ok(())
}

/// # Errors
/// Returns an error if the client cannot be constructed.
pub async fn logout(globals: &GlobalArgs) -> Result<()> {
    globals.client()?.logout().await;
    Ok(())
}

/// # Errors
/// Returns an error if the prompts fail, validation fails or the backend
/// rejects the account.
pub async fn signup(args: SignupArgs, globals: &GlobalArgs) -> Result<()> {
    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;
    let confirm_password =
        rpassword::prompt_password("Confirm password: ").context("Failed to read password")?;

    let account = NewAccount {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        phone: args.phone,
        address: args.address,
        password,
        confirm_password,
    };

    let client = globals.client()?;
    create_account(&client, &account)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    println!("Account created successfully! Please sign in.");
    Ok(())
}
