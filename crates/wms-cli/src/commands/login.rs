use std::io::{BufRead, Write};

use anyhow::{Context, bail};
use chrono::Utc;
use serde::Serialize;
use wms_core::elapsed;
use wms_core::entities::LoginOutcome;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::LoginArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::session::SessionStore;

#[derive(Serialize)]
struct SessionResponse {
    user_id: i64,
    username: String,
    full_name: String,
    logged_in: String,
    permissions: Vec<String>,
}

#[derive(Serialize)]
struct LogoutResponse {
    cleared: bool,
}

/// Handle `wms login`.
pub async fn handle_login(
    args: &LoginArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let password = match &args.password {
        Some(password) => password.clone(),
        None => prompt_password(&args.user)?,
    };

    let session = match ctx.service.verify_credentials(&args.user, &password).await? {
        LoginOutcome::Success(session) => session,
        LoginOutcome::UnknownUser => {
            bail!("user '{}' does not exist or may not log in", args.user.trim())
        }
        LoginOutcome::WrongPassword => bail!("wrong password for '{}'", args.user.trim()),
    };
    ctx.sessions.save(&session)?;
    tracing::info!(path = %ctx.sessions.path().display(), "session saved");

    let permissions = ctx.service.permissions(session.user_id).await?;
    output(
        &SessionResponse {
            user_id: session.user_id,
            username: session.username,
            full_name: session.full_name,
            logged_in: String::from("just now"),
            permissions: permissions.iter().map(ToString::to_string).collect(),
        },
        flags.format,
    )
}

/// Handle `wms logout`.
pub fn handle_logout(sessions: &SessionStore, flags: &GlobalFlags) -> anyhow::Result<()> {
    let cleared = sessions.clear()?;
    output(&LogoutResponse { cleared }, flags.format)
}

/// Handle `wms whoami`.
pub async fn handle_whoami(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx.require_session()?;
    let permissions = ctx.service.permissions(session.user_id).await?;
    let logged_in = elapsed::since(session.logged_in_at.naive_utc(), Utc::now().naive_utc());
    output(
        &SessionResponse {
            user_id: session.user_id,
            username: session.username,
            full_name: session.full_name,
            logged_in,
            permissions: permissions.iter().map(ToString::to_string).collect(),
        },
        flags.format,
    )
}

fn prompt_password(user: &str) -> anyhow::Result<String> {
    let mut stderr = std::io::stderr();
    write!(stderr, "Password for {}: ", user.trim())?;
    stderr.flush()?;
    read_password(std::io::stdin().lock())
}

fn read_password(mut input: impl BufRead) -> anyhow::Result<String> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
