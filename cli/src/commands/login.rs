use std::path::Path;

use crate::{session::Session, web_client::Client};

/// Authenticate against the service and persist the returned user as the
/// session context.
pub fn login_cmd(
    client: &dyn Client,
    username: &str,
    password: &str,
    api_url: &str,
    session_path: &Path,
) -> anyhow::Result<()> {
    let user = client
        .login(username, password)
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let session = Session {
        user,
        api_url: Some(api_url.to_string()),
    };
    session.save(session_path)?;

    println!(
        "Logged in as {} ({})",
        session.user.display_name, session.user.username
    );

    Ok(())
}

pub fn logout_cmd(session_path: &Path) -> anyhow::Result<()> {
    if Session::clear(session_path)? {
        println!("Logged out.");
    } else {
        println!("No active session.");
    }

    Ok(())
}

pub fn whoami_cmd(session: Option<&Session>) -> anyhow::Result<()> {
    let Some(session) = session else {
        anyhow::bail!("Not logged in");
    };

    println!("Username: {}", session.user.username);
    println!("Display name: {}", session.user.display_name);
    println!("Email: {}", session.user.email);
    println!("Phone: {}", session.user.phone);

    Ok(())
}
