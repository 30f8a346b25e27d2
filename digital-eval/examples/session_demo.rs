//! Sign in, make a few calls, and watch the session end.
//!
//! Run against a local backend with:
//! ```bash
//! DIGITAL_EVAL_BASE_URL=http://localhost:8443/api/v1/ \
//!   cargo run --example session_demo -- authority_1 secret
//! ```

use digital_eval::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let login = args.next().unwrap_or_else(|| "authority_1".to_string());
    let password = args.next().unwrap_or_default();

    let client = SessionClient::builder(ClientConfig::from_env()?)
        .listener(|event: &SessionEnded| {
            tracing::warn!(reason = %event.reason, request = ?event.request, "Session ended, back to /login");
        })
        .build()?;

    if let Some(user) = client.restore().await? {
        println!("Restored session for {} ({})", user.user_id, user.role);
    } else {
        let response = client.login(&login, &password).await?;
        println!("Signed in as {} ({})", response.user.user_id, response.user.role);
    }

    let user = client
        .current_user()?
        .ok_or_else(|| anyhow::anyhow!("no session after sign in"))?;
    println!("Landing page: {}", user.role.dashboard());

    match user.role {
        Role::Authority => {
            let pending = client.authority().pending_requests().await?;
            println!("{} pending evaluation requests", pending.len());
        }
        Role::Evaluator => {
            let scripts = client.evaluator().assigned_scripts(&user.user_id).await?;
            println!("{} scripts assigned", scripts.len());
        }
        Role::Admin => {
            let logs = client.admin().service_logs("go-node").await?;
            println!("{} log lines from go-node", logs.len());
        }
        _ => {
            let me = client.me().await?;
            println!("Profile: {} <{}>", me.name, me.email);
        }
    }

    // Force a refresh to show the token rotating.
    let refreshed = client.refresh().await?;
    println!("Token refreshed ({})", refreshed.token_type);

    client.logout().await?;
    println!("Signed out");
    Ok(())
}
