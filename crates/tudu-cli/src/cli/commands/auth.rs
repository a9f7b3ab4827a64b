//! Auth command handlers.

use anyhow::Result;
use tudu_core::api::ApiClient;
use tudu_core::config::Config;
use tudu_core::session::{Session, SessionStore, mask_token};

pub async fn login(
    config: &Config,
    store: &SessionStore,
    email: &str,
    password: &str,
) -> Result<()> {
    let client = ApiClient::from_config(config);
    let auth = client.login(email, password).await?;

    let session = Session::new(auth.user, auth.token);
    store.save(&session)?;

    println!(
        "✓ Logged in as {} (token: {})",
        session.user.email,
        mask_token(&session.token)
    );
    Ok(())
}

pub async fn signup(
    config: &Config,
    store: &SessionStore,
    email: &str,
    password: &str,
    name: Option<&str>,
) -> Result<()> {
    let client = ApiClient::from_config(config);
    let auth = client.signup(email, password, name).await?;

    let session = Session::new(auth.user, auth.token);
    store.save(&session)?;

    println!(
        "✓ Account created for {} (token: {})",
        session.user.email,
        mask_token(&session.token)
    );
    Ok(())
}

pub fn logout(store: &SessionStore) -> Result<()> {
    if store.clear()? {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

/// Runs the session-restore check: validates the persisted token
/// against `/auth/me`. A rejected token discards the session.
pub async fn whoami(config: &Config, store: &SessionStore) -> Result<()> {
    let Some(session) = store.load()? else {
        println!("Not logged in.");
        return Ok(());
    };

    let client = ApiClient::from_config(config);
    match client.current_user(&session.token).await {
        Ok(user) => {
            match &user.name {
                Some(name) => println!("{name} <{}>", user.email),
                None => println!("{}", user.email),
            }
            Ok(())
        }
        Err(e) => {
            tracing::info!(error = %e, "persisted session rejected");
            store.clear()?;
            println!("Session rejected by the API; logged out.");
            Ok(())
        }
    }
}
