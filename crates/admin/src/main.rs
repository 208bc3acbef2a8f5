use superstore_admin::{notify, AdminShell, Screen};
use superstore_auth::SessionContext;
use superstore_client::RestClient;
use superstore_identity::{IdentityClient, IdentityConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    superstore_observability::init();

    let api_base = std::env::var("API_BASE_URL").unwrap_or_else(|_| {
        tracing::warn!("API_BASE_URL not set; using dev default");
        "http://localhost:3000".to_string()
    });
    let config = IdentityConfig::from_env();
    let session_hint = std::env::var("IDP_SESSION_HINT").ok();

    let session = SessionContext::new();
    session.on_event(|event| {
        tracing::debug!(?event, "session event");
        if let Some(notice) = notify::notice_for(event) {
            tracing::info!(level = ?notice.level, "{}", notice.message);
        }
    });

    let identity = IdentityClient::new(config, session.clone());
    let authenticated = identity.bootstrap(session_hint.as_deref()).await?;

    if !authenticated {
        // No provider session to recover; an interactive login is needed.
        println!("not signed in; open this URL to sign in:");
        println!("{}", identity.login_url());
        return Ok(());
    }

    let mut shell = AdminShell::new(RestClient::new(api_base, session));
    shell.load_products().await?;
    shell.load_users().await?;

    match shell.screen() {
        Screen::Shell(view) => tracing::info!(section = view.label(), "admin shell ready"),
        other => tracing::warn!(?other, "unexpected screen after bootstrap"),
    }

    println!("products ({}):", shell.products().len());
    for (name, price) in shell.product_rows() {
        println!("  {name}  {price}");
    }
    println!("users ({}):", shell.users().len());
    for user in shell.users() {
        println!("  {}  {}", user.name, user.email);
    }

    Ok(())
}
