use anyhow::Context;

use fastchow_storefront::config::StorefrontConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fastchow_observability::init();

    let config = StorefrontConfig::from_env();
    let app = fastchow_storefront::app::build_app(&config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %listener.local_addr().context("listener has no local address")?,
        session_cookie = %config.session_cookie,
        session_idle_secs = config.session_idle.as_secs(),
        "storefront listening"
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
