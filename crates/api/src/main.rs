use anyhow::Context;

use sockwarehouse_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    sockwarehouse_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    let app = sockwarehouse_api::app::build_app(&config)
        .await
        .context("failed to build application")?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
