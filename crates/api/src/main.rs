use std::sync::Arc;

use anyhow::Context;

use panel_api::{app, config::ApiConfig, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    panel_observability::init();

    let config = ApiConfig::from_env()?;

    let directory = panel_infra::development_directory(
        &config.admin.username,
        &config.admin.email,
        &config.admin.password,
    )
    .context("failed to seed the user directory")?;

    let state = AppState::new(&config.auth, Arc::new(directory));
    let app = app::build_app(state, config.cors_origin.clone());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
