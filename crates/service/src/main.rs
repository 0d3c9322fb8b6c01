use careform_service::{build_router, config::Config, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting careform service...");

    let config = Config::load()?;
    tracing::info!(
        "Configuration loaded (templates in {})",
        config.merge.template_dir.display()
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = build_router(AppState::from_config(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("careform service listening on {}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  - POST /api/update-pdf");
    tracing::info!("  - POST /api/validate");
    tracing::info!("  - GET  /api/health");

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,careform_service=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
