mod api;
mod middleware;
mod notifier;

use tracing_subscriber::EnvFilter;

use atelier_db::PgCatalogStore;

use crate::{
    api::{build_app, default_rate_limit_state, AppState},
    middleware::AuthState,
    notifier::WebhookNotifier,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = atelier_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = atelier_db::PoolConfig::from_app_config(&config);
    let pool = atelier_db::connect_pool(&config.database_url, pool_config).await?;
    let applied = atelier_db::run_migrations(&pool).await?;
    tracing::info!(applied, "migrations up to date");

    let auth = AuthState::from_env(matches!(config.env, atelier_core::Environment::Development))?;
    let notifier = WebhookNotifier::from_config(&config)?;
    let state = AppState {
        pool: pool.clone(),
        store: PgCatalogStore::new(pool),
        notifier,
    };
    let app = build_app(state, auth, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "atelier-server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
