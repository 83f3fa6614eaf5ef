//! Server binary: reads config from env, prepares the database, serves GraphQL over HTTP.

use blog_graphql::{
    app, apply_migrations, connect, ensure_database_exists, routes::GRAPHQL_PATH, AppState,
    PgRepository, ServerConfig,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("blog_graphql=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    ensure_database_exists(&config.database_url).await?;
    let pool = connect(&config).await?;
    apply_migrations(&pool, &config.schema).await?;

    let repo = PgRepository::new(pool.clone(), &config.schema);
    let state = AppState::new(Arc::new(repo), config.max_query_depth);

    let listener = TcpListener::bind(config.bind_addr).await?;
    let addr = listener.local_addr()?;
    tracing::info!("listening on {}", addr);
    println!("🚀 Server ready at http://{}{}", addr, GRAPHQL_PATH);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
