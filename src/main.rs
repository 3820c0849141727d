use mern_backend::{app, init_logging, AppConfig, AppState, Db};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    init_logging(config.environment);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        environment = ?config.environment,
        "Starting server"
    );

    let db = Db::connect(&config.mongo_uri).await;
    let state = AppState { db };

    mern_backend::serve(app(state, &config), &config).await?;

    Ok(())
}
