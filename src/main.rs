use std::sync::Arc;

use env_logger::Env;
use pokemon_tcg_checker::{server, AppState, Settings};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> pokemon_tcg_checker::Result<()> {
    let settings = Settings::from_env();
    let port = settings.port;
    log::info!("Starting Pokemon TCG Checker backend");

    let state = Arc::new(AppState::from_settings(settings)?);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    server::serve(listener, state).await
}
