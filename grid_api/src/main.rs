use std::{env, io, path::Path};

use log::info;
use tokio::{net::TcpListener, signal};

use grid_api::{
    routes::{router, AppState},
    store::FlowStore,
};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "3000";
const DEFAULT_DATASET: &str = "data/homerates.json";

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::init();

    let dataset = env::var("DATASET").unwrap_or_else(|_| DEFAULT_DATASET.to_string());
    let store = FlowStore::open(Path::new(&dataset)).map_err(io::Error::other)?;
    info!("loaded {} home rate records from {dataset}", store.rate_count());

    let addr = format!(
        "{}:{}",
        env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
        env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string()),
    );

    let listener = TcpListener::bind(&addr).await?;
    info!("listening at {addr}");

    axum::serve(listener, router(AppState::new(store)))
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
            info!("received SIGTERM, shutting down");
        })
        .await
}
