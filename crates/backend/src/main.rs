use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use backend::routes::configure_routes;
use backend::shared::config;
use backend::shared::marketplaces::shopify::ShopifyApiClient;
use backend::shared::state::AppState;
use backend::system;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = config::load_config()?;
    let catalog = ShopifyApiClient::new(&config.shopify)?;

    let port = config.server.port;
    let app = configure_routes(AppState::new(config, Arc::new(catalog)));

    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", port, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
