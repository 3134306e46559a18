use std::sync::Arc;

use linkpeek_core::{DetailsService, FetchOptions, Fetcher, ReqwestTransport};
use linkpeek_server::config::Config;
use linkpeek_server::routes::{AppState, app};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("linkpeek_server=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env();
    info!(?config, "starting linkpeek-server");

    let fetcher = Fetcher::new(Arc::new(ReqwestTransport::default())).with_defaults(FetchOptions {
        timeout: config.fetch_timeout,
        max_body_bytes: config.max_body_bytes,
        headers: Vec::new(),
    });
    let state = AppState {
        service: Arc::new(DetailsService::new(fetcher)),
        view_token: config.view_token.clone(),
    };

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app(state)).await
}
