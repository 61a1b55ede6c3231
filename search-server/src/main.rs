use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use search_server::ServerConfig;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("search_server=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let config = ServerConfig::from_env();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, dataset = %config.dataset_path.display(), "listening");
    search_server::run(listener, config).await
}
