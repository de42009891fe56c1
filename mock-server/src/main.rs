use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let api_key = std::env::var("JOWI_API_KEY").unwrap_or_else(|_| mock_server::API_KEY.to_string());
    let api_secret = std::env::var("JOWI_API_SECRET").unwrap_or_else(|_| mock_server::API_SECRET.to_string());

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, %api_key, "mock provider listening");
    axum::serve(listener, mock_server::app_with_credentials(&api_key, &api_secret)).await
}
