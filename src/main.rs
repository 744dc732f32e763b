use bikeshare_dash::{load_dataset, resolve_dataset_path, router, AppState};
use std::{env, net::SocketAddr};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_path = resolve_dataset_path();
    let dataset = load_dataset(&data_path)?;
    info!(
        rows = dataset.len(),
        start = %dataset.start(),
        end = %dataset.end(),
        "loaded dataset from {}",
        data_path.display()
    );

    let app = router(AppState::new(dataset));

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
