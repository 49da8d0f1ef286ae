use anyhow::Context;
use partscout::WebScraper;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8055";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .write_style(env_logger::WriteStyle::Never)
        .init();

    let concurrency = match std::env::var("FETCH_CONCURRENCY") {
        Ok(value) => value
            .parse::<usize>()
            .with_context(|| format!("Invalid FETCH_CONCURRENCY '{value}'"))?,
        Err(_) => 1,
    };

    let scraper = WebScraper::new()?.with_concurrency(concurrency);
    let address = std::env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.into());
    let tcp_listener = tokio::net::TcpListener::bind(&address).await?;

    log::info!("Starting partscout server on address: {}", address);

    axum::serve(tcp_listener, partscout_web::router(scraper))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for shutdown signal: {e:?}");
            }
        })
        .await?;

    Ok(())
}
