use anyhow::Result;
use news_analyser::{
    config,
    feed::NewsFeeder,
    infrastructure::{directories, logging, shutdown},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_feed_config()?;
    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config.logging, &paths, "news-feed.log")?;

    let (shutdown, listener) = shutdown::Shutdown::new();
    shutdown::install_signal_handlers(shutdown.clone());

    let sent = NewsFeeder::new(&config).run(listener).await?;
    tracing::info!(sent, "news feed finished");
    Ok(())
}
