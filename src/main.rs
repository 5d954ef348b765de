use anyhow::Result;
use news_analyser::{
    app::NewsAnalyserApp,
    config,
    infrastructure::{directories, logging, shutdown},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_config()?;
    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config.logging, &paths, "news-analyser.log")?;

    let (shutdown, _) = shutdown::Shutdown::new();
    shutdown::install_signal_handlers(shutdown.clone());

    let app = NewsAnalyserApp::initialize(config, paths, shutdown.clone()).await?;
    app.run().await
}
