use article_wordfreq::{
    shell::{routes, AppState},
    telemetry, Analyzer, AppConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let config_arg = std::env::args().nth(1);
    let config = AppConfig::load(config_arg.as_deref())?;
    tracing::info!("Starting word frequency server");
    tracing::debug!(%config, "loaded config");

    tracing::info!("Loading segmentation dictionary...");
    let analyzer = Analyzer::new().with_hmm(config.analysis.use_hmm).build();
    tracing::info!("Dictionary loaded");

    let addr = config.bind_addr();
    let app = routes::create_router(AppState::new(analyzer, config));

    tracing::info!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
