use tracing_subscriber::EnvFilter;

/// Installs the global `fmt` subscriber. Verbosity comes from `RUST_LOG`,
/// falling back to `info` for this crate and `warn` elsewhere.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,article_wordfreq=info,wordfreq_server=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
