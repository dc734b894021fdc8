use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing for binaries and long-running test harnesses.
///
/// Respects `RUST_LOG`; defaults to debug-level output for mediarc crates.
pub fn init_telemetry() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "mediarc_core=debug,mediarc_storage=debug,mediarc_processing=debug".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
