use std::fs;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes the logging system with both console and file output.
pub fn init_logging(log_name: &str) {
    // Ensure logs directory exists
    let _ = fs::create_dir_all("logs");

    // Daily-rotating JSON file for after-the-fact diagnostics; this is where
    // full collaborator error detail lands (only fingerprint prefixes reach
    // submitters).
    let file_appender = tracing_appender::rolling::daily("logs", format!("{}.log", log_name));
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);

    let console_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stdout);

    // Respect RUST_LOG if set; otherwise default to verbose for our crates
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("vigil_core=debug,vigil_web=debug,vigil_worker=debug,vigil_translate=debug,info")
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    // Keep the guard alive for the process lifetime so logs flush on exit
    std::mem::forget(guard);
}
