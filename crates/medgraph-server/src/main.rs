use std::env;

use medgraph_server::ServerBuilder;
use medgraph_server::config::loader::{DEFAULT_CONFIG_FILE, load_config};
use medgraph_server::observability::{apply_logging_level, init_tracing};

#[tokio::main]
async fn main() {
    // A missing .env is fine
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: failed to load .env file: {e}");
        }
    }

    init_tracing();

    let (config_path, source) = resolve_config_path();
    let cfg = match load_config(Some(&config_path)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };
    tracing::info!(path = %config_path, source, "Configuration loaded");

    if !apply_logging_level(&cfg.logging.level) {
        tracing::warn!(level = %cfg.logging.level, "Could not apply configured log level");
    }

    let server = match ServerBuilder::new().with_config(cfg).build().await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Server initialization failed: {e}");
            std::process::exit(2);
        }
    };

    if let Err(e) = server.run().await {
        tracing::error!(error = %e, "Server terminated with error");
        std::process::exit(1);
    }
}

/// `--config <path>`, then `MEDGRAPH_CONFIG`, then `medgraph.toml`.
fn resolve_config_path() -> (String, &'static str) {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            if let Some(path) = args.next() {
                return (path, "cli");
            }
        }
    }

    match env::var("MEDGRAPH_CONFIG") {
        Ok(path) if !path.is_empty() => (path, "env"),
        _ => (DEFAULT_CONFIG_FILE.to_string(), "default"),
    }
}
