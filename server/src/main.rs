//! SSO-Dienst – Einstiegspunkt
//!
//! Laedt die Konfiguration, initialisiert das Logging und startet den Server.

use anyhow::Result;
use sso_server::{config::ServerConfig, Server};

#[tokio::main]
async fn main() -> Result<()> {
    // Konfigurationsdatei-Pfad aus Umgebungsvariable oder Standard
    let config_pfad = std::env::var("SSO_CONFIG").unwrap_or_else(|_| "config.toml".into());

    let config = ServerConfig::laden(&config_pfad)?;

    sso_observability::logging_initialisieren(
        &config.logging.level,
        &config.logging.format,
        &config.server.env,
    );

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_pfad,
        env = %config.server.env,
        "SSO-Dienst wird initialisiert"
    );

    Server::neu(config).starten().await
}
