//! Structured Logging Setup via tracing-subscriber
//!
//! Konfigurierbar per Umgebungsvariable:
//! - `SSO_LOG_LEVEL`: Filter im EnvFilter-Format, ueberschreibt die Konfiguration
//! - `SSO_LOG_FORMAT`: `text`, `json` oder `auto`, ueberschreibt die Konfiguration
//!
//! Bei `auto` entscheidet die Umgebung: `local` liefert Text, alles andere JSON.

use tracing_subscriber::{fmt, EnvFilter};

/// Ausgabeformat der Logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Bestimmt das Log-Format aus Konfiguration, Umgebung und optionaler Ueberschreibung.
///
/// Unbekannte Werte werden wie `auto` behandelt.
pub fn format_aufloesen(konfiguriert: &str, env: &str, ueberschreibung: Option<&str>) -> LogFormat {
    match ueberschreibung.unwrap_or(konfiguriert) {
        "text" => LogFormat::Text,
        "json" => LogFormat::Json,
        _ => match env {
            "local" => LogFormat::Text,
            _ => LogFormat::Json,
        },
    }
}

/// Initialisiert das Logging-System.
///
/// Darf nur einmal pro Prozess aufgerufen werden.
pub fn logging_initialisieren(level: &str, format: &str, env: &str) {
    let filter = EnvFilter::try_from_env("SSO_LOG_LEVEL")
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let ueberschreibung = std::env::var("SSO_LOG_FORMAT").ok();

    match format_aufloesen(format, env, ueberschreibung.as_deref()) {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_current_span(true)
                .init();
        }
        LogFormat::Text => {
            fmt().with_env_filter(filter).with_target(true).init();
        }
    }
}
