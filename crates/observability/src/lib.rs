//! # sso-observability
//!
//! Structured Logging via tracing-subscriber. Das Ausgabeformat richtet
//! sich nach der Umgebung (`local` lesbarer Text, `dev`/`prod` JSON).

pub mod logging;

pub use logging::{format_aufloesen, logging_initialisieren, LogFormat};
