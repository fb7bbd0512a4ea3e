//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! Standardwerte, sodass der Dienst ohne Konfigurationsdatei lokal
//! lauffaehig ist.

use std::{collections::HashSet, time::Duration};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use sso_auth::{
    password::{STANDARD_ITERATIONEN, STANDARD_PARALLELITAET, STANDARD_SPEICHER_KIB},
    PasswortHasher,
};
use sso_db::DatabaseConfig;
use sso_grpc::GrpcServerKonfig;

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Allgemeine Einstellungen
    pub server: ServerEinstellungen,
    /// gRPC-Listener
    pub grpc: GrpcEinstellungen,
    /// Datenbank-Einstellungen
    pub datenbank: DatenbankEinstellungen,
    /// Token-Lebensdauer
    pub token: TokenEinstellungen,
    /// Argon2id-Kosten
    pub passwort: PasswortEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
    /// Apps, die beim Start im Speicher angelegt bzw. aktualisiert werden
    pub apps: Vec<AppEinstellung>,
}

/// Allgemeine Server-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerEinstellungen {
    /// Umgebung: "local", "dev" oder "prod"
    pub env: String,
}

impl Default for ServerEinstellungen {
    fn default() -> Self {
        Self { env: "local".into() }
    }
}

/// gRPC-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrpcEinstellungen {
    pub bind_adresse: String,
    pub port: u16,
    /// Zeitlimit pro Request in Sekunden
    pub timeout_sekunden: u64,
}

impl Default for GrpcEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "0.0.0.0".into(),
            port: 44044,
            timeout_sekunden: 10,
        }
    }
}

/// Datenbank-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatenbankEinstellungen {
    /// Verbindungs-URL
    pub url: String,
    /// Maximale Verbindungspool-Groesse
    pub max_verbindungen: u32,
    /// Journal im WAL-Modus
    pub wal: bool,
}

impl Default for DatenbankEinstellungen {
    fn default() -> Self {
        Self {
            url: "sqlite://storage/sso.db".into(),
            max_verbindungen: 5,
            wal: true,
        }
    }
}

/// Token-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenEinstellungen {
    pub ttl_sekunden: u64,
}

impl Default for TokenEinstellungen {
    fn default() -> Self {
        Self { ttl_sekunden: 3600 }
    }
}

/// Argon2id-Kostenparameter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswortEinstellungen {
    pub speicher_kib: u32,
    pub iterationen: u32,
    pub parallelitaet: u32,
}

impl Default for PasswortEinstellungen {
    fn default() -> Self {
        Self {
            speicher_kib: STANDARD_SPEICHER_KIB,
            iterationen: STANDARD_ITERATIONEN,
            parallelitaet: STANDARD_PARALLELITAET,
        }
    }
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level bzw. EnvFilter-Direktive
    pub level: String,
    /// Format: "auto", "text" oder "json"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "auto".into(),
        }
    }
}

/// Eine beim Start bereitgestellte App
#[derive(Clone, Serialize, Deserialize)]
pub struct AppEinstellung {
    pub id: i32,
    pub name: String,
    /// Signatur-Secret der App
    pub secret: String,
}

impl std::fmt::Debug for AppEinstellung {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppEinstellung")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("secret", &"<verborgen>")
            .finish()
    }
}

impl ServerConfig {
    /// Laedt und validiert die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    pub fn laden(pfad: &str) -> anyhow::Result<Self> {
        let config = match std::fs::read_to_string(pfad) {
            Ok(inhalt) => toml::from_str::<Self>(&inhalt)
                .with_context(|| format!("Konfigurationsfehler in '{pfad}'"))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    pfad = pfad,
                    "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
                );
                Self::default()
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Konfigurationsdatei '{pfad}' nicht lesbar"))
            }
        };
        config.validieren()?;
        Ok(config)
    }

    /// Prueft Wertebereiche, die serde allein nicht abdeckt
    pub fn validieren(&self) -> anyhow::Result<()> {
        if !matches!(self.server.env.as_str(), "local" | "dev" | "prod") {
            bail!("Unbekannte Umgebung '{}' (erlaubt: local, dev, prod)", self.server.env);
        }
        if !matches!(self.logging.format.as_str(), "auto" | "text" | "json") {
            bail!("Unbekanntes Log-Format '{}' (erlaubt: auto, text, json)", self.logging.format);
        }
        if self.token.ttl_sekunden == 0 {
            bail!("token.ttl_sekunden muss groesser als 0 sein");
        }
        if self.datenbank.max_verbindungen == 0 {
            bail!("datenbank.max_verbindungen muss groesser als 0 sein");
        }
        self.passwort_hasher()?;
        self.grpc_konfig()?;

        let mut ids = HashSet::new();
        for app in &self.apps {
            if app.id <= 0 {
                bail!("App '{}': id muss groesser als 0 sein", app.name);
            }
            if app.secret.is_empty() {
                bail!("App {}: secret darf nicht leer sein", app.id);
            }
            if !ids.insert(app.id) {
                bail!("App-ID {} ist doppelt konfiguriert", app.id);
            }
        }
        Ok(())
    }

    /// Argon2id-Hasher mit den konfigurierten Kosten
    pub fn passwort_hasher(&self) -> anyhow::Result<PasswortHasher> {
        let p = &self.passwort;
        PasswortHasher::neu(p.speicher_kib, p.iterationen, p.parallelitaet)
            .map_err(|e| anyhow::anyhow!("Ungueltige Argon2-Parameter: {e}"))
    }

    /// Konfiguration des gRPC-Servers
    pub fn grpc_konfig(&self) -> anyhow::Result<GrpcServerKonfig> {
        Ok(GrpcServerKonfig::aus_adresse(
            &self.grpc.bind_adresse,
            self.grpc.port,
            Duration::from_secs(self.grpc.timeout_sekunden),
        )?)
    }

    /// Konfiguration des Datenbank-Pools
    pub fn datenbank_konfig(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.datenbank.url.clone(),
            max_verbindungen: self.datenbank.max_verbindungen,
            wal: self.datenbank.wal,
        }
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token.ttl_sekunden)
    }
}
