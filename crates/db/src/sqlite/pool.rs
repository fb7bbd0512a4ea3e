//! SQLite-Pool und Schema-Migrationen

use std::{str::FromStr, time::Duration};

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::error::DbError;
use crate::repository::DatabaseConfig;

/// Wartezeit auf eine gesperrte Datenbank, bevor SQLite `SQLITE_BUSY` meldet
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Credential-Store auf SQLite
///
/// Klone teilen sich denselben Pool.
#[derive(Debug, Clone)]
pub struct SqliteDb {
    pub(crate) pool: SqlitePool,
}

fn verbindungsoptionen(config: &DatabaseConfig) -> Result<SqliteConnectOptions, DbError> {
    let journal = match config.wal {
        true => SqliteJournalMode::Wal,
        false => SqliteJournalMode::Delete,
    };
    Ok(SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .journal_mode(journal)
        .busy_timeout(BUSY_TIMEOUT)
        .foreign_keys(true))
}

impl SqliteDb {
    /// Oeffnet die Datenbankdatei (legt Datei und Verzeichnis bei Bedarf an)
    /// und bringt das Schema auf den aktuellen Stand.
    pub async fn oeffnen(config: &DatabaseConfig) -> Result<Self, DbError> {
        let opts = verbindungsoptionen(config)?;

        let verzeichnis = opts.get_filename().parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(verzeichnis) = verzeichnis {
            tokio::fs::create_dir_all(verzeichnis).await?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_verbindungen)
            .connect_with(opts)
            .await?;
        info!(url = %config.url, wal = config.wal, "SQLite-Speicher geoeffnet");

        let db = Self { pool };
        db.migrationen_ausfuehren().await?;
        Ok(db)
    }

    /// Wendet alle noch fehlenden eingebetteten Migrationen an
    pub async fn migrationen_ausfuehren(&self) -> Result<(), DbError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Schema aktuell");
        Ok(())
    }

    /// Schliesst den Pool und wartet auf offene Verbindungen
    pub async fn schliessen(&self) {
        self.pool.close().await;
        info!("SQLite-Speicher geschlossen");
    }

    /// Fluechtige Datenbank im Speicher, Schema bereits migriert
    ///
    /// Genau eine Verbindung ohne Ablaufzeit, sonst waere der Inhalt beim
    /// naechsten Verbindungsaufbau verloren.
    pub async fn in_memory() -> Result<Self, DbError> {
        let opts = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opts)
            .await?;

        let db = Self { pool };
        db.migrationen_ausfuehren().await?;
        Ok(db)
    }
}
