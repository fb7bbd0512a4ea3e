//! Repository-Trait-Definitionen
//!
//! Die Auth-Engine kennt den Speicher nur ueber diese drei Faehigkeiten
//! und haelt sie als `Arc<dyn ...>`.

use async_trait::async_trait;
use sso_core::{AppId, UserId};

use crate::error::DbError;
use crate::models::{AppRecord, BenutzerRecord};

/// Result-Alias fuer alle Repository-Operationen
pub type DbResult<T> = Result<T, DbError>;

/// Konfiguration fuer die Datenbankverbindung
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Verbindungs-URL (z.B. "sqlite://storage/sso.db")
    pub url: String,
    /// Maximale Anzahl gleichzeitiger Verbindungen im Pool
    pub max_verbindungen: u32,
    /// Journal im WAL-Modus statt DELETE
    pub wal: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://storage/sso.db".into(),
            max_verbindungen: 5,
            wal: true,
        }
    }
}

/// Legt neue Benutzer an
#[async_trait]
pub trait UserSaver: Send + Sync {
    /// Speichert einen Benutzer und gibt die vergebene ID zurueck.
    ///
    /// Ist die E-Mail bereits vergeben, wird `DbError::Eindeutigkeit` geliefert.
    async fn save_user(&self, email: &str, pass_hash: &str) -> DbResult<UserId>;
}

/// Liest Benutzer und deren Rechte
#[async_trait]
pub trait UserProvider: Send + Sync {
    /// Einen Benutzer anhand seiner E-Mail laden (exakter Vergleich)
    async fn user_by_email(&self, email: &str) -> DbResult<Option<BenutzerRecord>>;

    /// Admin-Flag eines Benutzers. `DbError::NichtGefunden` wenn die ID unbekannt ist.
    async fn is_admin(&self, user_id: UserId) -> DbResult<bool>;
}

/// Liest registrierte Apps
#[async_trait]
pub trait AppProvider: Send + Sync {
    /// Eine App anhand ihrer ID laden
    async fn app_by_id(&self, app_id: AppId) -> DbResult<Option<AppRecord>>;
}
