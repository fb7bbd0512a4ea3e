//! Datenbankmodelle fuer den SSO-Dienst
//!
//! Diese Typen repraesentieren Datensaetze aus der Datenbank.
//! Passwort-Hashes und Signatur-Secrets tauchen nie in `Debug`-Ausgaben auf.

use chrono::{DateTime, Utc};
use sso_core::{AppId, UserId};

// ---------------------------------------------------------------------------
// Benutzer
// ---------------------------------------------------------------------------

/// Benutzer-Datensatz aus der Datenbank
#[derive(Clone)]
pub struct BenutzerRecord {
    pub id: UserId,
    pub email: String,
    /// Argon2id-PHC-String (inkl. Salt)
    pub pass_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for BenutzerRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenutzerRecord")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("pass_hash", &"<redacted>")
            .field("is_admin", &self.is_admin)
            .field("created_at", &self.created_at)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Apps
// ---------------------------------------------------------------------------

/// App-Datensatz aus der Datenbank
#[derive(Clone)]
pub struct AppRecord {
    pub id: AppId,
    pub name: String,
    /// Signatur-Secret fuer ausgestellte Tokens
    pub secret: Vec<u8>,
}

impl std::fmt::Debug for AppRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Daten zum Provisionieren einer App
#[derive(Debug, Clone)]
pub struct NeueApp<'a> {
    pub id: AppId,
    pub name: &'a str,
    pub secret: &'a [u8],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_verbirgt_hash_und_secret() {
        let benutzer = BenutzerRecord {
            id: UserId(1),
            email: "a@x.com".into(),
            pass_hash: "$argon2id$geheim".into(),
            is_admin: false,
            created_at: Utc::now(),
        };
        let ausgabe = format!("{benutzer:?}");
        assert!(ausgabe.contains("a@x.com"));
        assert!(!ausgabe.contains("geheim"));

        let app = AppRecord {
            id: AppId(7),
            name: "test".into(),
            secret: b"super-secret".to_vec(),
        };
        assert!(!format!("{app:?}").contains("super"));
    }
}
