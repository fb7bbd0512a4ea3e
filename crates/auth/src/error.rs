//! Fehlertypen fuer den Auth-Service
//!
//! Jeder Fehler traegt den Namen der Operation, in der er entstand.
//! Speicher- und Signaturfehler bleiben ueber `source()` bzw. die typisierten
//! Felder inspizierbar. `FehlerArt` erlaubt Aufrufern ein `match` ohne
//! String-Vergleiche.

use sso_core::{AppId, UserId};
use sso_db::DbError;
use thiserror::Error;

use crate::token::TokenError;

/// Alle moeglichen Fehler im Auth-Service
#[derive(Debug, Error)]
pub enum AuthError {
    // --- Vom Benutzer korrigierbar ---
    /// Unbekannte E-Mail und falsches Passwort sind absichtlich nicht unterscheidbar
    #[error("{operation}: Ungueltige Anmeldedaten")]
    UngueltigeAnmeldedaten { operation: &'static str },

    #[error("{operation}: Benutzer existiert bereits")]
    BenutzerExistiertBereits {
        operation: &'static str,
        #[source]
        quelle: DbError,
    },

    #[error("{operation}: Ungueltige Eingabe: {feld} darf nicht leer sein")]
    UngueltigeEingabe {
        operation: &'static str,
        feld: &'static str,
    },

    // --- Fuer Betreiber sichtbar ---
    #[error("{operation}: App {app_id} nicht aufloesbar: {quelle}")]
    AppAufloesungFehlgeschlagen {
        operation: &'static str,
        app_id: AppId,
        #[source]
        quelle: DbError,
    },

    #[error("{operation}: Identitaet {user_id} nicht aufloesbar")]
    IdentitaetNichtAufloesbar {
        operation: &'static str,
        user_id: UserId,
        #[source]
        quelle: DbError,
    },

    // --- Infrastruktur ---
    #[error("{operation}: Passwort-Hashing fehlgeschlagen: {quelle}")]
    PasswortHashing {
        operation: &'static str,
        #[source]
        quelle: HashingFehler,
    },

    #[error("{operation}: Token-Ausstellung fehlgeschlagen: {quelle}")]
    TokenAusstellung {
        operation: &'static str,
        #[source]
        quelle: TokenError,
    },

    #[error("{operation}: Speicherfehler: {quelle}")]
    Speicher {
        operation: &'static str,
        #[source]
        quelle: DbError,
    },
}

/// Ursache eines fehlgeschlagenen Hash- oder Vergleichsvorgangs
#[derive(Debug, Error)]
pub enum HashingFehler {
    #[error("Argon2: {0}")]
    Argon2(#[from] argon2::password_hash::Error),

    #[error("Hashing-Task abgebrochen: {0}")]
    Abgebrochen(#[from] tokio::task::JoinError),
}

/// Art eines `AuthError` ohne Kontext
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FehlerArt {
    UngueltigeAnmeldedaten,
    BenutzerExistiertBereits,
    UngueltigeEingabe,
    AppAufloesungFehlgeschlagen,
    IdentitaetNichtAufloesbar,
    HashingFehlgeschlagen,
    TokenAusstellungFehlgeschlagen,
    Speicher,
}

impl AuthError {
    /// Gibt die Fehlerart zurueck
    pub fn art(&self) -> FehlerArt {
        match self {
            Self::UngueltigeAnmeldedaten { .. } => FehlerArt::UngueltigeAnmeldedaten,
            Self::BenutzerExistiertBereits { .. } => FehlerArt::BenutzerExistiertBereits,
            Self::UngueltigeEingabe { .. } => FehlerArt::UngueltigeEingabe,
            Self::AppAufloesungFehlgeschlagen { .. } => FehlerArt::AppAufloesungFehlgeschlagen,
            Self::IdentitaetNichtAufloesbar { .. } => FehlerArt::IdentitaetNichtAufloesbar,
            Self::PasswortHashing { .. } => FehlerArt::HashingFehlgeschlagen,
            Self::TokenAusstellung { .. } => FehlerArt::TokenAusstellungFehlgeschlagen,
            Self::Speicher { .. } => FehlerArt::Speicher,
        }
    }

    /// Name der Operation, in der der Fehler entstand
    pub fn operation(&self) -> &'static str {
        match self {
            Self::UngueltigeAnmeldedaten { operation }
            | Self::BenutzerExistiertBereits { operation, .. }
            | Self::UngueltigeEingabe { operation, .. }
            | Self::AppAufloesungFehlgeschlagen { operation, .. }
            | Self::IdentitaetNichtAufloesbar { operation, .. }
            | Self::PasswortHashing { operation, .. }
            | Self::TokenAusstellung { operation, .. }
            | Self::Speicher { operation, .. } => operation,
        }
    }
}

/// Result-Alias fuer den Auth-Service
pub type AuthResult<T> = Result<T, AuthError>;
