//! Fehlertypen und Status-Abbildung fuer die gRPC-Fassade

use sso_auth::{AuthError, FehlerArt};
use thiserror::Error;
use tonic::Status;

/// Fehler beim Betrieb des gRPC-Servers
#[derive(Debug, Error)]
pub enum GrpcError {
    #[error("Transportfehler: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("Ungueltige Bind-Adresse '{adresse}': {quelle}")]
    Adresse {
        adresse: String,
        #[source]
        quelle: std::net::AddrParseError,
    },
}

/// Bildet einen Engine-Fehler auf einen gRPC-Status ab
///
/// Infrastrukturfehler werden ohne Details gemeldet, Speicher- und
/// Signaturfehler landen nur im Log.
pub fn auth_fehler_zu_status(e: &AuthError) -> Status {
    match e.art() {
        FehlerArt::UngueltigeAnmeldedaten => Status::unauthenticated("Ungueltige E-Mail oder Passwort"),
        FehlerArt::BenutzerExistiertBereits => Status::already_exists("Benutzer existiert bereits"),
        FehlerArt::UngueltigeEingabe => Status::invalid_argument(e.to_string()),
        FehlerArt::AppAufloesungFehlgeschlagen => match e {
            AuthError::AppAufloesungFehlgeschlagen { app_id, .. } => {
                Status::failed_precondition(format!("App {} nicht aufloesbar", app_id.inner()))
            }
            _ => Status::failed_precondition("App nicht aufloesbar"),
        },
        FehlerArt::IdentitaetNichtAufloesbar => Status::not_found("Benutzer nicht gefunden"),
        FehlerArt::HashingFehlgeschlagen
        | FehlerArt::TokenAusstellungFehlgeschlagen
        | FehlerArt::Speicher => {
            tracing::error!(operation = e.operation(), fehler = %e, "Interner Fehler");
            Status::internal("Interner Fehler")
        }
    }
}
