//! Auth-Service des SSO-Dienstes
//!
//! Zentrale Entscheidungslogik fuer Login, Registrierung und Admin-Abfrage.
//! Der Service haelt nur unveraenderliche Konfiguration und Trait-Objekte,
//! er kann ohne Locking von beliebig vielen Requests gleichzeitig genutzt
//! werden. Passwort-Hashing laeuft auf dem Blocking-Pool von tokio.

use std::{sync::Arc, time::Duration};

use sso_core::{AppId, UserId};
use sso_db::{AppProvider, DbError, UserProvider, UserSaver};
use tracing::instrument;

use crate::{
    error::{AuthError, AuthResult, HashingFehler},
    password::PasswortHasher,
    token::TokenIssuer,
};

const OP_ANMELDEN: &str = "auth.anmelden";
const OP_REGISTRIEREN: &str = "auth.registrieren";
const OP_IST_ADMIN: &str = "auth.ist_admin";

/// Auth-Service – zentraler Einstiegspunkt fuer alle Authentifizierungsvorgaenge
pub struct AuthService {
    user_saver: Arc<dyn UserSaver>,
    user_provider: Arc<dyn UserProvider>,
    app_provider: Arc<dyn AppProvider>,
    token_issuer: Arc<dyn TokenIssuer>,
    hasher: PasswortHasher,
    token_ttl: Duration,
}

impl AuthService {
    /// Erstellt einen neuen AuthService
    pub fn neu(
        user_saver: Arc<dyn UserSaver>,
        user_provider: Arc<dyn UserProvider>,
        app_provider: Arc<dyn AppProvider>,
        token_issuer: Arc<dyn TokenIssuer>,
        hasher: PasswortHasher,
        token_ttl: Duration,
    ) -> Self {
        Self {
            user_saver,
            user_provider,
            app_provider,
            token_issuer,
            hasher,
            token_ttl,
        }
    }

    /// Konfigurierte Token-Lebensdauer
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Meldet einen Benutzer fuer eine App an und gibt ein signiertes Token zurueck
    ///
    /// Unbekannte E-Mail und falsches Passwort liefern denselben Fehler.
    #[instrument(name = "auth.anmelden", skip_all, fields(email = %email, app_id = %app_id))]
    pub async fn anmelden(&self, email: &str, passwort: &str, app_id: AppId) -> AuthResult<String> {
        tracing::info!("Anmeldeversuch");

        if email.is_empty() || passwort.is_empty() {
            tracing::warn!("Leere Anmeldedaten");
            return Err(AuthError::UngueltigeAnmeldedaten {
                operation: OP_ANMELDEN,
            });
        }

        let benutzer = match self.user_provider.user_by_email(email).await {
            Ok(Some(benutzer)) => benutzer,
            Ok(None) => {
                tracing::warn!("Benutzer nicht gefunden");
                return Err(AuthError::UngueltigeAnmeldedaten {
                    operation: OP_ANMELDEN,
                });
            }
            Err(e) if e.ist_nicht_gefunden() => {
                tracing::warn!(fehler = %e, "Benutzer nicht gefunden");
                return Err(AuthError::UngueltigeAnmeldedaten {
                    operation: OP_ANMELDEN,
                });
            }
            Err(e) => {
                tracing::error!(fehler = %e, "Benutzer konnte nicht geladen werden");
                return Err(AuthError::Speicher {
                    operation: OP_ANMELDEN,
                    quelle: e,
                });
            }
        };

        match self.passwort_pruefen(passwort, &benutzer.pass_hash).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(user_id = %benutzer.id, "Fehlgeschlagener Login-Versuch");
                return Err(AuthError::UngueltigeAnmeldedaten {
                    operation: OP_ANMELDEN,
                });
            }
            Err(e) => {
                tracing::warn!(user_id = %benutzer.id, fehler = %e, "Passwortvergleich fehlgeschlagen");
                return Err(AuthError::UngueltigeAnmeldedaten {
                    operation: OP_ANMELDEN,
                });
            }
        }

        let app = match self.app_provider.app_by_id(app_id).await {
            Ok(Some(app)) => app,
            Ok(None) => {
                tracing::warn!("App nicht gefunden");
                return Err(AuthError::AppAufloesungFehlgeschlagen {
                    operation: OP_ANMELDEN,
                    app_id,
                    quelle: DbError::nicht_gefunden(app_id.to_string()),
                });
            }
            Err(e) => {
                tracing::error!(fehler = %e, "App konnte nicht geladen werden");
                return Err(AuthError::AppAufloesungFehlgeschlagen {
                    operation: OP_ANMELDEN,
                    app_id,
                    quelle: e,
                });
            }
        };

        let token = self
            .token_issuer
            .issue(&benutzer, &app, self.token_ttl)
            .map_err(|e| {
                tracing::error!(user_id = %benutzer.id, fehler = %e, "Token konnte nicht ausgestellt werden");
                AuthError::TokenAusstellung {
                    operation: OP_ANMELDEN,
                    quelle: e,
                }
            })?;

        tracing::info!(user_id = %benutzer.id, "Benutzer angemeldet");
        Ok(token)
    }

    /// Registriert einen neuen Benutzer und gibt die vergebene ID zurueck
    ///
    /// Die Eindeutigkeit der E-Mail erzwingt der Speicher, nicht der Service.
    #[instrument(name = "auth.registrieren", skip_all, fields(email = %email))]
    pub async fn registrieren(&self, email: &str, passwort: &str) -> AuthResult<UserId> {
        tracing::info!("Registriere Benutzer");

        if email.is_empty() {
            tracing::warn!("Leere E-Mail");
            return Err(AuthError::UngueltigeEingabe {
                operation: OP_REGISTRIEREN,
                feld: "email",
            });
        }
        if passwort.is_empty() {
            tracing::warn!("Leeres Passwort");
            return Err(AuthError::UngueltigeEingabe {
                operation: OP_REGISTRIEREN,
                feld: "passwort",
            });
        }

        let pass_hash = self.passwort_hashen(passwort).await.map_err(|e| {
            tracing::error!(fehler = %e, "Passwort-Hash konnte nicht erzeugt werden");
            AuthError::PasswortHashing {
                operation: OP_REGISTRIEREN,
                quelle: e,
            }
        })?;

        match self.user_saver.save_user(email, &pass_hash).await {
            Ok(user_id) => {
                tracing::info!(user_id = %user_id, "Neuer Benutzer registriert");
                Ok(user_id)
            }
            Err(e) if e.ist_eindeutigkeit() => {
                tracing::warn!("Benutzer existiert bereits");
                Err(AuthError::BenutzerExistiertBereits {
                    operation: OP_REGISTRIEREN,
                    quelle: e,
                })
            }
            Err(e) => {
                tracing::error!(fehler = %e, "Benutzer konnte nicht gespeichert werden");
                Err(AuthError::Speicher {
                    operation: OP_REGISTRIEREN,
                    quelle: e,
                })
            }
        }
    }

    /// Gibt zurueck ob der Benutzer Administrator ist (app-unabhaengig)
    #[instrument(name = "auth.ist_admin", skip_all, fields(user_id = %user_id))]
    pub async fn ist_admin(&self, user_id: UserId) -> AuthResult<bool> {
        tracing::info!("Pruefe Admin-Status");

        match self.user_provider.is_admin(user_id).await {
            Ok(is_admin) => {
                tracing::info!(is_admin, "Admin-Status geprueft");
                Ok(is_admin)
            }
            Err(e) if e.ist_nicht_gefunden() => {
                tracing::warn!("Benutzer nicht gefunden");
                Err(AuthError::IdentitaetNichtAufloesbar {
                    operation: OP_IST_ADMIN,
                    user_id,
                    quelle: e,
                })
            }
            Err(e) => {
                tracing::error!(fehler = %e, "Admin-Status konnte nicht gelesen werden");
                Err(AuthError::Speicher {
                    operation: OP_IST_ADMIN,
                    quelle: e,
                })
            }
        }
    }

    async fn passwort_hashen(&self, passwort: &str) -> Result<String, HashingFehler> {
        let hasher = self.hasher.clone();
        let passwort = passwort.to_owned();

        Ok(tokio::task::spawn_blocking(move || hasher.hashen(&passwort)).await??)
    }

    async fn passwort_pruefen(&self, passwort: &str, hash: &str) -> Result<bool, HashingFehler> {
        let hasher = self.hasher.clone();
        let passwort = passwort.to_owned();
        let hash = hash.to_owned();

        Ok(tokio::task::spawn_blocking(move || hasher.verifizieren(&passwort, &hash)).await??)
    }
}
