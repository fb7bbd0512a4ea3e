//! sso-server – Bibliotheks-Root
//!
//! Composition Root: verbindet Speicher, Token-Aussteller, Passwort-Hasher
//! und Auth-Engine und stellt sie ueber gRPC bereit.

pub mod config;

use std::{future::Future, sync::Arc};

use anyhow::{Context, Result};
use config::ServerConfig;
use sso_auth::{AuthService, JwtAussteller};
use sso_core::AppId;
use sso_db::{NeueApp, SqliteDb};
use sso_grpc::GrpcServer;

/// Haelt den Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Oeffnet den Speicher, fuehrt Migrationen aus und legt konfigurierte Apps an
    pub async fn speicher_oeffnen(&self) -> Result<SqliteDb> {
        tracing::info!(url = %self.config.datenbank.url, "Datenbankverbindung wird hergestellt");

        let db = SqliteDb::oeffnen(&self.config.datenbank_konfig())
            .await
            .context("Datenbank oder Migrationen fehlgeschlagen")?;

        for app in &self.config.apps {
            db.app_speichern(NeueApp {
                id: AppId(app.id),
                name: &app.name,
                secret: app.secret.as_bytes(),
            })
            .await
            .with_context(|| format!("App {} konnte nicht angelegt werden", app.id))?;
            tracing::info!(app_id = app.id, name = %app.name, "App bereitgestellt");
        }

        Ok(db)
    }

    /// Baut die Auth-Engine ueber dem gegebenen Speicher
    pub fn auth_service(&self, db: SqliteDb) -> Result<AuthService> {
        let speicher = Arc::new(db);
        Ok(AuthService::neu(
            speicher.clone(),
            speicher.clone(),
            speicher,
            Arc::new(JwtAussteller::neu()),
            self.config.passwort_hasher()?,
            self.config.token_ttl(),
        ))
    }

    /// Startet alle Subsysteme und laeuft bis Ctrl-C oder SIGTERM
    pub async fn starten(self) -> Result<()> {
        self.starten_bis(shutdown_signal()).await
    }

    /// Startet alle Subsysteme und laeuft bis `shutdown` aufgeloest wird
    ///
    /// Reihenfolge:
    /// 1. Datenbank oeffnen, Migrationen, Apps bereitstellen
    /// 2. Auth-Engine aufbauen
    /// 3. gRPC-Server starten
    /// 4. Nach dem Shutdown laufende Requests abschliessen, Pool schliessen
    pub async fn starten_bis<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        tracing::info!(env = %self.config.server.env, "SSO-Dienst startet");

        let grpc_konfig = self.config.grpc_konfig()?;
        let db = self.speicher_oeffnen().await?;

        let ergebnis = match self.auth_service(db.clone()) {
            Ok(auth) => GrpcServer::neu(grpc_konfig)
                .starten(Arc::new(auth), shutdown)
                .await
                .context("gRPC-Server beendet mit Fehler"),
            Err(e) => Err(e),
        };

        // Pool auch im Fehlerfall schliessen
        db.schliessen().await;

        match &ergebnis {
            Ok(()) => tracing::info!("SSO-Dienst gestoppt"),
            Err(e) => tracing::error!(fehler = %e, "SSO-Dienst mit Fehler beendet"),
        }
        ergebnis
    }
}

/// Wartet auf Ctrl-C oder SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(fehler = %e, "Ctrl-C-Handler konnte nicht installiert werden");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(fehler = %e, "SIGTERM-Handler konnte nicht installiert werden");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = sigterm => {},
    }
    tracing::info!("Shutdown-Signal empfangen, Server wird beendet");
}
