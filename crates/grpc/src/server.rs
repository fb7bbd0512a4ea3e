//! gRPC-Server fuer den SSO-Dienst

use std::{future::Future, net::SocketAddr, sync::Arc, time::Duration};

use sso_auth::AuthService;
use tonic::transport::Server;

use crate::error::GrpcError;
use crate::service::{proto::auth_server::AuthServer, AuthGrpcService};

/// gRPC-Server-Konfiguration
#[derive(Debug, Clone)]
pub struct GrpcServerKonfig {
    pub bind_addr: SocketAddr,
    /// Zeitlimit pro Request, danach antwortet tonic mit CANCELLED
    pub timeout: Duration,
}

impl Default for GrpcServerKonfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 44044)),
            timeout: Duration::from_secs(10),
        }
    }
}

impl GrpcServerKonfig {
    /// Baut die Konfiguration aus Adresse und Port
    pub fn aus_adresse(adresse: &str, port: u16, timeout: Duration) -> Result<Self, GrpcError> {
        let text = format!("{adresse}:{port}");
        let bind_addr = text.parse().map_err(|quelle| GrpcError::Adresse {
            adresse: text.clone(),
            quelle,
        })?;
        Ok(Self { bind_addr, timeout })
    }
}

/// gRPC-Server mit der Auth-Fassade
pub struct GrpcServer {
    konfig: GrpcServerKonfig,
}

impl GrpcServer {
    pub fn neu(konfig: GrpcServerKonfig) -> Self {
        Self { konfig }
    }

    /// Startet den Server und laeuft bis `shutdown` aufgeloest wird
    ///
    /// Laufende Requests werden beim Shutdown noch zu Ende bearbeitet.
    pub async fn starten<F>(self, auth: Arc<AuthService>, shutdown: F) -> Result<(), GrpcError>
    where
        F: Future<Output = ()> + Send,
    {
        tracing::info!(addr = %self.konfig.bind_addr, "gRPC-Server gestartet");

        Server::builder()
            .timeout(self.konfig.timeout)
            .trace_fn(|req| tracing::info_span!("grpc", pfad = %req.uri().path()))
            .add_service(AuthServer::new(AuthGrpcService::neu(auth)))
            .serve_with_shutdown(self.konfig.bind_addr, shutdown)
            .await?;

        tracing::info!(addr = %self.konfig.bind_addr, "gRPC-Server gestoppt");
        Ok(())
    }
}
