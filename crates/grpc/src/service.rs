//! gRPC-Service-Implementierung der Auth-Fassade
//!
//! Prueft Pflichtfelder, ruft die Engine auf und bildet deren Fehler auf
//! gRPC-Statuscodes ab. Die Fassade selbst enthaelt keine Geschaeftslogik.

use std::sync::Arc;

use sso_auth::AuthService;
use sso_core::{AppId, UserId};
use tonic::{Request, Response, Status};

use crate::error::auth_fehler_zu_status;

// Generierter Code aus tonic-build
pub mod proto {
    tonic::include_proto!("auth");
}

use proto::*;

pub struct AuthGrpcService {
    auth: Arc<AuthService>,
}

impl AuthGrpcService {
    pub fn neu(auth: Arc<AuthService>) -> Self {
        Self { auth }
    }
}

#[tonic::async_trait]
impl proto::auth_server::Auth for AuthGrpcService {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let body = request.into_inner();
        if body.email.is_empty() {
            return Err(Status::invalid_argument("email ist erforderlich"));
        }
        if body.password.is_empty() {
            return Err(Status::invalid_argument("password ist erforderlich"));
        }

        let user_id = self
            .auth
            .registrieren(&body.email, &body.password)
            .await
            .map_err(|e| auth_fehler_zu_status(&e))?;

        Ok(Response::new(RegisterResponse {
            user_id: user_id.inner(),
        }))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let body = request.into_inner();
        if body.email.is_empty() {
            return Err(Status::invalid_argument("email ist erforderlich"));
        }
        if body.password.is_empty() {
            return Err(Status::invalid_argument("password ist erforderlich"));
        }
        if body.app_id == 0 {
            return Err(Status::invalid_argument("app_id ist erforderlich"));
        }

        let token = self
            .auth
            .anmelden(&body.email, &body.password, AppId(body.app_id))
            .await
            .map_err(|e| auth_fehler_zu_status(&e))?;

        Ok(Response::new(LoginResponse { token }))
    }

    async fn is_admin(
        &self,
        request: Request<IsAdminRequest>,
    ) -> Result<Response<IsAdminResponse>, Status> {
        let body = request.into_inner();
        if body.user_id == 0 {
            return Err(Status::invalid_argument("user_id ist erforderlich"));
        }

        let is_admin = self
            .auth
            .ist_admin(UserId(body.user_id))
            .await
            .map_err(|e| auth_fehler_zu_status(&e))?;

        Ok(Response::new(IsAdminResponse { is_admin }))
    }
}
