//! sso-grpc – gRPC-Fassade des SSO-Dienstes
//!
//! Stellt die drei Operationen der Auth-Engine ueber tonic bereit:
//! - `Register` – neuen Benutzer anlegen
//! - `Login` – Token fuer eine App ausstellen
//! - `IsAdmin` – globale Admin-Abfrage
//!
//! Fehler der Engine werden in [`error::auth_fehler_zu_status`] auf
//! gRPC-Statuscodes abgebildet.

pub mod error;
pub mod server;
pub mod service;

pub use error::{auth_fehler_zu_status, GrpcError};
pub use server::{GrpcServer, GrpcServerKonfig};
pub use service::{proto, AuthGrpcService};
