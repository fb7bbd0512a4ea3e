//! sso-auth – Auth-Engine des SSO-Dienstes
//!
//! Dieses Crate implementiert:
//! - Passwort-Hashing mit Argon2id (konfigurierbare Kosten)
//! - Ausstellung und Pruefung app-gebundener Identitaets-Tokens (JWT, HS256)
//! - AuthService (Login, Registrierung, Admin-Abfrage)
//!
//! Der Service besitzt keinen veraenderlichen Zustand. Speicher und
//! Token-Aussteller werden beim Erstellen als Traits injiziert.

pub mod error;
pub mod password;
pub mod service;
pub mod token;

// Bequeme Re-Exporte
pub use error::{AuthError, AuthResult, FehlerArt, HashingFehler};
pub use password::PasswortHasher;
pub use service::AuthService;
pub use token::{token_pruefen, JwtAussteller, TokenClaims, TokenError, TokenIssuer};
