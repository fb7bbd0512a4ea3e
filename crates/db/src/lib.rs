//! sso-db – Credential-Store
//!
//! Dieses Crate stellt die Speicher-Schnittstellen bereit, gegen die die
//! Auth-Engine programmiert ist (`UserSaver`, `UserProvider`, `AppProvider`),
//! sowie deren SQLite-Implementierung mit eingebetteten Migrationen.

pub mod error;
pub mod models;
pub mod repository;
pub mod sqlite;

pub use error::DbError;
pub use models::{AppRecord, BenutzerRecord, NeueApp};
pub use repository::{AppProvider, DatabaseConfig, DbResult, UserProvider, UserSaver};
pub use sqlite::SqliteDb;
