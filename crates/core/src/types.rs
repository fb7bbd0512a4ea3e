//! Gemeinsame Identifikationstypen fuer den SSO-Dienst
//!
//! Alle IDs verwenden das Newtype-Pattern um Verwechslungen zwischen
//! Benutzer- und App-IDs zur Compilezeit auszuschliessen. Die Werte werden
//! vom Speicher vergeben, es gibt daher keine Zufalls-Konstruktoren.

use serde::{Deserialize, Serialize};

/// Numerische Benutzer-ID (vom Speicher bei der Registrierung vergeben)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Gibt den inneren Wert zurueck
    pub fn inner(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user:{}", self.0)
    }
}

/// Numerische App-ID (extern provisioniert)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(pub i32);

impl AppId {
    /// Gibt den inneren Wert zurueck
    pub fn inner(&self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for AppId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "app:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_display() {
        assert_eq!(UserId(42).to_string(), "user:42");
    }

    #[test]
    fn app_id_display() {
        assert_eq!(AppId(7).to_string(), "app:7");
    }

    #[test]
    fn ids_serialisieren_als_zahl() {
        assert_eq!(serde_json::to_string(&UserId(1)).unwrap(), "1");
        assert_eq!(serde_json::to_string(&AppId(7)).unwrap(), "7");

        let uid: UserId = serde_json::from_str("99").unwrap();
        assert_eq!(uid, UserId(99));
    }
}
