//! Passwort-Hashing mit Argon2id
//!
//! Stellt Passwort-Hashfunktionen mit Argon2id bereit. Jeder Hash bettet
//! einen zufaelligen Salt ein, gleiche Passwoerter ergeben daher
//! unterschiedliche PHC-Strings.

use argon2::{
    password_hash::{self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

/// Standard-Speicherkosten: 64 MiB
pub const STANDARD_SPEICHER_KIB: u32 = 64 * 1024;
/// Standard-Iterationen
pub const STANDARD_ITERATIONEN: u32 = 3;
/// Standard-Parallelitaet
pub const STANDARD_PARALLELITAET: u32 = 1;

/// Argon2id-Hasher mit festen Kostenparametern
///
/// Die Verifikation liest die Parameter aus dem gespeicherten Hash, aeltere
/// Hashes bleiben nach einer Parameteraenderung also pruefbar.
#[derive(Debug, Clone)]
pub struct PasswortHasher {
    params: Params,
}

impl PasswortHasher {
    /// Erstellt einen Hasher mit den angegebenen Kosten
    pub fn neu(speicher_kib: u32, iterationen: u32, parallelitaet: u32) -> Result<Self, argon2::Error> {
        let params = Params::new(speicher_kib, iterationen, parallelitaet, None)?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hasht ein Passwort mit einem zufaelligen Salt
    ///
    /// Gibt den PHC-String zurueck (inkl. Algorithmus, Parameter und Salt).
    pub fn hashen(&self, passwort: &str) -> Result<String, password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(passwort.as_bytes(), &salt)
            .map(|hash| hash.to_string())
    }

    /// Verifiziert ein Passwort gegen einen gespeicherten PHC-Hash
    ///
    /// `Ok(false)` bei falschem Passwort, `Err` bei unlesbarem Hash.
    pub fn verifizieren(&self, passwort: &str, hash: &str) -> Result<bool, password_hash::Error> {
        let parsed_hash = PasswordHash::new(hash)?;

        match self.argon2().verify_password(passwort.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl Default for PasswortHasher {
    fn default() -> Self {
        let params = Params::new(
            STANDARD_SPEICHER_KIB,
            STANDARD_ITERATIONEN,
            STANDARD_PARALLELITAET,
            None,
        )
        .unwrap_or(Params::DEFAULT);
        Self { params }
    }
}
