//! Identitaets-Tokens fuer registrierte Apps
//!
//! Ein Token ist ein HS256-JWT, signiert mit dem Secret der anfragenden App.
//! Nur wer das Secret kennt, kann die Signatur pruefen. Tokens werden nie
//! gespeichert, gueltig ist jedes korrekt signierte Token im Zeitfenster
//! `nbf <= jetzt < exp`.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sso_core::{AppId, UserId};
use sso_db::{AppRecord, BenutzerRecord};
use thiserror::Error;
use uuid::Uuid;

/// Inhalt eines Identitaets-Tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Benutzer-ID
    pub uid: UserId,
    /// E-Mail des Benutzers, damit die App ihn ohne Rueckfrage adressieren kann
    pub email: String,
    /// App, fuer die das Token ausgestellt wurde
    pub app_id: AppId,
    /// Ausstellungszeitpunkt (Unix-Sekunden)
    pub iat: i64,
    /// Nicht gueltig vor (gleich `iat`)
    pub nbf: i64,
    /// Ablaufzeitpunkt (Unix-Sekunden, exklusiv)
    pub exp: i64,
    /// Eindeutige Token-ID
    pub jti: Uuid,
}

/// Fehler beim Ausstellen oder Pruefen von Tokens
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Signatur-Schluessel fuer {0} nicht verfuegbar")]
    SchluesselFehlt(AppId),

    #[error("Ungueltige Token-Lebensdauer: {0}")]
    UngueltigeLebensdauer(String),

    #[error("Signieren fehlgeschlagen: {0}")]
    Signatur(#[source] jsonwebtoken::errors::Error),

    #[error("Token ungueltig: {0}")]
    Ungueltig(#[source] jsonwebtoken::errors::Error),

    #[error("Token noch nicht gueltig")]
    NochNichtGueltig,

    #[error("Token abgelaufen")]
    Abgelaufen,
}

/// Stellt signierte Identitaets-Tokens aus
///
/// Implementierungen muessen von mehreren Requests gleichzeitig nutzbar sein.
pub trait TokenIssuer: Send + Sync {
    /// Stellt ein Token fuer `benutzer` aus, gebunden an `app`, gueltig fuer `ttl`
    fn issue(
        &self,
        benutzer: &BenutzerRecord,
        app: &AppRecord,
        ttl: Duration,
    ) -> Result<String, TokenError>;
}

/// JWT-Aussteller (HS256 mit dem Secret der App)
#[derive(Debug, Clone, Default)]
pub struct JwtAussteller;

impl JwtAussteller {
    pub fn neu() -> Self {
        Self
    }

    /// Stellt ein Token zu einem festen Zeitpunkt aus
    ///
    /// JWT-Zeitstempel haben Sekundenaufloesung: `iat` ist `jetzt` abgerundet,
    /// die Lebensdauer muss ganze Sekunden betragen.
    pub fn ausstellen_zum(
        &self,
        benutzer: &BenutzerRecord,
        app: &AppRecord,
        ttl: Duration,
        jetzt: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        if app.secret.is_empty() {
            return Err(TokenError::SchluesselFehlt(app.id));
        }

        let ttl_sekunden = i64::try_from(ttl.as_secs())
            .ok()
            .filter(|&s| s > 0 && ttl.subsec_nanos() == 0)
            .ok_or_else(|| TokenError::UngueltigeLebensdauer(format!("{ttl:?}")))?;

        let iat = jetzt.timestamp();
        let exp = iat
            .checked_add(ttl_sekunden)
            .ok_or_else(|| TokenError::UngueltigeLebensdauer(format!("{ttl:?}")))?;

        let claims = TokenClaims {
            uid: benutzer.id,
            email: benutzer.email.clone(),
            app_id: app.id,
            iat,
            nbf: iat,
            exp,
            jti: Uuid::new_v4(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&app.secret),
        )
        .map_err(TokenError::Signatur)
    }
}

impl TokenIssuer for JwtAussteller {
    fn issue(
        &self,
        benutzer: &BenutzerRecord,
        app: &AppRecord,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        self.ausstellen_zum(benutzer, app, ttl, Utc::now())
    }
}

/// Prueft Signatur und Zeitfenster eines Tokens und gibt die Claims zurueck
///
/// Die Ablaufgrenze ist exklusiv: zum Zeitpunkt `exp` ist das Token abgelaufen.
pub fn token_pruefen(
    token: &str,
    secret: &[u8],
    jetzt: DateTime<Utc>,
) -> Result<TokenClaims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Zeitfenster wird unten ohne Toleranz selbst geprueft
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.leeway = 0;

    let claims = decode::<TokenClaims>(token, &DecodingKey::from_secret(secret), &validation)
        .map_err(TokenError::Ungueltig)?
        .claims;

    let t = jetzt.timestamp();
    if t < claims.nbf {
        return Err(TokenError::NochNichtGueltig);
    }
    if t >= claims.exp {
        return Err(TokenError::Abgelaufen);
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const TTL: Duration = Duration::from_secs(3600);

    fn benutzer() -> BenutzerRecord {
        BenutzerRecord {
            id: UserId(1),
            email: "a@x.com".into(),
            pass_hash: "$argon2id$egal".into(),
            is_admin: false,
            created_at: Utc::now(),
        }
    }

    fn app(secret: &[u8]) -> AppRecord {
        AppRecord {
            id: AppId(7),
            name: "test".into(),
            secret: secret.to_vec(),
        }
    }

    fn zeitpunkt() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn token_enthaelt_benutzer_app_und_ablauf() {
        let jetzt = zeitpunkt();
        let token = JwtAussteller::neu()
            .ausstellen_zum(&benutzer(), &app(b"geheim"), TTL, jetzt)
            .expect("Ausstellung fehlgeschlagen");

        let claims = token_pruefen(&token, b"geheim", jetzt).expect("Pruefung fehlgeschlagen");
        assert_eq!(claims.uid, UserId(1));
        assert_eq!(claims.app_id, AppId(7));
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.iat, jetzt.timestamp());
        assert_eq!(claims.nbf, claims.iat);
        assert_eq!(claims.exp, jetzt.timestamp() + 3600);
    }

    #[test]
    fn falsches_secret_wird_abgelehnt() {
        let jetzt = zeitpunkt();
        let token = JwtAussteller::neu()
            .ausstellen_zum(&benutzer(), &app(b"geheim"), TTL, jetzt)
            .unwrap();

        let ergebnis = token_pruefen(&token, b"anderes", jetzt);
        assert!(matches!(ergebnis, Err(TokenError::Ungueltig(_))));
    }

    #[test]
    fn vor_ausstellung_nicht_gueltig() {
        let jetzt = zeitpunkt();
        let token = JwtAussteller::neu()
            .ausstellen_zum(&benutzer(), &app(b"geheim"), TTL, jetzt)
            .unwrap();

        let frueher = jetzt - chrono::Duration::seconds(1);
        let ergebnis = token_pruefen(&token, b"geheim", frueher);
        assert!(matches!(ergebnis, Err(TokenError::NochNichtGueltig)));
    }

    #[test]
    fn ablaufgrenze_ist_exklusiv() {
        let jetzt = zeitpunkt();
        let token = JwtAussteller::neu()
            .ausstellen_zum(&benutzer(), &app(b"geheim"), TTL, jetzt)
            .unwrap();

        let kurz_davor = jetzt + chrono::Duration::seconds(3599);
        assert!(token_pruefen(&token, b"geheim", kurz_davor).is_ok());

        let genau_exp = jetzt + chrono::Duration::seconds(3600);
        assert!(matches!(
            token_pruefen(&token, b"geheim", genau_exp),
            Err(TokenError::Abgelaufen)
        ));

        let danach = jetzt + chrono::Duration::seconds(7200);
        assert!(matches!(
            token_pruefen(&token, b"geheim", danach),
            Err(TokenError::Abgelaufen)
        ));
    }

    #[test]
    fn tokens_sind_eindeutig() {
        let jetzt = zeitpunkt();
        let aussteller = JwtAussteller::neu();
        let t1 = aussteller
            .ausstellen_zum(&benutzer(), &app(b"geheim"), TTL, jetzt)
            .unwrap();
        let t2 = aussteller
            .ausstellen_zum(&benutzer(), &app(b"geheim"), TTL, jetzt)
            .unwrap();
        assert_ne!(t1, t2, "jti muss Tokens unterscheidbar machen");

        let c1 = token_pruefen(&t1, b"geheim", jetzt).unwrap();
        let c2 = token_pruefen(&t2, b"geheim", jetzt).unwrap();
        assert_eq!(c1.uid, c2.uid);
        assert_eq!(c1.exp, c2.exp);
        assert_ne!(c1.jti, c2.jti);
    }

    #[test]
    fn leeres_secret_schlaegt_fehl() {
        let ergebnis = JwtAussteller::neu().ausstellen_zum(&benutzer(), &app(b""), TTL, zeitpunkt());
        assert!(matches!(ergebnis, Err(TokenError::SchluesselFehlt(AppId(7)))));
    }

    #[test]
    fn null_lebensdauer_schlaegt_fehl() {
        let ergebnis = JwtAussteller::neu().ausstellen_zum(
            &benutzer(),
            &app(b"geheim"),
            Duration::from_millis(500),
            zeitpunkt(),
        );
        assert!(matches!(ergebnis, Err(TokenError::UngueltigeLebensdauer(_))));
    }

    #[test]
    fn lebensdauer_nur_in_ganzen_sekunden() {
        let ergebnis = JwtAussteller::neu().ausstellen_zum(
            &benutzer(),
            &app(b"geheim"),
            Duration::from_millis(1500),
            zeitpunkt(),
        );
        assert!(matches!(ergebnis, Err(TokenError::UngueltigeLebensdauer(_))));

        let token = JwtAussteller::neu()
            .ausstellen_zum(&benutzer(), &app(b"geheim"), Duration::from_secs(2), zeitpunkt())
            .unwrap();
        let claims = token_pruefen(&token, b"geheim", zeitpunkt()).unwrap();
        assert_eq!(claims.exp - claims.iat, 2);
    }

    #[test]
    fn kaputtes_token_ist_ungueltig() {
        let ergebnis = token_pruefen("kein.jwt.token", b"geheim", zeitpunkt());
        assert!(matches!(ergebnis, Err(TokenError::Ungueltig(_))));
    }
}
