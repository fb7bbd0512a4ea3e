//! Integration-Tests: AuthService gegen SQLite-Speicher und JWT-Aussteller

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use sso_auth::{token_pruefen, AuthService, FehlerArt, JwtAussteller, PasswortHasher, TokenError};
use sso_core::{AppId, UserId};
use sso_db::{NeueApp, SqliteDb};

const TTL: Duration = Duration::from_secs(3600);
const SECRET: &[u8] = b"app7-secret";

async fn aufbauen() -> (AuthService, SqliteDb) {
    let db = SqliteDb::in_memory()
        .await
        .expect("In-Memory DB konnte nicht erstellt werden");
    db.app_speichern(NeueApp {
        id: AppId(7),
        name: "app7",
        secret: SECRET,
    })
    .await
    .unwrap();

    let speicher = Arc::new(db.clone());
    let service = AuthService::neu(
        speicher.clone(),
        speicher.clone(),
        speicher,
        Arc::new(JwtAussteller::neu()),
        PasswortHasher::neu(8, 1, 1).unwrap(),
        TTL,
    );
    (service, db)
}

#[tokio::test]
async fn vollstaendiges_szenario() {
    let (service, _db) = aufbauen().await;

    let user_id = service.registrieren("a@x.com", "pw123").await.unwrap();
    assert_eq!(user_id, UserId(1));

    let vorher = Utc::now().timestamp();
    let token = service.anmelden("a@x.com", "pw123", AppId(7)).await.unwrap();
    let nachher = Utc::now().timestamp();

    let claims = token_pruefen(&token, SECRET, Utc::now()).unwrap();
    assert_eq!(claims.uid, UserId(1));
    assert_eq!(claims.app_id, AppId(7));
    assert!(claims.exp >= vorher + 3600 && claims.exp <= nachher + 3600);

    let falsch = service.anmelden("a@x.com", "wrong", AppId(7)).await.unwrap_err();
    assert_eq!(falsch.art(), FehlerArt::UngueltigeAnmeldedaten);

    let unbekannt = service.anmelden("b@x.com", "pw123", AppId(7)).await.unwrap_err();
    assert_eq!(unbekannt.art(), FehlerArt::UngueltigeAnmeldedaten);

    let app_fehlt = service.anmelden("a@x.com", "pw123", AppId(999)).await.unwrap_err();
    assert_eq!(app_fehlt.art(), FehlerArt::AppAufloesungFehlgeschlagen);
}

#[tokio::test]
async fn token_ist_nach_ablauf_ungueltig() {
    let (service, _db) = aufbauen().await;
    service.registrieren("a@x.com", "pw123").await.unwrap();

    let token = service.anmelden("a@x.com", "pw123", AppId(7)).await.unwrap();
    let claims = token_pruefen(&token, SECRET, Utc::now()).unwrap();

    let ablauf = chrono::DateTime::from_timestamp(claims.exp, 0).unwrap();
    assert!(matches!(
        token_pruefen(&token, SECRET, ablauf),
        Err(TokenError::Abgelaufen)
    ));
}

#[tokio::test]
async fn doppelte_registrierung_genau_ein_erfolg() {
    let (service, _db) = aufbauen().await;

    service.registrieren("dup@x.com", "pw1").await.unwrap();
    let err = service.registrieren("dup@x.com", "pw1").await.unwrap_err();
    assert_eq!(err.art(), FehlerArt::BenutzerExistiertBereits);

    let err = service.registrieren("dup@x.com", "anderes").await.unwrap_err();
    assert_eq!(err.art(), FehlerArt::BenutzerExistiertBereits);
}

#[tokio::test]
async fn gleichzeitige_registrierung() {
    let (service, _db) = aufbauen().await;
    let service = Arc::new(service);

    let a = tokio::spawn({
        let service = Arc::clone(&service);
        async move { service.registrieren("race@x.com", "pw").await }
    });
    let b = tokio::spawn({
        let service = Arc::clone(&service);
        async move { service.registrieren("race@x.com", "pw").await }
    });

    let ergebnisse = [a.await.unwrap(), b.await.unwrap()];
    let erfolge = ergebnisse.iter().filter(|r| r.is_ok()).count();
    let konflikte = ergebnisse
        .iter()
        .filter(|r| matches!(r, Err(e) if e.art() == FehlerArt::BenutzerExistiertBereits))
        .count();

    assert_eq!(erfolge, 1);
    assert_eq!(konflikte, 1);
}

#[tokio::test]
async fn admin_abfrage_ueber_sqlite() {
    let (service, db) = aufbauen().await;

    let user_id = service.registrieren("admin@x.com", "pw").await.unwrap();
    assert!(!service.ist_admin(user_id).await.unwrap());

    db.admin_setzen(user_id, true).await.unwrap();
    assert!(service.ist_admin(user_id).await.unwrap());

    let err = service.ist_admin(UserId(999)).await.unwrap_err();
    assert_eq!(err.art(), FehlerArt::IdentitaetNichtAufloesbar);
}
