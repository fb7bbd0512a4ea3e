//! Integration-Tests fuer AppProvider (In-Memory SQLite)

use sso_core::AppId;
use sso_db::{AppProvider, NeueApp, SqliteDb};

async fn db() -> SqliteDb {
    SqliteDb::in_memory()
        .await
        .expect("In-Memory DB konnte nicht erstellt werden")
}

#[tokio::test]
async fn app_speichern_und_laden() {
    let db = db().await;

    db.app_speichern(NeueApp {
        id: AppId(7),
        name: "test-app",
        secret: b"test-secret",
    })
    .await
    .expect("App speichern fehlgeschlagen");

    let app = AppProvider::app_by_id(&db, AppId(7))
        .await
        .unwrap()
        .expect("App 7 sollte gefunden werden");

    assert_eq!(app.id, AppId(7));
    assert_eq!(app.name, "test-app");
    assert_eq!(app.secret, b"test-secret");
}

#[tokio::test]
async fn unbekannte_app_liefert_none() {
    let db = db().await;

    let app = AppProvider::app_by_id(&db, AppId(999)).await.unwrap();
    assert!(app.is_none());
}

#[tokio::test]
async fn app_erneut_speichern_aktualisiert_secret() {
    let db = db().await;

    db.app_speichern(NeueApp {
        id: AppId(1),
        name: "portal",
        secret: b"alt",
    })
    .await
    .unwrap();
    db.app_speichern(NeueApp {
        id: AppId(1),
        name: "portal",
        secret: b"neu",
    })
    .await
    .unwrap();

    let app = AppProvider::app_by_id(&db, AppId(1)).await.unwrap().unwrap();
    assert_eq!(app.secret, b"neu");
}

#[tokio::test]
async fn gleicher_name_fuer_verschiedene_apps() {
    let db = db().await;

    for (id, secret) in [(1, b"s1"), (2, b"s2")] {
        db.app_speichern(NeueApp {
            id: AppId(id),
            name: "portal",
            secret,
        })
        .await
        .expect("Name ist nur eine Bezeichnung, kein Schluessel");
    }

    let zwei = AppProvider::app_by_id(&db, AppId(2)).await.unwrap().unwrap();
    assert_eq!(zwei.name, "portal");
    assert_eq!(zwei.secret, b"s2");
}

#[tokio::test]
async fn namen_zwischen_apps_tauschen() {
    let db = db().await;
    let speichern = |id: i32, name: &'static str| {
        let db = db.clone();
        async move {
            db.app_speichern(NeueApp {
                id: AppId(id),
                name,
                secret: b"s",
            })
            .await
        }
    };

    speichern(1, "a").await.unwrap();
    speichern(2, "b").await.unwrap();
    speichern(1, "b").await.unwrap();
    speichern(2, "a").await.unwrap();

    let eins = AppProvider::app_by_id(&db, AppId(1)).await.unwrap().unwrap();
    let zwei = AppProvider::app_by_id(&db, AppId(2)).await.unwrap().unwrap();
    assert_eq!(eins.name, "b");
    assert_eq!(zwei.name, "a");
}
