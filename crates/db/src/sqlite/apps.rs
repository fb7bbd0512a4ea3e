//! SQLite-Implementierung des AppProvider

use async_trait::async_trait;
use sso_core::AppId;

use crate::models::{AppRecord, NeueApp};
use crate::repository::{AppProvider, DbResult};
use crate::sqlite::pool::SqliteDb;

#[async_trait]
impl AppProvider for SqliteDb {
    async fn app_by_id(&self, app_id: AppId) -> DbResult<Option<AppRecord>> {
        let row = sqlx::query("SELECT id, name, secret FROM apps WHERE id = ?")
            .bind(app_id.inner())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_app(&r)).transpose()
    }
}

impl SqliteDb {
    /// Legt eine App an oder aktualisiert Name und Secret einer bestehenden
    pub async fn app_speichern(&self, app: NeueApp<'_>) -> DbResult<()> {
        sqlx::query(
            "INSERT INTO apps (id, name, secret) VALUES (?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name, secret = excluded.secret",
        )
        .bind(app.id.inner())
        .bind(app.name)
        .bind(app.secret)
        .execute(&self.pool)
        .await?;

        tracing::debug!(app_id = %app.id, name = app.name, "App gespeichert");
        Ok(())
    }
}

fn row_to_app(row: &sqlx::sqlite::SqliteRow) -> DbResult<AppRecord> {
    use sqlx::Row as _;

    Ok(AppRecord {
        id: AppId(row.try_get("id")?),
        name: row.try_get("name")?,
        secret: row.try_get("secret")?,
    })
}
