//! SQLite-Implementierung von `UserSaver` und `UserProvider`

use async_trait::async_trait;
use chrono::Utc;
use sso_core::UserId;

use crate::error::DbError;
use crate::models::BenutzerRecord;
use crate::repository::{DbResult, UserProvider, UserSaver};
use crate::sqlite::pool::SqliteDb;

#[async_trait]
impl UserSaver for SqliteDb {
    async fn save_user(&self, email: &str, pass_hash: &str) -> DbResult<UserId> {
        let now = Utc::now().to_rfc3339();

        let ergebnis = sqlx::query(
            "INSERT INTO users (email, pass_hash, is_admin, created_at)
             VALUES (?, ?, 0, ?)",
        )
        .bind(email)
        .bind(pass_hash)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                DbError::Eindeutigkeit(format!("E-Mail '{email}' bereits registriert"))
            }
            _ => DbError::Sqlx(e),
        })?;

        Ok(UserId(ergebnis.last_insert_rowid()))
    }
}

#[async_trait]
impl UserProvider for SqliteDb {
    async fn user_by_email(&self, email: &str) -> DbResult<Option<BenutzerRecord>> {
        let row = sqlx::query(
            "SELECT id, email, pass_hash, is_admin, created_at
             FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_benutzer(&r)).transpose()
    }

    async fn is_admin(&self, user_id: UserId) -> DbResult<bool> {
        let flag: Option<i64> = sqlx::query_scalar("SELECT is_admin FROM users WHERE id = ?")
            .bind(user_id.inner())
            .fetch_optional(&self.pool)
            .await?;

        flag.map(|f| f != 0)
            .ok_or_else(|| DbError::nicht_gefunden(user_id.to_string()))
    }
}

impl SqliteDb {
    /// Setzt das Admin-Flag eines Benutzers (Provisionierung ausserhalb der Engine)
    pub async fn admin_setzen(&self, user_id: UserId, is_admin: bool) -> DbResult<()> {
        let affected = sqlx::query("UPDATE users SET is_admin = ? WHERE id = ?")
            .bind(is_admin as i64)
            .bind(user_id.inner())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(DbError::nicht_gefunden(user_id.to_string()));
        }
        Ok(())
    }
}

fn row_to_benutzer(row: &sqlx::sqlite::SqliteRow) -> DbResult<BenutzerRecord> {
    use sqlx::Row as _;

    let created_at_str: String = row.try_get("created_at")?;
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|e| DbError::intern(format!("Ungueltige created_at '{created_at_str}': {e}")))?
        .with_timezone(&Utc);

    let is_admin: i64 = row.try_get("is_admin")?;

    Ok(BenutzerRecord {
        id: UserId(row.try_get("id")?),
        email: row.try_get("email")?,
        pass_hash: row.try_get("pass_hash")?,
        is_admin: is_admin != 0,
        created_at,
    })
}
