use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::users::role::Role;

/// A row of the `users` table. `uid` is the immutable primary key; `userid`
/// is the login handle and never changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub uid: String,
    pub userid: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub email: String,
    pub role: String,
    pub updated_at: Option<String>,
}

/// Insert payload for registration. `updated_at` is always NULL at creation.
#[derive(Debug)]
pub struct NewUser {
    pub uid: String,
    pub userid: String,
    pub password_hash: String,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub email: String,
    pub role: Role,
}

impl User {
    pub async fn find_by_userid(db: &PgPool, userid: &str) -> sqlx::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT uid, userid, password_hash, full_name, phone, address, email, role, updated_at
            FROM users
            WHERE userid = $1
            "#,
        )
        .bind(userid)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Friendly existence check before insert. The unique constraints on
    /// `userid` and `email` remain the authoritative guard against the
    /// check-then-insert race between concurrent registrations.
    pub async fn exists(db: &PgPool, userid: &str, email: &str) -> sqlx::Result<bool> {
        let hit = sqlx::query_scalar::<_, i32>(
            "SELECT 1 FROM users WHERE userid = $1 OR email = $2",
        )
        .bind(userid)
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(hit.is_some())
    }

    pub async fn insert(db: &PgPool, new: &NewUser) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (uid, userid, password_hash, full_name, phone, address, email, role, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NULL)
            "#,
        )
        .bind(&new.uid)
        .bind(&new.userid)
        .bind(&new.password_hash)
        .bind(&new.full_name)
        .bind(&new.phone)
        .bind(&new.address)
        .bind(&new.email)
        .bind(new.role.as_str())
        .execute(db)
        .await?;
        Ok(())
    }

    /// Resolves a login handle to the internal uid.
    pub async fn resolve_uid(db: &PgPool, userid: &str) -> sqlx::Result<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT uid FROM users WHERE userid = $1")
            .bind(userid)
            .fetch_optional(db)
            .await
    }

    /// Rewrites the mutable profile fields plus `updated_at`; returns the
    /// number of rows changed.
    pub async fn update_profile(
        db: &PgPool,
        uid: &str,
        full_name: &str,
        phone: &str,
        address: &str,
        email: &str,
        role: Role,
        updated_at: &str,
    ) -> sqlx::Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET full_name = $2, phone = $3, address = $4,
                email = $5, role = $6, updated_at = $7
            WHERE uid = $1
            "#,
        )
        .bind(uid)
        .bind(full_name)
        .bind(phone)
        .bind(address)
        .bind(email)
        .bind(role.as_str())
        .bind(updated_at)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn update_role(
        db: &PgPool,
        uid: &str,
        role: Role,
        updated_at: &str,
    ) -> sqlx::Result<u64> {
        let result =
            sqlx::query("UPDATE users SET role = $2, updated_at = $3 WHERE uid = $1")
                .bind(uid)
                .bind(role.as_str())
                .bind(updated_at)
                .execute(db)
                .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User {
            uid: "0123456789abcdef0123456789abcdef".into(),
            userid: "alice".into(),
            password_hash: "deadbeef".into(),
            full_name: "Alice".into(),
            phone: "".into(),
            address: "".into(),
            email: "a@x.com".into(),
            role: "customer".into(),
            updated_at: None,
        };
        let json = serde_json::to_string(&user).expect("serialize");
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("deadbeef"));
        assert!(json.contains(r#""userid":"alice""#));
        assert!(json.contains(r#""role":"customer""#));
        assert!(json.contains(r#""updated_at":null"#));
    }
}
