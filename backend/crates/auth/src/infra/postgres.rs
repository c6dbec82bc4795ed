//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entity::admin::{Admin, NewAdmin};
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::{admin_name::AdminName, admin_password::PasswordDigest};
use crate::error::AuthResult;

/// PostgreSQL-backed admin repository (`admin` table)
#[derive(Clone)]
pub struct PgAdminRepository {
    pool: PgPool,
}

impl PgAdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AdminRepository for PgAdminRepository {
    async fn get_by_username(&self, username: &AdminName) -> AuthResult<Option<Admin>> {
        let row = sqlx::query_as::<_, AdminRow>(
            r#"
            SELECT
                id,
                username,
                hashed_password,
                email,
                is_active,
                created_at
            FROM admin
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AdminRow::into_admin))
    }

    async fn create(&self, admin: &NewAdmin) -> AuthResult<Admin> {
        let row = sqlx::query_as::<_, AdminRow>(
            r#"
            INSERT INTO admin (
                username,
                hashed_password,
                email
            ) VALUES ($1, $2, $3)
            RETURNING
                id,
                username,
                hashed_password,
                email,
                is_active,
                created_at
            "#,
        )
        .bind(admin.username.as_str())
        .bind(admin.password.as_str())
        .bind(admin.email.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_admin())
    }

    async fn update_password(
        &self,
        username: &AdminName,
        password: &PasswordDigest,
    ) -> AuthResult<bool> {
        let updated = sqlx::query("UPDATE admin SET hashed_password = $2 WHERE username = $1")
            .bind(username.as_str())
            .bind(password.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(updated > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AdminRow {
    id: i64,
    username: String,
    hashed_password: String,
    email: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl AdminRow {
    fn into_admin(self) -> Admin {
        Admin {
            id: self.id,
            username: AdminName::from_db(self.username),
            password: PasswordDigest::from_db(self.hashed_password),
            email: self.email,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}
