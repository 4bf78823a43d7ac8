use chrono::{DateTime, Utc};
use sqlx::PgConnection;
use uuid::Uuid;

use crate::pkg::internal::adaptors::roles::spec::{NewRole, Role};
use crate::pkg::internal::adaptors::storage_failure;
use crate::prelude::Result;

pub struct RoleMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> RoleMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        RoleMutator { pool }
    }

    pub async fn create(&mut self, role: &NewRole) -> Result<Role> {
        let row = sqlx::query_as::<_, Role>(
            r#"
            INSERT INTO roles
                (name, email, phone, role, resume, linkedin, website, github, comp_low, comp_high)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, name, email, phone, role, resume, linkedin, website, github,
                      comp_low, comp_high, published_at
            "#,
        )
        .bind(&role.name)
        .bind(&role.email)
        .bind(&role.phone)
        .bind(&role.role)
        .bind(&role.resume)
        .bind(&role.linkedin)
        .bind(&role.website)
        .bind(&role.github)
        .bind(&role.comp_low)
        .bind(&role.comp_high)
        .fetch_one(&mut *self.pool)
        .await
        .map_err(storage_failure)?;
        Ok(row)
    }

    pub async fn save(&mut self, role: &Role) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE roles SET
                name = $2, phone = $3, role = $4, resume = $5, linkedin = $6,
                website = $7, github = $8, comp_low = $9, comp_high = $10
            WHERE id = $1
            "#,
        )
        .bind(role.id)
        .bind(&role.name)
        .bind(&role.phone)
        .bind(&role.role)
        .bind(&role.resume)
        .bind(&role.linkedin)
        .bind(&role.website)
        .bind(&role.github)
        .bind(&role.comp_low)
        .bind(&role.comp_high)
        .execute(&mut *self.pool)
        .await
        .map_err(storage_failure)?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&mut self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&mut *self.pool)
            .await
            .map_err(storage_failure)?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_published_before(&mut self, cutoff: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM roles WHERE published_at < $1")
            .bind(cutoff)
            .execute(&mut *self.pool)
            .await
            .map_err(storage_failure)?;

        Ok(result.rows_affected())
    }
}
