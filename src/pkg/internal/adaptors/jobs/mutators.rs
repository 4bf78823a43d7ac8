use chrono::{DateTime, Utc};
use sqlx::PgConnection;
use uuid::Uuid;

use crate::pkg::internal::adaptors::jobs::spec::{Job, NewJob};
use crate::pkg::internal::adaptors::storage_failure;
use crate::prelude::Result;

pub struct JobMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobMutator { pool }
    }

    pub async fn create(&mut self, job: &NewJob) -> Result<Job> {
        let row = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (position, organization, url, description, email)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, position, organization, url, description, email, published_at
            "#,
        )
        .bind(&job.position)
        .bind(&job.organization)
        .bind(&job.url)
        .bind(&job.description)
        .bind(&job.email)
        .fetch_one(&mut *self.pool)
        .await
        .map_err(storage_failure)?;
        Ok(row)
    }

    /// Writes the display columns only; id, email and published_at stay as inserted.
    pub async fn save(&mut self, job: &Job) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE jobs SET position = $2, organization = $3, url = $4, description = $5 WHERE id = $1",
        )
        .bind(job.id)
        .bind(&job.position)
        .bind(&job.organization)
        .bind(&job.url)
        .bind(&job.description)
        .execute(&mut *self.pool)
        .await
        .map_err(storage_failure)?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&mut self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&mut *self.pool)
            .await
            .map_err(storage_failure)?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_published_before(&mut self, cutoff: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM jobs WHERE published_at < $1")
            .bind(cutoff)
            .execute(&mut *self.pool)
            .await
            .map_err(storage_failure)?;

        Ok(result.rows_affected())
    }
}
