use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    pkg::internal::adaptors::{jobs::spec::Job, storage_failure},
    prelude::Result,
};

pub struct JobSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: Uuid) -> Result<Option<Job>> {
        let row = sqlx::query_as::<_, Job>(
            "SELECT id, position, organization, url, description, email, published_at
             FROM jobs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await
        .map_err(storage_failure)?;

        Ok(row)
    }

    pub async fn get_all(&mut self) -> Result<Vec<Job>> {
        let rows = sqlx::query_as::<_, Job>(
            "SELECT id, position, organization, url, description, email, published_at
             FROM jobs ORDER BY published_at DESC",
        )
        .fetch_all(&mut *self.pool)
        .await
        .map_err(storage_failure)?;

        Ok(rows)
    }
}
