use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use sqlx::{
    PgPool, Postgres,
    pool::PoolConnection,
    postgres::PgPoolOptions,
};
use standard_error::{StandardError, Status};
use uuid::Uuid;

use crate::{conf::Settings, prelude::Result};

use self::{
    jobs::{
        mutators::JobMutator,
        selectors::JobSelector,
        spec::{Job, NewJob},
    },
    roles::{
        mutators::RoleMutator,
        selectors::RoleSelector,
        spec::{NewRole, Role},
    },
};

pub mod jobs;
#[cfg(test)]
pub mod memory;
pub mod roles;

/// Backend failures are logged here and reach the client as a bare 500.
pub fn storage_failure(err: sqlx::Error) -> StandardError {
    tracing::error!("storage failure: {}", err);
    StandardError::new("ERR-DB-000").code(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Accessors for the two listing tables.
///
/// Lookups return `Ok(None)` for an unknown id and `Err` only when the backend
/// itself failed. `save_*` writes the mutable columns and reports whether the
/// row still existed.
#[async_trait]
pub trait ListingStore: Send + Sync {
    async fn ping(&self) -> Result<()>;

    async fn jobs(&self) -> Result<Vec<Job>>;
    async fn job(&self, id: Uuid) -> Result<Option<Job>>;
    async fn create_job(&self, job: &NewJob) -> Result<Job>;
    async fn save_job(&self, job: &Job) -> Result<bool>;
    async fn delete_job(&self, id: Uuid) -> Result<bool>;

    async fn roles(&self) -> Result<Vec<Role>>;
    async fn role(&self, id: Uuid) -> Result<Option<Role>>;
    async fn create_role(&self, role: &NewRole) -> Result<Role>;
    async fn save_role(&self, role: &Role) -> Result<bool>;
    async fn delete_role(&self, id: Uuid) -> Result<bool>;

    /// Deletes jobs and roles published before `cutoff`, returning how many went.
    async fn purge_published_before(&self, cutoff: DateTime<Utc>) -> Result<u64>;
}

pub type SharedStore = Arc<dyn ListingStore>;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn connect_lazy(settings: &Settings) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.database_pool_max_connections)
            .connect_lazy(&settings.database_url)
            .map_err(storage_failure)?;
        Ok(PgStore { pool })
    }

    async fn conn(&self) -> Result<PoolConnection<Postgres>> {
        self.pool.acquire().await.map_err(storage_failure)
    }
}

#[async_trait]
impl ListingStore for PgStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("select 1")
            .execute(&self.pool)
            .await
            .map_err(storage_failure)?;
        Ok(())
    }

    async fn jobs(&self) -> Result<Vec<Job>> {
        let mut conn = self.conn().await?;
        JobSelector::new(&mut *conn).get_all().await
    }

    async fn job(&self, id: Uuid) -> Result<Option<Job>> {
        let mut conn = self.conn().await?;
        JobSelector::new(&mut *conn).get_by_id(id).await
    }

    async fn create_job(&self, job: &NewJob) -> Result<Job> {
        let mut conn = self.conn().await?;
        JobMutator::new(&mut *conn).create(job).await
    }

    async fn save_job(&self, job: &Job) -> Result<bool> {
        let mut conn = self.conn().await?;
        JobMutator::new(&mut *conn).save(job).await
    }

    async fn delete_job(&self, id: Uuid) -> Result<bool> {
        let mut conn = self.conn().await?;
        JobMutator::new(&mut *conn).delete(id).await
    }

    async fn roles(&self) -> Result<Vec<Role>> {
        let mut conn = self.conn().await?;
        RoleSelector::new(&mut *conn).get_all().await
    }

    async fn role(&self, id: Uuid) -> Result<Option<Role>> {
        let mut conn = self.conn().await?;
        RoleSelector::new(&mut *conn).get_by_id(id).await
    }

    async fn create_role(&self, role: &NewRole) -> Result<Role> {
        let mut conn = self.conn().await?;
        RoleMutator::new(&mut *conn).create(role).await
    }

    async fn save_role(&self, role: &Role) -> Result<bool> {
        let mut conn = self.conn().await?;
        RoleMutator::new(&mut *conn).save(role).await
    }

    async fn delete_role(&self, id: Uuid) -> Result<bool> {
        let mut conn = self.conn().await?;
        RoleMutator::new(&mut *conn).delete(id).await
    }

    async fn purge_published_before(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let mut conn = self.conn().await?;
        let jobs = JobMutator::new(&mut *conn)
            .delete_published_before(cutoff)
            .await?;
        let roles = RoleMutator::new(&mut *conn)
            .delete_published_before(cutoff)
            .await?;
        Ok(jobs + roles)
    }
}
