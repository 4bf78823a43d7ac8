use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use standard_error::{StandardError, Status};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    ListingStore,
    jobs::spec::{Job, NewJob},
    roles::spec::{NewRole, Role},
};
use crate::prelude::Result;

/// In-process store for exercising handlers without a database.
#[derive(Default)]
pub struct MemoryStore {
    jobs: RwLock<HashMap<Uuid, Job>>,
    roles: RwLock<HashMap<Uuid, Role>>,
    writes: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail like an unreachable backend.
    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of mutating calls that reached the store.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn insert_job(&self, job: Job) {
        self.jobs.write().await.insert(job.id, job);
    }

    pub async fn insert_role(&self, role: Role) {
        self.roles.write().await.insert(role.id, role);
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            tracing::error!("storage failure: memory store is failing");
            return Err(StandardError::new("ERR-DB-000").code(StatusCode::INTERNAL_SERVER_ERROR));
        }
        Ok(())
    }

    fn write(&self) -> Result<()> {
        self.check()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl ListingStore for MemoryStore {
    async fn ping(&self) -> Result<()> {
        self.check()
    }

    async fn jobs(&self) -> Result<Vec<Job>> {
        self.check()?;
        let mut jobs: Vec<Job> = self.jobs.read().await.values().cloned().collect();
        jobs.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(jobs)
    }

    async fn job(&self, id: Uuid) -> Result<Option<Job>> {
        self.check()?;
        Ok(self.jobs.read().await.get(&id).cloned())
    }

    async fn create_job(&self, job: &NewJob) -> Result<Job> {
        self.write()?;
        let job = Job {
            id: Uuid::new_v4(),
            position: job.position.clone(),
            organization: job.organization.clone(),
            url: job.url.clone(),
            description: job.description.clone(),
            email: job.email.clone(),
            published_at: Utc::now(),
        };
        self.jobs.write().await.insert(job.id, job.clone());
        Ok(job)
    }

    async fn save_job(&self, job: &Job) -> Result<bool> {
        self.write()?;
        let mut jobs = self.jobs.write().await;
        match jobs.get_mut(&job.id) {
            Some(stored) => {
                stored.position = job.position.clone();
                stored.organization = job.organization.clone();
                stored.url = job.url.clone();
                stored.description = job.description.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_job(&self, id: Uuid) -> Result<bool> {
        self.write()?;
        Ok(self.jobs.write().await.remove(&id).is_some())
    }

    async fn roles(&self) -> Result<Vec<Role>> {
        self.check()?;
        let mut roles: Vec<Role> = self.roles.read().await.values().cloned().collect();
        roles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(roles)
    }

    async fn role(&self, id: Uuid) -> Result<Option<Role>> {
        self.check()?;
        Ok(self.roles.read().await.get(&id).cloned())
    }

    async fn create_role(&self, role: &NewRole) -> Result<Role> {
        self.write()?;
        let role = Role {
            id: Uuid::new_v4(),
            name: role.name.clone(),
            email: role.email.clone(),
            phone: role.phone.clone(),
            role: role.role.clone(),
            resume: role.resume.clone(),
            linkedin: role.linkedin.clone(),
            website: role.website.clone(),
            github: role.github.clone(),
            comp_low: role.comp_low.clone(),
            comp_high: role.comp_high.clone(),
            published_at: Utc::now(),
        };
        self.roles.write().await.insert(role.id, role.clone());
        Ok(role)
    }

    async fn save_role(&self, role: &Role) -> Result<bool> {
        self.write()?;
        let mut roles = self.roles.write().await;
        match roles.get_mut(&role.id) {
            Some(stored) => {
                let (id, email, published_at) = (stored.id, stored.email.clone(), stored.published_at);
                *stored = Role {
                    id,
                    email,
                    published_at,
                    ..role.clone()
                };
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_role(&self, id: Uuid) -> Result<bool> {
        self.write()?;
        Ok(self.roles.write().await.remove(&id).is_some())
    }

    async fn purge_published_before(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        self.write()?;
        let mut purged = 0;
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|_, job| job.published_at >= cutoff);
        purged += (before - jobs.len()) as u64;
        let mut roles = self.roles.write().await;
        let before = roles.len();
        roles.retain(|_, role| role.published_at >= cutoff);
        purged += (before - roles.len()) as u64;
        Ok(purged)
    }
}
