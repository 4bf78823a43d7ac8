use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    pkg::internal::adaptors::{roles::spec::Role, storage_failure},
    prelude::Result,
};

pub struct RoleSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> RoleSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        RoleSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: Uuid) -> Result<Option<Role>> {
        let row = sqlx::query_as::<_, Role>(
            "SELECT id, name, email, phone, role, resume, linkedin, website, github,
                    comp_low, comp_high, published_at
             FROM roles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await
        .map_err(storage_failure)?;

        Ok(row)
    }

    pub async fn get_all(&mut self) -> Result<Vec<Role>> {
        let rows = sqlx::query_as::<_, Role>(
            "SELECT id, name, email, phone, role, resume, linkedin, website, github,
                    comp_low, comp_high, published_at
             FROM roles ORDER BY published_at DESC",
        )
        .fetch_all(&mut *self.pool)
        .await
        .map_err(storage_failure)?;

        Ok(rows)
    }
}
