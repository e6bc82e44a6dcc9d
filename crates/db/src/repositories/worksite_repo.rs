//! Repository for the `worksites` table.

use cablewatch_core::types::DbId;
use sqlx::PgPool;

use crate::models::worksite::Worksite;

const COLUMNS: &str = "id, name, created_at, updated_at";

pub struct WorksiteRepo;

impl WorksiteRepo {
    pub async fn create(pool: &PgPool, name: &str) -> Result<Worksite, sqlx::Error> {
        let query = format!("INSERT INTO worksites (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Worksite>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Worksite>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM worksites WHERE id = $1");
        sqlx::query_as::<_, Worksite>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
