//! Worksite model.

use cablewatch_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `worksites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Worksite {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
