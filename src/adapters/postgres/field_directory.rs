use crate::domain::{FieldId, VenueId};
use crate::ports::Result;
use crate::ports::field_directory::FieldDirectory as FieldDirectoryTrait;
use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::{id_from_db, id_to_db};

/// PostgreSQL implementation of FieldDirectory
pub struct FieldDirectory {
    pool: PgPool,
}

impl FieldDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FieldDirectoryTrait for FieldDirectory {
    async fn venue_of(&self, field_id: FieldId) -> Result<Option<VenueId>> {
        let row = sqlx::query(
            r#"
            SELECT venue_id
            FROM fields
            WHERE field_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id_to_db("field_id", field_id.value())?)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| id_from_db("venue_id", row.get("venue_id")).map(VenueId::new))
            .transpose()
    }
}
