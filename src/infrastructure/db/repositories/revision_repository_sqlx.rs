use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::revision_repository::RevisionRepository;
use crate::domain::writings::writing::{REVISION_RETENTION, Revision};
use crate::infrastructure::db::PgPool;

pub struct SqlxRevisionRepository {
    pub pool: PgPool,
}

impl SqlxRevisionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn revision_from_row(r: &sqlx::postgres::PgRow) -> Revision {
    Revision {
        id: r.get("id"),
        writing_id: r.get("writing_id"),
        title: r.get("title"),
        content: r.get("content"),
        sequence_number: r.get("sequence_number"),
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl RevisionRepository for SqlxRevisionRepository {
    async fn list_for_writing(&self, writing_id: Uuid) -> anyhow::Result<Vec<Revision>> {
        let rows = sqlx::query(
            r#"SELECT id, writing_id, title, content, sequence_number, created_at
               FROM revisions
               WHERE writing_id = $1
               ORDER BY sequence_number DESC
               LIMIT $2"#,
        )
        .bind(writing_id)
        .bind(REVISION_RETENTION)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(revision_from_row).collect())
    }

    async fn get(&self, writing_id: Uuid, revision_id: Uuid) -> anyhow::Result<Option<Revision>> {
        let row = sqlx::query(
            r#"SELECT id, writing_id, title, content, sequence_number, created_at
               FROM revisions
               WHERE id = $1 AND writing_id = $2"#,
        )
        .bind(revision_id)
        .bind(writing_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(revision_from_row))
    }
}
