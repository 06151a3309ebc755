use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::collection_repository::CollectionRepository;
use crate::domain::writings::writing::Collection;
use crate::infrastructure::db::PgPool;

pub struct SqlxCollectionRepository {
    pub pool: PgPool,
}

impl SqlxCollectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn collection_from_row(r: &sqlx::postgres::PgRow) -> Collection {
    Collection {
        id: r.get("id"),
        owner_id: r.get("owner_id"),
        name: r.get("name"),
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl CollectionRepository for SqlxCollectionRepository {
    async fn create_for_user(&self, owner_id: Uuid, name: &str) -> anyhow::Result<Collection> {
        let row = sqlx::query(
            r#"INSERT INTO collections (owner_id, name) VALUES ($1, $2)
               RETURNING id, owner_id, name, created_at"#,
        )
        .bind(owner_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(collection_from_row(&row))
    }

    async fn list_for_user(&self, owner_id: Uuid) -> anyhow::Result<Vec<Collection>> {
        let rows = sqlx::query(
            r#"SELECT id, owner_id, name, created_at FROM collections
               WHERE owner_id = $1 ORDER BY created_at DESC"#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(collection_from_row).collect())
    }

    async fn list_with_counts(&self, owner_id: Uuid) -> anyhow::Result<Vec<(Collection, i64)>> {
        let rows = sqlx::query(
            r#"SELECT c.id, c.owner_id, c.name, c.created_at,
                      COUNT(w.id) AS writing_count
               FROM collections c
               LEFT JOIN writings w ON w.collection_id = c.id
               WHERE c.owner_id = $1
               GROUP BY c.id, c.owner_id, c.name, c.created_at
               ORDER BY c.created_at DESC"#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .iter()
            .map(|r| (collection_from_row(r), r.get::<i64, _>("writing_count")))
            .collect())
    }

    async fn get_owned(&self, id: Uuid, owner_id: Uuid) -> anyhow::Result<Option<Collection>> {
        let row = sqlx::query(
            r#"SELECT id, owner_id, name, created_at FROM collections
               WHERE id = $1 AND owner_id = $2"#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(collection_from_row))
    }
}
