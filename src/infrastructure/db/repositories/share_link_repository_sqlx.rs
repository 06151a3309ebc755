use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::share_link_repository::ShareLinkRepository;
use crate::domain::writings::collab::ShareLink;
use crate::infrastructure::db::PgPool;

pub struct SqlxShareLinkRepository {
    pub pool: PgPool,
}

impl SqlxShareLinkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn link_from_row(r: &sqlx::postgres::PgRow) -> ShareLink {
    ShareLink {
        id: r.get("id"),
        writing_id: r.get("writing_id"),
        token: r.get("token"),
        created_by: r.get("created_by"),
        expires_at: r.try_get("expires_at").ok(),
        max_users: r.get("max_users"),
        is_active: r.get("is_active"),
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl ShareLinkRepository for SqlxShareLinkRepository {
    async fn create(
        &self,
        writing_id: Uuid,
        created_by: Uuid,
        token: &str,
        expires_at: Option<chrono::DateTime<chrono::Utc>>,
        max_users: i32,
    ) -> anyhow::Result<ShareLink> {
        let row = sqlx::query(
            r#"INSERT INTO share_links (writing_id, token, created_by, expires_at, max_users)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, writing_id, token, created_by, expires_at, max_users, is_active, created_at"#,
        )
        .bind(writing_id)
        .bind(token)
        .bind(created_by)
        .bind(expires_at)
        .bind(max_users)
        .fetch_one(&self.pool)
        .await?;
        Ok(link_from_row(&row))
    }

    async fn find_by_token(&self, token: &str) -> anyhow::Result<Option<ShareLink>> {
        let row = sqlx::query(
            r#"SELECT id, writing_id, token, created_by, expires_at, max_users, is_active, created_at
               FROM share_links WHERE token = $1"#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(link_from_row))
    }

    async fn list_active_for_writing(&self, writing_id: Uuid) -> anyhow::Result<Vec<ShareLink>> {
        let rows = sqlx::query(
            r#"SELECT id, writing_id, token, created_by, expires_at, max_users, is_active, created_at
               FROM share_links
               WHERE writing_id = $1 AND is_active
                 AND (expires_at IS NULL OR expires_at > now())
               ORDER BY created_at DESC"#,
        )
        .bind(writing_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(link_from_row).collect())
    }

    async fn deactivate(&self, writing_id: Uuid, link_id: Uuid) -> anyhow::Result<bool> {
        // Matched rows count even when is_active was already false, which is
        // what makes repeated deactivation succeed.
        let res = sqlx::query(
            "UPDATE share_links SET is_active = FALSE WHERE id = $1 AND writing_id = $2",
        )
        .bind(link_id)
        .bind(writing_id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }
}
