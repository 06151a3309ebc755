use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::writing_repository::{SharedWriting, WritingRepository};
use crate::domain::writings::collab::Role;
use crate::domain::writings::writing::{REVISION_RETENTION, Revision, Writing};
use crate::infrastructure::db::PgPool;

pub struct SqlxWritingRepository {
    pub pool: PgPool,
}

impl SqlxWritingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn writing_from_row(r: &sqlx::postgres::PgRow) -> Writing {
    Writing {
        id: r.get("id"),
        owner_id: r.get("owner_id"),
        collection_id: r.try_get("collection_id").ok(),
        title: r.get("title"),
        content: r.get("content"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

#[async_trait]
impl WritingRepository for SqlxWritingRepository {
    async fn create_for_user(
        &self,
        owner_id: Uuid,
        title: &str,
        content: &str,
        collection_id: Option<Uuid>,
    ) -> anyhow::Result<Writing> {
        let row = sqlx::query(
            r#"INSERT INTO writings (owner_id, title, content, collection_id)
               VALUES ($1, $2, $3, $4)
               RETURNING id, owner_id, collection_id, title, content, created_at, updated_at"#,
        )
        .bind(owner_id)
        .bind(title)
        .bind(content)
        .bind(collection_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(writing_from_row(&row))
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Writing>> {
        let row = sqlx::query(
            r#"SELECT id, owner_id, collection_id, title, content, created_at, updated_at
               FROM writings WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(writing_from_row))
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        query: Option<String>,
        collection_id: Option<Uuid>,
    ) -> anyhow::Result<Vec<Writing>> {
        let pattern = query
            .as_deref()
            .map(|q| q.trim())
            .filter(|q| !q.is_empty())
            .map(|q| format!("%{}%", q.replace('%', "\\%").replace('_', "\\_")));
        let rows = sqlx::query(
            r#"SELECT w.id, w.owner_id, w.collection_id, w.title, w.content,
                      w.created_at, w.updated_at
               FROM writings w
               LEFT JOIN collections col ON col.id = w.collection_id
               WHERE w.owner_id = $1
                 AND ($2::text IS NULL
                      OR w.title ILIKE $2 OR w.content ILIKE $2 OR col.name ILIKE $2)
                 AND ($3::uuid IS NULL OR w.collection_id = $3)
               ORDER BY w.updated_at DESC"#,
        )
        .bind(user_id)
        .bind(pattern)
        .bind(collection_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(writing_from_row).collect())
    }

    async fn list_shared_with_user(&self, user_id: Uuid) -> anyhow::Result<Vec<SharedWriting>> {
        let rows = sqlx::query(
            r#"SELECT w.id, w.owner_id, w.collection_id, w.title, w.content,
                      w.created_at, w.updated_at,
                      c.role, u.name AS owner_name, u.email AS owner_email
               FROM collaborators c
               JOIN writings w ON w.id = c.writing_id
               JOIN users u ON u.id = w.owner_id
               WHERE c.user_id = $1
               ORDER BY w.updated_at DESC"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        let mut out = Vec::with_capacity(rows.len());
        for r in rows.iter() {
            let role_str: String = r.get("role");
            let role = Role::from_str(&role_str)
                .ok_or_else(|| anyhow::anyhow!("unknown collaborator role: {role_str}"))?;
            out.push(SharedWriting {
                writing: writing_from_row(r),
                role,
                owner_name: r.get("owner_name"),
                owner_email: r.get("owner_email"),
            });
        }
        Ok(out)
    }

    async fn count_for_user(&self, owner_id: Uuid) -> anyhow::Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM writings WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM writings WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn update_content_with_revision(
        &self,
        id: Uuid,
        title: &str,
        content: &str,
        collection_id: Option<Option<Uuid>>,
    ) -> anyhow::Result<(Writing, Revision)> {
        let mut tx = self.pool.begin().await?;

        // Serialize revision creation per writing. The advisory lock is keyed
        // by the writing id and released when the transaction ends, so
        // concurrent updates line up here instead of racing the MAX() read.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1::text, 0))")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let row = match collection_id {
            None => {
                sqlx::query(
                    r#"UPDATE writings SET title = $2, content = $3, updated_at = now()
                       WHERE id = $1
                       RETURNING id, owner_id, collection_id, title, content, created_at, updated_at"#,
                )
                .bind(id)
                .bind(title)
                .bind(content)
                .fetch_optional(&mut *tx)
                .await?
            }
            Some(target) => {
                sqlx::query(
                    r#"UPDATE writings
                       SET title = $2, content = $3, collection_id = $4, updated_at = now()
                       WHERE id = $1
                       RETURNING id, owner_id, collection_id, title, content, created_at, updated_at"#,
                )
                .bind(id)
                .bind(title)
                .bind(content)
                .bind(target)
                .fetch_optional(&mut *tx)
                .await?
            }
        };
        let row = row.ok_or_else(|| anyhow::anyhow!("writing not found"))?;
        let writing = writing_from_row(&row);

        let rev_row = sqlx::query(
            r#"INSERT INTO revisions (writing_id, title, content, sequence_number)
               SELECT $1, $2, $3, COALESCE(MAX(sequence_number), 0) + 1
               FROM revisions WHERE writing_id = $1
               RETURNING id, writing_id, title, content, sequence_number, created_at"#,
        )
        .bind(id)
        .bind(title)
        .bind(content)
        .fetch_one(&mut *tx)
        .await?;
        let revision = Revision {
            id: rev_row.get("id"),
            writing_id: rev_row.get("writing_id"),
            title: rev_row.get("title"),
            content: rev_row.get("content"),
            sequence_number: rev_row.get("sequence_number"),
            created_at: rev_row.get("created_at"),
        };

        sqlx::query(
            r#"DELETE FROM revisions
               WHERE writing_id = $1 AND id NOT IN (
                   SELECT id FROM revisions
                   WHERE writing_id = $1
                   ORDER BY sequence_number DESC
                   LIMIT $2
               )"#,
        )
        .bind(id)
        .bind(REVISION_RETENTION)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((writing, revision))
    }
}
