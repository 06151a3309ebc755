use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::collaborator_repository::{
    CollaboratorRepository, CollaboratorWithUser,
};
use crate::domain::writings::collab::{Collaborator, Role};
use crate::infrastructure::db::PgPool;

pub struct SqlxCollaboratorRepository {
    pub pool: PgPool,
}

impl SqlxCollaboratorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn collaborator_from_row(r: &sqlx::postgres::PgRow) -> anyhow::Result<Collaborator> {
    let role_str: String = r.get("role");
    let role = Role::from_str(&role_str)
        .ok_or_else(|| anyhow::anyhow!("unknown collaborator role: {role_str}"))?;
    Ok(Collaborator {
        id: r.get("id"),
        writing_id: r.get("writing_id"),
        user_id: r.get("user_id"),
        role,
        joined_at: r.get("joined_at"),
        last_active: r.try_get("last_active").ok(),
    })
}

#[async_trait]
impl CollaboratorRepository for SqlxCollaboratorRepository {
    async fn find(
        &self,
        writing_id: Uuid,
        user_id: Uuid,
    ) -> anyhow::Result<Option<Collaborator>> {
        let row = sqlx::query(
            r#"SELECT id, writing_id, user_id, role, joined_at, last_active
               FROM collaborators WHERE writing_id = $1 AND user_id = $2"#,
        )
        .bind(writing_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(collaborator_from_row).transpose()
    }

    async fn add(
        &self,
        writing_id: Uuid,
        user_id: Uuid,
        role: Role,
    ) -> anyhow::Result<Collaborator> {
        let row = sqlx::query(
            r#"INSERT INTO collaborators (writing_id, user_id, role)
               VALUES ($1, $2, $3)
               RETURNING id, writing_id, user_id, role, joined_at, last_active"#,
        )
        .bind(writing_id)
        .bind(user_id)
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await?;
        collaborator_from_row(&row)
    }

    async fn remove(&self, writing_id: Uuid, collaborator_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM collaborators WHERE id = $1 AND writing_id = $2")
            .bind(collaborator_id)
            .bind(writing_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn count_for_writing(&self, writing_id: Uuid) -> anyhow::Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM collaborators WHERE writing_id = $1")
                .bind(writing_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn list_with_users(
        &self,
        writing_id: Uuid,
    ) -> anyhow::Result<Vec<CollaboratorWithUser>> {
        let rows = sqlx::query(
            r#"SELECT c.id, c.writing_id, c.user_id, c.role, c.joined_at, c.last_active,
                      u.name AS user_name, u.email AS user_email
               FROM collaborators c JOIN users u ON u.id = c.user_id
               WHERE c.writing_id = $1
               ORDER BY c.joined_at ASC"#,
        )
        .bind(writing_id)
        .fetch_all(&self.pool)
        .await?;
        let mut out = Vec::with_capacity(rows.len());
        for r in rows.iter() {
            out.push(CollaboratorWithUser {
                collaborator: collaborator_from_row(r)?,
                user_name: r.get("user_name"),
                user_email: r.get("user_email"),
            });
        }
        Ok(out)
    }

    async fn touch_last_active(
        &self,
        writing_id: Uuid,
        user_id: Uuid,
        now: chrono::DateTime<chrono::Utc>,
    ) -> anyhow::Result<()> {
        sqlx::query(
            "UPDATE collaborators SET last_active = $3 WHERE writing_id = $1 AND user_id = $2",
        )
        .bind(writing_id)
        .bind(user_id)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
