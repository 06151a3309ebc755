use uuid::Uuid;

use crate::domain::writings::collab::Role;

#[derive(Debug, Clone)]
pub struct CollaboratorDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub role: Role,
    pub joined_at: chrono::DateTime<chrono::Utc>,
    pub last_active: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone)]
pub struct ShareLinkDto {
    pub id: Uuid,
    pub token: String,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub max_users: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Everything the share management UI needs about one writing.
#[derive(Debug, Clone)]
pub struct CollaborationOverviewDto {
    pub writing_id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
    pub caller_role: Role,
    pub collaborators: Vec<CollaboratorDto>,
    pub active_links: Vec<ShareLinkDto>,
}

/// Unauthenticated preview of a share link.
#[derive(Debug, Clone)]
pub struct LinkPreviewDto {
    pub writing_id: Uuid,
    pub writing_title: String,
    pub writing_created_at: chrono::DateTime<chrono::Utc>,
    pub creator_name: String,
    /// Owner plus collaborators, the same headcount `max_users` caps.
    pub current_members: i64,
    pub max_users: i32,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub can_join: bool,
}

/// Outcome of presenting a share token while signed in.
#[derive(Debug, Clone)]
pub struct RedeemOutcomeDto {
    pub writing_id: Uuid,
    pub writing_title: String,
    pub granted_role: Role,
    pub already_member: bool,
}
