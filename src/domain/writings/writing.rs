use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Writing {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub collection_id: Option<Uuid>,
    pub title: String,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Immutable snapshot of a writing's (title, content). Sequence numbers are
/// strictly increasing per writing; gaps appear once old revisions are pruned.
#[derive(Debug, Clone)]
pub struct Revision {
    pub id: Uuid,
    pub writing_id: Uuid,
    pub title: String,
    pub content: String,
    pub sequence_number: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// How many revisions survive per writing after a content update.
pub const REVISION_RETENTION: i64 = 3;

#[derive(Debug, Clone)]
pub struct Collection {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
