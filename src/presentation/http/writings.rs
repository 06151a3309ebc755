use crate::application::ports::writing_repository::SharedWriting;
use crate::application::use_cases::writings::create_writing::CreateWriting;
use crate::application::use_cases::writings::delete_writing::DeleteWriting;
use crate::application::use_cases::writings::get_writing::GetWriting;
use crate::application::use_cases::writings::list_revisions::ListRevisions;
use crate::application::use_cases::writings::list_shared::ListSharedWritings;
use crate::application::use_cases::writings::list_writings::ListWritings;
use crate::application::use_cases::writings::restore_revision::RestoreRevision;
use crate::application::use_cases::writings::update_content::UpdateContent;
use crate::bootstrap::app_context::AppContext;
use crate::domain::writings::writing::{Revision, Writing};
use crate::presentation::http::auth::{caller_id, Bearer};
use crate::presentation::http::error::ApiError;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct WritingResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub collection_id: Option<Uuid>,
    pub title: String,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Writing> for WritingResponse {
    fn from(w: Writing) -> Self {
        Self {
            id: w.id,
            owner_id: w.owner_id,
            collection_id: w.collection_id,
            title: w.title,
            content: w.content,
            created_at: w.created_at,
            updated_at: w.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WritingDetailResponse {
    #[serde(flatten)]
    pub writing: WritingResponse,
    pub my_role: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WritingListResponse {
    pub writings: Vec<WritingResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SharedWritingResponse {
    #[serde(flatten)]
    pub writing: WritingResponse,
    pub my_role: String,
    pub owner_name: String,
    pub owner_email: String,
}

impl From<SharedWriting> for SharedWritingResponse {
    fn from(s: SharedWriting) -> Self {
        Self {
            writing: s.writing.into(),
            my_role: s.role.as_str().to_string(),
            owner_name: s.owner_name,
            owner_email: s.owner_email,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SharedWritingListResponse {
    pub writings: Vec<SharedWritingResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateWritingRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub collection_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateWritingRequest {
    pub title: String,
    pub content: String,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub collection_id: DoubleOption<Uuid>,
}

/// Distinguishes an absent JSON field from an explicit `null`, so a PATCH can
/// leave the collection untouched or clear it.
#[derive(Debug, Clone)]
pub enum DoubleOption<T> {
    NotProvided,
    Null,
    Some(T),
}

impl<T> Default for DoubleOption<T> {
    fn default() -> Self {
        DoubleOption::NotProvided
    }
}

fn deserialize_double_option<'de, D, T>(deserializer: D) -> Result<DoubleOption<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(|opt| match opt {
        None => DoubleOption::Null,
        Some(value) => DoubleOption::Some(value),
    })
}

impl<T> DoubleOption<T> {
    fn into_update(self) -> Option<Option<T>> {
        match self {
            DoubleOption::NotProvided => None,
            DoubleOption::Null => Some(None),
            DoubleOption::Some(v) => Some(Some(v)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListWritingsQuery {
    pub query: Option<String>,
    pub collection_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RevisionResponse {
    pub id: Uuid,
    pub writing_id: Uuid,
    pub title: String,
    pub sequence_number: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Revision> for RevisionResponse {
    fn from(r: Revision) -> Self {
        Self {
            id: r.id,
            writing_id: r.writing_id,
            title: r.title,
            sequence_number: r.sequence_number,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RevisionListResponse {
    pub revisions: Vec<RevisionResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestoreResponse {
    pub title: String,
    pub content: String,
    pub sequence_number: i64,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(list_writings).post(create_writing))
        .route("/shared", get(list_shared_writings))
        .route(
            "/:id",
            get(get_writing).patch(update_writing).delete(delete_writing),
        )
        .route("/:id/versions", get(list_revisions))
        .route("/:id/versions/:revision_id/restore", post(restore_revision))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/writings", tag = "Writings",
    params(
        ("query" = Option<String>, Query, description = "Substring match on title and content"),
        ("collection_id" = Option<String>, Query, description = "Filter by collection")
    ),
    responses((status = 200, body = WritingListResponse)))]
pub async fn list_writings(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    q: Option<Query<ListWritingsQuery>>,
) -> Result<Json<WritingListResponse>, ApiError> {
    let user_id = caller_id(&ctx.cfg, bearer)?;
    let q = q.map(|Query(q)| q);
    let repo = ctx.writing_repo();
    let uc = ListWritings {
        writings: repo.as_ref(),
    };
    let items = uc
        .execute(
            user_id,
            q.as_ref().and_then(|q| q.query.clone()),
            q.as_ref().and_then(|q| q.collection_id),
        )
        .await?;
    Ok(Json(WritingListResponse {
        writings: items.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(get, path = "/api/writings/shared", tag = "Writings",
    responses((status = 200, body = SharedWritingListResponse)))]
pub async fn list_shared_writings(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<SharedWritingListResponse>, ApiError> {
    let user_id = caller_id(&ctx.cfg, bearer)?;
    let repo = ctx.writing_repo();
    let uc = ListSharedWritings {
        writings: repo.as_ref(),
    };
    let items = uc.execute(user_id).await?;
    Ok(Json(SharedWritingListResponse {
        writings: items.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(post, path = "/api/writings", tag = "Writings",
    request_body = CreateWritingRequest,
    responses((status = 200, body = WritingResponse)))]
pub async fn create_writing(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<CreateWritingRequest>,
) -> Result<Json<WritingResponse>, ApiError> {
    let user_id = caller_id(&ctx.cfg, bearer)?;
    let writings = ctx.writing_repo();
    let collections = ctx.collection_repo();
    let uc = CreateWriting {
        writings: writings.as_ref(),
        collections: collections.as_ref(),
    };
    let writing = uc
        .execute(user_id, &req.title, &req.content, req.collection_id)
        .await?;
    Ok(Json(writing.into()))
}

#[utoipa::path(get, path = "/api/writings/{id}", tag = "Writings",
    params(("id" = String, Path, description = "Writing ID")),
    responses((status = 200, body = WritingDetailResponse), (status = 404)))]
pub async fn get_writing(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<Uuid>,
) -> Result<Json<WritingDetailResponse>, ApiError> {
    let user_id = caller_id(&ctx.cfg, bearer)?;
    let writings = ctx.writing_repo();
    let collaborators = ctx.collaborator_repo();
    let uc = GetWriting {
        writings: writings.as_ref(),
        collaborators: collaborators.as_ref(),
    };
    let (writing, role) = uc.execute(user_id, id).await?;
    Ok(Json(WritingDetailResponse {
        writing: writing.into(),
        my_role: role.as_str().to_string(),
    }))
}

#[utoipa::path(patch, path = "/api/writings/{id}", tag = "Writings",
    params(("id" = String, Path, description = "Writing ID")),
    request_body = UpdateWritingRequest,
    responses((status = 200, body = WritingResponse), (status = 403), (status = 404)))]
pub async fn update_writing(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateWritingRequest>,
) -> Result<Json<WritingResponse>, ApiError> {
    let user_id = caller_id(&ctx.cfg, bearer)?;
    let writings = ctx.writing_repo();
    let collaborators = ctx.collaborator_repo();
    let collections = ctx.collection_repo();
    let uc = UpdateContent {
        writings: writings.as_ref(),
        collaborators: collaborators.as_ref(),
        collections: collections.as_ref(),
    };
    let (writing, _revision) = uc
        .execute(
            id,
            user_id,
            &req.title,
            &req.content,
            req.collection_id.into_update(),
        )
        .await?;
    Ok(Json(writing.into()))
}

#[utoipa::path(delete, path = "/api/writings/{id}", tag = "Writings",
    params(("id" = String, Path, description = "Writing ID")),
    responses((status = 204), (status = 404)))]
pub async fn delete_writing(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let user_id = caller_id(&ctx.cfg, bearer)?;
    let writings = ctx.writing_repo();
    let uc = DeleteWriting {
        writings: writings.as_ref(),
    };
    uc.execute(id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/writings/{id}/versions", tag = "Writings",
    params(("id" = String, Path, description = "Writing ID")),
    responses((status = 200, body = RevisionListResponse), (status = 404)))]
pub async fn list_revisions(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<Uuid>,
) -> Result<Json<RevisionListResponse>, ApiError> {
    let user_id = caller_id(&ctx.cfg, bearer)?;
    let writings = ctx.writing_repo();
    let collaborators = ctx.collaborator_repo();
    let revisions = ctx.revision_repo();
    let uc = ListRevisions {
        writings: writings.as_ref(),
        collaborators: collaborators.as_ref(),
        revisions: revisions.as_ref(),
    };
    let items = uc.execute(user_id, id).await?;
    Ok(Json(RevisionListResponse {
        revisions: items.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(post, path = "/api/writings/{id}/versions/{revision_id}/restore", tag = "Writings",
    params(
        ("id" = String, Path, description = "Writing ID"),
        ("revision_id" = String, Path, description = "Revision ID")
    ),
    responses((status = 200, body = RestoreResponse), (status = 403), (status = 404)))]
pub async fn restore_revision(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path((id, revision_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<RestoreResponse>, ApiError> {
    let user_id = caller_id(&ctx.cfg, bearer)?;
    let writings = ctx.writing_repo();
    let collaborators = ctx.collaborator_repo();
    let revisions = ctx.revision_repo();
    let uc = RestoreRevision {
        writings: writings.as_ref(),
        collaborators: collaborators.as_ref(),
        revisions: revisions.as_ref(),
    };
    let restored = uc.execute(user_id, id, revision_id).await?;
    Ok(Json(RestoreResponse {
        title: restored.title,
        content: restored.content,
        sequence_number: restored.sequence_number,
    }))
}
