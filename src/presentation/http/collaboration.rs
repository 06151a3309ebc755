use crate::application::dto::collaboration::{
    CollaborationOverviewDto, CollaboratorDto, LinkPreviewDto, RedeemOutcomeDto, ShareLinkDto,
};
use crate::application::error::ServiceError;
use crate::application::use_cases::collaboration::add_collaborator::AddCollaborator;
use crate::application::use_cases::collaboration::create_link::CreateLink;
use crate::application::use_cases::collaboration::deactivate_link::DeactivateLink;
use crate::application::use_cases::collaboration::get_overview::GetOverview;
use crate::application::use_cases::collaboration::inspect_link::InspectLink;
use crate::application::use_cases::collaboration::redeem_link::RedeemLink;
use crate::application::use_cases::collaboration::remove_collaborator::RemoveCollaborator;
use crate::bootstrap::app_context::AppContext;
use crate::domain::writings::collab::Role;
use crate::infrastructure::crypto::new_share_token;
use crate::presentation::http::auth::{caller_id, Bearer};
use crate::presentation::http::error::ApiError;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

fn frontend_base(cfg: &crate::bootstrap::config::Config) -> String {
    cfg.frontend_url
        .clone()
        .unwrap_or_else(|| "http://localhost:3000".to_string())
}

fn build_join_url(base: &str, token: &str) -> String {
    format!("{}/collaboration/join/{}", base.trim_end_matches('/'), token)
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CollaboratorResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub joined_at: chrono::DateTime<chrono::Utc>,
    pub last_active: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<CollaboratorDto> for CollaboratorResponse {
    fn from(c: CollaboratorDto) -> Self {
        Self {
            id: c.id,
            user_id: c.user_id,
            name: c.user_name,
            email: c.user_email,
            role: c.role.as_str().to_string(),
            joined_at: c.joined_at,
            last_active: c.last_active,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShareLinkResponse {
    pub id: Uuid,
    pub token: String,
    pub url: String,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub max_users: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ShareLinkResponse {
    fn from_dto(l: ShareLinkDto, base: &str) -> Self {
        let url = build_join_url(base, &l.token);
        Self {
            id: l.id,
            token: l.token,
            url,
            expires_at: l.expires_at,
            max_users: l.max_users,
            created_at: l.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CollaborationOverviewResponse {
    pub writing_id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
    pub my_role: String,
    pub collaborators: Vec<CollaboratorResponse>,
    pub active_links: Vec<ShareLinkResponse>,
}

impl CollaborationOverviewResponse {
    fn from_dto(o: CollaborationOverviewDto, base: &str) -> Self {
        Self {
            writing_id: o.writing_id,
            owner_id: o.owner_id,
            title: o.title,
            content: o.content,
            my_role: o.caller_role.as_str().to_string(),
            collaborators: o.collaborators.into_iter().map(Into::into).collect(),
            active_links: o
                .active_links
                .into_iter()
                .map(|l| ShareLinkResponse::from_dto(l, base))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddCollaboratorRequest {
    pub email: String,
    pub role: String,
}

#[derive(Debug, Deserialize, ToSchema, Default)]
pub struct CreateLinkRequest {
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub max_users: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LinkPreviewResponse {
    pub writing_id: Uuid,
    pub title: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub creator_name: String,
    pub current_members: i64,
    pub max_users: i32,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub can_join: bool,
}

impl From<LinkPreviewDto> for LinkPreviewResponse {
    fn from(p: LinkPreviewDto) -> Self {
        Self {
            writing_id: p.writing_id,
            title: p.writing_title,
            created_at: p.writing_created_at,
            creator_name: p.creator_name,
            current_members: p.current_members,
            max_users: p.max_users,
            expires_at: p.expires_at,
            can_join: p.can_join,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RedeemResponse {
    pub writing_id: Uuid,
    pub title: String,
    pub role: String,
    pub already_member: bool,
}

impl From<RedeemOutcomeDto> for RedeemResponse {
    fn from(r: RedeemOutcomeDto) -> Self {
        Self {
            writing_id: r.writing_id,
            title: r.writing_title,
            role: r.granted_role.as_str().to_string(),
            already_member: r.already_member,
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/join/:token", get(preview_link).post(redeem_link))
        .route("/:id", get(get_overview))
        .route("/:id/collaborators", post(add_collaborator))
        .route(
            "/:id/collaborators/:collaborator_id",
            delete(remove_collaborator),
        )
        .route("/:id/links", post(create_link))
        .route("/:id/links/:link_id", delete(deactivate_link))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/collaboration/{id}", tag = "Collaboration",
    params(("id" = String, Path, description = "Writing ID")),
    responses((status = 200, body = CollaborationOverviewResponse), (status = 404)))]
pub async fn get_overview(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<Uuid>,
) -> Result<Json<CollaborationOverviewResponse>, ApiError> {
    let user_id = caller_id(&ctx.cfg, bearer)?;
    let writings = ctx.writing_repo();
    let collaborators = ctx.collaborator_repo();
    let links = ctx.share_link_repo();
    let uc = GetOverview {
        writings: writings.as_ref(),
        collaborators: collaborators.as_ref(),
        links: links.as_ref(),
    };
    let overview = uc.execute(user_id, id).await?;
    let base = frontend_base(&ctx.cfg);
    Ok(Json(CollaborationOverviewResponse::from_dto(
        overview, &base,
    )))
}

#[utoipa::path(post, path = "/api/collaboration/{id}/collaborators", tag = "Collaboration",
    params(("id" = String, Path, description = "Writing ID")),
    request_body = AddCollaboratorRequest,
    responses((status = 200, body = CollaboratorResponse), (status = 400), (status = 403), (status = 404)))]
pub async fn add_collaborator(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<Uuid>,
    Json(req): Json<AddCollaboratorRequest>,
) -> Result<Json<CollaboratorResponse>, ApiError> {
    let user_id = caller_id(&ctx.cfg, bearer)?;
    let role = Role::from_str(&req.role)
        .ok_or_else(|| ServiceError::InvalidArgument("unknown role".into()))?;
    let writings = ctx.writing_repo();
    let collaborators = ctx.collaborator_repo();
    let users = ctx.user_repo();
    let uc = AddCollaborator {
        writings: writings.as_ref(),
        collaborators: collaborators.as_ref(),
        users: users.as_ref(),
    };
    let added = uc.execute(id, user_id, &req.email, role).await?;
    Ok(Json(added.into()))
}

#[utoipa::path(delete, path = "/api/collaboration/{id}/collaborators/{collaborator_id}", tag = "Collaboration",
    params(
        ("id" = String, Path, description = "Writing ID"),
        ("collaborator_id" = String, Path, description = "Collaborator row ID")
    ),
    responses((status = 204), (status = 403), (status = 404)))]
pub async fn remove_collaborator(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path((id, collaborator_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let user_id = caller_id(&ctx.cfg, bearer)?;
    let writings = ctx.writing_repo();
    let collaborators = ctx.collaborator_repo();
    let uc = RemoveCollaborator {
        writings: writings.as_ref(),
        collaborators: collaborators.as_ref(),
    };
    uc.execute(id, user_id, collaborator_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/api/collaboration/{id}/links", tag = "Collaboration",
    params(("id" = String, Path, description = "Writing ID")),
    request_body = CreateLinkRequest,
    responses((status = 200, body = ShareLinkResponse), (status = 403), (status = 404)))]
pub async fn create_link(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<Uuid>,
    req: Option<Json<CreateLinkRequest>>,
) -> Result<Json<ShareLinkResponse>, ApiError> {
    let user_id = caller_id(&ctx.cfg, bearer)?;
    let req = req.map(|Json(r)| r).unwrap_or_default();
    let token = new_share_token();
    let writings = ctx.writing_repo();
    let collaborators = ctx.collaborator_repo();
    let links = ctx.share_link_repo();
    let uc = CreateLink {
        writings: writings.as_ref(),
        collaborators: collaborators.as_ref(),
        links: links.as_ref(),
    };
    let link = uc
        .execute(id, user_id, &token, req.expires_at, req.max_users)
        .await?;
    let base = frontend_base(&ctx.cfg);
    let url = build_join_url(&base, &link.token);
    Ok(Json(ShareLinkResponse {
        id: link.id,
        token: link.token,
        url,
        expires_at: link.expires_at,
        max_users: link.max_users,
        created_at: link.created_at,
    }))
}

#[utoipa::path(delete, path = "/api/collaboration/{id}/links/{link_id}", tag = "Collaboration",
    params(
        ("id" = String, Path, description = "Writing ID"),
        ("link_id" = String, Path, description = "Share link ID")
    ),
    responses((status = 204), (status = 403), (status = 404)))]
pub async fn deactivate_link(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path((id, link_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let user_id = caller_id(&ctx.cfg, bearer)?;
    let writings = ctx.writing_repo();
    let collaborators = ctx.collaborator_repo();
    let links = ctx.share_link_repo();
    let uc = DeactivateLink {
        writings: writings.as_ref(),
        collaborators: collaborators.as_ref(),
        links: links.as_ref(),
    };
    uc.execute(id, user_id, link_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/collaboration/join/{token}", tag = "Collaboration",
    params(("token" = String, Path, description = "Share token")),
    security(()),
    responses((status = 200, body = LinkPreviewResponse), (status = 404), (status = 410)))]
pub async fn preview_link(
    State(ctx): State<AppContext>,
    Path(token): Path<String>,
) -> Result<Json<LinkPreviewResponse>, ApiError> {
    let links = ctx.share_link_repo();
    let writings = ctx.writing_repo();
    let collaborators = ctx.collaborator_repo();
    let users = ctx.user_repo();
    let uc = InspectLink {
        links: links.as_ref(),
        writings: writings.as_ref(),
        collaborators: collaborators.as_ref(),
        users: users.as_ref(),
    };
    let preview = uc.execute(&token).await?;
    Ok(Json(preview.into()))
}

#[utoipa::path(post, path = "/api/collaboration/join/{token}", tag = "Collaboration",
    params(("token" = String, Path, description = "Share token")),
    responses((status = 200, body = RedeemResponse), (status = 403), (status = 404), (status = 410)))]
pub async fn redeem_link(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(token): Path<String>,
) -> Result<Json<RedeemResponse>, ApiError> {
    let user_id = caller_id(&ctx.cfg, bearer)?;
    let links = ctx.share_link_repo();
    let writings = ctx.writing_repo();
    let collaborators = ctx.collaborator_repo();
    let uc = RedeemLink {
        links: links.as_ref(),
        writings: writings.as_ref(),
        collaborators: collaborators.as_ref(),
    };
    let outcome = uc.execute(&token, user_id).await?;
    Ok(Json(outcome.into()))
}
