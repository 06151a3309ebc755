use crate::application::use_cases::collections::create_collection::CreateCollection;
use crate::application::use_cases::collections::list_collections::ListCollections;
use crate::bootstrap::app_context::AppContext;
use crate::domain::writings::writing::Collection;
use crate::presentation::http::auth::{caller_id, Bearer};
use crate::presentation::http::error::ApiError;
use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct CollectionResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Collection> for CollectionResponse {
    fn from(c: Collection) -> Self {
        Self {
            id: c.id,
            name: c.name,
            created_at: c.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CollectionListResponse {
    pub collections: Vec<CollectionResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCollectionRequest {
    pub name: String,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(list_collections).post(create_collection))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/collections", tag = "Collections",
    responses((status = 200, body = CollectionListResponse)))]
pub async fn list_collections(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<CollectionListResponse>, ApiError> {
    let user_id = caller_id(&ctx.cfg, bearer)?;
    let repo = ctx.collection_repo();
    let uc = ListCollections {
        collections: repo.as_ref(),
    };
    let items = uc.execute(user_id).await?;
    Ok(Json(CollectionListResponse {
        collections: items.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(post, path = "/api/collections", tag = "Collections",
    request_body = CreateCollectionRequest,
    responses((status = 200, body = CollectionResponse), (status = 400)))]
pub async fn create_collection(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<CreateCollectionRequest>,
) -> Result<Json<CollectionResponse>, ApiError> {
    let user_id = caller_id(&ctx.cfg, bearer)?;
    let repo = ctx.collection_repo();
    let uc = CreateCollection {
        collections: repo.as_ref(),
    };
    let collection = uc.execute(user_id, &req.name).await?;
    Ok(Json(collection.into()))
}
