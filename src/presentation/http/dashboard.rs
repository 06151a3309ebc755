use crate::application::use_cases::collections::get_dashboard::GetDashboard;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::{caller_id, Bearer};
use crate::presentation::http::error::ApiError;
use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardCollectionResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub writing_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub collections: Vec<DashboardCollectionResponse>,
    pub writings_total: i64,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new().route("/", get(get_dashboard)).with_state(ctx)
}

#[utoipa::path(get, path = "/api/dashboard", tag = "Collections",
    responses((status = 200, body = DashboardResponse)))]
pub async fn get_dashboard(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<DashboardResponse>, ApiError> {
    let user_id = caller_id(&ctx.cfg, bearer)?;
    let writings = ctx.writing_repo();
    let collections = ctx.collection_repo();
    let uc = GetDashboard {
        writings: writings.as_ref(),
        collections: collections.as_ref(),
    };
    let data = uc.execute(user_id).await?;
    Ok(Json(DashboardResponse {
        collections: data
            .collections
            .into_iter()
            .map(|(c, n)| DashboardCollectionResponse {
                id: c.id,
                name: c.name,
                created_at: c.created_at,
                writing_count: n,
            })
            .collect(),
        writings_total: data.writings_total,
    }))
}
