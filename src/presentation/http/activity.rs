use crate::application::use_cases::activity::ping::PingActivity;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::{caller_id, Bearer};
use crate::presentation::http::error::ApiError;
use axum::{Json, Router, extract::State, routing::post};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityResponse {
    pub last_active: Option<chrono::DateTime<chrono::Utc>>,
    pub total_minutes: i64,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new().route("/ping", post(ping)).with_state(ctx)
}

#[utoipa::path(post, path = "/api/activity/ping", tag = "Activity",
    responses((status = 200, body = ActivityResponse)))]
pub async fn ping(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<ActivityResponse>, ApiError> {
    let user_id = caller_id(&ctx.cfg, bearer)?;
    let repo = ctx.user_repo();
    let uc = PingActivity {
        users: repo.as_ref(),
    };
    let state = uc.execute(user_id, chrono::Utc::now()).await?;
    Ok(Json(ActivityResponse {
        last_active: state.last_active,
        total_minutes: state.total_minutes,
    }))
}
