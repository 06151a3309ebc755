use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    security(()),
    responses((status = 200, body = HealthResponse))
)]
pub async fn health(State(pool): State<PgPool>) -> Json<HealthResponse> {
    let database = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&pool)
        .await
        .is_ok();
    let status = if database { "ok" } else { "degraded" };
    Json(HealthResponse { status, database })
}

pub fn routes(pool: PgPool) -> Router {
    Router::new().route("/health", get(health)).with_state(pool)
}
