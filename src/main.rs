use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use api::bootstrap::app_context::{AppContext, AppServices};
use api::bootstrap::config::Config;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            api::presentation::http::auth::register,
            api::presentation::http::auth::login,
            api::presentation::http::auth::logout,
            api::presentation::http::auth::me,
            api::presentation::http::writings::list_writings,
            api::presentation::http::writings::list_shared_writings,
            api::presentation::http::writings::create_writing,
            api::presentation::http::writings::get_writing,
            api::presentation::http::writings::update_writing,
            api::presentation::http::writings::delete_writing,
            api::presentation::http::writings::list_revisions,
            api::presentation::http::writings::restore_revision,
            api::presentation::http::collaboration::get_overview,
            api::presentation::http::collaboration::add_collaborator,
            api::presentation::http::collaboration::remove_collaborator,
            api::presentation::http::collaboration::create_link,
            api::presentation::http::collaboration::deactivate_link,
            api::presentation::http::collaboration::preview_link,
            api::presentation::http::collaboration::redeem_link,
            api::presentation::http::collections::list_collections,
            api::presentation::http::collections::create_collection,
            api::presentation::http::dashboard::get_dashboard,
            api::presentation::http::activity::ping,
            api::presentation::http::health::health,
        ),
        components(schemas(
            api::presentation::http::auth::RegisterRequest,
            api::presentation::http::auth::LoginRequest,
            api::presentation::http::auth::LoginResponse,
            api::presentation::http::auth::UserResponse,
            api::presentation::http::writings::WritingResponse,
            api::presentation::http::writings::WritingDetailResponse,
            api::presentation::http::writings::WritingListResponse,
            api::presentation::http::writings::SharedWritingResponse,
            api::presentation::http::writings::SharedWritingListResponse,
            api::presentation::http::writings::CreateWritingRequest,
            api::presentation::http::writings::UpdateWritingRequest,
            api::presentation::http::writings::RevisionResponse,
            api::presentation::http::writings::RevisionListResponse,
            api::presentation::http::writings::RestoreResponse,
            api::presentation::http::collaboration::CollaboratorResponse,
            api::presentation::http::collaboration::ShareLinkResponse,
            api::presentation::http::collaboration::CollaborationOverviewResponse,
            api::presentation::http::collaboration::AddCollaboratorRequest,
            api::presentation::http::collaboration::CreateLinkRequest,
            api::presentation::http::collaboration::LinkPreviewResponse,
            api::presentation::http::collaboration::RedeemResponse,
            api::presentation::http::collections::CollectionResponse,
            api::presentation::http::collections::CollectionListResponse,
            api::presentation::http::collections::CreateCollectionRequest,
            api::presentation::http::dashboard::DashboardCollectionResponse,
            api::presentation::http::dashboard::DashboardResponse,
            api::presentation::http::activity::ActivityResponse,
            api::presentation::http::health::HealthResponse,
        )),
        tags(
            (name = "Auth", description = "Authentication"),
            (name = "Writings", description = "Writings and their revision history"),
            (name = "Collaboration", description = "Collaborators and share links"),
            (name = "Collections", description = "Collections of writings"),
            (name = "Activity", description = "Writing-time tracking"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting Quotient backend");

    // Database
    let pool = api::infrastructure::db::connect_pool(&cfg.database_url).await?;
    api::infrastructure::db::migrate(&pool).await?;

    let writing_repo = Arc::new(
        api::infrastructure::db::repositories::writing_repository_sqlx::SqlxWritingRepository::new(
            pool.clone(),
        ),
    );
    let revision_repo = Arc::new(
        api::infrastructure::db::repositories::revision_repository_sqlx::SqlxRevisionRepository::new(
            pool.clone(),
        ),
    );
    let collaborator_repo = Arc::new(
        api::infrastructure::db::repositories::collaborator_repository_sqlx::SqlxCollaboratorRepository::new(
            pool.clone(),
        ),
    );
    let share_link_repo = Arc::new(
        api::infrastructure::db::repositories::share_link_repository_sqlx::SqlxShareLinkRepository::new(
            pool.clone(),
        ),
    );
    let collection_repo = Arc::new(
        api::infrastructure::db::repositories::collection_repository_sqlx::SqlxCollectionRepository::new(
            pool.clone(),
        ),
    );
    let user_repo = Arc::new(
        api::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository::new(
            pool.clone(),
        ),
    );

    let services = AppServices::new(
        writing_repo,
        revision_repo,
        collaborator_repo,
        share_link_repo,
        collection_repo,
        user_repo,
    );

    let ctx = AppContext::new(cfg.clone(), services);

    // Build CORS
    let cors = if let Some(origin) = cfg.frontend_url.clone() {
        match HeaderValue::from_str(&origin) {
            Ok(v) => CorsLayer::new()
                .allow_origin(v)
                .allow_methods([
                    http::Method::GET,
                    http::Method::POST,
                    http::Method::PUT,
                    http::Method::DELETE,
                    http::Method::PATCH,
                    http::Method::OPTIONS,
                ])
                .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
                .allow_credentials(true),
            Err(_) => CorsLayer::new()
                .allow_origin(AllowOrigin::mirror_request())
                .allow_methods([
                    http::Method::GET,
                    http::Method::POST,
                    http::Method::PUT,
                    http::Method::DELETE,
                    http::Method::PATCH,
                    http::Method::OPTIONS,
                ])
                .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
                .allow_credentials(true),
        }
    } else if cfg.is_production {
        // FRONTEND_URL is mandatory in production (enforced earlier); deny all as a fallback
        CorsLayer::new()
            .allow_origin(AllowOrigin::exact(HeaderValue::from_static("http://invalid")))
            .allow_methods([
                http::Method::GET,
                http::Method::POST,
                http::Method::PUT,
                http::Method::DELETE,
                http::Method::PATCH,
                http::Method::OPTIONS,
            ])
            .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
    } else {
        // Development convenience
        CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods([
                http::Method::GET,
                http::Method::POST,
                http::Method::PUT,
                http::Method::DELETE,
                http::Method::PATCH,
                http::Method::OPTIONS,
            ])
            .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
            .allow_credentials(true)
    };

    let app = Router::new()
        .nest(
            "/api",
            api::presentation::http::health::routes(pool.clone()),
        )
        .nest(
            "/api/auth",
            api::presentation::http::auth::routes(ctx.clone()),
        )
        .nest(
            "/api/writings",
            api::presentation::http::writings::routes(ctx.clone()),
        )
        .nest(
            "/api/collaboration",
            api::presentation::http::collaboration::routes(ctx.clone()),
        )
        .nest(
            "/api/collections",
            api::presentation::http::collections::routes(ctx.clone()),
        )
        .nest(
            "/api/dashboard",
            api::presentation::http::dashboard::routes(ctx.clone()),
        )
        .nest(
            "/api/activity",
            api::presentation::http::activity::routes(ctx.clone()),
        )
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;
    Ok(())
}
