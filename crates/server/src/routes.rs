use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::{Health, PONG};
use service::group::repository::{mock::MockGroupRepository, GroupRepository};
use service::health::{StaticProbe, StorageProbe};
use service::relations::GroupExistenceChecker;
use service::student::repository::{mock::MockStudentRepository, StudentRepository};
use service::{GroupService, StudentService};

use crate::openapi::ApiDoc;

pub mod groups;
pub mod students;

pub type DynGroupService = GroupService<dyn GroupRepository>;
pub type DynStudentService = StudentService<dyn StudentRepository, dyn GroupExistenceChecker>;

/// Shared handler state. Services are storage-agnostic; the probe backs `/api/health`.
#[derive(Clone)]
pub struct ServerState {
    pub groups: Arc<DynGroupService>,
    pub students: Arc<DynStudentService>,
    pub probe: Arc<dyn StorageProbe>,
}

impl ServerState {
    /// Wire both services; the student service checks group ids through the group service.
    pub fn new(
        group_repo: Arc<dyn GroupRepository>,
        student_repo: Arc<dyn StudentRepository>,
        probe: Arc<dyn StorageProbe>,
    ) -> Self {
        let groups: Arc<DynGroupService> = Arc::new(GroupService::new(group_repo));
        let checker: Arc<dyn GroupExistenceChecker> = groups.clone();
        let students = Arc::new(StudentService::new(student_repo, checker));
        Self { groups, students, probe }
    }

    /// State over empty in-memory repositories.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MockGroupRepository::default()),
            Arc::new(MockStudentRepository::default()),
            Arc::new(StaticProbe(true)),
        )
    }
}

#[utoipa::path(get, path = "/api/health", tag = "health", responses((status = 200, description = "Storage liveness", body = crate::openapi::HealthResponse)))]
pub async fn health(State(state): State<ServerState>) -> Json<Health> {
    Json(Health { passed: state.probe.ping().await })
}

#[utoipa::path(get, path = "/api/ping", tag = "health", responses((status = 200, description = "PONG", body = String)))]
pub async fn ping() -> &'static str {
    PONG
}

fn api_routes() -> Router<ServerState> {
    Router::new()
        .route("/health", get(health))
        .route("/ping", get(ping))
        .route("/groups", get(groups::list).post(groups::create))
        .route("/students", post(students::create))
        .route("/students/_search", post(students::search))
        .route("/students/groupId/:group_id", get(students::list_by_group_id))
        .route(
            "/students/:id",
            get(students::get).patch(students::update).delete(students::delete),
        )
}

/// Build the full application router: `/api` routes, Swagger UI, CORS and request tracing.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
