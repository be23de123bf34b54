use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::WithRejection;

use common::types::CreatedId;
use service::group::domain::{GroupCreateInput, GroupView};

use crate::errors::ApiError;
use crate::routes::ServerState;

#[utoipa::path(get, path = "/api/groups", tag = "groups", responses((status = 200, description = "All groups", body = [crate::openapi::GroupViewDoc])))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<GroupView>>, ApiError> {
    Ok(Json(state.groups.list().await?))
}

#[utoipa::path(
    post,
    path = "/api/groups",
    tag = "groups",
    request_body = crate::openapi::GroupCreateDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CreatedIdDoc),
        (status = 400, description = "Validation failed", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    WithRejection(Json(input), _): WithRejection<Json<GroupCreateInput>, ApiError>,
) -> Result<(StatusCode, Json<CreatedId>), ApiError> {
    let id = state.groups.create(input).await?;
    Ok((StatusCode::CREATED, Json(CreatedId { id })))
}
