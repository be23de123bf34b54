use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;

use common::types::CreatedId;
use service::student::domain::{StudentCreateInput, StudentDetails, StudentInfo, StudentQuery, StudentUpdateInput};

use crate::errors::ApiError;
use crate::routes::ServerState;

type JsonBody<T> = WithRejection<Json<T>, ApiError>;

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    tag = "students",
    params(("id" = String, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student details", body = crate::openapi::StudentDetailsDoc),
        (status = 400, description = "Malformed id", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Unknown student", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<StudentDetails>, ApiError> {
    Ok(Json(state.students.get(&id).await?))
}

#[utoipa::path(
    post,
    path = "/api/students",
    tag = "students",
    request_body = crate::openapi::StudentCreateDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CreatedIdDoc),
        (status = 400, description = "Validation failed or unknown group", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    WithRejection(Json(input), _): JsonBody<StudentCreateInput>,
) -> Result<(StatusCode, Json<CreatedId>), ApiError> {
    let id = state.students.create(input).await?;
    Ok((StatusCode::CREATED, Json(CreatedId { id })))
}

#[utoipa::path(
    patch,
    path = "/api/students/{id}",
    tag = "students",
    params(("id" = String, Path, description = "Student id")),
    request_body = crate::openapi::StudentUpdateDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation failed or unknown group", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    WithRejection(Json(input), _): JsonBody<StudentUpdateInput>,
) -> Result<StatusCode, ApiError> {
    state.students.update(&id, input).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/api/students/groupId/{group_id}",
    tag = "students",
    params(("group_id" = String, Path, description = "Group id")),
    responses(
        (status = 200, description = "Students of the group", body = [crate::openapi::StudentInfoDoc]),
        (status = 400, description = "Malformed id", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn list_by_group_id(
    State(state): State<ServerState>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<StudentInfo>>, ApiError> {
    Ok(Json(state.students.list_by_group_id(&group_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/students/_search",
    tag = "students",
    request_body = crate::openapi::StudentQueryDoc,
    responses((status = 200, description = "Matching students", body = [crate::openapi::StudentInfoDoc]))
)]
pub async fn search(
    State(state): State<ServerState>,
    WithRejection(Json(query), _): JsonBody<StudentQuery>,
) -> Result<Json<Vec<StudentInfo>>, ApiError> {
    Ok(Json(state.students.search(query).await?))
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    tag = "students",
    params(("id" = String, Path, description = "Student id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Malformed id", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    state.students.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
