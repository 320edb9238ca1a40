//! User API handlers
//!
//! Thin wrappers over `UserService`; every mutation is attributed to the
//! configured actor.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    user_dtos, AdvancedSearchParams, AgeParams, CreateUserRequest, SalaryRangeParams,
    SearchParams, UpdateUserRequest, UserDto, UserNameDto, UserSummaryDto,
};
use crate::application::UserService;
use crate::domain::Actor;
use crate::interfaces::http::common::{
    domain_error, ApiError, ApiJson, ApiQuery, ApiResponse, ValidatedJson,
};

#[derive(Clone)]
pub struct UserHandlerState {
    pub user_service: Arc<UserService>,
    pub actor: Actor,
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

#[utoipa::path(
    get,
    path = "/api/v1/users/get-all-users",
    tag = "Users",
    responses((status = 200, description = "All users", body = ApiResponse<Vec<UserDto>>))
)]
pub async fn get_all_users(State(state): State<UserHandlerState>) -> ApiResult<Vec<UserDto>> {
    let users = state.user_service.list_all().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(user_dtos(users))))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/get-user-by-id/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_user_by_id(
    State(state): State<UserHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<UserDto> {
    let user = state.user_service.get_by_id(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/create-user",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created with the default role", body = ApiResponse<UserDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "E-mail already registered")
    )
)]
pub async fn create_user(
    State(state): State<UserHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), ApiError> {
    let user = state
        .user_service
        .create(state.actor, request.into())
        .await
        .map_err(domain_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserDto::from(user))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/update-user/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Not found"),
        (status = 409, description = "E-mail already registered")
    )
)]
pub async fn update_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<UserDto> {
    let user = state
        .user_service
        .update(state.actor, id, request.into())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/delete-user/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "User, its roles and its site deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.user_service.delete(id).await.map_err(domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/delete-role/{role_id}",
    tag = "Users",
    params(("role_id" = i64, Path, description = "Role ID")),
    responses(
        (status = 204, description = "Role detached from its owner and removed"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_role(
    State(state): State<UserHandlerState>,
    Path(role_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .user_service
        .detach_role(state.actor, role_id)
        .await
        .map_err(domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Queries ─────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/v1/users/get-all-users-raw",
    tag = "User Queries",
    responses((status = 200, description = "All users via a raw statement", body = ApiResponse<Vec<UserDto>>))
)]
pub async fn get_all_users_raw(State(state): State<UserHandlerState>) -> ApiResult<Vec<UserDto>> {
    let users = state.user_service.list_all_raw().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(user_dtos(users))))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/get-user-names",
    tag = "User Queries",
    responses((status = 200, description = "Name of every user", body = ApiResponse<Vec<UserNameDto>>))
)]
pub async fn get_user_names(State(state): State<UserHandlerState>) -> ApiResult<Vec<UserNameDto>> {
    let names = state.user_service.names_only().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        names.into_iter().map(|name| UserNameDto { name }).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/search",
    tag = "User Queries",
    params(SearchParams),
    responses((status = 200, description = "Users whose name starts with the prefix", body = ApiResponse<Vec<UserDto>>))
)]
pub async fn search(
    State(state): State<UserHandlerState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> ApiResult<Vec<UserDto>> {
    let users = state
        .user_service
        .search_by_prefix(&params.name)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(user_dtos(users))))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/search-advanced",
    tag = "User Queries",
    params(AdvancedSearchParams),
    responses((status = 200, description = "Name prefix and exact age", body = ApiResponse<Vec<UserSummaryDto>>))
)]
pub async fn search_advanced(
    State(state): State<UserHandlerState>,
    ApiQuery(params): ApiQuery<AdvancedSearchParams>,
) -> ApiResult<Vec<UserSummaryDto>> {
    let found = state
        .user_service
        .search_by_prefix_and_age(&params.name, params.age)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        found.into_iter().map(UserSummaryDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/order-by-salary-desc",
    tag = "User Queries",
    responses((status = 200, description = "Users by salary, highest first", body = ApiResponse<Vec<UserDto>>))
)]
pub async fn order_by_salary_desc(
    State(state): State<UserHandlerState>,
) -> ApiResult<Vec<UserDto>> {
    let users = state
        .user_service
        .ordered_by_salary_desc()
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(user_dtos(users))))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/find-by-names",
    tag = "User Queries",
    request_body = Vec<String>,
    responses((status = 200, description = "Users whose name is in the list", body = ApiResponse<Vec<UserDto>>))
)]
pub async fn find_by_names(
    State(state): State<UserHandlerState>,
    ApiJson(names): ApiJson<Vec<String>>,
) -> ApiResult<Vec<UserDto>> {
    let users = state
        .user_service
        .find_by_names(&names)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(user_dtos(users))))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/count-by-age",
    tag = "User Queries",
    params(AgeParams),
    responses((status = 200, description = "Number of users older than `age`", body = ApiResponse<u64>))
)]
pub async fn count_by_age(
    State(state): State<UserHandlerState>,
    ApiQuery(params): ApiQuery<AgeParams>,
) -> ApiResult<u64> {
    let count = state
        .user_service
        .count_by_age_greater_than(params.age)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(count)))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/salary-range",
    tag = "User Queries",
    params(SalaryRangeParams),
    responses(
        (status = 200, description = "Users with min <= salary <= max", body = ApiResponse<Vec<UserDto>>),
        (status = 400, description = "min is greater than max")
    )
)]
pub async fn salary_range(
    State(state): State<UserHandlerState>,
    ApiQuery(params): ApiQuery<SalaryRangeParams>,
) -> ApiResult<Vec<UserDto>> {
    let users = state
        .user_service
        .find_by_salary_range(params.min, params.max)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(user_dtos(users))))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/name-is-null",
    tag = "User Queries",
    responses((status = 200, description = "Users without a name", body = ApiResponse<Vec<UserDto>>))
)]
pub async fn name_is_null(State(state): State<UserHandlerState>) -> ApiResult<Vec<UserDto>> {
    let users = state
        .user_service
        .find_with_null_name()
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(user_dtos(users))))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/salary-sum",
    tag = "User Queries",
    responses((status = 200, description = "Sum of all salaries, 0 when there are none", body = ApiResponse<f64>))
)]
pub async fn salary_sum(State(state): State<UserHandlerState>) -> ApiResult<f64> {
    let total = state.user_service.sum_salaries().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(total)))
}
