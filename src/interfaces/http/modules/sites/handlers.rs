//! Site API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{SiteDto, SiteRequest};
use crate::application::SiteService;
use crate::domain::Actor;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct SiteHandlerState {
    pub site_service: Arc<SiteService>,
    pub actor: Actor,
}

#[utoipa::path(
    get,
    path = "/api/v1/site/get-all-site",
    tag = "Sites",
    responses((status = 200, description = "All sites", body = ApiResponse<Vec<SiteDto>>))
)]
pub async fn get_all_sites(
    State(state): State<SiteHandlerState>,
) -> Result<Json<ApiResponse<Vec<SiteDto>>>, ApiError> {
    let sites = state.site_service.list_all().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        sites.into_iter().map(SiteDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/site/get-site-by-id/{id}",
    tag = "Sites",
    params(("id" = i64, Path, description = "Site ID")),
    responses(
        (status = 200, description = "Site details", body = ApiResponse<SiteDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_site_by_id(
    State(state): State<SiteHandlerState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<SiteDto>>, ApiError> {
    let site = state.site_service.get_by_id(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(SiteDto::from(site))))
}

#[utoipa::path(
    post,
    path = "/api/v1/site/create-site",
    tag = "Sites",
    request_body = SiteRequest,
    responses(
        (status = 201, description = "Site created", body = ApiResponse<SiteDto>),
        (status = 400, description = "user_id missing"),
        (status = 404, description = "User not found"),
        (status = 409, description = "User already owns a site")
    )
)]
pub async fn create_site(
    State(state): State<SiteHandlerState>,
    ValidatedJson(request): ValidatedJson<SiteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SiteDto>>), ApiError> {
    let site = state
        .site_service
        .create(state.actor, request.into())
        .await
        .map_err(domain_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(SiteDto::from(site))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/site/update-site/{id}",
    tag = "Sites",
    params(("id" = i64, Path, description = "Site ID")),
    request_body = SiteRequest,
    responses(
        (status = 200, description = "Site updated", body = ApiResponse<SiteDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_site(
    State(state): State<SiteHandlerState>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<SiteRequest>,
) -> Result<Json<ApiResponse<SiteDto>>, ApiError> {
    let site = state
        .site_service
        .update(state.actor, id, request.into())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(SiteDto::from(site))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/site/delete-site/{id}",
    tag = "Sites",
    params(("id" = i64, Path, description = "Site ID")),
    responses(
        (status = 204, description = "Site deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_site(
    State(state): State<SiteHandlerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.site_service.delete(id).await.map_err(domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}
