//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::modules::{health, metrics, request_id, sites, users};
use super::paths;
use crate::application::{SiteService, UserService};
use crate::domain::{Actor, RepositoryProvider};

/// Router knobs that come from configuration
#[derive(Debug, Clone)]
pub struct RouterSettings {
    /// Actor recorded on every mutation made through the API
    pub actor: Actor,
    /// Allowed CORS origins; empty or `*` allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            actor: Actor::new(1),
            cors_origins: Vec::new(),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        // Users
        users::get_all_users,
        users::get_user_by_id,
        users::create_user,
        users::update_user,
        users::delete_user,
        users::delete_role,
        // User queries
        users::get_all_users_raw,
        users::get_user_names,
        users::search,
        users::search_advanced,
        users::order_by_salary_desc,
        users::find_by_names,
        users::count_by_age,
        users::salary_range,
        users::name_is_null,
        users::salary_sum,
        // Sites
        sites::get_all_sites,
        sites::get_site_by_id,
        sites::create_site,
        sites::update_site,
        sites::delete_site,
    ),
    components(
        schemas(
            health::HealthResponse,
            health::ComponentHealth,
            users::UserDto,
            users::RoleDto,
            users::UserNameDto,
            users::UserSummaryDto,
            users::CreateUserRequest,
            users::UpdateUserRequest,
            sites::SiteDto,
            sites::SiteRequest,
        )
    ),
    tags(
        (name = "Health", description = "Service and database health"),
        (name = "Users", description = "User CRUD; every new user receives the ROLE_USER role"),
        (name = "User Queries", description = "Read-only user searches and aggregates"),
        (name = "Sites", description = "Sites; each user owns at most one"),
    ),
    info(
        title = "Tekrar Service API",
        version = "1.0.0",
        description = "REST API for users, their roles and their sites",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(allowed))
}

/// Create the API router with all routes.
///
/// `/metrics` is only mounted when a Prometheus handle is supplied.
pub fn create_api_router(
    db: DatabaseConnection,
    repos: Arc<dyn RepositoryProvider>,
    prometheus: Option<PrometheusHandle>,
    settings: &RouterSettings,
) -> Router {
    let user_state = users::UserHandlerState {
        user_service: Arc::new(UserService::new(repos.clone())),
        actor: settings.actor,
    };
    let site_state = sites::SiteHandlerState {
        site_service: Arc::new(SiteService::new(repos)),
        actor: settings.actor,
    };

    let user_routes = Router::new()
        .route(paths::users::GET_ALL, get(users::get_all_users))
        .route(paths::users::GET_BY_ID, get(users::get_user_by_id))
        .route(paths::users::CREATE, post(users::create_user))
        .route(paths::users::UPDATE, put(users::update_user))
        .route(paths::users::DELETE, delete(users::delete_user))
        .route(paths::users::DELETE_ROLE, delete(users::delete_role))
        .route(paths::users::GET_ALL_RAW, get(users::get_all_users_raw))
        .route(paths::users::GET_NAMES, get(users::get_user_names))
        .route(paths::users::SEARCH, get(users::search))
        .route(paths::users::SEARCH_ADVANCED, get(users::search_advanced))
        .route(
            paths::users::ORDER_BY_SALARY_DESC,
            get(users::order_by_salary_desc),
        )
        .route(paths::users::FIND_BY_NAMES, post(users::find_by_names))
        .route(paths::users::COUNT_BY_AGE, get(users::count_by_age))
        .route(paths::users::SALARY_RANGE, get(users::salary_range))
        .route(paths::users::NAME_IS_NULL, get(users::name_is_null))
        .route(paths::users::SALARY_SUM, get(users::salary_sum))
        .with_state(user_state);

    let site_routes = Router::new()
        .route(paths::sites::GET_ALL, get(sites::get_all_sites))
        .route(paths::sites::GET_BY_ID, get(sites::get_site_by_id))
        .route(paths::sites::CREATE, post(sites::create_site))
        .route(paths::sites::UPDATE, put(sites::update_site))
        .route(paths::sites::DELETE, delete(sites::delete_site))
        .with_state(site_state);

    let health_routes = Router::new()
        .route(paths::HEALTH, get(health::health_check))
        .with_state(health::HealthState::new(db));

    let mut router = Router::new()
        .merge(SwaggerUi::new(paths::SWAGGER_UI).url(paths::OPENAPI_JSON, ApiDoc::openapi()))
        .merge(health_routes)
        .nest(paths::users::BASE, user_routes)
        .nest(paths::sites::BASE, site_routes);

    if let Some(handle) = prometheus {
        router = router.merge(
            Router::new()
                .route(paths::METRICS, get(metrics::prometheus_metrics))
                .with_state(metrics::MetricsState { handle }),
        );
    }

    router
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(cors_layer(&settings.cors_origins))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id::request_id_middleware))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};

    use crate::infrastructure::database::test_support::setup_db;
    use crate::infrastructure::SeaOrmRepositoryProvider;

    async fn app() -> Router {
        let db = setup_db().await;
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        create_api_router(db, repos, None, &RouterSettings::default())
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        use tower::Service;

        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        let req = match body {
            Some(v) => builder.body(Body::from(serde_json::to_vec(&v).unwrap())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let resp = app.clone().into_service().call(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn user_body(name: &str, email: &str, age: i32, salary: f64) -> Value {
        json!({ "name": name, "email": email, "age": age, "salary": salary })
    }

    #[tokio::test]
    async fn create_user_returns_201_with_default_role() {
        let app = app().await;
        let (status, body) = call(
            &app,
            "POST",
            "/api/v1/users/create-user",
            Some(user_body("Ahmet", "ahmet@example.com", 25, 50_000.0)),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["roles"][0]["role_name"], "ROLE_USER");
        assert!(body["data"].get("password").is_none());

        let id = body["data"]["id"].as_i64().unwrap();
        let (status, body) = call(&app, "GET", &format!("/api/v1/users/get-user-by-id/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["email"], "ahmet@example.com");
    }

    #[tokio::test]
    async fn error_kinds_map_to_statuses() {
        let app = app().await;
        let body = user_body("Ahmet", "ahmet@example.com", 25, 50_000.0);
        call(&app, "POST", "/api/v1/users/create-user", Some(body.clone())).await;

        let (status, _) = call(&app, "POST", "/api/v1/users/create-user", Some(body)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = call(
            &app,
            "POST",
            "/api/v1/users/create-user",
            Some(json!({ "name": "x", "email": "not-an-email" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, _) = call(&app, "GET", "/api/v1/users/get-user-by-id/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(&app, "GET", "/api/v1/users/salary-range?min=10&max=1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_role_then_user_cascades() {
        let app = app().await;
        let (_, created) = call(
            &app,
            "POST",
            "/api/v1/users/create-user",
            Some(user_body("Mehmet", "mehmet@example.com", 30, 60_000.0)),
        )
        .await;
        let user_id = created["data"]["id"].as_i64().unwrap();
        let role_id = created["data"]["roles"][0]["id"].as_i64().unwrap();

        let (status, _) = call(&app, "DELETE", &format!("/api/v1/users/delete-role/{role_id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, user) = call(&app, "GET", &format!("/api/v1/users/get-user-by-id/{user_id}"), None).await;
        assert_eq!(user["data"]["roles"], json!([]));

        let (status, site) = call(
            &app,
            "POST",
            "/api/v1/site/create-site",
            Some(json!({ "name": "Google", "port": "8080", "user_id": user_id })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let site_id = site["data"]["id"].as_i64().unwrap();

        let (status, _) = call(
            &app,
            "POST",
            "/api/v1/site/create-site",
            Some(json!({ "name": "Other", "user_id": user_id })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = call(&app, "DELETE", &format!("/api/v1/users/delete-user/{user_id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = call(&app, "GET", &format!("/api/v1/site/get-site-by-id/{site_id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn query_endpoints() {
        let app = app().await;
        let (_, sum) = call(&app, "GET", "/api/v1/users/salary-sum", None).await;
        assert_eq!(sum["data"], 0.0);

        call(&app, "POST", "/api/v1/users/create-user", Some(user_body("Ahmet", "a@example.com", 25, 50_000.0))).await;
        call(&app, "POST", "/api/v1/users/create-user", Some(user_body("Mehmet", "m@example.com", 30, 60_000.0))).await;

        let (_, found) = call(&app, "GET", "/api/v1/users/search?name=AH", None).await;
        assert_eq!(found["data"].as_array().unwrap().len(), 1);

        let (_, advanced) = call(&app, "GET", "/api/v1/users/search-advanced?name=me&age=30", None).await;
        assert_eq!(advanced["data"], json!([{ "id": 2, "name": "Mehmet", "age": 30 }]));

        let (_, count) = call(&app, "GET", "/api/v1/users/count-by-age?age=26", None).await;
        assert_eq!(count["data"], 1);

        let (_, by_names) = call(&app, "POST", "/api/v1/users/find-by-names", Some(json!(["Ahmet", "Ahmet"]))).await;
        assert_eq!(by_names["data"].as_array().unwrap().len(), 1);

        let (_, names) = call(&app, "GET", "/api/v1/users/get-user-names", None).await;
        assert_eq!(names["data"], json!([{ "name": "Ahmet" }, { "name": "Mehmet" }]));

        let (_, sum) = call(&app, "GET", "/api/v1/users/salary-sum", None).await;
        assert_eq!(sum["data"], 110_000.0);
    }

    #[tokio::test]
    async fn malformed_query_and_body_answer_enveloped_400() {
        let app = app().await;

        let (status, body) = call(&app, "GET", "/api/v1/users/count-by-age?age=x", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid query"));

        let (status, body) = call(&app, "GET", "/api/v1/users/salary-range?min=1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, body) = call(&app, "POST", "/api/v1/users/find-by-names", Some(json!([1]))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn site_update_ignores_owner_change() {
        let app = app().await;
        let (_, user) = call(&app, "POST", "/api/v1/users/create-user", Some(user_body("Ayşe", "ayse@example.com", 28, 75_000.0))).await;
        let user_id = user["data"]["id"].as_i64().unwrap();
        let (_, site) = call(
            &app,
            "POST",
            "/api/v1/site/create-site",
            Some(json!({ "name": "Google", "port": "8080", "user_id": user_id })),
        )
        .await;
        let site_id = site["data"]["id"].as_i64().unwrap();

        let (status, updated) = call(
            &app,
            "PUT",
            &format!("/api/v1/site/update-site/{site_id}"),
            Some(json!({ "name": "Updated Google", "user_id": 12345 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["data"]["name"], "Updated Google");
        assert_eq!(updated["data"]["port"], "8080");
        assert_eq!(updated["data"]["user_id"], user_id);

        let (_, all) = call(&app, "GET", "/api/v1/site/get-all-site", None).await;
        assert_eq!(all["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn health_reports_database_and_request_id_is_echoed() {
        use tower::Service;

        let app = app().await;
        let req = Request::builder()
            .uri("/health")
            .header(request_id::REQUEST_ID_HEADER, "abc-123")
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().into_service().call(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(request_id::REQUEST_ID_HEADER).unwrap(),
            "abc-123"
        );
    }

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/users/get-all-users",
            "/api/v1/users/delete-role/{role_id}",
            "/api/v1/users/salary-sum",
            "/api/v1/site/create-site",
            "/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
