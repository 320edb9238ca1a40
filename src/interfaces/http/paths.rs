//! Route constants
//!
//! Paths are relative to their resource base; `router` nests them.

pub const HEALTH: &str = "/health";
pub const METRICS: &str = "/metrics";
pub const SWAGGER_UI: &str = "/docs";
pub const OPENAPI_JSON: &str = "/api-doc/openapi.json";

pub mod users {
    pub const BASE: &str = "/api/v1/users";

    pub const GET_ALL: &str = "/get-all-users";
    pub const GET_BY_ID: &str = "/get-user-by-id/{id}";
    pub const CREATE: &str = "/create-user";
    pub const UPDATE: &str = "/update-user/{id}";
    pub const DELETE: &str = "/delete-user/{id}";
    pub const DELETE_ROLE: &str = "/delete-role/{role_id}";

    pub const GET_ALL_RAW: &str = "/get-all-users-raw";
    pub const GET_NAMES: &str = "/get-user-names";
    pub const SEARCH: &str = "/search";
    pub const SEARCH_ADVANCED: &str = "/search-advanced";
    pub const ORDER_BY_SALARY_DESC: &str = "/order-by-salary-desc";
    pub const FIND_BY_NAMES: &str = "/find-by-names";
    pub const COUNT_BY_AGE: &str = "/count-by-age";
    pub const SALARY_RANGE: &str = "/salary-range";
    pub const NAME_IS_NULL: &str = "/name-is-null";
    pub const SALARY_SUM: &str = "/salary-sum";
}

pub mod sites {
    pub const BASE: &str = "/api/v1/site";

    pub const GET_ALL: &str = "/get-all-site";
    pub const GET_BY_ID: &str = "/get-site-by-id/{id}";
    pub const CREATE: &str = "/create-site";
    pub const UPDATE: &str = "/update-site/{id}";
    pub const DELETE: &str = "/delete-site/{id}";
}
