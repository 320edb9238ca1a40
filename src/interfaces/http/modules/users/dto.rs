//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{CreateUserDto, Role, UpdateUserDto, User, UserSummary};

/// Role as returned inside a user
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoleDto {
    pub id: i64,
    pub role_name: String,
}

impl From<Role> for RoleDto {
    fn from(r: Role) -> Self {
        Self {
            id: r.id,
            role_name: r.role_name,
        }
    }
}

/// User API representation. The password is never returned.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    pub roles: Vec<RoleDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<i64>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            surname: u.surname,
            email: u.email,
            age: u.age,
            salary: u.salary,
            roles: u.roles.into_iter().map(RoleDto::from).collect(),
            created_at: u.audit.created_at,
            updated_at: u.audit.updated_at,
            created_by: u.audit.created_by,
            updated_by: u.audit.updated_by,
        }
    }
}

pub fn user_dtos(users: Vec<User>) -> Vec<UserDto> {
    users.into_iter().map(UserDto::from).collect()
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserNameDto {
    pub name: Option<String>,
}

/// id/name/age projection of the advanced search
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserSummaryDto {
    pub id: i64,
    pub name: Option<String>,
    pub age: Option<i32>,
}

impl From<UserSummary> for UserSummaryDto {
    fn from(s: UserSummary) -> Self {
        Self {
            id: s.id,
            name: s.name,
            age: s.age,
        }
    }
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 255))]
    pub surname: Option<String>,
    #[validate(email(message = "must be a valid e-mail address"))]
    pub email: String,
    #[validate(range(min = 0))]
    pub age: Option<i32>,
    pub salary: Option<f64>,
    pub password: Option<String>,
}

impl From<CreateUserRequest> for CreateUserDto {
    fn from(r: CreateUserRequest) -> Self {
        Self {
            name: r.name,
            surname: r.surname,
            email: r.email,
            age: r.age,
            salary: r.salary,
            password: r.password,
        }
    }
}

/// Update user request; absent or `null` fields keep their stored value
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 255))]
    pub surname: Option<String>,
    #[validate(email(message = "must be a valid e-mail address"))]
    pub email: Option<String>,
    #[validate(range(min = 0))]
    pub age: Option<i32>,
    pub salary: Option<f64>,
    pub password: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUserDto {
    fn from(r: UpdateUserRequest) -> Self {
        Self {
            name: r.name,
            surname: r.surname,
            email: r.email,
            age: r.age,
            salary: r.salary,
            password: r.password,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Name prefix, case-insensitive
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AdvancedSearchParams {
    /// Name prefix, case-insensitive
    #[serde(default)]
    pub name: String,
    /// Exact age
    pub age: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AgeParams {
    /// Count users strictly older than this
    pub age: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SalaryRangeParams {
    pub min: f64,
    pub max: f64,
}
