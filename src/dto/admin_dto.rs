use serde::Serialize;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewUser {
    #[serde(rename = "Username")]
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[serde(rename = "Password")]
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[serde(rename = "UserRoleId")]
    pub role_id: i64,
}

/// Full-record update; `password` is omitted from the body when unchanged.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct UserUpdate {
    #[serde(rename = "UserId")]
    pub user_id: i64,
    #[serde(rename = "Username")]
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[serde(rename = "Password", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "UserRoleId")]
    pub role_id: i64,
}
