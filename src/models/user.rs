use serde::{Deserialize, Serialize};

/// The authenticated identity returned by `POST /login` and persisted by the
/// session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub username: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    Teacher,
    Student,
    /// Roles this client does not know how to route.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "UserId")]
    pub user_id: i64,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "UserRoleId")]
    pub role_id: i64,
    #[serde(rename = "UserRole", default)]
    pub role_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "UserRoleId")]
    pub role_id: i64,
    #[serde(rename = "UserRole")]
    pub name: String,
}
