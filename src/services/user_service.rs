use super::check_status;
use crate::dto::admin_dto::{NewUser, UserUpdate};
use crate::dto::auth_dto::Credentials;
use crate::error::Result;
use crate::models::user::{Role, User};
use reqwest::Client;
use validator::Validate;

/// Admin-side user management.
#[derive(Clone)]
pub struct UserService {
    client: Client,
    base_url: String,
}

impl UserService {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let url = format!("{}/admin/users", self.base_url);
        let response = self.client.get(&url).send().await?;
        let response = check_status(response, "Failed to fetch users").await?;
        Ok(response.json().await?)
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>> {
        let url = format!("{}/admin/roles", self.base_url);
        let response = self.client.get(&url).send().await?;
        let response = check_status(response, "Failed to fetch roles").await?;
        Ok(response.json().await?)
    }

    pub async fn create(&self, user: &NewUser) -> Result<()> {
        user.validate()?;
        let url = format!("{}/admin/users", self.base_url);
        let response = self.client.post(&url).json(user).send().await?;
        check_status(response, "Failed to create user").await?;
        Ok(())
    }

    pub async fn update(&self, user: &UserUpdate) -> Result<()> {
        user.validate()?;
        let url = format!("{}/admin/users/{}", self.base_url, user.user_id);
        let response = self.client.put(&url).json(user).send().await?;
        check_status(response, "Failed to update user").await?;
        Ok(())
    }

    /// Deletion re-authorizes server-side: the acting admin's credentials
    /// travel in the body alongside the target id in the path.
    pub async fn delete(&self, user_id: i64, credentials: &Credentials) -> Result<()> {
        let url = format!("{}/admin/users/{}/delete", self.base_url, user_id);
        let response = self.client.post(&url).json(credentials).send().await?;
        check_status(response, "Failed to delete user").await?;
        tracing::info!(user_id, "user deleted");
        Ok(())
    }
}
