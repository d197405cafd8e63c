use super::check_status;
use crate::dto::auth_dto::LoginPayload;
use crate::error::Result;
use crate::models::user::SessionUser;
use reqwest::Client;
use validator::Validate;

#[derive(Clone)]
pub struct AuthService {
    client: Client,
    base_url: String,
}

impl AuthService {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    pub async fn login(&self, payload: &LoginPayload) -> Result<SessionUser> {
        payload.validate()?;
        let url = format!("{}/login", self.base_url);
        let response = self.client.post(&url).json(payload).send().await?;
        let response = check_status(response, "Login failed").await?;
        let user = response.json::<SessionUser>().await?;
        tracing::info!(user = %user.username, role = ?user.role, "logged in");
        Ok(user)
    }
}
