use super::check_status;
use crate::error::Result;
use crate::models::module::Module;
use reqwest::Client;
use serde_json::json;

/// Admin-side module CRUD. Every mutation is followed by a fresh `list`
/// call at the screen level; nothing here caches.
#[derive(Clone)]
pub struct ModuleService {
    client: Client,
    base_url: String,
}

impl ModuleService {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    pub async fn list(&self) -> Result<Vec<Module>> {
        let url = format!("{}/admin/modules", self.base_url);
        let response = self.client.get(&url).send().await?;
        let response = check_status(response, "Failed to fetch modules").await?;
        Ok(response.json().await?)
    }

    pub async fn create(&self, name: &str) -> Result<()> {
        let url = format!("{}/admin/modules", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&json!({ "ModuleName": name }))
            .send()
            .await?;
        check_status(response, "Failed to create module").await?;
        Ok(())
    }

    pub async fn update(&self, id: i64, name: &str) -> Result<()> {
        let url = format!("{}/admin/modules/{}", self.base_url, id);
        let response = self
            .client
            .put(&url)
            .json(&json!({ "ModuleName": name }))
            .send()
            .await?;
        check_status(response, "Failed to update module").await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let url = format!("{}/admin/modules/{}", self.base_url, id);
        let response = self.client.delete(&url).send().await?;
        check_status(response, "Failed to delete module").await?;
        Ok(())
    }
}
