pub mod config;
pub mod draft;
pub mod dto;
pub mod error;
pub mod exam_session;
pub mod grade;
pub mod models;
pub mod screens;
pub mod services;
pub mod session;
pub mod utils;

use crate::draft::DraftStore;
use crate::services::{
    auth_service::AuthService, lecturer_service::LecturerService, module_service::ModuleService,
    student_service::StudentService, user_service::UserService,
};
use crate::session::SessionStore;
use reqwest::Client;
use std::path::PathBuf;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub module_service: ModuleService,
    pub user_service: UserService,
    pub lecturer_service: LecturerService,
    pub student_service: StudentService,
    pub session: SessionStore,
    pub drafts: DraftStore,
}

impl AppState {
    pub fn new() -> Self {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap();

        Self::with_client(
            http_client,
            config.api_base_url.clone(),
            config.session_file.clone(),
            config.draft_dir.clone(),
        )
    }

    /// Wires every service around an explicit client and base URL. Tests use
    /// this to point the whole client at a stub backend.
    pub fn with_client(
        client: Client,
        base_url: String,
        session_file: PathBuf,
        draft_dir: PathBuf,
    ) -> Self {
        Self {
            auth_service: AuthService::new(client.clone(), base_url.clone()),
            module_service: ModuleService::new(client.clone(), base_url.clone()),
            user_service: UserService::new(client.clone(), base_url.clone()),
            lecturer_service: LecturerService::new(client.clone(), base_url.clone()),
            student_service: StudentService::new(client, base_url),
            session: SessionStore::new(session_file),
            drafts: DraftStore::new(draft_dir),
        }
    }
}
