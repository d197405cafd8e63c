use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use url::Url;

/// The web client this replaces read the backend URL from two different
/// variable names depending on the module. `EXAM_API_URL` is canonical here;
/// the legacy names are still accepted as fallbacks, with a warning.
const LEGACY_URL_VARS: [&str; 2] = ["NEXT_PUBLIC_API_URL", "REACT_APP_API_URL"];

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub session_file: PathBuf,
    pub draft_dir: PathBuf,
    pub request_timeout_secs: u64,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            api_base_url: api_base_url()?,
            session_file: path_env("EXAM_SESSION_FILE", ".exam-console/session.json"),
            draft_dir: path_env("EXAM_DRAFT_DIR", ".exam-console/drafts"),
            request_timeout_secs: get_env_parse_or("EXAM_REQUEST_TIMEOUT_SECS", 30)?,
        })
    }
}

fn api_base_url() -> Result<String> {
    let raw = match env::var("EXAM_API_URL") {
        Ok(value) => value,
        Err(_) => LEGACY_URL_VARS
            .iter()
            .find_map(|name| {
                let value = env::var(name).ok()?;
                tracing::warn!(
                    "EXAM_API_URL is not set; using legacy variable {} instead",
                    name
                );
                Some(value)
            })
            .ok_or_else(|| {
                Error::Config("Missing environment variable: EXAM_API_URL".to_string())
            })?,
    };
    normalize_base_url(&raw)
}

/// Validates the backend URL and strips any trailing slash so services can
/// join paths with plain `format!`.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let parsed =
        Url::parse(raw).map_err(|e| Error::Config(format!("Invalid backend URL {raw:?}: {e}")))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(Error::Config(format!(
            "Backend URL must be http(s), got {raw:?}"
        )));
    }
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

fn path_env(name: &str, default_suffix: &str) -> PathBuf {
    match env::var(name) {
        Ok(value) => PathBuf::from(value),
        Err(_) => home_dir().join(default_suffix),
    }
}

fn home_dir() -> PathBuf {
    env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
