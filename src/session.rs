use crate::error::Result;
use crate::models::user::SessionUser;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// File-backed session record, the moral equivalent of the web client's
/// `data` cookie. Reads are infallible: a missing, unreadable or malformed
/// file simply means "logged out". There is no expiry; the session persists
/// until an explicit logout.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        let raw = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&raw).ok()
    }

    pub fn save(&self, user: &SessionUser) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(user)?)?;
        tracing::debug!(user = %user.username, "session saved");
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserRole;

    fn temp_store(tag: &str) -> SessionStore {
        let path = std::env::temp_dir().join(format!(
            "exam-console-session-{}-{}.json",
            std::process::id(),
            tag
        ));
        let _ = fs::remove_file(&path);
        SessionStore::new(path)
    }

    fn sample_user() -> SessionUser {
        SessionUser {
            user_id: 7,
            username: "amira".to_string(),
            role: UserRole::Student,
        }
    }

    #[test]
    fn missing_file_means_logged_out() {
        let store = temp_store("missing");
        assert!(store.current_user().is_none());
    }

    #[test]
    fn save_then_read_round_trips() {
        let store = temp_store("roundtrip");
        store.save(&sample_user()).unwrap();
        assert_eq!(store.current_user(), Some(sample_user()));
        store.clear().unwrap();
    }

    #[test]
    fn malformed_file_reads_as_none_without_error() {
        let path = std::env::temp_dir().join(format!(
            "exam-console-session-{}-malformed.json",
            std::process::id()
        ));
        fs::write(&path, "{not json").unwrap();
        let store = SessionStore::new(path);
        assert!(store.current_user().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn clear_is_idempotent() {
        let store = temp_store("clear");
        store.save(&sample_user()).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.current_user().is_none());
    }
}
