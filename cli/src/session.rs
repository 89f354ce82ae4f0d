use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use rehome_core::UserProfile;
use serde::{Deserialize, Serialize};

/// Session context of the logged-in user.
///
/// Loaded once at startup and passed by reference to the commands that need
/// it; there is no global auth state anywhere in the binary.
#[derive(Debug, Serialize, Deserialize)]
pub struct Session {
    pub user: UserProfile,
    /// API base URL the session was created against
    pub api_url: Option<String>,
}

impl Session {
    pub fn from_path(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path).context("Failed to read session file")?;

        let session: Self = toml::from_str(&contents).context("Failed to deserialize session")?;

        Ok(Some(session))
    }

    /// Write the session file with owner-only permissions
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string(self).context("Failed to serialize session")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        fs::write(path, content).context("Failed to write session")?;

        // On Unix-like systems, set file permissions to 600 (owner read/write only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Remove the session file. Returns whether there was one.
    pub fn clear(path: &Path) -> anyhow::Result<bool> {
        if !path.exists() {
            return Ok(false);
        }

        fs::remove_file(path).context("Failed to remove session file")?;

        Ok(true)
    }
}

/// Get the XDG config directory, respecting XDG_CONFIG_HOME
fn get_config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("rehome")
    } else {
        directories::ProjectDirs::from("com", "rehome", "rehome")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Default location of the session file
pub fn default_session_path() -> PathBuf {
    get_config_dir().join("session.toml")
}

pub fn get_session_path(arg_path: &Option<String>) -> PathBuf {
    match arg_path {
        Some(path) => PathBuf::from(path),
        None => default_session_path(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use tempfile::TempDir;

    fn sample_user() -> UserProfile {
        UserProfile {
            id: 3,
            username: "dana".to_string(),
            display_name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            phone: "050-1234567".to_string(),
        }
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.toml");

        let session = Session {
            user: sample_user(),
            api_url: Some("http://localhost:8080/api".to_string()),
        };
        session.save(&path).unwrap();

        let loaded = Session::from_path(&path).unwrap().unwrap();
        assert_eq!(loaded.user, sample_user());
        assert_eq!(loaded.api_url.as_deref(), Some("http://localhost:8080/api"));
    }

    #[test]
    fn test_missing_file_is_no_session() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.toml");

        assert!(Session::from_path(&path).unwrap().is_none());
        assert!(!Session::clear(&path).unwrap());
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.toml");

        let session = Session {
            user: sample_user(),
            api_url: None,
        };
        session.save(&path).unwrap();

        assert!(Session::clear(&path).unwrap());
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.toml");

        let session = Session {
            user: sample_user(),
            api_url: None,
        };
        session.save(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
