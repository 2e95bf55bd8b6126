//! API key storage — shared by every console surface.
//!
//! Reads/writes ~/.config/thecloud/credentials.json (0600 on Unix).
//! The key is a single opaque string; saving an empty value clears it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredCredentials {
    api_key: String,
}

/// Returns the path to the credentials file.
pub fn credentials_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|c| c.join("thecloud/credentials.json"))
}

/// Load the stored API key.
/// Returns an empty string if nothing is saved, the file is invalid,
/// or no config directory is available.
pub fn load_api_key() -> String {
    match credentials_file_path() {
        Some(path) => read_key(&path),
        None => String::new(),
    }
}

/// Save an API key. A non-empty value is stored (creating the parent
/// directory if needed, 0600 on Unix); an empty value removes any
/// stored key.
pub fn save_api_key(key: &str) -> Result<(), String> {
    let path = credentials_file_path().ok_or("Could not determine config directory")?;
    write_key(&path, key)
}

fn read_key(path: &Path) -> String {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return String::new();
    };
    serde_json::from_str::<StoredCredentials>(&contents)
        .map(|c| c.api_key)
        .unwrap_or_default()
}

fn write_key(path: &Path, key: &str) -> Result<(), String> {
    if key.is_empty() {
        if path.exists() {
            std::fs::remove_file(path)
                .map_err(|e| format!("Failed to delete credentials file: {}", e))?;
        }
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }

    let contents = serde_json::to_string_pretty(&StoredCredentials {
        api_key: key.to_string(),
    })
    .map_err(|e| format!("Failed to serialize credentials: {}", e))?;

    std::fs::write(path, &contents)
        .map_err(|e| format!("Failed to write credentials file: {}", e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, permissions)
            .map_err(|e| format!("Failed to set file permissions: {}", e))?;
    }

    Ok(())
}
