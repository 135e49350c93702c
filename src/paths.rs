//! Filesystem layout for medical-service.
//!
//! ```text
//! ~/.medical-service/
//! ├── config.toml          # Optional config
//! └── medical_service.db   # SQLite database (default location)
//! ```

use std::path::PathBuf;

/// Application home directory: `~/.medical-service/`
pub fn app_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".medical-service")
}

/// Default config file: `~/.medical-service/config.toml`
pub fn config_path() -> PathBuf {
    app_home().join("config.toml")
}

/// Default database file: `~/.medical-service/medical_service.db`
pub fn database_path() -> PathBuf {
    app_home().join("medical_service.db")
}
