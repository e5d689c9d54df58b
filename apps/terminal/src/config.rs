//! Terminal application configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults; there are no command-line flags. The only tunable is where the
//! database file lives.

use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;

/// Terminal application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// `STOREFRONT_DB` overrides the database location; otherwise the
    /// platform data directory is used, falling back to the working
    /// directory when no home directory can be determined.
    pub fn load() -> Self {
        let database_path = env::var("STOREFRONT_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_database_path());

        AppConfig { database_path }
    }
}

fn default_database_path() -> PathBuf {
    ProjectDirs::from("com", "storefront", "storefront")
        .map(|dirs| dirs.data_dir().join("storefront.db"))
        .unwrap_or_else(|| PathBuf::from("storefront.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_override() {
        env::set_var("STOREFRONT_DB", "/tmp/override.db");
        let config = AppConfig::load();
        env::remove_var("STOREFRONT_DB");

        assert_eq!(config.database_path, PathBuf::from("/tmp/override.db"));
    }

    #[test]
    fn test_default_path_ends_with_database_file() {
        let path = default_database_path();
        assert!(path.to_string_lossy().ends_with("storefront.db"));
    }
}
