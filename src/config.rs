//! Runtime configuration.
//!
//! The register takes no flags or environment variables; everything is a
//! fixed default relative to the working directory.

use std::path::PathBuf;

/// Backing file name, kept from the first version of the register.
pub const DEFAULT_DATA_FILE: &str = "funcionarios.json";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.data_file, PathBuf::from("funcionarios.json"));
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.log_level, "info");
    }
}
