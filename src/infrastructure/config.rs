use crate::domain::{config::BridgeConfig, error::{BridgeError, BridgeResult}};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration manager
pub struct ConfigManager {
    global_config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Create new configuration manager
    pub fn new() -> Self {
        Self {
            global_config_path: Self::get_global_config_path(),
        }
    }

    /// File that configuration would be read from: `explicit` when given,
    /// else the global file if it exists. `None` means defaults.
    pub fn locate(&self, explicit: Option<&Path>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => self.global_config_path.clone().filter(|path| path.exists()),
        }
    }

    /// Load the global configuration, or defaults when there is none.
    pub fn load_config(&self) -> BridgeResult<BridgeConfig> {
        match self.locate(None) {
            Some(path) => self.load_config_from_path(&path),
            None => Ok(BridgeConfig::default()),
        }
    }

    /// Load configuration from specific path
    pub fn load_config_from_path(&self, path: &Path) -> BridgeResult<BridgeConfig> {
        let content = fs::read_to_string(path).map_err(|e| BridgeError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        toml::from_str(&content).map_err(|e| BridgeError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })
    }

    /// Global configuration path (`~/.config/fpbridge/config.toml`)
    fn get_global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("fpbridge").join("config.toml"))
    }

    pub fn global_config_path(&self) -> Option<&Path> {
        self.global_config_path.as_deref()
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_global_path_location() {
        let manager = ConfigManager::new();
        if let Some(path) = manager.global_config_path() {
            assert!(path.ends_with(".config/fpbridge/config.toml"));
        }
    }

    #[test]
    fn test_locate_prefers_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let explicit = temp_dir.path().join("absent.toml");
        let manager = ConfigManager {
            global_config_path: Some(temp_dir.path().join("global.toml")),
        };

        assert_eq!(manager.locate(Some(explicit.as_path())), Some(explicit.clone()));
        assert_eq!(manager.locate(None), None);

        fs::write(temp_dir.path().join("global.toml"), "").unwrap();
        assert_eq!(manager.locate(None), Some(temp_dir.path().join("global.toml")));
        assert!(manager.load_config().is_ok());
    }

    #[test]
    fn test_load_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [serial]
            port = "/dev/ttyAMA0"
            baud_rate = 115200
            timeout_ms = 250

            [sensor]
            password = 305419896

            [bridge]
            echo = true
            "#,
        )
        .unwrap();

        let config = ConfigManager::new().load_config_from_path(&path).unwrap();
        assert_eq!(config.serial.port, "/dev/ttyAMA0");
        assert_eq!(config.serial.baud_rate, 115200);
        assert_eq!(config.serial.timeout_ms, 250);
        assert_eq!(config.sensor.password, 0x1234_5678);
        assert_eq!(config.sensor.address, 0xFFFF_FFFF);
        assert!(config.bridge.echo);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = ConfigManager::new()
            .load_config_from_path(&temp_dir.path().join("absent.toml"))
            .unwrap_err();
        assert!(matches!(err, BridgeError::Config { .. }));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[serial\nport = ").unwrap();

        let err = ConfigManager::new().load_config_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
