use etergroup_parser::GroupConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "etergroup.config.json";

/// etergroup configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Parser and serializer options
    #[serde(flatten)]
    pub group: GroupConfig,

    /// File extension picked up when checking a directory
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_extension() -> String {
    "txt".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = Self::config_path(cwd);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn config_path(cwd: &Path) -> PathBuf {
        cwd.join(DEFAULT_CONFIG_NAME)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            group: GroupConfig::default(),
            extension: default_extension(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "preserveComments": false,
            "groupPadding": true,
            "extension": "grp"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(!config.group.preserve_comments);
        assert!(config.group.group_padding);
        assert_eq!(config.extension, "grp");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.group.preserve_comments);
        assert!(!config.group.group_padding);
        assert_eq!(config.extension, "txt");
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load(dir.path()).unwrap().extension, "txt");

        std::fs::write(
            Config::config_path(dir.path()),
            r#"{ "groupPadding": true }"#,
        )
        .unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert!(config.group.group_padding);
        assert!(config.group.preserve_comments);
    }
}
