use serde::{Deserialize, Serialize};

/// Options shared by the parser and the serializer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupConfig {
    /// Keep `#` comment lines and write them back out
    #[serde(default = "default_preserve_comments")]
    pub preserve_comments: bool,

    /// Emit an empty line after every closed group
    #[serde(default)]
    pub group_padding: bool,
}

fn default_preserve_comments() -> bool {
    true
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            preserve_comments: default_preserve_comments(),
            group_padding: false,
        }
    }
}

impl GroupConfig {
    pub fn with_comments(mut self, preserve: bool) -> Self {
        self.preserve_comments = preserve;
        self
    }

    pub fn with_padding(mut self, padding: bool) -> Self {
        self.group_padding = padding;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config: GroupConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GroupConfig::default());
        assert!(config.preserve_comments);
        assert!(!config.group_padding);
    }

    #[test]
    fn test_camel_case_fields() {
        let config: GroupConfig =
            serde_json::from_str(r#"{ "preserveComments": false, "groupPadding": true }"#)
                .unwrap();
        assert!(!config.preserve_comments);
        assert!(config.group_padding);
    }
}
