use serde::{Deserialize, Serialize};

/// Configuration for normalization and harness synthesis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// One indentation level, added on top of the closing-brace line's indent
    /// when a default return is inserted
    pub indent_unit: String,

    /// Status cell value (compared case-insensitively) selecting the rows
    /// that become test cases
    pub fail_status: String,

    /// Marker for an absent child in level-order tree literals
    pub tree_placeholder: String,

    /// Name of the emitted harness class
    pub class_name: String,

    /// Name of the private method that runs every case
    pub runner_name: String,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            indent_unit: "    ".to_string(),
            fail_status: "fail".to_string(),
            tree_placeholder: "x".to_string(),
            class_name: "GeneratedTest".to_string(),
            runner_name: "runAllTests".to_string(),
        }
    }
}

impl SynthConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.indent_unit.is_empty() {
            return Err("indent_unit must not be empty".to_string());
        }
        if !self.indent_unit.chars().all(|c| c == ' ' || c == '\t') {
            return Err(format!(
                "indent_unit must contain only spaces or tabs, got {:?}",
                self.indent_unit
            ));
        }

        if self.fail_status.trim().is_empty() {
            return Err("fail_status must not be empty".to_string());
        }

        if self.tree_placeholder.is_empty()
            || self
                .tree_placeholder
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, '{' | '}' | '"' | '\\'))
        {
            return Err(format!(
                "tree_placeholder must be a single token without braces, quotes or backslashes, got {:?}",
                self.tree_placeholder
            ));
        }

        if !is_identifier(&self.class_name) {
            return Err(format!("class_name is not an identifier: {:?}", self.class_name));
        }

        if !is_identifier(&self.runner_name) {
            return Err(format!(
                "runner_name is not an identifier: {:?}",
                self.runner_name
            ));
        }

        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = SynthConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = SynthConfig {
            indent_unit: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.indent_unit = "  x".to_string();
        assert!(config.validate().is_err());

        config.indent_unit = "\t".to_string();
        assert!(config.validate().is_ok());

        config.tree_placeholder = "null node".to_string();
        assert!(config.validate().is_err());

        config.tree_placeholder = "\"".to_string();
        assert!(config.validate().is_err());

        config.tree_placeholder = "\\".to_string();
        assert!(config.validate().is_err());

        config.tree_placeholder = "#".to_string();
        config.class_name = "2Fast".to_string();
        assert!(config.validate().is_err());

        config.class_name = "SumTest".to_string();
        config.runner_name = "run all".to_string();
        assert!(config.validate().is_err());

        config.runner_name = "runCases".to_string();
        config.fail_status = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: SynthConfig =
            serde_json::from_str(r#"{"class_name":"SumTest"}"#).expect("config");
        assert_eq!(config.class_name, "SumTest");
        assert_eq!(config.tree_placeholder, "x");
        assert_eq!(config.indent_unit, "    ");
    }
}
