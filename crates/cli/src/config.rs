use anyhow::{anyhow, Context as AnyhowContext, Result};
use regress_synth::SynthConfig;
use std::fs;
use std::path::Path;

/// Load the synthesis config, JSON first with a TOML fallback; defaults when no file is given
pub fn load_config(path: Option<&Path>) -> Result<SynthConfig> {
    let Some(path) = path else {
        return Ok(SynthConfig::default());
    };

    let bytes =
        fs::read(path).with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = parse_config(&bytes).with_context(|| format!("Invalid config {}", path.display()))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

fn parse_config(bytes: &[u8]) -> Result<SynthConfig> {
    let value: serde_json::Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(json_err) => {
            let utf8 = std::str::from_utf8(bytes).map_err(|err| anyhow!("{json_err}; {err}"))?;
            let toml_value: toml::Value = toml::from_str(utf8).map_err(|toml_err| {
                anyhow!("Config is not valid JSON or TOML ({json_err}); TOML parse error: {toml_err}")
            })?;
            serde_json::to_value(toml_value)
                .map_err(|err| anyhow!("Failed to convert TOML config to JSON: {err}"))?
        }
    };

    serde_json::from_value(value).map_err(|err| anyhow!("Config parse error: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_and_toml() {
        let json = parse_config(br##"{"class_name":"SumTest","tree_placeholder":"#"}"##).unwrap();
        assert_eq!(json.class_name, "SumTest");
        assert_eq!(json.tree_placeholder, "#");

        let toml = parse_config(b"indent_unit = \"\\t\"\nfail_status = \"wrong\"\n").unwrap();
        assert_eq!(toml.indent_unit, "\t");
        assert_eq!(toml.fail_status, "wrong");
        assert_eq!(toml.runner_name, "runAllTests");
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_config(b"class_name = [").unwrap_err();
        assert!(err.to_string().contains("not valid JSON or TOML"), "{err}");
    }

    #[test]
    fn missing_path_gives_defaults() {
        assert_eq!(load_config(None).unwrap(), SynthConfig::default());
    }
}
