use protypo_compiler::CompileOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "protypo.config.json";

/// Protypo project configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding Protypo JSON page trees
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    /// Directory generated template source is written to
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Extension of generated files
    #[serde(default = "default_extension")]
    pub extension: String,

    #[serde(default)]
    pub trim_trailing_whitespace: bool,
}

fn default_src_dir() -> String {
    "src".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_extension() -> String {
    "ptp".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn get_src_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.src_dir)
    }

    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            trim_trailing_whitespace: self.trim_trailing_whitespace,
            ..CompileOptions::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            out_dir: default_out_dir(),
            extension: default_extension(),
            trim_trailing_whitespace: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "srcDir": "pages",
            "outDir": "templates",
            "extension": "txt",
            "trimTrailingWhitespace": true
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.src_dir, "pages");
        assert_eq!(config.out_dir, "templates");
        assert_eq!(config.extension, "txt");
        assert!(config.compile_options().trim_trailing_whitespace);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{ "srcDir": "pages" }"#).unwrap();
        assert_eq!(config.src_dir, "pages");
        assert_eq!(config.out_dir, "dist");
        assert_eq!(config.extension, "ptp");
        assert!(!config.trim_trailing_whitespace);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.src_dir, "src");
        assert_eq!(config.get_out_dir("/work"), PathBuf::from("/work/dist"));
    }

    #[test]
    fn test_config_serializes_camel_case() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("\"trimTrailingWhitespace\":false"));
        assert!(json.contains("\"srcDir\":\"src\""));
    }
}
