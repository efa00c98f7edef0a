//! Explicit configuration for the import and sync pipelines.
//!
//! Every value has a builder-style setter so callers (the CLI, tests) can assemble a
//! configuration without touching the environment.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::Error;

pub const DEFAULT_API_BASE: &str = "https://api.poeditor.com/v2/";
pub const DEFAULT_META_URL: &str =
    "https://raw.githubusercontent.com/Templarian/MaterialDesign/master/meta.json";
pub const DEFAULT_SVG_BASE_URL: &str =
    "https://raw.githubusercontent.com/Templarian/MaterialDesign/master/svg/";
pub const DEFAULT_RES_DIR: &str = "app/src/main/res";
pub const DEFAULT_METADATA_DIR: &str = "fastlane/metadata";

/// Access to the translation service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct PoEditorConfig {
    /// Missing token means "skip the import", not "fail".
    pub api_token: Option<String>,
    pub project_id: Option<u64>,
    pub api_base: Option<String>,
}

impl PoEditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_token(mut self, api_token: Option<String>) -> Self {
        self.api_token = api_token.filter(|token| !token.trim().is_empty());
        self
    }

    pub fn with_project_id(mut self, project_id: Option<u64>) -> Self {
        self.project_id = project_id;
        self
    }

    pub fn with_api_base(mut self, api_base: Option<String>) -> Self {
        self.api_base = api_base;
        self
    }

    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }
}

/// Location of the Android module's main `res/` directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AndroidResConfig {
    pub res_dir: PathBuf,
}

impl Default for AndroidResConfig {
    fn default() -> Self {
        Self {
            res_dir: PathBuf::from(DEFAULT_RES_DIR),
        }
    }
}

impl AndroidResConfig {
    pub fn new(res_dir: impl AsRef<Path>) -> Self {
        Self {
            res_dir: res_dir.as_ref().to_path_buf(),
        }
    }

    /// Subdirectories of the res dir whose name starts with `prefix`, sorted by name.
    pub fn resource_dirs(&self, prefix: &str) -> Result<Vec<PathBuf>, Error> {
        if !self.res_dir.is_dir() {
            return Err(Error::ConfigInvalid(format!(
                "Unable to detect res directory at {}",
                self.res_dir.display()
            )));
        }
        let mut dirs = Vec::new();
        for entry in fs::read_dir(&self.res_dir)? {
            let entry = entry?;
            let is_match = entry.file_name().to_string_lossy().starts_with(prefix);
            if is_match && entry.file_type()?.is_dir() {
                dirs.push(entry.path());
            }
        }
        dirs.sort();
        Ok(dirs)
    }
}

/// Location of the fastlane metadata tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FastlaneConfig {
    pub metadata_dir: PathBuf,
}

impl Default for FastlaneConfig {
    fn default() -> Self {
        Self {
            metadata_dir: PathBuf::from(DEFAULT_METADATA_DIR),
        }
    }
}

impl FastlaneConfig {
    pub fn new(metadata_dir: impl AsRef<Path>) -> Self {
        Self {
            metadata_dir: metadata_dir.as_ref().to_path_buf(),
        }
    }
}

/// Where icon manifests and sources are downloaded from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IconCatalogConfig {
    pub meta_url: String,
    pub svg_base_url: String,
}

impl Default for IconCatalogConfig {
    fn default() -> Self {
        Self {
            meta_url: DEFAULT_META_URL.to_string(),
            svg_base_url: DEFAULT_SVG_BASE_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_token_counts_as_missing() {
        let config = PoEditorConfig::new().with_api_token(Some("  ".to_string()));
        assert_eq!(config.api_token, None);
    }

    #[test]
    fn test_api_base_default_and_override() {
        let config = PoEditorConfig::new();
        assert_eq!(config.api_base(), DEFAULT_API_BASE);
        let config = config.with_api_base(Some("http://localhost:8080/v2/".to_string()));
        assert_eq!(config.api_base(), "http://localhost:8080/v2/");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(
            AndroidResConfig::default().res_dir,
            PathBuf::from("app/src/main/res")
        );
        assert_eq!(
            FastlaneConfig::default().metadata_dir,
            PathBuf::from("fastlane/metadata")
        );
        assert!(IconCatalogConfig::default().meta_url.ends_with("meta.json"));
    }

    #[test]
    fn test_deserialize_partial_sections() {
        let config: PoEditorConfig = serde_json::from_str(r#"{"project_id": 12}"#).unwrap();
        assert_eq!(config.project_id, Some(12));
        assert_eq!(config.api_token, None);
    }
}
