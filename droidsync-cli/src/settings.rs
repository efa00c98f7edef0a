use std::fs;
use std::path::{Path, PathBuf};

use droidsync::{AndroidResConfig, FastlaneConfig, IconCatalogConfig, PoEditorConfig};
use serde::Deserialize;

/// Loaded from the working directory when `--config` is not given.
pub const DEFAULT_SETTINGS_FILE: &str = "droidsync.toml";

/// Contents of a `droidsync.toml` file. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub poeditor: PoEditorConfig,
    pub android: AndroidResConfig,
    pub fastlane: FastlaneConfig,
    pub icons: IconCatalogConfig,
}

impl Settings {
    /// Applies command-line overrides to the `[poeditor]` section.
    pub fn poeditor(&self, api_token: Option<String>, project_id: Option<u64>) -> PoEditorConfig {
        let file = self.poeditor.clone();
        let api_token = api_token.or(file.api_token);
        let project_id = project_id.or(file.project_id);
        PoEditorConfig::new()
            .with_api_token(api_token)
            .with_project_id(project_id)
            .with_api_base(file.api_base)
    }

    pub fn android(&self, res_dir: Option<PathBuf>) -> AndroidResConfig {
        match res_dir {
            Some(dir) => AndroidResConfig::new(dir),
            None => self.android.clone(),
        }
    }

    pub fn fastlane(&self, metadata_dir: Option<PathBuf>) -> FastlaneConfig {
        match metadata_dir {
            Some(dir) => FastlaneConfig::new(dir),
            None => self.fastlane.clone(),
        }
    }
}

/// Reads settings from `path`, or from [`DEFAULT_SETTINGS_FILE`] if it exists.
///
/// An explicit path that cannot be read is an error; a missing default file is not.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, String> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_SETTINGS_FILE);
            if !default.is_file() {
                return Ok(Settings::default());
            }
            default
        }
    };
    let content = fs::read_to_string(&path)
        .map_err(|e| format!("Cannot read config file {}: {}", path.display(), e))?;
    parse_settings(&content).map_err(|e| format!("Invalid config file {}: {}", path.display(), e))
}

pub fn parse_settings(content: &str) -> Result<Settings, String> {
    toml::from_str(content).map_err(|e| e.to_string())
}
