//! Client for the Material Design Icons catalog.

use std::collections::HashMap;

use reqwest::blocking::Client;
use tracing::debug;

use crate::{config::IconCatalogConfig, error::Error, types::IconMeta};

/// Read access to an icon catalog.
pub trait IconSource {
    /// All icons in the catalog, keyed by id.
    fn fetch_manifest(&self) -> Result<HashMap<String, IconMeta>, Error>;

    /// The SVG source of the icon called `name`.
    fn fetch_icon_source(&self, name: &str) -> Result<Vec<u8>, Error>;
}

pub struct MaterialDesignIconsClient {
    http: Client,
    config: IconCatalogConfig,
}

impl MaterialDesignIconsClient {
    pub fn new(config: IconCatalogConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(concat!("droidsync/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    fn get(&self, url: &str) -> Result<Vec<u8>, Error> {
        debug!(url, "GET");
        let bytes = self.http.get(url).send()?.error_for_status()?.bytes()?;
        Ok(bytes.to_vec())
    }

    fn icon_url(&self, name: &str) -> String {
        let base = self.config.svg_base_url.trim_end_matches('/');
        format!("{}/{}.svg", base, name)
    }
}

/// Indexes a manifest (a JSON array of icons) by id.
pub fn parse_manifest(bytes: &[u8]) -> Result<HashMap<String, IconMeta>, Error> {
    let icons: Vec<IconMeta> = serde_json::from_slice(bytes)?;
    Ok(icons
        .into_iter()
        .map(|icon| (icon.id.clone(), icon))
        .collect())
}

impl IconSource for MaterialDesignIconsClient {
    fn fetch_manifest(&self) -> Result<HashMap<String, IconMeta>, Error> {
        let bytes = self.get(&self.config.meta_url)?;
        parse_manifest(&bytes)
    }

    fn fetch_icon_source(&self, name: &str) -> Result<Vec<u8>, Error> {
        if name.is_empty() || name.contains(['/', '?', '#']) {
            return Err(Error::format_violation(format!(
                "icon name `{}` is not a plain file name",
                name
            )));
        }
        self.get(&self.icon_url(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest_indexes_by_id() {
        let json = br#"[
            {"id": "F0001", "name": "ab-testing", "author": "Google", "version": "1.5.54", "deprecated": false},
            {"id": "F0002", "name": "old-icon", "author": "Contributor", "version": "1.0.0", "deprecated": true}
        ]"#;
        let manifest = parse_manifest(json).unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest["F0001"].name, "ab-testing");
        assert!(manifest["F0002"].deprecated);
    }

    #[test]
    fn test_parse_manifest_rejects_non_array() {
        assert!(matches!(
            parse_manifest(br#"{"id": "F0001"}"#),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn test_icon_url() {
        let client = MaterialDesignIconsClient::new(IconCatalogConfig {
            meta_url: "http://localhost/meta.json".to_string(),
            svg_base_url: "http://localhost/svg/".to_string(),
        })
        .unwrap();
        assert_eq!(client.icon_url("account"), "http://localhost/svg/account.svg");
    }

    #[test]
    fn test_icon_name_with_path_separator_rejected() {
        let client = MaterialDesignIconsClient::new(IconCatalogConfig::default()).unwrap();
        assert!(matches!(
            client.fetch_icon_source("../secret"),
            Err(Error::FormatViolation(_))
        ));
    }
}
