//! The drawable sync pipeline.
//!
//! Finds every drawable carrying the sync signature and regenerates it from the icon catalog.

use std::{fs, path::PathBuf};

use tracing::{info, warn};

use crate::{
    config::AndroidResConfig,
    error::Error,
    formats::{
        svg::SvgIcon,
        vector_drawable::{self, SIGNATURE},
    },
    icons::IconSource,
};

/// A drawable file bearing the sync signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncedDrawable {
    pub path: PathBuf,
    pub icon_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawableReport {
    pub updated: Vec<SyncedDrawable>,
    pub deprecated: Vec<SyncedDrawable>,
}

/// Lists signed files in every `drawable*` directory, sorted by path.
pub fn find_synced_drawables(config: &AndroidResConfig) -> Result<Vec<SyncedDrawable>, Error> {
    let mut found = Vec::new();
    for dir in config.resource_dirs("drawable")? {
        let mut files = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();

        for path in files {
            let bytes = fs::read(&path)?;
            // PNGs and other binaries never match the signature.
            if !bytes.starts_with(SIGNATURE.as_bytes()) {
                continue;
            }
            let content = String::from_utf8_lossy(&bytes);
            if let Some(icon_id) = vector_drawable::read_signature(&content)? {
                found.push(SyncedDrawable { path, icon_id });
            }
        }
    }
    Ok(found)
}

/// Regenerates every synced drawable from `source`.
///
/// Fails on the first icon missing from the manifest or with an unexpected source format.
pub fn update_drawables<S: IconSource>(
    source: &S,
    config: &AndroidResConfig,
) -> Result<DrawableReport, Error> {
    let drawables = find_synced_drawables(config)?;
    let mut report = DrawableReport::default();
    if drawables.is_empty() {
        info!(res_dir = %config.res_dir.display(), "no synced drawables found");
        return Ok(report);
    }

    let manifest = source.fetch_manifest()?;
    for drawable in drawables {
        let meta = manifest
            .get(&drawable.icon_id)
            .ok_or_else(|| Error::MissingIcon(drawable.icon_id.clone()))?;
        if meta.deprecated {
            warn!("Deprecated icon {}", drawable.path.display());
        }

        let source_bytes = source.fetch_icon_source(&meta.name)?;
        let icon = SvgIcon::parse(&source_bytes)?;
        let content = vector_drawable::render(meta, &icon)?;
        fs::write(&drawable.path, content)?;
        info!(
            icon = %meta.name,
            path = %drawable.path.display(),
            "updated drawable"
        );

        if meta.deprecated {
            report.deprecated.push(drawable.clone());
        }
        report.updated.push(drawable);
    }
    Ok(report)
}
