//! Fastlane `supply` metadata files.
//!
//! Layout: `<metadata_dir>/<category>/<store-locale>/<term-key>.txt`, one plain-text file per
//! term. The category comes from a `fastlane-<category>` tag, so `fastlane-android` lands under
//! `android/`, which is where `supply` looks for store listing text.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use tracing::warn;

use crate::{error::Error, types::Term};

const TAG_PREFIX: &str = "fastlane-";

/// Categories named by the term's `fastlane-*` tags, in tag order.
pub fn categories(term: &Term) -> Vec<&str> {
    term.tags
        .iter()
        .filter_map(|tag| tag.strip_prefix(TAG_PREFIX))
        .filter(|category| !category.is_empty())
        .collect()
}

/// Rejects names that would not stay a single entry inside the metadata tree.
pub fn check_path_component(what: &str, name: &str) -> Result<(), Error> {
    let escapes = name.is_empty()
        || name.contains(['/', '\\'])
        || name.contains("..")
        || Path::new(name).is_absolute();
    if escapes {
        return Err(Error::format_violation(format!(
            "{} `{}` can't be used as a metadata file name",
            what, name
        )));
    }
    Ok(())
}

/// Writes the metadata files for one language and returns the paths written.
///
/// Untranslated and plural terms are skipped. Directories are created as needed. Every key and
/// category is checked before anything is written.
pub fn write_language(
    metadata_dir: &Path,
    store_locale: &str,
    terms: &[Term],
) -> Result<Vec<PathBuf>, Error> {
    check_path_component("store locale", store_locale)?;
    for term in terms.iter().filter(|term| term.is_translated()) {
        let categories = categories(term);
        if categories.is_empty() {
            continue;
        }
        check_path_component("term key", &term.key)?;
        for category in categories {
            check_path_component("fastlane category", category)?;
        }
    }

    let mut created = HashSet::new();
    let mut written = Vec::new();

    for term in terms {
        if !term.is_translated() {
            continue;
        }
        let Some(content) = term.content() else {
            warn!(key = %term.key, "plural terms can't be written as fastlane metadata");
            continue;
        };

        for category in categories(term) {
            let lang_dir = metadata_dir.join(category).join(store_locale);
            if created.insert(lang_dir.clone()) {
                fs::create_dir_all(&lang_dir)?;
            }
            let out = lang_dir.join(format!("{}.txt", term.key));
            fs::write(&out, content)?;
            written.push(out);
        }
    }
    Ok(written)
}
