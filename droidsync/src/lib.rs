#![forbid(unsafe_code)]
//! Keeps an Android project in sync with its external sources.
//!
//! Imports PoEditor translations into `res/values*/strings.xml` and fastlane store-listing
//! metadata, and regenerates vector drawables from the Material Design Icons catalog.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use droidsync::{AndroidResConfig, AndroidStringsTarget, PoEditorConfig, import_translations};
//!
//! let config = PoEditorConfig::new()
//!     .with_api_token(std::env::var("POEDITOR_API_TOKEN").ok())
//!     .with_project_id(Some(12345));
//! let mut target = AndroidStringsTarget::new(&AndroidResConfig::default());
//! import_translations(&config, &mut target)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Term tags
//!
//! - `<platform>`: term is exported for that platform
//! - `ignore-string-<platform>`: never exported for that platform
//! - `require-all-<group>`: term is withheld until every term of the group is translated
//! - `require-all-<group>-keep-<platform>`: exempts the term from the group check on that platform
//! - `fastlane-<category>`: term is store-listing text for `<category>`

pub mod config;
pub mod drawables;
pub mod error;
pub mod filter;
pub mod formats;
pub mod icons;
pub mod import;
pub mod language;
pub mod poeditor;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    config::{AndroidResConfig, FastlaneConfig, IconCatalogConfig, PoEditorConfig},
    drawables::{DrawableReport, SyncedDrawable, find_synced_drawables, update_drawables},
    error::Error,
    filter::{PlatformPolicy, filter_terms},
    icons::{IconSource, MaterialDesignIconsClient},
    import::{
        AndroidStringsTarget, FastlaneTarget, ImportOutcome, ImportReport, ImportTarget,
        WrittenLanguage, import_translations, run_import,
    },
    poeditor::{PoEditorClient, TranslationService},
    traits::Parser,
    types::{
        ExportFilterFlags, ExportFormat, IconMeta, LanguageStatus, PluralCategory, Project, Term,
        Translation, TranslationContent,
    },
};
