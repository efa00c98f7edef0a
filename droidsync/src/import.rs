//! The translation import pipeline.
//!
//! Fetch the project, then for each language in service order: fetch its terms, filter them for
//! the target's platform, and hand the result to the target's writer. Any failure aborts the
//! run; languages written before the failure stay on disk.

use std::{fs, io, path::PathBuf};

use tracing::{info, warn};

use crate::{
    config::{AndroidResConfig, FastlaneConfig, PoEditorConfig},
    error::Error,
    filter::{PlatformPolicy, filter_terms},
    formats::{android_strings::Format, fastlane},
    language::{is_reference_language, to_resource_qualifier, to_store_locale},
    poeditor::{PoEditorClient, TranslationService},
    traits::Parser,
    types::{Project, Term},
};

/// Where filtered terms are written.
pub trait ImportTarget {
    fn policy(&self) -> PlatformPolicy;

    /// Clears previous output. Runs once before any language is written.
    fn prepare(&mut self) -> Result<(), Error>;

    fn write(
        &mut self,
        language: &str,
        terms: &[Term],
        project: &Project,
    ) -> Result<Option<WrittenLanguage>, Error>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenLanguage {
    pub language: String,
    pub destination: PathBuf,
    pub entries: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub project: String,
    pub languages: Vec<WrittenLanguage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// No API token was configured.
    Skipped,
    Imported(ImportReport),
}

/// Runs an import using the configured PoEditor project.
///
/// A missing token skips the import with a warning; a missing project id is an error.
pub fn import_translations<T: ImportTarget>(
    config: &PoEditorConfig,
    target: &mut T,
) -> Result<ImportOutcome, Error> {
    let Some(api_token) = config.api_token.as_deref() else {
        warn!("Please provide a PoEditor API token to import translations.");
        return Ok(ImportOutcome::Skipped);
    };
    let project_id = config
        .project_id
        .ok_or_else(|| Error::ConfigInvalid("Project ID not set for PoEditor".to_string()))?;

    let client = PoEditorClient::new(api_token)?.with_api_base(config.api_base());
    run_import(&client, project_id, target).map(ImportOutcome::Imported)
}

/// Runs an import against any [`TranslationService`].
pub fn run_import<S: TranslationService, T: ImportTarget>(
    service: &S,
    project_id: u64,
    target: &mut T,
) -> Result<ImportReport, Error> {
    let project = service.fetch_project(project_id)?;
    let languages = service.list_languages(&project)?;
    info!(
        project = %project.name,
        languages = languages.len(),
        "importing translations"
    );

    let policy = target.policy();
    target.prepare()?;

    let mut report = ImportReport {
        project: project.name.clone(),
        languages: Vec::new(),
    };
    for language in languages.iter().map(|l| l.code.as_str()) {
        let terms = service.list_terms(&project, language)?;
        let terms = filter_terms(terms, &policy);
        if let Some(written) = target.write(language, &terms, &project)? {
            info!(
                language,
                destination = %written.destination.display(),
                entries = written.entries,
                "wrote translations"
            );
            report.languages.push(written);
        }
    }
    Ok(report)
}

/// Writes `strings.xml` files into an Android `res/` directory.
pub struct AndroidStringsTarget {
    res: AndroidResConfig,
}

impl AndroidStringsTarget {
    pub fn new(config: &AndroidResConfig) -> Self {
        Self { res: config.clone() }
    }

    /// The `values*` directory for `language`.
    pub fn values_dir(&self, language: &str, project: &Project) -> Result<PathBuf, Error> {
        let is_reference = project
            .reference_language
            .as_deref()
            .is_some_and(|reference| is_reference_language(reference, language));
        let name = if is_reference {
            "values".to_string()
        } else {
            to_resource_qualifier(language)?
        };
        Ok(self.res.res_dir.join(name))
    }
}

impl ImportTarget for AndroidStringsTarget {
    fn policy(&self) -> PlatformPolicy {
        PlatformPolicy::android()
    }

    fn prepare(&mut self) -> Result<(), Error> {
        for dir in self.res.resource_dirs("values")? {
            match fs::remove_file(dir.join("strings.xml")) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e.into()),
                _ => {}
            }
        }
        Ok(())
    }

    fn write(
        &mut self,
        language: &str,
        terms: &[Term],
        project: &Project,
    ) -> Result<Option<WrittenLanguage>, Error> {
        let dir = self.values_dir(language, project)?;
        // Single level: the res dir itself must already exist.
        if !dir.is_dir() {
            fs::create_dir(&dir)?;
        }
        let format = Format::from_terms(terms);
        let destination = dir.join("strings.xml");
        format.write_to(&destination)?;
        Ok(Some(WrittenLanguage {
            language: language.to_string(),
            destination,
            entries: format.strings.len(),
        }))
    }
}

/// Writes fastlane store-listing metadata.
pub struct FastlaneTarget {
    metadata_dir: PathBuf,
}

impl FastlaneTarget {
    pub fn new(config: &FastlaneConfig) -> Self {
        Self {
            metadata_dir: config.metadata_dir.clone(),
        }
    }
}

impl ImportTarget for FastlaneTarget {
    fn policy(&self) -> PlatformPolicy {
        PlatformPolicy::fastlane_android()
    }

    fn prepare(&mut self) -> Result<(), Error> {
        match fs::remove_dir_all(&self.metadata_dir) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    fn write(
        &mut self,
        language: &str,
        terms: &[Term],
        _project: &Project,
    ) -> Result<Option<WrittenLanguage>, Error> {
        // Languages without store text never need a store locale.
        let has_output = terms
            .iter()
            .any(|term| term.is_translated() && !fastlane::categories(term).is_empty());
        if !has_output {
            return Ok(None);
        }

        let store_locale = to_store_locale(language)?;
        let written = fastlane::write_language(&self.metadata_dir, &store_locale, terms)?;
        Ok(Some(WrittenLanguage {
            language: language.to_string(),
            destination: self.metadata_dir.clone(),
            entries: written.len(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn project(reference: Option<&str>) -> Project {
        Project {
            id: 1,
            name: "Demo".to_string(),
            description: None,
            public: false,
            open: false,
            reference_language: reference.map(str::to_string),
            terms_count: 0,
            created: Utc::now(),
        }
    }

    #[test]
    fn test_missing_token_skips() {
        let temp_dir = TempDir::new().unwrap();
        let mut target = AndroidStringsTarget::new(&AndroidResConfig::new(temp_dir.path()));
        let outcome = import_translations(&PoEditorConfig::new(), &mut target).unwrap();
        assert_eq!(outcome, ImportOutcome::Skipped);
    }

    #[test]
    fn test_missing_project_id_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut target = AndroidStringsTarget::new(&AndroidResConfig::new(temp_dir.path()));
        let config = PoEditorConfig::new().with_api_token(Some("token".to_string()));
        let err = import_translations(&config, &mut target).unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid(_)));
    }

    #[test]
    fn test_values_dir_for_reference_and_other_languages() {
        let target = AndroidStringsTarget::new(&AndroidResConfig::new("res"));
        let project = project(Some("en"));
        assert_eq!(
            target.values_dir("en", &project).unwrap(),
            PathBuf::from("res/values")
        );
        assert_eq!(
            target.values_dir("pt-BR", &project).unwrap(),
            PathBuf::from("res/values-pt-rBR")
        );
        let no_reference = self::project(None);
        assert_eq!(
            target.values_dir("en", &no_reference).unwrap(),
            PathBuf::from("res/values-en")
        );
    }

    #[test]
    fn test_android_prepare_removes_only_strings_xml() {
        let temp_dir = TempDir::new().unwrap();
        let res = temp_dir.path();
        fs::create_dir_all(res.join("values-fr")).unwrap();
        fs::write(res.join("values-fr/strings.xml"), "<resources/>").unwrap();
        fs::write(res.join("values-fr/colors.xml"), "<resources/>").unwrap();
        fs::create_dir_all(res.join("values-night")).unwrap();
        fs::create_dir_all(res.join("drawable")).unwrap();
        fs::write(res.join("drawable/strings.xml"), "keep").unwrap();

        let mut target = AndroidStringsTarget::new(&AndroidResConfig::new(res));
        target.prepare().unwrap();

        assert!(!res.join("values-fr/strings.xml").exists());
        assert!(res.join("values-fr/colors.xml").exists());
        assert!(res.join("drawable/strings.xml").exists());
    }

    #[test]
    fn test_android_prepare_requires_res_dir() {
        let temp_dir = TempDir::new().unwrap();
        let mut target =
            AndroidStringsTarget::new(&AndroidResConfig::new(temp_dir.path().join("missing")));
        assert!(matches!(target.prepare(), Err(Error::ConfigInvalid(_))));
    }

    #[test]
    fn test_fastlane_skips_languages_without_store_text() {
        let temp_dir = TempDir::new().unwrap();
        let mut target = FastlaneTarget::new(&FastlaneConfig::new(temp_dir.path()));
        let terms = vec![Term::new("k", &["fastlane-android"], None)];
        // `en` has no store locale, but nothing needs one.
        let written = target.write("en", &terms, &project(Some("en"))).unwrap();
        assert_eq!(written, None);
    }

    #[test]
    fn test_fastlane_unmapped_language_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut target = FastlaneTarget::new(&FastlaneConfig::new(temp_dir.path()));
        let terms = vec![Term::new("title", &["fastlane-android"], Some("Title"))];
        let err = target.write("en", &terms, &project(None)).unwrap_err();
        assert!(matches!(err, Error::UnmappedLanguage(ref tag) if tag == "en"));
    }

    #[test]
    fn test_fastlane_prepare_removes_previous_tree() {
        let temp_dir = TempDir::new().unwrap();
        let metadata = temp_dir.path().join("metadata");
        fs::create_dir_all(metadata.join("android/de-DE")).unwrap();
        fs::write(metadata.join("android/de-DE/title.txt"), "Alt").unwrap();

        let mut target = FastlaneTarget::new(&FastlaneConfig::new(&metadata));
        target.prepare().unwrap();
        assert!(!metadata.exists());
        // A second run with nothing to remove is fine.
        target.prepare().unwrap();
    }
}
