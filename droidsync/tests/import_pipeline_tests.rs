use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;

use chrono::Utc;
use droidsync::{
    AndroidResConfig, AndroidStringsTarget, Error, ExportFilterFlags, ExportFormat, FastlaneConfig,
    FastlaneTarget, LanguageStatus, Project, Term, TranslationService, run_import,
};
use tempfile::TempDir;

/// In-memory project: language code -> terms, in service order.
struct FakeService {
    project: Project,
    languages: Vec<(String, Vec<Term>)>,
    requested: RefCell<Vec<String>>,
}

impl FakeService {
    fn new(reference: Option<&str>) -> Self {
        Self {
            project: Project {
                id: 7,
                name: "Demo".to_string(),
                description: None,
                public: false,
                open: false,
                reference_language: reference.map(str::to_string),
                terms_count: 0,
                created: Utc::now(),
            },
            languages: Vec::new(),
            requested: RefCell::new(Vec::new()),
        }
    }

    fn with_language(mut self, code: &str, terms: Vec<Term>) -> Self {
        self.languages.push((code.to_string(), terms));
        self
    }
}

impl TranslationService for FakeService {
    fn fetch_project(&self, id: u64) -> Result<Project, Error> {
        if id != self.project.id {
            return Err(Error::service_error(format!("no project {}", id), None));
        }
        Ok(self.project.clone())
    }

    fn list_languages(&self, _project: &Project) -> Result<Vec<LanguageStatus>, Error> {
        Ok(self
            .languages
            .iter()
            .map(|(code, _)| LanguageStatus {
                name: code.clone(),
                code: code.clone(),
                translations: 0,
                percentage: 0.0,
                updated: None,
            })
            .collect())
    }

    fn list_terms(&self, _project: &Project, language: &str) -> Result<Vec<Term>, Error> {
        self.requested.borrow_mut().push(language.to_string());
        let terms: HashMap<&str, &Vec<Term>> = self
            .languages
            .iter()
            .map(|(code, terms)| (code.as_str(), terms))
            .collect();
        terms
            .get(language)
            .map(|terms| terms.to_vec())
            .ok_or_else(|| Error::service_error(format!("no language {}", language), None))
    }

    fn export_translation(
        &self,
        _project: &Project,
        _language: &str,
        _format: ExportFormat,
        _filters: Option<&ExportFilterFlags>,
        _alphabetical: bool,
    ) -> Result<Vec<u8>, Error> {
        Ok(Vec::new())
    }
}

fn english_terms() -> Vec<Term> {
    vec![
        Term::new("app_name", &[], Some("Droid")),
        Term::new("quote", &["android"], Some("It's \"on\"")),
        Term::new("onboarding_title", &["require-all-onboarding"], Some("Welcome")),
        Term::new("onboarding_body", &["require-all-onboarding"], Some("Let's go")),
        Term::new(
            "title",
            &["fastlane-android", "ignore-string-android"],
            Some("Droid for Android"),
        ),
    ]
}

fn french_terms() -> Vec<Term> {
    vec![
        Term::new("app_name", &[], Some("Droid")),
        Term::new("quote", &["android"], None),
        Term::new("onboarding_title", &["require-all-onboarding"], Some("Bienvenue")),
        Term::new("onboarding_body", &["require-all-onboarding"], None),
        Term::new(
            "title",
            &["fastlane-android", "ignore-string-android"],
            Some("Droid pour Android"),
        ),
    ]
}

#[test]
fn test_android_import_writes_reference_and_translations() {
    let temp_dir = TempDir::new().unwrap();
    let res = temp_dir.path().join("res");
    fs::create_dir_all(res.join("values-de")).unwrap();
    fs::write(res.join("values-de/strings.xml"), "<resources/>").unwrap();
    fs::write(res.join("values-de/dimens.xml"), "<resources/>").unwrap();

    let service = FakeService::new(Some("en"))
        .with_language("en", english_terms())
        .with_language("fr", french_terms());
    let mut target = AndroidStringsTarget::new(&AndroidResConfig::new(&res));
    let report = run_import(&service, 7, &mut target).unwrap();

    assert_eq!(report.project, "Demo");
    assert_eq!(report.languages.len(), 2);
    assert_eq!(*service.requested.borrow(), vec!["en", "fr"]);

    let english = fs::read_to_string(res.join("values/strings.xml")).unwrap();
    assert_eq!(
        english,
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <resources>\n    \
         <string name=\"app_name\">Droid</string>\n    \
         <string name=\"quote\">It\\'s \\\"on\\\"</string>\n    \
         <string name=\"onboarding_title\">Welcome</string>\n    \
         <string name=\"onboarding_body\">Let\\'s go</string>\n\
         </resources>\n"
    );

    // The onboarding group is incomplete in French, so neither member ships.
    let french = fs::read_to_string(res.join("values-fr/strings.xml")).unwrap();
    assert!(french.contains("<string name=\"app_name\">Droid</string>"));
    assert!(!french.contains("onboarding"));
    assert!(!french.contains("quote"));
    assert!(!french.contains("title"));

    // Stale strings are cleaned, other resources survive.
    assert!(!res.join("values-de/strings.xml").exists());
    assert!(res.join("values-de/dimens.xml").exists());
}

#[test]
fn test_android_import_maps_regional_and_legacy_languages() {
    let temp_dir = TempDir::new().unwrap();
    let res = temp_dir.path().join("res");
    fs::create_dir_all(&res).unwrap();

    let terms = || vec![Term::new("app_name", &[], Some("Droid"))];
    let service = FakeService::new(Some("en"))
        .with_language("pt-br", terms())
        .with_language("he", terms())
        .with_language("zh-Hans", terms());
    let mut target = AndroidStringsTarget::new(&AndroidResConfig::new(&res));
    run_import(&service, 7, &mut target).unwrap();

    assert!(res.join("values-pt-rBR/strings.xml").exists());
    assert!(res.join("values-iw/strings.xml").exists());
    assert!(res.join("values-zh-rCN/strings.xml").exists());
    assert!(!res.join("values").exists());
}

#[test]
fn test_android_import_requires_existing_res_dir() {
    let temp_dir = TempDir::new().unwrap();
    let service = FakeService::new(Some("en")).with_language("en", english_terms());
    let mut target =
        AndroidStringsTarget::new(&AndroidResConfig::new(temp_dir.path().join("missing")));

    let err = run_import(&service, 7, &mut target).unwrap_err();
    assert!(matches!(err, Error::ConfigInvalid(_)));
}

#[test]
fn test_service_failure_aborts_import() {
    let temp_dir = TempDir::new().unwrap();
    let service = FakeService::new(Some("en"));
    let mut target = AndroidStringsTarget::new(&AndroidResConfig::new(temp_dir.path()));

    let err = run_import(&service, 99, &mut target).unwrap_err();
    assert!(matches!(err, Error::Service { .. }));
}

#[test]
fn test_fastlane_import_writes_store_text() {
    let temp_dir = TempDir::new().unwrap();
    let metadata = temp_dir.path().join("metadata");
    fs::create_dir_all(metadata.join("android/xx-XX")).unwrap();
    fs::write(metadata.join("android/xx-XX/title.txt"), "stale").unwrap();

    let service = FakeService::new(Some("en"))
        .with_language("de", vec![Term::new("title", &["fastlane-android"], Some("Droid"))])
        .with_language("fr", french_terms())
        .with_language("en", vec![Term::new("app_name", &[], Some("Droid"))]);
    let mut target = FastlaneTarget::new(&FastlaneConfig::new(&metadata));
    let report = run_import(&service, 7, &mut target).unwrap();

    assert!(!metadata.join("android/xx-XX").exists());
    assert_eq!(
        fs::read_to_string(metadata.join("android/de-DE/title.txt")).unwrap(),
        "Droid"
    );
    assert_eq!(
        fs::read_to_string(metadata.join("android/fr-FR/title.txt")).unwrap(),
        "Droid pour Android"
    );
    // Untagged terms never reach fastlane, so `en` needs no store locale.
    let languages: Vec<&str> = report
        .languages
        .iter()
        .map(|written| written.language.as_str())
        .collect();
    assert_eq!(languages, vec!["de", "fr"]);
    assert!(!metadata.join("android/fr-FR/app_name.txt").exists());
}

#[test]
fn test_fastlane_import_fails_on_unmapped_language() {
    let temp_dir = TempDir::new().unwrap();
    let service = FakeService::new(None).with_language(
        "tlh",
        vec![Term::new("title", &["fastlane-android"], Some("Droid"))],
    );
    let mut target = FastlaneTarget::new(&FastlaneConfig::new(temp_dir.path().join("m")));

    let err = run_import(&service, 7, &mut target).unwrap_err();
    assert!(matches!(err, Error::UnmappedLanguage(ref tag) if tag == "tlh"));
    assert_eq!(err.to_string(), "no matching tags for `tlh`");
}
