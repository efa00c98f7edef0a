//! Client for the PoEditor v2 API.
//!
//! Every call is a form-encoded POST carrying `api_token`; responses wrap the payload in a
//! `{"response": {...}, "result": {...}}` envelope. Failures are never retried.

use reqwest::blocking::Client;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::debug;

use crate::{
    config::DEFAULT_API_BASE,
    error::Error,
    types::{ExportFilterFlags, ExportFormat, LanguageStatus, Project, Term},
};

/// Read access to a translation-management project.
pub trait TranslationService {
    fn fetch_project(&self, id: u64) -> Result<Project, Error>;

    fn list_languages(&self, project: &Project) -> Result<Vec<LanguageStatus>, Error>;

    fn list_terms(&self, project: &Project, language: &str) -> Result<Vec<Term>, Error>;

    fn export_translation(
        &self,
        project: &Project,
        language: &str,
        format: ExportFormat,
        filters: Option<&ExportFilterFlags>,
        alphabetical: bool,
    ) -> Result<Vec<u8>, Error>;
}

pub struct PoEditorClient {
    http: Client,
    api_token: String,
    api_base: String,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    response: Option<ResponseStatus>,
    #[serde(default)]
    result: Option<Value>,
}

#[derive(Deserialize)]
struct ResponseStatus {
    #[serde(default)]
    status: String,
    #[serde(default)]
    code: Value,
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
struct ProjectResult {
    project: Project,
}

#[derive(Debug, Deserialize)]
struct LanguagesResult {
    #[serde(default)]
    languages: Vec<LanguageStatus>,
}

#[derive(Debug, Deserialize)]
struct TermsResult {
    #[serde(default)]
    terms: Vec<Term>,
}

#[derive(Deserialize)]
struct ExportResult {
    url: String,
}

impl PoEditorClient {
    pub fn new(api_token: impl Into<String>) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(concat!("droidsync/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            api_token: api_token.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        let mut api_base = api_base.into();
        if !api_base.ends_with('/') {
            api_base.push('/');
        }
        self.api_base = api_base;
        self
    }

    fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        mut args: Vec<(&'static str, String)>,
    ) -> Result<T, Error> {
        args.push(("api_token", self.api_token.clone()));
        debug!(endpoint, "POST");

        let response = self
            .http
            .post(format!("{}{}", self.api_base, endpoint))
            .form(&args)
            .send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(Error::service_error(
                format!("{} returned HTTP {}", endpoint, status),
                None,
            ));
        }
        parse_envelope(endpoint, &body)
    }

    /// Asks the service to prepare an export and returns the download URL.
    pub fn export_translation_url(
        &self,
        project: &Project,
        language: &str,
        format: ExportFormat,
        filters: Option<&ExportFilterFlags>,
        alphabetical: bool,
    ) -> Result<String, Error> {
        let mut args = vec![
            ("id", project.id.to_string()),
            ("language", language.to_string()),
            ("type", format.as_str().to_string()),
        ];
        if let Some(filters) = filters.filter(|f| !f.is_empty()) {
            args.push(("filters", filters.to_string()));
        }
        if alphabetical {
            args.push(("order", "terms".to_string()));
        }
        let result: ExportResult = self.post("projects/export", args)?;
        Ok(result.url)
    }
}

fn parse_envelope<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<T, Error> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if let Some(response) = &envelope.response {
        if response.status == "fail" {
            return Err(Error::service_error(
                format!(
                    "{} failed ({}): {}",
                    endpoint, response.code, response.message
                ),
                None,
            ));
        }
    }
    let result = envelope.result.ok_or_else(|| {
        Error::service_error(format!("{} response has no result", endpoint), None)
    })?;
    Ok(serde_json::from_value(result)?)
}

impl TranslationService for PoEditorClient {
    fn fetch_project(&self, id: u64) -> Result<Project, Error> {
        let result: ProjectResult = self.post("projects/view", vec![("id", id.to_string())])?;
        Ok(result.project)
    }

    fn list_languages(&self, project: &Project) -> Result<Vec<LanguageStatus>, Error> {
        let result: LanguagesResult =
            self.post("languages/list", vec![("id", project.id.to_string())])?;
        Ok(result.languages)
    }

    fn list_terms(&self, project: &Project, language: &str) -> Result<Vec<Term>, Error> {
        let result: TermsResult = self.post(
            "terms/list",
            vec![
                ("id", project.id.to_string()),
                ("language", language.to_string()),
            ],
        )?;
        Ok(result.terms)
    }

    fn export_translation(
        &self,
        project: &Project,
        language: &str,
        format: ExportFormat,
        filters: Option<&ExportFilterFlags>,
        alphabetical: bool,
    ) -> Result<Vec<u8>, Error> {
        let url = self.export_translation_url(project, language, format, filters, alphabetical)?;
        debug!(%url, "GET export");
        let bytes = self.http.get(&url).send()?.error_for_status()?.bytes()?;
        Ok(bytes.to_vec())
    }
}
