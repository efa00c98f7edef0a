//! Core data model for droidsync.
//!
//! Records returned by the translation service and the icon catalog deserialize straight into
//! these types. The service encodes booleans as `0`/`1` and "absent" as an empty string; the
//! private `de` helpers normalise both so the rest of the crate only ever sees `bool` and `Option`.

use std::{
    collections::BTreeMap,
    fmt::{self, Display},
    str::FromStr,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A translation-management project. Fetched once per run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "de::empty_as_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "de::int_bool")]
    pub public: bool,
    #[serde(deserialize_with = "de::int_bool")]
    pub open: bool,
    #[serde(default, deserialize_with = "de::empty_as_none")]
    pub reference_language: Option<String>,
    #[serde(rename = "terms", default)]
    pub terms_count: u64,
    #[serde(deserialize_with = "de::required_timestamp")]
    pub created: DateTime<Utc>,
}

/// Completion status of one project language.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LanguageStatus {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub translations: u64,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default, deserialize_with = "de::timestamp")]
    pub updated: Option<DateTime<Utc>>,
}

/// A single localizable string key together with its translation for one language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Term {
    #[serde(rename = "term")]
    pub key: String,
    #[serde(default, deserialize_with = "de::empty_as_none")]
    pub context: Option<String>,
    #[serde(default, deserialize_with = "de::empty_as_none")]
    pub plural: Option<String>,
    #[serde(default, deserialize_with = "de::timestamp")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::timestamp")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::translation")]
    pub translation: Option<Translation>,
    #[serde(default, deserialize_with = "de::empty_as_none")]
    pub reference: Option<String>,
    #[serde(default, deserialize_with = "de::tags")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "de::empty_as_none")]
    pub comment: Option<String>,
}

impl Term {
    /// Creates a term with only a key, tags and an optional singular translation.
    pub fn new(key: impl Into<String>, tags: &[&str], content: Option<&str>) -> Self {
        Term {
            key: key.into(),
            context: None,
            plural: None,
            created: None,
            updated: None,
            translation: content.map(|c| Translation {
                content: TranslationContent::Singular(c.to_string()),
                fuzzy: false,
                proofread: None,
                updated: None,
            }),
            reference: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            comment: None,
        }
    }

    pub fn is_translated(&self) -> bool {
        self.translation.is_some()
    }

    /// The singular translated text, if any.
    pub fn content(&self) -> Option<&str> {
        match &self.translation {
            Some(Translation {
                content: TranslationContent::Singular(text),
                ..
            }) => Some(text),
            _ => None,
        }
    }
}

/// A translation of one term into one language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Translation {
    pub content: TranslationContent,
    pub fuzzy: bool,
    pub proofread: Option<bool>,
    pub updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TranslationContent {
    /// A single translation without plural forms.
    Singular(String),

    /// A translation with plural forms, keyed by CLDR category.
    Plural(BTreeMap<PluralCategory, String>),
}

/// Standard CLDR plural forms.
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Clone, Copy, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PluralCategory::Zero => "zero",
            PluralCategory::One => "one",
            PluralCategory::Two => "two",
            PluralCategory::Few => "few",
            PluralCategory::Many => "many",
            PluralCategory::Other => "other",
        }
    }
}

impl Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PluralCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ZERO" => Ok(PluralCategory::Zero),
            "ONE" => Ok(PluralCategory::One),
            "TWO" => Ok(PluralCategory::Two),
            "FEW" => Ok(PluralCategory::Few),
            "MANY" => Ok(PluralCategory::Many),
            "OTHER" => Ok(PluralCategory::Other),
            _ => Err(format!("Unknown plural category: {}", s)),
        }
    }
}

/// Tri-state export filters. `None` means "don't filter on this axis".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportFilterFlags {
    pub translated: Option<bool>,
    pub fuzzy: Option<bool>,
    pub automatic: Option<bool>,
    pub proofread: Option<bool>,
}

impl ExportFilterFlags {
    pub fn is_empty(&self) -> bool {
        self.active().is_empty()
    }

    fn active(&self) -> Vec<&'static str> {
        let axes = [
            (self.translated, "translated", "not_translated"),
            (self.fuzzy, "fuzzy", "not_fuzzy"),
            (self.automatic, "automatic", "not_automatic"),
            (self.proofread, "proofread", "not_proofread"),
        ];
        axes.iter()
            .filter_map(|(flag, yes, no)| flag.map(|f| if f { *yes } else { *no }))
            .collect()
    }
}

impl Display for ExportFilterFlags {
    /// Renders the query value: `[]`, a bare word, or a JSON array of words.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let active = self.active();
        match active.as_slice() {
            [] => f.write_str("[]"),
            [single] => f.write_str(single),
            many => write!(
                f,
                "[{}]",
                many.iter()
                    .map(|word| format!("\"{}\"", word))
                    .collect::<Vec<_>>()
                    .join(",")
            ),
        }
    }
}

/// File formats the translation service can export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Po,
    Pot,
    Mo,
    Xls,
    Xlsx,
    Csv,
    Resw,
    Resx,
    AndroidStrings,
    AppleStrings,
    Xliff,
    Properties,
    KeyValueJson,
    Json,
    Yml,
    Xmb,
    Xtb,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 17] = [
        ExportFormat::Po,
        ExportFormat::Pot,
        ExportFormat::Mo,
        ExportFormat::Xls,
        ExportFormat::Xlsx,
        ExportFormat::Csv,
        ExportFormat::Resw,
        ExportFormat::Resx,
        ExportFormat::AndroidStrings,
        ExportFormat::AppleStrings,
        ExportFormat::Xliff,
        ExportFormat::Properties,
        ExportFormat::KeyValueJson,
        ExportFormat::Json,
        ExportFormat::Yml,
        ExportFormat::Xmb,
        ExportFormat::Xtb,
    ];

    /// The identifier the service expects in the `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Po => "po",
            ExportFormat::Pot => "pot",
            ExportFormat::Mo => "mo",
            ExportFormat::Xls => "xls",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Resw => "resw",
            ExportFormat::Resx => "resx",
            ExportFormat::AndroidStrings => "android_strings",
            ExportFormat::AppleStrings => "apple_strings",
            ExportFormat::Xliff => "xliff",
            ExportFormat::Properties => "properties",
            ExportFormat::KeyValueJson => "key_value_json",
            ExportFormat::Json => "json",
            ExportFormat::Yml => "yml",
            ExportFormat::Xmb => "xmb",
            ExportFormat::Xtb => "xtb",
        }
    }
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        ExportFormat::ALL
            .iter()
            .find(|format| format.as_str() == normalized)
            .copied()
            .ok_or_else(|| format!("Unknown export format: {}", s))
    }
}

/// One icon in the catalog manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IconMeta {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub deprecated: bool,
}

/// Parses a service timestamp (`2013-06-10T11:08:54+0000` or without offset).
///
/// Returns `Ok(None)` for an empty string.
pub fn parse_timestamp(value: &str) -> Result<Option<DateTime<Utc>>, chrono::ParseError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    match DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z") {
        Ok(parsed) => Ok(Some(parsed.with_timezone(&Utc))),
        Err(_) => chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
            .map(|naive| Some(naive.and_utc())),
    }
}

mod de {
    use std::collections::BTreeMap;

    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, de::Error as _};
    use serde_json::Value;

    use super::{PluralCategory, Translation, TranslationContent, parse_timestamp};

    pub fn empty_as_none<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let value = Option::<String>::deserialize(d)?;
        Ok(value.filter(|s| !s.is_empty()))
    }

    /// Accepts `0`/`1`, `true`/`false` and `"0"`/`"1"`.
    pub fn int_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        match Value::deserialize(d)? {
            Value::Bool(b) => Ok(b),
            Value::Number(n) => Ok(n.as_i64().unwrap_or(0) > 0),
            Value::String(s) => Ok(s.trim().parse::<i64>().unwrap_or(0) > 0),
            Value::Null => Ok(false),
            other => Err(D::Error::custom(format!("expected 0/1, got {}", other))),
        }
    }

    fn optional_int_bool<E: serde::de::Error>(value: Option<&Value>) -> Result<Option<bool>, E> {
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(0) => Ok(Some(false)),
                Some(1) => Ok(Some(true)),
                _ => Err(E::custom(format!("expected 0/1, got {}", n))),
            },
            Some(other) => Err(E::custom(format!("expected 0/1, got {}", other))),
        }
    }

    pub fn timestamp<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let value = Option::<String>::deserialize(d)?.unwrap_or_default();
        parse_timestamp(&value).map_err(D::Error::custom)
    }

    pub fn required_timestamp<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        timestamp(d)?.ok_or_else(|| D::Error::custom("missing timestamp"))
    }

    pub fn tags<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        let tags = Option::<Vec<Value>>::deserialize(d)?.unwrap_or_default();
        Ok(tags
            .into_iter()
            .filter_map(|tag| match tag {
                Value::String(s) if !s.is_empty() => Some(s),
                _ => None,
            })
            .collect())
    }

    /// An empty `content` (or a plural object with only empty forms) means "untranslated".
    pub fn translation<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Translation>, D::Error> {
        let Some(Value::Object(object)) = Option::<Value>::deserialize(d)? else {
            return Ok(None);
        };

        let content = match object.get("content") {
            Some(Value::String(s)) if !s.is_empty() => TranslationContent::Singular(s.clone()),
            Some(Value::Object(forms)) => {
                let mut parsed = BTreeMap::new();
                for (category, value) in forms {
                    let category: PluralCategory = category.parse().map_err(D::Error::custom)?;
                    match value {
                        Value::String(text) if !text.is_empty() => {
                            parsed.insert(category, text.clone());
                        }
                        _ => {}
                    }
                }
                if parsed.is_empty() {
                    return Ok(None);
                }
                TranslationContent::Plural(parsed)
            }
            _ => return Ok(None),
        };

        let fuzzy = optional_int_bool::<D::Error>(object.get("fuzzy"))?.unwrap_or(false);
        let proofread = optional_int_bool::<D::Error>(object.get("proofread"))?;
        let updated = match object.get("updated") {
            Some(Value::String(s)) => parse_timestamp(s).map_err(D::Error::custom)?,
            _ => None,
        };

        Ok(Some(Translation {
            content,
            fuzzy,
            proofread,
            updated,
        }))
    }
}
