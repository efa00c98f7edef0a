//! Mapping from BCP-47 language tags to Android resource qualifiers and Google Play locales.
//!
//! The translation service speaks BCP-47, but Android resource directories only accept
//! `values-<lang>[-r<REGION>]` before API 24, and the Play Store (and therefore fastlane)
//! accepts a fixed list of locale codes. Both directions have a handful of legacy spellings.

use unic_langid::LanguageIdentifier;

use crate::error::Error;

/// Locale codes accepted by the Google Play Console store listing.
///
/// <https://support.google.com/googleplay/android-developer/answer/9844778>
pub const STORE_LOCALES: &[&str] = &[
    "af", "am", "ar", "hy-AM", "az-AZ", "eu-ES", "be", "bn-BD", "bg", "my-MM", "ca", "zh-HK",
    "zh-CN", "zh-TW", "hr", "cs-CZ", "da-DK", "nl-NL", "en-AU", "en-CA", "en-IN", "en-SG", "en-GB",
    "en-US", "et", "fil", "fi-FI", "fr-FR", "fr-CA", "gl-ES", "ka-GE", "de-DE", "el-GR", "iw-IL",
    "hi-IN", "hu-HU", "is-IS", "id", "it-IT", "ja-JP", "kn-IN", "km-KH", "ko-KR", "ky-KG", "lo-LA",
    "lv", "lt", "mk-MK", "ms", "ml-IN", "mr-IN", "mn-MN", "ne-NP", "no-NO", "fa", "pl-PL", "pt-BR",
    "pt-PT", "ro", "rm", "ru-RU", "sr", "si-LK", "sk", "sl", "es-419", "es-ES", "es-US", "sw",
    "sv-SE", "ta-IN", "te-IN", "th", "tr-TR", "uk", "vi", "zu",
];

/// Tags whose resource directory can't be derived from language + region.
const QUALIFIER_OVERRIDES: &[(&str, &str)] = &[
    ("zh-Hans", "values-zh-rCN"),
    ("zh-Hant", "values-zh-rTW"),
];

/// Language subtags Android still resolves under their pre-ISO-639 codes.
const LEGACY_LANGUAGE_CODES: &[(&str, &str)] = &[("he", "iw"), ("id", "in"), ("yi", "ji")];

/// Google uses region codes for Chinese scripts and a few retired language codes.
const STORE_OVERRIDES: &[(&str, &str)] = &[
    ("zh-Hans", "zh-CN"),
    ("zh-Hant", "zh-TW"),
    ("he", "iw-IL"),
    ("nb", "no-NO"),
    ("tl", "fil"),
];

fn find_override(table: &[(&str, &'static str)], tag: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(from, _)| from.eq_ignore_ascii_case(tag))
        .map(|(_, to)| *to)
}

fn parse_tag(tag: &str) -> Result<LanguageIdentifier, Error> {
    tag.trim()
        .parse::<LanguageIdentifier>()
        .map_err(|_| Error::UnmappedLanguage(tag.to_string()))
}

/// Returns the `values*` directory name for `tag`, e.g. `pt-BR` → `values-pt-rBR`.
pub fn to_resource_qualifier(tag: &str) -> Result<String, Error> {
    if let Some(qualifier) = find_override(QUALIFIER_OVERRIDES, tag) {
        return Ok(qualifier.to_string());
    }

    let lang_id = parse_tag(tag)?;
    let language = lang_id.language.as_str();
    if language == "und" {
        return Err(Error::UnmappedLanguage(tag.to_string()));
    }
    let language = find_override(LEGACY_LANGUAGE_CODES, language).unwrap_or(language);

    let mut qualifier = format!("values-{}", language);
    if let Some(region) = lang_id.region {
        qualifier.push_str("-r");
        qualifier.push_str(region.as_str());
    }
    Ok(qualifier)
}

/// Whether `code` names the same locale as the project's reference language.
pub fn is_reference_language(reference: &str, code: &str) -> bool {
    match (
        reference.parse::<LanguageIdentifier>(),
        code.parse::<LanguageIdentifier>(),
    ) {
        (Ok(reference), Ok(code)) => reference == code,
        _ => reference.eq_ignore_ascii_case(code),
    }
}

/// Returns the Play Store locale for `tag`, choosing from [`STORE_LOCALES`].
///
/// Resolution order:
/// 1. the special-case table,
/// 2. RFC 4647 lookup (progressively less specific prefixes of `tag`),
/// 3. RFC 4647 basic filtering, if it yields a single candidate,
/// 4. among several candidates, the one whose language and region subtags are equal
///    (`fr` → `fr-FR`, `de` → `de-DE`).
pub fn to_store_locale(tag: &str) -> Result<String, Error> {
    to_store_locale_in(tag, STORE_LOCALES)
}

pub(crate) fn to_store_locale_in(tag: &str, available: &[&str]) -> Result<String, Error> {
    let tag = tag.trim();
    if let Some(locale) = find_override(STORE_OVERRIDES, tag) {
        return Ok(locale.to_string());
    }

    if let Some(found) = lookup(tag, available) {
        return Ok(found.to_string());
    }

    let candidates = filter(tag, available);
    if let [only] = candidates.as_slice() {
        return Ok(only.to_string());
    }

    let mut same_region = candidates.iter().filter(|candidate| {
        let mut subtags = candidate.split('-');
        match (subtags.next(), subtags.next()) {
            (Some(language), Some(region)) => language.eq_ignore_ascii_case(region),
            _ => false,
        }
    });
    match (same_region.next(), same_region.next()) {
        (Some(found), None) => Ok(found.to_string()),
        _ => Err(Error::UnmappedLanguage(tag.to_string())),
    }
}

fn lookup<'a>(range: &str, available: &[&'a str]) -> Option<&'a str> {
    let mut range = range.to_ascii_lowercase();
    loop {
        if let Some(found) = available
            .iter()
            .find(|candidate| candidate.eq_ignore_ascii_case(&range))
        {
            return Some(found);
        }
        let cut = range.rfind('-')?;
        range.truncate(cut);
        // A trailing singleton (e.g. `x` of a private-use sequence) is dropped with its subtag.
        if let Some(cut) = range.rfind('-') {
            if range.len() - cut == 2 {
                range.truncate(cut);
            }
        }
    }
}

fn filter<'a>(range: &str, available: &[&'a str]) -> Vec<&'a str> {
    let range = range.to_ascii_lowercase();
    let prefix = format!("{}-", range);
    available
        .iter()
        .filter(|candidate| {
            let candidate = candidate.to_ascii_lowercase();
            candidate == range || candidate.starts_with(&prefix)
        })
        .copied()
        .collect()
}
