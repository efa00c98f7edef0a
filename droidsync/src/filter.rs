//! Per-platform term filtering driven by term tags.
//!
//! Tags are a small rule language:
//!
//! | tag                                 | meaning on `<platform>`                                   |
//! |-------------------------------------|-----------------------------------------------------------|
//! | `<platform>`                        | include (a later exclusion still wins)                    |
//! | `ignore-string-<platform>`          | exclude, stop                                             |
//! | `require-all-<name>-keep-<other>`   | member of group `require-all-<name>`; excluded when that group is incomplete |
//! | `require-all-<name>-keep-<platform>`| member of the group, but exempt from its suppression here |
//!
//! A group is incomplete for a language when any untranslated term carries a `require-all-` tag
//! naming it. Completeness is therefore a property of the group, not of a single term.

use std::collections::HashSet;

use tracing::debug;

use crate::types::Term;

const KEEP_INFIX: &str = "-keep-";
const REQUIRE_ALL_PREFIX: &str = "require-all-";
const IGNORE_PREFIX: &str = "ignore-string-";

/// Output target a filtering pass runs for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformPolicy {
    pub platform: String,
    /// Whether a term with no `<platform>` tag ships.
    pub include_by_default: bool,
}

impl PlatformPolicy {
    pub fn new(platform: impl Into<String>, include_by_default: bool) -> Self {
        Self {
            platform: platform.into(),
            include_by_default,
        }
    }

    /// Android `strings.xml`: everything ships unless excluded.
    pub fn android() -> Self {
        Self::new("android", true)
    }

    /// Fastlane store metadata: only terms explicitly tagged `fastlane-android` ship.
    pub fn fastlane_android() -> Self {
        Self::new("fastlane-android", false)
    }

    /// Classifies `tag` for this platform.
    pub fn classify<'t>(&self, tag: &'t str) -> TagRule<'t> {
        if tag
            .strip_prefix(IGNORE_PREFIX)
            .is_some_and(|platform| platform == self.platform)
        {
            return TagRule::Ignore;
        }
        let keeps_here = tag
            .strip_suffix(self.platform.as_str())
            .is_some_and(|head| head.ends_with(KEEP_INFIX));
        if keeps_here {
            return TagRule::Keep {
                group: group_of(tag),
            };
        }
        if tag == self.platform {
            return TagRule::Platform;
        }
        TagRule::Member {
            group: group_of(tag),
        }
    }
}

/// What a single tag means for one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRule<'t> {
    /// `ignore-string-<platform>`.
    Ignore,
    /// `<group>-keep-<platform>`.
    Keep { group: &'t str },
    /// Exactly `<platform>`.
    Platform,
    /// Anything else.
    Member { group: &'t str },
}

/// The group a tag belongs to: its text before the last `-keep-`, or the whole tag.
pub fn group_of(tag: &str) -> &str {
    match tag.rfind(KEEP_INFIX) {
        Some(idx) => &tag[..idx],
        None => tag,
    }
}

/// Collects the groups that have at least one untranslated member.
pub fn incomplete_groups(terms: &[Term]) -> HashSet<String> {
    terms
        .iter()
        .filter(|term| !term.is_translated())
        .flat_map(|term| term.tags.iter())
        .filter(|tag| tag.starts_with(REQUIRE_ALL_PREFIX))
        .map(|tag| group_of(tag).to_string())
        .collect()
}

/// Decides whether `term` ships on `policy`'s platform.
///
/// Tags are evaluated in order. Exclusions stop evaluation immediately; the platform tag sets
/// the term active but keeps evaluating, so a later exclusion still wins.
pub fn is_active(term: &Term, policy: &PlatformPolicy, incomplete: &HashSet<String>) -> bool {
    let mut active = policy.include_by_default;
    for tag in &term.tags {
        match policy.classify(tag) {
            TagRule::Ignore => return false,
            TagRule::Keep { .. } => {}
            TagRule::Platform => {
                if incomplete.contains(tag.as_str()) {
                    return false;
                }
                active = true;
            }
            TagRule::Member { group } => {
                if incomplete.contains(group) {
                    return false;
                }
            }
        }
    }
    active
}

/// Runs both passes over one language's terms.
///
/// Inactive terms keep their key but lose their translation; writers skip untranslated keys.
pub fn filter_terms(terms: Vec<Term>, policy: &PlatformPolicy) -> Vec<Term> {
    let incomplete = incomplete_groups(&terms);
    if !incomplete.is_empty() {
        debug!(
            platform = %policy.platform,
            groups = ?incomplete,
            "suppressing incomplete tag groups"
        );
    }

    terms
        .into_iter()
        .map(|mut term| {
            if !is_active(&term, policy, &incomplete) {
                if term.translation.is_some() {
                    debug!(platform = %policy.platform, key = %term.key, "term excluded");
                }
                term.translation = None;
            }
            term
        })
        .collect()
}
