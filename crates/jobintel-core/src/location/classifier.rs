//! Raw location string → [`ValidationVerdict`].
//!
//! Rules are applied in order and the first match wins:
//!
//! 1. null, empty, blank (or a CSV null marker) → `NullOrEmpty`
//! 2. any comma fragment naming a US state code, state, city, or the US → `UsLocation`
//! 3. any fragment naming a foreign country/city or a remote marker → `International`
//! 4. the leading fragment is resolved through the alias map
//! 5. an approved city (as given or resolved) → valid, canonical casing
//! 6. anything else → `Unrecognized`
//!
//! Short codes match a whole fragment in any case (`", oh"`), or an
//! upper-case word inside a longer fragment (`"Cincinnati OH"`). Names match
//! as whole-word sequences, never as substrings, so `Indore` is not `IN` and
//! `Chennai` is not `CA`. A short code equal to the leading city's own Indian
//! state code (`Chennai, TN`, `Dehradun, UK`) is never treated as foreign.

use std::sync::Arc;

use super::reference::{
    INDIA_MARKERS, INTERNATIONAL_CODES, INTERNATIONAL_NAMES, REMOTE_MARKERS, US_CITIES,
    US_COUNTRY_CODES, US_COUNTRY_NAMES, US_STATE_CODES, US_STATE_NAMES,
};
use super::registry::{ApprovedCityRegistry, CityReference};
use super::verdict::{RejectionCategory, ValidationVerdict};

const NULL_MARKERS: &[&str] = &["nan", "null", "none", "n/a"];

/// One comma-separated piece of a raw location.
struct Fragment<'a> {
    text: &'a str,
    words: Vec<&'a str>,
}

impl<'a> Fragment<'a> {
    fn new(text: &'a str) -> Self {
        let words = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        Self { text, words }
    }

    fn is_single(&self, code: &str) -> bool {
        self.words.len() == 1 && self.words[0].eq_ignore_ascii_case(code)
    }

    fn matches_code(&self, code: &str) -> bool {
        if self.words.len() == 1 {
            return self.is_single(code);
        }
        self.words.iter().any(|w| *w == code)
    }

    fn matches_phrase(&self, phrase: &str) -> bool {
        let needle: Vec<&str> = phrase
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        if needle.is_empty() || needle.len() > self.words.len() {
            return false;
        }
        self.words.windows(needle.len()).any(|window| {
            window
                .iter()
                .zip(&needle)
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
        })
    }

    fn is_india_marker(&self) -> bool {
        INDIA_MARKERS.iter().any(|m| self.is_single(m))
    }
}

/// Maps raw location text to a verdict using an injected city reference.
///
/// Cheap to share: wrap it in an `Arc` and hand the same instance to every
/// enforcement point.
#[derive(Clone)]
pub struct LocationClassifier {
    reference: Arc<dyn CityReference>,
}

impl std::fmt::Debug for LocationClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationClassifier").finish_non_exhaustive()
    }
}

impl Default for LocationClassifier {
    fn default() -> Self {
        Self::with_builtin_registry()
    }
}

impl LocationClassifier {
    #[must_use]
    pub fn new(reference: Arc<dyn CityReference>) -> Self {
        Self { reference }
    }

    #[must_use]
    pub fn with_builtin_registry() -> Self {
        Self::new(Arc::new(ApprovedCityRegistry::builtin()))
    }

    #[must_use]
    pub fn reference(&self) -> &dyn CityReference {
        self.reference.as_ref()
    }

    /// Classify one raw location. Total: every input yields exactly one verdict.
    #[must_use]
    pub fn classify(&self, raw: Option<&str>) -> ValidationVerdict {
        let Some(text) = raw.map(str::trim).filter(|t| !is_null_text(t)) else {
            return ValidationVerdict::rejected(
                RejectionCategory::NullOrEmpty,
                "empty or null location",
            );
        };

        let fragments: Vec<Fragment<'_>> = text
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(Fragment::new)
            .collect();
        let Some(leading) = fragments.first() else {
            return ValidationVerdict::rejected(
                RejectionCategory::NullOrEmpty,
                "empty or null location",
            );
        };

        let canonical = self.resolve_city(leading.text);
        let own_state_code = canonical.and_then(|c| self.reference.state_code_for(c));

        // Foreign checks skip India markers and the city's own state code.
        let foreign: Vec<&Fragment<'_>> = fragments
            .iter()
            .enumerate()
            .filter(|(idx, frag)| {
                let own_code = *idx > 0 && own_state_code.is_some_and(|code| frag.is_single(code));
                !own_code && !frag.is_india_marker()
            })
            .map(|(_, frag)| frag)
            .collect();

        if let Some(verdict) = us_verdict(&foreign) {
            return verdict;
        }
        if let Some(verdict) = international_verdict(&foreign) {
            return verdict;
        }

        let Some(city) = canonical else {
            return ValidationVerdict::rejected(
                RejectionCategory::Unrecognized,
                format!("not an approved Indian city: {}", leading.text),
            );
        };

        let state = self
            .reference
            .state_for(city)
            .map(str::to_string)
            .or_else(|| {
                fragments
                    .get(1)
                    .filter(|f| !f.is_india_marker())
                    .map(|f| f.text.to_string())
            });

        ValidationVerdict::valid(city, state)
    }

    /// Canonical name for the leading fragment, via the alias map or directly.
    fn resolve_city(&self, city: &str) -> Option<&str> {
        let resolved = self.reference.resolve_alias(city).unwrap_or(city);
        self.reference
            .canonical_name(resolved)
            .or_else(|| self.reference.canonical_name(city))
    }
}

fn is_null_text(text: &str) -> bool {
    text.is_empty() || NULL_MARKERS.iter().any(|m| text.eq_ignore_ascii_case(m))
}

fn us_verdict(fragments: &[&Fragment<'_>]) -> Option<ValidationVerdict> {
    let find_code = |codes: &'static [&'static str]| {
        fragments
            .iter()
            .find_map(|frag| codes.iter().find(|c| frag.matches_code(c)))
    };
    let find_name = |names: &'static [&'static str]| {
        fragments
            .iter()
            .find_map(|frag| names.iter().find(|n| frag.matches_phrase(n)))
    };

    let detail = if let Some(code) = find_code(US_STATE_CODES) {
        format!("US state code detected: {code}")
    } else if let Some(code) = find_code(US_COUNTRY_CODES) {
        format!("US country detected: {code}")
    } else if let Some(name) = find_name(US_STATE_NAMES) {
        format!("US state detected: {name}")
    } else if let Some(name) = find_name(US_CITIES) {
        format!("US city detected: {name}")
    } else if let Some(name) = find_name(US_COUNTRY_NAMES) {
        format!("US country detected: {name}")
    } else {
        return None;
    };
    Some(ValidationVerdict::rejected(
        RejectionCategory::UsLocation,
        detail,
    ))
}

fn international_verdict(fragments: &[&Fragment<'_>]) -> Option<ValidationVerdict> {
    for frag in fragments {
        let hit = INTERNATIONAL_CODES
            .iter()
            .find(|c| frag.matches_code(c))
            .or_else(|| INTERNATIONAL_NAMES.iter().find(|n| frag.matches_phrase(n)));
        if let Some(name) = hit {
            return Some(ValidationVerdict::rejected(
                RejectionCategory::International,
                format!("international location detected: {name}"),
            ));
        }
    }
    for frag in fragments {
        if let Some(marker) = REMOTE_MARKERS.iter().find(|m| frag.matches_phrase(m)) {
            return Some(ValidationVerdict::remote(format!(
                "remote or non-local posting: {marker}"
            )));
        }
    }
    None
}

#[cfg(test)]
#[path = "classifier_test.rs"]
mod tests;
