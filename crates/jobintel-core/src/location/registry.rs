//! Approved-city reference data.
//!
//! [`CityReference`] is the seam the classifier reads through, so the city
//! list can be swapped (built-in table, YAML file, test fixture) without
//! touching classification logic. [`ApprovedCityRegistry`] is the default
//! implementation and is immutable once built.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::reference::{BUILTIN_ALIASES, BUILTIN_CITIES};
use crate::ConfigError;

/// Read-only lookups over approved cities.
///
/// All name arguments are matched case-insensitively after trimming.
pub trait CityReference: Send + Sync {
    /// Canonical casing of `name` if it is an approved city.
    fn canonical_name(&self, name: &str) -> Option<&str>;

    /// Canonical name that the alias/misspelling `name` stands for.
    fn resolve_alias(&self, name: &str) -> Option<&str>;

    /// Full state name for an approved city.
    fn state_for(&self, city: &str) -> Option<&str>;

    /// Short state code (e.g. `KA`) for an approved city.
    fn state_code_for(&self, city: &str) -> Option<&str>;

    fn is_known_city(&self, name: &str) -> bool {
        self.canonical_name(name).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CityEntry {
    name: String,
    state: Option<String>,
    state_code: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ApprovedCityRegistry {
    cities: HashMap<String, CityEntry>,
    aliases: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct CitiesFile {
    cities: Vec<CityRecord>,
}

#[derive(Debug, Deserialize)]
struct CityRecord {
    name: String,
    state: Option<String>,
    state_code: Option<String>,
    #[serde(default)]
    aliases: Vec<String>,
}

fn key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl ApprovedCityRegistry {
    /// The compiled-in list of approved Indian cities and their aliases.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        for (name, state, code) in BUILTIN_CITIES {
            registry.cities.insert(
                key(name),
                CityEntry {
                    name: (*name).to_string(),
                    state: Some((*state).to_string()),
                    state_code: Some((*code).to_string()),
                },
            );
        }
        for (alias, canonical) in BUILTIN_ALIASES {
            registry
                .aliases
                .insert(key(alias), (*canonical).to_string());
        }
        registry
    }

    /// Load the registry from a YAML file of the form:
    ///
    /// ```yaml
    /// cities:
    ///   - name: Bengaluru
    ///     state: Karnataka
    ///     state_code: KA
    ///     aliases: [bangalore]
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CitiesFileIo {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate a registry from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CitiesFileParse`] on malformed YAML and
    /// [`ConfigError::InvalidRegistry`] on empty names, duplicate cities, or
    /// aliases that point at another approved city.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let file: CitiesFile = serde_yaml::from_str(content)?;
        if file.cities.is_empty() {
            return Err(ConfigError::InvalidRegistry(
                "cities list must not be empty".to_string(),
            ));
        }

        let mut registry = Self::default();
        for record in &file.cities {
            let name = record.name.trim();
            if name.is_empty() {
                return Err(ConfigError::InvalidRegistry(
                    "city name must be non-empty".to_string(),
                ));
            }
            let entry = CityEntry {
                name: name.to_string(),
                state: record.state.as_deref().map(str::trim).map(str::to_string),
                state_code: record
                    .state_code
                    .as_deref()
                    .map(|c| c.trim().to_ascii_uppercase()),
            };
            if registry.cities.insert(key(name), entry).is_some() {
                return Err(ConfigError::InvalidRegistry(format!(
                    "duplicate city: '{name}'"
                )));
            }
        }

        for record in &file.cities {
            let canonical = record.name.trim();
            for alias in &record.aliases {
                let alias_key = key(alias);
                if alias_key.is_empty() || alias_key == key(canonical) {
                    continue;
                }
                if registry.cities.contains_key(&alias_key) {
                    return Err(ConfigError::InvalidRegistry(format!(
                        "alias '{alias}' of '{canonical}' is itself an approved city"
                    )));
                }
                if let Some(previous) = registry.aliases.insert(alias_key, canonical.to_string()) {
                    if previous != canonical {
                        return Err(ConfigError::InvalidRegistry(format!(
                            "alias '{alias}' maps to both '{previous}' and '{canonical}'"
                        )));
                    }
                }
            }
        }

        Ok(registry)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    fn entry(&self, name: &str) -> Option<&CityEntry> {
        self.cities.get(&key(name))
    }
}

impl CityReference for ApprovedCityRegistry {
    fn canonical_name(&self, name: &str) -> Option<&str> {
        self.entry(name).map(|e| e.name.as_str())
    }

    fn resolve_alias(&self, name: &str) -> Option<&str> {
        self.aliases.get(&key(name)).map(String::as_str)
    }

    fn state_for(&self, city: &str) -> Option<&str> {
        self.entry(city).and_then(|e| e.state.as_deref())
    }

    fn state_code_for(&self, city: &str) -> Option<&str> {
        self.entry(city).and_then(|e| e.state_code.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_resolves_aliases_case_insensitively() {
        let registry = ApprovedCityRegistry::builtin();
        assert_eq!(registry.resolve_alias("  BANGALORE "), Some("Bengaluru"));
        assert_eq!(registry.resolve_alias("Gurgaon"), Some("Gurugram"));
        assert_eq!(registry.resolve_alias("Bengaluru"), None);
    }

    #[test]
    fn builtin_aliases_all_point_at_approved_cities() {
        let registry = ApprovedCityRegistry::builtin();
        for (alias, canonical) in BUILTIN_ALIASES {
            assert!(
                registry.is_known_city(canonical),
                "alias '{alias}' points at unknown city '{canonical}'"
            );
        }
    }

    #[test]
    fn builtin_knows_state_for_city() {
        let registry = ApprovedCityRegistry::builtin();
        assert_eq!(registry.state_for("pune"), Some("Maharashtra"));
        assert_eq!(registry.state_code_for("Chennai"), Some("TN"));
        assert_eq!(registry.canonical_name("greater   noida"), Some("Greater Noida"));
    }

    #[test]
    fn yaml_registry_loads_cities_and_aliases() {
        let yaml = "cities:\n  - name: Bengaluru\n    state: Karnataka\n    state_code: ka\n    aliases: [Bangalore, blr]\n  - name: Pune\n";
        let registry = ApprovedCityRegistry::from_yaml_str(yaml).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.resolve_alias("blr"), Some("Bengaluru"));
        assert_eq!(registry.state_code_for("bengaluru"), Some("KA"));
        assert_eq!(registry.state_for("Pune"), None);
    }

    #[test]
    fn yaml_registry_rejects_duplicate_city() {
        let yaml = "cities:\n  - name: Pune\n  - name: pune\n";
        let err = ApprovedCityRegistry::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRegistry(_)));
    }

    #[test]
    fn yaml_registry_rejects_alias_that_is_a_city() {
        let yaml = "cities:\n  - name: Pune\n    aliases: [Mumbai]\n  - name: Mumbai\n";
        let err = ApprovedCityRegistry::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRegistry(_)));
    }

    #[test]
    fn yaml_registry_rejects_empty_list() {
        let err = ApprovedCityRegistry::from_yaml_str("cities: []\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRegistry(_)));
    }

    #[test]
    fn yaml_registry_reports_parse_errors() {
        let err = ApprovedCityRegistry::from_yaml_str("cities: [").unwrap_err();
        assert!(matches!(err, ConfigError::CitiesFileParse(_)));
    }
}
