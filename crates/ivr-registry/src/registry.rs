//! Manufacturer configuration lookup.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use tracing::{debug, info};

use ivr_model::{DocumentType, ManufacturerConfig};

use crate::definition::load_definition;
use crate::error::RegistryError;

/// Reserved name for the fallback configuration callers may opt into when
/// a known manufacturer has no template for the requested document type.
pub const GENERIC_NAME: &str = "generic";

/// Normalizes manufacturer identity for lookup: case-insensitive and
/// tolerant of punctuation and extra whitespace, so "ACZ & Associates",
/// "acz associates", and "ACZ-Associates" all address the same entry.
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Immutable registry of manufacturer configurations, indexed by
/// normalized identity and document type. Safe for concurrent reads; it
/// hands out shared references and is never mutated after loading.
#[derive(Debug, Default)]
pub struct Registry {
    configs: BTreeMap<(String, DocumentType), ManufacturerConfig>,
    /// Normalized names (including aliases) of every known manufacturer,
    /// regardless of which document types it has templates for.
    known_names: BTreeSet<String>,
}

impl Registry {
    /// Loads every `*.toml` definition in a directory.
    pub fn load_dir(dir: &Path) -> Result<Self, RegistryError> {
        let mut registry = Self::default();
        let entries =
            std::fs::read_dir(dir).map_err(|source| RegistryError::io(dir, source))?;
        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        paths.sort();

        for path in paths {
            let config = load_definition(&path)?;
            debug!(
                manufacturer = %config.name,
                document_type = %config.document_type,
                template_id = %config.template_id,
                "loaded manufacturer definition"
            );
            registry.insert(config, &path)?;
        }
        info!(
            manufacturers = registry.known_names.len(),
            configs = registry.configs.len(),
            "manufacturer registry loaded"
        );
        Ok(registry)
    }

    /// Registers one configuration. Exposed for callers that assemble
    /// configs in code (tests, fixtures).
    pub fn register(&mut self, config: ManufacturerConfig) -> Result<(), RegistryError> {
        self.insert(config, Path::new("<inline>"))
    }

    fn insert(
        &mut self,
        config: ManufacturerConfig,
        path: &Path,
    ) -> Result<(), RegistryError> {
        let mut names = vec![config.name.clone()];
        names.extend(config.aliases.iter().cloned());
        let key_name = normalize_name(&config.name);
        let key = (key_name, config.document_type);
        if self.configs.contains_key(&key) {
            return Err(RegistryError::invalid(
                path,
                format!(
                    "duplicate definition for '{}' ({})",
                    config.name, config.document_type
                ),
            ));
        }
        for name in &names {
            self.known_names.insert(normalize_name(name));
        }
        for alias in &config.aliases {
            let alias_key = (normalize_name(alias), config.document_type);
            if alias_key != key && self.configs.contains_key(&alias_key) {
                return Err(RegistryError::invalid(
                    path,
                    format!(
                        "alias '{alias}' of '{}' collides with another definition",
                        config.name
                    ),
                ));
            }
            self.configs.insert(alias_key, config.clone());
        }
        self.configs.insert(key, config);
        Ok(())
    }

    /// Looks up the configuration for a manufacturer and document type.
    ///
    /// # Errors
    ///
    /// `ConfigurationNotFound` when the manufacturer is unknown under any
    /// name (fatal); `TemplateNotFound` when the manufacturer exists but
    /// has no template for this document type (recoverable).
    pub fn get_config(
        &self,
        manufacturer: &str,
        document_type: DocumentType,
    ) -> Result<&ManufacturerConfig, RegistryError> {
        let normalized = normalize_name(manufacturer);
        if let Some(config) = self.configs.get(&(normalized.clone(), document_type)) {
            return Ok(config);
        }
        if self.known_names.contains(&normalized) {
            return Err(RegistryError::TemplateNotFound {
                manufacturer: manufacturer.to_string(),
                document_type,
            });
        }
        Err(RegistryError::ConfigurationNotFound {
            manufacturer: manufacturer.to_string(),
        })
    }

    /// Like [`Registry::get_config`], but falls back to the `generic`
    /// definition on the recoverable no-template condition. An unknown
    /// manufacturer still fails.
    pub fn get_config_or_generic(
        &self,
        manufacturer: &str,
        document_type: DocumentType,
    ) -> Result<&ManufacturerConfig, RegistryError> {
        match self.get_config(manufacturer, document_type) {
            Ok(config) => Ok(config),
            Err(error) if error.is_recoverable() => {
                debug!(
                    manufacturer,
                    %document_type,
                    "no template for document type; using generic configuration"
                );
                self.configs
                    .get(&(GENERIC_NAME.to_string(), document_type))
                    .ok_or(error)
            }
            Err(error) => Err(error),
        }
    }

    /// All loaded configurations, deduplicated (aliases excluded), in
    /// name order.
    #[must_use]
    pub fn list(&self) -> Vec<&ManufacturerConfig> {
        let mut seen = BTreeSet::new();
        self.configs
            .values()
            .filter(|config| seen.insert((config.id, config.document_type)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_is_punctuation_tolerant() {
        assert_eq!(normalize_name("ACZ & Associates"), "acz associates");
        assert_eq!(normalize_name("acz-associates"), "acz associates");
        assert_eq!(normalize_name("  ACZ   ASSOCIATES "), "acz associates");
    }
}
