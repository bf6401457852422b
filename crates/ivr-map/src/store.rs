//! Curated-mapping persistence.
//!
//! Accepted [`FieldMapping`] rows live in JSON files named
//! `{manufacturer_id}_{template_id}.json` under a base directory, one
//! file per manufacturer template. The store is append-only and
//! idempotent on the natural key, so re-running a curation batch after a
//! partial failure never duplicates rows.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use ivr_model::FieldMapping;

/// File-system store for curated field mappings.
#[derive(Debug, Clone)]
pub struct MappingStore {
    base_dir: PathBuf,
}

impl MappingStore {
    /// Opens (and creates if needed) a store rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)
            .with_context(|| format!("failed to create mapping store: {}", base_dir.display()))?;
        Ok(Self { base_dir })
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// All rows for one manufacturer template; empty when none persisted.
    pub fn load(&self, manufacturer_id: u32, template_id: &str) -> Result<Vec<FieldMapping>> {
        let path = self.file_path(manufacturer_id, template_id);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read mappings from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse mappings from {}", path.display()))
    }

    /// Appends a row unless its natural key already exists. Returns true
    /// when a row was actually written.
    pub fn insert(&self, mapping: &FieldMapping) -> Result<bool> {
        let mut rows = self.load(mapping.manufacturer_id, &mapping.template_id)?;
        if rows.iter().any(|row| row.natural_key() == mapping.natural_key()) {
            debug!(
                source_field = %mapping.source_field,
                target = %mapping.target_canonical_path,
                "duplicate mapping key; insert is a no-op"
            );
            return Ok(false);
        }
        rows.push(mapping.clone());
        self.write(mapping.manufacturer_id, &mapping.template_id, &rows)?;
        Ok(true)
    }

    /// Inserts a batch; returns how many rows were new.
    pub fn insert_all(&self, mappings: &[FieldMapping]) -> Result<usize> {
        let mut inserted = 0;
        for mapping in mappings {
            if self.insert(mapping)? {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    /// Increments `usage_count` on the row matching the source and target
    /// fields. Returns true when a row was found.
    pub fn record_use(
        &self,
        manufacturer_id: u32,
        template_id: &str,
        source_field: &str,
        target_canonical_path: &str,
    ) -> Result<bool> {
        let mut rows = self.load(manufacturer_id, template_id)?;
        let Some(row) = rows.iter_mut().find(|row| {
            row.source_field == source_field
                && row.target_canonical_path == target_canonical_path
        }) else {
            return Ok(false);
        };
        row.usage_count += 1;
        self.write(manufacturer_id, template_id, &rows)?;
        Ok(true)
    }

    fn write(
        &self,
        manufacturer_id: u32,
        template_id: &str,
        rows: &[FieldMapping],
    ) -> Result<()> {
        let path = self.file_path(manufacturer_id, template_id);
        let json = serde_json::to_string_pretty(rows)
            .with_context(|| format!("failed to serialize mappings for {}", path.display()))?;
        fs::write(&path, json)
            .with_context(|| format!("failed to write mappings to {}", path.display()))?;
        Ok(())
    }

    fn file_path(&self, manufacturer_id: u32, template_id: &str) -> PathBuf {
        let template = sanitize_component(template_id);
        self.base_dir
            .join(format!("{manufacturer_id}_{template}.json"))
    }
}

fn sanitize_component(raw: &str) -> String {
    raw.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '-' })
        .collect()
}
