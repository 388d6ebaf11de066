use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::{CatalogSource, VersionCatalog};

pub const DEFAULT_CATALOG_TTL_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct CatalogCache {
    path: PathBuf,
    ttl_secs: u64,
}

impl CatalogCache {
    pub fn new(path: impl Into<PathBuf>, ttl_secs: u64) -> Self {
        Self {
            path: path.into(),
            ttl_secs,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<VersionCatalog>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("failed to read catalog cache: {}", self.path.display())
                });
            }
        };

        let catalog = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse catalog cache: {}", self.path.display()))?;
        Ok(Some(catalog))
    }

    pub fn save(&self, catalog: &VersionCatalog) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let payload =
            serde_json::to_string_pretty(catalog).context("failed to serialize catalog cache")?;
        fs::write(&self.path, payload)
            .with_context(|| format!("failed to write catalog cache: {}", self.path.display()))
    }

    pub fn ensure_fresh(
        &self,
        source: &dyn CatalogSource,
        now_unix: u64,
    ) -> Result<VersionCatalog> {
        if let Some(catalog) = self.load()? {
            if !catalog.is_stale(now_unix) {
                return Ok(catalog);
            }
        }

        let snapshot = source.fetch()?;
        let catalog = VersionCatalog::from_snapshot(snapshot, now_unix, now_unix + self.ttl_secs)?;
        self.save(&catalog)?;
        Ok(catalog)
    }
}
