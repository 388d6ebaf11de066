mod cache;
mod resolver;
mod source;

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use pyvm_core::PythonRelease;
use serde::{Deserialize, Serialize};

pub use cache::{CatalogCache, DEFAULT_CATALOG_TTL_SECS};
pub use resolver::resolve;
pub use source::{release_for_version, PythonOrgSource, PIP_BOOTSTRAP_URL, PYTHON_FTP_BASE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub all: Vec<String>,
    pub stable: Vec<String>,
    pub unstable: Vec<String>,
    pub releases: BTreeMap<String, PythonRelease>,
}

pub trait CatalogSource {
    fn fetch(&self) -> Result<CatalogSnapshot>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionCatalog {
    pub all: Vec<String>,
    pub stable: Vec<String>,
    pub unstable: Vec<String>,
    pub releases: BTreeMap<String, PythonRelease>,
    pub fetched_at_unix: u64,
    pub expires_at_unix: u64,
}

impl VersionCatalog {
    pub fn from_snapshot(
        snapshot: CatalogSnapshot,
        fetched_at_unix: u64,
        expires_at_unix: u64,
    ) -> Result<Self> {
        for identifier in &snapshot.all {
            if !snapshot.releases.contains_key(identifier) {
                return Err(anyhow!(
                    "catalog snapshot is missing a release entry for '{identifier}'"
                ));
            }
        }

        Ok(Self {
            all: snapshot.all,
            stable: snapshot.stable,
            unstable: snapshot.unstable,
            releases: snapshot.releases,
            fetched_at_unix,
            expires_at_unix,
        })
    }

    pub fn is_stale(&self, now_unix: u64) -> bool {
        now_unix > self.expires_at_unix
    }

    pub fn lookup(&self, identifier: &str) -> Option<&PythonRelease> {
        self.releases.get(identifier)
    }
}

pub fn current_unix_timestamp() -> Result<u64> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system time is before unix epoch")?
        .as_secs())
}
