use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootLayout {
    root: PathBuf,
}

impl RootLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn versions_dir(&self) -> PathBuf {
        self.root.join("versions")
    }

    pub fn version_dir(&self, version: &str) -> PathBuf {
        self.versions_dir().join(version)
    }

    pub fn staging_version_dir(&self, version: &str) -> PathBuf {
        self.versions_dir().join(format!("{version}.staging"))
    }

    pub fn offline_artifact_path(&self, installer_filename: &str) -> PathBuf {
        self.root.join(installer_filename)
    }

    pub fn state_dir(&self) -> PathBuf {
        self.root.join("state")
    }

    pub fn catalog_cache_path(&self) -> PathBuf {
        self.state_dir().join("catalog.json")
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn default_alias_path(&self) -> Result<PathBuf> {
        if cfg!(windows) {
            let app_data = std::env::var("LOCALAPPDATA")
                .context("LOCALAPPDATA is not set; cannot resolve the alias path")?;
            return Ok(PathBuf::from(app_data).join("Python"));
        }

        Ok(self.root.join("current"))
    }

    pub fn ensure_base_dirs(&self) -> Result<()> {
        for dir in [self.versions_dir(), self.state_dir()] {
            fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        Ok(())
    }
}

pub fn default_user_root() -> Result<PathBuf> {
    if cfg!(windows) {
        let app_data = std::env::var("LOCALAPPDATA")
            .context("LOCALAPPDATA is not set; cannot resolve Windows user root")?;
        return Ok(PathBuf::from(app_data).join("pyvm"));
    }

    let home = std::env::var("HOME").context("HOME is not set; cannot resolve user root")?;
    Ok(PathBuf::from(home).join(".pyvm"))
}
