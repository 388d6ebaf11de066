use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use pyvm_catalog::{current_unix_timestamp, resolve, CatalogCache, CatalogSource};

use crate::activation;
use crate::fetch::ArtifactFetcher;
use crate::layout::RootLayout;
use crate::process::ProcessRunner;
use crate::{legacy, modern};

pub trait InstallReporter {
    fn step(&self, message: &str);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl InstallReporter for SilentReporter {
    fn step(&self, _message: &str) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    pub version: String,
    pub installed_path: PathBuf,
    pub alias_path: PathBuf,
}

pub struct InstallPipeline<'a> {
    pub layout: &'a RootLayout,
    pub alias_path: PathBuf,
    pub cache: CatalogCache,
    pub source: &'a dyn CatalogSource,
    pub fetcher: &'a dyn ArtifactFetcher,
    pub runner: &'a dyn ProcessRunner,
    pub reporter: &'a dyn InstallReporter,
}

impl InstallPipeline<'_> {
    pub fn install(&self, token: &str) -> Result<InstallOutcome> {
        self.layout.ensure_base_dirs()?;

        self.reporter.step("refreshing version catalog");
        let now = current_unix_timestamp()?;
        let catalog = self.cache.ensure_fresh(self.source, now)?;
        let release = resolve(&catalog, token)?.clone();
        let version = release.version_number().to_string();

        let target_dir = self.layout.version_dir(&version);
        let offline_path = self
            .layout
            .offline_artifact_path(&release.installer_filename);

        // a reinstall discards the previous tree outright, no backup
        if target_dir.exists() {
            fs::remove_dir_all(&target_dir).with_context(|| {
                format!("failed to remove previous install: {}", target_dir.display())
            })?;
        }

        self.reporter
            .step(&format!("downloading {}", release.installer_filename));
        self.fetcher
            .download(&release.download_url, &offline_path)
            .with_context(|| format!("failed to download {}", release.download_url))?;

        self.reporter.step(&format!("installing python {version}"));
        let installed_path = if release.version.major() == 2 {
            legacy::install_python2(&target_dir, &offline_path, self.runner)?
        } else {
            let staging_dir = self.layout.staging_version_dir(&version);
            modern::install_python3(
                &release,
                &staging_dir,
                &target_dir,
                &offline_path,
                self.fetcher,
                self.runner,
            )?
        };

        if !installed_path.is_dir() {
            bail!("python {version} was not installed correctly; try again");
        }

        self.reporter.step("cleaning up");
        fs::remove_file(&offline_path).with_context(|| {
            format!(
                "failed to remove downloaded artifact: {}",
                offline_path.display()
            )
        })?;

        self.reporter.step(&format!("activating python {version}"));
        activation::activate(&self.alias_path, &version, &installed_path, self.runner)?;

        Ok(InstallOutcome {
            version,
            installed_path,
            alias_path: self.alias_path.clone(),
        })
    }
}
