use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Context, Result};
use pyvm_core::{Arch, PipBootstrap, PythonRelease, ReleaseVersion};

use crate::{CatalogSnapshot, CatalogSource};

pub const PYTHON_FTP_BASE: &str = "https://www.python.org/ftp/python";
pub const PIP_BOOTSTRAP_URL: &str = "https://bootstrap.pypa.io/get-pip.py";

const USER_AGENT: &str = concat!("pyvm/", env!("CARGO_PKG_VERSION"));

pub struct PythonOrgSource {
    client: reqwest::blocking::Client,
    index_url: String,
    arch: Arch,
}

impl PythonOrgSource {
    pub fn new(arch: Arch) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(60))
            .build()
            .context("failed to build http client for the release index")?;

        Ok(Self {
            client,
            index_url: format!("{PYTHON_FTP_BASE}/"),
            arch,
        })
    }
}

impl CatalogSource for PythonOrgSource {
    fn fetch(&self) -> Result<CatalogSnapshot> {
        let body = self
            .client
            .get(&self.index_url)
            .send()
            .with_context(|| format!("failed to fetch release index: {}", self.index_url))?
            .error_for_status()
            .with_context(|| format!("release index request was rejected: {}", self.index_url))?
            .text()
            .context("failed to read release index body")?;

        Ok(build_snapshot(parse_release_index(&body), self.arch))
    }
}

pub(crate) fn parse_release_index(html: &str) -> Vec<ReleaseVersion> {
    let mut versions = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find("href=\"") {
        rest = &rest[start + 6..];
        let Some(end) = rest.find('"') else {
            break;
        };
        let target = &rest[..end];
        rest = &rest[end..];

        // release directories link as "X.Y.Z/"; everything else is noise
        let Some(name) = target.strip_suffix('/') else {
            continue;
        };
        if let Ok(version) = ReleaseVersion::parse(name) {
            versions.push(version);
        }
    }
    versions
}

pub(crate) fn build_snapshot(mut versions: Vec<ReleaseVersion>, arch: Arch) -> CatalogSnapshot {
    versions.sort();
    versions.dedup();
    versions.reverse();

    let mut all = Vec::with_capacity(versions.len());
    let mut stable = Vec::new();
    let mut unstable = Vec::new();
    let mut releases = BTreeMap::new();
    for version in &versions {
        let identifier = version.as_str().to_string();
        all.push(identifier.clone());
        if version.is_pre_release() {
            unstable.push(identifier.clone());
        } else {
            stable.push(identifier.clone());
        }
        releases.insert(identifier, release_for_version(version, arch));
    }

    CatalogSnapshot {
        all,
        stable,
        unstable,
        releases,
    }
}

pub fn release_for_version(version: &ReleaseVersion, arch: Arch) -> PythonRelease {
    let installer_filename = if version.major() == 2 {
        match arch {
            Arch::Win32 => format!("python-{version}.msi"),
            Arch::Amd64 => format!("python-{version}.amd64.msi"),
        }
    } else {
        format!("python-{version}-embed-{}.zip", arch.as_str())
    };

    PythonRelease {
        version: version.clone(),
        download_url: format!("{PYTHON_FTP_BASE}/{version}/{installer_filename}"),
        installer_filename,
        pip: PipBootstrap {
            filename: "get-pip.py".to_string(),
            download_url: PIP_BOOTSTRAP_URL.to_string(),
        },
    }
}
