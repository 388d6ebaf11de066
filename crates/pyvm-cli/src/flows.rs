use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use pyvm_catalog::{current_unix_timestamp, CatalogCache, PythonOrgSource};
use pyvm_core::{Arch, ReleaseVersion};
use pyvm_installer::{
    activate, default_user_root, HttpArtifactFetcher, InstallPipeline, RootLayout, SystemRunner,
};

use crate::config::load_config;
use crate::render::{current_output_style, render_status_line, StageReporter};

pub fn resolve_layout(root_override: Option<PathBuf>) -> Result<RootLayout> {
    let root = match root_override {
        Some(root) => root,
        None => default_user_root()?,
    };
    Ok(RootLayout::new(root))
}

pub fn run_install(layout: &RootLayout, version: &str) -> Result<()> {
    let style = current_output_style();
    let config = load_config(&layout.config_path())?;
    layout.ensure_base_dirs()?;

    let source = PythonOrgSource::new(Arch::detect())?;
    let fetcher = HttpArtifactFetcher::new()?;
    let runner = SystemRunner;
    let reporter = StageReporter::new(style);

    let pipeline = InstallPipeline {
        layout,
        alias_path: config.effective_alias_path(layout)?,
        cache: CatalogCache::new(layout.catalog_cache_path(), config.catalog_ttl_secs()),
        source: &source,
        fetcher: &fetcher,
        runner: &runner,
        reporter: &reporter,
    };

    let outcome = pipeline.install(version);
    reporter.finish();
    let outcome = outcome?;

    println!(
        "{}",
        render_status_line(
            style,
            "done",
            &format!("python {} installed successfully", outcome.version)
        )
    );
    Ok(())
}

pub fn run_uninstall(layout: &RootLayout, version: &str) -> Result<()> {
    let target_dir = layout.version_dir(version);
    if !target_dir.is_dir() {
        println!("python {version} is not installed");
        return Ok(());
    }

    let config = load_config(&layout.config_path())?;
    let alias_path = config.effective_alias_path(layout)?;
    let alias_was_active = fs::read_link(&alias_path)
        .map(|alias_target| alias_target == target_dir)
        .unwrap_or(false);

    fs::remove_dir_all(&target_dir)
        .with_context(|| format!("failed to remove {}", target_dir.display()))?;

    println!("uninstalled python {version}");
    if alias_was_active {
        println!("note: the active alias pointed at this version; run `pyvm use <version>` to repoint it");
    }
    Ok(())
}

pub fn run_use(layout: &RootLayout, version: &str) -> Result<()> {
    let config = load_config(&layout.config_path())?;
    let alias_path = config.effective_alias_path(layout)?;
    let target_dir = layout.version_dir(version);

    activate(&alias_path, version, &target_dir, &SystemRunner)?;
    println!("python {version} is now active at {}", alias_path.display());
    Ok(())
}

pub fn run_list(layout: &RootLayout) -> Result<()> {
    for line in installed_version_lines(layout)? {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn installed_version_lines(layout: &RootLayout) -> Result<Vec<String>> {
    let versions_dir = layout.versions_dir();
    if !versions_dir.exists() {
        return Ok(vec!["No python versions installed".to_string()]);
    }

    let config = load_config(&layout.config_path())?;
    let alias_path = config.effective_alias_path(layout)?;
    let active_target = fs::read_link(&alias_path).ok();

    let mut versions = Vec::new();
    for entry in fs::read_dir(&versions_dir)
        .with_context(|| format!("failed to read {}", versions_dir.display()))?
    {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name.ends_with(".staging") {
            continue;
        }
        if let Ok(version) = ReleaseVersion::parse(&name) {
            versions.push(version);
        }
    }

    if versions.is_empty() {
        return Ok(vec!["No python versions installed".to_string()]);
    }

    versions.sort();
    versions.reverse();

    let mut lines = Vec::with_capacity(versions.len());
    for version in versions {
        let dir = layout.version_dir(version.as_str());
        let marker = if active_target.as_deref() == Some(dir.as_path()) {
            " (active)"
        } else {
            ""
        };
        lines.push(format!("{version}{marker}"));
    }
    Ok(lines)
}

pub fn run_available(layout: &RootLayout, include_unstable: bool) -> Result<()> {
    layout.ensure_base_dirs()?;
    let config = load_config(&layout.config_path())?;

    let source = PythonOrgSource::new(Arch::detect())?;
    let cache = CatalogCache::new(layout.catalog_cache_path(), config.catalog_ttl_secs());
    let catalog = cache.ensure_fresh(&source, current_unix_timestamp()?)?;

    let identifiers = if include_unstable {
        &catalog.all
    } else {
        &catalog.stable
    };
    for identifier in identifiers {
        println!("{identifier}");
    }
    Ok(())
}

pub fn run_doctor(layout: &RootLayout) -> Result<()> {
    let config = load_config(&layout.config_path())?;
    println!("root: {}", layout.root().display());
    println!("versions: {}", layout.versions_dir().display());
    println!("alias: {}", config.effective_alias_path(layout)?.display());
    println!("catalog cache: {}", layout.catalog_cache_path().display());
    println!("config: {}", layout.config_path().display());
    Ok(())
}
