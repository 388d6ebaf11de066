use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::process::{escape_ps_single_quote, escape_ps_single_quote_path, run_command};

pub trait ArtifactFetcher {
    fn download(&self, url: &str, dest: &Path) -> Result<()>;
    fn extract(&self, archive: &Path, dest_dir: &Path) -> Result<()>;
    fn compress_children(&self, src_dir: &Path, dest_zip: &Path, exclude: &[&str]) -> Result<()>;
}

pub struct HttpArtifactFetcher {
    client: reqwest::blocking::Client,
}

impl HttpArtifactFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("pyvm/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(60))
            .build()
            .context("failed to build http client for artifact downloads")?;
        Ok(Self { client })
    }
}

impl ArtifactFetcher for HttpArtifactFetcher {
    fn download(&self, url: &str, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let part_path = dest.with_file_name(format!(
            "{}.part",
            dest.file_name()
                .and_then(|v| v.to_str())
                .unwrap_or("artifact")
        ));

        if let Err(err) = fetch_to_file(&self.client, url, &part_path) {
            let _ = fs::remove_file(&part_path);
            return Err(err);
        }

        if dest.exists() {
            fs::remove_file(dest)
                .with_context(|| format!("failed to replace existing file: {}", dest.display()))?;
        }
        fs::rename(&part_path, dest)
            .with_context(|| format!("failed to move download into place: {}", dest.display()))
    }

    fn extract(&self, archive: &Path, dest_dir: &Path) -> Result<()> {
        fs::create_dir_all(dest_dir)
            .with_context(|| format!("failed to create {}", dest_dir.display()))?;
        extract_zip(archive, dest_dir)
    }

    fn compress_children(&self, src_dir: &Path, dest_zip: &Path, exclude: &[&str]) -> Result<()> {
        let children = child_names_excluding(src_dir, exclude)?;
        if children.is_empty() {
            return Err(anyhow!(
                "nothing to compress in {} after exclusions",
                src_dir.display()
            ));
        }

        if dest_zip.exists() {
            fs::remove_file(dest_zip).with_context(|| {
                format!("failed to replace existing archive: {}", dest_zip.display())
            })?;
        }
        compress_children_command(src_dir, dest_zip, &children)
    }
}

fn fetch_to_file(client: &reqwest::blocking::Client, url: &str, dest: &Path) -> Result<()> {
    let mut response = client
        .get(url)
        .send()
        .with_context(|| format!("failed to request {url}"))?
        .error_for_status()
        .with_context(|| format!("download request was rejected: {url}"))?;

    let mut file =
        fs::File::create(dest).with_context(|| format!("failed to create {}", dest.display()))?;
    std::io::copy(&mut response, &mut file)
        .with_context(|| format!("failed to write download to {}", dest.display()))?;
    Ok(())
}

fn extract_zip(archive: &Path, dst: &Path) -> Result<()> {
    if cfg!(windows) {
        let mut command = Command::new("powershell");
        command.arg("-NoProfile").arg("-Command").arg(format!(
            "Expand-Archive -LiteralPath '{}' -DestinationPath '{}' -Force",
            escape_ps_single_quote_path(archive),
            escape_ps_single_quote_path(dst)
        ));
        if run_command(&mut command, "failed to extract zip archive with powershell").is_ok() {
            return Ok(());
        }
    }

    let mut unzip_command = Command::new("unzip");
    unzip_command.arg("-q").arg(archive).arg("-d").arg(dst);
    if run_command(&mut unzip_command, "failed to extract zip archive with unzip").is_ok() {
        return Ok(());
    }

    run_command(
        Command::new("tar")
            .arg("-xf")
            .arg(archive)
            .arg("-C")
            .arg(dst),
        "failed to extract zip archive with tar fallback",
    )
}

fn child_names_excluding(dir: &Path, exclude: &[&str]) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if exclude.contains(&name.as_str()) {
            continue;
        }
        names.push(name);
    }
    names.sort();
    Ok(names)
}

fn compress_children_command(src_dir: &Path, dest_zip: &Path, children: &[String]) -> Result<()> {
    let dest_abs = std::path::absolute(dest_zip)
        .with_context(|| format!("failed to resolve {}", dest_zip.display()))?;

    if cfg!(windows) {
        let paths = children
            .iter()
            .map(|name| format!("'{}'", escape_ps_single_quote(name)))
            .collect::<Vec<_>>()
            .join(",");
        let mut command = Command::new("powershell");
        command
            .current_dir(src_dir)
            .arg("-NoProfile")
            .arg("-Command")
            .arg(format!(
                "Compress-Archive -Force -Path {} -DestinationPath '{}'",
                paths,
                escape_ps_single_quote_path(&dest_abs)
            ));
        return run_command(&mut command, "failed to compress directory with powershell");
    }

    let mut command = Command::new("zip");
    command.current_dir(src_dir).arg("-qr").arg(&dest_abs);
    for name in children {
        command.arg(name);
    }
    run_command(&mut command, "failed to compress directory with zip")
}
