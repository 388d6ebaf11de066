use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use pyvm_core::PythonRelease;

use crate::bootstrap::bootstrap_commands;
use crate::fetch::ArtifactFetcher;
use crate::fs_ops::{flatten_dlls, remove_children_except};
use crate::process::ProcessRunner;

const SITE_PACKAGES: &str = "site-packages";

pub fn install_python3(
    release: &PythonRelease,
    staging_dir: &Path,
    final_dir: &Path,
    offline_path: &Path,
    fetcher: &dyn ArtifactFetcher,
    runner: &dyn ProcessRunner,
) -> Result<PathBuf> {
    fetcher
        .extract(offline_path, staging_dir)
        .with_context(|| format!("failed to unpack {}", offline_path.display()))?;

    // the archive nests the distribution one level deep under 'tools'
    let tools_dir = staging_dir.join("tools");
    if !tools_dir.is_dir() {
        return Err(anyhow!(
            "archive did not contain the expected 'tools' directory: {}",
            staging_dir.display()
        ));
    }
    fs::rename(&tools_dir, final_dir).with_context(|| {
        format!(
            "failed to promote {} to {}",
            tools_dir.display(),
            final_dir.display()
        )
    })?;
    fs::remove_dir_all(staging_dir)
        .with_context(|| format!("failed to remove {}", staging_dir.display()))?;

    let basename = stdlib_basename(release);
    let lib_dir = final_dir.join("Lib");
    let bundle_path = final_dir.join(format!("{basename}.zip"));
    fetcher
        .compress_children(&lib_dir, &bundle_path, &[SITE_PACKAGES])
        .with_context(|| {
            format!(
                "failed to bundle the standard library into {}",
                bundle_path.display()
            )
        })?;
    remove_children_except(&lib_dir, &[SITE_PACKAGES])?;

    let pth_path = final_dir.join(format!("{basename}._pth"));
    fs::write(&pth_path, path_config_contents(&basename))
        .with_context(|| format!("failed to write {}", pth_path.display()))?;

    flatten_dlls(final_dir).with_context(|| {
        format!(
            "failed to relocate native extension libraries in {}",
            final_dir.display()
        )
    })?;

    let pip_script = final_dir.join("Tools").join(&release.pip.filename);
    if !pip_script.exists() {
        fetcher
            .download(&release.pip.download_url, &pip_script)
            .with_context(|| format!("failed to download {}", release.pip.download_url))?;
    }

    let python_exe = final_dir.join("python.exe");
    for mut command in bootstrap_commands(release, &python_exe, &pip_script) {
        runner.run(&mut command, "failed to install pip")?;
    }

    std::path::absolute(final_dir)
        .with_context(|| format!("failed to resolve {}", final_dir.display()))
}

pub(crate) fn stdlib_basename(release: &PythonRelease) -> String {
    format!(
        "python{}{}",
        release.version.major(),
        release.version.minor()
    )
}

// the embeddable layout finds the zipped stdlib and site-packages through this file
pub(crate) fn path_config_contents(basename: &str) -> String {
    format!(
        "{basename}.zip\n.\n\n# Uncomment to run site.main() automatically\n#import site\n\nLib\\site-packages"
    )
}
