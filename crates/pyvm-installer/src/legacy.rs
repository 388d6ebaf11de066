use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};

use crate::bootstrap::{build_ensurepip_command, build_pip_self_upgrade_command};
use crate::fs_ops::flatten_dlls;
use crate::process::ProcessRunner;

pub fn build_installer_extract_command(artifact: &Path, target_dir: &Path) -> Command {
    let mut command = Command::new("msiexec");
    command
        .arg("/n")
        .arg("/a")
        .arg(artifact)
        .arg("/qn")
        .arg(format!("TARGETDIR={}", target_dir.display()));
    command
}

pub fn install_python2(
    target_dir: &Path,
    offline_path: &Path,
    runner: &dyn ProcessRunner,
) -> Result<PathBuf> {
    let offline_abs = std::path::absolute(offline_path)
        .with_context(|| format!("failed to resolve {}", offline_path.display()))?;
    let target_abs = std::path::absolute(target_dir)
        .with_context(|| format!("failed to resolve {}", target_dir.display()))?;

    runner.run(
        &mut build_installer_extract_command(&offline_abs, &target_abs),
        "failed to unpack the installer package",
    )?;

    flatten_dlls(&target_abs).with_context(|| {
        format!(
            "failed to relocate native extension libraries in {}",
            target_abs.display()
        )
    })?;

    let python_exe = target_abs.join("python.exe");
    runner.run(&mut build_ensurepip_command(&python_exe), "failed to install pip")?;
    runner.run(
        &mut build_pip_self_upgrade_command(&python_exe),
        "failed to upgrade pip",
    )?;

    Ok(target_abs)
}
