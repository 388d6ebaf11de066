use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{bail, Result};

use crate::process::{escape_ps_single_quote_path, ProcessRunner};

pub fn build_symlink_command(alias_path: &Path, source_path: &Path) -> Command {
    if cfg!(windows) {
        let link = format!(
            "New-Item -Force -ItemType SymbolicLink -Path '{}' -Target '{}'",
            escape_ps_single_quote_path(alias_path),
            escape_ps_single_quote_path(source_path)
        );
        let mut command = Command::new("powershell.exe");
        command.arg("-NoProfile").arg("-Command").arg(format!(
            "Start-Process -WindowStyle Hidden -Verb RunAs -Wait powershell.exe -ArgumentList '-NoProfile','-Command','{}'",
            link.replace('\'', "''")
        ));
        command
    } else {
        let mut command = Command::new("ln");
        command.arg("-sfn").arg(source_path).arg(alias_path);
        command
    }
}

pub fn activate(
    alias_path: &Path,
    version: &str,
    source_path: &Path,
    runner: &dyn ProcessRunner,
) -> Result<()> {
    let is_directory = fs::metadata(source_path)
        .map(|metadata| metadata.is_dir())
        .unwrap_or(false);
    if !is_directory {
        bail!("python '{version}' is not installed; install it before activating");
    }

    runner.run(
        &mut build_symlink_command(alias_path, source_path),
        "failed to update the active python alias",
    )
}
