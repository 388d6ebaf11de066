use std::path::Path;
use std::process::Command;

use anyhow::{anyhow, Context, Result};

pub trait ProcessRunner {
    fn run(&self, command: &mut Command, context_message: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, command: &mut Command, context_message: &str) -> Result<()> {
        run_command(command, context_message)
    }
}

pub(crate) fn run_command(command: &mut Command, context_message: &str) -> Result<()> {
    let output = command
        .output()
        .with_context(|| format!("{context_message}: command failed to start"))?;
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    Err(anyhow!(
        "{context_message}: status={} stdout='{}' stderr='{}'",
        output.status,
        stdout.trim(),
        stderr.trim()
    ))
}

pub(crate) fn escape_ps_single_quote(value: &str) -> String {
    value.replace('\'', "''")
}

pub(crate) fn escape_ps_single_quote_path(path: &Path) -> String {
    path.as_os_str().to_string_lossy().replace('\'', "''")
}
