use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

pub(crate) fn promote_children(src_dir: &Path, dest_dir: &Path) -> Result<()> {
    for entry in
        fs::read_dir(src_dir).with_context(|| format!("failed to read {}", src_dir.display()))?
    {
        let entry = entry?;
        let from = entry.path();
        let to = dest_dir.join(entry.file_name());
        fs::rename(&from, &to)
            .with_context(|| format!("failed to move {} to {}", from.display(), to.display()))?;
    }
    Ok(())
}

// native extension loaders expect the DLLs next to python.exe
pub(crate) fn flatten_dlls(install_dir: &Path) -> Result<()> {
    let dlls_dir = install_dir.join("DLLs");
    promote_children(&dlls_dir, install_dir)?;
    fs::remove_dir_all(&dlls_dir)
        .with_context(|| format!("failed to remove {}", dlls_dir.display()))
}

pub(crate) fn remove_children_except(dir: &Path, keep: &[&str]) -> Result<()> {
    for entry in fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if keep.contains(&name.as_str()) {
            continue;
        }

        let path = entry.path();
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(&path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
        } else {
            fs::remove_file(&path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
        }
    }
    Ok(())
}
