use anyhow::{anyhow, bail, Result};
use pyvm_core::PythonRelease;

use crate::VersionCatalog;

pub fn resolve<'a>(catalog: &'a VersionCatalog, token: &str) -> Result<&'a PythonRelease> {
    let normalized = token.trim().to_ascii_lowercase();

    if normalized == "latest" {
        let Some(latest) = catalog.stable.first() else {
            bail!("the version catalog has no stable releases");
        };
        return catalog
            .lookup(latest)
            .ok_or_else(|| anyhow!("catalog entry is missing for '{latest}'"));
    }

    if !catalog
        .all
        .iter()
        .any(|identifier| identifier == &normalized)
    {
        bail!("'{token}' is not a known python version");
    }

    catalog
        .lookup(&normalized)
        .ok_or_else(|| anyhow!("catalog entry is missing for '{normalized}'"))
}
