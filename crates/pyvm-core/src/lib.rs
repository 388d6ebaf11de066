mod release;
mod version;

pub use release::{Arch, PipBootstrap, PythonRelease};
pub use version::ReleaseVersion;
