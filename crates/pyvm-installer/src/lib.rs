mod activation;
mod bootstrap;
mod fetch;
mod fs_ops;
mod layout;
mod legacy;
mod modern;
mod pipeline;
mod process;

pub use activation::{activate, build_symlink_command};
pub use bootstrap::{
    bootstrap_commands, build_easy_install_bootstrap_command, build_ensurepip_command,
    build_pip_script_command, build_pip_self_upgrade_command, DEFECTIVE_BOOTSTRAP_VERSIONS,
};
pub use fetch::{ArtifactFetcher, HttpArtifactFetcher};
pub use layout::{default_user_root, RootLayout};
pub use legacy::{build_installer_extract_command, install_python2};
pub use modern::install_python3;
pub use pipeline::{InstallOutcome, InstallPipeline, InstallReporter, SilentReporter};
pub use process::{ProcessRunner, SystemRunner};
