use std::path::Path;
use std::process::Command;

use pyvm_core::PythonRelease;

// releases where running get-pip.py directly fails (pypa/pip#5292)
pub const DEFECTIVE_BOOTSTRAP_VERSIONS: &[&str] = &["3.5.2", "3.5.2.1", "3.5.2.2", "3.6.0"];

pub fn build_ensurepip_command(python_exe: &Path) -> Command {
    let mut command = Command::new(python_exe);
    command.arg("-m").arg("ensurepip").arg("--default-pip");
    command
}

pub fn build_pip_self_upgrade_command(python_exe: &Path) -> Command {
    let mut command = Command::new(python_exe);
    command
        .arg("-m")
        .arg("pip")
        .arg("install")
        .arg("--upgrade")
        .arg("pip");
    command
}

pub fn build_pip_script_command(python_exe: &Path, pip_script: &Path) -> Command {
    let mut command = Command::new(python_exe);
    command.arg(pip_script);
    command
}

pub fn build_easy_install_bootstrap_command(python_exe: &Path) -> Command {
    let mut command = Command::new(python_exe);
    command
        .arg("-m")
        .arg("easy_install")
        .arg("pip")
        .arg("easy_install");
    command
}

pub fn bootstrap_commands(
    release: &PythonRelease,
    python_exe: &Path,
    pip_script: &Path,
) -> Vec<Command> {
    let bootstrap = if DEFECTIVE_BOOTSTRAP_VERSIONS.contains(&release.version_number()) {
        build_easy_install_bootstrap_command(python_exe)
    } else {
        build_pip_script_command(python_exe, pip_script)
    };
    vec![bootstrap, build_pip_self_upgrade_command(python_exe)]
}
