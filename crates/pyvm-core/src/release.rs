use serde::{Deserialize, Serialize};

use crate::version::ReleaseVersion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    Win32,
    Amd64,
}

impl Arch {
    pub fn detect() -> Self {
        if cfg!(target_arch = "x86") {
            Self::Win32
        } else {
            Self::Amd64
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Win32 => "win32",
            Self::Amd64 => "amd64",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipBootstrap {
    pub filename: String,
    pub download_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PythonRelease {
    pub version: ReleaseVersion,
    pub download_url: String,
    pub installer_filename: String,
    pub pip: PipBootstrap,
}

impl PythonRelease {
    pub fn version_number(&self) -> &str {
        self.version.as_str()
    }
}
