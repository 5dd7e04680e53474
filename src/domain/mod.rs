//! Core value types: packages and install batches

use serde::Deserialize;
use std::fmt;

/// Kind of installable package, mirroring the sections of the remote index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    Plugin,
    Theme,
}

impl PackageKind {
    /// Default install root for packages of this kind, relative to the site root
    pub fn default_install_root(self) -> &'static str {
        match self {
            PackageKind::Plugin => "user/plugins",
            PackageKind::Theme => "user/themes",
        }
    }
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageKind::Plugin => write!(f, "plugin"),
            PackageKind::Theme => write!(f, "theme"),
        }
    }
}

/// A resolved, installable package. Immutable once produced by the registry.
#[derive(Debug, Clone, Deserialize)]
pub struct Package {
    pub name: String,
    pub version: String,
    pub slug: String,
    /// Archive download URL
    pub download: String,
    /// Destination path relative to the install root
    #[serde(default)]
    pub install_path: Option<String>,
    #[serde(skip)]
    pub kind: Option<PackageKind>,
}

impl Package {
    /// Destination path relative to the install root, falling back to the
    /// conventional location for the package kind.
    pub fn install_path(&self) -> String {
        match &self.install_path {
            Some(path) => path.clone(),
            None => {
                let root = self
                    .kind
                    .unwrap_or(PackageKind::Plugin)
                    .default_install_root();
                format!("{root}/{}", self.slug)
            }
        }
    }
}

/// The working set for one install invocation: resolvable packages in
/// iteration order (plugins before themes), plus the identifiers that were
/// not present in the remote index.
#[derive(Debug, Default)]
pub struct InstallBatch {
    pub packages: Vec<Package>,
    pub not_found: Vec<String>,
}

impl InstallBatch {
    /// Number of packages that can actually be installed
    pub fn total(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
