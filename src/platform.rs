use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating-system family the probe knows how to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    Darwin,
    Linux,
    Other,
}

impl PlatformKind {
    /// Maps a lowercase platform identifier. Only the exact strings
    /// `"darwin"` and `"linux"` are recognised.
    pub fn from_id(id: &str) -> Self {
        match id {
            "darwin" => PlatformKind::Darwin,
            "linux" => PlatformKind::Linux,
            _ => PlatformKind::Other,
        }
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlatformKind::Darwin => "darwin",
            PlatformKind::Linux => "linux",
            PlatformKind::Other => "other",
        };
        f.write_str(name)
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait PlatformDetector {
    /// Lowercase identifier of the running platform, e.g. `"darwin"`.
    fn platform(&self) -> String;
}

/// Detects the platform the binary was compiled for.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostPlatform;

impl HostPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformDetector for HostPlatform {
    fn platform(&self) -> String {
        match std::env::consts::OS {
            "macos" => "darwin".to_string(),
            "linux" | "android" => "linux".to_string(),
            other => other.to_lowercase(),
        }
    }
}

/// Always reports the same identifier.
#[derive(Debug, Clone)]
pub struct FixedPlatform(String);

impl FixedPlatform {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl PlatformDetector for FixedPlatform {
    fn platform(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ids_map_to_their_kind() {
        assert_eq!(PlatformKind::from_id("darwin"), PlatformKind::Darwin);
        assert_eq!(PlatformKind::from_id("linux"), PlatformKind::Linux);
    }

    #[test]
    fn anything_else_is_other() {
        for id in ["abc", "", "sunos5", "Linux", "linux2", "win32"] {
            assert_eq!(PlatformKind::from_id(id), PlatformKind::Other, "id {id:?}");
        }
    }

    #[test]
    fn host_platform_is_lowercase() {
        let id = HostPlatform::new().platform();
        assert_eq!(id, id.to_lowercase());
        #[cfg(target_os = "linux")]
        assert_eq!(id, "linux");
        #[cfg(target_os = "macos")]
        assert_eq!(id, "darwin");
    }

    #[test]
    fn fixed_platform_echoes_its_id() {
        assert_eq!(FixedPlatform::new("abc").platform(), "abc");
    }
}
