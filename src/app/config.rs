use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::probe::{ProbeCommands, DARWIN_COMMAND, LINUX_COMMAND};

// Written next to the executable when no config file exists there yet.
const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    pub probe: ProbeConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProbeConfig {
    /// Pins the platform identifier; empty means detect.
    #[serde(default)]
    pub platform: String,
    #[serde(default = "default_shell")]
    pub shell: String,
    #[serde(default = "default_darwin_command")]
    pub darwin_command: String,
    #[serde(default = "default_linux_command")]
    pub linux_command: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub json: bool,
    #[serde(default)]
    pub fallback_to_sysinfo: bool,
}

fn default_shell() -> String {
    "sh".to_string()
}

fn default_darwin_command() -> String {
    DARWIN_COMMAND.to_string()
}

fn default_linux_command() -> String {
    LINUX_COMMAND.to_string()
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            platform: String::new(),
            shell: default_shell(),
            darwin_command: default_darwin_command(),
            linux_command: default_linux_command(),
        }
    }
}

impl ProbeConfig {
    pub fn commands(&self) -> ProbeCommands {
        ProbeCommands {
            darwin: self.darwin_command.clone(),
            linux: self.linux_command.clone(),
        }
    }

    pub fn platform_override(&self) -> Option<&str> {
        let platform = self.platform.trim();
        (!platform.is_empty()).then_some(platform)
    }
}

impl Config {
    pub fn bundled() -> Result<Self> {
        toml::from_str(DEFAULT_CONFIG).context("Failed to parse bundled default config")
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file")?;

        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;

        Ok(())
    }

    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match Self::load(path.as_ref()) {
            Ok(config) => Ok(config),
            Err(load_err) => {
                log::warn!(
                    "Falling back to bundled default config: {}. A new config will be written to {:?} if possible.",
                    load_err,
                    path.as_ref()
                );

                let default_config = Self::bundled()?;

                if let Err(save_err) = default_config.save(path.as_ref()) {
                    log::warn!("Failed to write default config: {}", save_err);
                }

                Ok(default_config)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_config_matches_defaults() {
        assert_eq!(Config::bundled().unwrap(), Config::default());
    }

    #[test]
    fn missing_file_writes_bundled_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn save_then_load_keeps_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.probe.platform = "darwin".to_string();
        config.output.json = true;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.probe.platform_override(), Some("darwin"));
        assert!(loaded.output.json);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: Config = toml::from_str("[probe]\nshell = \"bash\"\n").unwrap();
        assert_eq!(config.probe.shell, "bash");
        assert_eq!(config.probe.commands(), ProbeCommands::default());
        assert_eq!(config.probe.platform_override(), None);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "probe = 3").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
