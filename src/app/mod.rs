pub mod config;

pub use config::{Config, OutputConfig, ProbeConfig};

use anyhow::Result;
use serde::Serialize;
use std::env;

use crate::integrations::ShellCommandRunner;
use crate::monitors::SysinfoFallback;
use crate::platform::{FixedPlatform, HostPlatform, PlatformDetector};
use crate::probe::{MemoryProbe, MemoryReading};

/// Where a reported value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingSource {
    Command,
    Sysinfo,
    None,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemoryReport {
    pub platform: String,
    pub memory: MemoryReading,
    pub source: ReadingSource,
}

pub struct App {
    pub config: Config,
}

impl App {
    pub fn new() -> Result<Self> {
        let mut config_path = env::current_exe()?;
        config_path.set_file_name("config.toml");

        let config = Config::load_or_default(&config_path)?;
        Ok(Self { config })
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub fn collect(&self) -> MemoryReport {
        let runner = ShellCommandRunner::new(self.config.probe.shell.clone());
        let commands = self.config.probe.commands();

        match self.config.probe.platform_override() {
            Some(id) => {
                log::info!("Platform pinned to {:?} by config", id);
                self.collect_with(MemoryProbe::with_commands(FixedPlatform::new(id), runner, commands))
            }
            None => self.collect_with(MemoryProbe::with_commands(HostPlatform::new(), runner, commands)),
        }
    }

    fn collect_with<P: PlatformDetector>(&self, probe: MemoryProbe<P, ShellCommandRunner>) -> MemoryReport {
        let platform = probe.platform_id();
        let memory = probe.get_memory();
        if memory.is_known() {
            return MemoryReport {
                platform,
                memory,
                source: ReadingSource::Command,
            };
        }

        if self.config.output.fallback_to_sysinfo {
            if let Some(bytes) = SysinfoFallback::new().total_memory() {
                log::info!("Command probe failed on {}, using sysinfo", platform);
                return MemoryReport {
                    platform,
                    memory: MemoryReading::new(bytes),
                    source: ReadingSource::Sysinfo,
                };
            }
        }

        MemoryReport {
            platform,
            memory,
            source: ReadingSource::None,
        }
    }

    pub fn render(&self, report: &MemoryReport) -> Result<String> {
        if self.config.output.json {
            Ok(serde_json::to_string(report)?)
        } else {
            Ok(report.memory.to_string())
        }
    }
}
