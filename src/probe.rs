//! Physical memory probe.
//!
//! Runs one platform-specific command and parses a single number out of its
//! output. Every failure collapses to [`MemoryReading::UNKNOWN`] on the
//! public path; [`MemoryProbe::try_get_memory`] keeps the cause for logging.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::integrations::CommandRunner;
use crate::platform::{PlatformDetector, PlatformKind};

pub const DARWIN_COMMAND: &str = "sysctl hw.physmem";
pub const LINUX_COMMAND: &str = "cat /proc/meminfo | grep MemTotal";

const PHYSMEM_PATTERN: &str = r"(?m)^\s*hw\.physmem:\s*(\d+)\s*$";
const MEM_TOTAL_PATTERN: &str = r"(?m)^\s*MemTotal:\s*(\d+)\s*kB\s*$";

/// A memory reading, or `-1` when it could not be determined.
///
/// On Darwin the value is the raw `hw.physmem` figure; on Linux it is the
/// `MemTotal` kB figure multiplied by 1024.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryReading(i64);

impl MemoryReading {
    pub const UNKNOWN: MemoryReading = MemoryReading(-1);

    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }

    pub fn is_known(self) -> bool {
        self != Self::UNKNOWN
    }
}

impl From<MemoryReading> for i64 {
    fn from(reading: MemoryReading) -> Self {
        reading.0
    }
}

impl fmt::Display for MemoryReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProbeError {
    #[error("unsupported platform: {0:?}")]
    UnsupportedPlatform(String),

    #[error("`{command}` exited with status {status}")]
    CommandFailed { command: String, status: i32 },

    #[error("no line matching {pattern} in command output")]
    Parse { pattern: &'static str },

    #[error("memory value {0} kB does not fit in a signed 64-bit integer once scaled")]
    Overflow(i64),
}

/// Commands issued for each supported platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeCommands {
    pub darwin: String,
    pub linux: String,
}

impl Default for ProbeCommands {
    fn default() -> Self {
        Self {
            darwin: DARWIN_COMMAND.to_string(),
            linux: LINUX_COMMAND.to_string(),
        }
    }
}

pub struct MemoryProbe<P, R> {
    platform: P,
    runner: R,
    commands: ProbeCommands,
}

impl<P: PlatformDetector, R: CommandRunner> MemoryProbe<P, R> {
    pub fn new(platform: P, runner: R) -> Self {
        Self::with_commands(platform, runner, ProbeCommands::default())
    }

    pub fn with_commands(platform: P, runner: R, commands: ProbeCommands) -> Self {
        Self {
            platform,
            runner,
            commands,
        }
    }

    pub fn platform_id(&self) -> String {
        self.platform.platform()
    }

    /// Best-effort memory reading. Never fails; returns
    /// [`MemoryReading::UNKNOWN`] instead.
    pub fn get_memory(&self) -> MemoryReading {
        match self.try_get_memory() {
            Ok(value) => MemoryReading::new(value),
            Err(e) => {
                log::debug!("Memory probe failed: {}", e);
                MemoryReading::UNKNOWN
            }
        }
    }

    /// Same as [`get_memory`](Self::get_memory) but keeps the failure cause.
    pub fn try_get_memory(&self) -> Result<i64, ProbeError> {
        let id = self.platform.platform();

        match PlatformKind::from_id(&id) {
            PlatformKind::Darwin => {
                let output = self.run_checked(&self.commands.darwin)?;
                parse_physmem(&output).ok_or(ProbeError::Parse {
                    pattern: PHYSMEM_PATTERN,
                })
            }
            PlatformKind::Linux => {
                let output = self.run_checked(&self.commands.linux)?;
                let kb = parse_mem_total_kb(&output).ok_or(ProbeError::Parse {
                    pattern: MEM_TOTAL_PATTERN,
                })?;
                kb.checked_mul(1024).ok_or(ProbeError::Overflow(kb))
            }
            PlatformKind::Other => Err(ProbeError::UnsupportedPlatform(id)),
        }
    }

    fn run_checked(&self, command: &str) -> Result<String, ProbeError> {
        let result = self.runner.run(command);
        if !result.success() {
            return Err(ProbeError::CommandFailed {
                command: command.to_string(),
                status: result.exit_status,
            });
        }
        Ok(result.output)
    }
}

/// Extracts the integer from a `hw.physmem: <integer>` line.
pub fn parse_physmem(text: &str) -> Option<i64> {
    capture_integer(PHYSMEM_PATTERN, text)
}

/// Extracts the integer from a `MemTotal: <integer> kB` line, unscaled.
pub fn parse_mem_total_kb(text: &str) -> Option<i64> {
    capture_integer(MEM_TOTAL_PATTERN, text)
}

fn capture_integer(pattern: &str, text: &str) -> Option<i64> {
    let re = Regex::new(pattern).ok()?;
    re.captures(text)?.get(1)?.as_str().parse().ok()
}
