//! Best-effort physical memory probe for cluster hosts.
//!
//! [`MemoryProbe::get_memory`] asks `sysctl` on Darwin or `/proc/meminfo` on
//! Linux and returns [`MemoryReading::UNKNOWN`] (`-1`) whenever the answer
//! cannot be obtained.

pub mod app;
pub mod integrations;
pub mod monitors;
pub mod platform;
pub mod probe;

pub use integrations::{CommandResult, CommandRunner, ShellCommandRunner};
pub use platform::{FixedPlatform, HostPlatform, PlatformDetector, PlatformKind};
pub use probe::{MemoryProbe, MemoryReading, ProbeCommands, ProbeError};
