pub mod command;

pub use command::{CommandResult, CommandRunner, ShellCommandRunner, SPAWN_FAILED_STATUS};

#[cfg(test)]
pub use command::MockCommandRunner;
