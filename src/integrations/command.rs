use std::process::{Command, Stdio};

/// Exit status and captured stdout of one command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub exit_status: i32,
    pub output: String,
}

impl CommandResult {
    pub fn new(exit_status: i32, output: impl Into<String>) -> Self {
        Self {
            exit_status,
            output: output.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_status == 0
    }
}

/// Exit status reported when the shell itself could not be started.
pub const SPAWN_FAILED_STATUS: i32 = 127;

#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    fn run(&self, command: &str) -> CommandResult;
}

/// Runs commands through `<shell> -c`, blocking until they exit.
#[derive(Debug, Clone)]
pub struct ShellCommandRunner {
    shell: String,
}

impl ShellCommandRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for ShellCommandRunner {
    fn default() -> Self {
        Self::new("sh")
    }
}

impl CommandRunner for ShellCommandRunner {
    fn run(&self, command: &str) -> CommandResult {
        let output = Command::new(&self.shell)
            .args(["-c", command])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

        match output {
            Ok(output) => {
                if !output.status.success() {
                    log::debug!(
                        "`{}` exited with {:?}: {}",
                        command,
                        output.status.code(),
                        String::from_utf8_lossy(&output.stderr).trim()
                    );
                }
                // Killed by a signal: no code.
                let exit_status = output.status.code().unwrap_or(-1);
                CommandResult::new(exit_status, String::from_utf8_lossy(&output.stdout))
            }
            Err(e) => {
                log::warn!("Failed to spawn {} for `{}`: {}", self.shell, command, e);
                CommandResult::new(SPAWN_FAILED_STATUS, e.to_string())
            }
        }
    }
}
