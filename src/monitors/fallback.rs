use sysinfo::System;

/// Second source of truth for when the command probe gives up.
pub struct SysinfoFallback {
    system: System,
}

impl SysinfoFallback {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }

    /// Total physical memory in bytes, `None` if sysinfo reports nothing.
    pub fn total_memory(&mut self) -> Option<i64> {
        self.system.refresh_memory();
        let bytes = self.system.total_memory();
        if bytes == 0 {
            return None;
        }
        i64::try_from(bytes).ok()
    }
}

impl Default for SysinfoFallback {
    fn default() -> Self {
        Self::new()
    }
}
