use thiserror::Error;

use crate::probe::MemoryReading;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SizingError {
    #[error("unable to determine memory size; specify the test file size explicitly")]
    UnknownMemory,

    #[error("no test directories given")]
    NoDirectories,
}

/// Size of the per-directory disk test file: twice physical memory, spread
/// over `dir_count` directories so the page cache cannot hold it.
pub fn test_file_size(reading: MemoryReading, dir_count: usize) -> Result<u64, SizingError> {
    let memory = u64::try_from(reading.get()).map_err(|_| SizingError::UnknownMemory)?;
    if dir_count == 0 {
        return Err(SizingError::NoDirectories);
    }
    Ok(memory.saturating_mul(2) / dir_count as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_memory_across_directories() {
        assert_eq!(test_file_size(MemoryReading::new(1024), 2), Ok(1024));
        assert_eq!(test_file_size(MemoryReading::new(10240), 1), Ok(20480));
        assert_eq!(test_file_size(MemoryReading::new(1000), 3), Ok(666));
    }

    #[test]
    fn unknown_memory_is_rejected() {
        assert_eq!(
            test_file_size(MemoryReading::UNKNOWN, 1),
            Err(SizingError::UnknownMemory)
        );
    }

    #[test]
    fn zero_directories_is_rejected() {
        assert_eq!(
            test_file_size(MemoryReading::new(4096), 0),
            Err(SizingError::NoDirectories)
        );
    }

    #[test]
    fn zero_memory_gives_zero_size() {
        assert_eq!(test_file_size(MemoryReading::new(0), 4), Ok(0));
    }
}
