pub mod fallback;
pub mod sizing;

pub use fallback::SysinfoFallback;
pub use sizing::{test_file_size, SizingError};
