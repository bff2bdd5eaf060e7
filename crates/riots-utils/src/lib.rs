pub mod error;
pub mod fs;
pub mod time;
pub mod version;
