// File I/O operations

pub mod canonical;
pub mod error;
pub mod xlsx;

pub use canonical::CanonicalListFile;
pub use error::IoError;
