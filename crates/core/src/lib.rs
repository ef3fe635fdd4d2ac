pub mod artifacts;
pub mod error;
pub mod types;
pub mod upload;
