//! Configuration module for purse
//!
//! - Path resolution (`PURSE_DATA_DIR`, platform config directory)
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::PursePaths;
pub use settings::{SampleSettings, Settings};
