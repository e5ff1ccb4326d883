//! Storage initialization
//!
//! Handles first-run setup: directories, settings, and the wallet file.

use chrono::Local;

use crate::config::{PursePaths, Settings};
use crate::error::PurseError;

use super::file_io::write_json_atomic;
use super::sample::SampleDataGenerator;
use super::wallets::WalletData;

/// Outcome of [`initialize_storage`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// A new, empty wallet file was written
    Empty,
    /// Sample wallets were generated with this many wallets
    Sampled(usize),
    /// A wallet file already existed and was left untouched
    Existing,
}

/// Initialize storage for a fresh installation
///
/// With `sample_seed`, the wallet file is filled with seeded sample data dated
/// before the current local time. An existing wallet file is never replaced.
pub fn initialize_storage(
    paths: &PursePaths,
    settings: &Settings,
    sample_seed: Option<u64>,
) -> Result<InitOutcome, PurseError> {
    paths.ensure_directories()?;
    settings.save(paths)?;

    let wallets_file = paths.wallets_file();
    if wallets_file.exists() {
        tracing::info!(path = %wallets_file.display(), "wallet file exists, leaving it");
        return Ok(InitOutcome::Existing);
    }

    let (wallets, outcome) = match sample_seed {
        Some(seed) => {
            let wallets = SampleDataGenerator::new(seed, Local::now().naive_local())
                .with_settings(&settings.sample)
                .generate();
            let count = wallets.len();
            (wallets, InitOutcome::Sampled(count))
        }
        None => (Vec::new(), InitOutcome::Empty),
    };

    write_json_atomic(&wallets_file, &WalletData { wallets })?;
    tracing::info!(path = %wallets_file.display(), ?outcome, "initialized storage");

    Ok(outcome)
}
