//! Storage layer for purse
//!
//! The reporting code reads through the [`FinanceRepository`] trait. Two
//! implementations live here: the JSON-backed [`WalletRepository`] (owned by
//! [`Storage`]) and the [`InMemoryRepository`] used for demo runs and tests.

pub mod file_io;
pub mod init;
pub mod memory;
pub mod repository;
pub mod sample;
pub mod wallets;

pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_storage, InitOutcome};
pub use memory::InMemoryRepository;
pub use repository::{transactions_in_month, FinanceRepository};
pub use sample::SampleDataGenerator;
pub use wallets::WalletRepository;

use crate::config::paths::PursePaths;
use crate::error::{PurseError, PurseResult};
use crate::models::Wallet;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: PursePaths,
    pub wallets: WalletRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: PursePaths) -> Result<Self, PurseError> {
        paths.ensure_directories()?;

        Ok(Self {
            wallets: WalletRepository::new(paths.wallets_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &PursePaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), PurseError> {
        self.wallets.load()
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), PurseError> {
        self.wallets.save()
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

impl FinanceRepository for Storage {
    fn get_all_wallets(&self) -> PurseResult<Vec<Wallet>> {
        self.wallets.get_all()
    }
}
