//! Wallet repository for JSON storage
//!
//! Manages loading and saving wallets (with their transactions) to
//! wallets.json. Wallets keep the order in which they were first stored.

use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::PurseError;
use crate::models::{Wallet, WalletId};

use super::file_io::{read_json, write_json_atomic};
use super::repository::FinanceRepository;

/// Serializable wallet file layout
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub(crate) struct WalletData {
    pub(crate) wallets: Vec<Wallet>,
}

/// Repository for wallet persistence
pub struct WalletRepository {
    path: PathBuf,
    data: RwLock<Vec<Wallet>>,
}

impl WalletRepository {
    /// Create a new wallet repository backed by `path`
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Wallet>>, PurseError> {
        self.data
            .read()
            .map_err(|e| PurseError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Wallet>>, PurseError> {
        self.data
            .write()
            .map_err(|e| PurseError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load wallets from disk, validating each one
    ///
    /// Loading is a trusted path: the balance check is not replayed, but every
    /// wallet must be well-formed.
    pub fn load(&self) -> Result<(), PurseError> {
        let file_data: WalletData = read_json(&self.path)?;

        for wallet in &file_data.wallets {
            wallet.validate().map_err(|e| {
                PurseError::Validation(format!("Wallet '{}' is invalid: {}", wallet.name, e))
            })?;
        }

        tracing::debug!(
            path = %self.path.display(),
            wallets = file_data.wallets.len(),
            "loaded wallets"
        );

        *self.write()? = file_data.wallets;
        Ok(())
    }

    /// Save wallets to disk
    pub fn save(&self) -> Result<(), PurseError> {
        let file_data = WalletData {
            wallets: self.read()?.clone(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a wallet by ID
    pub fn get(&self, id: WalletId) -> Result<Option<Wallet>, PurseError> {
        Ok(self.read()?.iter().find(|w| w.id == id).cloned())
    }

    /// Get all wallets in storage order
    pub fn get_all(&self) -> Result<Vec<Wallet>, PurseError> {
        Ok(self.read()?.clone())
    }

    /// Get a wallet by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Wallet>, PurseError> {
        let name_lower = name.to_lowercase();
        Ok(self
            .read()?
            .iter()
            .find(|w| w.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Check if a wallet name is already taken
    pub fn name_exists(&self, name: &str) -> Result<bool, PurseError> {
        Ok(self.get_by_name(name)?.is_some())
    }

    /// Insert a new wallet or replace the stored one with the same ID
    pub fn upsert(&self, wallet: Wallet) -> Result<(), PurseError> {
        let mut data = self.write()?;
        match data.iter_mut().find(|w| w.id == wallet.id) {
            Some(existing) => *existing = wallet,
            None => data.push(wallet),
        }
        Ok(())
    }

    /// Number of stored wallets
    pub fn count(&self) -> Result<usize, PurseError> {
        Ok(self.read()?.len())
    }
}

impl FinanceRepository for WalletRepository {
    fn get_all_wallets(&self) -> crate::error::PurseResult<Vec<Wallet>> {
        self.get_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Transaction};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, WalletRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("wallets.json");
        let repo = WalletRepository::new(path);
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        let wallet = Wallet::new("Main Card");
        let id = wallet.id;

        repo.upsert(wallet).unwrap();

        let retrieved = repo.get(id).unwrap().unwrap();
        assert_eq!(retrieved.name, "Main Card");
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let (_temp_dir, repo) = create_test_repo();
        let first = Wallet::new("First");
        let mut second = Wallet::new("Second");
        repo.upsert(first.clone()).unwrap();
        repo.upsert(second.clone()).unwrap();

        second.name = "Renamed".into();
        repo.upsert(second).unwrap();

        let names: Vec<_> = repo.get_all().unwrap().into_iter().map(|w| w.name).collect();
        assert_eq!(names, vec!["First", "Renamed"]);
    }

    #[test]
    fn test_save_and_load() {
        let (temp_dir, repo) = create_test_repo();
        let mut wallet = Wallet::with_initial_balance("Cash", Money::from_units(200));
        let date = NaiveDate::from_ymd_opt(2025, 10, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        wallet
            .add_transaction(Transaction::expense(date, Money::from_units(20)))
            .unwrap();
        repo.upsert(wallet.clone()).unwrap();
        repo.save().unwrap();

        let repo2 = WalletRepository::new(temp_dir.path().join("wallets.json"));
        repo2.load().unwrap();

        let loaded = repo2.get(wallet.id).unwrap().unwrap();
        assert_eq!(loaded.current_balance(), Money::from_units(180));
        assert_eq!(loaded.transactions().len(), 1);
    }

    #[test]
    fn test_get_by_name_is_case_insensitive() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(Wallet::new("Main Card")).unwrap();

        assert!(repo.get_by_name("main card").unwrap().is_some());
        assert!(repo.name_exists("MAIN CARD").unwrap());
        assert!(!repo.name_exists("Cash").unwrap());
    }

    #[test]
    fn test_load_rejects_invalid_wallet() {
        let (temp_dir, repo) = create_test_repo();
        let mut wallet = Wallet::new("Broken");
        wallet.name = String::new();
        write_json_atomic(
            temp_dir.path().join("wallets.json"),
            &WalletData {
                wallets: vec![wallet],
            },
        )
        .unwrap();

        assert!(matches!(repo.load(), Err(PurseError::Validation(_))));
    }
}
