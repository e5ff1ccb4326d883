//! Display formatting for terminal output

pub mod report;
pub mod wallet;

pub use wallet::{format_wallet_details, format_wallet_list};
