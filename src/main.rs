use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use purse::cli::{
    handle_report_command, handle_transaction_command, handle_wallet_command, print_wallet_list,
    ReportCommands, TransactionCommands, WalletCommands,
};
use purse::config::paths::DATA_DIR_ENV;
use purse::config::{PursePaths, Settings};
use purse::storage::{initialize_storage, InMemoryRepository, InitOutcome, Storage};

/// Environment variable selecting the log format (`text` or `json`)
const LOG_FORMAT_ENV: &str = "PURSE_LOG_FORMAT";

#[derive(Parser)]
#[command(
    name = "purse",
    version,
    about = "Terminal-based personal finance reporting",
    long_about = "purse keeps wallets and their income and expense transactions, \
                  refuses expenses a wallet cannot cover, and reports each month \
                  by transaction type and by largest expenses."
)]
struct Cli {
    /// Data directory, defaults to the platform config directory
    #[arg(long, global = true, value_name = "DIR", env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Run against generated sample data instead of the data directory
    #[arg(long, global = true, value_name = "SEED")]
    demo: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory
    Init {
        /// Fill the new wallet file with sample data from this seed
        #[arg(long, value_name = "SEED")]
        sample: Option<u64>,
    },

    /// Wallet management commands
    #[command(subcommand)]
    Wallet(WalletCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Month reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    let log_format = std::env::var(LOG_FORMAT_ENV).unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("purse - wallets, transactions and month reports");
        println!();
        println!("Run 'purse --help' for usage information.");
        println!("Run 'purse --demo 42 report by-type' to try it on sample data.");
        return Ok(());
    };

    if let Some(seed) = cli.demo {
        return run_demo(seed, command);
    }

    let paths = match cli.data_dir {
        Some(dir) => PursePaths::with_base_dir(dir),
        None => PursePaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    match command {
        Commands::Init { sample } => run_init(&paths, &settings, sample)?,
        Commands::Config => print_config(&paths, &settings),
        Commands::Wallet(cmd) => handle_wallet_command(&open_storage(paths)?, &settings, cmd)?,
        Commands::Transaction(cmd) => {
            handle_transaction_command(&open_storage(paths)?, &settings, cmd)?
        }
        Commands::Report(cmd) => handle_report_command(&open_storage(paths)?, &settings, cmd)?,
    }

    Ok(())
}

fn open_storage(paths: PursePaths) -> Result<Storage> {
    let mut storage = Storage::new(paths)?;
    storage.load_all()?;
    Ok(storage)
}

fn run_init(paths: &PursePaths, settings: &Settings, sample: Option<u64>) -> Result<()> {
    println!("Initializing purse at: {}", paths.base_dir().display());

    match initialize_storage(paths, settings, sample)? {
        InitOutcome::Empty => println!("Created an empty wallet file."),
        InitOutcome::Sampled(count) => println!("Created {} sample wallets.", count),
        InitOutcome::Existing => println!("Wallet file already exists; left unchanged."),
    }

    println!();
    println!("Run 'purse wallet list' to see your wallets.");
    Ok(())
}

fn print_config(paths: &PursePaths, settings: &Settings) {
    println!("purse Configuration");
    println!("===================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!("Wallet file:      {}", paths.wallets_file().display());
    println!("Export directory: {}", paths.export_dir().display());
    println!(
        "Initialized:      {}",
        if paths.is_initialized() { "Yes" } else { "No" }
    );
    println!();
    println!("Settings:");
    println!("  Currency symbol:  {}", settings.currency_symbol);
    println!("  Default currency: {}", settings.default_currency);
    println!("  Date format:      {}", settings.date_format);
    println!(
        "  Sample data:      {} transactions over {} days",
        settings.sample.transaction_count, settings.sample.window_days
    );
}

/// Serve read-only commands from in-memory sample data anchored at now
fn run_demo(seed: u64, command: Commands) -> Result<()> {
    let settings = Settings::default();
    let anchor = chrono::Local::now().naive_local();
    let repository = InMemoryRepository::with_sample_data(seed, anchor, &settings.sample);
    tracing::debug!(seed, wallets = repository.wallets().len(), "generated demo data");

    match command {
        Commands::Report(cmd) => handle_report_command(&repository, &settings, cmd)?,
        Commands::Wallet(WalletCommands::List) => print_wallet_list(&repository, &settings)?,
        _ => bail!("Only 'report' and 'wallet list' are available with --demo"),
    }

    Ok(())
}
