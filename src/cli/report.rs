//! CLI commands for reports
//!
//! Generates the month reports and writes them to the terminal or a file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use chrono::Datelike;
use clap::{Args, Subcommand, ValueEnum};

use crate::config::Settings;
use crate::error::{PurseError, PurseResult};
use crate::reports::{MonthlyTypeReport, TopExpensesReport};
use crate::storage::FinanceRepository;

/// Output format for reports
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Csv,
    Json,
}

/// Options shared by the month reports
#[derive(Args, Debug)]
pub struct MonthReportArgs {
    /// Year to report on, defaults to the current year
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Month to report on (1-12), defaults to the current month
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl MonthReportArgs {
    /// The requested month, filling gaps from today's date
    fn period(&self) -> (i32, u32) {
        let today = chrono::Local::now().date_naive();
        (
            self.year.unwrap_or_else(|| today.year()),
            self.month.unwrap_or_else(|| today.month()),
        )
    }
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// A month's transactions grouped by type, larger total first
    #[command(alias = "type")]
    ByType(MonthReportArgs),

    /// The three largest expenses of each wallet in a month
    #[command(alias = "top")]
    TopExpenses(MonthReportArgs),
}

enum MonthReport {
    ByType(MonthlyTypeReport),
    TopExpenses(TopExpensesReport),
}

impl MonthReport {
    fn write<W: Write>(
        &self,
        format: ReportFormat,
        settings: &Settings,
        mut writer: W,
    ) -> PurseResult<()> {
        match (self, format) {
            (Self::ByType(r), ReportFormat::Text) => {
                writer.write_all(r.format_terminal(settings).as_bytes())?
            }
            (Self::TopExpenses(r), ReportFormat::Text) => {
                writer.write_all(r.format_terminal(settings).as_bytes())?
            }
            (Self::ByType(r), ReportFormat::Csv) => r.export_csv(&mut writer)?,
            (Self::TopExpenses(r), ReportFormat::Csv) => r.export_csv(&mut writer)?,
            (Self::ByType(r), ReportFormat::Json) => {
                r.export_json(&mut writer)?;
                writeln!(writer)?;
            }
            (Self::TopExpenses(r), ReportFormat::Json) => {
                r.export_json(&mut writer)?;
                writeln!(writer)?;
            }
        }

        writer.flush()?;
        Ok(())
    }
}

/// Handle report commands
///
/// Works against any repository, so demo runs share this path.
pub fn handle_report_command<R>(
    repository: &R,
    settings: &Settings,
    cmd: ReportCommands,
) -> PurseResult<()>
where
    R: FinanceRepository + ?Sized,
{
    let (args, report) = match cmd {
        ReportCommands::ByType(args) => {
            let (year, month) = args.period();
            let report = MonthlyTypeReport::generate(repository, year, month)?;
            (args, MonthReport::ByType(report))
        }
        ReportCommands::TopExpenses(args) => {
            let (year, month) = args.period();
            let report = TopExpensesReport::generate(repository, year, month)?;
            (args, MonthReport::TopExpenses(report))
        }
    };

    match args.output {
        Some(path) => {
            let file = File::create(&path).map_err(|e| {
                PurseError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            report.write(args.format, settings, BufWriter::new(file))?;
            println!("Report exported to: {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            report.write(args.format, settings, stdout.lock())?;
        }
    }

    Ok(())
}
