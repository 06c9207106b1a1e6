use chrono::NaiveDate;
use clap::Parser;

// Build version with backend info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "GUI:    eframe/egui 0.33\n",
    "Target: ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// Time-of-day dot tracker
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Date to open with (YYYY-MM-DD), defaults to today
    #[arg(short = 'd', long = "date", value_name = "DATE")]
    pub date: Option<NaiveDate>,

    /// Minutes per dot (5, 10, 15 or 30); overrides the saved value
    #[arg(short = 'i', long = "interval", value_name = "MIN")]
    pub interval: Option<i32>,

    /// Minutes per row (30, 60, 120 or 180); overrides the saved value
    #[arg(short = 'r', long = "row-duration", value_name = "MIN")]
    pub row_duration: Option<i32>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}
