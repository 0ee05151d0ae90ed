//! Command-line argument structures.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

/// Keep chicken-farm records and print production reports as JSON
#[derive(Parser, Debug)]
#[command(name = "henhouse")]
#[command(about = "henhouse - chicken-farm records and reports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// SQLite database file (overrides HENHOUSE_DB_PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error (overrides HENHOUSE_LOG_LEVEL)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rotated log files (overrides HENHOUSE_LOG_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// How long to wait on a locked store (overrides HENHOUSE_STORE_TIMEOUT_MS)
    #[arg(long, global = true, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage chickens
    #[command(subcommand)]
    Chicken(ChickenCommand),

    /// Manage employees and their cage assignments
    #[command(subcommand)]
    Employee(EmployeeCommand),

    /// Record and browse egg collections
    #[command(subcommand)]
    Collection(CollectionCommand),

    /// Read or change the egg price
    #[command(subcommand)]
    Price(PriceCommand),

    /// Production reports
    #[command(subcommand)]
    Report(ReportCommand),
}

#[derive(Subcommand, Debug)]
pub enum ChickenCommand {
    /// List all chickens
    List,
    /// Show one chicken
    Get { id: Uuid },
    /// Add a chicken
    Add(ChickenArgs),
    /// Replace a chicken's fields
    Update {
        id: Uuid,
        #[command(flatten)]
        fields: ChickenArgs,
    },
    /// Delete a chicken
    Delete { id: Uuid },
}

#[derive(Args, Debug)]
pub struct ChickenArgs {
    #[arg(long)]
    pub cage: u32,
    /// Weight in kilograms
    #[arg(long)]
    pub weight: f64,
    /// Age in months
    #[arg(long)]
    pub age: u32,
    /// Eggs laid per month
    #[arg(long)]
    pub eggs: u32,
    #[arg(long)]
    pub breed: String,
}

#[derive(Subcommand, Debug)]
pub enum EmployeeCommand {
    /// List all employees
    List,
    /// Show one employee
    Get { id: Uuid },
    /// Add an employee
    Add(EmployeeArgs),
    /// Replace an employee's fields and cage set
    Update {
        id: Uuid,
        #[command(flatten)]
        fields: EmployeeArgs,
    },
    /// Delete an employee
    Delete { id: Uuid },
}

#[derive(Args, Debug)]
pub struct EmployeeArgs {
    #[arg(long)]
    pub name: String,
    /// Passport as "NNNN NNNNNN"
    #[arg(long)]
    pub passport: String,
    #[arg(long)]
    pub salary: f64,
    /// Served cage id; repeat for several cages
    #[arg(long = "cage", value_name = "CAGE")]
    pub cages: Vec<u32>,
}

#[derive(Subcommand, Debug)]
pub enum CollectionCommand {
    /// Record eggs gathered from a cage
    Record {
        /// Collection day (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        cage: u32,
        #[arg(long)]
        eggs: u32,
        #[arg(long)]
        chicken: Option<Uuid>,
        /// Employee who gathered the eggs
        #[arg(long)]
        employee: Option<Uuid>,
    },
    /// List collections in a date range
    List(RangeArgs),
    /// Delete a collection
    Delete { id: Uuid },
}

#[derive(Subcommand, Debug)]
pub enum PriceCommand {
    /// Print the current egg price
    Get,
    /// Set the egg price
    Set { price: f64 },
}

#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    /// Total eggs, cost and price per egg
    EggStats(RangeArgs),
    /// Eggs per employee with share of the total
    EmployeeEggs(RangeArgs),
    /// Eggs and share of the total for one employee
    EmployeeEggsOf {
        id: Uuid,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Top chicken by monthly eggs
    MostProductive,
    /// Chickens below the flock average
    LowProductivity,
    /// Chickens served per employee with workload tier
    Workloads,
    /// Chickens served by one employee with workload tier
    EmployeeWorkload { id: Uuid },
    /// Flock headline numbers
    Summary,
    /// Cage with the most eggs collected
    BusiestCage(RangeArgs),
    /// Mean monthly eggs for chickens of one weight and age
    Average {
        #[arg(long)]
        weight: f64,
        #[arg(long)]
        age: u32,
    },
}

/// Inclusive collection-date range.
#[derive(Args, Debug)]
pub struct RangeArgs {
    /// First day (YYYY-MM-DD)
    #[arg(long)]
    pub from: NaiveDate,
    /// Last day (YYYY-MM-DD)
    #[arg(long)]
    pub to: NaiveDate,
}
