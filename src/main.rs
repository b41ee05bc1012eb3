//! CLI entry point for the delivery dashboard.
//!
//! Loads and cleans the order dataset once, applies the date and traffic
//! selection, and prints the requested company or courier table as JSON.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use delivery_dash::analyzers::company::{
    median_location_by_city_traffic, order_share_by_week, orders_by_day, orders_by_week,
    traffic_order_city, traffic_order_share,
};
use delivery_dash::analyzers::couriers::{
    RatingKey, courier_overview, rating_stats, top_couriers,
};
use delivery_dash::config::{DEFAULT_DATA_PATH, DEFAULT_LOGO_PATH, DashboardConfig};
use delivery_dash::filter::OrderFilter;
use delivery_dash::output::{print_json, write_cleaned};
use delivery_dash::schema::{DATE_FORMAT, DATE_WINDOW_END, TrafficDensity};
use delivery_dash::session::Session;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "delivery_dash")]
#[command(about = "Cleans a delivery order dataset and computes dashboard tables", long_about = None)]
struct Cli {
    /// Order dataset (CSV)
    #[arg(long, global = true, env = "DELIVERY_DATA", default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Logo image shown in the sidebar; must exist
    #[arg(long, global = true, env = "DELIVERY_LOGO", default_value = DEFAULT_LOGO_PATH)]
    logo: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Company-wide tables
    Company {
        #[arg(value_enum)]
        table: CompanyTable,

        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Courier tables
    Couriers {
        #[arg(value_enum)]
        table: CourierTable,

        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Write the cleaned dataset as CSV and print the cleaning report
    Clean {
        /// CSV file to write the cleaned rows to
        #[arg(short, long, default_value = "cleaned.csv")]
        output: PathBuf,
    },
    /// Print the cleaning report
    Report,
}

#[derive(Args)]
struct FilterArgs {
    /// Keep orders dated strictly before this day (DD-MM-YYYY)
    #[arg(long, value_parser = parse_day)]
    until: Option<NaiveDate>,

    /// Traffic density to include; repeat for several (default: all)
    #[arg(long = "traffic", value_enum)]
    traffic: Vec<TrafficDensity>,
}

impl FilterArgs {
    fn into_filter(self) -> Result<OrderFilter> {
        let traffic = if self.traffic.is_empty() {
            TrafficDensity::ALL.to_vec()
        } else {
            self.traffic
        };
        Ok(OrderFilter::new(
            self.until.unwrap_or(DATE_WINDOW_END),
            traffic,
        )?)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CompanyTable {
    OrdersByDay,
    OrdersByWeek,
    OrderShareByWeek,
    TrafficShare,
    TrafficCity,
    Locations,
}

#[derive(Clone, Copy, ValueEnum)]
enum CourierTable {
    Overview,
    RatingsByCourier,
    RatingsByTraffic,
    RatingsByWeather,
    Fastest,
    Slowest,
}

fn parse_day(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| format!("expected DD-MM-YYYY, got '{}': {}", value, e))
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/delivery_dash.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("delivery_dash.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = DashboardConfig::new(cli.data, cli.logo);
    let session = Session::open(&config)?;

    match cli.command {
        Commands::Company { table, filter } => {
            let orders = session.view(&filter.into_filter()?);
            info!(orders = orders.len(), "Company view selected");

            match table {
                CompanyTable::OrdersByDay => print_json(&orders_by_day(&orders))?,
                CompanyTable::OrdersByWeek => print_json(&orders_by_week(&orders))?,
                CompanyTable::OrderShareByWeek => print_json(&order_share_by_week(&orders))?,
                CompanyTable::TrafficShare => print_json(&traffic_order_share(&orders))?,
                CompanyTable::TrafficCity => print_json(&traffic_order_city(&orders))?,
                CompanyTable::Locations => {
                    print_json(&median_location_by_city_traffic(&orders))?
                }
            }
        }
        Commands::Couriers { table, filter } => {
            let orders = session.view(&filter.into_filter()?);
            info!(orders = orders.len(), "Courier view selected");

            match table {
                CourierTable::Overview => print_json(&courier_overview(&orders))?,
                CourierTable::RatingsByCourier => {
                    print_json(&rating_stats(&orders, RatingKey::Courier))?
                }
                CourierTable::RatingsByTraffic => {
                    print_json(&rating_stats(&orders, RatingKey::TrafficDensity))?
                }
                CourierTable::RatingsByWeather => {
                    print_json(&rating_stats(&orders, RatingKey::Weather))?
                }
                CourierTable::Fastest => print_json(&top_couriers(&orders, true))?,
                CourierTable::Slowest => print_json(&top_couriers(&orders, false))?,
            }
        }
        Commands::Clean { output } => {
            write_cleaned(&output, session.orders())?;
            print_json(session.report())?;
        }
        Commands::Report => {
            print_json(session.report())?;
        }
    }

    Ok(())
}
