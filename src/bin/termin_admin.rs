use clap::{Parser, Subcommand};
use std::path::PathBuf;
use termin_system::app::build_service;
use termin_system::core::slots::MAX_AVAILABLE_DAYS;
use termin_system::domain::model::to_listing_json;
use termin_system::utils::logger;
use termin_system::utils::validation::{validate_range, Validate};
use termin_system::TomlConfig;

#[derive(Parser)]
#[command(name = "termin-admin")]
#[command(about = "Inspect and maintain the appointment book")]
struct Cli {
    #[arg(long, short, help = "Path to a TOML configuration file")]
    config: Option<PathBuf>,

    #[arg(long, help = "SQLite URL, overrides the config file")]
    database_url: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Next bookable days
    Dates {
        #[arg(long, help = "Defaults to [booking] available_days")]
        days: Option<usize>,
    },
    /// Free slots of a day (YYYY-MM-DD)
    Slots {
        #[arg(long)]
        date: String,
    },
    /// All stored appointments, without deletion keys
    List {
        #[arg(long, help = "Print a JSON array instead of one line per appointment")]
        json: bool,
    },
    /// Cancel an appointment by its deletion key
    Cancel {
        #[arg(long)]
        key: String,
    },
}

/// `--days` when given, else the configured picker length.
fn picker_days(days: Option<usize>, config: &TomlConfig) -> termin_system::Result<usize> {
    let days = days.unwrap_or(config.booking.available_days);
    validate_range("days", days, 1, MAX_AVAILABLE_DAYS)?;
    Ok(days)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    let mut config = TomlConfig::load(cli.config.as_deref())?;
    if let Some(url) = &cli.database_url {
        config.database.url = url.clone();
    }
    config.validate()?;

    let service = build_service(&config).await?;

    match cli.command {
        Command::Dates { days } => {
            let days = picker_days(days, &config)?;
            for date in service.available_dates(days) {
                println!("{}", date);
            }
        }
        Command::Slots { date } => {
            let slots = service.time_slots(&date)?;
            if slots.is_empty() {
                println!("No free slots left on {}", date);
            }
            for slot in slots {
                println!("{}", slot);
            }
        }
        Command::List { json: true } => {
            let appointments = service.appointments().await?;
            println!("{}", to_listing_json(&appointments)?);
        }
        Command::List { json: false } => {
            let appointments = service.appointments().await?;
            println!("📋 {} appointment(s)", appointments.len());
            for appointment in &appointments {
                println!("  {}", appointment.summary());
            }
        }
        Command::Cancel { key } => {
            service.cancel(&key).await?;
            println!("✅ Cancelled (if the key matched an appointment)");
        }
    }

    Ok(())
}
