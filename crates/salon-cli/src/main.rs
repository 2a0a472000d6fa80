//! `salon` CLI: browse services, list free times and book appointments.
//!
//! ## Usage
//!
//! ```sh
//! # List a salon's services
//! salon --data salon-data.json services glow
//!
//! # The 14 bookable days starting today (or --today)
//! salon dates glow --today 2026-03-16
//!
//! # Free start times for a service on a day
//! salon slots glow --service cut --date 2026-03-16
//!
//! # Book, queueing the confirmation in an outbox file
//! SALON_OUTBOX=outbox.jsonl salon book glow --service cut --date 2026-03-16 \
//!     --time 09:00 --name Ona --phone +37060000000 --email ona@example.com
//!
//! # End time for a start and a duration
//! salon end-time 09:30 45
//! ```
//!
//! `SALON_DATA` and `SALON_OUTBOX` may also be set in a `.env` file. Log
//! verbosity follows `RUST_LOG` (default `warn`); logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use salon_engine::notify::OutboxSender;
use salon_engine::store::JsonFileStore;
use salon_engine::time::{format_date, parse_date};
use salon_engine::{compute_end_time, BookingFlow, Customer};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "salon", version, about = "Salon booking CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON data file holding salons, services and bookings
    #[arg(long, env = "SALON_DATA", default_value = "salon-data.json", global = true)]
    data: PathBuf,

    /// JSON-lines file confirmations are appended to (skipped when unset)
    #[arg(long, env = "SALON_OUTBOX", global = true)]
    outbox: Option<PathBuf>,

    /// Use this date (YYYY-MM-DD) as today instead of the local date
    #[arg(long, global = true)]
    today: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the services a salon offers
    Services {
        /// Salon slug
        salon: String,
    },
    /// List the days open for booking
    Dates {
        /// Salon slug
        salon: String,
    },
    /// List free start times for a service on a day
    Slots {
        /// Salon slug
        salon: String,
        /// Service id
        #[arg(long)]
        service: String,
        /// Day to check (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },
    /// Book a service and send the confirmation
    Book {
        /// Salon slug
        salon: String,
        /// Service id
        #[arg(long)]
        service: String,
        /// Day of the visit (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Start time (HH:MM), one of the free slots
        #[arg(long)]
        time: String,
        /// Customer name
        #[arg(long)]
        name: String,
        /// Customer phone
        #[arg(long)]
        phone: String,
        /// Customer email
        #[arg(long)]
        email: String,
    },
    /// Print the end time of a booking
    EndTime {
        /// Start time (HH:MM)
        start: String,
        /// Duration in minutes
        duration: u32,
    },
}

fn main() -> Result<()> {
    // Values from .env must be in the environment before clap reads it.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let today = resolve_today(cli.today.as_deref())?;
    let store = JsonFileStore::new(&cli.data);
    let sender = OutboxSender::new(cli.outbox.clone());

    match cli.command {
        Commands::Services { salon } => {
            let flow = load(store, sender, &salon, today)?;
            let services = &flow.salon().services;
            if services.is_empty() {
                println!("No services available.");
            }
            for service in services {
                println!(
                    "{}\t{}\t{} min\t{}",
                    service.id, service.name, service.duration_minutes, service.price
                );
            }
        }
        Commands::Dates { salon } => {
            let flow = load(store, sender, &salon, today)?;
            for date in flow.available_dates() {
                println!("{}", date.format("%Y-%m-%d %a"));
            }
        }
        Commands::Slots {
            salon,
            service,
            date,
        } => {
            let date = parse_date(&date)?;
            let mut flow = load(store, sender, &salon, today)?;
            flow.select_service(&service)?;
            let slots = flow.select_date(date)?;
            if slots.is_empty() {
                println!("No free times on {}. Pick another day.", format_date(date));
            }
            for slot in slots {
                println!("{}", slot.start);
            }
        }
        Commands::Book {
            salon,
            service,
            date,
            time,
            name,
            phone,
            email,
        } => {
            let date = parse_date(&date)?;
            let mut flow = load(store, sender, &salon, today)?;
            flow.select_service(&service)?;
            flow.select_date(date)?;
            flow.select_time(&time)
                .with_context(|| format!("{} is not bookable on {}", time, format_date(date)))?;
            flow.continue_to_details()?;

            let booking = flow
                .submit(Customer { name, phone, email })
                .context("Failed to create booking")?;

            println!("{}", serde_json::to_string_pretty(&booking)?);
            if let Some(link) = flow.calendar_link() {
                println!("Add to calendar: {}", link);
            }
        }
        Commands::EndTime { start, duration } => {
            println!("{}", compute_end_time(&start, duration)?);
        }
    }

    Ok(())
}

fn resolve_today(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(text) => parse_date(text).context("Invalid --today"),
        None => Ok(Local::now().date_naive()),
    }
}

fn load(
    store: JsonFileStore,
    sender: OutboxSender,
    slug: &str,
    today: NaiveDate,
) -> Result<BookingFlow<JsonFileStore, OutboxSender>> {
    let path = store.path().display().to_string();
    BookingFlow::load(store, sender, slug, today)
        .with_context(|| format!("Failed to load salon '{}' from {}", slug, path))
}
