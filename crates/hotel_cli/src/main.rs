//! Hotel reservations CLI.
mod reservations;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hotel_app::{HotelApp, HotelConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Subcommand)]
enum Command {
    /// Runs the reservation server
    Run,
    /// Lists every reservation
    List,
    /// Shows a single reservation
    Show { id: i32 },
    /// Makes a new reservation
    Add(reservations::Fields),
    /// Replaces the fields of an existing reservation
    Edit {
        id: i32,
        #[command(flatten)]
        fields: reservations::Fields,
    },
    /// Removes a reservation
    Remove { id: i32 },
}

#[derive(Debug, Parser)]
#[command(name = "hotel", author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// The level of logging to use
    #[clap(long, global = true, default_value = tracing::Level::INFO.as_str())]
    log_level: tracing::Level,
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                    // axum logs rejections from built-in extractors with the `axum::rejection`
                    // target, at `TRACE` level. `axum::rejection=trace` enables showing those events
                    format!(
                        "hotel={},hotel_app={},hotel_server={},hotel_store={},axum::rejection=trace",
                        self.log_level, self.log_level, self.log_level, self.log_level
                    )
                    .into()
                }),
            )
            .with(tracing_subscriber::fmt::layer())
            .init();

        info!("started with {:?}", self);

        let app = HotelApp::new(HotelConfig::new()?);

        match &self.command {
            Command::Run => Ok(app.run().await?),
            Command::List => reservations::list(&app.open_store()?),
            Command::Show { id } => reservations::show(&app.open_store()?, *id),
            Command::Add(fields) => reservations::add(&app.open_store()?, fields),
            Command::Edit { id, fields } => reservations::edit(&app.open_store()?, *id, fields),
            Command::Remove { id } => reservations::remove(&app.open_store()?, *id),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup human panic
    human_panic::setup_panic!();

    Cli::parse().execute().await
}
