use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use packwise::api::AppState;
use packwise::config::TripStoreKind;
use packwise::models::{Activity, PackingStyle, SavedTrip, TripDetails, TripUpdate};
use packwise::wardrobe::{CachedWardrobeSource, JsonFileWardrobe, StaticWardrobe};
use packwise::{
    BackendClient, LocalTripStore, PackingEnhancer, PackwiseConfig, PackwiseError,
    PersistentCache, TripPlannerService, TripStore, WardrobeSource, logging, web,
};

#[derive(Parser, Debug)]
#[command(name = "packwise", version, about = "Wardrobe-aware trip packing lists")]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a packing list for a trip
    Plan {
        #[arg(long)]
        destination: String,

        /// First day, YYYY-MM-DD or RFC 3339
        #[arg(long, value_parser = parse_date)]
        start: DateTime<Utc>,

        /// Last day, YYYY-MM-DD or RFC 3339
        #[arg(long, value_parser = parse_date)]
        end: DateTime<Utc>,

        /// Activity tag, repeatable (see `packwise activities`)
        #[arg(long = "activity")]
        activities: Vec<String>,

        /// Expected weather, free text such as "cold and rainy"
        #[arg(long, default_value = "")]
        weather: String,

        /// minimal, comfort, fashion or business (defaults to the configured style)
        #[arg(long)]
        style: Option<String>,

        /// Read the wardrobe from a JSON export instead of the backend
        #[arg(long)]
        wardrobe: Option<PathBuf>,

        /// Skip the backend entirely
        #[arg(long)]
        offline: bool,

        /// Save the trip after planning
        #[arg(long)]
        save: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage saved trips
    Trips {
        #[command(subcommand)]
        command: TripsCommand,
    },

    /// List the activity tags and packing styles
    Activities,

    /// Run the HTTP API
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Subcommand, Debug)]
enum TripsCommand {
    /// Saved trips, newest first
    List,
    /// Show a trip with its packing list and progress
    Show { id: String },
    /// Delete a trip
    Delete { id: String },
    /// Toggle the favorite flag
    Favorite { id: String },
    /// Toggle the completed flag
    Complete { id: String },
    /// Check an item off (or back on) the packing list
    Pack {
        id: String,
        /// Category position, starting at 0
        category: usize,
        /// Item position within the category, starting at 0
        item: usize,
    },
}

fn parse_date(value: &str) -> std::result::Result<DateTime<Utc>, String> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| format!("'{value}' is neither YYYY-MM-DD nor an RFC 3339 timestamp"))
}

struct WardrobeChoice {
    file: Option<PathBuf>,
    offline: bool,
}

fn build_planner(config: &PackwiseConfig, choice: WardrobeChoice) -> Result<TripPlannerService> {
    let data_dir = config.ensure_storage_dir()?;
    let backend = Arc::new(BackendClient::new(&config.backend)?);

    let wardrobe: Arc<dyn WardrobeSource> = match (choice.file, choice.offline) {
        (Some(path), _) => Arc::new(JsonFileWardrobe::new(path)),
        (None, true) => {
            info!("Offline without a wardrobe file, planning against an empty wardrobe");
            Arc::new(StaticWardrobe::default())
        }
        (None, false) => {
            let cache = Arc::new(
                PersistentCache::open(data_dir.join("cache"))
                    .context("Failed to open wardrobe cache")?,
            );
            let ttl = Duration::from_secs(u64::from(config.storage.wardrobe_ttl_hours) * 3600);
            Arc::new(CachedWardrobeSource::new(backend.clone(), cache, ttl))
        }
    };

    let enhancer: Option<Arc<dyn PackingEnhancer>> =
        if config.backend.enhancement_enabled && !choice.offline {
            Some(backend.clone())
        } else {
            None
        };

    let trips: Arc<dyn TripStore> = match config.storage.trip_store {
        TripStoreKind::Local => Arc::new(
            LocalTripStore::open(data_dir.join("trips")).context("Failed to open trip store")?,
        ),
        TripStoreKind::Backend => backend,
    };

    debug!("Planner ready, data in {}", data_dir.display());
    Ok(TripPlannerService::new(
        wardrobe,
        enhancer,
        trips,
        config.backend.user_id,
    ))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        if let Some(packwise_err) = err.downcast_ref::<PackwiseError>() {
            eprintln!("❌ {}", packwise_err.user_message());
        }
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = PackwiseConfig::load_from_path(cli.config)?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    logging::init(&config.logging)?;

    match cli.command {
        Command::Plan {
            destination,
            start,
            end,
            activities,
            weather,
            style,
            wardrobe,
            offline,
            save,
            json,
        } => {
            if destination.trim().is_empty() {
                bail!("Destination must not be empty");
            }
            let trip = TripDetails {
                destination,
                start_date: start,
                end_date: end,
                activities,
                weather_expected: weather,
                packing_style: style.unwrap_or_else(|| config.defaults.packing_style.clone()),
            };
            let planner = build_planner(
                &config,
                WardrobeChoice {
                    file: wardrobe,
                    offline,
                },
            )?;

            let result = planner.generate_smart_packing_list(&trip).await?;
            let saved = if save {
                Some(planner.save_trip(&trip, &result).await?)
            } else {
                None
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!(
                    "🧳 {} for {} days ({} packing)\n",
                    trip.destination,
                    result.duration,
                    trip.style()
                );
                for category in &result.categories {
                    println!("{category}");
                }
                let coverage = &result.coverage;
                println!(
                    "Wardrobe covers {} of {} items ({:.0}%), {} to buy",
                    coverage.available,
                    coverage.available + coverage.needed,
                    coverage.coverage_percent,
                    coverage.needed
                );
                if let Some(recommendations) = &result.recommendations {
                    println!("\n💡 {recommendations}");
                }
            }
            if let Some(saved) = saved {
                eprintln!("Saved trip {}", saved.id);
            }
        }

        Command::Trips { command } => {
            let planner = build_planner(
                &config,
                WardrobeChoice {
                    file: None,
                    offline: true,
                },
            )?;
            run_trips(&planner, command).await?;
        }

        Command::Activities => {
            println!("Activities:");
            for activity in Activity::ALL {
                println!("  {activity}");
            }
            println!("\nPacking styles:");
            for style in PackingStyle::ALL {
                println!("  {:<9} {}", style.as_str(), style.description());
            }
        }

        Command::Serve { port } => {
            let planner = build_planner(
                &config,
                WardrobeChoice {
                    file: None,
                    offline: false,
                },
            )?;
            let port = port.unwrap_or(config.defaults.port);
            web::run(port, AppState::new(Arc::new(planner))).await?;
        }
    }

    Ok(())
}

async fn run_trips(planner: &TripPlannerService, command: TripsCommand) -> Result<()> {
    let store = planner.trips();
    match command {
        TripsCommand::List => {
            let trips = store.list_trips(planner.user_id()).await?;
            if trips.is_empty() {
                println!("No saved trips");
            }
            for trip in &trips {
                println!("{}", trip_summary(trip));
            }
        }
        TripsCommand::Show { id } => {
            let trip = require_trip(store.as_ref(), &id).await?;
            println!("{}", trip_summary(&trip));
            if !trip.notes.is_empty() {
                println!("   {}", trip.notes);
            }
            println!();
            for (ci, category) in trip.packing_list.iter().enumerate() {
                let (packed, total) = trip.category_completion(ci).unwrap_or_default();
                println!("[{ci}] {} ({packed}/{total})", category.category);
                for (ii, item) in category.items.iter().enumerate() {
                    let check = if trip.is_packed(ci, ii) { "x" } else { " " };
                    println!("    [{check}] {ii}: {}", item.name);
                }
            }
        }
        TripsCommand::Delete { id } => {
            if !store.delete_trip(&id).await? {
                bail!("No trip with id {id}");
            }
            println!("Deleted trip {id}");
        }
        TripsCommand::Favorite { id } => {
            let trip = require_trip(store.as_ref(), &id).await?;
            let trip = store
                .update_trip(&id, TripUpdate::favorite(!trip.is_favorite))
                .await?;
            println!("{}", trip_summary(&trip));
        }
        TripsCommand::Complete { id } => {
            let trip = require_trip(store.as_ref(), &id).await?;
            let trip = store
                .update_trip(&id, TripUpdate::completed(!trip.is_completed))
                .await?;
            println!("{}", trip_summary(&trip));
        }
        TripsCommand::Pack { id, category, item } => {
            let mut trip = require_trip(store.as_ref(), &id).await?;
            let Some(packed) = trip.toggle_packed(category, item) else {
                bail!("Trip {id} has no item {category}-{item}");
            };
            let update = TripUpdate {
                packed_items: Some(trip.packed_items.clone()),
                ..TripUpdate::default()
            };
            let trip = store.update_trip(&id, update).await?;
            println!(
                "{} {}-{} ({}/{} packed)",
                if packed { "Packed" } else { "Unpacked" },
                category,
                item,
                trip.packed_count(),
                trip.total_items()
            );
        }
    }
    Ok(())
}

async fn require_trip(store: &dyn TripStore, id: &str) -> Result<SavedTrip> {
    store
        .get_trip(id)
        .await?
        .ok_or_else(|| PackwiseError::not_found(format!("trip {id}")))
        .context("Looking up trip")
}

fn trip_summary(trip: &SavedTrip) -> String {
    let mut flags = String::new();
    if trip.is_favorite {
        flags.push_str(" ⭐");
    }
    if trip.is_completed {
        flags.push_str(" ✔");
    }
    format!(
        "{}  {}  {} to {}  {}/{} packed{}",
        trip.id,
        trip.destination,
        trip.start_date.format("%Y-%m-%d"),
        trip.end_date.format("%Y-%m-%d"),
        trip.packed_count(),
        trip.total_items(),
        flags
    )
}
