//! overlap CLI.
//!
//! Score meeting times and suggest the best slots for a group spread across
//! time zones. Results are printed as JSON on stdout; logs go to stderr.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use overlap_engine::catalog::{self, POPULAR_CITIES, TIME_ZONES};
use overlap_engine::{
    download_file_name, find_optimal_slots_with_options, google_calendar_url, local_date_time_string,
    local_time_string, meeting_text, parse_instant, parse_time_zone, score_suitability, to_local,
    DateRange, NewParticipant, ParticipantStore, ProposalStore, SearchOptions,
    DEFAULT_HORIZON_DAYS,
};

#[derive(Parser)]
#[command(name = "overlap", version)]
#[command(about = "Find meeting times that work across time zones")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show an instant in one or more time zones.
    Convert {
        /// RFC 3339 instant, e.g. 2024-07-15T12:00:00Z
        instant: String,
        /// IANA zone names
        #[arg(required = true)]
        zones: Vec<String>,
    },

    /// Rate an instant for each participant.
    Score {
        /// RFC 3339 instant
        instant: String,
        /// NAME=ZONE, or a known city
        #[arg(short = 'p', long = "participant", required = true)]
        participants: Vec<String>,
    },

    /// Suggest the best meeting slots.
    Suggest {
        /// NAME=ZONE, or a known city
        #[arg(short = 'p', long = "participant", required = true)]
        participants: Vec<String>,
        /// First day to scan: RFC 3339 instant, or YYYY-MM-DD taken as midnight
        /// in the reference zone. Defaults to now.
        #[arg(long)]
        start: Option<String>,
        /// Days to scan after start
        #[arg(long, default_value_t = DEFAULT_HORIZON_DAYS)]
        days: i64,
        /// Meeting length in minutes
        #[arg(short, long, default_value_t = 60)]
        duration: u32,
        /// Zone of the organizer's calendar. Defaults to the host zone.
        #[arg(long)]
        reference_zone: Option<String>,
        /// JSON file with search options
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override the number of slots returned
        #[arg(long)]
        max_results: Option<usize>,
    },

    /// Build a proposal and export it.
    Propose {
        /// RFC 3339 instant
        instant: String,
        /// NAME=ZONE, or a known city
        #[arg(short = 'p', long = "participant", required = true)]
        participants: Vec<String>,
        /// Meeting length in minutes
        #[arg(short, long, default_value_t = 60)]
        duration: u32,
        /// Meeting title
        #[arg(short, long)]
        title: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = ProposalFormat::Text)]
        format: ProposalFormat,
    },

    /// List known zones and cities.
    Zones,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProposalFormat {
    Text,
    Json,
    Link,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Convert { instant, zones } => {
            let at = parse_instant(&instant)?;
            let mut rows = Vec::with_capacity(zones.len());
            for zone in &zones {
                rows.push(json!({
                    "zone": zone,
                    "local_time": local_time_string(at, zone)?,
                    "local_date_time": local_date_time_string(at, zone)?,
                    "civil": to_local(at, zone)?,
                }));
            }
            print_json(&rows)?;
        }

        Commands::Score {
            instant,
            participants,
        } => {
            let at = parse_instant(&instant)?;
            let store = build_participants(&participants)?;
            let mut rows = Vec::with_capacity(store.len());
            for p in store.as_slice() {
                rows.push(json!({
                    "participant": p.name,
                    "time_zone": p.time_zone,
                    "suitability": score_suitability(at, p)?,
                }));
            }
            print_json(&rows)?;
        }

        Commands::Suggest {
            participants,
            start,
            days,
            duration,
            reference_zone,
            config,
            max_results,
        } => {
            let store = build_participants(&participants)?;
            let reference = reference_zone.as_deref().map(parse_time_zone).transpose()?;
            let start = match (start, &reference) {
                (Some(s), Some(tz)) => parse_start(&s, tz)?,
                (Some(s), None) => parse_start(&s, &Local)?,
                (None, _) => Utc::now(),
            };
            if days < 0 {
                bail!("--days must not be negative, got {days}");
            }
            let range = DateRange::next_days(start, days)?;

            let mut options = match config {
                Some(path) => load_options(&path)?,
                None => SearchOptions::default(),
            };
            if let Some(max) = max_results {
                options.max_results = max;
            }
            debug!(?options, start = %range.start, end = %range.end, "searching");

            let slots = match &reference {
                Some(tz) => {
                    find_optimal_slots_with_options(store.as_slice(), &range, duration, tz, &options)?
                }
                None => find_optimal_slots_with_options(
                    store.as_slice(),
                    &range,
                    duration,
                    &Local,
                    &options,
                )?,
            };
            print_json(&slots)?;
        }

        Commands::Propose {
            instant,
            participants,
            duration,
            title,
            format,
        } => {
            let at = parse_instant(&instant)?;
            let people = build_participants(&participants)?;
            let mut proposals = ProposalStore::new();
            let proposal = proposals.add(at, duration, people.as_slice(), title)?;

            match format {
                ProposalFormat::Text => println!("{}", meeting_text(proposal, people.as_slice())?),
                ProposalFormat::Link => {
                    println!("{}", google_calendar_url(proposal, people.as_slice())?)
                }
                ProposalFormat::Json => print_json(&json!({
                    "proposal": proposal,
                    "overall_score": proposal.overall_score(people.as_slice()),
                    "optimal_count": proposal.optimal_count(people.as_slice()),
                    "acceptable_count": proposal.acceptable_count(people.as_slice()),
                    "file_name": download_file_name(proposal),
                }))?,
            }
        }

        Commands::Zones => {
            print_json(&json!({
                "time_zones": TIME_ZONES,
                "popular_cities": POPULAR_CITIES,
            }))?;
        }
    }

    Ok(())
}

/// Accept `NAME=ZONE` or a catalog city for each participant.
fn build_participants(specs: &[String]) -> Result<ParticipantStore> {
    let mut store = ParticipantStore::new();
    for spec in specs {
        let new = match spec.split_once('=') {
            Some((name, zone)) => NewParticipant {
                name: name.trim().to_string(),
                time_zone: zone.trim().to_string(),
                flag: catalog::flag_for_zone(zone.trim()).map(String::from),
                ..NewParticipant::default()
            },
            None => {
                let city = catalog::city(spec).with_context(|| {
                    format!("unknown city '{spec}'; use NAME=ZONE for other locations")
                })?;
                NewParticipant {
                    name: city.name.to_string(),
                    location: city.name.to_string(),
                    time_zone: city.time_zone.to_string(),
                    flag: Some(city.flag.to_string()),
                    ..NewParticipant::default()
                }
            }
        };
        store
            .add(new)
            .with_context(|| format!("invalid participant '{spec}'"))?;
    }
    Ok(store)
}

/// An RFC 3339 instant, or midnight of a bare date on the reference clock so
/// the scan anchors on that same date.
fn parse_start<T: TimeZone>(s: &str, reference: &T) -> Result<DateTime<Utc>> {
    if let Ok(at) = parse_instant(s) {
        return Ok(at);
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("--start '{s}' is neither RFC 3339 nor YYYY-MM-DD"))?;
    let midnight = date.and_time(NaiveTime::MIN);
    // Zones that spring forward at midnight start the day at 01:00.
    let at = reference
        .from_local_datetime(&midnight)
        .earliest()
        .or_else(|| reference.from_local_datetime(&(midnight + TimeDelta::hours(1))).earliest())
        .with_context(|| format!("--start '{s}' has no midnight on the reference clock"))?;
    Ok(at.with_timezone(&Utc))
}

fn load_options(path: &Path) -> Result<SearchOptions> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    SearchOptions::from_json(&raw).with_context(|| format!("invalid config {}", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
