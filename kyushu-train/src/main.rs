use std::error::Error;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use scraper::Html;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kyushu_train::domain::{SearchQuery, Station, TimeCondition};
use kyushu_train::extract::{DateContext, JourneyAssembler};
use kyushu_train::kyushu::{ClientConfig, KyushuClient};
use kyushu_train::output::{DroppedBlockDto, HolidayDto, JourneyDto, StationDto};

/// Environment variable overriding the site base URL.
const BASE_URL_VAR: &str = "KYUSHU_BASE_URL";

#[derive(Debug, Parser)]
#[command(name = "kyushu-train", version, about = "Search JR Kyushu train journeys")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Find stations by kanji name
    Stations { keyword: String },

    /// List Japanese public holidays
    Holidays,

    /// Search for journeys between two stations
    Search(SearchArgs),

    /// Extract journeys from a saved results page
    Parse {
        file: PathBuf,

        /// Date the search was made for (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Fail on the first block that cannot be assembled
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Debug, clap::Args)]
struct SearchArgs {
    #[arg(long)]
    from_name: String,
    #[arg(long)]
    from_code: String,
    #[arg(long)]
    to_name: String,
    #[arg(long)]
    to_code: String,

    /// Search time as "YYYY/MM/DD HH:MM"
    #[arg(long, value_parser = parse_search_time)]
    at: NaiveDateTime,

    /// 0 depart after, 1 arrive before, 2 first train, 3 last train
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=3))]
    condition: u8,

    #[arg(long, default_value_t = 1)]
    adults: u32,
    #[arg(long, default_value_t = 0)]
    children: u32,

    #[arg(long)]
    no_express: bool,
    #[arg(long)]
    no_transfer: bool,
    #[arg(long)]
    no_shinkansen: bool,
    #[arg(long)]
    no_outer_kyushu: bool,
}

fn parse_search_time(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y/%m/%d %H:%M")
        .map_err(|e| format!("expected YYYY/MM/DD HH:MM: {e}"))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Stations { keyword } => {
            let stations = client()?.find_stations(&keyword).await?;
            let dtos: Vec<StationDto> = stations.iter().map(StationDto::from_station).collect();
            print_json(&dtos)
        }
        Command::Holidays => {
            let holidays = client()?.holidays().await?;
            let dtos: Vec<HolidayDto> = holidays.iter().map(HolidayDto::from_holiday).collect();
            print_json(&dtos)
        }
        Command::Search(args) => search(args).await,
        Command::Parse { file, date, strict } => parse(file, date, strict),
    }
}

fn client() -> Result<KyushuClient, Box<dyn Error>> {
    let mut config = ClientConfig::new();
    if let Ok(url) = std::env::var(BASE_URL_VAR) {
        info!(url = %url, "Using base URL from {BASE_URL_VAR}");
        config = config.with_base_url(url);
    }
    Ok(KyushuClient::new(config)?)
}

async fn search(args: SearchArgs) -> Result<(), Box<dyn Error>> {
    let query = SearchQuery::builder(
        Station::new(args.from_name, &args.from_code)?,
        Station::new(args.to_name, &args.to_code)?,
        TimeCondition::from_ordinal(args.condition)?,
        args.at,
    )
    .adults(args.adults)
    .children(args.children)
    .include_express(!args.no_express)
    .allow_transfer(!args.no_transfer)
    .include_shinkansen(!args.no_shinkansen)
    .include_outer_kyushu(!args.no_outer_kyushu)
    .build()?;

    let client = client()?;
    if client.is_maintenance().await? {
        return Err("the reservation site is under maintenance".into());
    }

    info!(
        from = %query.departure_station(),
        to = %query.arrival_station(),
        at = %query.search_datetime(),
        "Searching"
    );
    let journeys = client.search(&query).await?;
    info!(count = journeys.len(), "Search complete");

    let dtos: Vec<JourneyDto> = journeys.iter().map(JourneyDto::from_journey).collect();
    print_json(&dtos)
}

fn parse(file: PathBuf, date: Option<NaiveDate>, strict: bool) -> Result<(), Box<dyn Error>> {
    let html = std::fs::read_to_string(&file)?;
    let dates = match date {
        Some(date) => DateContext::new(date, date),
        None => DateContext::today(),
    };
    let assembly = JourneyAssembler::new(dates).assemble(&Html::parse_document(&html));

    #[derive(Serialize)]
    struct ParseOutput {
        journeys: Vec<JourneyDto>,
        dropped: Vec<DroppedBlockDto>,
    }

    let output = ParseOutput {
        journeys: assembly.journeys().iter().map(JourneyDto::from_journey).collect(),
        dropped: assembly.dropped().iter().map(DroppedBlockDto::from_dropped).collect(),
    };

    if strict {
        if let Err(dropped) = assembly.into_strict() {
            return Err(format!("block {} dropped: {}", dropped.index, dropped.reason).into());
        }
    }

    print_json(&output)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
