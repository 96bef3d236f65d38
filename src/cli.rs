use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::{error, info, warn};
use rcurator::clients::SpotifyClient;
use rcurator::clients::errors::Result;
use rcurator::organizer::{self, ConfigBuilder, Organizer};
use rcurator::period::Period;

#[derive(Parser)]
#[command(name = "rcurator")]
#[command(version, about = "Roll last month's Spotify playlist into month, year and all-time playlists", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Append the previous month's playlist to the month, year and all-time playlists
    Organize {
        /// Reference date, the month before it is processed [default: today]
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,

        /// Name of the aggregate playlist
        #[arg(long, env = "RCURATOR_ALL_TIME_PLAYLIST", default_value = organizer::DEFAULT_ALL_TIME_PLAYLIST)]
        all_time_playlist: String,

        /// Read everything, write nothing
        #[arg(long)]
        dry_run: bool,

        /// Do not append tracks a destination already contains
        #[arg(long)]
        skip_existing: bool,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the playlist names a run would use
    Names {
        /// Reference date, the month before it is used [default: today]
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,

        /// Name of the aggregate playlist
        #[arg(long, env = "RCURATOR_ALL_TIME_PLAYLIST", default_value = organizer::DEFAULT_ALL_TIME_PLAYLIST)]
        all_time_playlist: String,
    },
}

fn resolve_period(date: Option<NaiveDate>) -> Result<Period> {
    match date {
        Some(d) => Period::preceding(d),
        None => Period::current(),
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    execute(cli).await.inspect_err(|e| error!("An error occurred: {e}"))
}

async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Organize {
            date,
            all_time_playlist,
            dry_run,
            skip_existing,
            json,
        } => {
            let period = resolve_period(date)?;
            organize(period, all_time_playlist, dry_run, skip_existing, json).await?;
        }
        Commands::Names {
            date,
            all_time_playlist,
        } => {
            let all_time_playlist = organizer::validate_playlist_name(all_time_playlist)?;
            let period = resolve_period(date)?;
            println!("source:   {}", period.source_playlist_name());
            println!("month:    {}", period.month_playlist_name());
            println!("year:     {}", period.year_playlist_name());
            println!("all-time: {all_time_playlist}");
        }
    }
    Ok(())
}

async fn organize(
    period: Period,
    all_time_playlist: String,
    dry_run: bool,
    skip_existing: bool,
    json: bool,
) -> Result<()> {
    info!("Building config ...");
    let spotify = SpotifyClient::try_default()?;
    info!("Authorizing client ...");
    // CLI prompt may be shown when there is no cached token
    spotify.authorize_client().await?;

    let config = ConfigBuilder::new()
        .service(spotify)
        .period(period)
        .all_time_playlist(all_time_playlist)
        .dry_run(dry_run)
        .skip_existing(skip_existing)
        .build()?;
    let report = Organizer::new(config).run().await?;

    for missing in report.missing() {
        warn!("Skipped {:?} playlist '{}'", missing.kind, missing.name);
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
