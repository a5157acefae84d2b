use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use itertools::Itertools;
use tracing_subscriber::EnvFilter;

use robotevents_quals::{
    ClientConfig, EventFilter, EventSummary, EventWhen, GradeLevel, RobotEventsClient,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "World Championship qualification from RobotEvents")]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct ProgramArgs {
    /// Program abbreviation or name, e.g. VEXU
    #[arg(short, long)]
    program: String,

    /// Season id (defaults to the current season)
    #[arg(short, long)]
    season: Option<u32>,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "lower_case")]
enum Command {
    /// Report the qualified teams and open skills slots of a country for a season
    Season {
        #[command(flatten)]
        program: ProgramArgs,

        /// Country as spelled by RobotEvents, e.g. "United States"
        #[arg(short, long)]
        country: String,

        #[arg(short, long, default_value = "college")]
        grade_level: GradeLevel,

        /// Only events on or after this date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        from_date: Option<NaiveDate>,

        /// Only events on or before this date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        to_date: Option<NaiveDate>,

        /// Number of event pages fetched at once
        #[arg(long)]
        concurrency: Option<usize>,
    },
    /// Show the qualified teams of one event
    Event {
        /// Event SKU or event page URL
        sku: String,

        #[command(flatten)]
        program: ProgramArgs,
    },
    /// List the events of a season
    Events {
        #[command(flatten)]
        program: ProgramArgs,

        #[arg(short, long, default_value = "future")]
        when: EventWhen,

        #[arg(short, long)]
        country: Option<String>,
    },
}

fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
}

#[tokio::main]
async fn main() {
    setup_logging();
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Season {
            program,
            country,
            grade_level,
            from_date,
            to_date,
            concurrency,
        } => {
            let mut config = ClientConfig::default();
            if let Some(concurrency) = concurrency {
                config.concurrency = concurrency;
            }
            let client = RobotEventsClient::with_config(config)?;
            let program_info = client
                .get_program(&program.program)
                .await
                .context("failed to look up program")?;
            let season = RobotEventsClient::select_season(&program_info, program.season)?;

            let filter = EventFilter {
                when: EventWhen::All,
                grade_level: Some(grade_level),
                from_date,
                to_date,
                qualifies_for_worlds: true,
                ..EventFilter::default()
            };
            let report = client
                .season_report(season, &filter, &country, grade_level)
                .await
                .with_context(|| format!("failed to build the {season} report for {country}"))?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{report}");
            }
        }
        Command::Event { sku, program } => {
            let client = RobotEventsClient::new()?;
            let program_info = client
                .get_program(&program.program)
                .await
                .context("failed to look up program")?;
            let season = RobotEventsClient::select_season(&program_info, program.season)?;

            let sku = robotevents_quals::sku_from_url(&sku).unwrap_or(sku.as_str());
            let mut event = client.get_event(season, sku).await?;
            let qualification = client
                .qualify_event(&mut event)
                .await
                .with_context(|| format!("failed to qualify {event}"))?;

            if cli.json {
                let summary = EventSummary {
                    sku: event.sku.clone(),
                    name: event.name.clone(),
                    date: event.date,
                    published: event
                        .awards()
                        .is_some_and(|awards| awards.iter().any(|a| a.team.is_some())),
                    qualification,
                };
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{event}");
                print!("{qualification}");
            }
        }
        Command::Events {
            program,
            when,
            country,
        } => {
            let client = RobotEventsClient::new()?;
            let program_info = client
                .get_program(&program.program)
                .await
                .context("failed to look up program")?;
            let season = RobotEventsClient::select_season(&program_info, program.season)?;

            let filter = EventFilter {
                when,
                country,
                ..EventFilter::default()
            };
            let mut events = client.get_events(season, &filter).await?;
            robotevents_quals::qualification::sort_canonical(&mut events);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&events)?);
            } else {
                let lines = events.iter().map(|event| {
                    let date = event
                        .date
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "TBD".to_string());
                    format!("{date}  {:<16} {}", event.sku, event.name)
                });
                println!("{}", lines.format("\n"));
            }
        }
    }
    Ok(())
}
