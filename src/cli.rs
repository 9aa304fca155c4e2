// src/cli.rs
//! `octagon_scrape` command line. Every flag that the container images set
//! through the environment also reads that variable; `.env` is loaded first.

pub mod progress;

use std::{
    path::PathBuf,
    sync::{Arc, atomic::{AtomicBool, Ordering}},
    time::Duration,
};

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use crate::{
    compose::{self, BuildTarget},
    config::consts::*,
    config::options::{Mode, ScrapeOptions, Timeframe, env_var, require_env},
    error::{ConfigError, Result},
    matching,
    precomp::PrecompTable,
    scrape::{espn, judges, odds, ufcstats},
    specs::events,
};
use progress::ConsoleProgress;

/// Scrapers for UFC statistics, judges' scorecards and MMA odds
#[derive(Parser, Debug)]
#[command(name = "octagon_scrape")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory for scraped output
    #[arg(long, global = true, env = "OCTAGON_OUT_DIR", default_value = DEFAULT_OUT_DIR)]
    pub out: PathBuf,

    /// Worker count; overrides the mode's default
    #[arg(long, global = true)]
    pub workers: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build Docker Compose services for a Makefile target
    Build {
        /// Target name (build, build-espn, build-judges, odds-scraping, ufc-historical, ufc-latest)
        #[arg(required_unless_present = "list")]
        target: Option<String>,

        /// List targets and their commands
        #[arg(long)]
        list: bool,

        /// Print the command instead of running it
        #[arg(long)]
        dry_run: bool,
    },

    /// Scrape UFCStats events, fights and fighters
    Ufcstats {
        #[arg(long, value_enum, ignore_case = true, env = "SCRAPER_TIMEFRAME", default_value_t = Timeframe::Latest)]
        timeframe: Timeframe,

        #[arg(long, value_enum, ignore_case = true, env = "SCRAPER_MODE", default_value_t = Mode::Sync)]
        mode: Mode,

        /// Scrape one event page instead of a timeframe
        #[arg(long, conflicts_with = "fighter")]
        event: Option<String>,

        /// Scrape one fighter bio by UFCStats id
        #[arg(long)]
        fighter: Option<String>,

        /// Flat pre-competition CSV to merge into fight records
        #[arg(long, env = "PRECOMP_CSV")]
        precomp: Option<PathBuf>,
    },

    /// Scrape judges' scorecards from mmadecisions.com
    Judges {
        #[arg(long, value_enum, ignore_case = true, env = "SCRAPER_TIMEFRAME", default_value_t = Timeframe::Latest)]
        timeframe: Timeframe,

        #[arg(long, value_enum, ignore_case = true, env = "SCRAPER_MODE", default_value_t = Mode::Sync)]
        mode: Mode,

        #[arg(long, env = "START_YEAR", default_value_t = DEFAULT_START_YEAR)]
        start_year: i32,

        #[arg(long, env = "END_YEAR", default_value_t = DEFAULT_END_YEAR)]
        end_year: i32,
    },

    /// Scrape ESPN fight-center cards
    Espn {
        #[command(subcommand)]
        command: EspnCommand,
    },

    /// The Odds API collectors (needs ODDS_API_KEY)
    Odds {
        #[command(subcommand)]
        command: OddsCommand,
    },

    /// Tag a judges JSON array with UFCStats event ids
    MatchJudges {
        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        output: PathBuf,

        /// Only UFCStats events on or after this date are matched
        #[arg(long, default_value = MATCH_CUTOFF)]
        cutoff: NaiveDate,
    },

    /// Print the nested pre-competition stats for one fighter in one fight
    Precomp {
        #[arg(long)]
        csv: PathBuf,

        #[arg(long)]
        fight: String,

        #[arg(long)]
        fighter: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum EspnCommand {
    /// One card by ESPN event id
    Event { id: String },

    /// The card the fight center currently shows
    Latest,

    /// Every card listed for a span of years
    Historical {
        #[arg(long, value_enum, ignore_case = true, env = "SCRAPER_MODE", default_value_t = Mode::Sync)]
        mode: Mode,

        #[arg(long, env = "START_YEAR", default_value_t = DEFAULT_START_YEAR)]
        start_year: i32,

        #[arg(long, env = "END_YEAR", default_value_t = ESPN_FIRST_YEAR)]
        end_year: i32,
    },

    /// Reload the current card until Ctrl-C
    Live {
        /// Seconds between reloads
        #[arg(long, default_value_t = ESPN_POLL_SECS)]
        interval: u64,

        /// Stop after this many reloads
        #[arg(long)]
        max_polls: Option<usize>,

        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum OddsCommand {
    /// Poll live odds until Ctrl-C
    Live {
        /// Seconds between polls
        #[arg(long, default_value_t = LIVE_POLL_SECS)]
        interval: u64,

        /// Stop after this many polls
        #[arg(long)]
        max_polls: Option<usize>,

        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Historical event listings around every completed UFCStats event
    References,

    /// Closing lines for a references file
    Closing {
        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    fn options(&self, mode: Mode, precomp: Option<PathBuf>) -> ScrapeOptions {
        ScrapeOptions {
            out_dir: self.out.clone(),
            mode,
            workers: self.workers,
            precomp_csv: precomp,
            google_key: env_var("GOOGLE_KEY"),
        }
    }
}

/// A stop flag raised by Ctrl-C.
fn stop_on_ctrlc(what: &str) -> Arc<AtomicBool> {
    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed)) {
        logw!("{what}: no Ctrl-C handler: {e}");
    }
    stop
}

fn unsupported(timeframe: Timeframe) -> ConfigError {
    ConfigError::Invalid { key: "SCRAPER_TIMEFRAME", value: s!(timeframe.name()) }
}

/// Load `.env`, parse the command line and run it. Returns the exit code.
pub fn run() -> Result<i32> {
    dotenvy::dotenv().ok();
    run_with(Cli::parse())
}

pub fn run_with(cli: Cli) -> Result<i32> {
    let mut progress = ConsoleProgress::new();

    match &cli.command {
        Commands::Build { target, list, dry_run } => {
            let program = compose::compose_program();
            let Some(name) = target.as_deref().filter(|_| !list) else {
                for t in BuildTarget::all() {
                    println!("{:<16} {}", t.name(), t.command_line(&program));
                }
                return Ok(0);
            };
            let target = BuildTarget::parse(name)?;
            if *dry_run {
                println!("{}", target.command_line(&program));
                return Ok(0);
            }
            Ok(compose::run(target, &program)?)
        }

        Commands::Ufcstats { timeframe, mode, event, fighter, precomp } => {
            let opts = cli.options(*mode, precomp.clone());
            if let Some(id) = fighter {
                let path = ufcstats::fighter(id, &opts)?;
                println!("{}", path.display());
                return Ok(0);
            }
            let written = match (event, timeframe) {
                (Some(url), _) => vec![ufcstats::event(url, &opts, &mut progress)?],
                (None, Timeframe::Upcoming) => ufcstats::upcoming(&opts, &mut progress)?,
                (None, Timeframe::Latest) => {
                    vec![ufcstats::latest(&opts, Local::now().date_naive(), &mut progress)?]
                }
                (None, other) => return Err(unsupported(*other).into()),
            };
            for p in &written {
                println!("{}", p.display());
            }
            Ok(0)
        }

        Commands::Judges { timeframe, mode, start_year, end_year } => {
            let opts = cli.options(*mode, None);
            let now = Local::now().naive_local();
            let path = match timeframe {
                Timeframe::Latest => judges::latest(&opts, now, &mut progress)?,
                Timeframe::Historical => judges::range(*start_year, *end_year, &opts, now, &mut progress)?,
                other => return Err(unsupported(*other).into()),
            };
            println!("{}", path.display());
            Ok(0)
        }

        Commands::Espn { command } => {
            let mode = match command {
                EspnCommand::Historical { mode, .. } => *mode,
                _ => Mode::Sync,
            };
            let opts = cli.options(mode, None);
            let now = Local::now().naive_local();
            let path = match command {
                EspnCommand::Event { id } => espn::event(id, &opts)?,
                EspnCommand::Latest => espn::latest(&opts, now, &mut progress)?,
                EspnCommand::Historical { start_year, end_year, .. } => {
                    espn::historical(*start_year, *end_year, &opts, now, &mut progress)?
                }
                EspnCommand::Live { interval, max_polls, output } => {
                    let out = output.clone().unwrap_or_else(|| opts.espn_dir().join(ESPN_LIVE_FILE));
                    let stop = stop_on_ctrlc("ESPN");
                    let interval = Duration::from_secs(*interval);
                    espn::live(ESPN_FIGHTCENTER, &out, interval, *max_polls, &stop, &mut progress)?;
                    out
                }
            };
            println!("{}", path.display());
            Ok(0)
        }

        Commands::Odds { command } => {
            let key = require_env("ODDS_API_KEY")?;
            let opts = cli.options(Mode::Sync, None);
            match command {
                OddsCommand::Live { interval, max_polls, output } => {
                    let out = output.clone().unwrap_or_else(|| opts.odds_dir().join(LIVE_ODDS_FILE));
                    let stop = stop_on_ctrlc("Odds");
                    odds::live(&key, &out, Duration::from_secs(*interval), *max_polls, &stop, &mut progress)?;
                    println!("{}", out.display());
                }
                OddsCommand::References => {
                    let path = odds::references(&key, &opts, Local::now().date_naive(), &mut progress)?;
                    println!("{}", path.display());
                }
                OddsCommand::Closing { input, output } => {
                    let out = output.clone().unwrap_or_else(|| opts.odds_dir().join(CLOSING_FILE));
                    odds::closing(&key, input, &out, &mut progress)?;
                    println!("{}", out.display());
                }
            }
            Ok(0)
        }

        Commands::MatchJudges { input, output, cutoff } => {
            let ufc = events::fetch(UFCSTATS_COMPLETED)?;
            let matched = matching::attach_event_ids_file(input, output, &ufc, *cutoff)?;
            eprintln!("Tagged {matched} judges events");
            println!("{}", output.display());
            Ok(0)
        }

        Commands::Precomp { csv, fight, fighter } => {
            let table = PrecompTable::load(csv)?;
            match table.lookup(fight, fighter) {
                Some(v) => {
                    println!("{}", serde_json::to_string_pretty(&v)?);
                    Ok(0)
                }
                None => {
                    eprintln!("No pre-competition row for {fighter} in {fight}");
                    Ok(1)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeframe_errors_name_the_variable() {
        let msg = unsupported(Timeframe::Historical).to_string();
        assert!(msg.contains("SCRAPER_TIMEFRAME") && msg.contains("historical"));
    }
}
