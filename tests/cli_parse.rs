// tests/cli_parse.rs
//
// Command-line surface: flags, defaults and the offline `build` paths.
//
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use octagon_scrape::cli::{Cli, Commands, EspnCommand, OddsCommand, run_with};
use octagon_scrape::config::options::{Mode, Timeframe};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("octagon_scrape").chain(args.iter().copied())).unwrap()
}

#[test]
fn judges_historical_with_years_and_mode() {
    let cli = parse(&["judges", "--timeframe", "historical", "--mode", "async", "--start-year", "2024", "--end-year", "2021"]);
    match cli.command {
        Commands::Judges { timeframe, mode, start_year, end_year } => {
            assert_eq!(timeframe, Timeframe::Historical);
            assert_eq!(mode, Mode::Async);
            assert_eq!((start_year, end_year), (2024, 2021));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn global_flags_after_the_subcommand() {
    let cli = parse(&["ufcstats", "--timeframe", "upcoming", "--out", "/tmp/octagon", "--workers", "8"]);
    assert_eq!(cli.out, PathBuf::from("/tmp/octagon"));
    assert_eq!(cli.workers, Some(8));
    assert!(matches!(cli.command, Commands::Ufcstats { timeframe: Timeframe::Upcoming, .. }));
}

#[test]
fn mode_values_ignore_case() {
    let cli = parse(&["ufcstats", "--mode", "ASYNC"]);
    assert!(matches!(cli.command, Commands::Ufcstats { mode: Mode::Async, .. }));
}

#[test]
fn espn_subcommands() {
    let cli = parse(&["espn", "historical", "--mode", "async", "--start-year", "2024", "--end-year", "2022"]);
    match cli.command {
        Commands::Espn { command: EspnCommand::Historical { mode, start_year, end_year } } => {
            assert_eq!(mode, Mode::Async);
            assert_eq!((start_year, end_year), (2024, 2022));
        }
        other => panic!("unexpected {other:?}"),
    }

    let cli = parse(&["espn", "event", "600041076"]);
    assert!(matches!(cli.command, Commands::Espn { command: EspnCommand::Event { ref id } } if id == "600041076"));

    let cli = parse(&["espn", "live", "--max-polls", "3"]);
    match cli.command {
        Commands::Espn { command: EspnCommand::Live { interval, max_polls, output } } => {
            assert_eq!(interval, 2);
            assert_eq!(max_polls, Some(3));
            assert!(output.is_none());
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn odds_subcommands() {
    let cli = parse(&["odds", "live", "--interval", "30", "--max-polls", "4"]);
    match cli.command {
        Commands::Odds { command: OddsCommand::Live { interval, max_polls, output } } => {
            assert_eq!(interval, 30);
            assert_eq!(max_polls, Some(4));
            assert!(output.is_none());
        }
        other => panic!("unexpected {other:?}"),
    }

    let cli = parse(&["odds", "closing", "--input", "refs.jsonl"]);
    assert!(matches!(
        cli.command,
        Commands::Odds { command: OddsCommand::Closing { ref input, output: None } } if input == &PathBuf::from("refs.jsonl")
    ));
}

#[test]
fn match_judges_default_cutoff() {
    let cli = parse(&["match-judges", "--input", "a.json", "--output", "b.json"]);
    match cli.command {
        Commands::MatchJudges { cutoff, .. } => assert_eq!(cutoff, NaiveDate::from_ymd_opt(2022, 6, 25).unwrap()),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn build_needs_a_target_unless_listing() {
    let argv = ["octagon_scrape", "build"];
    assert!(Cli::try_parse_from(argv).is_err());
    assert!(matches!(parse(&["build", "--list"]).command, Commands::Build { list: true, target: None, .. }));
}

#[test]
fn build_dry_run_and_unknown_target() {
    assert_eq!(run_with(parse(&["build", "ufc-latest", "--dry-run"])).unwrap(), 0);
    assert_eq!(run_with(parse(&["build", "--list"])).unwrap(), 0);

    let err = run_with(parse(&["build", "build-odds"])).unwrap_err();
    assert!(err.to_string().contains("build-odds"));
}
