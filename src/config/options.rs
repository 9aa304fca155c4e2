// src/config/options.rs
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use super::consts::*;
use crate::error::ConfigError;
use crate::scrape::pool::PoolOptions;

/// How many requests a collector keeps in flight.
/// `sync` walks items one at a time, `async` fans out over a worker pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    #[default]
    Sync,
    Async,
}

impl Mode {
    pub fn default_workers(self) -> usize {
        match self {
            Mode::Sync => SYNC_WORKERS,
            Mode::Async => ASYNC_WORKERS,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Timeframe {
    Upcoming,
    #[default]
    Latest,
    Historical,
}

impl Timeframe {
    pub fn name(self) -> &'static str {
        match self {
            Timeframe::Upcoming => "upcoming",
            Timeframe::Latest => "latest",
            Timeframe::Historical => "historical",
        }
    }
}

/// Options shared by every collector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub out_dir: PathBuf,
    pub mode: Mode,
    /// Overrides the mode's worker count when set.
    pub workers: Option<usize>,
    /// Flat `precomp_*` CSV used to enrich fight records.
    pub precomp_csv: Option<PathBuf>,
    /// Google API key for event location lookups.
    pub google_key: Option<String>,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            mode: Mode::default(),
            workers: None,
            precomp_csv: None,
            google_key: None,
        }
    }
}

impl ScrapeOptions {
    pub fn workers(&self) -> usize {
        self.workers.unwrap_or_else(|| self.mode.default_workers()).max(1)
    }

    pub fn pool(&self) -> PoolOptions {
        PoolOptions {
            workers: self.workers(),
            pause_ms: REQUEST_PAUSE_MS,
            jitter_ms: JITTER_MS,
        }
    }

    pub fn stats_dir(&self) -> PathBuf {
        self.out_dir.join(STATS_SUBDIR)
    }

    pub fn fighters_dir(&self) -> PathBuf {
        self.out_dir.join(FIGHTERS_SUBDIR)
    }

    pub fn judging_dir(&self) -> PathBuf {
        self.out_dir.join(JUDGING_SUBDIR)
    }

    pub fn odds_dir(&self) -> PathBuf {
        self.out_dir.join(ODDS_SUBDIR)
    }

    pub fn espn_dir(&self) -> PathBuf {
        self.out_dir.join(ESPN_SUBDIR)
    }

    pub fn precomp_csv(&self) -> Option<&Path> {
        self.precomp_csv.as_deref()
    }
}

/// Read an environment variable, treating empty values as unset.
pub fn env_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Like [`env_var`] but required.
pub fn require_env(key: &'static str) -> Result<String, ConfigError> {
    env_var(key).ok_or(ConfigError::MissingEnv(key))
}

/// Years to walk for a historical judges scrape, newest first.
/// Accepts the bounds in either order; both ends are inclusive.
pub fn year_range(start: i32, end: i32) -> Vec<i32> {
    let (hi, lo) = if start >= end { (start, end) } else { (end, start) };
    (lo..=hi).rev().collect()
}
