// src/compose.rs
//! Build targets for the Docker Compose services that package each scraper.
//!
//! Every target maps to exactly one `docker-compose build --no-cache <service...>`
//! invocation. The lists mirror the repository `Makefile` one-to-one and are
//! kept literal: `build-judges` names `judges_async_historical` twice and
//! has no `judges_sync_historical`.

use std::fmt;
use std::process::Command;

use thiserror::Error;

/// Program used when `COMPOSE_BIN` is not set.
pub const DEFAULT_COMPOSE_BIN: &str = "docker-compose";

/// Exit code reported when the child was terminated by a signal.
pub const SIGNALLED_EXIT_CODE: i32 = 1;

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("unknown build target {name:?} (expected one of: {expected})", expected = BuildTarget::names().join(", "))]
    UnknownTarget { name: String },

    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuildTarget {
    /// All services.
    Build,
    BuildEspn,
    BuildJudges,
    OddsScraping,
    UfcHistorical,
    UfcLatest,
}

impl BuildTarget {
    /// Makefile order.
    pub fn all() -> &'static [BuildTarget] {
        use BuildTarget::*;
        &[Build, BuildEspn, BuildJudges, OddsScraping, UfcHistorical, UfcLatest]
    }

    pub fn names() -> Vec<&'static str> {
        Self::all().iter().map(|t| t.name()).collect()
    }

    /// Target name as typed after `make`.
    pub fn name(self) -> &'static str {
        match self {
            BuildTarget::Build => "build",
            BuildTarget::BuildEspn => "build-espn",
            BuildTarget::BuildJudges => "build-judges",
            BuildTarget::OddsScraping => "odds-scraping",
            BuildTarget::UfcHistorical => "ufc-historical",
            BuildTarget::UfcLatest => "ufc-latest",
        }
    }

    pub fn parse(name: &str) -> Result<BuildTarget, ComposeError> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.name() == name)
            .ok_or_else(|| ComposeError::UnknownTarget { name: s!(name) })
    }

    /// Compose service names, in the order they are passed.
    /// Empty for `build`, which lets compose build every service.
    pub fn services(self) -> &'static [&'static str] {
        match self {
            BuildTarget::Build => &[],
            BuildTarget::BuildEspn => &["espn_historical", "espn_latest"],
            BuildTarget::BuildJudges => &[
                "judges_async_latest",
                "judges_sync_latest",
                "judges_async_historical",
                "judges_async_historical",
            ],
            BuildTarget::OddsScraping => &["odds_scraping"],
            BuildTarget::UfcHistorical => &["ufc_historical"],
            BuildTarget::UfcLatest => &["ufc_latest"],
        }
    }

    /// Full argument list handed to the compose program.
    pub fn args(self) -> Vec<String> {
        let mut args = svec!["build", "--no-cache"];
        args.extend(self.services().iter().map(|s| s!(*s)));
        args
    }

    /// Human-readable command line, e.g. for `--dry-run` output.
    pub fn command_line(self, program: &str) -> String {
        let mut line = s!(program);
        for arg in self.args() {
            line.push(' ');
            line.push_str(&arg);
        }
        line
    }
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve the compose program: `COMPOSE_BIN` if set and non-empty,
/// otherwise `docker-compose`.
pub fn compose_program() -> String {
    crate::config::options::env_var("COMPOSE_BIN").unwrap_or_else(|| s!(DEFAULT_COMPOSE_BIN))
}

/// Launch the build for `target` and wait for it.
///
/// Stdio is inherited so the build output streams straight through.
/// The child's exit code is returned unmodified; a child killed by a
/// signal has no code and is reported as [`SIGNALLED_EXIT_CODE`].
pub fn run(target: BuildTarget, program: &str) -> Result<i32, ComposeError> {
    logf!("compose: {}", target.command_line(program));

    let status = Command::new(program)
        .args(target.args())
        .status()
        .map_err(|source| ComposeError::Spawn { program: s!(program), source })?;

    let code = status.code().unwrap_or(SIGNALLED_EXIT_CODE);
    if code != 0 {
        logw!("compose: {target} exited with {code}");
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_parse() {
        for t in BuildTarget::all() {
            assert_eq!(BuildTarget::parse(t.name()).unwrap(), *t);
        }
    }

    #[test]
    fn unknown_target_lists_valid_names() {
        let err = BuildTarget::parse("build-odds").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("build-odds"));
        assert!(msg.contains("ufc-latest"));
    }

    #[test]
    fn command_line_joins_program_and_args() {
        assert_eq!(
            BuildTarget::UfcLatest.command_line("docker-compose"),
            "docker-compose build --no-cache ufc_latest"
        );
        assert_eq!(BuildTarget::Build.command_line("dc"), "dc build --no-cache");
    }
}
