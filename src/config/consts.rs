// src/config/consts.rs

// Net config
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";
pub const HTTP_TIMEOUT_SECS: u64 = 15;

// UFCStats
pub const UFCSTATS_BASE: &str = "http://ufcstats.com";
pub const UFCSTATS_UPCOMING: &str = "http://ufcstats.com/statistics/events/upcoming";
pub const UFCSTATS_COMPLETED: &str = "http://ufcstats.com/statistics/events/completed?page=all";

// MMA Decisions
pub const MMADECISIONS_BASE: &str = "https://mmadecisions.com/";
pub const DECISIONS_BY_EVENT: &str = "https://mmadecisions.com/decisions-by-event/";

// ESPN fight center
pub const ESPN_BASE: &str = "https://www.espn.com";
pub const ESPN_FIGHTCENTER: &str = "https://www.espn.com/mma/fightcenter/_/league/ufc";
pub const ROUND_SECS: u32 = 300;

// The Odds API
pub const ODDS_API_BASE: &str = "https://api.the-odds-api.com/v4";
pub const ODDS_SPORT: &str = "mma_mixed_martial_arts";
pub const ODDS_REGIONS: &str = "us,us2";

// Google location lookups (optional)
pub const PLACES_URL: &str = "https://maps.googleapis.com/maps/api/place/findplacefromtext/json";
pub const ELEVATION_URL: &str = "https://maps.googleapis.com/maps/api/elevation/json";

// Local cache
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// Export
pub const DEFAULT_OUT_DIR: &str = "data/raw";
pub const STATS_SUBDIR: &str = "stats/event_dumps";
pub const FIGHTERS_SUBDIR: &str = "stats/fighters";
pub const JUDGING_SUBDIR: &str = "judging";
pub const ODDS_SUBDIR: &str = "odds";
pub const ESPN_SUBDIR: &str = "espn";
pub const LIVE_ODDS_FILE: &str = "live_odds_output.jsonl";
pub const REFERENCES_FILE: &str = "ufcstats_events_api_data.jsonl";
pub const CLOSING_FILE: &str = "processed_events.jsonl";
pub const ESPN_LIVE_FILE: &str = "live_fightcenter.jsonl";

// Concurrency
pub const SYNC_WORKERS: usize = 1;
pub const ASYNC_WORKERS: usize = 5;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
pub const JITTER_MS: u64 = 50; // extra 0..50 ms

// Odds polling
pub const LIVE_POLL_SECS: u64 = 15;
pub const ODDS_API_PAUSE_MS: u64 = 1_000;
pub const ESPN_POLL_SECS: u64 = 2;

// Event matching
pub const MATCH_DATE_TOLERANCE_DAYS: i64 = 1;
pub const MATCH_CUTOFF: &str = "2022-06-25";

// Judges
pub const JUDGES_PER_FIGHT: usize = 3;
pub const DEFAULT_START_YEAR: i32 = 2025;
pub const DEFAULT_END_YEAR: i32 = 2000;

// ESPN historical
pub const ESPN_FIRST_YEAR: i32 = 1993;
