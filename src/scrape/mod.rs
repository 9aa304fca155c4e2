// src/scrape/mod.rs
//! Collectors: fetch pages through `specs`, fan out over the worker pool,
//! write JSON under the output directory.
pub mod espn;
pub mod judges;
pub mod odds;
pub mod pool;
pub mod ufcstats;

use std::{
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::{Duration, Instant},
};

/// Sleep for `total`, waking early when `stop` is raised. Returns whether it was.
pub(crate) fn wait(total: Duration, stop: &AtomicBool) -> bool {
    let step = Duration::from_millis(200);
    let t = Instant::now();
    while t.elapsed() < total {
        if stop.load(Ordering::Relaxed) {
            return true;
        }
        thread::sleep(step.min(total.saturating_sub(t.elapsed())));
    }
    stop.load(Ordering::Relaxed)
}
