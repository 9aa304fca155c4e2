// src/scrape/pool.rs
// Fixed-size worker pool for request-bound jobs.
// Workers claim indices from a shared counter, pause between requests
// and send results back over a channel; the calling thread aggregates.

use std::{
    fmt::Display,
    sync::{mpsc, atomic::{AtomicUsize, Ordering}},
    thread,
    time::Duration,
};

use crate::progress::Progress;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolOptions {
    pub workers: usize,
    pub pause_ms: u64,
    pub jitter_ms: u64,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            workers: crate::config::consts::SYNC_WORKERS,
            pause_ms: crate::config::consts::REQUEST_PAUSE_MS,
            jitter_ms: crate::config::consts::JITTER_MS,
        }
    }
}

impl PoolOptions {
    /// No pauses; for tests and offline work.
    pub fn unpaced(workers: usize) -> Self {
        Self { workers, pause_ms: 0, jitter_ms: 0 }
    }
}

/// Run `job` over every item. Successful results come back in input order;
/// failures are logged, reported to `progress` and left out.
pub fn collect<T, R, E, F>(
    items: &[T],
    label: impl Fn(&T) -> String,
    job: F,
    opts: PoolOptions,
    progress: &mut dyn Progress,
) -> Vec<R>
where
    T: Sync,
    R: Send,
    E: Display,
    F: Fn(&T) -> Result<R, E> + Sync,
{
    progress.begin(items.len());
    if items.is_empty() {
        progress.finish();
        return Vec::new();
    }

    let counter = AtomicUsize::new(0);
    let workers = opts.workers.min(items.len()).max(1);
    let (tx, rx) = mpsc::channel::<(usize, Result<R, String>)>();
    let mut slots: Vec<Option<R>> = items.iter().map(|_| None).collect();

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let counter = &counter;
            let job = &job;
            scope.spawn(move || loop {
                let i = counter.fetch_add(1, Ordering::Relaxed);
                if i >= items.len() {
                    break;
                }
                let result = job(&items[i]).map_err(|e| e.to_string());
                if tx.send((i, result)).is_err() {
                    break;
                }
                if opts.pause_ms > 0 || opts.jitter_ms > 0 {
                    let jitter = if opts.jitter_ms > 0 { (i as u64 * 7) % opts.jitter_ms } else { 0 };
                    thread::sleep(Duration::from_millis(opts.pause_ms + jitter)); // be polite
                }
            });
        }
        drop(tx); // main thread is sole receiver now

        for (i, result) in rx.iter() {
            let name = label(&items[i]);
            match result {
                Ok(r) => {
                    slots[i] = Some(r);
                    progress.item_done(&name);
                }
                Err(msg) => {
                    loge!("{name}: {msg}");
                    progress.item_failed(&name, &msg);
                }
            }
        }
    });

    progress.finish();
    slots.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NullProgress;

    #[test]
    fn keeps_input_order_with_many_workers() {
        let items: Vec<u32> = (0..50).collect();
        let out = collect(
            &items,
            |i| format!("item {i}"),
            |i| Ok::<_, String>(i * 2),
            PoolOptions::unpaced(8),
            &mut NullProgress,
        );
        assert_eq!(out, items.iter().map(|i| i * 2).collect::<Vec<_>>());
    }

    #[test]
    fn empty_input_is_fine() {
        let items: Vec<u32> = Vec::new();
        let out = collect(&items, |_| s!(), |i| Ok::<_, String>(*i), PoolOptions::unpaced(4), &mut NullProgress);
        assert!(out.is_empty());
    }
}
