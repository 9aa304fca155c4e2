// tests/pool.rs
//
// Worker pool: ordering, failure isolation, progress reporting.
//
use octagon_scrape::progress::Progress;
use octagon_scrape::scrape::pool::{PoolOptions, collect};

#[derive(Default)]
struct Recorder {
    total: Option<usize>,
    done: Vec<String>,
    failed: Vec<(String, String)>,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) {
        self.total = Some(total);
    }
    fn item_done(&mut self, label: &str) {
        self.done.push(label.to_string());
    }
    fn item_failed(&mut self, label: &str, error: &str) {
        self.failed.push((label.to_string(), error.to_string()));
    }
    fn finish(&mut self) {
        self.finished = true;
    }
}

#[test]
fn failures_are_reported_and_left_out() {
    let items: Vec<u32> = (0..20).collect();
    let mut rec = Recorder::default();

    let out = collect(
        &items,
        |i| format!("fight {i}"),
        |i| if i % 3 == 0 { Err(format!("no page for {i}")) } else { Ok(i * 10) },
        PoolOptions::unpaced(5),
        &mut rec,
    );

    let expected: Vec<u32> = items.iter().filter(|i| *i % 3 != 0).map(|i| i * 10).collect();
    assert_eq!(out, expected);
    assert_eq!(rec.total, Some(20));
    assert_eq!(rec.done.len(), expected.len());
    assert_eq!(rec.failed.len(), 7);
    assert!(rec.failed.iter().any(|(l, e)| l == "fight 9" && e == "no page for 9"));
    assert!(rec.finished);
}

#[test]
fn single_worker_matches_many_workers() {
    let items: Vec<String> = (0..12).map(|i| format!("u{i}")).collect();
    let run = |workers| {
        collect(
            &items,
            |s| s.clone(),
            |s| Ok::<_, String>(s.to_uppercase()),
            PoolOptions::unpaced(workers),
            &mut octagon_scrape::progress::NullProgress,
        )
    };
    assert_eq!(run(1), run(8));
    assert_eq!(run(1)[11], "U11");
}

#[test]
fn paced_pool_still_finishes() {
    let items = [1u8, 2, 3];
    let opts = PoolOptions { workers: 2, pause_ms: 5, jitter_ms: 3 };
    let out = collect(&items, |i| i.to_string(), |i| Ok::<_, String>(*i), opts, &mut Recorder::default());
    assert_eq!(out, vec![1, 2, 3]);
}
