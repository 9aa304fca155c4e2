// tests/espn_parse.rs
//
// ESPN fight-center parser against a saved page, plus the collectors over
// canned pages.
//
use octagon_scrape::specs::espn::{self, EspnFight};

const PAGE: &str = include_str!("fixtures/espn_fightcenter.html");
const EVENT_URL: &str = "https://www.espn.com/mma/fightcenter/_/id/600041076/league/ufc";

fn fights() -> Vec<EspnFight> {
    espn::parse_fightcenter(PAGE)
}

#[test]
fn strips_without_two_fighters_are_skipped() {
    let names: Vec<_> = fights().iter().map(|f| (f.fighter1.name.clone(), f.fighter2.name.clone())).collect();
    assert_eq!(
        names,
        vec![
            ("Alex Pereira".to_string(), "Jamahal Hill".to_string()),
            ("Zhang Weili".to_string(), "Yan Xiaonan".to_string()),
            ("Justin Gaethje".to_string(), "Max Holloway".to_string()),
            ("Charles Oliveira".to_string(), "Arman Tsarukyan".to_string()),
        ]
    );
}

#[test]
fn finished_bout_has_result_and_stats_per_corner() {
    let f = &fights()[0];
    assert_eq!(f.method.as_deref(), Some("KO/TKO"));
    assert_eq!(f.round.as_deref(), Some("R1"));
    assert_eq!(f.time.as_deref(), Some("3:14"));
    assert_eq!(f.timestamp, Some(194));
    assert_eq!(f.fighter_victory.as_deref(), Some("Alex Pereira"));

    assert_eq!(f.fighter1.stat("Pre-Fight Odds"), Some("-130"));
    assert_eq!(f.fighter2.stat("SIG Strikes"), Some("8/32"));
    assert_eq!(f.fighter2.stat("Control"), Some("0:12"));
    // a row with one value is not a matchup stat
    assert_eq!(f.fighter1.stat("Reach"), None);
    let labels: Vec<_> = f.fighter1.stats.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(labels, ["Pre-Fight Odds", "KD", "SIG Strikes", "Control"]);
}

#[test]
fn decision_live_and_walkout_clocks() {
    let all = fights();
    assert_eq!(all[1].method.as_deref(), Some("U Dec"));
    assert_eq!(all[1].timestamp, Some(1500));
    assert!(all[1].fighter1.stats.is_empty());

    assert_eq!(all[2].method, None);
    assert_eq!(all[2].round.as_deref(), Some("R2"));
    assert_eq!(all[2].timestamp, Some(365));
    assert_eq!(all[2].fighter_victory, None);

    assert_eq!(all[3].method.as_deref(), Some("WALKOUTS"));
    assert_eq!(all[3].round, None);
    assert_eq!(all[3].timestamp, None);
}

#[test]
fn fight_serializes_with_corners_keyed_by_name() {
    let v = serde_json::to_value(&fights()[0]).unwrap();
    assert_eq!(v["fighter1"]["Alex Pereira"]["KD"], "1");
    assert_eq!(v["fighter2"]["Jamahal Hill"]["Pre-Fight Odds"], "+110");
    assert_eq!(v["method"], "KO/TKO");
    assert_eq!(v["timestamp"], 194);
    let null = serde_json::to_value(&fights()[2]).unwrap();
    assert!(null["method"].is_null() && null["fighter_victory"].is_null());
}

#[test]
fn page_dropdown_lists_events() {
    let urls = espn::parse_event_links(PAGE);
    assert_eq!(urls.len(), 2);
    assert_eq!(urls[0], EVENT_URL);
    assert_eq!(espn::event_id(&urls[1]).as_deref(), Some("600041075"));
}

mod collectors {
    use super::{EVENT_URL, PAGE};
    use std::{
        sync::atomic::{AtomicBool, AtomicUsize, Ordering},
        time::{Duration, Instant},
    };

    use octagon_scrape::config::options::ScrapeOptions;
    use octagon_scrape::error::NetError;
    use octagon_scrape::progress::{NullProgress, Progress};
    use octagon_scrape::scrape::espn::{collect_years, poll_live};
    use octagon_scrape::specs::espn::year_url;

    #[derive(Default)]
    struct Failures(Vec<String>);

    impl Progress for Failures {
        fn item_failed(&mut self, label: &str, _error: &str) {
            self.0.push(label.to_string());
        }
    }

    fn page(url: &str) -> Result<String, NetError> {
        if url == year_url(2024) || url == EVENT_URL {
            Ok(PAGE.to_string())
        } else {
            Err(NetError::Status { status: 404, url: url.to_string() })
        }
    }

    #[test]
    fn failed_years_and_events_are_skipped() {
        let opts = ScrapeOptions { workers: Some(2), ..ScrapeOptions::default() };
        let mut progress = Failures::default();
        let events = collect_years(&page, 2023, 2024, &opts, &mut progress);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_id.as_deref(), Some("600041076"));
        assert_eq!(events[0].fights.len(), 4);
        assert_eq!(
            progress.0,
            vec![
                "https://www.espn.com/mma/fightcenter/_/id/600041075/league/ufc".to_string(),
                "year 2023".to_string(),
            ]
        );
    }

    #[test]
    fn live_polls_append_one_line_each() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("espn").join("live.jsonl");
        let calls = AtomicUsize::new(0);
        let get = |url: &str| -> Result<String, NetError> {
            calls.fetch_add(1, Ordering::Relaxed);
            page(url)
        };

        let stop = AtomicBool::new(false);
        let written = poll_live(&get, EVENT_URL, &out, Duration::ZERO, Some(2), &stop, &mut NullProgress).unwrap();
        assert_eq!(written, 2);
        assert_eq!(calls.load(Ordering::Relaxed), 2);

        let text = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<serde_json::Value> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["fights"][2]["round"], "R2");
        assert!(lines[0]["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn live_stops_on_flag_and_skips_failed_polls() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("live.jsonl");
        let stop = AtomicBool::new(false);
        let get = |url: &str| -> Result<String, NetError> {
            stop.store(true, Ordering::Relaxed);
            Err(NetError::Status { status: 503, url: url.to_string() })
        };

        let t = Instant::now();
        let written = poll_live(&get, EVENT_URL, &out, Duration::from_secs(60), None, &stop, &mut NullProgress).unwrap();
        assert_eq!(written, 0);
        assert!(t.elapsed() < Duration::from_secs(5));
        assert!(!out.exists());
    }
}
