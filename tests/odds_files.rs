// tests/odds_files.rs
//
// Odds output files: JSONL snapshots and concatenated pretty references.
//
use chrono::{NaiveDate, TimeZone, Utc};
use octagon_scrape::file::{append_jsonl, append_pretty, read_text};
use octagon_scrape::specs::odds::{
    OddsReference, OddsSnapshot, parse_concatenated, reference_date, reference_event_ids, snapshot_timestamp,
};
use serde_json::json;

#[test]
fn references_written_pretty_read_back_in_order() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("odds/ufcstats_events_api_data.jsonl");
    let day = NaiveDate::from_ymd_opt(2024, 4, 13).unwrap();

    let first = OddsReference {
        event_id: "0a1b".into(),
        name: "UFC 300: Pereira vs. Hill".into(),
        date: reference_date(day),
        response: Some(json!({"timestamp": "2024-04-13T10:05:00Z", "data": [{"id": "e1"}, {"id": "e2"}]})),
    };
    let failed = OddsReference { event_id: "0c1d".into(), response: None, ..first.clone() };
    append_pretty(&path, &first).unwrap();
    append_pretty(&path, &failed).unwrap();

    let text = read_text(&path).unwrap();
    assert!(text.lines().count() > 2, "references are pretty-printed");

    let back = parse_concatenated(&text);
    assert_eq!(back.len(), 2);
    assert_eq!(back[0]["date"], "2024-04-13T00:00:00");
    assert_eq!(reference_event_ids(&back[0]), vec!["e1", "e2"]);
    assert!(back[1]["response"].is_null());
    assert!(reference_event_ids(&back[1]).is_empty());

    let typed: OddsReference = serde_json::from_value(back[0].clone()).unwrap();
    assert_eq!(typed, first);
}

#[test]
fn live_snapshots_are_one_compact_line_each() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("live_odds_output.jsonl");
    let at = Utc.with_ymd_and_hms(2024, 4, 13, 22, 15, 0).unwrap();

    for n in 0..3 {
        let snap = OddsSnapshot { timestamp: snapshot_timestamp(at), live_odds: json!([{"id": n}]) };
        append_jsonl(&path, &snap).unwrap();
    }

    let text = read_text(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    let last: OddsSnapshot = serde_json::from_str(lines[2]).unwrap();
    assert_eq!(last.timestamp, "2024-04-13T22:15:00Z");
    assert_eq!(last.live_odds[0]["id"], 2);
}

#[test]
fn truncated_reference_file_keeps_leading_objects() {
    let text = "{\n    \"event_id\": \"a\",\n    \"date\": \"2024-04-13T00:00:00\"\n}\n{\n    \"event_id\": \"b\",";
    let back = parse_concatenated(text);
    assert_eq!(back.len(), 1);
    assert_eq!(back[0]["event_id"], "a");
}

mod listener {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    use octagon_scrape::error::NetError;
    use octagon_scrape::progress::NullProgress;
    use octagon_scrape::scrape::odds::poll_live;
    use serde_json::{Value, json};

    #[test]
    fn zero_max_polls_makes_no_request() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("live.jsonl");
        let calls = AtomicUsize::new(0);
        let get = |_url: &str, _query: &[(&str, String)]| -> Result<Value, NetError> {
            calls.fetch_add(1, Ordering::Relaxed);
            Ok(json!([]))
        };

        let stop = AtomicBool::new(false);
        let n = poll_live(&get, "k", &out, Duration::ZERO, Some(0), &stop, &mut NullProgress).unwrap();
        assert_eq!(n, 0);
        assert_eq!(calls.load(Ordering::Relaxed), 0);
        assert!(!out.exists());
    }

    #[test]
    fn failed_polls_are_skipped_until_max_polls() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("live.jsonl");
        let calls = AtomicUsize::new(0);
        let get = |url: &str, query: &[(&str, String)]| -> Result<Value, NetError> {
            assert!(query.iter().any(|(k, v)| *k == "apiKey" && v == "k"));
            match calls.fetch_add(1, Ordering::Relaxed) {
                1 => Err(NetError::Status { status: 503, url: url.to_string() }),
                n => Ok(json!([{"id": format!("e{n}")}])),
            }
        };

        let stop = AtomicBool::new(false);
        let n = poll_live(&get, "k", &out, Duration::ZERO, Some(3), &stop, &mut NullProgress).unwrap();
        assert_eq!(calls.load(Ordering::Relaxed), 3);
        assert_eq!(n, 2);

        let text = std::fs::read_to_string(&out).unwrap();
        let ids: Vec<String> = text
            .lines()
            .map(|l| serde_json::from_str::<Value>(l).unwrap()["live_odds"][0]["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["e0", "e2"]);
    }

    #[test]
    fn stop_flag_ends_the_wait_between_polls() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("live.jsonl");
        let stop = AtomicBool::new(false);
        let get = |_url: &str, _query: &[(&str, String)]| -> Result<Value, NetError> {
            stop.store(true, Ordering::Relaxed);
            Ok(json!([]))
        };

        let t = Instant::now();
        let n = poll_live(&get, "k", &out, Duration::from_secs(60), None, &stop, &mut NullProgress).unwrap();
        assert_eq!(n, 1);
        assert!(t.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn raised_stop_flag_means_no_poll() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("live.jsonl");
        let get = |_url: &str, _query: &[(&str, String)]| -> Result<Value, NetError> {
            panic!("polled after stop");
        };
        let stop = AtomicBool::new(true);
        assert_eq!(poll_live(&get, "k", &out, Duration::ZERO, None, &stop, &mut NullProgress).unwrap(), 0);
    }
}

mod reference_events {
    use chrono::NaiveDate;
    use octagon_scrape::scrape::odds::reference_rows;
    use octagon_scrape::specs::events;

    const COMPLETED: &str = r#"
      <table><tbody>
        <tr class="b-statistics__table-row">
          <td class="b-statistics__table-col">
            <a href="http://ufcstats.com/event-details/next1" class="b-link b-link_style_white">UFC 301: Pantoja vs. Erceg</a>
            <span class="b-statistics__date">May 04, 2024</span>
          </td>
          <td class="b-statistics__table-col b-statistics__table-col_style_big-top-padding">Rio de Janeiro, Brazil</td>
        </tr>
        <tr class="b-statistics__table-row">
          <td class="b-statistics__table-col">
            <a href="http://ufcstats.com/event-details/done1" class="b-link b-link_style_black">UFC 300: Pereira vs. Hill</a>
            <span class="b-statistics__date">April 13, 2024</span>
          </td>
          <td class="b-statistics__table-col b-statistics__table-col_style_big-top-padding">Las Vegas, Nevada, USA</td>
        </tr>
        <tr class="b-statistics__table-row">
          <td class="b-statistics__table-col">
            <a href="http://ufcstats.com/event-details/nodate" class="b-link b-link_style_black">UFC Fight Night</a>
            <span class="b-statistics__date">TBD</span>
          </td>
          <td class="b-statistics__table-col b-statistics__table-col_style_big-top-padding">Las Vegas, Nevada, USA</td>
        </tr>
      </tbody></table>"#;

    #[test]
    fn only_past_dated_cards_are_queried() {
        let rows = events::parse(COMPLETED);
        assert_eq!(rows.len(), 3);

        // even once its date has passed, the highlighted row stays out
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let picked: Vec<&str> = reference_rows(&rows, today).iter().map(|(r, _)| r.id.as_str()).collect();
        assert_eq!(picked, vec!["done1"]);

        let before = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        assert!(reference_rows(&rows, before).is_empty());
    }
}
