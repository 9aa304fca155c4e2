// tests/judges_parse.rs
//
// mmadecisions.com parsers against saved pages in tests/fixtures.
//
use octagon_scrape::specs::decisions::{self, JudgeEvent, RoundScore, TotalScore};

const INDEX: &str = include_str!("fixtures/decisions_index.html");
const EVENT: &str = include_str!("fixtures/decisions_event.html");
const FIGHT: &str = include_str!("fixtures/decisions_fight.html");

const FIGHT_URL: &str = "https://mmadecisions.com/decision/14780/Jiri-Prochazka-vs-Aleksandar-Rakic";

#[test]
fn index_lists_event_links_in_page_order() {
    let urls = decisions::parse_index(INDEX);
    assert_eq!(
        urls,
        vec![
            "https://mmadecisions.com/event/1452/UFC-300-Pereira-vs-Hill",
            "https://mmadecisions.com/event/1449/UFC-Fight-Night-Allen-vs-Curtis-2",
        ]
    );
}

#[test]
fn event_details_and_unique_fight_links() {
    let (details, fights) = decisions::parse_event(EVENT);
    assert_eq!(details.name, "UFC 300: Pereira vs. Hill");
    assert_eq!(details.location, "T-Mobile Arena, Las Vegas, Nevada, USA");
    assert_eq!(details.date, "13/04/2024");
    assert_eq!(
        fights,
        vec![
            "https://mmadecisions.com/decision/14779/Kayla-Harrison-vs-Holly-Holm",
            FIGHT_URL,
        ]
    );
}

#[test]
fn fight_scorecards() {
    let fight = decisions::parse_fight(FIGHT, FIGHT_URL).unwrap();
    assert_eq!(fight.fight_url, FIGHT_URL);
    assert_eq!(fight.fighter1, "Jiri Prochazka");
    assert_eq!(fight.fighter2, "Aleksandar Rakic");
    assert_eq!(fight.judges.keys().collect::<Vec<_>>(), vec!["Judge1", "Judge2", "Judge3"]);

    let j1 = &fight.judges["Judge1"];
    assert_eq!(j1.judge_name, "Sal D'Amato");
    // the unscored fourth round is dropped
    assert_eq!(j1.rounds.len(), 3);
    assert_eq!(j1.rounds[1], RoundScore { round: "2".into(), fighter1: 9, fighter2: 10 });
    assert_eq!(j1.total, Some(TotalScore { fighter1: 29, fighter2: 28 }));

    assert_eq!(fight.judges["Judge2"].judge_name, "Junichiro Kamijo");
    assert_eq!(fight.judges["Judge2"].total, Some(TotalScore { fighter1: 30, fighter2: 27 }));
}

#[test]
fn judge_event_json_omits_missing_event_id() {
    let (event_details, _) = decisions::parse_event(EVENT);
    let mut ev = JudgeEvent {
        event_url: "https://mmadecisions.com/event/1452/UFC-300-Pereira-vs-Hill".into(),
        event_details,
        event_id: None,
        fights: vec![decisions::parse_fight(FIGHT, FIGHT_URL).unwrap()],
    };
    let v = serde_json::to_value(&ev).unwrap();
    assert!(v.get("event_id").is_none());
    assert_eq!(v["fights"][0]["judges"]["Judge3"]["rounds"][0]["fighter1"], 9);

    ev.event_id = Some("0a1b2c3d4e5f6789".into());
    let v = serde_json::to_value(&ev).unwrap();
    assert_eq!(v["event_id"], "0a1b2c3d4e5f6789");

    let back: JudgeEvent = serde_json::from_value(v).unwrap();
    assert_eq!(back, ev);
}

#[test]
fn unparsed_event_date_is_kept() {
    let html = r#"<table><tr class="bottom-row"><td class="decision-bottom2">TBA</td></tr></table>"#;
    let (details, fights) = decisions::parse_event(html);
    assert_eq!(details.date, "TBA");
    assert!(details.name.is_empty());
    assert!(fights.is_empty());
}

mod year_range {
    use super::{EVENT, FIGHT, INDEX};
    use chrono::NaiveDate;
    use octagon_scrape::config::options::ScrapeOptions;
    use octagon_scrape::error::NetError;
    use octagon_scrape::progress::Progress;
    use octagon_scrape::scrape::judges::collect_range;
    use octagon_scrape::specs::decisions::year_url;
    use octagon_scrape::specs::events::EventRow;

    #[derive(Default)]
    struct Failures(Vec<String>);

    impl Progress for Failures {
        fn item_failed(&mut self, label: &str, _error: &str) {
            self.0.push(label.to_string());
        }
    }

    fn page(url: &str) -> Result<String, NetError> {
        let missing = |status| Err(NetError::Status { status, url: url.to_string() });
        if url == year_url(2024) {
            Ok(INDEX.to_string())
        } else if url == year_url(2023) {
            missing(503)
        } else if url.contains("/event/1452/") {
            Ok(EVENT.to_string())
        } else if url.contains("/event/1449/") {
            missing(404)
        } else if url.contains("/decision/14780/") {
            Ok(FIGHT.to_string())
        } else {
            missing(500)
        }
    }

    #[test]
    fn failed_years_events_and_fights_are_skipped() {
        let ufc = vec![EventRow {
            id: "ufc300".into(),
            name: "UFC 300: Pereira vs. Hill".into(),
            url: "http://ufcstats.com/event-details/ufc300".into(),
            date: NaiveDate::from_ymd_opt(2024, 4, 13),
            date_str: "April 13, 2024".into(),
            location: "Las Vegas, Nevada, USA".into(),
            next_event: false,
        }];
        let opts = ScrapeOptions { workers: Some(2), ..ScrapeOptions::default() };
        let mut failures = Failures::default();

        let events = collect_range(&page, &ufc, 2023, 2024, &opts, &mut failures);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_details.name, "UFC 300: Pereira vs. Hill");
        assert_eq!(events[0].event_id.as_deref(), Some("ufc300"));
        assert_eq!(events[0].fights.len(), 1);
        assert_eq!(events[0].fights[0].fighter1, "Jiri Prochazka");

        assert_eq!(
            failures.0,
            vec![
                "https://mmadecisions.com/decision/14779/Kayla-Harrison-vs-Holly-Holm",
                "https://mmadecisions.com/event/1449/UFC-Fight-Night-Allen-vs-Curtis-2",
                "year 2023",
            ]
        );
    }
}
