use chrono::Duration;
use quiz_core::model::Language;
use quiz_core::time::fixed_now;

use super::test_harness::{ViewKind, sample_source, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn scoreboard_renders_time_and_score() {
    let deadline = fixed_now() + Duration::milliseconds(61_234);
    let mut harness = setup_view_harness(
        ViewKind::ScoreBoard {
            deadline,
            score: 50,
        },
        sample_source(),
    );
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("01:01:234 | 50"), "missing board line in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn expired_scoreboard_clamps_to_zero() {
    let deadline = fixed_now() - Duration::seconds(1);
    let mut harness = setup_view_harness(
        ViewKind::ScoreBoard { deadline, score: 7 },
        sample_source(),
    );
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("00:00:000 | 7"), "missing board line in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn session_view_loads_first_round() {
    let mut harness = setup_view_harness(ViewKind::Session, sample_source());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Loading..."), "missing loading state in {html}");

    let html = harness.drive_until("Round 1").await;
    assert!(html.contains("Round 1 · Score 0"), "missing round heading in {html}");
    assert!(html.contains("00:30:000 | 0"), "missing scoreboard in {html}");
    assert!(html.contains("Give up"), "missing actions in {html}");
    assert_eq!(harness.source.request_count("dict/en/index.json"), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn session_view_offers_retry_when_content_is_missing() {
    let source = sample_source();
    source.fail_index_requests(&Language::new("en").unwrap(), 1);
    let mut harness = setup_view_harness(ViewKind::Session, source);
    harness.rebuild();

    let html = harness.drive_until("Retry").await;
    assert!(html.contains("Content is unavailable"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn language_picker_lists_initial_language_first() {
    let mut harness = setup_view_harness(ViewKind::Session, sample_source());
    harness.rebuild();
    let html = harness.render();
    let en = html.find("value=\"en\"").expect("en option");
    let da = html.find("value=\"da\"").expect("da option");
    assert!(en < da, "initial language should come first in {html}");
}
