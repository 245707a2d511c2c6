//! Schedule update tests against a mock schedule page.
//!
//! Covers the fetch → parse → persist path end to end, and checks that
//! network and structure failures never clobber the cached schedule.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use confsched::store::{SCHEDULE_KEY, STARS_KEY};
use confsched::{
    EntryType, FileStore, KeyValueStore, MemoryStore, ScheduleEntry, ScheduleError,
    ScheduleStore, ScrapeConfig, ScrapeError,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SCHEDULE_PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<div id="day3-collapse" class="panel-collapse collapse in">
  <ul class="timeline">
    <li>
      <div class="timeline-badge"><i class="fa fa-microphone"></i></div>
      <div class="timeline-panel">
        <div class="timeline-heading">
          <h4 class="timeline-title">Keynote</h4>
          <p><small class="text-muted">
            <span>Jan 01, 2020, 09:00am</span> <span>30</span>
          </small></p>
        </div>
        <div class="timeline-body"><p>Welcome</p></div>
      </div>
    </li>
    <li>
      <div class="timeline-badge"><i class="fa fa-coffee"></i></div>
      <div class="timeline-panel">
        <div class="timeline-heading">
          <h4 class="timeline-title">Coffee Break</h4>
          <p><small class="text-muted">
            <span>Jan 01, 2020, 09:30am</span> <span>not-a-number</span>
          </small></p>
        </div>
      </div>
    </li>
    <li>
      <div class="timeline-badge"><i class="fa fa-question"></i></div>
      <div class="timeline-panel">
        <div class="timeline-heading"><h4 class="timeline-title">Q&amp;A Panel</h4></div>
      </div>
    </li>
  </ul>
</div>
</body></html>"#;

fn source_for(server: &MockServer) -> ScrapeConfig {
    ScrapeConfig {
        url: format!("{}/schedule", server.uri()),
        timeout_seconds: 5,
        ..Default::default()
    }
}

fn bundled() -> Vec<ScheduleEntry> {
    vec![
        ScheduleEntry::new(EntryType::NewDay, "Conference Day 1"),
        ScheduleEntry::new(EntryType::Talk, "Bundled talk"),
    ]
}

async fn serve(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/schedule"))
        .respond_with(template)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn update_parses_and_persists_the_page() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(200).set_body_string(SCHEDULE_PAGE)).await;

    let mut store = ScheduleStore::with_shipped(MemoryStore::new(), source_for(&server), bundled());
    let entries = store.update().await.expect("update should succeed").to_vec();

    assert_eq!(entries.len(), 3);
    let keynote = &entries[0];
    assert_eq!(keynote.kind, EntryType::Talk);
    assert_eq!(keynote.title, "Keynote");
    assert_eq!(
        keynote.time.map(|t| t.to_rfc3339()),
        Some("2020-01-01T09:00:00+00:00".to_string())
    );
    assert_eq!(keynote.duration, Some(30));
    assert_eq!(keynote.description.as_deref(), Some("Welcome"));

    assert!(entries[1].is_parse_error());
    assert_eq!(entries[2].kind, EntryType::Questions);

    // The in-memory snapshot and the persisted one agree.
    assert_eq!(store.get_stored().unwrap(), entries.as_slice());
    let persisted: Vec<ScheduleEntry> =
        serde_json::from_str(&store.storage().get(SCHEDULE_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(persisted, entries);
}

#[tokio::test]
async fn update_replaces_a_previously_loaded_snapshot() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(200).set_body_string(SCHEDULE_PAGE)).await;

    let mut store = ScheduleStore::with_shipped(MemoryStore::new(), source_for(&server), bundled());
    assert_eq!(store.get_stored().unwrap(), bundled().as_slice());

    store.update().await.unwrap();
    assert!(store.find_by_title("Bundled talk").unwrap().is_none());
    assert!(store.find_by_title("Keynote").unwrap().is_some());
}

#[tokio::test]
async fn http_error_is_network_error_and_keeps_snapshot() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(503)).await;

    let mut store = ScheduleStore::with_shipped(MemoryStore::new(), source_for(&server), bundled());
    store.get_stored().unwrap();

    let err = store.update().await.unwrap_err();
    assert!(
        matches!(err, ScheduleError::Scrape(ScrapeError::Network(_))),
        "got {err}"
    );
    assert_eq!(store.get_stored().unwrap(), bundled().as_slice());
}

#[tokio::test]
async fn missing_container_is_parse_error_and_keeps_persisted_snapshot() {
    let server = MockServer::start().await;
    serve(
        &server,
        ResponseTemplate::new(200).set_body_string("<html><body><p>Coming soon</p></body></html>"),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let mut seeded = ScheduleStore::with_shipped(
        FileStore::new(dir.path()),
        source_for(&server),
        bundled(),
    );
    seeded.get_stored().unwrap();
    let before = std::fs::read_to_string(dir.path().join("schedule.json")).unwrap();

    let err = seeded.update().await.unwrap_err();
    assert_eq!(err.to_string(), "parse error: container not found");

    let after = std::fs::read_to_string(dir.path().join("schedule.json")).unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn missing_list_is_parse_error() {
    let server = MockServer::start().await;
    serve(
        &server,
        ResponseTemplate::new(200)
            .set_body_string(r#"<html><body><div id="day3-collapse"></div></body></html>"#),
    )
    .await;

    let mut store = ScheduleStore::with_shipped(MemoryStore::new(), source_for(&server), vec![]);
    let err = store.update().await.unwrap_err();
    assert_eq!(err.to_string(), "parse error: list not found");
    assert!(!store.storage().contains(SCHEDULE_KEY).unwrap());
}

#[tokio::test]
async fn update_does_not_touch_stars() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(200).set_body_string(SCHEDULE_PAGE)).await;

    let mut storage = MemoryStore::new();
    storage.set(STARS_KEY, "[1,7]").unwrap();
    let mut store = ScheduleStore::with_shipped(storage, source_for(&server), bundled());

    store.update().await.unwrap();
    assert_eq!(
        store.storage().get(STARS_KEY).unwrap().as_deref(),
        Some("[1,7]")
    );
    // Index 7 is past the new snapshot and is simply skipped.
    let starred: Vec<usize> = store
        .starred_entries()
        .unwrap()
        .into_iter()
        .map(|(i, _)| i)
        .collect();
    assert_eq!(starred, vec![1]);
}
