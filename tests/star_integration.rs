//! Star bookkeeping against the on-disk store and the bundled schedule.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use confsched::{AppConfig, FileStore, ScheduleStore, StorageConfig};

fn open(config: &AppConfig) -> ScheduleStore<FileStore> {
    ScheduleStore::new(FileStore::new(config.storage_dir()), config.source.clone())
        .expect("bundled schedule decodes")
}

fn config_in(dir: &std::path::Path) -> AppConfig {
    AppConfig {
        storage: StorageConfig {
            data_dir: Some(dir.to_path_buf()),
        },
        ..Default::default()
    }
}

#[test]
fn first_run_seeds_bundled_schedule_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(&config_in(dir.path()));

    let entries = store.get_stored().unwrap();
    assert_eq!(entries.len(), 40);
    assert!(dir.path().join("schedule.json").exists());
    assert!(!dir.path().join("stars.json").exists());
}

#[test]
fn stars_survive_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    {
        let mut store = open(&config);
        let keynote = store.find_by_title("Keynote").unwrap().cloned().unwrap();
        let panel = store.find_by_title("Q&A Panel").unwrap().cloned().unwrap();
        store.add_star(&keynote).unwrap();
        store.add_star(&panel).unwrap();
    }

    let mut reopened = open(&config);
    let titles: Vec<String> = reopened
        .starred_entries()
        .unwrap()
        .into_iter()
        .map(|(_, e)| e.title.clone())
        .collect();
    assert_eq!(titles, vec!["Keynote".to_string(), "Q&A Panel".to_string()]);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("stars.json")).unwrap(),
        "[3,38]"
    );
}

#[test]
fn toggle_is_an_involution_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(&config_in(dir.path()));
    let talk = store
        .find_by_title("Security in Angular 2")
        .unwrap()
        .cloned()
        .unwrap();

    assert!(!store.is_starred(&talk).unwrap());
    assert!(store.toggle_star(&talk).unwrap());
    assert!(store.is_starred(&talk).unwrap());
    assert!(!store.toggle_star(&talk).unwrap());
    assert!(!store.is_starred(&talk).unwrap());
    assert!(store.get_starred().unwrap().is_empty());
}

#[test]
fn reopened_store_reads_persisted_snapshot_not_bundled() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let mut first = open(&config);
    first.get_stored().unwrap();
    std::fs::write(
        dir.path().join("schedule.json"),
        r#"[{"type":"TALK","title":"Only talk","time":null,"duration":null,"description":null}]"#,
    )
    .unwrap();

    let mut second = open(&config);
    let entries = second.get_stored().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "Only talk");
}
