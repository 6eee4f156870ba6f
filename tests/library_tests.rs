//! End-to-end library flows against an in-memory SQLite store.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde_json::{Value, json};
use showlib::config::{Config, LibraryConfig};
use showlib::domain::UpdateMode;
use showlib::domain::events::LibraryEvent;
use showlib::entities::{prelude::Statuses, statuses};
use showlib::library::titles::{QueryOptions, TitleQuery};
use showlib::models::info::ShowInfo;
use showlib::models::show::{FileType, ShowAttrs};
use showlib::services::{
    Collaborators, FileDownloader, FileRegistry, LibraryReconciler, ShowError, ShowInfoSource,
    ShowService, StatusRegistry, UpdateOutcome,
};
use showlib::{HostServices, SharedState, ShutdownFlag, Store};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;

#[derive(Default)]
struct FakeInfoSource {
    payloads: Mutex<HashMap<String, Value>>,
}

impl FakeInfoSource {
    fn set(&self, identifier: &str, payload: Value) {
        self.payloads
            .lock()
            .unwrap()
            .insert(identifier.to_string(), payload);
    }
}

#[async_trait::async_trait]
impl ShowInfoSource for FakeInfoSource {
    async fn fetch_show_info(&self, identifier: &str) -> anyhow::Result<Option<ShowInfo>> {
        let payload = self.payloads.lock().unwrap().get(identifier).cloned();
        Ok(payload.and_then(ShowInfo::from_value))
    }
}

/// Stores every URL under `/cache`; URLs containing "broken" fail.
#[derive(Default)]
struct FakeDownloader {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl FileDownloader for FakeDownloader {
    async fn download(&self, url: &str) -> anyhow::Result<Option<PathBuf>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if url.contains("broken") {
            anyhow::bail!("connection reset");
        }
        let name = url.rsplit('/').next().unwrap_or("image.jpg");
        Ok(Some(PathBuf::from("/cache").join(name)))
    }
}

struct Harness {
    store: Store,
    info: Arc<FakeInfoSource>,
    downloader: Arc<FakeDownloader>,
    shutdown: ShutdownFlag,
    events: broadcast::Sender<LibraryEvent>,
    reconciler: LibraryReconciler,
}

async fn harness() -> Harness {
    let store = Store::new("sqlite::memory:")
        .await
        .expect("failed to open store");
    let store_arc = Arc::new(store.clone());
    let info = Arc::new(FakeInfoSource::default());
    let downloader = Arc::new(FakeDownloader::default());
    let shutdown = ShutdownFlag::new();
    let (events, _) = broadcast::channel(32);

    let deps = Collaborators {
        shows: store_arc.clone(),
        statuses: store_arc.clone(),
        info_source: info.clone(),
        downloader: downloader.clone(),
        files: store_arc,
        lifecycle: Arc::new(shutdown.clone()),
    };
    let reconciler = LibraryReconciler::new(deps, LibraryConfig::default(), events.clone());

    Harness {
        store,
        info,
        downloader,
        shutdown,
        events,
        reconciler,
    }
}

fn defaults(titles: &[showlib::models::show::TitleRecord]) -> Vec<(&str, bool)> {
    titles
        .iter()
        .map(|t| (t.title.as_str(), t.is_default))
        .collect()
}

async fn wait_for_event(
    events: &mut broadcast::Receiver<LibraryEvent>,
    wanted: impl Fn(&LibraryEvent) -> bool,
) -> LibraryEvent {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match events.recv().await {
                Ok(event) if wanted(&event) => break event,
                Ok(_) => {}
                Err(e) => panic!("event bus closed: {e}"),
            }
        }
    })
    .await
    .expect("expected library event never arrived")
}

#[tokio::test]
async fn create_twice_keeps_one_record() {
    let h = harness().await;

    let first = h
        .reconciler
        .create_show(ShowAttrs::new("81189").with_title("Breaking Bad"), UpdateMode::Skip)
        .await
        .unwrap();
    let second = h
        .reconciler
        .create_show(ShowAttrs::new("81189"), UpdateMode::Skip)
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.title_strings(), vec!["Breaking Bad"]);
    // the first refresh picks the default
    assert_eq!(defaults(&first.titles), vec![("Breaking Bad", false)]);
    assert_eq!(h.store.list_shows().await.unwrap().len(), 1);
}

#[tokio::test]
async fn concurrent_creates_share_one_record() {
    let h = harness().await;
    let a = h.reconciler.clone();
    let b = h.reconciler.clone();

    let (left, right) = tokio::join!(
        a.create_show(ShowAttrs::new("73255").with_title("House"), UpdateMode::Skip),
        b.create_show(ShowAttrs::new("73255").with_title("House"), UpdateMode::Skip),
    );

    assert_eq!(left.unwrap().id, right.unwrap().id);
    let shows = h.store.list_shows().await.unwrap();
    assert_eq!(shows.len(), 1);
    assert_eq!(shows[0].titles.len(), 1);
}

#[tokio::test]
async fn same_identifier_with_other_type_is_separate() {
    let h = harness().await;

    let show = h
        .reconciler
        .create_show(ShowAttrs::new("603"), UpdateMode::Skip)
        .await
        .unwrap();
    let movie = h
        .reconciler
        .create_show(ShowAttrs::new("603").with_type("movie"), UpdateMode::Skip)
        .await
        .unwrap();

    assert_ne!(show.id, movie.id);
    assert_eq!(movie.show_type, "movie");
}

#[tokio::test]
async fn create_rejects_blank_identifier() {
    let h = harness().await;
    let err = h
        .reconciler
        .create_show(ShowAttrs::new("   "), UpdateMode::Skip)
        .await
        .unwrap_err();
    assert!(matches!(err, ShowError::InvalidData(_)));
}

#[tokio::test]
async fn new_show_waits_for_update() {
    let h = harness().await;
    h.store.ping().await.unwrap();
    let needs_update = h.store.get_status("needs_update").await.unwrap().unwrap();

    let snapshot = h
        .reconciler
        .create_show(ShowAttrs::new("81189"), UpdateMode::Skip)
        .await
        .unwrap();

    assert_eq!(snapshot.status_id, needs_update.id);
    assert_eq!(snapshot.show_type, "show");
    assert_eq!(snapshot.primary_provider, "thetvdb");
    assert!(snapshot.titles.is_empty());
    assert!(snapshot.last_updated.is_none());
}

#[tokio::test]
async fn synchronous_create_returns_refreshed_snapshot() {
    let h = harness().await;
    h.info.set(
        "81189",
        json!({
            "titles": ["Breaking Bad"],
            "plot": "A chemistry teacher turns to crime.",
            "year": "2008",
            "status": "Ended",
            "airs_time": "9:00 PM",
            "airs_dayofweek": "Sunday",
            "lastupdated": 1_700_000_000,
            "in_library": true,
        }),
    );
    let done = h.store.get_status("done").await.unwrap().unwrap();

    let snapshot = h
        .reconciler
        .create_show(ShowAttrs::new("81189"), UpdateMode::Synchronous)
        .await
        .unwrap();

    assert_eq!(snapshot.status_id, done.id);
    assert_eq!(snapshot.year, Some(2008));
    assert_eq!(snapshot.show_status.as_deref(), Some("ended"));
    assert_eq!(snapshot.airs_dayofweek, 64);
    assert_eq!(snapshot.last_updated, Some(1_700_000_000));
    assert_eq!(defaults(&snapshot.titles), vec![("Breaking Bad", true)]);
    assert!(!snapshot.info.contains_key("in_library"));
}

#[tokio::test]
async fn single_title_becomes_default() {
    let h = harness().await;
    h.reconciler
        .create_show(ShowAttrs::new("1"), UpdateMode::Skip)
        .await
        .unwrap();
    h.info.set("1", json!({ "titles": ["Alpha"] }));

    let outcome = h.reconciler.update_show("1", "", false).await.unwrap();
    let snapshot = outcome.into_snapshot().unwrap();

    assert_eq!(defaults(&snapshot.titles), vec![("Alpha", true)]);
}

#[tokio::test]
async fn preferred_title_matches_case_insensitively() {
    let h = harness().await;
    h.reconciler
        .create_show(ShowAttrs::new("2"), UpdateMode::Skip)
        .await
        .unwrap();
    h.info.set("2", json!({ "titles": ["Alpha", "Beta"] }));

    let snapshot = h
        .reconciler
        .update_show("2", "beta", false)
        .await
        .unwrap()
        .into_snapshot()
        .unwrap();

    assert_eq!(
        defaults(&snapshot.titles),
        vec![("Alpha", false), ("Beta", true)]
    );
}

#[tokio::test]
async fn refresh_replaces_titles_and_merges_info() {
    let h = harness().await;
    h.reconciler
        .create_show(ShowAttrs::new("3").with_title("Provisional"), UpdateMode::Skip)
        .await
        .unwrap();

    h.info
        .set("3", json!({ "titles": ["First"], "network": "AMC" }));
    h.reconciler.update_show("3", "", false).await.unwrap();

    h.info.set("3", json!({ "titles": ["Second", "Third"] }));
    let snapshot = h
        .reconciler
        .update_show("3", "", false)
        .await
        .unwrap()
        .into_snapshot()
        .unwrap();

    assert_eq!(snapshot.title_strings(), vec!["Second", "Third"]);
    assert_eq!(snapshot.info["network"], "AMC");
    assert_eq!(snapshot.info["titles"], json!(["Second", "Third"]));
}

#[tokio::test]
async fn missing_info_leaves_record_untouched() {
    let h = harness().await;
    let created = h
        .reconciler
        .create_show(ShowAttrs::new("4").with_title("Provisional"), UpdateMode::Skip)
        .await
        .unwrap();

    let outcome = h.reconciler.update_show("4", "", false).await.unwrap();
    assert_eq!(outcome, UpdateOutcome::NoInfo);

    // bookkeeping keys alone do not count as info
    h.info.set("4", json!({ "in_wanted": true }));
    let outcome = h.reconciler.update_show("4", "", false).await.unwrap();
    assert_eq!(outcome, UpdateOutcome::NoInfo);

    let stored = h.store.get_show(created.id).await.unwrap().unwrap();
    assert_eq!(stored.titles, created.titles);
    assert_eq!(stored.status_id, created.status_id);
}

#[tokio::test]
async fn info_without_record_is_not_found() {
    let h = harness().await;
    h.info.set("404", json!({ "titles": ["Ghost"] }));

    let err = h.reconciler.update_show("404", "", false).await.unwrap_err();
    assert!(matches!(err, ShowError::NotFound(id) if id == "404"));
}

#[tokio::test]
async fn shutdown_skips_update() {
    let h = harness().await;
    let created = h
        .reconciler
        .create_show(ShowAttrs::new("5").with_title("Before"), UpdateMode::Skip)
        .await
        .unwrap();
    h.info.set("5", json!({ "titles": ["After"] }));
    h.shutdown.trigger();

    let outcome = h.reconciler.update_show("5", "", false).await.unwrap();
    assert_eq!(outcome, UpdateOutcome::ShuttingDown);

    let stored = h.store.get_show(created.id).await.unwrap().unwrap();
    assert_eq!(stored.titles, created.titles);
}

#[tokio::test]
async fn attaches_at_most_one_poster() {
    let h = harness().await;
    h.reconciler
        .create_show(ShowAttrs::new("6"), UpdateMode::Skip)
        .await
        .unwrap();
    h.info.set(
        "6",
        json!({
            "titles": ["Six"],
            "images": { "poster": [
                "https://img.example/broken.jpg",
                "https://img.example/six.jpg",
                "https://img.example/six-alt.jpg"
            ]},
        }),
    );

    let snapshot = h
        .reconciler
        .update_show("6", "", false)
        .await
        .unwrap()
        .into_snapshot()
        .unwrap();

    assert_eq!(snapshot.files.len(), 1);
    assert_eq!(snapshot.files[0].path, "/cache/six.jpg");
    assert_eq!(snapshot.files[0].file_type.category, "image");
    assert_eq!(snapshot.files[0].file_type.subtype, "poster");
    assert_eq!(h.downloader.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn deleting_show_keeps_registered_files() {
    let h = harness().await;
    let created = h
        .reconciler
        .create_show(ShowAttrs::new("7"), UpdateMode::Skip)
        .await
        .unwrap();
    h.info.set(
        "7",
        json!({ "titles": ["Seven"], "images": { "poster": ["https://img.example/7.jpg"] } }),
    );
    let snapshot = h
        .reconciler
        .update_show("7", "", false)
        .await
        .unwrap()
        .into_snapshot()
        .unwrap();
    let file_id = snapshot.files[0].id;

    assert!(h.store.delete_show(created.id).await.unwrap());
    assert!(h.store.get_show(created.id).await.unwrap().is_none());
    assert!(h.store.get_file(file_id).await.unwrap().is_some());
}

#[tokio::test]
async fn detached_create_publishes_update() {
    let h = harness().await;
    let mut events = h.events.subscribe();
    h.info.set("8", json!({ "titles": ["Eight"] }));

    let snapshot = h
        .reconciler
        .create_show(ShowAttrs::new("8"), UpdateMode::Detached)
        .await
        .unwrap();
    assert!(snapshot.titles.is_empty());

    let updated = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match events.recv().await {
                Ok(LibraryEvent::ShowUpdated { identifier, titles, .. }) => {
                    break (identifier, titles);
                }
                Ok(_) => {}
                Err(e) => panic!("event bus closed: {e}"),
            }
        }
    })
    .await
    .expect("no ShowUpdated event");

    assert_eq!(updated, ("8".to_string(), 1));
}

#[tokio::test]
async fn actor_handles_library_requests() {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.library.add_update_mode = UpdateMode::Synchronous;

    let info = Arc::new(FakeInfoSource::default());
    info.set("9", json!({ "titles": ["The Nine", "Nine"] }));
    let host = HostServices {
        info_source: info.clone(),
        downloader: Arc::new(FakeDownloader::default()),
    };

    let state = SharedState::new(config, host).await.unwrap();

    let snapshot = state
        .library
        .add_show(ShowAttrs::new("9"), None)
        .await
        .unwrap();
    assert_eq!(snapshot.title_strings(), vec!["The Nine", "Nine"]);

    let query = state
        .library
        .query_titles(snapshot.clone(), QueryOptions::default())
        .await
        .unwrap();
    assert_eq!(query, Some(TitleQuery::First(Some("the nine".to_string()))));

    let all = state
        .library
        .query_titles(
            snapshot,
            QueryOptions {
                first: false,
                condense: true,
            },
        )
        .await
        .unwrap();
    assert_eq!(all.map(TitleQuery::into_vec), Some(vec!["the nine".to_string()]));

    let outcome = state.library.update_show("missing", "", false).await.unwrap();
    assert_eq!(outcome, UpdateOutcome::NoInfo);
}

#[tokio::test]
async fn query_ignores_non_show_records() {
    let h = harness().await;
    let movie = h
        .reconciler
        .create_show(
            ShowAttrs::new("603").with_type("movie").with_title("The Matrix"),
            UpdateMode::Skip,
        )
        .await
        .unwrap();

    assert!(
        h.reconciler
            .query_titles(&movie, QueryOptions::default())
            .is_none()
    );
}

#[tokio::test]
async fn refreshing_same_poster_reuses_file() {
    let h = harness().await;
    let created = h
        .reconciler
        .create_show(ShowAttrs::new("10"), UpdateMode::Skip)
        .await
        .unwrap();
    h.info.set(
        "10",
        json!({ "titles": ["Ten"], "images": { "poster": ["https://img.example/ten.jpg"] } }),
    );

    let mut file_ids = Vec::new();
    for _ in 0..3 {
        let snapshot = h
            .reconciler
            .update_show("10", "", false)
            .await
            .unwrap()
            .into_snapshot()
            .unwrap();
        assert_eq!(snapshot.files.len(), 1);
        file_ids.push(snapshot.files[0].id);
    }

    assert!(file_ids.iter().all(|id| *id == file_ids[0]));
    let stored = h.store.get_show(created.id).await.unwrap().unwrap();
    assert_eq!(stored.files.len(), 1);
    assert_eq!(stored.files[0].path, "/cache/ten.jpg");
}

#[tokio::test]
async fn registering_known_path_returns_existing_file() {
    let h = harness().await;
    let path = Path::new("/cache/shared.jpg");

    let first = h
        .store
        .register_file(path, &FileType::new("image", "poster"))
        .await
        .unwrap()
        .unwrap();
    let second = h
        .store
        .register_file(path, &FileType::new("image", "fanart"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(first, second);
    let file = h.store.lookup_file(second.id).await.unwrap();
    assert_eq!(file.file_type, FileType::new("image", "fanart"));
}

#[tokio::test]
async fn failed_update_after_add_still_returns_record() {
    let h = harness().await;
    let mut events = h.events.subscribe();
    h.info.set("12", json!({ "titles": ["Twelve"] }));
    Statuses::delete_many()
        .filter(statuses::Column::Identifier.eq("done"))
        .exec(&h.store.conn)
        .await
        .unwrap();

    let snapshot = h
        .reconciler
        .create_show(
            ShowAttrs::new("12").with_title("Provisional"),
            UpdateMode::Synchronous,
        )
        .await
        .unwrap();

    let needs_update = h.store.get_status("needs_update").await.unwrap().unwrap();
    assert_eq!(snapshot.status_id, needs_update.id);
    assert_eq!(snapshot.title_strings(), vec!["Provisional"]);

    let failed = wait_for_event(&mut events, |e| {
        matches!(e, LibraryEvent::UpdateFailed { .. })
    })
    .await;
    assert_eq!(
        failed,
        LibraryEvent::UpdateFailed {
            identifier: "12".to_string(),
            message: "Status not registered: done".to_string(),
        }
    );

    let stored = h.store.get_show(snapshot.id).await.unwrap().unwrap();
    assert_eq!(defaults(&stored.titles), vec![("Provisional", false)]);
}

#[tokio::test]
async fn refresh_through_handle_publishes_update() {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();

    let info = Arc::new(FakeInfoSource::default());
    let host = HostServices {
        info_source: info.clone(),
        downloader: Arc::new(FakeDownloader::default()),
    };
    let state = SharedState::new(config, host).await.unwrap();

    let created = state
        .library
        .add_show(ShowAttrs::new("13"), Some(UpdateMode::Skip))
        .await
        .unwrap();
    assert!(created.titles.is_empty());

    let mut events = state.subscribe();
    info.set("13", json!({ "titles": ["Thirteen"] }));
    state.library.refresh_show("13");

    let updated = wait_for_event(&mut events, |e| {
        matches!(e, LibraryEvent::ShowUpdated { .. })
    })
    .await;
    assert_eq!(
        updated,
        LibraryEvent::ShowUpdated {
            identifier: "13".to_string(),
            title: Some("Thirteen".to_string()),
            titles: 1,
            files: 0,
        }
    );

    let stored = state.store.get_show(created.id).await.unwrap().unwrap();
    assert_eq!(stored.default_title(), Some("Thirteen"));
}
