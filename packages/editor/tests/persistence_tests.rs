//! Sync worker, version snapshots, and publishing against a recording gateway

mod common;

use assert_matches::assert_matches;
use common::{editor, labels, site, RecordingGateway};
use pagewright_editor::{
    EditorError, GatewayError, NoticeLevel, NoticeSource, Page, PersistenceGateway,
    SiteOperations, SyncWorker, VersionManager,
};
use std::sync::Arc;

#[tokio::test]
async fn test_drain_forwards_in_commit_order() {
    let gateway = Arc::new(RecordingGateway::with_site(site()));
    let (mut core, requests) = editor();
    let (mut worker, handles) = SyncWorker::new(gateway.clone(), requests);

    core.add("hero").unwrap();
    core.rename_page("home", "Start");
    core.reorder_pages(&["about".to_string(), "home".to_string()])
        .unwrap();

    assert_eq!(worker.drain().await, 3);
    assert_eq!(
        gateway.calls(),
        vec!["update_page_components", "update_site", "reorder_pages"]
    );

    let status = handles.status.borrow().clone();
    assert_eq!(status.in_flight, 0);
    assert_eq!(status.failures, 0);
    assert!(status.last_synced_at.is_some());
}

#[tokio::test]
async fn test_failure_reports_notice_without_rollback() {
    let gateway = Arc::new(RecordingGateway::with_site(site()));
    let (mut core, requests) = editor();
    let (mut worker, mut handles) = SyncWorker::new(gateway.clone(), requests);

    gateway.fail(GatewayError::Server {
        status: 503,
        message: "unavailable".into(),
    });
    core.add("text").unwrap();
    worker.drain().await;

    let notice = handles.notices.try_recv().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.source, NoticeSource::Components);
    assert_eq!(labels(core.components()), vec!["Intro", "Text"]);

    let status = handles.status.borrow().clone();
    assert_eq!(status.failures, 1);
    assert!(status.last_synced_at.is_none());
    assert!(status.last_error.is_some());
}

#[tokio::test]
async fn test_run_exits_when_outbox_dropped() {
    let gateway = Arc::new(RecordingGateway::with_site(site()));
    let (mut core, requests) = editor();
    let (worker, mut handles) = SyncWorker::new(gateway.clone(), requests);

    core.add("hero").unwrap();
    core.add("text").unwrap();
    drop(core);

    worker.run().await;
    // spawned writes finish on their own; wait until nothing is in flight
    handles
        .status
        .wait_for(|s| s.in_flight == 0 && s.last_synced_at.is_some())
        .await
        .unwrap();

    assert_eq!(gateway.calls().len(), 2);
    assert!(handles.notices.try_recv().is_err());
}

#[tokio::test]
async fn test_save_list_restore_version_scenario() {
    let gateway = Arc::new(RecordingGateway::with_site(site()));
    let versions = VersionManager::new(gateway.clone());
    let (mut core, _requests) = editor();
    let site_id = core.site().id.clone();

    core.add("hero").unwrap();
    let first = versions
        .save(&site_id, core.page("home").unwrap(), Some("with hero".into()))
        .await
        .unwrap();
    assert_eq!(first.version_number, 1);
    let snapshot = core.components().to_vec();

    core.add("text").unwrap();
    core.add("columns").unwrap();
    let second = versions
        .save(&site_id, core.page("home").unwrap(), None)
        .await
        .unwrap();
    assert_eq!(second.version_number, 2);

    let listed = versions.list("home").await.unwrap();
    let numbers: Vec<u32> = listed.iter().map(|v| v.version_number).collect();
    assert_eq!(numbers, vec![2, 1]);

    let page = versions.restore(&site_id, "home", &first.id).await.unwrap();
    core.reload_page(page);

    assert_eq!(core.components(), snapshot.as_slice());
    assert_eq!(core.session().history.len(), 1);
    assert!(!core.can_undo());
}

#[tokio::test]
async fn test_version_failures_map_to_version_errors() {
    let gateway = Arc::new(RecordingGateway::with_site(site()));
    let versions = VersionManager::new(gateway.clone());

    assert_matches!(
        versions.restore("site-1", "home", "v-9").await,
        Err(EditorError::VersionRestore(GatewayError::NotFound(_)))
    );

    gateway.fail(GatewayError::Network("offline".into()));
    assert_matches!(
        versions.save("site-1", &Page::new("home", "Home", "home"), None).await,
        Err(EditorError::VersionSave(_))
    );
    assert_matches!(versions.list("home").await, Err(EditorError::VersionList(_)));
}

#[tokio::test]
async fn test_publish_and_unpublish() {
    let gateway = Arc::new(RecordingGateway::with_site(site()));
    let operations = SiteOperations::new(gateway.clone());
    let (mut core, _requests) = editor();

    let receipt = operations.publish("site-1").await.unwrap();
    core.apply_publish_state(Some(receipt));
    assert!(core.site().published);
    assert_eq!(
        core.site().published_url.as_deref(),
        Some("https://site-1.example.test")
    );

    operations.unpublish("site-1").await.unwrap();
    core.apply_publish_state(None);
    assert!(!core.site().published);

    gateway.fail(GatewayError::Rejected("no pages".into()));
    let error = operations.publish("site-1").await.unwrap_err();
    assert_matches!(error, EditorError::Publish(_));
}

#[tokio::test]
async fn test_duplicate_site_and_replace() {
    let gateway = Arc::new(RecordingGateway::with_site(site()));
    let operations = SiteOperations::new(gateway.clone());
    let (mut core, _requests) = editor();

    let copy = operations.duplicate("site-1").await.unwrap();
    assert_eq!(copy.id, "site-1-copy");

    core.switch_page("about");
    let mut fetched = operations.fetch("site-1").await.unwrap();
    fetched.pages.retain(|p| p.id == "home");
    core.replace_site(fetched);

    assert_eq!(core.session().active_page_id.as_deref(), Some("home"));
    assert_eq!(gateway.get_site("site-1").await.unwrap().pages.len(), 2);
}
