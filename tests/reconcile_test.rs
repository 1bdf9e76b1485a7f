//! Reconciliation scenario and invariant (spec.md §8, scenario 5).

mod common;

use chrono::Utc;
use fleetsched::domain::models::App;
use fleetsched::domain::ports::{AppRepository, TaskTracker};
use fleetsched::domain::task_id;

#[tokio::test]
async fn reconcile_kills_orphan_app_tasks_and_reports_the_remaining_set() {
    let (engine, driver, tracker, _queue, repo, _limiter) = common::build_engine();
    repo.store(&App::new("x", 0, 1.0)).await.unwrap();
    tracker
        .created("x", &task_id::build("x", "1"), "h", vec![], Default::default(), Utc::now())
        .await
        .unwrap();
    tracker
        .created("y", &task_id::build("y", "1"), "h", vec![], Default::default(), Utc::now())
        .await
        .unwrap();

    engine.reconcile_and_scale_tasks().await.unwrap();

    assert!(!tracker.contains("y").await.unwrap(), "orphan app's tasks are torn down");
    assert_eq!(driver.killed.lock().unwrap().len(), 1);
    assert_eq!(driver.reconciled.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn after_reconcile_every_tracked_task_belongs_to_a_known_app() {
    let (engine, _driver, tracker, _queue, repo, _limiter) = common::build_engine();
    repo.store(&App::new("x", 0, 1.0)).await.unwrap();
    tracker
        .created("y", &task_id::build("y", "1"), "h", vec![], Default::default(), Utc::now())
        .await
        .unwrap();
    tracker
        .created("z", &task_id::build("z", "1"), "h", vec![], Default::default(), Utc::now())
        .await
        .unwrap();

    engine.reconcile_and_scale_tasks().await.unwrap();

    let known_ids = repo.app_ids().await.unwrap();
    let tracked = tracker.list().await.unwrap();
    for app_id in tracked.keys() {
        assert!(known_ids.contains(app_id), "{app_id} survived reconcile but isn't in AppRepository");
    }
}
