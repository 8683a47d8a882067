//! History emission counts and the live history feed.

mod common;

use std::sync::Arc;
use std::time::Duration;

use cronos_board::{DropIntent, HistoryFeed};
use cronos_core::entities::{TaskDraft, TaskPatchBuilder};
use cronos_core::enums::{HistoryAction, TaskStatus};
use cronos_core::remote::RemoteStore;
use pretty_assertions::assert_eq;
use tokio::time::timeout;

use common::{Op, harness, session};

#[tokio::test]
async fn one_entry_per_successful_mutation() {
    let h = harness().await;
    let a = h.store.create(TaskDraft::new("a")).await.unwrap();
    let b = h.store.create(TaskDraft::new("b")).await.unwrap();
    h.store
        .update(&a.id, TaskPatchBuilder::new().title("a2").build())
        .await
        .unwrap();
    h.store
        .drop_task(&DropIntent::ChangeStatus {
            task_id: b.id.clone(),
            status: TaskStatus::Done,
        })
        .await;

    let mut history = h.remote.history().await;
    history.reverse();
    let log: Vec<_> = history
        .iter()
        .map(|e| (e.action, e.task_id.clone()))
        .collect();
    assert_eq!(
        log,
        vec![
            (HistoryAction::Created, a.id.clone()),
            (HistoryAction::Created, b.id.clone()),
            (HistoryAction::Updated, a.id.clone()),
            (HistoryAction::StatusChanged, b.id.clone()),
        ]
    );
    assert!(history.iter().all(|e| e.user_id == common::USER));
}

#[tokio::test]
async fn failed_mutations_leave_no_entry() {
    let h = harness().await;
    let task = h.store.create(TaskDraft::new("a")).await.unwrap();

    h.remote.fail(Op::UpdateTask);
    let _ = h
        .store
        .update(&task.id, TaskPatchBuilder::new().title("never").build())
        .await;
    h.remote.fail(Op::DeleteTask);
    let _ = h.store.remove(&task.id).await;

    assert_eq!(h.remote.history().await.len(), 1);
}

#[tokio::test]
async fn feed_refetches_on_history_change() {
    let h = harness().await;
    h.store.create(TaskDraft::new("before")).await.unwrap();

    let remote: Arc<dyn RemoteStore> = h.remote.clone();
    let mut feed = HistoryFeed::open(remote, session(), 50).await.unwrap();
    assert_eq!(feed.entries().len(), 1);

    let task = h.store.create(TaskDraft::new("after")).await.unwrap();
    let changed = timeout(Duration::from_secs(5), feed.next_change())
        .await
        .expect("history change should arrive")
        .unwrap();

    assert!(changed);
    assert_eq!(feed.entries().len(), 2);
    assert_eq!(feed.entries()[0].task_id, task.id);
    feed.close();
}

#[tokio::test]
async fn feed_respects_limit() {
    let h = harness().await;
    for n in 0..5 {
        h.store.create(TaskDraft::new(format!("t{n}"))).await.unwrap();
    }

    let remote: Arc<dyn RemoteStore> = h.remote.clone();
    let feed = HistoryFeed::open(remote, session(), 3).await.unwrap();
    assert_eq!(feed.entries().len(), 3);
}

#[tokio::test]
async fn feed_open_fails_when_history_is_unreachable() {
    let h = harness().await;
    h.remote.fail(Op::ListHistory);

    let remote: Arc<dyn RemoteStore> = h.remote.clone();
    assert!(HistoryFeed::open(remote, session(), 50).await.is_err());
}
