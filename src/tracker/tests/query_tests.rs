//! Query semantics tests for the task search and filter operations.

use chrono::{DateTime, TimeZone, Utc};
use rstest::{fixture, rstest};
use rust_decimal::Decimal;

use super::fixtures::{Harness, clock_at};
use crate::directory::{domain::User, ports::UserRepository};
use crate::tracker::{
    domain::{
        EstimatedHours, NewTask, PageRequest, Priority, Schedule, SortOrder, Status, Task, TaskId,
    },
    ports::{TaskQueryFilter, TaskRepository, TaskSearchFilter},
};

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

fn end_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 15, 17, 0, 0)
        .single()
        .expect("valid fixture instant")
}

async fn seed_task(
    harness: &Harness,
    title: &str,
    user: &User,
    status: &Status,
    priority: &Priority,
    schedule: Schedule,
    seconds: u32,
) -> Task {
    let task = Task::new(
        NewTask {
            title: title.to_owned(),
            estimated_hours: EstimatedHours::new(Decimal::new(4, 0)).expect("valid estimate"),
            assigned_to: user.id(),
            story_id: None,
            status: status.clone(),
            priority: priority.clone(),
            schedule,
        },
        &clock_at(seconds),
    )
    .expect("valid task");
    harness
        .tasks
        .store(&task)
        .await
        .expect("task store should succeed");
    task
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_matches_first_name_substring_case_insensitively(harness: Harness) {
    let asha = harness.create_user("Asha", "asha@example.com").await;
    let bruno = harness.create_user("Bruno", "bruno@example.com").await;
    let ours = seed_task(
        &harness, "Asha's task", &asha, &harness.open, &harness.low,
        Schedule::default(), 0,
    )
    .await;
    seed_task(
        &harness, "Bruno's task", &bruno, &harness.open, &harness.low,
        Schedule::default(), 1,
    )
    .await;

    let page = harness
        .tasks
        .search(
            &TaskSearchFilter::new().with_first_name("sH"),
            &PageRequest::default(),
        )
        .await
        .expect("search should succeed");

    assert_eq!(page.items(), &[ours]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_matches_status_name_case_insensitively(harness: Harness) {
    let user = harness.create_user("Asha", "asha@example.com").await;
    let open = seed_task(
        &harness, "Open task", &user, &harness.open, &harness.low,
        Schedule::default(), 0,
    )
    .await;
    seed_task(
        &harness, "Done task", &user, &harness.done, &harness.low,
        Schedule::default(), 1,
    )
    .await;

    let page = harness
        .tasks
        .search(
            &TaskSearchFilter::new().with_status("open"),
            &PageRequest::default(),
        )
        .await
        .expect("search should succeed");

    assert_eq!(page.items(), &[open]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_matches_expected_end_exactly(harness: Harness) {
    let user = harness.create_user("Asha", "asha@example.com").await;
    let scheduled = seed_task(
        &harness,
        "Scheduled task",
        &user,
        &harness.open,
        &harness.low,
        Schedule::new(None, Some(end_instant())),
        0,
    )
    .await;
    seed_task(
        &harness, "Unscheduled task", &user, &harness.open, &harness.low,
        Schedule::default(), 1,
    )
    .await;

    let page = harness
        .tasks
        .search(
            &TaskSearchFilter::new().with_expected_end(end_instant()),
            &PageRequest::default(),
        )
        .await
        .expect("search should succeed");

    assert_eq!(page.items(), &[scheduled]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_combines_all_filter_dimensions(harness: Harness) {
    let asha = harness.create_user("Asha", "asha@example.com").await;
    let bruno = harness.create_user("Bruno", "bruno@example.com").await;
    let matching = seed_task(
        &harness,
        "Matching task",
        &asha,
        &harness.done,
        &harness.low,
        Schedule::new(None, Some(end_instant())),
        0,
    )
    .await;
    seed_task(
        &harness,
        "Wrong assignee",
        &bruno,
        &harness.done,
        &harness.low,
        Schedule::new(None, Some(end_instant())),
        1,
    )
    .await;
    seed_task(
        &harness, "Wrong status", &asha, &harness.open, &harness.low,
        Schedule::new(None, Some(end_instant())), 2,
    )
    .await;

    let page = harness
        .tasks
        .search(
            &TaskSearchFilter::new()
                .with_assignee(asha.id())
                .with_first_name("Asha")
                .with_expected_end(end_instant())
                .with_status("DONE"),
            &PageRequest::default(),
        )
        .await
        .expect("search should succeed");

    assert_eq!(page.items(), &[matching]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn queries_exclude_deleted_tasks_and_deleted_assignees(harness: Harness) {
    let asha = harness.create_user("Asha", "asha@example.com").await;
    let mut bruno = harness.create_user("Bruno", "bruno@example.com").await;
    let kept = seed_task(
        &harness, "Kept task", &asha, &harness.open, &harness.low,
        Schedule::default(), 0,
    )
    .await;
    let mut deleted = seed_task(
        &harness, "Deleted task", &asha, &harness.open, &harness.low,
        Schedule::default(), 1,
    )
    .await;
    deleted.mark_deleted(&clock_at(2));
    harness
        .tasks
        .update(&deleted)
        .await
        .expect("task update should succeed");
    seed_task(
        &harness, "Orphaned task", &bruno, &harness.open, &harness.low,
        Schedule::default(), 3,
    )
    .await;
    bruno.mark_deleted();
    harness
        .users
        .update(&bruno)
        .await
        .expect("user update should succeed");

    let searched = harness
        .tasks
        .search(&TaskSearchFilter::new(), &PageRequest::default())
        .await
        .expect("search should succeed");
    let filtered = harness
        .tasks
        .filter(&TaskQueryFilter::new(), &PageRequest::default())
        .await
        .expect("filter should succeed");

    assert_eq!(searched.items(), &[kept.clone()]);
    assert_eq!(filtered.items(), &[kept]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn filter_matches_any_of_the_listed_names(harness: Harness) {
    let user = harness.create_user("Asha", "asha@example.com").await;
    let open_low = seed_task(
        &harness, "Open low", &user, &harness.open, &harness.low,
        Schedule::default(), 0,
    )
    .await;
    let done_low = seed_task(
        &harness, "Done low", &user, &harness.done, &harness.low,
        Schedule::default(), 1,
    )
    .await;
    seed_task(
        &harness, "Open high", &user, &harness.open, &harness.high,
        Schedule::default(), 2,
    )
    .await;

    let page = harness
        .tasks
        .filter(
            &TaskQueryFilter::new()
                .with_statuses(["open".to_owned(), "DONE".to_owned()])
                .with_priorities(["low".to_owned()]),
            &PageRequest::default(),
        )
        .await
        .expect("filter should succeed");

    assert_eq!(page.items(), &[done_low, open_low]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_name_lists_match_every_live_task(harness: Harness) {
    let user = harness.create_user("Asha", "asha@example.com").await;
    seed_task(
        &harness, "First", &user, &harness.open, &harness.low,
        Schedule::default(), 0,
    )
    .await;
    seed_task(
        &harness, "Second", &user, &harness.done, &harness.high,
        Schedule::default(), 1,
    )
    .await;

    let page = harness
        .tasks
        .filter(&TaskQueryFilter::new(), &PageRequest::default())
        .await
        .expect("filter should succeed");

    assert_eq!(page.total_elements(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn results_default_to_newest_first_and_paginate(harness: Harness) {
    let user = harness.create_user("Asha", "asha@example.com").await;
    let first = seed_task(
        &harness, "First", &user, &harness.open, &harness.low,
        Schedule::default(), 0,
    )
    .await;
    let second = seed_task(
        &harness, "Second", &user, &harness.open, &harness.low,
        Schedule::default(), 1,
    )
    .await;
    let third = seed_task(
        &harness, "Third", &user, &harness.open, &harness.low,
        Schedule::default(), 2,
    )
    .await;

    let first_page = harness
        .tasks
        .search(&TaskSearchFilter::new(), &PageRequest::new(0, 2))
        .await
        .expect("search should succeed");
    let second_page = harness
        .tasks
        .search(&TaskSearchFilter::new(), &PageRequest::new(1, 2))
        .await
        .expect("search should succeed");

    assert_eq!(first_page.items(), &[third, second]);
    assert_eq!(second_page.items(), &[first]);
    assert_eq!(first_page.total_elements(), 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ascending_sort_reverses_the_default_order(harness: Harness) {
    let user = harness.create_user("Asha", "asha@example.com").await;
    let older = seed_task(
        &harness, "Older", &user, &harness.open, &harness.low,
        Schedule::default(), 0,
    )
    .await;
    let newer = seed_task(
        &harness, "Newer", &user, &harness.open, &harness.low,
        Schedule::default(), 1,
    )
    .await;

    let page = harness
        .tasks
        .search(
            &TaskSearchFilter::new(),
            &PageRequest::new(0, 10).with_sort(SortOrder::CreatedAtAsc),
        )
        .await
        .expect("search should succeed");

    assert_eq!(page.items(), &[older, newer]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_by_id_still_returns_soft_deleted_rows(harness: Harness) {
    let user = harness.create_user("Asha", "asha@example.com").await;
    let mut task = seed_task(
        &harness, "Tombstoned", &user, &harness.open, &harness.low,
        Schedule::default(), 0,
    )
    .await;
    task.mark_deleted(&clock_at(1));
    harness
        .tasks
        .update(&task)
        .await
        .expect("task update should succeed");

    let found = harness
        .tasks
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed");
    let missing = harness
        .tasks
        .find_by_id(TaskId::new())
        .await
        .expect("lookup should succeed");

    assert_eq!(found, Some(task));
    assert_eq!(missing, None);
}
