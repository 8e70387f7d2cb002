//! Service orchestration tests for stories, including the timezone-adjusted
//! active-story query.

use chrono::{TimeZone, Timelike, Utc};
use rstest::{fixture, rstest};

use super::fixtures::Harness;
use crate::directory::domain::UserId;
use crate::tracker::{
    domain::{PageRequest, Schedule, TrackerDomainError},
    ports::{CacheNamespace, StoryRepository},
    services::{CreateStoryRequest, StoryLifecycleError},
};

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

fn request(harness: &Harness, title: &str) -> CreateStoryRequest {
    CreateStoryRequest::new(
        title,
        "Rework the checkout flow",
        5,
        harness.open.id(),
        harness.low.id(),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_story_persists_and_is_retrievable(harness: Harness) {
    let service = harness.story_service();

    let story = service
        .create_story(request(&harness, "Checkout flow"))
        .await
        .expect("story creation should succeed");

    let stored = harness
        .stories
        .find_by_id(story.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(stored, Some(story));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_story_with_zero_points_is_rejected(harness: Harness) {
    let service = harness.story_service();

    let result = service
        .create_story(CreateStoryRequest::new(
            "Pointless story",
            "No effort at all",
            0,
            harness.open.id(),
            harness.low.id(),
        ))
        .await;

    assert!(matches!(
        result,
        Err(StoryLifecycleError::Domain(TrackerDomainError::InvalidStoryPoints))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_story_for_unknown_assignee_is_rejected(harness: Harness) {
    let service = harness.story_service();

    let result = service
        .create_story(request(&harness, "Orphaned story").with_assignee(UserId::new()))
        .await;

    assert!(matches!(result, Err(StoryLifecycleError::UserNotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn in_progress_story_without_schedule_is_rejected(harness: Harness) {
    let service = harness.story_service();

    let result = service
        .create_story(CreateStoryRequest::new(
            "Started story",
            "Already underway",
            3,
            harness.in_progress.id(),
            harness.low.id(),
        ))
        .await;

    assert!(matches!(
        result,
        Err(StoryLifecycleError::Domain(TrackerDomainError::ScheduleRequired))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stories_by_user_lists_only_that_users_live_stories(harness: Harness) {
    let asha = harness.create_user("Asha", "asha@example.com").await;
    let bruno = harness.create_user("Bruno", "bruno@example.com").await;
    let service = harness.story_service();
    let ours = service
        .create_story(request(&harness, "Asha's story").with_assignee(asha.id()))
        .await
        .expect("story creation should succeed");
    service
        .create_story(request(&harness, "Bruno's story").with_assignee(bruno.id()))
        .await
        .expect("story creation should succeed");
    service
        .create_story(request(&harness, "Unassigned story"))
        .await
        .expect("story creation should succeed");

    let page = service
        .get_stories_by_user(asha.id(), &PageRequest::default())
        .await
        .expect("listing should succeed");

    assert_eq!(page.items(), &[ours]);
    assert_eq!(page.total_elements(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn active_stories_require_exact_status_and_priority(harness: Harness) {
    let schedule = Schedule::new(
        Utc.with_ymd_and_hms(2025, 7, 30, 8, 0, 0).single(),
        Utc.with_ymd_and_hms(2025, 8, 15, 17, 0, 0).single(),
    );
    let service = harness.story_service();
    let active = service
        .create_story(
            CreateStoryRequest::new(
                "Active story",
                "In progress and low priority",
                5,
                harness.in_progress.id(),
                harness.low.id(),
            )
            .with_schedule(schedule),
        )
        .await
        .expect("story creation should succeed");
    service
        .create_story(
            CreateStoryRequest::new(
                "High priority story",
                "In progress but high priority",
                5,
                harness.in_progress.id(),
                harness.high.id(),
            )
            .with_schedule(schedule),
        )
        .await
        .expect("story creation should succeed");
    service
        .create_story(request(&harness, "Open story"))
        .await
        .expect("story creation should succeed");

    let found = service
        .get_active_stories("UTC")
        .await
        .expect("active query should succeed");

    assert_eq!(found.len(), 1);
    let story = found.first().expect("one active story");
    assert_eq!(story.id(), active.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn active_story_start_renders_in_the_requested_zone(harness: Harness) {
    let start = Utc
        .with_ymd_and_hms(2025, 7, 30, 8, 0, 0)
        .single()
        .expect("valid fixture instant");
    let end = Utc
        .with_ymd_and_hms(2025, 8, 15, 17, 0, 0)
        .single()
        .expect("valid fixture instant");
    let service = harness.story_service();
    service
        .create_story(
            CreateStoryRequest::new(
                "Active story",
                "In progress and low priority",
                5,
                harness.in_progress.id(),
                harness.low.id(),
            )
            .with_schedule(Schedule::new(Some(start), Some(end))),
        )
        .await
        .expect("story creation should succeed");

    let found = service
        .get_active_stories("Asia/Kolkata")
        .await
        .expect("active query should succeed");

    let localized = found.first().expect("one active story");
    let localized_start = localized
        .schedule()
        .expected_start()
        .expect("start should be set");
    // The absolute instant is untouched; rendering it in the requested zone
    // yields the local wall clock (08:00 UTC is 13:30 in Kolkata).
    assert_eq!(localized_start, start);
    let wall = localized_start.with_timezone(&chrono_tz::Asia::Kolkata);
    assert_eq!(wall.hour(), 13);
    assert_eq!(wall.minute(), 30);
    // The persisted row keeps its stored schedule.
    let stored = harness
        .stories
        .find_by_id(localized.id())
        .await
        .expect("lookup should succeed")
        .expect("story should exist");
    assert_eq!(stored.schedule().expected_start(), Some(start));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn active_stories_are_cached_per_zone(harness: Harness) {
    let service = harness.story_service();
    service
        .create_story(
            CreateStoryRequest::new(
                "Active story",
                "In progress and low priority",
                5,
                harness.in_progress.id(),
                harness.low.id(),
            )
            .with_schedule(Schedule::new(
                Utc.with_ymd_and_hms(2025, 7, 30, 8, 0, 0).single(),
                Utc.with_ymd_and_hms(2025, 8, 15, 17, 0, 0).single(),
            )),
        )
        .await
        .expect("story creation should succeed");

    let first = service
        .get_active_stories("Asia/Kolkata")
        .await
        .expect("active query should succeed");
    let second = service
        .get_active_stories("Asia/Kolkata")
        .await
        .expect("active query should succeed");
    service
        .get_active_stories("Europe/Berlin")
        .await
        .expect("active query should succeed");

    assert_eq!(first, second);
    assert_eq!(
        harness
            .cache
            .entry_count(CacheNamespace::ActiveStories)
            .expect("cache count should succeed"),
        2
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_time_zone_is_rejected(harness: Harness) {
    let service = harness.story_service();

    let result = service.get_active_stories("Mars/Olympus_Mons").await;

    assert!(matches!(
        result,
        Err(StoryLifecycleError::Domain(TrackerDomainError::UnknownTimeZone(zone)))
            if zone == "Mars/Olympus_Mons"
    ));
}
