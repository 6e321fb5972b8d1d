//! Feed materializer scenarios: the "Following" mirror, broadcast timing,
//! and the item-set closure property.

use domains::error::CoreError;
use domains::models::{ItemId, FOLLOWING_FEED};
use domains::ports::ContentStore;
use integration_tests::World;
use std::collections::HashSet;

#[tokio::test]
async fn test_following_feed_tracks_follow_and_unfollow() {
    let world = World::new();
    let a = world.signup("ava").await;
    let b = world.signup("bo").await;

    world.core.follow(a, b).await.unwrap();
    let posted = world.publish(b, "hello", None).await;

    let feed = world.core.feeds().get_feed(a, FOLLOWING_FEED).await.unwrap();
    assert!(feed.items.iter().any(|i| i.id == posted.id));

    world.core.unfollow(a, b).await.unwrap();
    let feed = world.core.feeds().get_feed(a, FOLLOWING_FEED).await.unwrap();
    assert!(feed.items.is_empty());
}

#[tokio::test]
async fn test_reserved_feed_is_duplicate_and_delete_protected() {
    let world = World::new();
    let a = world.signup("ava").await;

    assert!(matches!(
        world.core.feeds().create_feed(a, FOLLOWING_FEED).await,
        Err(CoreError::DuplicateName(_))
    ));
    assert!(matches!(
        world.core.feeds().delete_feed(a, FOLLOWING_FEED).await,
        Err(CoreError::ProtectedFeed(_))
    ));
}

#[tokio::test]
async fn test_item_set_equals_union_of_source_contributions() {
    let world = World::new();
    let reader = world.signup("reader").await;
    let bo = world.signup("bo").await;
    let cy = world.signup("cy").await;
    let dee = world.signup("dee").await;

    // items that predate the subscription
    world.publish(bo, "early bo", None).await;
    world.publish(cy, "early cy", None).await;

    world.core.feeds().create_feed(reader, "mix").await.unwrap();
    world.core.feeds().add_source(reader, "mix", bo).await.unwrap();
    world.core.feeds().add_source(reader, "mix", cy).await.unwrap();

    // items that arrive after, including one from a non-source
    world.publish(bo, "late bo", None).await;
    world.publish(dee, "noise", None).await;

    let feed = world.core.feeds().get_feed(reader, "mix").await.unwrap();
    let materialized: HashSet<ItemId> = feed.items.iter().map(|i| i.id).collect();

    let mut expected = HashSet::new();
    for source in [bo, cy] {
        expected.extend(world.content.items_authored_by(source).await.unwrap());
    }
    assert_eq!(materialized, expected);
}

#[tokio::test]
async fn test_late_subscriber_backfills_through_add_source() {
    let world = World::new();
    let reader = world.signup("reader").await;
    let writer = world.signup("writer").await;

    let posted = world.publish(writer, "already out", None).await;

    world.core.feeds().create_feed(reader, "later").await.unwrap();
    let feed = world.core.feeds().get_feed(reader, "later").await.unwrap();
    assert!(feed.items.is_empty());

    world
        .core
        .feeds()
        .add_source(reader, "later", writer)
        .await
        .unwrap();
    let feed = world.core.feeds().get_feed(reader, "later").await.unwrap();
    assert_eq!(feed.items.len(), 1);
    assert_eq!(feed.items[0].id, posted.id);
}

#[tokio::test]
async fn test_missing_feed_reads_and_edits_report_not_found() {
    let world = World::new();
    let a = world.signup("ava").await;
    let b = world.signup("bo").await;

    assert!(matches!(
        world.core.feeds().get_feed(a, "nope").await,
        Err(CoreError::NotFound("feed", _))
    ));
    assert!(matches!(
        world.core.feeds().add_source(a, "nope", b).await,
        Err(CoreError::NotFound("feed", _))
    ));
}
