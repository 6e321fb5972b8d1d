//! Account lifecycle sagas: creation wiring and full teardown sweeps.

use domains::error::CoreError;
use domains::models::FOLLOWING_FEED;
use integration_tests::World;

#[tokio::test]
async fn test_signup_provisions_graph_record_and_reserved_feed() {
    let world = World::new();
    let a = world.signup("ava").await;

    let view = world.core.follows().get(a).await.unwrap();
    assert!(view.followers.is_empty() && view.following.is_empty());

    let feed = world.core.feeds().get_feed(a, FOLLOWING_FEED).await.unwrap();
    assert!(feed.sources.is_empty() && feed.items.is_empty());
}

#[tokio::test]
async fn test_following_sources_mirror_the_graph() {
    let world = World::new();
    let a = world.signup("ava").await;
    let b = world.signup("bo").await;
    let c = world.signup("cy").await;

    world.core.follow(a, b).await.unwrap();
    world.core.follow(a, c).await.unwrap();
    world.core.unfollow(a, b).await.unwrap();

    let graph = world.core.follows().get(a).await.unwrap();
    let feed = world.core.feeds().get_feed(a, FOLLOWING_FEED).await.unwrap();
    let mirrored: Vec<_> = feed.sources.iter().map(|s| s.id).collect();
    assert_eq!(mirrored, graph.following);
    assert_eq!(mirrored, vec![c]);
}

#[tokio::test]
async fn test_user_removal_sweeps_graph_threads_and_feeds() {
    let world = World::new();
    let reader = world.signup("reader").await;
    let leaving = world.signup("leaving").await;

    world.core.follow(reader, leaving).await.unwrap();
    let posted = world.publish(leaving, "farewell", None).await;
    let feed = world
        .core
        .feeds()
        .get_feed(reader, FOLLOWING_FEED)
        .await
        .unwrap();
    assert_eq!(feed.items.len(), 1);

    world.core.on_user_removed(leaving).await.unwrap();
    world.content.remove(posted.id);
    world.identity.unregister(leaving);

    // graph record gone, edges detached
    assert!(world.core.follows().get(leaving).await.is_err());
    let view = world.core.follows().get(reader).await.unwrap();
    assert!(view.following.is_empty());

    // thread records bulk-dropped
    assert!(matches!(
        world.core.threads().get_thread(posted.id).await,
        Err(CoreError::NotFound("thread", _))
    ));

    // own feeds gone; other feeds no longer list the user or their items
    assert!(world
        .core
        .feeds()
        .get_feed(leaving, FOLLOWING_FEED)
        .await
        .is_err());
    let feed = world
        .core
        .feeds()
        .get_feed(reader, FOLLOWING_FEED)
        .await
        .unwrap();
    assert!(feed.sources.is_empty());
    assert!(feed.items.is_empty());
}

#[tokio::test]
async fn test_user_removal_saga_is_retryable() {
    let world = World::new();
    let leaving = world.signup("leaving").await;
    world.publish(leaving, "post", None).await;

    world.core.on_user_removed(leaving).await.unwrap();
    world.core.on_user_removed(leaving).await.unwrap();
}
