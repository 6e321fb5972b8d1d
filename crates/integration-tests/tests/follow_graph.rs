//! Follow-graph scenarios over the full service wiring.

use domains::error::CoreError;
use integration_tests::World;

#[tokio::test]
async fn test_follow_twice_conflicts_and_direction_matters() {
    let world = World::new();
    let a = world.signup("ava").await;
    let b = world.signup("bo").await;

    world.core.follow(a, b).await.unwrap();
    assert!(matches!(
        world.core.follow(a, b).await,
        Err(CoreError::AlreadyFollowing(u)) if u == b
    ));

    assert!(world.core.follows().is_following(a, b).await.unwrap());
    assert!(!world.core.follows().is_following(b, a).await.unwrap());
}

#[tokio::test]
async fn test_edge_symmetry_holds_after_arbitrary_edits() {
    let world = World::new();
    let a = world.signup("ava").await;
    let b = world.signup("bo").await;
    let c = world.signup("cy").await;

    world.core.follow(a, b).await.unwrap();
    world.core.follow(b, a).await.unwrap();
    world.core.follow(a, c).await.unwrap();
    world.core.unfollow(a, b).await.unwrap();

    for user in [a, b, c] {
        let view = world.core.follows().get(user).await.unwrap();
        for followee in &view.following {
            let other = world.core.follows().get(*followee).await.unwrap();
            assert!(other.followers.contains(&user));
        }
        for follower in &view.followers {
            let other = world.core.follows().get(*follower).await.unwrap();
            assert!(other.following.contains(&user));
        }
    }
}

#[tokio::test]
async fn test_unfollow_requires_an_existing_edge() {
    let world = World::new();
    let a = world.signup("ava").await;
    let b = world.signup("bo").await;

    assert!(matches!(
        world.core.unfollow(a, b).await,
        Err(CoreError::NotFollowing(u)) if u == b
    ));
}

#[tokio::test]
async fn test_remove_user_cascade_is_idempotent() {
    let world = World::new();
    let a = world.signup("ava").await;
    let b = world.signup("bo").await;
    world.core.follow(a, b).await.unwrap();

    world.core.follows().remove_user(b).await.unwrap();
    // a retried cascade over already-removed edges must not error
    world.core.follows().remove_user(b).await.unwrap();

    let view = world.core.follows().get(a).await.unwrap();
    assert!(view.following.is_empty());
}
