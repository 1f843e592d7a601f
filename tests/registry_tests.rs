use std::sync::Arc;

use digestbot::registry::SubscriberRegistry;

#[tokio::test]
async fn add_remove_and_contains() {
    let registry = SubscriberRegistry::new();
    assert!(registry.is_empty().await);

    assert!(registry.add(7).await);
    assert!(!registry.add(7).await);
    assert!(registry.contains(7).await);
    assert_eq!(registry.len().await, 1);

    assert!(registry.remove(7).await);
    assert!(!registry.remove(7).await);
    assert!(registry.is_empty().await);
}

#[tokio::test]
async fn snapshot_is_a_point_in_time_copy() {
    let registry = SubscriberRegistry::new();
    registry.add(1).await;
    registry.add(2).await;

    let mut snapshot = registry.snapshot().await;
    snapshot.sort_unstable();
    assert_eq!(snapshot, vec![1, 2]);

    // Mutating the registry afterwards leaves the copy untouched.
    registry.remove(1).await;
    assert_eq!(snapshot, vec![1, 2]);
}

#[tokio::test]
async fn concurrent_mutation_does_not_corrupt_the_set() {
    let registry = Arc::new(SubscriberRegistry::new());

    let tasks: Vec<_> = (0..50)
        .map(|i| {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                registry.add(i).await;
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(registry.len().await, 50);
    for i in 0..50 {
        assert!(registry.contains(i).await);
    }
}
