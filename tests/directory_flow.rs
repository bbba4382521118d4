//! Directory behavior over in-memory infrastructure: create, resolve,
//! update, delete, and alias generation.

mod common;

use common::test_harness;
use linkdir::AppError;
use linkdir::domain::repositories::RedirectRepository;

#[tokio::test]
async fn resolve_after_create_returns_target() {
    let harness = test_harness(false, None);
    let directory = &harness.state.directory;

    directory
        .create("https://example.com/docs", &["docs".to_string()], None)
        .await
        .unwrap();

    let resolved = directory.resolve("docs").await.unwrap().unwrap();
    assert_eq!(resolved.target, "https://example.com/docs");
}

#[tokio::test]
async fn resolve_after_delete_returns_none() {
    let harness = test_harness(false, None);
    let directory = &harness.state.directory;

    directory
        .create("https://example.com/", &["gone".to_string()], None)
        .await
        .unwrap();

    assert_eq!(directory.delete(&["gone".to_string()]).await.unwrap(), 1);
    assert!(directory.resolve("gone").await.unwrap().is_none());
}

#[tokio::test]
async fn sequential_resolves_increment_stored_hits_exactly() {
    let harness = test_harness(false, None);
    let directory = &harness.state.directory;

    directory
        .create("https://example.com/", &["counted".to_string()], None)
        .await
        .unwrap();

    const N: i64 = 25;
    for _ in 0..N {
        directory.resolve("counted").await.unwrap().unwrap();
    }

    // The store, not just the cache, carries the count.
    let stored = harness
        .redirects
        .find_by_alias("counted")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.hits, N);

    // The cached copy agrees.
    let cached = directory.lookup("counted").await.unwrap().unwrap();
    assert_eq!(cached.hits, N);
}

#[tokio::test]
async fn lookup_does_not_count_hits() {
    let harness = test_harness(false, None);
    let directory = &harness.state.directory;

    directory
        .create("https://example.com/", &["peeked".to_string()], None)
        .await
        .unwrap();

    for _ in 0..10 {
        directory.lookup("peeked").await.unwrap().unwrap();
    }

    let stored = harness
        .redirects
        .find_by_alias("peeked")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.hits, 0);
}

#[tokio::test]
async fn create_conflict_leaves_stored_target_unchanged() {
    let harness = test_harness(false, None);
    let directory = &harness.state.directory;

    directory
        .create("https://original.example.com/", &["taken".to_string()], None)
        .await
        .unwrap();

    let result = directory
        .create("https://other.example.com/", &["taken".to_string()], None)
        .await;
    assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));

    let stored = harness
        .redirects
        .find_by_alias("taken")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.target, "https://original.example.com/");
}

#[tokio::test]
async fn multi_alias_create_fails_whole_batch_on_any_conflict() {
    let harness = test_harness(false, None);
    let directory = &harness.state.directory;

    directory
        .create("https://example.com/", &["existing".to_string()], None)
        .await
        .unwrap();

    let result = directory
        .create(
            "https://example.com/",
            &["brand-new".to_string(), "existing".to_string()],
            None,
        )
        .await;
    assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));

    // The free alias was not inserted either.
    assert!(harness
        .redirects
        .find_by_alias("brand-new")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn update_of_unknown_alias_mutates_nothing() {
    let harness = test_harness(false, None);
    let directory = &harness.state.directory;

    directory
        .create("https://example.com/", &["known".to_string()], None)
        .await
        .unwrap();

    let result = directory
        .update(
            "https://new.example.com/",
            &["known".to_string(), "unknown".to_string()],
        )
        .await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));

    let stored = harness
        .redirects
        .find_by_alias("known")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.target, "https://example.com/");
}

#[tokio::test]
async fn update_repoints_every_alias() {
    let harness = test_harness(false, None);
    let directory = &harness.state.directory;

    directory
        .create(
            "https://old.example.com/",
            &["one".to_string(), "two".to_string()],
            None,
        )
        .await
        .unwrap();

    let updated = directory
        .update(
            "https://new.example.com/",
            &["one".to_string(), "two".to_string()],
        )
        .await
        .unwrap();
    assert_eq!(updated.len(), 2);

    for alias in ["one", "two"] {
        let resolved = directory.resolve(alias).await.unwrap().unwrap();
        assert_eq!(resolved.target, "https://new.example.com/");
    }
}

#[tokio::test]
async fn delete_skips_unknown_aliases_and_reports_count() {
    let harness = test_harness(false, None);
    let directory = &harness.state.directory;

    directory
        .create(
            "https://example.com/",
            &["one".to_string(), "two".to_string()],
            None,
        )
        .await
        .unwrap();

    let deleted = directory
        .delete(&[
            "one".to_string(),
            "ghost".to_string(),
            "two".to_string(),
        ])
        .await
        .unwrap();
    assert_eq!(deleted, 2);

    let deleted_again = directory.delete(&["one".to_string()]).await.unwrap();
    assert_eq!(deleted_again, 0);
}

#[tokio::test]
async fn invalid_target_is_rejected_without_mutation() {
    let harness = test_harness(false, None);
    let directory = &harness.state.directory;

    for bad in ["not-a-url", "ftp://example.com/x", "javascript:alert(1)"] {
        let result = directory.create(bad, &["candidate".to_string()], None).await;
        assert!(
            matches!(result.unwrap_err(), AppError::Validation { .. }),
            "target '{}' should be rejected",
            bad
        );
    }

    assert!(harness
        .redirects
        .find_by_alias("candidate")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn previously_missed_alias_becomes_visible_after_create() {
    let harness = test_harness(false, None);
    let directory = &harness.state.directory;

    // Prime the negative cache entry.
    assert!(directory.lookup("lazy").await.unwrap().is_none());
    assert!(directory.resolve("lazy").await.unwrap().is_none());

    directory
        .create("https://example.com/", &["lazy".to_string()], None)
        .await
        .unwrap();

    // The create overwrote the missing marker.
    let resolved = directory.resolve("lazy").await.unwrap().unwrap();
    assert_eq!(resolved.target, "https://example.com/");
}

#[tokio::test]
async fn owner_scoped_listing_is_newest_first() {
    let harness = test_harness(false, None);
    let directory = &harness.state.directory;

    directory
        .create("https://example.com/1", &["mine-1".to_string()], Some(1))
        .await
        .unwrap();
    directory
        .create("https://example.com/2", &["mine-2".to_string()], Some(1))
        .await
        .unwrap();
    directory
        .create("https://example.com/3", &["theirs".to_string()], Some(2))
        .await
        .unwrap();

    let mine = directory.list_for_owner(1).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0].alias, "mine-2");
    assert_eq!(mine[1].alias, "mine-1");

    let all = directory.list_all().await.unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn generated_aliases_are_fresh_and_well_formed() {
    let harness = test_harness(false, None);
    let directory = &harness.state.directory;
    let generator = &harness.state.generator;

    for _ in 0..50 {
        let alias = generator.generate().await.unwrap();

        assert_eq!(alias.len(), 8);
        assert!(alias.chars().all(|c| c.is_ascii_hexdigit()));

        // Never an alias already present in the store.
        assert!(harness
            .redirects
            .find_by_alias(&alias)
            .await
            .unwrap()
            .is_none());

        // Occupy it so the next rounds must avoid it.
        directory
            .create("https://example.com/", &[alias], None)
            .await
            .unwrap();
    }
}
