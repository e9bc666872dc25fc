//! End-to-end repository tests against an on-disk SQLite database.

use std::sync::Arc;

use shelfmark::exec::PoolConfig;
use shelfmark::SqliteCatalog;
use shelfmark_core::catalog::{NewAuthor, NewKeyword, NewPublication, NewReview, NewSource};
use shelfmark_core::storage::{
    AuthorRepository, PublicationRepository, RepositoryError, ReviewRepository,
};

fn open_catalog(workers: usize) -> (tempfile::TempDir, SqliteCatalog) {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = PoolConfig {
        workers,
        queue_depth: 8,
        op_timeout_ms: 10_000,
    };
    let catalog = SqliteCatalog::open(dir.path().join("catalog.db"), config).expect("open");
    (dir, catalog)
}

fn review(title: &str, publication: &str) -> NewReview {
    NewReview {
        title: title.to_string(),
        review_author: "A".to_string(),
        publication: publication.to_string(),
        body: "B".to_string(),
    }
}

#[tokio::test]
async fn test_add_then_get_round_trips() {
    let (_dir, catalog) = open_catalog(1);
    let reviews: &dyn ReviewRepository = &catalog;

    let added = reviews.add(review("T", "P")).await.expect("add");
    assert!(added.id > 0);

    let fetched = reviews.get(added.id).await.expect("get").expect("present");
    assert_eq!(fetched, added);
    assert_eq!(fetched.title, "T");
    assert_eq!(fetched.review_author, "A");
    assert_eq!(fetched.publication, "P");
    assert_eq!(fetched.body, "B");
}

#[tokio::test]
async fn test_get_absent_id_is_none_not_a_fault() {
    let (_dir, catalog) = open_catalog(1);
    let reviews: &dyn ReviewRepository = &catalog;

    assert_eq!(reviews.get(999).await.expect("get"), None);
}

#[tokio::test]
async fn test_search_matches_substring_of_list() {
    let (_dir, catalog) = open_catalog(1);
    let reviews: &dyn ReviewRepository = &catalog;

    reviews.add(review("first", "Systems Monthly")).await.expect("add");
    reviews.add(review("second", "Systems Weekly")).await.expect("add");
    reviews.add(review("third", "Gardening")).await.expect("add");

    let all = reviews.list().await.expect("list");
    assert_eq!(all.len(), 3);

    let hits = reviews.search_by_publication("Systems").await.expect("search");
    assert_eq!(hits.len(), 2);
    for hit in &hits {
        assert!(hit.publication.contains("Systems"));
        assert!(all.contains(hit));
    }

    // Empty needle matches every row
    let everything = reviews.search_by_publication("").await.expect("search");
    assert_eq!(everything.len(), 3);

    // The worked example: "P" finds it, "Q" does not
    let added = reviews.add(review("T", "P")).await.expect("add");
    let with_p = reviews.search_by_publication("P").await.expect("search");
    assert!(with_p.iter().any(|r| r.id == added.id));
    let with_q = reviews.search_by_publication("Q").await.expect("search");
    assert!(!with_q.iter().any(|r| r.id == added.id));
}

#[tokio::test]
async fn test_attach_author_visible_in_subsequent_get() {
    let (_dir, catalog) = open_catalog(1);
    let publications: &dyn PublicationRepository = &catalog;
    let authors: &dyn AuthorRepository = &catalog;

    let publication = publications
        .add(NewPublication {
            title: "On parsing".to_string(),
            body: "Summary".to_string(),
        })
        .await
        .expect("add publication");
    let author = authors.add(NewAuthor::new("Knuth")).await.expect("add author");

    let updated = publications
        .attach_author(publication.id, author.id)
        .await
        .expect("attach");
    assert_eq!(updated.authors, vec![author.clone()]);

    let fetched = publications
        .get(publication.id)
        .await
        .expect("get")
        .expect("present");
    assert_eq!(fetched.authors, vec![author]);
    // Attaching never mutates the publication's own fields
    assert_eq!(fetched.title, "On parsing");
}

#[tokio::test]
async fn test_attach_same_pair_twice_is_idempotent() {
    let (_dir, catalog) = open_catalog(1);
    let publications: &dyn PublicationRepository = &catalog;
    let authors: &dyn AuthorRepository = &catalog;

    let publication = publications
        .add(NewPublication {
            title: "T".to_string(),
            body: String::new(),
        })
        .await
        .expect("add publication");
    let author = authors.add(NewAuthor::new("Hoare")).await.expect("add author");

    publications
        .attach_author(publication.id, author.id)
        .await
        .expect("first attach");
    let updated = publications
        .attach_author(publication.id, author.id)
        .await
        .expect("second attach");

    assert_eq!(updated.authors.len(), 1);
}

#[tokio::test]
async fn test_attach_with_absent_ids_is_a_constraint_violation() {
    let (_dir, catalog) = open_catalog(1);
    let publications: &dyn PublicationRepository = &catalog;
    let authors: &dyn AuthorRepository = &catalog;

    let publication = publications
        .add(NewPublication {
            title: "T".to_string(),
            body: String::new(),
        })
        .await
        .expect("add publication");
    let author = authors.add(NewAuthor::new("Dijkstra")).await.expect("add author");

    // Absent author
    let err = publications
        .attach_author(publication.id, 999)
        .await
        .expect_err("absent author");
    assert!(matches!(err, RepositoryError::Constraint(_)));

    // Absent publication
    let err = publications
        .attach_author(999, author.id)
        .await
        .expect_err("absent publication");
    assert!(matches!(err, RepositoryError::Constraint(_)));

    // The failed attaches left no partial state behind
    let fetched = publications
        .get(publication.id)
        .await
        .expect("get")
        .expect("present");
    assert!(fetched.authors.is_empty());
}

#[tokio::test]
async fn test_duplicate_author_name_is_a_constraint_violation() {
    let (_dir, catalog) = open_catalog(1);
    let authors: &dyn AuthorRepository = &catalog;

    authors.add(NewAuthor::new("Lamport")).await.expect("add");
    let err = authors
        .add(NewAuthor::new("Lamport"))
        .await
        .expect_err("duplicate");

    assert!(matches!(err, RepositoryError::Constraint(_)));

    // The failure surfaced, it was not swallowed: the store still has one row
    assert_eq!(authors.list().await.expect("list").len(), 1);
}

#[tokio::test]
async fn test_add_full_links_relations_in_one_transaction() {
    let (_dir, catalog) = open_catalog(1);
    let publications: &dyn PublicationRepository = &catalog;
    let authors: &dyn AuthorRepository = &catalog;

    // An author that already exists must be linked, not recreated
    let existing = authors.add(NewAuthor::new("Knuth")).await.expect("add author");

    let publication = publications
        .add_full(
            NewPublication {
                title: "On parsing".to_string(),
                body: "Summary".to_string(),
            },
            vec![NewAuthor::new("Knuth"), NewAuthor::new("Pratt")],
            vec![NewSource::new("CACM")],
            vec![NewKeyword::new("parsing")],
        )
        .await
        .expect("add_full");

    assert_eq!(publication.authors.len(), 2);
    assert!(publication
        .authors
        .iter()
        .any(|a| a.id == existing.id && a.name == "Knuth"));
    assert_eq!(publication.sources.len(), 1);
    assert_eq!(publication.keywords.len(), 1);
    assert_eq!(authors.list().await.expect("list").len(), 2);

    let found = publications
        .search_by_title("parsing")
        .await
        .expect("search");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, publication.id);
}

#[tokio::test]
async fn test_concurrent_submissions_beyond_pool_size_all_complete() {
    let (_dir, catalog) = open_catalog(2);
    let catalog = Arc::new(catalog);
    assert_eq!(catalog.pool_size(), 2);

    let mut handles = Vec::new();
    for i in 0..16 {
        let catalog = Arc::clone(&catalog);
        handles.push(tokio::spawn(async move {
            ReviewRepository::add(&*catalog, review(&format!("r{i}"), "P")).await
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        let added = handle.await.expect("join").expect("add");
        ids.push(added.id);
    }

    // Every submission committed exactly once
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 16);

    let all = ReviewRepository::list(&*catalog).await.expect("list");
    assert_eq!(all.len(), 16);
}
