//! SQLite repository implementation.
//!
//! Implements the repository traits from `shelfmark_core::storage`. Every
//! operation is one job on the worker pool, and every job is one
//! transactional unit: acquire the worker's connection, begin, run, commit
//! or roll back. Results come back through the pool's reply channel, so
//! the caller's continuation resumes on the caller's own runtime.

use std::path::Path;

use async_trait::async_trait;
use rusqlite::{params, Connection, Params, Row, Transaction};

use shelfmark_core::catalog::{
    Author, Keyword, NewAuthor, NewKeyword, NewPublication, NewReview, NewSource, Publication,
    Review, Source,
};
use shelfmark_core::storage::{
    AuthorRepository, KeywordRepository, PublicationRepository, RepositoryError, Result,
    ReviewRepository, SourceRepository,
};

use crate::exec::{Pool, PoolConfig};

use super::conversions::{
    row_to_author, row_to_keyword, row_to_publication, row_to_review, row_to_source,
};
use super::error::{map_exec_error, StoreError};
use super::open::open_connection;
use super::schema;
use super::tx::{with_immediate_transaction, with_transaction};

type TxResult<T> = std::result::Result<T, StoreError>;

/// SQLite-based catalog repository.
///
/// Cheap to share behind an `Arc`; all state is the worker pool.
pub struct SqliteCatalog {
    pool: Pool,
}

impl SqliteCatalog {
    /// Opens (creating if necessary) the database at `path` and starts the
    /// worker pool.
    ///
    /// The schema is applied on a bootstrap connection before any worker
    /// accepts a job, so operations never observe missing tables.
    pub fn open(path: impl AsRef<Path>, config: PoolConfig) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let bootstrap = open_connection(&path)
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;
        bootstrap
            .execute_batch(schema::CREATE_TABLES)
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
        drop(bootstrap);

        let pool = Pool::new(config, move || open_connection(&path))
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Number of worker threads (and connections) backing this catalog.
    pub fn pool_size(&self) -> usize {
        self.pool.worker_count()
    }

    /// Submits `work` to the pool and flattens both failure channels.
    async fn run<T, F>(&self, entity_type: &'static str, work: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> TxResult<T> + Send + 'static,
        T: Send + 'static,
    {
        match self.pool.call(work).await {
            Ok(result) => result.map_err(|e| e.into_repository_error(entity_type)),
            Err(exec_err) => Err(map_exec_error(exec_err)),
        }
    }
}

// ============================================================================
// Transaction-scoped query helpers
// ============================================================================

fn fetch_all<T, P, F>(tx: &Transaction<'_>, sql: &str, params: P, map: F) -> TxResult<Vec<T>>
where
    P: Params,
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = tx.prepare(sql)?;
    let rows = stmt.query_map(params, map)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

fn fetch_optional<T, P, F>(tx: &Transaction<'_>, sql: &str, params: P, map: F) -> TxResult<Option<T>>
where
    P: Params,
    F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = tx.prepare(sql)?;
    match stmt.query_row(params, map) {
        Ok(value) => Ok(Some(value)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Verifies a referenced row exists before writing a relation to it.
///
/// Runs inside the same transaction as the write, so the check and the
/// insert observe one snapshot.
fn ensure_exists(tx: &Transaction<'_>, sql: &str, label: &str, id: i64) -> TxResult<()> {
    let mut stmt = tx.prepare(sql)?;
    if stmt.exists(params![id])? {
        Ok(())
    } else {
        Err(RepositoryError::Constraint(format!("{label} {id} does not exist")).into())
    }
}

/// Loads a publication with its relation vectors populated.
fn load_publication(tx: &Transaction<'_>, id: i64) -> TxResult<Option<Publication>> {
    let Some(mut publication) =
        fetch_optional(tx, schema::SELECT_PUBLICATION_BY_ID, params![id], row_to_publication)?
    else {
        return Ok(None);
    };

    publication.authors = fetch_all(
        tx,
        schema::SELECT_AUTHORS_FOR_PUBLICATION,
        params![id],
        row_to_author,
    )?;
    publication.sources = fetch_all(
        tx,
        schema::SELECT_SOURCES_FOR_PUBLICATION,
        params![id],
        row_to_source,
    )?;
    publication.keywords = fetch_all(
        tx,
        schema::SELECT_KEYWORDS_FOR_PUBLICATION,
        params![id],
        row_to_keyword,
    )?;

    Ok(Some(publication))
}

/// Loads a publication that is known to exist within this transaction.
fn require_publication(tx: &Transaction<'_>, id: i64) -> TxResult<Publication> {
    load_publication(tx, id)?
        .ok_or_else(|| RepositoryError::not_found("Publication", id).into())
}

/// Get-or-create for name-keyed related entities, used by `add_full`.
fn id_for_name(
    tx: &Transaction<'_>,
    insert_if_absent_sql: &str,
    select_by_name_sql: &str,
    name: &str,
) -> TxResult<i64> {
    tx.execute(insert_if_absent_sql, params![name])?;
    let id = tx.query_row(select_by_name_sql, params![name], |row| row.get(0))?;
    Ok(id)
}

// ============================================================================
// ReviewRepository implementation
// ============================================================================

#[async_trait]
impl ReviewRepository for SqliteCatalog {
    async fn add(&self, review: NewReview) -> Result<Review> {
        self.run("Review", move |conn| {
            with_immediate_transaction(conn, |tx| {
                tx.execute(
                    schema::INSERT_REVIEW,
                    params![
                        review.title,
                        review.review_author,
                        review.publication,
                        review.body
                    ],
                )?;
                let id = tx.last_insert_rowid();
                Ok(Review {
                    id,
                    title: review.title,
                    review_author: review.review_author,
                    publication: review.publication,
                    body: review.body,
                })
            })
        })
        .await
    }

    async fn list(&self) -> Result<Vec<Review>> {
        self.run("Review", |conn| {
            with_transaction(conn, |tx| {
                fetch_all(tx, schema::SELECT_REVIEWS, [], row_to_review)
            })
        })
        .await
    }

    async fn get(&self, id: i64) -> Result<Option<Review>> {
        self.run("Review", move |conn| {
            with_transaction(conn, |tx| {
                fetch_optional(tx, schema::SELECT_REVIEW_BY_ID, params![id], row_to_review)
            })
        })
        .await
    }

    async fn search_by_publication(&self, publication: &str) -> Result<Vec<Review>> {
        let needle = publication.to_string();
        self.run("Review", move |conn| {
            with_transaction(conn, |tx| {
                fetch_all(
                    tx,
                    schema::SEARCH_REVIEWS_BY_PUBLICATION,
                    params![needle],
                    row_to_review,
                )
            })
        })
        .await
    }
}

// ============================================================================
// PublicationRepository implementation
// ============================================================================

impl SqliteCatalog {
    /// Shared body of the three attach operations.
    async fn attach_relation(
        &self,
        related_label: &'static str,
        related_exists_sql: &'static str,
        attach_sql: &'static str,
        publication_id: i64,
        related_id: i64,
    ) -> Result<Publication> {
        self.run("Publication", move |conn| {
            with_immediate_transaction(conn, |tx| {
                ensure_exists(tx, schema::PUBLICATION_EXISTS, "publication", publication_id)?;
                ensure_exists(tx, related_exists_sql, related_label, related_id)?;
                // INSERT OR IGNORE: attaching an already-attached pair is
                // a no-op, never a duplicate association.
                tx.execute(attach_sql, params![publication_id, related_id])?;
                require_publication(tx, publication_id)
            })
        })
        .await
    }
}

#[async_trait]
impl PublicationRepository for SqliteCatalog {
    async fn add(&self, publication: NewPublication) -> Result<Publication> {
        self.run("Publication", move |conn| {
            with_immediate_transaction(conn, |tx| {
                tx.execute(
                    schema::INSERT_PUBLICATION,
                    params![publication.title, publication.body],
                )?;
                let id = tx.last_insert_rowid();
                Ok(Publication {
                    id,
                    title: publication.title,
                    body: publication.body,
                    authors: Vec::new(),
                    sources: Vec::new(),
                    keywords: Vec::new(),
                })
            })
        })
        .await
    }

    async fn add_full(
        &self,
        publication: NewPublication,
        authors: Vec<NewAuthor>,
        sources: Vec<NewSource>,
        keywords: Vec<NewKeyword>,
    ) -> Result<Publication> {
        self.run("Publication", move |conn| {
            with_immediate_transaction(conn, |tx| {
                tx.execute(
                    schema::INSERT_PUBLICATION,
                    params![publication.title, publication.body],
                )?;
                let id = tx.last_insert_rowid();

                for author in &authors {
                    let author_id = id_for_name(
                        tx,
                        schema::INSERT_AUTHOR_IF_ABSENT,
                        schema::SELECT_AUTHOR_BY_NAME,
                        &author.name,
                    )?;
                    tx.execute(schema::ATTACH_AUTHOR, params![id, author_id])?;
                }
                for source in &sources {
                    let source_id = id_for_name(
                        tx,
                        schema::INSERT_SOURCE_IF_ABSENT,
                        schema::SELECT_SOURCE_BY_NAME,
                        &source.name,
                    )?;
                    tx.execute(schema::ATTACH_SOURCE, params![id, source_id])?;
                }
                for keyword in &keywords {
                    let keyword_id = id_for_name(
                        tx,
                        schema::INSERT_KEYWORD_IF_ABSENT,
                        schema::SELECT_KEYWORD_BY_NAME,
                        &keyword.name,
                    )?;
                    tx.execute(schema::ATTACH_KEYWORD, params![id, keyword_id])?;
                }

                require_publication(tx, id)
            })
        })
        .await
    }

    async fn list(&self) -> Result<Vec<Publication>> {
        self.run("Publication", |conn| {
            with_transaction(conn, |tx| {
                let bases = fetch_all(tx, schema::SELECT_PUBLICATIONS, [], row_to_publication)?;
                let mut publications = Vec::with_capacity(bases.len());
                for base in bases {
                    publications.push(require_publication(tx, base.id)?);
                }
                Ok(publications)
            })
        })
        .await
    }

    async fn get(&self, id: i64) -> Result<Option<Publication>> {
        self.run("Publication", move |conn| {
            with_transaction(conn, |tx| load_publication(tx, id))
        })
        .await
    }

    async fn search_by_title(&self, title: &str) -> Result<Vec<Publication>> {
        let needle = title.to_string();
        self.run("Publication", move |conn| {
            with_transaction(conn, |tx| {
                let bases = fetch_all(
                    tx,
                    schema::SEARCH_PUBLICATIONS_BY_TITLE,
                    params![needle],
                    row_to_publication,
                )?;
                let mut publications = Vec::with_capacity(bases.len());
                for base in bases {
                    publications.push(require_publication(tx, base.id)?);
                }
                Ok(publications)
            })
        })
        .await
    }

    async fn attach_author(&self, publication_id: i64, author_id: i64) -> Result<Publication> {
        self.attach_relation(
            "author",
            schema::AUTHOR_EXISTS,
            schema::ATTACH_AUTHOR,
            publication_id,
            author_id,
        )
        .await
    }

    async fn attach_source(&self, publication_id: i64, source_id: i64) -> Result<Publication> {
        self.attach_relation(
            "source",
            schema::SOURCE_EXISTS,
            schema::ATTACH_SOURCE,
            publication_id,
            source_id,
        )
        .await
    }

    async fn attach_keyword(&self, publication_id: i64, keyword_id: i64) -> Result<Publication> {
        self.attach_relation(
            "keyword",
            schema::KEYWORD_EXISTS,
            schema::ATTACH_KEYWORD,
            publication_id,
            keyword_id,
        )
        .await
    }
}

// ============================================================================
// AuthorRepository implementation
// ============================================================================

#[async_trait]
impl AuthorRepository for SqliteCatalog {
    async fn add(&self, author: NewAuthor) -> Result<Author> {
        self.run("Author", move |conn| {
            with_immediate_transaction(conn, |tx| {
                tx.execute(schema::INSERT_AUTHOR, params![author.name])?;
                Ok(Author {
                    id: tx.last_insert_rowid(),
                    name: author.name,
                })
            })
        })
        .await
    }

    async fn list(&self) -> Result<Vec<Author>> {
        self.run("Author", |conn| {
            with_transaction(conn, |tx| {
                fetch_all(tx, schema::SELECT_AUTHORS, [], row_to_author)
            })
        })
        .await
    }

    async fn get(&self, id: i64) -> Result<Option<Author>> {
        self.run("Author", move |conn| {
            with_transaction(conn, |tx| {
                fetch_optional(tx, schema::SELECT_AUTHOR_BY_ID, params![id], row_to_author)
            })
        })
        .await
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<Author>> {
        let needle = name.to_string();
        self.run("Author", move |conn| {
            with_transaction(conn, |tx| {
                fetch_all(
                    tx,
                    schema::SEARCH_AUTHORS_BY_NAME,
                    params![needle],
                    row_to_author,
                )
            })
        })
        .await
    }
}

// ============================================================================
// SourceRepository implementation
// ============================================================================

#[async_trait]
impl SourceRepository for SqliteCatalog {
    async fn add(&self, source: NewSource) -> Result<Source> {
        self.run("Source", move |conn| {
            with_immediate_transaction(conn, |tx| {
                tx.execute(schema::INSERT_SOURCE, params![source.name])?;
                Ok(Source {
                    id: tx.last_insert_rowid(),
                    name: source.name,
                })
            })
        })
        .await
    }

    async fn list(&self) -> Result<Vec<Source>> {
        self.run("Source", |conn| {
            with_transaction(conn, |tx| {
                fetch_all(tx, schema::SELECT_SOURCES, [], row_to_source)
            })
        })
        .await
    }

    async fn get(&self, id: i64) -> Result<Option<Source>> {
        self.run("Source", move |conn| {
            with_transaction(conn, |tx| {
                fetch_optional(tx, schema::SELECT_SOURCE_BY_ID, params![id], row_to_source)
            })
        })
        .await
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<Source>> {
        let needle = name.to_string();
        self.run("Source", move |conn| {
            with_transaction(conn, |tx| {
                fetch_all(
                    tx,
                    schema::SEARCH_SOURCES_BY_NAME,
                    params![needle],
                    row_to_source,
                )
            })
        })
        .await
    }
}

// ============================================================================
// KeywordRepository implementation
// ============================================================================

#[async_trait]
impl KeywordRepository for SqliteCatalog {
    async fn add(&self, keyword: NewKeyword) -> Result<Keyword> {
        self.run("Keyword", move |conn| {
            with_immediate_transaction(conn, |tx| {
                tx.execute(schema::INSERT_KEYWORD, params![keyword.name])?;
                Ok(Keyword {
                    id: tx.last_insert_rowid(),
                    name: keyword.name,
                })
            })
        })
        .await
    }

    async fn list(&self) -> Result<Vec<Keyword>> {
        self.run("Keyword", |conn| {
            with_transaction(conn, |tx| {
                fetch_all(tx, schema::SELECT_KEYWORDS, [], row_to_keyword)
            })
        })
        .await
    }

    async fn get(&self, id: i64) -> Result<Option<Keyword>> {
        self.run("Keyword", move |conn| {
            with_transaction(conn, |tx| {
                fetch_optional(tx, schema::SELECT_KEYWORD_BY_ID, params![id], row_to_keyword)
            })
        })
        .await
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<Keyword>> {
        let needle = name.to_string();
        self.run("Keyword", move |conn| {
            with_transaction(conn, |tx| {
                fetch_all(
                    tx,
                    schema::SEARCH_KEYWORDS_BY_NAME,
                    params![needle],
                    row_to_keyword,
                )
            })
        })
        .await
    }
}
