use async_trait::async_trait;

use crate::catalog::{
    Author, Keyword, NewAuthor, NewKeyword, NewPublication, NewReview, NewSource, Publication,
    Review, Source,
};

use super::Result;

/// Repository for review operations.
///
/// Implementations provide a non-blocking facade over possibly blocking
/// persistence calls: the caller gets a future and is never stalled by
/// database I/O.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Inserts a review and returns it with its store-assigned id.
    async fn add(&self, review: NewReview) -> Result<Review>;

    /// Returns every review, in store-defined order.
    async fn list(&self) -> Result<Vec<Review>>;

    /// Looks a review up by primary key. Absent ids yield `Ok(None)`.
    async fn get(&self, id: i64) -> Result<Option<Review>>;

    /// Returns every review whose publication field contains `publication`
    /// as a substring. Empty text matches every row.
    async fn search_by_publication(&self, publication: &str) -> Result<Vec<Review>>;
}

/// Repository for publication operations, including relation attachment.
#[async_trait]
pub trait PublicationRepository: Send + Sync {
    /// Inserts a publication (without relations) and returns it with its
    /// store-assigned id.
    async fn add(&self, publication: NewPublication) -> Result<Publication>;

    /// Inserts a publication together with its related entities in a
    /// single transaction.
    ///
    /// Related entities are matched by name: an existing author, source or
    /// keyword with the same name is linked rather than recreated.
    async fn add_full(
        &self,
        publication: NewPublication,
        authors: Vec<NewAuthor>,
        sources: Vec<NewSource>,
        keywords: Vec<NewKeyword>,
    ) -> Result<Publication>;

    /// Returns every publication with its relations populated.
    async fn list(&self) -> Result<Vec<Publication>>;

    /// Looks a publication up by primary key, relations populated.
    async fn get(&self, id: i64) -> Result<Option<Publication>>;

    /// Returns every publication whose title contains `title` as a
    /// substring.
    async fn search_by_title(&self, title: &str) -> Result<Vec<Publication>>;

    /// Associates an existing author with an existing publication and
    /// returns the updated publication.
    ///
    /// Fails with [`RepositoryError::Constraint`] if either id does not
    /// resolve to a row. Attaching the same pair twice is a no-op.
    ///
    /// [`RepositoryError::Constraint`]: super::RepositoryError::Constraint
    async fn attach_author(&self, publication_id: i64, author_id: i64) -> Result<Publication>;

    /// Associates an existing source with an existing publication.
    /// Same semantics as [`attach_author`](Self::attach_author).
    async fn attach_source(&self, publication_id: i64, source_id: i64) -> Result<Publication>;

    /// Associates an existing keyword with an existing publication.
    /// Same semantics as [`attach_author`](Self::attach_author).
    async fn attach_keyword(&self, publication_id: i64, keyword_id: i64) -> Result<Publication>;
}

/// Repository for author operations.
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    async fn add(&self, author: NewAuthor) -> Result<Author>;
    async fn list(&self) -> Result<Vec<Author>>;
    async fn get(&self, id: i64) -> Result<Option<Author>>;
    async fn search_by_name(&self, name: &str) -> Result<Vec<Author>>;
}

/// Repository for source operations.
#[async_trait]
pub trait SourceRepository: Send + Sync {
    async fn add(&self, source: NewSource) -> Result<Source>;
    async fn list(&self) -> Result<Vec<Source>>;
    async fn get(&self, id: i64) -> Result<Option<Source>>;
    async fn search_by_name(&self, name: &str) -> Result<Vec<Source>>;
}

/// Repository for keyword operations.
#[async_trait]
pub trait KeywordRepository: Send + Sync {
    async fn add(&self, keyword: NewKeyword) -> Result<Keyword>;
    async fn list(&self) -> Result<Vec<Keyword>>;
    async fn get(&self, id: i64) -> Result<Option<Keyword>>;
    async fn search_by_name(&self, name: &str) -> Result<Vec<Keyword>>;
}
