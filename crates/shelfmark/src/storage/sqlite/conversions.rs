//! Row to entity mapping functions.

use rusqlite::Row;

use shelfmark_core::catalog::{Author, Keyword, Publication, Review, Source};

pub(crate) fn row_to_review(row: &Row<'_>) -> rusqlite::Result<Review> {
    Ok(Review {
        id: row.get(0)?,
        title: row.get(1)?,
        review_author: row.get(2)?,
        publication: row.get(3)?,
        body: row.get(4)?,
    })
}

/// Maps a publication row without its relations; the repository fills the
/// relation vectors from the join tables inside the same transaction.
pub(crate) fn row_to_publication(row: &Row<'_>) -> rusqlite::Result<Publication> {
    Ok(Publication {
        id: row.get(0)?,
        title: row.get(1)?,
        body: row.get(2)?,
        authors: Vec::new(),
        sources: Vec::new(),
        keywords: Vec::new(),
    })
}

pub(crate) fn row_to_author(row: &Row<'_>) -> rusqlite::Result<Author> {
    Ok(Author {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

pub(crate) fn row_to_source(row: &Row<'_>) -> rusqlite::Result<Source> {
    Ok(Source {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

pub(crate) fn row_to_keyword(row: &Row<'_>) -> rusqlite::Result<Keyword> {
    Ok(Keyword {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}
