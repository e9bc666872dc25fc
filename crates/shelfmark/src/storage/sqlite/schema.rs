//! SQLite schema definitions and SQL query constants.
//!
//! Every filter value is a `?n` placeholder; no query is ever assembled
//! from untrusted text. Search uses the store's `LIKE` operator with the
//! needle bound as a parameter.

/// SQL statement to create all tables.
pub(crate) const CREATE_TABLES: &str = r#"
-- Reviews table
CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    review_author TEXT NOT NULL,
    publication TEXT NOT NULL,
    body TEXT NOT NULL
);

-- Publications table
CREATE TABLE IF NOT EXISTS publications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    body TEXT NOT NULL
);

-- Related entity tables
CREATE TABLE IF NOT EXISTS authors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS sources (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS keywords (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

-- Publication relation tables; the composite primary key makes a relation
-- pair unique, so re-attaching is a no-op
CREATE TABLE IF NOT EXISTS publication_authors (
    publication_id INTEGER NOT NULL,
    author_id INTEGER NOT NULL,
    PRIMARY KEY (publication_id, author_id),
    FOREIGN KEY (publication_id) REFERENCES publications(id),
    FOREIGN KEY (author_id) REFERENCES authors(id)
);

CREATE TABLE IF NOT EXISTS publication_sources (
    publication_id INTEGER NOT NULL,
    source_id INTEGER NOT NULL,
    PRIMARY KEY (publication_id, source_id),
    FOREIGN KEY (publication_id) REFERENCES publications(id),
    FOREIGN KEY (source_id) REFERENCES sources(id)
);

CREATE TABLE IF NOT EXISTS publication_keywords (
    publication_id INTEGER NOT NULL,
    keyword_id INTEGER NOT NULL,
    PRIMARY KEY (publication_id, keyword_id),
    FOREIGN KEY (publication_id) REFERENCES publications(id),
    FOREIGN KEY (keyword_id) REFERENCES keywords(id)
);

-- Indexes for the search queries
CREATE INDEX IF NOT EXISTS idx_reviews_publication ON reviews(publication);
CREATE INDEX IF NOT EXISTS idx_publications_title ON publications(title);
"#;

// Review queries
pub(crate) const INSERT_REVIEW: &str = r#"
INSERT INTO reviews (title, review_author, publication, body)
VALUES (?1, ?2, ?3, ?4)
"#;

pub(crate) const SELECT_REVIEWS: &str = r#"
SELECT id, title, review_author, publication, body
FROM reviews
"#;

pub(crate) const SELECT_REVIEW_BY_ID: &str = r#"
SELECT id, title, review_author, publication, body
FROM reviews
WHERE id = ?1
"#;

pub(crate) const SEARCH_REVIEWS_BY_PUBLICATION: &str = r#"
SELECT id, title, review_author, publication, body
FROM reviews
WHERE publication LIKE '%' || ?1 || '%'
"#;

// Publication queries
pub(crate) const INSERT_PUBLICATION: &str = r#"
INSERT INTO publications (title, body)
VALUES (?1, ?2)
"#;

pub(crate) const SELECT_PUBLICATIONS: &str = r#"
SELECT id, title, body
FROM publications
"#;

pub(crate) const SELECT_PUBLICATION_BY_ID: &str = r#"
SELECT id, title, body
FROM publications
WHERE id = ?1
"#;

pub(crate) const SEARCH_PUBLICATIONS_BY_TITLE: &str = r#"
SELECT id, title, body
FROM publications
WHERE title LIKE '%' || ?1 || '%'
"#;

pub(crate) const PUBLICATION_EXISTS: &str = r#"
SELECT 1 FROM publications WHERE id = ?1
"#;

// Relation queries
pub(crate) const ATTACH_AUTHOR: &str = r#"
INSERT OR IGNORE INTO publication_authors (publication_id, author_id)
VALUES (?1, ?2)
"#;

pub(crate) const ATTACH_SOURCE: &str = r#"
INSERT OR IGNORE INTO publication_sources (publication_id, source_id)
VALUES (?1, ?2)
"#;

pub(crate) const ATTACH_KEYWORD: &str = r#"
INSERT OR IGNORE INTO publication_keywords (publication_id, keyword_id)
VALUES (?1, ?2)
"#;

pub(crate) const SELECT_AUTHORS_FOR_PUBLICATION: &str = r#"
SELECT a.id, a.name
FROM authors a
INNER JOIN publication_authors pa ON a.id = pa.author_id
WHERE pa.publication_id = ?1
"#;

pub(crate) const SELECT_SOURCES_FOR_PUBLICATION: &str = r#"
SELECT s.id, s.name
FROM sources s
INNER JOIN publication_sources ps ON s.id = ps.source_id
WHERE ps.publication_id = ?1
"#;

pub(crate) const SELECT_KEYWORDS_FOR_PUBLICATION: &str = r#"
SELECT k.id, k.name
FROM keywords k
INNER JOIN publication_keywords pk ON k.id = pk.keyword_id
WHERE pk.publication_id = ?1
"#;

// Author queries
pub(crate) const INSERT_AUTHOR: &str = r#"
INSERT INTO authors (name)
VALUES (?1)
"#;

pub(crate) const INSERT_AUTHOR_IF_ABSENT: &str = r#"
INSERT OR IGNORE INTO authors (name)
VALUES (?1)
"#;

pub(crate) const SELECT_AUTHORS: &str = r#"
SELECT id, name
FROM authors
"#;

pub(crate) const SELECT_AUTHOR_BY_ID: &str = r#"
SELECT id, name
FROM authors
WHERE id = ?1
"#;

pub(crate) const SELECT_AUTHOR_BY_NAME: &str = r#"
SELECT id, name
FROM authors
WHERE name = ?1
"#;

pub(crate) const SEARCH_AUTHORS_BY_NAME: &str = r#"
SELECT id, name
FROM authors
WHERE name LIKE '%' || ?1 || '%'
"#;

pub(crate) const AUTHOR_EXISTS: &str = r#"
SELECT 1 FROM authors WHERE id = ?1
"#;

// Source queries
pub(crate) const INSERT_SOURCE: &str = r#"
INSERT INTO sources (name)
VALUES (?1)
"#;

pub(crate) const INSERT_SOURCE_IF_ABSENT: &str = r#"
INSERT OR IGNORE INTO sources (name)
VALUES (?1)
"#;

pub(crate) const SELECT_SOURCES: &str = r#"
SELECT id, name
FROM sources
"#;

pub(crate) const SELECT_SOURCE_BY_ID: &str = r#"
SELECT id, name
FROM sources
WHERE id = ?1
"#;

pub(crate) const SELECT_SOURCE_BY_NAME: &str = r#"
SELECT id, name
FROM sources
WHERE name = ?1
"#;

pub(crate) const SEARCH_SOURCES_BY_NAME: &str = r#"
SELECT id, name
FROM sources
WHERE name LIKE '%' || ?1 || '%'
"#;

pub(crate) const SOURCE_EXISTS: &str = r#"
SELECT 1 FROM sources WHERE id = ?1
"#;

// Keyword queries
pub(crate) const INSERT_KEYWORD: &str = r#"
INSERT INTO keywords (name)
VALUES (?1)
"#;

pub(crate) const INSERT_KEYWORD_IF_ABSENT: &str = r#"
INSERT OR IGNORE INTO keywords (name)
VALUES (?1)
"#;

pub(crate) const SELECT_KEYWORDS: &str = r#"
SELECT id, name
FROM keywords
"#;

pub(crate) const SELECT_KEYWORD_BY_ID: &str = r#"
SELECT id, name
FROM keywords
WHERE id = ?1
"#;

pub(crate) const SELECT_KEYWORD_BY_NAME: &str = r#"
SELECT id, name
FROM keywords
WHERE name = ?1
"#;

pub(crate) const SEARCH_KEYWORDS_BY_NAME: &str = r#"
SELECT id, name
FROM keywords
WHERE name LIKE '%' || ?1 || '%'
"#;

pub(crate) const KEYWORD_EXISTS: &str = r#"
SELECT 1 FROM keywords WHERE id = ?1
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_covers_all_entities() {
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS reviews"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS publications"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS authors"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS sources"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS keywords"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS publication_authors"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS publication_sources"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS publication_keywords"));
    }

    #[test]
    fn test_search_queries_bind_the_needle() {
        // The filter text must be a parameter, never query text.
        for sql in [
            SEARCH_REVIEWS_BY_PUBLICATION,
            SEARCH_PUBLICATIONS_BY_TITLE,
            SEARCH_AUTHORS_BY_NAME,
            SEARCH_SOURCES_BY_NAME,
            SEARCH_KEYWORDS_BY_NAME,
        ] {
            assert!(sql.contains("LIKE '%' || ?1 || '%'"), "unbound needle in: {sql}");
        }
    }

    #[test]
    fn test_relation_tables_have_composite_primary_keys() {
        assert!(CREATE_TABLES.contains("PRIMARY KEY (publication_id, author_id)"));
        assert!(CREATE_TABLES.contains("PRIMARY KEY (publication_id, source_id)"));
        assert!(CREATE_TABLES.contains("PRIMARY KEY (publication_id, keyword_id)"));
    }
}
