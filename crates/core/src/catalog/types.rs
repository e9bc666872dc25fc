use serde::{Deserialize, Serialize};

/// A review of a publication.
///
/// The `id` is a surrogate key assigned by the store on insert. Callers
/// never choose identities; use [`NewReview`] for not-yet-persisted data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub title: String,
    pub review_author: String,
    /// Name of the publication this review discusses.
    pub publication: String,
    pub body: String,
}

/// A review that has not been persisted yet, so it carries no identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    pub title: String,
    pub review_author: String,
    pub publication: String,
    pub body: String,
}

/// A catalogued publication together with its related entities.
///
/// The relation vectors reflect the associations committed in the store at
/// the moment the publication was read; they are populated by `get`, `list`
/// and the attach operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub authors: Vec<Author>,
    pub sources: Vec<Source>,
    pub keywords: Vec<Keyword>,
}

/// A publication that has not been persisted yet.
///
/// Relations are attached after insert (or in the same transaction via
/// `add_full`), so the draft carries only scalar fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPublication {
    pub title: String,
    pub body: String,
}

/// An author that publications can be related to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
}

/// An author that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuthor {
    pub name: String,
}

/// A source (journal, conference, site) a publication appeared in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: i64,
    pub name: String,
}

/// A source that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSource {
    pub name: String,
}

/// A keyword used to tag publications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub id: i64,
    pub name: String,
}

/// A keyword that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewKeyword {
    pub name: String,
}

impl NewAuthor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl NewSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl NewKeyword {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_review_has_no_identity_field() {
        let draft = NewReview {
            title: "T".to_string(),
            review_author: "A".to_string(),
            publication: "P".to_string(),
            body: "B".to_string(),
        };

        let persisted = Review {
            id: 7,
            title: draft.title.clone(),
            review_author: draft.review_author.clone(),
            publication: draft.publication.clone(),
            body: draft.body.clone(),
        };

        assert_eq!(persisted.title, draft.title);
        assert_eq!(persisted.id, 7);
    }

    #[test]
    fn test_related_entity_constructors() {
        assert_eq!(NewAuthor::new("Knuth").name, "Knuth");
        assert_eq!(NewSource::new("CACM").name, "CACM");
        assert_eq!(NewKeyword::new("algorithms").name, "algorithms");
    }
}
