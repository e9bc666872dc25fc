use serde::Deserialize;

use shelfmark_core::catalog::{
    NewAuthor, NewKeyword, NewPublication, NewSource,
};

/// Request payload for creating a new publication.
///
/// The optional name lists feed `add_full`: related entities are matched
/// by name and linked in the same transaction as the insert.
#[derive(Debug, Deserialize)]
pub struct CreatePublication {
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl CreatePublication {
    /// Splits the request into the draft and its related-entity drafts,
    /// in the shape `PublicationRepository::add_full` takes.
    pub fn into_parts(
        self,
    ) -> (
        NewPublication,
        Vec<NewAuthor>,
        Vec<NewSource>,
        Vec<NewKeyword>,
    ) {
        (
            NewPublication {
                title: self.title,
                body: self.body,
            },
            self.authors.into_iter().map(NewAuthor::new).collect(),
            self.sources.into_iter().map(NewSource::new).collect(),
            self.keywords.into_iter().map(NewKeyword::new).collect(),
        )
    }
}

/// Request payload for creating a new author.
#[derive(Debug, Deserialize)]
pub struct CreateAuthor {
    pub name: String,
}

impl CreateAuthor {
    pub fn into_new_author(self) -> NewAuthor {
        NewAuthor { name: self.name }
    }
}

/// Request payload for creating a new source.
#[derive(Debug, Deserialize)]
pub struct CreateSource {
    pub name: String,
}

impl CreateSource {
    pub fn into_new_source(self) -> NewSource {
        NewSource { name: self.name }
    }
}

/// Request payload for creating a new keyword.
#[derive(Debug, Deserialize)]
pub struct CreateKeyword {
    pub name: String,
}

impl CreateKeyword {
    pub fn into_new_keyword(self) -> NewKeyword {
        NewKeyword { name: self.name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_payload_splits_into_parts() {
        let payload: CreatePublication = serde_json::from_str(
            r#"{
                "title": "On parsing",
                "body": "Summary",
                "authors": ["Knuth"],
                "sources": ["CACM"],
                "keywords": ["parsing", "grammars"]
            }"#,
        )
        .expect("payload");

        let (publication, authors, sources, keywords) = payload.into_parts();
        assert_eq!(publication.title, "On parsing");
        assert_eq!(authors.len(), 1);
        assert_eq!(sources.len(), 1);
        assert_eq!(keywords.len(), 2);
        assert_eq!(keywords[1].name, "grammars");
    }

    #[test]
    fn test_relation_lists_default_to_empty() {
        let payload: CreatePublication =
            serde_json::from_str(r#"{"title":"Bare"}"#).expect("payload");

        let (publication, authors, sources, keywords) = payload.into_parts();
        assert_eq!(publication.title, "Bare");
        assert!(authors.is_empty());
        assert!(sources.is_empty());
        assert!(keywords.is_empty());
    }
}
