use serde::Deserialize;

use shelfmark_core::catalog::NewReview;

/// Request payload for creating a new review.
#[derive(Debug, Deserialize)]
pub struct CreateReview {
    pub title: String,
    pub review_author: String,
    pub publication: String,
    #[serde(default)]
    pub body: String,
}

impl CreateReview {
    /// Converts the create request into a review draft.
    pub fn into_new_review(self) -> NewReview {
        NewReview {
            title: self.title,
            review_author: self.review_author,
            publication: self.publication,
            body: self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_and_convert() {
        let payload: CreateReview = serde_json::from_str(
            r#"{"title":"T","review_author":"A","publication":"P","body":"B"}"#,
        )
        .expect("payload");

        let draft = payload.into_new_review();
        assert_eq!(draft.title, "T");
        assert_eq!(draft.review_author, "A");
        assert_eq!(draft.publication, "P");
        assert_eq!(draft.body, "B");
    }

    #[test]
    fn test_body_defaults_to_empty() {
        let payload: CreateReview =
            serde_json::from_str(r#"{"title":"T","review_author":"A","publication":"P"}"#)
                .expect("payload");

        assert_eq!(payload.into_new_review().body, "");
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let result = serde_json::from_str::<CreateReview>(r#"{"title":"T"}"#);
        assert!(result.is_err());
    }
}
