mod types;

pub use types::{
    Author, Keyword, NewAuthor, NewKeyword, NewPublication, NewReview, NewSource, Publication,
    Review, Source,
};
