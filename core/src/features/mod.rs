//! Text to fixed-dimension TF-IDF vectors.
//!
//! Fitting happens once over a training corpus and yields an immutable
//! [`FittedExtractor`]; inference only ever projects into that space.

pub mod tfidf;
pub mod tokenize;
pub mod vector;

pub use tfidf::{FittedExtractor, TfidfVectorizer};
pub use vector::FeatureVector;
