//! Data models for Scopus author entities and output records.
//!
//! Wire types use `#[serde(rename = "...")]` to match the hyphenated
//! Scopus JSON keys and `#[serde(default)]` for optional fields.

mod author;
mod query;
mod record;

pub use author::{
    AuthorCoreData, AuthorMetrics, AuthorProfile, AuthorRetrievalResponse, AuthorSearchEntry,
    AuthorSearchResponse, AuthorSearchResults, Candidate, CurrentAffiliation, OneOrMany,
    PreferredName, author_id,
};
pub use query::{AuthorQuery, SearchExpression};
pub use record::{ResolvedRecord, profile_link};
