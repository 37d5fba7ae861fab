//! One output row per query.

use serde::Serialize;

use super::{AuthorMetrics, Candidate, author_id};
use crate::config::api;

/// Resolution outcome for one input name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRecord {
    /// Original query string.
    pub query: String,

    /// Surname of the selected author.
    pub surname: Option<String>,

    /// Given name of the selected author.
    #[serde(rename = "givenname")]
    pub given_name: Option<String>,

    /// Current affiliation.
    pub affiliation: Option<String>,

    /// Affiliation city.
    pub city: Option<String>,

    /// Affiliation country.
    pub country: Option<String>,

    /// Public profile page.
    #[serde(rename = "scopus_link")]
    pub profile_link: Option<String>,

    /// h-index.
    pub h_index: Option<u64>,

    /// Indexed documents.
    pub document_count: Option<u64>,

    /// Total citations.
    pub citation_count: Option<u64>,

    /// Low-confidence marker: no preferred match, or nothing found at all.
    #[serde(rename = "flag")]
    pub ambiguous: bool,
}

impl ResolvedRecord {
    /// Record for a query that produced no candidate.
    #[must_use]
    pub fn unresolved(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            surname: None,
            given_name: None,
            affiliation: None,
            city: None,
            country: None,
            profile_link: None,
            h_index: None,
            document_count: None,
            citation_count: None,
            ambiguous: true,
        }
    }

    /// Record for a selected candidate.
    #[must_use]
    pub fn resolved(
        query: impl Into<String>,
        candidate: &Candidate,
        metrics: AuthorMetrics,
        ambiguous: bool,
    ) -> Self {
        Self {
            query: query.into(),
            surname: candidate.surname.clone(),
            given_name: candidate.given_name.clone(),
            affiliation: candidate.affiliation.clone(),
            city: candidate.city.clone(),
            country: candidate.country.clone(),
            profile_link: profile_link(&candidate.eid),
            h_index: metrics.h_index,
            document_count: metrics.document_count,
            citation_count: metrics.citation_count,
            ambiguous,
        }
    }

    /// Whether a profile was found for this query.
    #[must_use]
    pub const fn has_profile(&self) -> bool {
        self.profile_link.is_some()
    }
}

/// Profile URL embedding the third dash-separated segment of the EID.
#[must_use]
pub fn profile_link(eid: &str) -> Option<String> {
    author_id(eid).map(|id| format!("{}{id}", api::PROFILE_URL))
}
