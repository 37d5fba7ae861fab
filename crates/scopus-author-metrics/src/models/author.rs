//! Author data model matching the Scopus author search and retrieval schemas.

use serde::{Deserialize, Deserializer, Serialize};

/// Author search response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorSearchResponse {
    /// Search results block.
    #[serde(rename = "search-results")]
    pub results: AuthorSearchResults,
}

/// One page of author search results.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorSearchResults {
    /// Total matching authors.
    #[serde(rename = "opensearch:totalResults", default, deserialize_with = "count")]
    pub total: Option<u64>,

    /// Entries on this page. An empty result set arrives as one entry with `error` set.
    #[serde(default)]
    pub entry: Vec<AuthorSearchEntry>,
}

/// A raw search entry.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorSearchEntry {
    /// Electronic identifier, e.g. `9-s2.0-7004212771`.
    #[serde(default)]
    pub eid: Option<String>,

    /// Set on the placeholder entry of an empty result set.
    #[serde(default)]
    pub error: Option<String>,

    /// Preferred name.
    #[serde(rename = "preferred-name", default)]
    pub preferred_name: Option<PreferredName>,

    /// Current affiliation (object or array).
    #[serde(rename = "affiliation-current", default)]
    pub affiliation_current: Option<OneOrMany<CurrentAffiliation>>,
}

impl AuthorSearchEntry {
    /// Convert into a candidate, skipping placeholder entries.
    #[must_use]
    pub fn into_candidate(self) -> Option<Candidate> {
        if self.error.is_some() {
            return None;
        }
        let eid = self.eid.filter(|e| !e.is_empty())?;
        let name = self.preferred_name.unwrap_or_default();
        let affiliation = self
            .affiliation_current
            .and_then(OneOrMany::into_first)
            .unwrap_or_default();

        Some(Candidate {
            eid,
            surname: name.surname,
            given_name: name.given_name,
            affiliation: affiliation.name,
            city: affiliation.city,
            country: affiliation.country,
        })
    }
}

/// Preferred author name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreferredName {
    /// Surname.
    #[serde(default)]
    pub surname: Option<String>,

    /// Given name.
    #[serde(rename = "given-name", default)]
    pub given_name: Option<String>,
}

/// Current affiliation of a search entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentAffiliation {
    /// Institution name.
    #[serde(rename = "affiliation-name", default)]
    pub name: Option<String>,

    /// City.
    #[serde(rename = "affiliation-city", default)]
    pub city: Option<String>,

    /// Country.
    #[serde(rename = "affiliation-country", default)]
    pub country: Option<String>,
}

/// Scopus collapses single-element arrays into bare objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// An array. Tried first: derived structs also accept sequences.
    Many(Vec<T>),
    /// A bare object.
    One(T),
}

impl<T> OneOrMany<T> {
    /// The single value or the first array element.
    pub fn into_first(self) -> Option<T> {
        match self {
            Self::One(value) => Some(value),
            Self::Many(values) => values.into_iter().next(),
        }
    }
}

/// One possible author match for a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// Composite identifier, at least three dash-separated segments.
    pub eid: String,

    /// Surname.
    pub surname: Option<String>,

    /// Given name.
    pub given_name: Option<String>,

    /// Current affiliation name.
    pub affiliation: Option<String>,

    /// City of the current affiliation.
    pub city: Option<String>,

    /// Country of the current affiliation.
    pub country: Option<String>,
}

impl Candidate {
    /// Numeric author ID: the third dash-separated segment of the EID.
    #[must_use]
    pub fn author_id(&self) -> Option<&str> {
        author_id(&self.eid)
    }

    /// Affiliation text, empty when absent.
    #[must_use]
    pub fn affiliation_text(&self) -> &str {
        self.affiliation.as_deref().unwrap_or("")
    }

    /// City text, empty when absent.
    #[must_use]
    pub fn city_text(&self) -> &str {
        self.city.as_deref().unwrap_or("")
    }
}

/// Third dash-separated segment of an EID (`9-s2.0-7004212771` -> `7004212771`).
#[must_use]
pub fn author_id(eid: &str) -> Option<&str> {
    eid.split('-').nth(2).filter(|id| !id.is_empty())
}

/// Author retrieval response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorRetrievalResponse {
    /// Retrieved profiles (one per requested ID).
    #[serde(rename = "author-retrieval-response")]
    pub profiles: OneOrMany<AuthorProfile>,
}

/// Retrieved author profile, METRICS view.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorProfile {
    /// h-index.
    #[serde(rename = "h-index", default, deserialize_with = "count")]
    pub h_index: Option<u64>,

    /// Core counters.
    #[serde(default)]
    pub coredata: Option<AuthorCoreData>,
}

/// Core counters of a profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorCoreData {
    /// Number of indexed documents.
    #[serde(rename = "document-count", default, deserialize_with = "count")]
    pub document_count: Option<u64>,

    /// Total citations.
    #[serde(rename = "citation-count", default, deserialize_with = "count")]
    pub citation_count: Option<u64>,
}

impl From<AuthorProfile> for AuthorMetrics {
    fn from(profile: AuthorProfile) -> Self {
        let core = profile.coredata.unwrap_or_default();
        Self {
            h_index: profile.h_index,
            document_count: core.document_count,
            citation_count: core.citation_count,
        }
    }
}

/// Extended metrics for one author.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AuthorMetrics {
    /// h-index.
    pub h_index: Option<u64>,

    /// Number of indexed documents.
    pub document_count: Option<u64>,

    /// Total citations.
    pub citation_count: Option<u64>,
}

/// Scopus encodes counters as strings; accept either form.
fn count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}
