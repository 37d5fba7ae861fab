//! Candidate selection by preferred affiliation or city.
//!
//! The first candidate (in provider order) whose affiliation contains a
//! preferred-affiliation substring, or whose city contains a preferred-city
//! substring, wins with high confidence. Otherwise the first candidate is
//! used and the selection is flagged. Matching is case-sensitive.

use crate::models::Candidate;

/// Affiliation substrings preferred by default.
pub const DEFAULT_AFFILIATIONS: &[&str] =
    &["University of North Carolina", "UNC", "North Carolina State University", "NC State"];

/// City substrings preferred by default.
pub const DEFAULT_CITIES: &[&str] = &["Chapel Hill", "Raleigh"];

/// Allow-lists used to pick among candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliationPolicy {
    affiliations: Vec<String>,
    cities: Vec<String>,
}

impl AffiliationPolicy {
    /// Create a policy from explicit allow-lists.
    #[must_use]
    pub fn new(affiliations: Vec<String>, cities: Vec<String>) -> Self {
        Self { affiliations, cities }
    }

    /// Default lists, each replaced by the corresponding override when non-empty.
    #[must_use]
    pub fn with_overrides(affiliations: Vec<String>, cities: Vec<String>) -> Self {
        let defaults = Self::default();
        Self {
            affiliations: if affiliations.is_empty() { defaults.affiliations } else { affiliations },
            cities: if cities.is_empty() { defaults.cities } else { cities },
        }
    }

    /// Preferred affiliation substrings.
    #[must_use]
    pub fn affiliations(&self) -> &[String] {
        &self.affiliations
    }

    /// Preferred city substrings.
    #[must_use]
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// Whether a candidate's affiliation or city contains a preferred substring.
    #[must_use]
    pub fn matches(&self, candidate: &Candidate) -> bool {
        let affiliation = candidate.affiliation_text();
        let city = candidate.city_text();

        self.affiliations.iter().any(|a| affiliation.contains(a.as_str()))
            || self.cities.iter().any(|c| city.contains(c.as_str()))
    }
}

impl Default for AffiliationPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_AFFILIATIONS.iter().map(|s| (*s).to_string()).collect(),
            DEFAULT_CITIES.iter().map(|s| (*s).to_string()).collect(),
        )
    }
}

/// Outcome of disambiguation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection<'a> {
    /// Chosen candidate.
    pub candidate: &'a Candidate,

    /// Position of the chosen candidate in the input slice.
    pub index: usize,

    /// True when no candidate matched the policy.
    pub low_confidence: bool,
}

/// Pick one candidate. Returns `None` only for an empty slice.
#[must_use]
pub fn select_candidate<'a>(
    candidates: &'a [Candidate],
    policy: &AffiliationPolicy,
) -> Option<Selection<'a>> {
    if let Some((index, candidate)) = candidates.iter().enumerate().find(|(_, c)| policy.matches(c))
    {
        return Some(Selection { candidate, index, low_confidence: false });
    }

    candidates.first().map(|candidate| Selection { candidate, index: 0, low_confidence: true })
}
