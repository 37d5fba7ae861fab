//! Author resolution: search, disambiguate, fetch metrics.
//!
//! Each query resolves independently to exactly one [`ResolvedRecord`].
//! Remote failures are not absorbed: the first error aborts the batch.

pub mod disambiguation;

use std::sync::Arc;

use futures::{StreamExt, TryStreamExt, stream};

use crate::client::AuthorIndex;
use crate::error::ClientResult;
use crate::models::{AuthorQuery, ResolvedRecord};

pub use disambiguation::{AffiliationPolicy, Selection, select_candidate};

/// Resolves author names against an [`AuthorIndex`].
#[derive(Clone)]
pub struct AuthorResolver {
    index: Arc<dyn AuthorIndex>,
    policy: AffiliationPolicy,
}

impl AuthorResolver {
    /// Create a resolver over an already-initialised index.
    #[must_use]
    pub fn new(index: Arc<dyn AuthorIndex>, policy: AffiliationPolicy) -> Self {
        Self { index, policy }
    }

    /// Selection policy in use.
    #[must_use]
    pub const fn policy(&self) -> &AffiliationPolicy {
        &self.policy
    }

    /// Resolve one name.
    ///
    /// Names with fewer than two tokens and searches without candidates
    /// produce a flagged empty record rather than an error.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn resolve(&self, name: &str) -> ClientResult<ResolvedRecord> {
        let Some(query) = AuthorQuery::parse(name) else {
            tracing::warn!(query = name, "Name has fewer than two tokens, skipping search");
            return Ok(ResolvedRecord::unresolved(name));
        };

        let expression = query.expression();
        let candidates = self.index.search(&expression).await?;

        let Some(selection) = select_candidate(&candidates, &self.policy) else {
            tracing::warn!(query = name, "No candidates found");
            return Ok(ResolvedRecord::unresolved(name));
        };

        let eid = selection.candidate.eid.as_str();
        tracing::debug!(
            query = name,
            candidates = candidates.len(),
            index = selection.index,
            eid,
            low_confidence = selection.low_confidence,
            "Candidate selected"
        );
        if selection.low_confidence {
            tracing::warn!(query = name, eid, "No preferred affiliation or city, using first candidate");
        }

        let metrics = self.index.retrieve(eid).await?;
        let record =
            ResolvedRecord::resolved(name, selection.candidate, metrics, selection.low_confidence);

        if !record.has_profile() {
            tracing::warn!(query = name, eid, "Identifier has fewer than three segments, no profile link");
        }

        Ok(record)
    }

    /// Resolve names with at most `concurrency` resolutions in flight.
    ///
    /// Output order always matches input order.
    ///
    /// # Errors
    ///
    /// Returns the first API failure; remaining names are not resolved.
    pub async fn resolve_all(
        &self,
        names: &[String],
        concurrency: usize,
    ) -> ClientResult<Vec<ResolvedRecord>> {
        tracing::info!(names = names.len(), concurrency, "Resolving authors");

        stream::iter(names)
            .map(|name| self.resolve(name))
            .buffered(concurrency.max(1))
            .try_collect()
            .await
    }
}

impl std::fmt::Debug for AuthorResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorResolver").field("policy", &self.policy).finish()
    }
}
