//! Scopus Author Metrics
//!
//! Resolves a list of author names to Scopus author profiles and writes
//! h-index, document and citation counts to a spreadsheet. Rows whose match
//! is uncertain are highlighted.
//!
//! # Pipeline
//!
//! - **Input**: one name per line from a `.txt` file, or explicit names
//! - **Resolve**: search by first/last token, pick the first candidate with a
//!   preferred affiliation or city, fetch metrics
//! - **Report**: single-sheet `.xlsx`, never overwriting an existing file
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use scopus_author_metrics::{AffiliationPolicy, AuthorResolver, Config, ScopusClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = ScopusClient::new(config)?;
//!     let resolver = AuthorResolver::new(Arc::new(client), AffiliationPolicy::default());
//!
//!     let record = resolver.resolve("Jane A Smith").await?;
//!     println!("{:?}", record.h_index);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod report;
pub mod resolver;
pub mod runner;

pub use client::{AuthorIndex, ScopusClient};
pub use config::Config;
pub use error::{AppError, ClientError};
pub use models::ResolvedRecord;
pub use resolver::{AffiliationPolicy, AuthorResolver};
pub use runner::{RunOptions, RunSummary};
