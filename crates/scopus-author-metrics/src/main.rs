//! Scopus Author Metrics - Entry Point

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use scopus_author_metrics::config::output;
use scopus_author_metrics::{
    AffiliationPolicy, AppError, AuthorResolver, Config, RunOptions, ScopusClient, input, runner,
};

#[derive(Parser, Debug)]
#[command(name = "scopus-author-metrics")]
#[command(about = "Fetch Scopus author metrics for a list of names")]
#[command(version)]
struct Cli {
    /// Text file with one author name per line
    #[arg(long, default_value = output::DEFAULT_INPUT)]
    input: PathBuf,

    /// Output Excel file (renamed if it already exists)
    #[arg(long, default_value = output::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Author name (repeatable; replaces --input when given)
    #[arg(long = "name", value_name = "NAME")]
    names: Vec<String>,

    /// Worksheet name
    #[arg(long, default_value = output::DEFAULT_SHEET)]
    sheet_name: String,

    /// Scopus API key
    #[arg(long, env = "SCOPUS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Scopus institution token (optional)
    #[arg(long, env = "SCOPUS_INST_TOKEN", hide_env_values = true)]
    inst_token: Option<String>,

    /// Preferred affiliation substring (repeatable; replaces the built-in list)
    #[arg(long = "affiliation", value_name = "TEXT")]
    affiliations: Vec<String>,

    /// Preferred city substring (repeatable; replaces the built-in list)
    #[arg(long = "city", value_name = "TEXT")]
    cities: Vec<String>,

    /// Maximum names resolved at once
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u16).range(1..))]
    concurrency: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Scopus author metrics");

    // Input problems surface before any network setup.
    let names = input::collect_names(&cli.input, &cli.names)
        .map_err(|e| anyhow::anyhow!(e.to_user_message()))?;

    let config = Config::new(cli.api_key, cli.inst_token);
    let client = ScopusClient::new(config)?;
    let policy = AffiliationPolicy::with_overrides(cli.affiliations, cli.cities);
    let resolver = AuthorResolver::new(Arc::new(client), policy);

    let options = RunOptions {
        output: &cli.output,
        sheet_name: &cli.sheet_name,
        concurrency: usize::from(cli.concurrency),
    };

    let summary = runner::run(&resolver, &names, &options).await.map_err(|e: AppError| {
        tracing::error!(error = %e, "Run aborted");
        anyhow::anyhow!(e.to_user_message())
    })?;

    println!("{summary}");
    Ok(())
}
