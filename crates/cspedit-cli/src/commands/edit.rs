//! Interactive editing of a URL's policy header.
//!
//! Fetches the header, runs the editor on the terminal, and writes the
//! printed policy to the configured output file.

use clap::Args;
use cspedit_core::fetch::CSP_REPORT_ONLY_HEADER;
use cspedit_core::{
    fetch_policy, Config, DirectiveSet, FetchOptions, FileSink, NullSink, Session, StdConsole,
};
use std::path::PathBuf;
use tracing::warn;

#[derive(Args)]
pub struct EditArgs {
    /// URL whose policy to edit (https:// is assumed when no scheme is given)
    pub url: Option<String>,
    /// Write the printed policy here instead of the configured output path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Do not write the printed policy to a file
    #[arg(long, conflicts_with = "output")]
    pub no_save: bool,
    /// Edit the Content-Security-Policy-Report-Only header
    #[arg(long, conflicts_with = "header")]
    pub report_only: bool,
    /// Response header to read
    #[arg(long)]
    pub header: Option<String>,
    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl EditArgs {
    /// Config values with this run's flags applied on top.
    fn fetch_options(&self, config: &Config) -> FetchOptions {
        let mut fetch = config.fetch.clone();
        if self.report_only {
            fetch.header = CSP_REPORT_ONLY_HEADER.to_string();
        }
        if let Some(header) = &self.header {
            fetch.header = header.clone();
        }
        if let Some(timeout) = self.timeout {
            fetch.timeout_secs = timeout;
        }
        FetchOptions::from_config(&fetch)
    }
}

pub fn run(url: &str, args: EditArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let options = args.fetch_options(&config);
    let directives = load_directives(&options, url)?;

    let console = StdConsole::stdio();
    if args.no_save {
        Session::new(directives, console, NullSink).run()?;
        return Ok(());
    }

    let mut sink = FileSink::new(args.output.unwrap_or(config.output.path));
    let outcome = Session::new(directives, console, &mut sink).run()?;
    if outcome.printed().is_some() {
        eprintln!("Policy saved to {}", sink.path().display());
    }
    Ok(())
}

/// Fetch and parse the policy, falling back to an empty set.
fn load_directives(
    options: &FetchOptions,
    url: &str,
) -> Result<DirectiveSet, Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match runtime.block_on(fetch_policy(options, url)) {
        Ok(Some(policy)) => Ok(DirectiveSet::parse(&policy)),
        Ok(None) => {
            eprintln!(
                "No {} header found for {url}; starting with an empty policy.",
                options.header
            );
            Ok(DirectiveSet::new())
        }
        Err(e) => {
            warn!(url, error = %e, "policy fetch failed");
            eprintln!("Could not fetch {url}: {e}; starting with an empty policy.");
            Ok(DirectiveSet::new())
        }
    }
}
