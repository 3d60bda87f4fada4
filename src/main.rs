// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr, so stdout only carries the report)
// 3. Crawl the site, reporting each page as it is visited
// 4. Exit with proper code (0 = all pages OK, 1 = failed pages, 2 = error)
// =============================================================================

mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use site_crawler::{ConsoleReporter, Crawler, HttpFetcher, JsonReporter, Reporter};

#[tokio::main]
async fn main() {
    // Parse first: a missing start URL ends here with a usage error
    let cli = Cli::parse();

    init_logging(&cli);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Returns:
//   Ok(0) = every page came back 200
//   Ok(1) = at least one page failed
//   Err   = the crawl could not start
async fn run(cli: Cli) -> Result<i32> {
    let fetcher = HttpFetcher::new(&cli.fetch_config())?;

    let reporter: Box<dyn Reporter> = if cli.json {
        Box::new(JsonReporter::stdout())
    } else {
        Box::new(ConsoleReporter::stdout())
    };

    let mut crawler = Crawler::new(cli.crawl_config(), fetcher, reporter);
    let summary = crawler.run().await?;

    let failed = summary.failures().count();
    eprintln!(
        "Crawled {} page(s) in {} round(s), {} failed",
        summary.visited.len(),
        summary.rounds,
        failed
    );

    if failed > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}
