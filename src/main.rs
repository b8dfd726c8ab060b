#![deny(clippy::all)]
use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use dermis_collector::cli::{Cli, Commands};
use dermis_collector::{DiagnosisCrawler, ImageCollector};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    env_logger::builder().format_timestamp(None).init();

    let config = args.settings()?;

    match args.mode {
        Commands::Crawl { imagenum } => {
            let crawler = DiagnosisCrawler::new(config)?;
            let total = crawler.collect_all(imagenum).await?;
            print_results(total as u64);
        }
        Commands::Collect { query, imagenum } => {
            let mut collector = ImageCollector::new(&query, &config)?;
            collector.collect(imagenum).await?;
        }
    }

    Ok(())
}

fn print_results(total_down: u64) {
    println!(
        "{} {} {}",
        total_down.to_string().bold().blue(),
        "files".bold().blue(),
        "downloaded".bold()
    );
}
