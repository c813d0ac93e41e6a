use std::fs;

use anyhow::Result;
use aoj_icpc_set::cli::Cli;
use aoj_icpc_set::config::Config;
use aoj_icpc_set::generator::ProblemSetGenerator;
use aoj_icpc_set::render::ProblemSetView;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::resolve(cli.config.as_deref())?;
    config.query.rivals.extend(cli.rivals);
    let shuffle = config.shuffle && !cli.no_shuffle;

    let url = config.query.url()?;
    if cli.print_url {
        println!("{}", url);
        return Ok(());
    }
    info!("query url: {}", url);

    let generator = ProblemSetGenerator::new(config.quota, config.query);
    let problems = match cli.input {
        Some(path) => {
            let html = fs::read_to_string(&path)?;
            generator.generate_from_html(&html, shuffle, &mut rand::thread_rng())?
        }
        None => generator.generate(shuffle).await?,
    };

    let output = ProblemSetView::new(&problems, cli.details).generate()?;
    print!("{}", output);
    Ok(())
}

/// Logs go to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
