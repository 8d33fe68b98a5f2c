use anyhow::Result;
use clap::Parser;
use property_finder::config::{AppConfig, Cli};
use property_finder::display::render_results;
use property_finder::sources::save_records;
use property_finder::{Answer, Catalog};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn print_answer(answer: &Answer, config: &AppConfig) -> Result<()> {
    if config.json_output {
        println!("{}", serde_json::to_string_pretty(answer)?);
        return Ok(());
    }

    if answer.filters.is_empty() {
        println!("No filters recognised - showing the whole catalog");
    } else {
        println!("Filters: {}", serde_json::to_string(&answer.filters)?);
    }

    if answer.results.is_empty() {
        println!("No properties match these filters.");
    } else {
        println!("Found {} properties\n", answer.total);
        println!("{}", render_results(&answer.results, config.max_results));
    }
    println!();
    Ok(())
}

async fn interactive(catalog: &Catalog, config: &AppConfig) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    println!("Ask about properties, e.g. \"2 BHK in Pune under 80 lakh\". Type 'exit' to quit.");
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if query.eq_ignore_ascii_case("exit") || query.eq_ignore_ascii_case("quit") {
            break;
        }

        print_answer(&catalog.answer(query), config)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_cli(Cli::parse());

    info!("🏠 Property Finder");
    let source = config.source();
    let catalog = Catalog::load(source.as_ref()).await?;
    info!(
        "Catalog ready: {} records, {} cities",
        catalog.records().len(),
        catalog.vocabulary().len()
    );

    if let Some(path) = &config.export {
        save_records(catalog.records(), path).await?;
        return Ok(());
    }

    match &config.query {
        Some(query) => print_answer(&catalog.answer(query), &config),
        None => interactive(&catalog, &config).await,
    }
}
