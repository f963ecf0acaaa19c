use about_crawl::{Crawl, PageRecord, results};
use clap::Parser;
use std::error::Error;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let config = Args::parse().into_config()?;
    let output_path = config.output_path.clone();

    ::log::info!("Starting crawl for URL: {}", config.start_url);
    println!("Note: crawling requires a WebDriver server (e.g., ChromeDriver).");
    println!(
        "Set WEBDRIVER_URL environment variable if not using the default {}",
        config.browser.webdriver_url
    );

    let start_time = std::time::Instant::now();
    let records = match Crawl::new(config).run().await {
        Ok(records) => records,
        Err(e) => {
            ::log::error!("Failed to run crawl: {}", e);
            return Err(e.into());
        }
    };

    for record in &records {
        print_record(record);
    }

    results::write_json(&output_path, &records)?;

    ::log::info!(
        "Crawl complete - {} pages in {:.2} seconds",
        records.len(),
        start_time.elapsed().as_secs_f64()
    );
    println!("\nSaved {} page records to {}", records.len(), output_path);

    Ok(())
}

fn print_record(record: &PageRecord) {
    println!("\n{}", "=".repeat(100));
    println!("Context: Scraping company page for: {}", record.url);

    if let Some(error) = &record.error {
        println!("\nERROR: {}", error);
        return;
    }

    println!("\nSUMMARY (Paragraphs):");
    for para in record.summarized_paragraphs.iter().flatten() {
        println!("- {}", para);
    }
    println!("\nTRANSLATED CONTENT (Paragraphs):");
    for para in record.translated_paragraphs.iter().flatten() {
        println!("- {}", para);
    }
}
