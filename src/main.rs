mod fetcher;
mod mapper;
mod models;
mod parser;
mod writer;

use std::io;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

const CACHE_DIR: &str = "jsons";
const OUTPUT_FILE: &str = "woocommerce-import.csv";

#[derive(Parser)]
#[command(name = "shopify2woocommerce")]
#[command(about = "Convert a Shopify storefront catalog into a WooCommerce import CSV")]
struct Cli {
    /// Shopify store base URL, like https://your-shopify-store.com
    base_url: Option<String>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    // Interactive runs wait for a keypress before the window closes.
    let interactive = cli.base_url.is_none();

    let code = match run(cli.base_url) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("\nerror: {err:#}");
            ExitCode::FAILURE
        }
    };
    if interactive {
        interactive_exit();
    }
    code
}

fn run(base_url: Option<String>) -> Result<()> {
    let base_url = match base_url {
        Some(url) => url,
        None => prompt_for_url()?,
    };

    std::fs::create_dir_all(CACHE_DIR)?;
    let cache_dir = Path::new(CACHE_DIR);

    let collections_path = cache_dir.join("collections.json");
    fetcher::fetch_to_file(&format!("{base_url}/collections.json"), &collections_path)?;
    let collections = parser::load_collections(&collections_path)?;

    println!("\n\nShopify API to WooCommerce-import-CSV converter.\n\nStarting to loop through collections");

    let mut collector = mapper::RowCollector::new();
    for collection in &collections {
        if collection.products_count == 0 {
            continue;
        }
        let products_url = format!("{base_url}/collections/{}/products.json", collection.handle);
        let products_path = cache_dir.join(format!("{}.json", collection.handle));
        fetcher::fetch_to_file(&products_url, &products_path)?;

        let products = parser::load_products(&products_path)?;
        println!("\nCATEGORY: {} has {} products.", collection.title, products.len());

        for product in &products {
            collector.add_product(product, &collection.title);
        }
    }

    let rows = collector.into_rows();
    writer::write_file(&rows, Path::new(OUTPUT_FILE))?;

    println!("\n\nProcessed {base_url}. Total {} products found.", rows.len());
    println!("Created {OUTPUT_FILE} in the same folder where you ran this tool.");
    Ok(())
}

fn prompt_for_url() -> Result<String> {
    println!("\n\nEnter a shopify URL, like https://your-shopify-store.com:");
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("failed to read URL from stdin")?;
    Ok(line.trim().to_string())
}

fn interactive_exit() {
    println!("\n\nPress enter to exit.\n");
    let mut line = String::new();
    let _ = io::stdin().read_line(&mut line);
}
