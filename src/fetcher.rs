use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use reqwest::redirect;

/// Download `url` into `dest`, treating an existing file as authoritative:
/// if `dest` is already present the network is never touched.
pub fn fetch_to_file(url: &str, dest: &Path) -> Result<()> {
    if dest.exists() {
        log::debug!("cache hit for {url}, reusing {}", dest.display());
        return Ok(());
    }

    println!("\nDownloading {url}");
    let body = fetch_bytes(url).with_context(|| format!("failed to download {url}"))?;
    fs::write(dest, &body).with_context(|| format!("failed to write {}", dest.display()))?;
    println!("Saved as {}", dest.display());
    Ok(())
}

fn fetch_bytes(url: &str) -> Result<Vec<u8>, reqwest::Error> {
    let redirect_policy = redirect::Policy::custom(|attempt| {
        if attempt.previous().len() > 10 {
            attempt.error("Too many redirects (>10)")
        } else {
            attempt.follow()
        }
    });

    let client = reqwest::blocking::Client::builder()
        .redirect(redirect_policy)
        .build()?;

    client.get(url)
        .header("User-Agent", "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3")
        .send()?
        // An error page must never end up in the cache as a catalog document.
        .error_for_status()?
        .bytes()
        .map(|body| body.to_vec())
}
