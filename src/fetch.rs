use reqwest::Url;
use tracing::{debug, info};

use crate::error::Result;

/// Downloads the archive's result page for `url`.
pub async fn fetch_page(url: &Url) -> Result<String> {
    info!("fetching {}", url);
    let html = reqwest::get(url.clone())
        .await?
        .error_for_status()?
        .text()
        .await?;
    debug!("fetched {} bytes", html.len());
    Ok(html)
}
