//! The scrape pipeline: fetch, extract, classify, collect, assemble.
//!
//! Internally the stages propagate typed `ScrapeError`s; at this boundary
//! every failure is folded into a well-formed `ScrapeResult` so the caller
//! never sees an `Err` and distinguishes outcomes by the `error` field.

use scraper::Html;
use tracing::{info, warn};

use crate::domain::models::ScrapeResult;
use crate::error::Result;
use crate::extractor::PageExtractor;
use crate::service::http::{RenderClient, RenderConfig};

/// Scrape one activity-detail page.
///
/// Always returns a result record; failures are reported through its
/// `error` field with the structural fields left at their sentinels.
pub async fn scrape_activity(config: &RenderConfig, dsn: &str) -> ScrapeResult {
    info!("scraping BRRTS activity {dsn}");
    match run_pipeline(config, dsn).await {
        Ok(result) => result,
        Err(err) => {
            warn!("scrape of {dsn} failed: {err}");
            ScrapeResult::failure(dsn, &err)
        }
    }
}

async fn run_pipeline(config: &RenderConfig, dsn: &str) -> Result<ScrapeResult> {
    let client = RenderClient::new(config)?;
    let raw_html = client.render(&config.detail_url(dsn)).await?;
    Ok(assemble(dsn, &raw_html, &config.target_base))
}

/// Run the parse stages over rendered HTML and package the result.
///
/// Pure function of its inputs; parsing happens after the single await
/// point so no non-Send parser state is held across it.
pub fn assemble(dsn: &str, raw_html: &str, target_base: &str) -> ScrapeResult {
    let html = Html::parse_document(raw_html);
    let page_text = PageExtractor::page_text(&html);

    let site_info = PageExtractor::extract_site_info(&html, &page_text, dsn);
    let risk_flags = PageExtractor::classify_risks(&site_info, &page_text);
    let documents = PageExtractor::collect_documents(&html, target_base);

    let summary = format!(
        "Site: {} - Status: {}",
        site_info.location_name.as_deref().unwrap_or("Unknown"),
        site_info.status.as_deref().unwrap_or("Unknown"),
    );
    info!("assembled result for {dsn} with {} documents", documents.len());

    ScrapeResult {
        site_info,
        risk_flags,
        documents,
        summary,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::SiteInfo;

    #[tokio::test]
    async fn missing_token_short_circuits() {
        let config = RenderConfig::default();
        let result = scrape_activity(&config, "271147").await;

        assert_eq!(
            result.error.as_deref(),
            Some("BROWSERLESS_API_KEY not set. Add it to environment variables.")
        );
        assert_eq!(
            result.summary,
            "Browserless API key required for full scraping."
        );
        assert_eq!(result.site_info, SiteInfo::new("271147"));
        assert_eq!(result.risk_flags.status_label, "UNKNOWN");
        assert!(result.documents.is_empty());
    }

    #[test]
    fn assemble_builds_summary_from_extracted_fields() {
        let page = r#"<html><body>
            <input class="form-control" value="LUST">
            <input class="form-control" value="Closed">
        </body></html>"#;
        let result = assemble("42", page, "https://apps.dnr.wi.gov");

        assert_eq!(result.summary, "Site: Unknown - Status: Closed");
        assert_eq!(result.error, None);
        assert_eq!(result.risk_flags.status_label, "CLOSED");
        assert_eq!(result.risk_flags.petroleum, Some(true));
    }

    #[test]
    fn assemble_defaults_summary_on_empty_page() {
        let result = assemble("42", "<html></html>", "https://apps.dnr.wi.gov");

        assert_eq!(result.summary, "Site: Unknown - Status: Unknown");
        assert_eq!(result.error, None);
        assert!(result.documents.is_empty());
    }
}
