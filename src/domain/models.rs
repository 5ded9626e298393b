//! Domain entities for a single BRRTS activity-detail scrape.
//!
//! All records are built fresh per invocation and serialized sparsely:
//! fields the page did not provide are absent from the JSON output rather
//! than defaulted, except for the sentinels noted below.

use serde::Serialize;

use crate::error::ScrapeError;

/// Structured fields read off the activity-detail page.
///
/// `dsn` is always present (it is the query, not an extracted value). Every
/// other field is populated opportunistically from the header text or the
/// readonly form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SiteInfo {
    pub dsn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dnr_region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub municipality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plss_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acres: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pecfa_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epa_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl SiteInfo {
    pub fn new(dsn: impl Into<String>) -> Self {
        Self {
            dsn: dsn.into(),
            ..Default::default()
        }
    }
}

/// Hazard indicators derived from page content.
///
/// `status_label` is always present; the boolean flags are sparse and only
/// serialized when a keyword actually matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskFlags {
    pub status_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub petroleum: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pfas: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heavy_metals: Option<bool>,
}

impl Default for RiskFlags {
    fn default() -> Self {
        Self {
            status_label: "UNKNOWN".to_string(),
            petroleum: None,
            pfas: None,
            heavy_metals: None,
        }
    }
}

/// One downloadable site document found on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub id: usize,
    pub download_url: String,
    pub category: &'static str,
    pub name: String,
    pub comment: &'static str,
}

/// Final record handed back to the caller.
///
/// Success vs. failure is signaled solely by `error`: `None` means the full
/// pipeline ran; `Some` carries the failure message alongside whatever
/// sentinel fields were populated before the failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeResult {
    pub site_info: SiteInfo,
    pub risk_flags: RiskFlags,
    pub documents: Vec<Document>,
    pub summary: String,
    pub error: Option<String>,
}

impl ScrapeResult {
    /// Failure-shaped result: only the DSN and sentinel labels are populated.
    pub fn failure(dsn: &str, err: &ScrapeError) -> Self {
        let summary = match err {
            ScrapeError::MissingToken => {
                "Browserless API key required for full scraping.".to_string()
            }
            ScrapeError::Timeout => "Page load timed out".to_string(),
            ScrapeError::Status { body, .. } => {
                format!("Failed to render page: {}", truncate(body, 200))
            }
            other => format!("Error: {other}"),
        };

        Self {
            site_info: SiteInfo::new(dsn),
            risk_flags: RiskFlags::default(),
            documents: Vec::new(),
            summary,
            error: Some(err.to_string()),
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
