//! Field, risk-flag, and document extraction from a rendered BRRTS page.
//!
//! The DNR detail page presents its data as readonly `input.form-control`
//! elements in a fixed document order, so field extraction is positional.
//! That coupling to the page layout is inherently brittle: if the page ever
//! inserts or reorders inputs, the mapping shifts silently.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use crate::domain::models::{Document, RiskFlags, SiteInfo};

const LOCATION_NAME_POSITION: usize = 5;

pub struct PageExtractor;

impl PageExtractor {
    /// Concatenated visible text of the whole document.
    pub fn page_text(html: &Html) -> String {
        html.root_element().text().collect()
    }

    /// Build the SiteInfo mapping from header text and positional inputs.
    ///
    /// The page header carries "NN-NN-NNNN SITE NAME" ahead of the
    /// "Activity Type" label; a header-derived location name takes
    /// precedence over the positional form field.
    pub fn extract_site_info(html: &Html, page_text: &str, dsn: &str) -> SiteInfo {
        let mut info = SiteInfo::new(dsn);

        static HEADER_RE: OnceLock<Regex> = OnceLock::new();
        let header_re = HEADER_RE.get_or_init(|| {
            Regex::new(r"(\d{2}-\d{2}-\d+)\s+([A-Z][A-Z0-9\s'\-\.]+?)(?:\s*Activity Type|\s*$)")
                .unwrap()
        });
        if let Some(caps) = header_re.captures(page_text) {
            info.activity_number = Some(caps[1].to_string());
            info.location_name = Some(caps[2].trim().to_string());
        }

        static INPUT_SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector =
            INPUT_SELECTOR.get_or_init(|| Selector::parse("input.form-control").unwrap());

        for (idx, element) in html.select(selector).enumerate() {
            let value = element.value().attr("value").unwrap_or("").trim();
            if value.is_empty() {
                continue;
            }
            let Some(slot) = positional_slot(&mut info, idx) else {
                // Inputs past the known table are ignored.
                continue;
            };
            if idx == LOCATION_NAME_POSITION && slot.is_some() {
                // Header-derived location name wins.
                continue;
            }
            *slot = Some(value.to_string());
        }

        info
    }

    /// Derive hazard flags from extracted fields and full page text.
    ///
    /// Flags that evaluate false stay `None` so they are absent from the
    /// serialized output.
    pub fn classify_risks(info: &SiteInfo, page_text: &str) -> RiskFlags {
        let lower = page_text.to_lowercase();
        let mut flags = RiskFlags::default();

        if let Some(status) = info.status.as_deref().filter(|s| !s.is_empty()) {
            flags.status_label = status.to_uppercase();
        }

        let is_lust = info
            .activity_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("LUST"));
        if is_lust || lower.contains("petroleum") {
            flags.petroleum = Some(true);
        }
        if lower.contains("pfas") {
            flags.pfas = Some(true);
        }
        if ["arsenic", "lead", "mercury", "chromium"]
            .iter()
            .any(|metal| lower.contains(metal))
        {
            flags.heavy_metals = Some(true);
        }

        flags
    }

    /// Collect document-download links in document order.
    ///
    /// Relative hrefs are resolved against the fixed site host. The display
    /// name embeds the `docSeqNo` query value when present, otherwise the
    /// 0-based running count stands in as the sequence identifier.
    pub fn collect_documents(html: &Html, base: &str) -> Vec<Document> {
        static ANCHOR_SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = ANCHOR_SELECTOR.get_or_init(|| Selector::parse("a[href]").unwrap());

        static SEQ_RE: OnceLock<Regex> = OnceLock::new();
        let seq_re = SEQ_RE.get_or_init(|| Regex::new(r"docSeqNo=(\d+)").unwrap());

        let base_url = Url::parse(base).ok();
        let mut documents = Vec::new();

        for element in html.select(selector) {
            let href = element.value().attr("href").unwrap_or("").trim();
            if href.is_empty()
                || !(href.contains("download-document") || href.contains("docSeqNo"))
            {
                continue;
            }

            let download_url = if href.starts_with("http") {
                href.to_string()
            } else {
                base_url
                    .as_ref()
                    .and_then(|b| b.join(href).ok())
                    .map(|u| u.to_string())
                    .unwrap_or_else(|| format!("{base}{href}"))
            };

            let seq_no = seq_re
                .captures(&download_url)
                .map(|caps| caps[1].to_string())
                .unwrap_or_else(|| documents.len().to_string());

            documents.push(Document {
                id: documents.len(),
                download_url,
                category: "Site File",
                name: format!("Site File Documentation (ID: {seq_no})"),
                comment: "DNR site documentation",
            });
        }

        documents
    }
}

/// Mutable slot for the form field at a document-order position, or None
/// once past the known 17-field table.
fn positional_slot(info: &mut SiteInfo, idx: usize) -> Option<&mut Option<String>> {
    let slot = match idx {
        0 => &mut info.activity_type,
        1 => &mut info.status,
        2 => &mut info.jurisdiction,
        3 => &mut info.dnr_region,
        4 => &mut info.county,
        5 => &mut info.location_name,
        6 => &mut info.address,
        7 => &mut info.municipality,
        8 => &mut info.plss_description,
        9 => &mut info.latitude,
        10 => &mut info.longitude,
        11 => &mut info.acres,
        12 => &mut info.facility_id,
        13 => &mut info.pecfa_number,
        14 => &mut info.epa_id,
        15 => &mut info.start_date,
        16 => &mut info.end_date,
        _ => return None,
    };
    Some(slot)
}
