pub mod models;

pub use models::{Document, RiskFlags, ScrapeResult, SiteInfo};
