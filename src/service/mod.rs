pub mod http;
pub mod scrape;

pub use http::{RenderClient, RenderConfig};
pub use scrape::scrape_activity;
