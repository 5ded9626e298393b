pub mod domain;
pub mod error;
pub mod extractor;
pub mod service;
