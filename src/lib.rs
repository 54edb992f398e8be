pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::HttpFetcher;
pub use config::{cli::LocalStorage, CliConfig, ScrapeSettings};
pub use core::{etl::EtlEngine, pipeline::ElectionPipeline};
pub use utils::error::{Result, ScrapeError};
