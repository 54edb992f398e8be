pub mod assemble;
pub mod cells;
pub mod detail;
pub mod document;
pub mod etl;
pub mod export;
pub mod listing;
pub mod pipeline;

pub use crate::domain::model::{
    MunicipalityListing, MunicipalitySummary, Page, PartyResults, Record, ScrapedData, Table,
};
pub use crate::domain::ports::{ConfigProvider, HeaderPolicy, PageSource, Pipeline, Storage};
pub use crate::utils::error::Result;
