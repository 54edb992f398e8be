use crate::domain::model::{Page, ScrapedData, Table};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

/// Anything that can hand back the body of a page for a URL.
pub trait PageSource: Send + Sync {
    fn fetch_page(&self, url: &Url) -> impl std::future::Future<Output = Result<Page>> + Send;
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// How the export header is derived from the records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderPolicy {
    /// Keys of the first record only; later extra keys are dropped.
    #[default]
    First,
    /// First record's keys, then every key first seen in later records.
    Union,
}

pub trait ConfigProvider: Send + Sync {
    fn listing_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn concurrent_requests(&self) -> usize;
    fn header_policy(&self) -> HeaderPolicy;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ScrapedData>;
    async fn transform(&self, data: ScrapedData) -> Result<Table>;
    async fn load(&self, table: Table) -> Result<String>;
}
