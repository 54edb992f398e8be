use crate::domain::model::Page;
use crate::domain::ports::PageSource;
use crate::utils::error::{Result, ScrapeError};
use reqwest::Client;
use url::Url;

pub const DEFAULT_USER_AGENT: &str = concat!("volby-scrape/", env!("CARGO_PKG_VERSION"));

/// Plain GET fetcher. No retries; any non-2xx status is an error.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }
}

impl PageSource for HttpFetcher {
    async fn fetch_page(&self, url: &Url) -> Result<Page> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::error!("❌ Status: {} url: {}", status.as_u16(), url);
            return Err(ScrapeError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let final_url = response.url().clone();
        let body = response.text().await?;
        tracing::debug!("Fetched {} ({} bytes)", final_url, body.len());

        Ok(Page {
            url: final_url,
            body,
        })
    }
}
