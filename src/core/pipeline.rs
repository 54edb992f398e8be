use crate::core::assemble::assemble;
use crate::core::detail::{extract_party_results, extract_summary};
use crate::core::export::{build_table, to_csv};
use crate::core::listing::{extract_listing, ListingExtract, ListingKind};
use crate::core::{
    ConfigProvider, MunicipalitySummary, Page, PageSource, PartyResults, Pipeline, ScrapedData,
    Storage, Table,
};
use crate::utils::error::{Result, ScrapeError};
use std::sync::Arc;
use tokio::task::JoinSet;
use url::Url;

/// Listing page → detail pages → CSV.
pub struct ElectionPipeline<F: PageSource, S: Storage, C: ConfigProvider> {
    pub(crate) source: Arc<F>,
    pub(crate) storage: S,
    pub(crate) config: C,
}

#[derive(Debug, Clone)]
struct MunicipalityDetail {
    summary: MunicipalitySummary,
    parties: PartyResults,
}

impl<F: PageSource, S: Storage, C: ConfigProvider> ElectionPipeline<F, S, C> {
    pub fn new(source: F, storage: S, config: C) -> Self {
        Self {
            source: Arc::new(source),
            storage,
            config,
        }
    }
}

// Parsed documents never live across an await; these stay synchronous.
fn parse_listing(page: &Page, kind: ListingKind) -> Result<(ListingExtract, Vec<Url>)> {
    let doc = page.document();
    let listing = extract_listing(&doc, kind)?;
    let links = listing
        .detail_links
        .iter()
        .map(|href| doc.join(href))
        .collect::<Result<Vec<_>>>()?;
    Ok((listing, links))
}

fn parse_detail(page: &Page) -> Result<MunicipalityDetail> {
    let doc = page.document();
    Ok(MunicipalityDetail {
        summary: extract_summary(&doc)?,
        parties: extract_party_results(&doc)?,
    })
}

async fn fetch_detail<F: PageSource>(
    source: Arc<F>,
    index: usize,
    url: Url,
) -> Result<(usize, MunicipalityDetail)> {
    let page = source.fetch_page(&url).await?;
    let detail = parse_detail(&page)?;
    Ok((index, detail))
}

impl<F, S, C> ElectionPipeline<F, S, C>
where
    F: PageSource + 'static,
    S: Storage,
    C: ConfigProvider,
{
    async fn fetch_details(&self, links: &[Url]) -> Result<Vec<MunicipalityDetail>> {
        let total = links.len();
        let limit = self.config.concurrent_requests().clamp(1, total.max(1));

        if limit == 1 {
            let mut details = Vec::with_capacity(total);
            for (index, url) in links.iter().enumerate() {
                let (_, detail) = fetch_detail(Arc::clone(&self.source), index, url.clone()).await?;
                tracing::debug!("[{}/{}] {}", index + 1, total, url);
                details.push(detail);
            }
            return Ok(details);
        }

        tracing::debug!("Fetching {} detail pages, {} at a time", total, limit);
        let mut slots: Vec<Option<MunicipalityDetail>> = (0..total).map(|_| None).collect();
        let mut pending = links.iter().cloned().enumerate();
        let mut join_set = JoinSet::new();

        for (index, url) in pending.by_ref().take(limit) {
            join_set.spawn(fetch_detail(Arc::clone(&self.source), index, url));
        }

        let mut done = 0usize;
        while let Some(joined) = join_set.join_next().await {
            let outcome = joined.map_err(|e| ScrapeError::Processing {
                message: format!("detail fetch task failed: {}", e),
            });
            let (index, detail) = match outcome.and_then(|result| result) {
                Ok(value) => value,
                Err(err) => {
                    tracing::debug!("Aborting {} in-flight detail fetches", join_set.len());
                    join_set.abort_all();
                    return Err(err);
                }
            };

            slots[index] = Some(detail);
            done += 1;
            tracing::debug!("[{}/{}] {}", done, total, links[index]);

            if let Some((index, url)) = pending.next() {
                join_set.spawn(fetch_detail(Arc::clone(&self.source), index, url));
            }
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| ScrapeError::Processing {
                    message: format!("no result for detail page {}", links[index]),
                })
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl<F, S, C> Pipeline for ElectionPipeline<F, S, C>
where
    F: PageSource + 'static,
    S: Storage,
    C: ConfigProvider,
{
    async fn extract(&self) -> Result<ScrapedData> {
        let listing_url = Url::parse(self.config.listing_url())?;
        let kind = ListingKind::from_url(self.config.listing_url());

        tracing::info!("Fetching listing page {} ({:?})", listing_url, kind);
        let page = self.source.fetch_page(&listing_url).await?;
        let (listing, links) = parse_listing(&page, kind)?;
        tracing::info!("Found {} municipalities", listing.len());

        let details = self.fetch_details(&links).await?;

        let mut summaries = Vec::with_capacity(details.len());
        let mut party_results = Vec::with_capacity(details.len());
        for detail in details {
            summaries.push(detail.summary);
            party_results.push(detail.parties);
        }

        Ok(ScrapedData {
            listings: listing.municipalities(),
            summaries,
            party_results,
        })
    }

    async fn transform(&self, data: ScrapedData) -> Result<Table> {
        let records = assemble(&data.listings, &data.summaries, &data.party_results)?;
        build_table(records, self.config.header_policy())
    }

    async fn load(&self, table: Table) -> Result<String> {
        let output_path = self.config.output_path().to_string();
        let csv_data = to_csv(&table)?;

        tracing::debug!(
            "Writing {} rows x {} columns ({} bytes) to {}",
            table.records.len(),
            table.columns.len(),
            csv_data.len(),
            output_path
        );
        self.storage.write_file(&output_path, &csv_data).await?;
        Ok(output_path)
    }
}
