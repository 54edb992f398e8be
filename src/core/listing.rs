use crate::core::cells::{adjacent_cell, cell_text, is_placeholder, Direction};
use crate::core::document::{selector, Document};
use crate::domain::model::MunicipalityListing;
use crate::utils::error::{Result, ScrapeError};

/// Marker in district listing URLs (`ps32?...`). Anything else accepted by the
/// CLI is the foreign-polling-place listing (`ps36?...`).
const DISTRICT_MARKER: &str = "ps32?";

const CONTENT: &str = "div#content";
const ID_CELL: &str = "td.cislo";
const LINK: &str = "a[href]";

/// Which of the two listing page templates a URL points at. The templates put
/// the municipality name on opposite sides of the code cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKind {
    District,
    Abroad,
}

impl ListingKind {
    pub fn from_url(url: &str) -> Self {
        if url.contains(DISTRICT_MARKER) {
            ListingKind::District
        } else {
            ListingKind::Abroad
        }
    }

    fn name_direction(self) -> Direction {
        match self {
            ListingKind::District => Direction::Next,
            ListingKind::Abroad => Direction::Previous,
        }
    }
}

/// Index-aligned columns of the listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingExtract {
    pub ids: Vec<String>,
    pub names: Vec<String>,
    pub detail_links: Vec<String>,
}

impl ListingExtract {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn municipalities(&self) -> Vec<MunicipalityListing> {
        self.ids
            .iter()
            .zip(&self.names)
            .map(|(id, name)| MunicipalityListing {
                id: id.clone(),
                name: name.clone(),
            })
            .collect()
    }
}

pub fn extract_listing(doc: &Document, kind: ListingKind) -> Result<ListingExtract> {
    let page = doc.label();
    let content = doc.require(CONTENT)?;
    let id_sel = selector(ID_CELL)?;
    let link_sel = selector(LINK)?;

    let mut listing = ListingExtract::default();
    let mut skipped = 0usize;

    for cell in content.select(&id_sel) {
        let link = cell
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"));

        let Some(href) = link else {
            if is_placeholder(cell) {
                skipped += 1;
                continue;
            }
            return Err(ScrapeError::layout(
                &page,
                format!("code cell '{}' has no detail link", cell_text(cell)),
            ));
        };

        let id = cell_text(cell);
        if id.is_empty() {
            return Err(ScrapeError::layout(&page, "empty municipality code cell"));
        }
        if !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(ScrapeError::layout(
                &page,
                format!("code cell '{}' is not numeric", id),
            ));
        }
        let name = cell_text(adjacent_cell(cell, kind.name_direction(), &page)?);

        listing.ids.push(id);
        listing.names.push(name);
        listing.detail_links.push(href.to_string());
    }

    if listing.is_empty() {
        return Err(ScrapeError::layout(
            &page,
            format!("no {} cells with links inside {}", ID_CELL, CONTENT),
        ));
    }

    tracing::debug!(
        "Listing {} ({:?}): {} municipalities, {} filler cells skipped",
        page,
        kind,
        listing.len(),
        skipped
    );
    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    const DISTRICT: &str = r#"<html><body>
<div id="content">
<table class="table">
<tr>
<th id="t1sa1">Číslo</th>
<th id="t1sa2">Název</th>
<th id="t1sa3">Výběr okrsku</th>
</tr>
<tr>
<td class="cislo" headers="t1sa1 t1sb1"><a href="ps311?xjazyk=CZ&amp;xkraj=2&amp;xobec=529303&amp;xvyber=2101">529303</a></td>
<td class="overflow_name" headers="t1sa1 t1sb2">Benešov</td>
<td class="center" headers="t1sa2"><a href="ps34?xjazyk=CZ&amp;xkraj=2&amp;xobec=529303">X</a></td>
</tr>
<tr>
<td class="cislo" headers="t1sa1 t1sb1"><a href="ps311?xjazyk=CZ&amp;xkraj=2&amp;xobec=532568&amp;xvyber=2101">532568</a></td>
<td class="overflow_name" headers="t1sa1 t1sb2">Bernartice</td>
<td class="center" headers="t1sa2">-</td>
</tr>
<tr>
<td class="cislo" headers="t1sa1 t1sb1">-</td>
<td class="overflow_name" headers="t1sa1 t1sb2">-</td>
<td class="center" headers="t1sa2">-</td>
</tr>
</table>
</div>
</body></html>"#;

    const ABROAD: &str = r#"<html><body>
<div id="content">
<table class="table">
<tr>
<td class="overflow_name">Rakousko</td>
<td class="overflow_name">Vídeň</td>
<td class="cislo"><a href="ps311?xjazyk=CZ&amp;xkraj=2&amp;xobec=999997&amp;xsvetadil=EV&amp;xzeme=040&amp;xokrsek=34">34</a></td>
</tr>
<tr>
<td class="overflow_name">Belgie</td>
<td class="overflow_name">Brusel</td>
<td class="cislo"><a href="ps311?xjazyk=CZ&amp;xkraj=2&amp;xobec=999997&amp;xsvetadil=EV&amp;xzeme=056&amp;xokrsek=5">5</a></td>
</tr>
</table>
</div>
</body></html>"#;

    fn doc(url: &str, body: &str) -> Document {
        Document::parse(Url::parse(url).unwrap(), body)
    }

    #[test]
    fn test_listing_kind_from_url() {
        assert_eq!(
            ListingKind::from_url("https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=2&xnumnuts=2101"),
            ListingKind::District
        );
        assert_eq!(
            ListingKind::from_url("https://www.volby.cz/pls/ps2017nss/ps36?xjazyk=CZ"),
            ListingKind::Abroad
        );
    }

    #[test]
    fn test_district_listing_reads_name_after_code() {
        let document = doc("https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ", DISTRICT);
        let listing = extract_listing(&document, ListingKind::District).unwrap();

        assert_eq!(listing.ids, vec!["529303", "532568"]);
        assert_eq!(listing.names, vec!["Benešov", "Bernartice"]);
        assert_eq!(
            listing.detail_links[0],
            "ps311?xjazyk=CZ&xkraj=2&xobec=529303&xvyber=2101"
        );
    }

    #[test]
    fn test_abroad_listing_reads_name_before_code() {
        let document = doc("https://www.volby.cz/pls/ps2017nss/ps36?xjazyk=CZ", ABROAD);
        let listing = extract_listing(&document, ListingKind::Abroad).unwrap();

        assert_eq!(listing.ids, vec!["34", "5"]);
        assert_eq!(listing.names, vec!["Vídeň", "Brusel"]);
    }

    #[test]
    fn test_listing_columns_stay_aligned() {
        let document = doc("https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ", DISTRICT);
        let listing = extract_listing(&document, ListingKind::District).unwrap();

        assert_eq!(listing.ids.len(), listing.names.len());
        assert_eq!(listing.ids.len(), listing.detail_links.len());
        assert!(listing
            .ids
            .iter()
            .all(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_digit())));
        for (id, link) in listing.ids.iter().zip(&listing.detail_links) {
            assert!(link.contains(&format!("xobec={}", id)));
        }
    }

    #[test]
    fn test_wrong_direction_hits_row_edge() {
        let document = doc("https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ", DISTRICT);
        let err = extract_listing(&document, ListingKind::Abroad).unwrap_err();
        assert!(matches!(err, ScrapeError::Layout { .. }));
    }

    #[test]
    fn test_missing_content_container_is_layout_error() {
        let document = doc(
            "https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ",
            "<html><body><div id=\"other\"></div></body></html>",
        );
        let err = extract_listing(&document, ListingKind::District).unwrap_err();
        assert!(matches!(err, ScrapeError::Layout { .. }));
    }

    #[test]
    fn test_container_without_code_cells_is_layout_error() {
        let document = doc(
            "https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ",
            "<html><body><div id=\"content\"><table><tr><td>x</td></tr></table></div></body></html>",
        );
        let err = extract_listing(&document, ListingKind::District).unwrap_err();
        assert!(matches!(err, ScrapeError::Layout { .. }));
    }

    #[test]
    fn test_code_cell_without_link_is_layout_error() {
        let body = "<html><body><div id=\"content\"><table><tr>\n<td class=\"cislo\">529303</td>\n<td>Benešov</td>\n</tr></table></div></body></html>";
        let document = doc("https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ", body);
        let err = extract_listing(&document, ListingKind::District).unwrap_err();
        assert!(err.to_string().contains("529303"));
    }

    #[test]
    fn test_code_cell_with_text_instead_of_code_is_layout_error() {
        let body = "<html><body><div id=\"content\"><table><tr>\n<td class=\"cislo\"><a href=\"ps311?xobec=1\">Obec</a></td>\n<td>Benešov</td>\n</tr></table></div></body></html>";
        let document = doc("https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ", body);
        let err = extract_listing(&document, ListingKind::District).unwrap_err();
        assert!(matches!(err, ScrapeError::Layout { .. }));
        assert!(err.to_string().contains("'Obec' is not numeric"));
    }
}
