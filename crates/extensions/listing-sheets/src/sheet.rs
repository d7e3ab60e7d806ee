//! Published spreadsheet listing.
//!
//! The sheet's master tab is rendered as an HTML table. Each row with a link
//! in its link column is one event: the link text is the event name and its
//! target the registration URL. The first two data columns hold the date and
//! the venue.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rsvpbot_protocols::{EventRecord, ListingError, ListingSource};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};
use url::Url;

const NO_DATE: &str = "No date found :(";
const NO_VENUE: &str = "TBD";

/// CSS selectors locating events in the rendered sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSelectors {
    /// Container of the master list.
    pub master: String,
    /// Rows within the master list.
    pub rows: String,
    /// Cell holding the event link; must be a direct child of the row.
    pub link_column: String,
    /// Cells holding date then venue; direct children of the row.
    pub data_column: String,
}

impl Default for SheetSelectors {
    fn default() -> Self {
        Self {
            master: "#sheets-viewport > div:first-child".to_string(),
            rows: ".ritz.grid-container table tr".to_string(),
            link_column: "td.s11".to_string(),
            data_column: "td.s5".to_string(),
        }
    }
}

struct Compiled {
    master: Selector,
    rows: Selector,
    link_column: Selector,
    data_column: Selector,
    anchor: Selector,
}

impl SheetSelectors {
    fn compile(&self) -> Result<Compiled, ListingError> {
        Ok(Compiled {
            master: parse_selector(&self.master)?,
            rows: parse_selector(&self.rows)?,
            link_column: parse_selector(&self.link_column)?,
            data_column: parse_selector(&self.data_column)?,
            anchor: parse_selector("a")?,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ListingError> {
    Selector::parse(selector)
        .map_err(|e| ListingError::Parse(format!("invalid selector '{}': {}", selector, e)))
}

/// Listing scraped from a spreadsheet published as HTML.
pub struct PublishedSheetSource {
    url: String,
    selectors: SheetSelectors,
    client: Client,
}

impl PublishedSheetSource {
    pub fn new(url: impl Into<String>) -> Result<Self, ListingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .user_agent(concat!("rsvpbot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ListingError::Fetch(format!("HTTP client: {}", e)))?;

        Ok(Self {
            url: url.into(),
            selectors: SheetSelectors::default(),
            client,
        })
    }

    pub fn with_selectors(mut self, selectors: SheetSelectors) -> Self {
        self.selectors = selectors;
        self
    }
}

#[async_trait]
impl ListingSource for PublishedSheetSource {
    fn describe(&self) -> String {
        format!("published sheet {}", self.url)
    }

    async fn fetch(&self) -> Result<Vec<EventRecord>, ListingError> {
        debug!("Fetching sheet from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ListingError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ListingError::Fetch(format!(
                "{} returned HTTP {}",
                self.url, status
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| ListingError::Fetch(e.to_string()))?;

        let base = Url::parse(&self.url).ok();
        let events = parse_sheet_html(&html, &self.selectors, base.as_ref())?;
        info!("Found {} events in {}", events.len(), self.url);
        Ok(events)
    }
}

/// Extract events from a rendered sheet. Relative links are resolved
/// against `base` when given.
pub fn parse_sheet_html(
    html: &str,
    selectors: &SheetSelectors,
    base: Option<&Url>,
) -> Result<Vec<EventRecord>, ListingError> {
    let compiled = selectors.compile()?;
    let document = Html::parse_document(html);
    let mut events = Vec::new();

    for master in document.select(&compiled.master) {
        for row in master.select(&compiled.rows) {
            if let Some(event) = parse_row(row, &compiled, base) {
                events.push(event);
            }
        }
    }

    Ok(events)
}

fn parse_row(row: ElementRef<'_>, compiled: &Compiled, base: Option<&Url>) -> Option<EventRecord> {
    let link = children(row, &compiled.link_column)
        .flat_map(|cell| children(cell, &compiled.anchor))
        .next()?;

    let href = link.value().attr("href")?.trim();
    if href.is_empty() {
        return None;
    }
    let url = match base {
        Some(base) => base
            .join(href)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| href.to_string()),
        None => href.to_string(),
    };
    let name = text_of(link);

    let mut data = children(row, &compiled.data_column).map(text_of);
    let date = non_empty(data.next()).unwrap_or_else(|| NO_DATE.to_string());
    let venue = non_empty(data.next()).unwrap_or_else(|| NO_VENUE.to_string());

    Some(EventRecord::new(name, url, date, venue))
}

fn children<'a>(
    parent: ElementRef<'a>,
    selector: &'a Selector,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |el| selector.matches(el))
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "sheet_tests.rs"]
mod tests;
