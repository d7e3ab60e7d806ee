//! # rsvpbot Listing Sources
//!
//! [`ListingSource`](rsvpbot_protocols::ListingSource) implementations:
//!
//! - [`PublishedSheetSource`] - scrapes a spreadsheet published to the web
//! - [`JsonListingSource`] - reads a local JSON array of events

mod json;
mod sheet;

pub use json::{JsonListingSource, ListingEntry};
pub use sheet::{PublishedSheetSource, SheetSelectors, parse_sheet_html};
