//! # rsvpbot CSV Reports
//!
//! Writes batch results as a fully quoted CSV file and reads them back.
//!
//! Columns: `name, date, venue, url, status, message`. Every field is
//! wrapped in double quotes with embedded quotes doubled; rows end in `\n`.

mod codec;
mod writer;

pub use codec::{HEADER, encode_report, parse_report};
pub use writer::{CsvReportWriter, read_report};
