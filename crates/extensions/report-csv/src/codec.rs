//! CSV encoding and parsing of result rows.

use rsvpbot_protocols::{RegistrationStatus, ReportError, ResultRecord};

pub const HEADER: [&str; 6] = ["name", "date", "venue", "url", "status", "message"];

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn encode_row<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    let mut line = fields.into_iter().map(quote).collect::<Vec<_>>().join(",");
    line.push('\n');
    line
}

/// Render a header line plus one line per record.
pub fn encode_report(results: &[ResultRecord]) -> String {
    let mut out = encode_row(HEADER);
    for record in results {
        out.push_str(&encode_row([
            record.name.as_str(),
            record.date.as_str(),
            record.venue.as_str(),
            record.url.as_str(),
            record.status.as_str(),
            record.message.as_deref().unwrap_or(""),
        ]));
    }
    out
}

/// Parse a report produced by [`encode_report`]. The header line is
/// required; an empty message field reads back as no message.
pub fn parse_report(content: &str) -> Result<Vec<ResultRecord>, ReportError> {
    let mut rows = split_rows(content)?.into_iter();

    match rows.next() {
        Some(header) if header == HEADER => {}
        Some(header) => {
            return Err(ReportError::Format(format!(
                "unexpected header: {}",
                header.join(",")
            )));
        }
        None => return Err(ReportError::Format("missing header".to_string())),
    }

    rows.enumerate()
        .map(|(index, row)| record_from_row(index + 2, row))
        .collect()
}

fn record_from_row(line: usize, row: Vec<String>) -> Result<ResultRecord, ReportError> {
    let [name, date, venue, url, status, message]: [String; 6] =
        row.try_into().map_err(|row: Vec<String>| {
            ReportError::Format(format!("line {}: expected 6 fields, got {}", line, row.len()))
        })?;

    let status = RegistrationStatus::parse(&status).ok_or_else(|| {
        ReportError::Format(format!("line {}: unknown status '{}'", line, status))
    })?;

    Ok(ResultRecord {
        name,
        date,
        venue,
        url,
        status,
        message: if message.is_empty() { None } else { Some(message) },
    })
}

/// Split CSV text into rows of fields. Quoted fields may contain commas,
/// doubled quotes and line breaks.
fn split_rows(content: &str) -> Result<Vec<Vec<String>>, ReportError> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(ReportError::Format("unterminated quoted field".to_string()));
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
