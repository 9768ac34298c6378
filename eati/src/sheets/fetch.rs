// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! One-shot HTTP fetch of the candidate list from a published Google Sheets
//! document, via the gviz query endpoint (no API key required).

use miette::IntoDiagnostic;

use super::gviz::{extract_labels, parse_response};
use crate::ok;

mod constants {
    pub const USER_AGENT: &str = "eati/1.0";
}

mod urls {
    pub const SPREADSHEET_GVIZ_QUERY: &str =
        "https://docs.google.com/spreadsheets/d/{spreadsheet_id}/gviz/tq";
}

pub mod defaults {
    /// The demo spreadsheet this app ships pointed at. Use the CLI flags to
    /// point it at your own list.
    pub const SPREADSHEET_ID: &str = "1Yum89FFIcJgZ7kH6ZTbfq_5fhxktSu4Cg-juFLkoqts";
    pub const SHEET_NAME: &str = "Sheet1";
    pub const COLUMN: char = 'A';
}

/// Where the candidate list lives: one column of one sheet of a published
/// Google Sheets document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetSource {
    pub spreadsheet_id: String,
    pub sheet_name: String,
    pub column: char,
}

impl Default for SheetSource {
    fn default() -> Self {
        Self {
            spreadsheet_id: defaults::SPREADSHEET_ID.to_string(),
            sheet_name: defaults::SHEET_NAME.to_string(),
            column: defaults::COLUMN,
        }
    }
}

/// # Errors
///
/// When the TLS backend fails to initialize.
pub fn create_client() -> miette::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(constants::USER_AGENT)
        .build()
        .into_diagnostic()
}

/// Assemble the gviz query URL for one column of one sheet, eg:
/// `https://docs.google.com/spreadsheets/d/{id}/gviz/tq?sheet=Sheet1&tq=SELECT+A&tqx=out:json`.
///
/// # Errors
///
/// When the assembled URL fails to parse (practically, a spreadsheet id with
/// characters that break the path).
pub fn build_query_url(source: &SheetSource) -> miette::Result<reqwest::Url> {
    let base = urls::SPREADSHEET_GVIZ_QUERY.replace("{spreadsheet_id}", &source.spreadsheet_id);
    let query = format!("SELECT {}", source.column);
    reqwest::Url::parse_with_params(
        &base,
        &[
            ("sheet", source.sheet_name.as_str()),
            ("tq", query.as_str()),
            ("tqx", "out:json"),
        ],
    )
    .into_diagnostic()
}

/// Fetch the sheet and reduce it to the list of candidate labels, in sheet
/// order, with blank cells dropped.
///
/// # Errors
///
/// Errors from the HTTP client (connect, TLS, non-2xx status) or from the
/// gviz payload parser.
pub async fn try_fetch_labels(source: &SheetSource) -> miette::Result<Vec<String>> {
    let url = build_query_url(source)?;

    // % is Display, ? is Debug.
    tracing::debug!(
        message = "Fetching candidate sheet",
        url = %url
    );

    let client = create_client()?;
    let response = client.get(url).send().await.into_diagnostic()?;
    let response = response.error_for_status().into_diagnostic()?; // Return an error if the status != 2xx.
    let body = response.text().await.into_diagnostic()?;

    let parsed = parse_response(&body)?;
    let labels = extract_labels(&parsed);

    // % is Display, ? is Debug.
    tracing::info!(
        message = "Fetched candidate sheet",
        row_count = %parsed.table.rows.len(),
        label_count = %labels.len()
    );

    ok!(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn query_url_hits_the_gviz_endpoint_for_the_spreadsheet() {
        let url = build_query_url(&SheetSource::default()).unwrap();
        assert_eq2!(url.scheme(), "https");
        assert_eq2!(url.host_str(), Some("docs.google.com"));
        assert!(url.path().contains(defaults::SPREADSHEET_ID));
        assert!(url.path().ends_with("/gviz/tq"));
    }

    #[test]
    fn query_url_encodes_sheet_name_and_column_query() {
        let source = SheetSource {
            sheet_name: "Lunch Spots".to_string(),
            column: 'B',
            ..Default::default()
        };
        let url = build_query_url(&source).unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        assert!(pairs.contains(&("sheet".to_string(), "Lunch Spots".to_string())));
        assert!(pairs.contains(&("tq".to_string(), "SELECT B".to_string())));
        assert!(pairs.contains(&("tqx".to_string(), "out:json".to_string())));
    }

    #[test]
    fn default_source_matches_the_shipped_demo_sheet() {
        let source = SheetSource::default();
        assert_eq2!(source.sheet_name, "Sheet1");
        assert_eq2!(source.column, 'A');
    }
}
