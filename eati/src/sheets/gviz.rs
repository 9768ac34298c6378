// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Parser for the Google Visualization ("gviz") query payload.
//!
//! The `gviz/tq` endpoint does not return bare JSON. It returns a JavaScript
//! function call wrapping the JSON, something like:
//!
//! ```text
//! /*O_o*/
//! google.visualization.Query.setResponse({"version":"0.6", ..., "table":{...}});
//! ```
//!
//! [`parse_response`] strips that envelope and deserializes the table inside
//! it. Only the parts of the payload this app reads are modeled; serde ignores
//! the rest (`version`, `status`, `sig`, column metadata, and so on).

use serde::Deserialize;
use serde_json::Value;

mod constants {
    /// The function call that wraps every gviz response body.
    pub const ENVELOPE_OPEN: &str = "google.visualization.Query.setResponse(";
}

/// Things that can go wrong between a response body and a list of labels.
/// Transport failures are not represented here; they surface from the HTTP
/// client in [`super::fetch`].
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum GvizError {
    #[error("response body is not a gviz payload (no setResponse envelope found)")]
    #[diagnostic(
        code(r3bl_eati::gviz::missing_envelope),
        help("Check that the spreadsheet is published and the URL points at the gviz/tq endpoint")
    )]
    MissingEnvelope,

    #[error("gviz payload does not have the expected table shape")]
    #[diagnostic(code(r3bl_eati::gviz::malformed_table))]
    MalformedTable(#[source] serde_json::Error),
}

#[derive(Clone, Debug, Deserialize)]
pub struct GvizResponse {
    pub table: GvizTable,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GvizTable {
    pub rows: Vec<GvizRow>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GvizRow {
    /// One cell per selected column. An empty spreadsheet cell comes through
    /// as JSON `null`.
    pub c: Vec<Option<GvizCell>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GvizCell {
    /// The raw cell value: a string for text cells, a number for numeric
    /// cells. Some payloads omit the key entirely.
    #[serde(default)]
    pub v: Option<Value>,
}

impl GvizCell {
    /// The label this cell contributes to the candidate list, if any.
    /// Blank-ish values (null, empty string, zero, false) contribute nothing,
    /// so stray empty rows in the spreadsheet don't become wheel segments.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        match &self.v {
            Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
            Some(Value::Number(number)) => {
                if number.as_f64() == Some(0.0) {
                    None
                } else {
                    Some(number.to_string())
                }
            }
            Some(Value::Bool(true)) => Some("true".to_string()),
            _ => None,
        }
    }
}

/// Cut the JSON out of the `setResponse(...)` envelope. Bodies that are
/// already bare JSON (eg from a caching proxy) pass through untouched.
///
/// # Errors
///
/// [`GvizError::MissingEnvelope`] when the body is neither bare JSON nor a
/// recognizable envelope.
pub fn strip_envelope(body: &str) -> Result<&str, GvizError> {
    let trimmed = body.trim_start();
    if trimmed.starts_with('{') {
        return Ok(trimmed);
    }
    let open = body
        .find(constants::ENVELOPE_OPEN)
        .ok_or(GvizError::MissingEnvelope)?;
    let inner = &body[open + constants::ENVELOPE_OPEN.len()..];
    let close = inner.rfind(')').ok_or(GvizError::MissingEnvelope)?;
    Ok(&inner[..close])
}

/// Parse a raw response body into the typed table.
///
/// # Errors
///
/// Any [`GvizError`]: missing envelope, or JSON that doesn't match the table
/// shape (`table.rows[].c[]`).
pub fn parse_response(body: &str) -> Result<GvizResponse, GvizError> {
    let json = strip_envelope(body)?;
    serde_json::from_str(json).map_err(GvizError::MalformedTable)
}

/// Walk the rows and collect the first cell of each into a label list,
/// preserving sheet order. Rows whose first cell is blank are skipped.
#[must_use]
pub fn extract_labels(response: &GvizResponse) -> Vec<String> {
    response
        .table
        .rows
        .iter()
        .filter_map(|row| {
            row.c
                .first()
                .and_then(|cell| cell.as_ref())
                .and_then(GvizCell::label)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::assert_eq2;

    const WRAPPED_BODY: &str = r#"/*O_o*/
google.visualization.Query.setResponse({"version":"0.6","reqId":"0","status":"ok","sig":"405162961","table":{"cols":[{"id":"A","label":"","type":"string"}],"rows":[{"c":[{"v":"Taqueria"}]},{"c":[{"v":"Pho Garden"}]},{"c":[null]},{"c":[{"v":""}]}],"parsedNumHeaders":0}});"#;

    #[test]
    fn strip_envelope_unwraps_the_function_call() {
        let json = strip_envelope(WRAPPED_BODY).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.ends_with('}'));
        assert!(json.contains("\"table\""));
    }

    #[test]
    fn strip_envelope_passes_bare_json_through() {
        let json = strip_envelope("  {\"table\":{\"rows\":[]}}").unwrap();
        assert_eq2!(json, "{\"table\":{\"rows\":[]}}");
    }

    #[test]
    fn strip_envelope_rejects_garbage() {
        let result = strip_envelope("<html>not the endpoint you wanted</html>");
        assert!(matches!(result, Err(GvizError::MissingEnvelope)));
    }

    #[test]
    fn parse_response_reads_the_table() {
        let response = parse_response(WRAPPED_BODY).unwrap();
        assert_eq2!(response.table.rows.len(), 4);
        assert_eq2!(
            response.table.rows[0].c[0].as_ref().unwrap().label(),
            Some("Taqueria".to_string())
        );
    }

    #[test_case(r#"{"notatable":true}"#; "no table key")]
    #[test_case(r#"{"table":{}}"#; "no rows key")]
    #[test_case(r#"{"table":{"rows":[{"notcells":[]}]}}"#; "row without cells")]
    fn parse_response_rejects_malformed_shapes(body: &str) {
        let result = parse_response(body);
        assert!(matches!(result, Err(GvizError::MalformedTable(_))));
    }

    #[test_case(r#"{"v":"Falafel Hut"}"#, Some("Falafel Hut"); "text cell")]
    #[test_case(r#"{"v":""}"#, None; "empty string")]
    #[test_case(r#"{"v":null}"#, None; "explicit null")]
    #[test_case(r#"{}"#, None; "missing value key")]
    #[test_case(r#"{"v":42}"#, Some("42"); "numeric cell")]
    #[test_case(r#"{"v":0}"#, None; "zero")]
    #[test_case(r#"{"v":true}"#, Some("true"); "boolean true")]
    #[test_case(r#"{"v":false}"#, None; "boolean false")]
    fn cell_label_drops_blank_values(cell_json: &str, expected: Option<&str>) {
        let cell: GvizCell = serde_json::from_str(cell_json).unwrap();
        assert_eq2!(cell.label(), expected.map(str::to_string));
    }

    #[test]
    fn extract_labels_keeps_sheet_order_and_skips_blanks() {
        let response = parse_response(WRAPPED_BODY).unwrap();
        let labels = extract_labels(&response);
        assert_eq2!(labels, vec!["Taqueria".to_string(), "Pho Garden".to_string()]);
    }

    #[test]
    fn extract_labels_skips_rows_with_no_cells_at_all() {
        let response =
            parse_response(r#"{"table":{"rows":[{"c":[]},{"c":[{"v":"Ramen"}]}]}}"#).unwrap();
        assert_eq2!(extract_labels(&response), vec!["Ramen".to_string()]);
    }
}
