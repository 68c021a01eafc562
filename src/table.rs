//! Table formatting of extracted text via the remote service

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::ocr::ApiClient;

/// Rows of cells returned by the formatter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedTable {
    rows: Vec<Vec<String>>,
}

impl FormattedTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First row, treated as a header only when more rows follow
    pub fn header(&self) -> Option<&[String]> {
        if self.rows.len() > 1 {
            self.rows.first().map(Vec::as_slice)
        } else {
            None
        }
    }

    /// Rows below the header, or every row when there is no header
    pub fn body(&self) -> &[Vec<String>] {
        if self.header().is_some() {
            &self.rows[1..]
        } else {
            &self.rows
        }
    }
}

/// Anything that turns free text into a table
#[async_trait]
pub trait TableFormatter: Send + Sync {
    async fn format_table(&self, text: &str) -> Result<FormattedTable>;
}

#[derive(Debug, Serialize)]
struct FormatRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct FormatResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    table: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

/// Stringify a cell; the formatter does not always return strings
fn cell_text(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn parse_table(value: Value) -> Result<FormattedTable> {
    let Value::Array(rows) = value else {
        return Err(Error::FormattingFailure("table is not an array".to_string()));
    };
    rows.into_iter()
        .map(|row| match row {
            Value::Array(cells) => Ok(cells.into_iter().map(cell_text).collect()),
            _ => Err(Error::FormattingFailure("table row is not an array".to_string())),
        })
        .collect::<Result<Vec<_>>>()
        .map(FormattedTable::new)
}

#[async_trait]
impl TableFormatter for ApiClient {
    async fn format_table(&self, text: &str) -> Result<FormattedTable> {
        let url = self.url("/api/format-text");
        log::info!("Requesting table formatting for {} characters", text.len());

        let response = self
            .client
            .post(&url)
            .json(&FormatRequest { text })
            .send()
            .await
            .map_err(|e| Error::FormattingFailure(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::FormattingFailure(format!("HTTP error! status: {status}")));
        }

        let body: FormatResponse = response
            .json()
            .await
            .map_err(|e| Error::FormattingFailure(format!("failed to parse response: {e}")))?;

        match (body.success, body.table) {
            (true, Some(table)) => parse_table(table),
            (true, None) => Err(Error::FormattingFailure("response has no table".to_string())),
            (false, _) => Err(Error::FormattingFailure(
                body.error.unwrap_or_else(|| "Failed to format text".to_string()),
            )),
        }
    }
}
