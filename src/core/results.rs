//! Results screen: the cropped region, its text and an optional table

use crate::capture::crop::EncodedImage;
use crate::session::Extraction;
use crate::table::{FormattedTable, TableFormatter};

/// Shown in place of the text when the service found none
pub const NO_TEXT_MESSAGE: &str = "No text was extracted from the selected area.";

#[derive(Clone, Debug, PartialEq)]
pub struct ResultsView {
    cropped: EncodedImage,
    text: String,
    table: Option<FormattedTable>,
}

impl ResultsView {
    pub fn new(extraction: Extraction) -> Self {
        Self {
            cropped: extraction.image,
            text: extraction.text,
            table: None,
        }
    }

    /// The crop that was sent for extraction
    pub fn cropped(&self) -> &EncodedImage {
        &self.cropped
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }

    /// Text to show, with a placeholder when nothing was found
    pub fn display_text(&self) -> &str {
        if self.has_text() {
            &self.text
        } else {
            NO_TEXT_MESSAGE
        }
    }

    /// Raw text for the clipboard
    pub fn clipboard_text(&self) -> &str {
        &self.text
    }

    /// Formatting is only offered when there is text to format
    pub fn can_format(&self) -> bool {
        self.has_text()
    }

    pub fn table(&self) -> Option<&FormattedTable> {
        self.table.as_ref()
    }

    /// Ask the formatter for a table
    ///
    /// On failure the error is logged and the view keeps showing raw text.
    /// Returns whether a table is now available.
    pub async fn format(&mut self, formatter: &dyn TableFormatter) -> bool {
        if !self.can_format() {
            return false;
        }
        match formatter.format_table(&self.text).await {
            Ok(table) if !table.is_empty() => {
                log::info!("Formatted text into {} rows", table.rows().len());
                self.table = Some(table);
            }
            Ok(_) => log::warn!("Formatter returned an empty table"),
            Err(err) => log::error!("Error formatting text: {err}"),
        }
        self.table.is_some()
    }
}
