use crate::diagnostics::Diagnostics;
use crate::error::{Result, SynthError, SynthWarning};
use crate::types::ReportRow;
use serde::{Deserialize, Serialize};

/// A result table as handed over by the page-scraping collaborator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTable {
    #[serde(default)]
    pub rows: Vec<TableRow>,
}

impl ReportTable {
    /// Parse the JSON form of a result table
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|err| SynthError::report(format!("invalid report table: {err}")))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(default)]
    pub cells: Vec<TableCell>,
}

/// One table cell: its text plus, for the payload cell, the embedded
/// preformatted blocks and the text node after the last of them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub pre_blocks: Vec<String>,
    #[serde(default)]
    pub trailing_text: Option<String>,
}

impl TableCell {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

const STATUS_CELL: usize = 1;
const PAYLOAD_CELL: usize = 2;

/// Selects failing rows and extracts their expected/actual payloads
#[derive(Debug, Clone)]
pub struct ResultTableParser {
    fail_status: String,
}

impl Default for ResultTableParser {
    fn default() -> Self {
        Self::new("fail")
    }
}

impl ResultTableParser {
    #[must_use]
    pub fn new(fail_status: impl Into<String>) -> Self {
        Self {
            fail_status: fail_status.into(),
        }
    }

    /// Failing rows with a recoverable actual value, in table order
    pub fn parse(&self, table: &ReportTable, diagnostics: &mut Diagnostics) -> Vec<ReportRow> {
        table
            .rows
            .iter()
            .enumerate()
            .filter_map(|(index, row)| self.parse_row(index, row, diagnostics))
            .collect()
    }

    fn parse_row(
        &self,
        index: usize,
        row: &TableRow,
        diagnostics: &mut Diagnostics,
    ) -> Option<ReportRow> {
        if row.cells.len() <= PAYLOAD_CELL {
            return None;
        }

        let status = row.cells[STATUS_CELL].text.trim();
        if !status.eq_ignore_ascii_case(self.fail_status.trim()) {
            return None;
        }

        let payload = &row.cells[PAYLOAD_CELL];
        let expected_payload = payload
            .pre_blocks
            .first()
            .map_or_else(|| "null".to_string(), |block| strip_quotes(block.trim()));

        let actual_payload = actual_text(payload);
        if actual_payload.is_empty() {
            diagnostics.record(SynthWarning::MissingActualValue { row: index });
            return None;
        }

        log::debug!("Row {index}: expected `{expected_payload}`, actual `{actual_payload}`");
        Some(ReportRow {
            index,
            status: status.to_string(),
            expected_payload,
            actual_payload,
        })
    }
}

/// Text after the last block, else the last block itself
fn actual_text(cell: &TableCell) -> String {
    if cell.pre_blocks.is_empty() {
        return String::new();
    }

    match &cell.trailing_text {
        Some(trailing) => strip_quotes(&trailing.trim().replace(": ", ""))
            .trim()
            .to_string(),
        None => cell
            .pre_blocks
            .last()
            .map(|block| strip_quotes(block.trim()))
            .unwrap_or_default(),
    }
}

fn strip_quotes(text: &str) -> String {
    text.replace('"', "")
}
