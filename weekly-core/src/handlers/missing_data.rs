//! Missing Data sheet handler

use super::SheetHandler;
use crate::reader::RowRecord;
use anyhow::Result;

pub struct MissingDataHandler;

impl SheetHandler for MissingDataHandler {
    fn sheet_name(&self) -> &str {
        "Missing Data"
    }

    fn process(&self, rows: &[RowRecord]) -> Result<usize> {
        log::info!("Processing Missing Data: {} rows", rows.len());
        Ok(rows.len())
    }
}
