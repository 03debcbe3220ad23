//! COREXT sheet handler

use super::SheetHandler;
use crate::reader::RowRecord;
use anyhow::Result;

pub struct CorextHandler;

impl SheetHandler for CorextHandler {
    fn sheet_name(&self) -> &str {
        "COREXT"
    }

    fn process(&self, rows: &[RowRecord]) -> Result<usize> {
        log::info!("Processing COREXT: {} rows", rows.len());
        Ok(rows.len())
    }
}
