//! Transco By Source sheet handler

use super::SheetHandler;
use crate::reader::RowRecord;
use anyhow::Result;

pub struct TranscoBySourceHandler;

impl SheetHandler for TranscoBySourceHandler {
    fn sheet_name(&self) -> &str {
        "Transco By Source"
    }

    fn process(&self, rows: &[RowRecord]) -> Result<usize> {
        log::info!("Processing Transco By Source: {} rows", rows.len());
        Ok(rows.len())
    }
}
