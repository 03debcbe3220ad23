//! Transco By Ref sheet handler

use super::SheetHandler;
use crate::reader::RowRecord;
use anyhow::Result;

pub struct TranscoByRefHandler;

impl SheetHandler for TranscoByRefHandler {
    fn sheet_name(&self) -> &str {
        "Transco By Ref"
    }

    fn process(&self, rows: &[RowRecord]) -> Result<usize> {
        log::info!("Processing Transco By Ref: {} rows", rows.len());
        Ok(rows.len())
    }
}
