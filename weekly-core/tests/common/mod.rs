use rust_xlsxwriter::Workbook;
use std::path::Path;

/// A sheet fixture: name plus rows of cell text
///
/// Empty strings leave the cell unwritten, text that parses as a number is
/// written as a number, `TRUE`/`FALSE` as booleans.
pub type SheetFixture<'a> = (&'a str, &'a [&'a [&'a str]]);

// Helper to create an XLSX file with the given sheets and cells
pub fn create_xlsx(path: &Path, sheets: &[SheetFixture<'_>]) -> anyhow::Result<()> {
    let mut workbook = Workbook::new();

    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name)?;

        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (r, c) = (r as u32, c as u16);
                if cell.is_empty() {
                    continue;
                }
                match *cell {
                    "TRUE" => worksheet.write_boolean(r, c, true)?,
                    "FALSE" => worksheet.write_boolean(r, c, false)?,
                    text => match text.parse::<f64>() {
                        Ok(n) => worksheet.write_number(r, c, n)?,
                        Err(_) => worksheet.write_string(r, c, text)?,
                    },
                };
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}
