mod common;

use common::create_xlsx;
use weekly_core::reader::load_workbook;
use weekly_core::{CellValue, IngestError, WeeklyConfig};

const COREXT_HEADER: &[&str] = &[
    "Id", "Code", "Label", "Source", "Target", "Rate", "Active", "Owner", "Extra",
];

#[test]
fn test_load_expected_sheets() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("weekly.xlsx");

    create_xlsx(
        &path,
        &[
            ("Notes", &[&["free text"]]),
            (
                "Missing Data",
                &[
                    &["Ref", "Field", "Value", "Comment", "Ignored"],
                    &["R1", "price", "12.5", "", "x"],
                    &["R2", "qty", "0", "check", ""],
                ],
            ),
            (
                "COREXT",
                &[
                    COREXT_HEADER,
                    &["1", "C1", "One", "S", "T", "1.5", "TRUE", "ops", "dropped"],
                    &["", "", "", "", "", "", "", "", ""],
                    &["2", "C2", "Two", "S", "T", "2", "FALSE", "ops"],
                ],
            ),
        ],
    )?;

    let config = WeeklyConfig::default();
    let outcome = load_workbook(&path, &config.sheets)?;

    assert_eq!(outcome.file_name, "weekly.xlsx");
    // Reported in configured order, stored in file order
    assert_eq!(outcome.processed, vec!["COREXT", "Missing Data"]);
    assert_eq!(outcome.missing, vec!["Transco By Source", "Transco By Ref"]);
    assert!(outcome.skipped.is_empty());
    assert_eq!(outcome.data.sheet_names(), vec!["Missing Data", "COREXT"]);
    assert!(outcome.data.get("Notes").is_none());

    let corext = outcome.data.get("COREXT").unwrap();
    assert_eq!(corext.len(), 2);
    assert_eq!(corext[0].len(), 8);
    assert!(corext[0].get("Extra").is_none());
    assert_eq!(corext[0].get("Rate"), Some(&CellValue::Number(1.5)));
    assert_eq!(corext[0].get("Active"), Some(&CellValue::Boolean(true)));
    assert_eq!(corext[1].get("Code"), Some(&CellValue::Text("C2".to_string())));

    let missing = outcome.data.get("Missing Data").unwrap();
    assert_eq!(missing.len(), 2);
    assert_eq!(
        missing[0].labels().collect::<Vec<_>>(),
        vec!["Ref", "Field", "Value", "Comment"]
    );
    assert_eq!(missing[0].get("Comment"), Some(&CellValue::Empty));
    assert_eq!(missing[1].get("Value"), Some(&CellValue::Number(0.0)));

    Ok(())
}

#[test]
fn test_no_expected_sheet() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("other.xlsx");
    create_xlsx(&path, &[("Sheet1", &[&["a", "b"], &["1", "2"]])])?;

    let config = WeeklyConfig::default();
    match load_workbook(&path, &config.sheets) {
        Err(IngestError::NoExpectedSheets { file_name, missing }) => {
            assert_eq!(file_name, "other.xlsx");
            assert_eq!(missing.len(), 4);
        }
        other => panic!("unexpected result: {:?}", other),
    }

    Ok(())
}

#[test]
fn test_empty_and_headerless_sheets_skipped() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("partial.xlsx");

    create_xlsx(
        &path,
        &[
            ("COREXT", &[]),
            // Header text only past the 6 kept columns
            (
                "Transco By Ref",
                &[&["", "", "", "", "", "", "Late"], &["1", "2"]],
            ),
            ("Transco By Source", &[&["Src", "Dst"], &["a", "b"]]),
        ],
    )?;

    let config = WeeklyConfig::default();
    let outcome = load_workbook(&path, &config.sheets)?;

    assert_eq!(outcome.processed, vec!["Transco By Source"]);
    assert_eq!(outcome.skipped, vec!["COREXT", "Transco By Ref"]);
    assert_eq!(outcome.missing, vec!["Missing Data"]);
    assert_eq!(outcome.data.len(), 1);

    Ok(())
}

#[test]
fn test_header_only_sheet_is_kept_with_no_rows() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("header.xlsx");
    create_xlsx(&path, &[("Missing Data", &[&["Ref", "Field"]])])?;

    let config = WeeklyConfig::default();
    let outcome = load_workbook(&path, &config.sheets)?;

    assert_eq!(outcome.processed, vec!["Missing Data"]);
    assert_eq!(outcome.data.get("Missing Data").map(|r| r.len()), Some(0));

    Ok(())
}

#[test]
fn test_duplicate_headers_collapse() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("dup.xlsx");
    create_xlsx(
        &path,
        &[(
            "Missing Data",
            &[&["Ref", "Value", "Ref"], &["first", "v", "last"]],
        )],
    )?;

    let config = WeeklyConfig::default();
    let outcome = load_workbook(&path, &config.sheets)?;
    let rows = outcome.data.get("Missing Data").unwrap();

    assert_eq!(rows[0].len(), 2);
    assert_eq!(rows[0].get("Ref"), Some(&CellValue::Text("last".to_string())));

    Ok(())
}

#[test]
fn test_whitespace_cells_are_data() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("spaces.xlsx");
    create_xlsx(
        &path,
        &[
            ("COREXT", &[&["   "], &["x"]]),
            ("Missing Data", &[&["Ref"], &["R1"], &["  "], &["R3"]]),
        ],
    )?;

    let config = WeeklyConfig::default();
    let outcome = load_workbook(&path, &config.sheets)?;

    assert_eq!(outcome.processed, vec!["COREXT", "Missing Data"]);
    assert!(outcome.skipped.is_empty());
    assert_eq!(outcome.data.get("COREXT").map(|r| r.len()), Some(1));

    let missing = outcome.data.get("Missing Data").unwrap();
    assert_eq!(missing.len(), 3);
    assert_eq!(missing[1].get("Ref"), Some(&CellValue::Text("  ".to_string())));

    Ok(())
}

#[test]
fn test_unreadable_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, b"not a zip archive")?;

    let config = WeeklyConfig::default();
    let result = load_workbook(&path, &config.sheets);
    assert!(matches!(result, Err(IngestError::Unreadable(_))));

    Ok(())
}
