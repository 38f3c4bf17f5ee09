//! Integration tests for parsing uploaded files.

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

use sweeper_common::Cell;
use sweeper_ingest::{IngestError, parse};
use sweeper_model::{ColumnKind, UploadedFile};

fn workbook_bytes() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "city").unwrap();
    sheet.write_string(0, 1, "visits").unwrap();
    sheet.write_string(0, 2, "rate").unwrap();
    sheet.write_string(1, 0, "Oslo").unwrap();
    sheet.write_number(1, 1, 3).unwrap();
    sheet.write_number(1, 2, 0.5).unwrap();
    sheet.write_string(2, 0, "Lima").unwrap();
    sheet.write_number(2, 1, 7).unwrap();
    // rate left blank on the second row
    workbook.save_to_buffer().unwrap()
}

#[test]
fn parses_csv_upload() {
    let file = UploadedFile::new("visits.csv", b"city,visits\nOslo,3\nLima,\n".to_vec());
    let table = parse(&file).expect("parse csv");
    assert_eq!(table.column_names(), vec!["city", "visits"]);
    assert_eq!(table.kinds(), &[ColumnKind::Text, ColumnKind::Numeric]);
    assert_eq!(table.cell(1, 1), Cell::Null);
}

#[test]
fn parses_first_worksheet_of_xlsx_upload() {
    let file = UploadedFile::new("Visits.XLSX", workbook_bytes());
    let table = parse(&file).expect("parse xlsx");
    assert_eq!(table.column_names(), vec!["city", "visits", "rate"]);
    assert_eq!(
        table.kinds(),
        &[ColumnKind::Text, ColumnKind::Numeric, ColumnKind::Numeric]
    );
    assert_eq!(table.height(), 2);
    assert_eq!(table.cell(1, 0), Cell::Int(3));
    assert_eq!(table.cell(2, 0), Cell::Float(0.5));
    assert_eq!(table.cell(2, 1), Cell::Null);
}

#[test]
fn empty_worksheet_gives_empty_table() {
    let mut workbook = Workbook::new();
    workbook.add_worksheet();
    let bytes = workbook.save_to_buffer().unwrap();
    let table = parse(&UploadedFile::new("blank.xlsx", bytes)).expect("parse blank");
    assert_eq!(table.width(), 0);
    assert_eq!(table.height(), 0);
}

#[test]
fn unsupported_file_does_not_affect_siblings() {
    let files = vec![
        UploadedFile::new("a.csv", b"x\n1\n".to_vec()),
        UploadedFile::new("notes.txt", b"x\n1\n".to_vec()),
        UploadedFile::new("b.csv", b"y\n2\n3\n".to_vec()),
    ];
    let results: Vec<_> = files.iter().map(parse).collect();

    assert_eq!(results[0].as_ref().map(|t| t.height()).ok(), Some(1));
    assert!(matches!(
        results[1],
        Err(IngestError::UnsupportedFormat { ref extension }) if extension == ".txt"
    ));
    assert_eq!(results[2].as_ref().map(|t| t.height()).ok(), Some(2));
}

#[test]
fn date_cells_become_datetime_text() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let day = Format::new().set_num_format("yyyy-mm-dd");
    let stamp = Format::new().set_num_format("yyyy-mm-dd hh:mm");
    sheet.write_string(0, 0, "visited").unwrap();
    let date = ExcelDateTime::from_ymd(2024, 3, 15).unwrap();
    sheet.write_datetime_with_format(1, 0, &date, &day).unwrap();
    let datetime = ExcelDateTime::from_ymd(2024, 3, 15)
        .unwrap()
        .and_hms(13, 5, 0)
        .unwrap();
    sheet.write_datetime_with_format(2, 0, &datetime, &stamp).unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let table = parse(&UploadedFile::new("dates.xlsx", bytes)).expect("parse dates");
    assert_eq!(table.kinds(), &[ColumnKind::Text]);
    assert_eq!(table.cell(0, 0), Cell::Text("2024-03-15 00:00:00".to_string()));
    assert_eq!(table.cell(0, 1), Cell::Text("2024-03-15 13:05:00".to_string()));
}
