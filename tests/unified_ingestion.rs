use data_profiler::ingestion::{ingest_from_path, IngestionFormat, IngestionOptions};
use data_profiler::types::DataType;
use data_profiler::IngestionError;

#[test]
fn unified_ingest_csv_by_extension() {
    let ds = ingest_from_path("tests/fixtures/people.csv", &IngestionOptions::default()).unwrap();
    assert_eq!(ds.row_count(), 3);
    assert_eq!(ds.column_count(), 5);
}

#[test]
fn unified_detects_formats_case_sensitively() {
    assert_eq!(IngestionFormat::from_file_name("a.csv"), Some(IngestionFormat::Csv));
    assert_eq!(IngestionFormat::from_file_name("dir/a.xlsx"), Some(IngestionFormat::Excel));
    assert_eq!(IngestionFormat::from_file_name("A.XLSX"), Some(IngestionFormat::Excel));
    assert_eq!(IngestionFormat::from_file_name("a.CSV"), None);
    assert_eq!(IngestionFormat::from_file_name("a.Xlsx"), None);
    assert_eq!(IngestionFormat::from_file_name("a.xls"), None);
    assert_eq!(IngestionFormat::from_file_name("csv"), None);
}

#[test]
fn unified_rejects_unknown_extension() {
    let err = ingest_from_path("tests/fixtures/report.txt", &IngestionOptions::default()).unwrap_err();
    match err {
        IngestionError::UnsupportedFormat { path } => assert!(path.ends_with("report.txt")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unified_forced_format_ignores_extension() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("upload.bin");
    std::fs::write(&path, "a,b\n1,x\n2,y\n").unwrap();

    let opts = IngestionOptions {
        format: Some(IngestionFormat::Csv),
        ..Default::default()
    };
    let ds = ingest_from_path(&path, &opts).unwrap();
    assert_eq!(ds.row_count(), 2);
    assert_eq!(ds.schema.fields[0].data_type, DataType::Int64);
    assert_eq!(ds.schema.fields[1].data_type, DataType::Object);
}

#[test]
fn unified_mysql_format_is_not_path_based() {
    let opts = IngestionOptions {
        format: Some(IngestionFormat::MySql),
        ..Default::default()
    };
    let err = ingest_from_path("tests/fixtures/people.csv", &opts).unwrap_err();
    assert!(matches!(err, IngestionError::UnsupportedFormat { .. }));
}

#[cfg(feature = "excel")]
#[test]
fn unified_ingest_excel_by_extension() {
    use rust_xlsxwriter::Workbook;

    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("book.xlsx");
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_string(0, 0, "value").unwrap();
    ws.write_number(1, 0, 1.5).unwrap();
    ws.write_number(2, 0, 2).unwrap();
    wb.save(&path).unwrap();

    let ds = ingest_from_path(&path, &IngestionOptions::default()).unwrap();
    assert_eq!(ds.row_count(), 2);
    assert_eq!(ds.schema.fields[0].data_type, DataType::Float64);
}
