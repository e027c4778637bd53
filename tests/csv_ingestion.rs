use data_profiler::ingestion::csv::{ingest_csv_from_path, ingest_csv_from_reader};
use data_profiler::types::{DataType, Value};
use data_profiler::IngestionError;

fn reader(input: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input.as_bytes())
}

fn dtypes(ds: &data_profiler::types::DataSet) -> Vec<DataType> {
    ds.schema.fields.iter().map(|f| f.data_type).collect()
}

#[test]
fn ingest_csv_from_path_happy_path() {
    let ds = ingest_csv_from_path("tests/fixtures/people.csv").unwrap();

    assert_eq!(ds.row_count(), 3);
    assert_eq!(
        ds.schema.field_names().collect::<Vec<_>>(),
        vec!["id", "name", "score", "active", "city"]
    );
    assert_eq!(
        dtypes(&ds),
        vec![
            DataType::Int64,
            DataType::Object,
            DataType::Float64,
            DataType::Bool,
            DataType::Object,
        ]
    );
    assert_eq!(
        ds.rows[0],
        vec![
            Value::Int64(1),
            Value::Utf8("Ada".to_string()),
            Value::Float64(98.5),
            Value::Bool(true),
            Value::Utf8("London".to_string()),
        ]
    );
    assert_eq!(ds.rows[1][4], Value::Null);
    assert_eq!(ds.rows[2][2], Value::Null);
}

#[test]
fn ingest_csv_treats_na_markers_as_missing() {
    let mut rdr = reader("a,b\n1,NA\nN/A,x\n3,null\n");
    let ds = ingest_csv_from_reader(&mut rdr).unwrap();

    assert_eq!(dtypes(&ds), vec![DataType::Float64, DataType::Object]);
    assert_eq!(ds.rows[1][0], Value::Null);
    assert_eq!(ds.rows[0][1], Value::Null);
    assert_eq!(ds.rows[1][1], Value::Utf8("x".to_string()));
}

#[test]
fn ingest_csv_header_only_yields_empty_object_columns() {
    let mut rdr = reader("a,b,c\n");
    let ds = ingest_csv_from_reader(&mut rdr).unwrap();

    assert_eq!(ds.row_count(), 0);
    assert_eq!(ds.column_count(), 3);
    assert_eq!(dtypes(&ds), vec![DataType::Object; 3]);
}

#[test]
fn ingest_csv_errors_on_empty_input() {
    let mut rdr = reader("");
    let err = ingest_csv_from_reader(&mut rdr).unwrap_err();
    assert!(matches!(err, IngestionError::Malformed { .. }));
    assert!(err.to_string().contains("no columns to parse"));
}

#[test]
fn ingest_csv_pads_short_rows_and_rejects_long_rows() {
    let mut rdr = reader("a,b\n1\n2,3\n");
    let ds = ingest_csv_from_reader(&mut rdr).unwrap();
    assert_eq!(ds.rows[0], vec![Value::Int64(1), Value::Null]);
    assert_eq!(ds.schema.fields[1].data_type, DataType::Float64);

    let mut rdr = reader("a,b\n1,2\n3,4,5\n");
    let err = ingest_csv_from_reader(&mut rdr).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("row 3"), "{msg}");
    assert!(msg.contains("expected 2 fields"), "{msg}");
}

#[test]
fn ingest_csv_renames_duplicate_and_blank_headers() {
    let mut rdr = reader("x,x,,y\n1,2,3,4\n");
    let ds = ingest_csv_from_reader(&mut rdr).unwrap();
    assert_eq!(
        ds.schema.field_names().collect::<Vec<_>>(),
        vec!["x", "x.1", "Unnamed: 2", "y"]
    );
}

#[test]
fn ingest_csv_handles_quoted_fields() {
    let mut rdr = reader("name,note\n\"Lovelace, Ada\",\"said \"\"hi\"\"\"\n");
    let ds = ingest_csv_from_reader(&mut rdr).unwrap();
    assert_eq!(ds.rows[0][0], Value::Utf8("Lovelace, Ada".to_string()));
    assert_eq!(ds.rows[0][1], Value::Utf8("said \"hi\"".to_string()));
}

#[test]
fn ingest_csv_missing_file_is_an_error() {
    let err = ingest_csv_from_path("tests/fixtures/does_not_exist.csv").unwrap_err();
    assert!(matches!(err, IngestionError::Csv(_)));
}
