use std::path::PathBuf;

use data_profiler::ingestion::csv::ingest_csv_from_reader;
use data_profiler::ingestion::IngestionOptions;
use data_profiler::profiling::{profile_dataset, profile_source, ProfileResponse, TableSource};
use data_profiler::types::DataSet;

fn csv_dataset(input: &str) -> DataSet {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input.as_bytes());
    ingest_csv_from_reader(&mut rdr).unwrap()
}

fn profile_json(input: &str) -> serde_json::Value {
    serde_json::to_value(profile_dataset(&csv_dataset(input))).unwrap()
}

#[test]
fn shape_matches_rows_and_columns() {
    for (input, rows, cols) in [
        ("a\n1\n", 1, 1),
        ("a,b,c\n1,2,3\n4,5,6\n7,8,9\n", 3, 3),
        ("a,b\n", 0, 2),
    ] {
        let p = profile_dataset(&csv_dataset(input));
        assert_eq!(p.row_count, rows, "{input:?}");
        assert_eq!(p.column_count, cols, "{input:?}");
        assert_eq!(p.column_names.len(), cols);
    }
}

#[test]
fn type_counts_sum_to_column_count() {
    let p = profile_dataset(&csv_dataset(
        "i,f,b,s,n\n1,1.5,true,x,\n2,2.5,false,y,\n",
    ));
    let total: usize = p.data_type_counts.iter().map(|(_, c)| *c).sum();
    assert_eq!(total, p.column_count);
    assert_eq!(p.data_type_counts.get("float64"), Some(&2));
    assert_eq!(p.data_type_counts.get("int64"), Some(&1));
    assert_eq!(p.data_type_counts.get("bool"), Some(&1));
    assert_eq!(p.data_type_counts.get("object"), Some(&1));
    // float64 has the highest count, so it comes first.
    assert_eq!(p.data_type_counts.keys().next(), Some("float64"));
}

#[test]
fn missing_counts_are_exact_and_include_zeroes() {
    let json = profile_json("a,b,c\n1,,x\n,NA,y\n3,,\n");
    assert_eq!(
        json["missing_value_counts"],
        serde_json::json!({ "a": 1, "b": 3, "c": 1 })
    );

    let json = profile_json("a,b\n1,2\n");
    assert_eq!(json["missing_value_counts"], serde_json::json!({ "a": 0, "b": 0 }));
}

#[test]
fn statistics_keys_are_exactly_the_numeric_columns() {
    let p = profile_dataset(&csv_dataset(
        "id,name,score,flag,empty\n1,a,0.5,true,\n2,b,1.5,false,\n",
    ));
    // An all-missing column is float64 and gets a count-only summary.
    assert_eq!(
        p.basic_statistics.keys().collect::<Vec<_>>(),
        vec!["id", "score", "empty"]
    );
    assert_eq!(p.basic_statistics.get("empty").map(|s| s.count), Some(0));
    assert_eq!(p.basic_statistics.get("empty").and_then(|s| s.mean), None);
}

#[test]
fn statistics_match_describe_conventions() {
    let json = profile_json("v\n1\n2\n3\n4\n");
    let v = &json["basic_statistics"]["v"];
    assert_eq!(v["count"], 4);
    assert_eq!(v["mean"], 2.5);
    assert_eq!(v["min"], 1.0);
    assert_eq!(v["25%"], 1.75);
    assert_eq!(v["50%"], 2.5);
    assert_eq!(v["75%"], 3.25);
    assert_eq!(v["max"], 4.0);
    let std = v["std"].as_f64().unwrap();
    assert!((std - 1.290_994_448_735_805_6).abs() < 1e-12);
}

#[test]
fn example_upload_profile() {
    let out = profile_source(
        TableSource::FromPath(PathBuf::from("tests/fixtures/data.csv")),
        &IngestionOptions::default(),
    )
    .unwrap();
    let json = serde_json::to_value(&out).unwrap();

    assert_eq!(json["row_count"], 2);
    assert_eq!(json["column_count"], 2);
    assert_eq!(json["column_names"], serde_json::json!(["name", "value"]));
    assert_eq!(
        json["missing_value_counts"],
        serde_json::json!({ "name": 0, "value": 1 })
    );
    assert_eq!(json["basic_statistics"]["value"]["count"], 1);
    assert_eq!(json["basic_statistics"]["value"]["std"], serde_json::Value::Null);
    assert!(json["basic_statistics"].get("name").is_none());
}

#[test]
fn profiling_twice_is_byte_identical() {
    let ds = csv_dataset("a,b,c,d\n1,x,2.5,true\n2,,3.5,false\n3,z,,true\n");
    let first = serde_json::to_string(&profile_dataset(&ds)).unwrap();
    let second = serde_json::to_string(&profile_dataset(&ds)).unwrap();
    assert_eq!(first, second);

    let from_file = |path: &str| {
        let out = profile_source(TableSource::FromPath(PathBuf::from(path)), &IngestionOptions::default())
            .unwrap();
        serde_json::to_string(&out).unwrap()
    };
    assert_eq!(from_file("tests/fixtures/people.csv"), from_file("tests/fixtures/people.csv"));
}

#[test]
fn unsupported_file_is_an_error_payload() {
    let out = profile_source(
        TableSource::FromPath(PathBuf::from("tests/fixtures/report.txt")),
        &IngestionOptions::default(),
    )
    .unwrap();
    assert_eq!(out, ProfileResponse::unsupported_format());
}
