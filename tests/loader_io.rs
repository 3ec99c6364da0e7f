use ohi_rs::loader::{self, ColumnMap, LoadError};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn write_csv(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn loads_and_coerces_rows() {
    let dir = tempdir().unwrap();
    let path = write_csv(
        &dir,
        "m.csv",
        "Country,Year,Value\n\
         Austria,2018,10.5\n\
         Austria,2019,\n\
         Belgium,2018,not a number\n\
         Chile,2016-01-01,7.25\n",
    );
    let records = loader::load_csv(&path).unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].country, "Austria");
    assert_eq!(records[0].year, 2018);
    assert_eq!(records[0].value, Some(10.5));
    // Missing and non-numeric values coerce to None rather than failing.
    assert_eq!(records[1].value, None);
    assert_eq!(records[2].value, None);
    // Date-form year cells keep the year.
    assert_eq!(records[3].year, 2016);
    assert_eq!(records[3].value, Some(7.25));
}

#[test]
fn custom_column_names() {
    let dir = tempdir().unwrap();
    let path = write_csv(
        &dir,
        "e.csv",
        "LOCATION,TIME,OBS_VALUE\nAustria,2018,3.5\n",
    );
    let cols = ColumnMap {
        country: "LOCATION".into(),
        year: "TIME".into(),
        value: "OBS_VALUE".into(),
    };
    let records = loader::load_csv_with(&path, &cols).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].country, "Austria");
}

#[test]
fn missing_file_is_fatal() {
    let err = loader::load_csv("/definitely/not/here.csv").unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn missing_column_is_fatal() {
    let dir = tempdir().unwrap();
    let path = write_csv(&dir, "bad.csv", "Country,Year\nAustria,2018\n");
    let err = loader::load_csv(&path).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn(c) if c == "Value"));
}

#[test]
fn unparseable_year_is_fatal() {
    let dir = tempdir().unwrap();
    let path = write_csv(
        &dir,
        "bad_year.csv",
        "Country,Year,Value\nAustria,soon,1.0\n",
    );
    let err = loader::load_csv(&path).unwrap_err();
    assert!(matches!(err, LoadError::Year { row: 2, .. }));
}

#[test]
fn header_only_file_is_empty() {
    let dir = tempdir().unwrap();
    let path = write_csv(&dir, "empty.csv", "Country,Year,Value\n");
    let err = loader::load_csv(&path).unwrap_err();
    assert!(matches!(err, LoadError::Empty { .. }));
}
