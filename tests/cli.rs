// Integration tests for the census-refine and generate_sample binaries.

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const OUTPUT: &str = "refined_census_data.csv";

const DICTIONARY: &str = r#"{
    "FAMILY_TYPE": {"1": "Married couple", "2": "Single parent", "-8": "No code required"}
}"#;

fn refine_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("census-refine").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn write_inputs(dir: &Path, csv: &str, json: &str) {
    fs::write(dir.join("census.csv"), csv).unwrap();
    fs::write(dir.join("dictionary.json"), json).unwrap();
}

#[test]
fn refines_census_extract() {
    let temp_dir = TempDir::new().unwrap();
    write_inputs(
        temp_dir.path(),
        "SERIAL_NUM,FAMILY_TYPE,AGE,HOURS_PER_WEEK_WORKED\n\
         1,1,34,35\n\
         2,2,-8,120\n\
         3,5,51,99\n\
         4,-8,29,150\n\
         5,,abc,40\n\
         1,1,34,35\n\
         2,2,-8,120\n",
        DICTIONARY,
    );

    let output = refine_cmd(temp_dir.path())
        .arg("census.csv")
        .arg("dictionary.json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(
        String::from_utf8(output).unwrap(),
        "Loaded 7 rows\n\
         Removed 2 duplicate rows\n\
         Sentinel code '-8' replaced with missing in 2 cells\n\
         'FAMILY_TYPE' column contains 1 inadmissible values\n\
         Created new column 'FAMILY_TYPE_LABEL' using dictionary mapping\n\
         Anomaly Check: 2 records in 'HOURS_PER_WEEK_WORKED' exceed 100 hours per week\n\
         Outliers in 'HOURS_PER_WEEK_WORKED' replaced with missing\n\
         Refined data saved to refined_census_data.csv\n\
         Final data shape: (5, 5)\n"
    );
    assert_eq!(
        fs::read_to_string(temp_dir.path().join(OUTPUT)).unwrap(),
        "SERIAL_NUM,FAMILY_TYPE,AGE,HOURS_PER_WEEK_WORKED,FAMILY_TYPE_LABEL\n\
         1,1,34,35,Married couple\n\
         2,2,,,Single parent\n\
         3,5,51,99,\n\
         4,,29,,\n\
         5,,,40,\n"
    );
}

#[test]
fn fractional_hours_column_is_still_checked_for_outliers() {
    let temp_dir = TempDir::new().unwrap();
    write_inputs(
        temp_dir.path(),
        "SERIAL_NUM,HOURS_PER_WEEK_WORKED\n1,35\n2,37.5\n3,150\n",
        DICTIONARY,
    );

    refine_cmd(temp_dir.path())
        .arg("census.csv")
        .arg("dictionary.json")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Unable to convert column 'HOURS_PER_WEEK_WORKED' to nullable integer: ",
        ))
        .stdout(predicate::str::contains(
            "Anomaly Check: 1 records in 'HOURS_PER_WEEK_WORKED' exceed 100 hours per week",
        ));

    assert_eq!(
        fs::read_to_string(temp_dir.path().join(OUTPUT)).unwrap(),
        "SERIAL_NUM,HOURS_PER_WEEK_WORKED\n1,35.0\n2,37.5\n3,\n"
    );
}

#[test]
fn ten_rows_with_two_duplicates() {
    let temp_dir = TempDir::new().unwrap();
    let mut csv = String::from("SERIAL_NUM,FAMILY_TYPE\n");
    for serial in 1..=8 {
        csv.push_str(&format!("{serial},1\n"));
    }
    csv.push_str("3,1\n7,1\n");
    write_inputs(temp_dir.path(), &csv, DICTIONARY);

    refine_cmd(temp_dir.path())
        .arg("census.csv")
        .arg("dictionary.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 2 duplicate rows"))
        .stdout(predicate::str::contains("Final data shape: (8, 3)"));
}

#[test]
fn missing_csv_fails_without_output() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("dictionary.json"), DICTIONARY).unwrap();

    refine_cmd(temp_dir.path())
        .arg("absent.csv")
        .arg("dictionary.json")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("CSV file not found at absent.csv"));

    assert!(!temp_dir.path().join(OUTPUT).exists());
}

#[test]
fn malformed_dictionary_fails_without_output() {
    let temp_dir = TempDir::new().unwrap();
    write_inputs(temp_dir.path(), "FAMILY_TYPE\n1\n", "{\"FAMILY_TYPE\": {\"1\": ");

    refine_cmd(temp_dir.path())
        .arg("census.csv")
        .arg("dictionary.json")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unable to decode JSON dictionary file"));

    assert!(!temp_dir.path().join(OUTPUT).exists());
}

#[test]
fn unwritable_output_fails() {
    let temp_dir = TempDir::new().unwrap();
    write_inputs(temp_dir.path(), "FAMILY_TYPE\n1\n", DICTIONARY);

    refine_cmd(temp_dir.path())
        .arg("census.csv")
        .arg("dictionary.json")
        .arg("--output")
        .arg("missing-dir/out.csv")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("could not save the refined data"));
}

#[test]
fn dictionary_scope_keeps_sentinel_in_other_columns() {
    let temp_dir = TempDir::new().unwrap();
    write_inputs(
        temp_dir.path(),
        "FAMILY_TYPE,TEMPERATURE\n-8,-8\n1,3\n",
        DICTIONARY,
    );

    refine_cmd(temp_dir.path())
        .arg("census.csv")
        .arg("dictionary.json")
        .arg("--sentinel-scope")
        .arg("dictionary")
        .assert()
        .success()
        .stdout(predicate::str::contains("replaced with missing in 1 cells"));

    assert_eq!(
        fs::read_to_string(temp_dir.path().join(OUTPUT)).unwrap(),
        "FAMILY_TYPE,TEMPERATURE,FAMILY_TYPE_LABEL\n,-8,\n1,3,Married couple\n"
    );
}

#[test]
fn config_file_sets_outlier_rule_and_flags_override_it() {
    let temp_dir = TempDir::new().unwrap();
    write_inputs(temp_dir.path(), "SERIAL,HOURS\n1,50\n2,70\n3,90\n", DICTIONARY);
    fs::write(
        temp_dir.path().join("refine.json"),
        r#"{"outlier_column": "HOURS", "outlier_threshold": 60, "output": "from-config.csv"}"#,
    )
    .unwrap();

    refine_cmd(temp_dir.path())
        .arg("census.csv")
        .arg("dictionary.json")
        .arg("--config")
        .arg("refine.json")
        .arg("--outlier-threshold")
        .arg("80")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Anomaly Check: 1 records in 'HOURS' exceed 80 hours per week",
        ))
        .stdout(predicate::str::contains(
            "Dictionary column 'FAMILY_TYPE' not found in dataset; skipping",
        ));

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("from-config.csv")).unwrap(),
        "SERIAL,HOURS\n1,50\n2,70\n3,\n"
    );
}

#[test]
fn generated_sample_refines_cleanly() {
    let temp_dir = TempDir::new().unwrap();

    Command::cargo_bin("generate_sample")
        .unwrap()
        .current_dir(temp_dir.path())
        .arg("--rows")
        .arg("50")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 55 records (5 duplicates)"));

    refine_cmd(temp_dir.path())
        .arg("sample_census.csv")
        .arg("sample_dictionary.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 55 rows"))
        .stdout(predicate::str::contains("Removed 5 duplicate rows"))
        .stdout(predicate::str::contains("'FAMILY_TYPE' column contains"))
        .stdout(predicate::str::contains("Created new column 'AGE_BAND_LABEL'"))
        .stdout(predicate::str::contains("Anomaly Check:"))
        .stdout(predicate::str::contains("Final data shape: (50, 8)"));
}
