use rust_value_aggregation::aggregate::aggregate;
use rust_value_aggregation::ingestion::csv::{read_csv_tokens_from_path, read_csv_tokens_from_reader, CsvOptions};
use rust_value_aggregation::types::Token;

#[test]
fn read_csv_from_path_happy_path() {
    let tokens = read_csv_tokens_from_path("tests/fixtures/values.csv", &CsvOptions::default()).unwrap();
    assert_eq!(tokens.len(), 6);
    assert_eq!(tokens[0], Token::Text("10".to_string()));
    assert_eq!(tokens[3], Token::Text(String::new()));
    assert_eq!(tokens[4], Token::Text("  5  ".to_string()));

    let report = aggregate(&tokens);
    assert_eq!(report.total(), 45.0);
    assert_eq!(report.valid_count(), 4);
    assert_eq!(report.invalid_count(), 2);
    assert_eq!(report.mean(), Some(11.25));
}

#[test]
fn read_csv_from_existing_reader() {
    let input = "id;score\n1;2.5\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b';')
        .from_reader(input.as_bytes());

    let tokens = read_csv_tokens_from_reader(&mut rdr).unwrap();
    assert_eq!(tokens, vec![Token::from("1"), Token::from("2.5")]);
}

#[test]
fn read_csv_missing_file_is_an_error() {
    let err = read_csv_tokens_from_path("tests/fixtures/does_not_exist.csv", &CsvOptions::default()).unwrap_err();
    assert!(err.to_string().contains("csv error"));
}

#[test]
fn quoted_thousands_separator_is_invalid() {
    let input = "\"1,000\",7\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(input.as_bytes());

    let report = aggregate(&read_csv_tokens_from_reader(&mut rdr).unwrap());
    assert_eq!(report.valid_count(), 1);
    assert_eq!(report.invalid_count(), 1);
    assert_eq!(report.total(), 7.0);
}
