mod common;
use common::{HEADER, HEADER_OUT};
use rhourfill::core::reader::CsvSource;
use rhourfill::errors::AppError;
use rhourfill::{ColumnNames, Schema};

#[test]
fn test_resolve_mandatory_columns() {
    let schema = Schema::from_header_line(HEADER, &ColumnNames::default()).expect("schema");

    assert_eq!(schema.datetime_idx, 0);
    assert_eq!(schema.name_idx, 1);
    assert_eq!(schema.width(), 14);
    assert_eq!(schema.holiday_idx, None);
    assert_eq!(schema.output_header().join(","), HEADER_OUT);
}

#[test]
fn test_columns_in_any_position() {
    let schema = Schema::from_header_line("open,close,name,volume,dateTime", &ColumnNames::default())
        .expect("schema");

    assert_eq!(schema.datetime_idx, 4);
    assert_eq!(schema.name_idx, 2);

    let fields = schema.synthetic_fields("2024-01-01T05:00", "AAPL");
    assert_eq!(fields, vec!["-1", "-1", "AAPL", "-1", "2024-01-01T05:00"]);
}

#[test]
fn test_missing_required_columns_message() {
    let err = Schema::from_header_line("open,high,low,close", &ColumnNames::default()).unwrap_err();

    assert!(matches!(err, AppError::MissingRequiredColumns { .. }));
    assert_eq!(
        err.to_string(),
        "Missing required columns: 'dateTime' or 'name'"
    );
}

#[test]
fn test_only_one_required_column_is_still_an_error() {
    let err = Schema::from_header_line("dateTime,open", &ColumnNames::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Missing required columns: 'dateTime' or 'name'"
    );

    let err = Schema::from_header_line("name,open", &ColumnNames::default()).unwrap_err();
    assert!(matches!(err, AppError::MissingRequiredColumns { .. }));
}

#[test]
fn test_custom_column_names() {
    let names = ColumnNames {
        datetime: "ts".to_string(),
        name: "symbol".to_string(),
        holiday: "filled".to_string(),
    };

    let schema = Schema::from_header_line("symbol,ts,close", &names).expect("schema");
    assert_eq!(schema.output_header(), vec!["symbol", "ts", "close", "filled"]);

    let err = Schema::from_header_line("dateTime,name", &names).unwrap_err();
    assert_eq!(err.to_string(), "Missing required columns: 'ts' or 'symbol'");
}

#[test]
fn test_existing_holiday_column_is_reused() {
    let schema = Schema::from_header_line(HEADER_OUT, &ColumnNames::default()).expect("schema");

    assert_eq!(schema.holiday_idx, Some(14));
    assert!(!schema.appends_holiday());
    assert_eq!(schema.output_header().join(","), HEADER_OUT);
}

#[test]
fn test_empty_input_message() {
    let err = CsvSource::from_reader("".as_bytes(), &ColumnNames::default())
        .err()
        .expect("empty input must fail");

    assert!(matches!(err, AppError::EmptyInput));
    assert_eq!(err.to_string(), "Input file is empty.");

    let err = Schema::from_header_line("", &ColumnNames::default()).unwrap_err();
    assert_eq!(err.to_string(), "Input file is empty.");
}

#[test]
fn test_reader_strips_bom_and_numbers_lines() {
    let data = "\u{feff}dateTime,name,close\n2023-10-01T08:00,X,1\n2023-10-01T09:00,X,2\n";

    let mut source = CsvSource::from_reader(data.as_bytes(), &ColumnNames::default())
        .expect("source");
    assert_eq!(source.schema().datetime_idx, 0);

    let (_, rows) = source.split();
    let rows: Vec<_> = rows.map(|r| r.expect("row")).collect();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].line, 2);
    assert_eq!(rows[1].line, 3);
    assert_eq!(rows[1].fields, vec!["2023-10-01T09:00", "X", "2"]);
}

#[test]
fn test_reader_keeps_quotes_verbatim() {
    let data = "dateTime,name,note\n2023-10-01T08:00,inst,a\"b\n2023-10-01T09:00,inst,\"x\"\n";

    let mut source = CsvSource::from_reader(data.as_bytes(), &ColumnNames::default())
        .expect("source");
    let (_, rows) = source.split();
    let rows: Vec<_> = rows.map(|r| r.expect("row")).collect();

    assert_eq!(rows[0].fields, vec!["2023-10-01T08:00", "inst", "a\"b"]);
    assert_eq!(rows[1].fields, vec!["2023-10-01T09:00", "inst", "\"x\""]);
}

#[test]
fn test_quoted_comma_is_not_an_escape() {
    // nessuna interpretazione delle virgolette: la virgola separa sempre
    let data = "dateTime,name,close\n2023-10-01T08:00,\"X, Inc\",2\n";

    let mut source = CsvSource::from_reader(data.as_bytes(), &ColumnNames::default())
        .expect("source");
    let (schema, rows) = source.split();
    let row = rows.map(|r| r.expect("row")).next().expect("one row");

    assert_eq!(row.fields, vec!["2023-10-01T08:00", "\"X", " Inc\"", "2"]);
    assert_ne!(row.fields.len(), schema.width());
}

#[test]
fn test_header_without_names_is_missing_columns() {
    for header in [",", "  ", ",,"] {
        let err = Schema::from_header_line(header, &ColumnNames::default()).unwrap_err();
        assert!(
            matches!(err, AppError::MissingRequiredColumns { .. }),
            "header {header:?} gave {err:?}"
        );
    }

    let err = CsvSource::from_reader(",\n2023-10-01T08:00,X\n".as_bytes(), &ColumnNames::default())
        .err()
        .expect("nameless header must fail");
    assert_eq!(
        err.to_string(),
        "Missing required columns: 'dateTime' or 'name'"
    );
}

#[test]
fn test_echo_ignores_key_columns() {
    let (schema, unknown) = Schema::from_header_line(HEADER, &ColumnNames::default())
        .expect("schema")
        .with_echo_columns(&["dateTime", "name", "mapTime", "mapTime"]);

    assert!(unknown.is_empty());
    assert_eq!(schema.echo_idx, vec![13]);
}
