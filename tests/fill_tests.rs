mod common;
use common::{HEADER, HEADER_OUT, bar, original, synthetic, synthetic_echo};
use rhourfill::core::fill::{OrderPolicy, RawRow, fill_gaps, fill_lines};
use rhourfill::errors::AppError;
use rhourfill::models::Holiday;
use rhourfill::{ColumnNames, Schema};

fn fill(lines: &[String]) -> Vec<String> {
    fill_lines(
        lines.iter().map(String::as_str),
        &ColumnNames::default(),
        OrderPolicy::Permissive,
    )
    .expect("fill")
    .to_lines()
}

fn input(bars: &[String]) -> Vec<String> {
    std::iter::once(HEADER.to_string())
        .chain(bars.iter().cloned())
        .collect()
}

#[test]
fn test_single_missing_hour() {
    let b9 = bar("2023-10-01T09:00", "instrument1", 100);
    let b11 = bar("2023-10-01T11:00", "instrument1", 110);

    let out = fill(&input(&[b9.clone(), b11.clone()]));

    assert_eq!(
        out,
        vec![
            HEADER_OUT.to_string(),
            original(&b9),
            synthetic("2023-10-01T10:00", "instrument1"),
            original(&b11),
        ]
    );
}

#[test]
fn test_multiple_missing_hours() {
    let b8 = bar("2023-10-01T08:00", "instrument1", 100);
    let b12 = bar("2023-10-01T12:00", "instrument1", 110);

    let out = fill(&input(&[b8.clone(), b12.clone()]));

    assert_eq!(out.len(), 6, "header + 5 hourly rows");
    assert_eq!(out[1], original(&b8));
    assert_eq!(out[2], synthetic("2023-10-01T09:00", "instrument1"));
    assert_eq!(out[3], synthetic("2023-10-01T10:00", "instrument1"));
    assert_eq!(out[4], synthetic("2023-10-01T11:00", "instrument1"));
    assert_eq!(out[5], original(&b12));
}

#[test]
fn test_two_separate_gaps() {
    let b8 = bar("2023-10-01T08:00", "instrument1", 100);
    let b10 = bar("2023-10-01T10:00", "instrument1", 110);
    let b13 = bar("2023-10-01T13:00", "instrument1", 120);

    let filled = fill_lines(
        input(&[b8, b10, b13]).iter().map(String::as_str),
        &ColumnNames::default(),
        OrderPolicy::Permissive,
    )
    .expect("fill");

    let hours: Vec<String> = filled.records.iter().map(|r| r.fields[0].clone()).collect();
    assert_eq!(
        hours,
        vec![
            "2023-10-01T08:00",
            "2023-10-01T09:00",
            "2023-10-01T10:00",
            "2023-10-01T11:00",
            "2023-10-01T12:00",
            "2023-10-01T13:00",
        ]
    );

    let flags: Vec<&str> = filled.records.iter().map(|r| r.holiday.as_str()).collect();
    assert_eq!(flags, vec!["0", "1", "0", "1", "1", "0"]);

    assert_eq!(filled.report.gaps.len(), 2);
    assert_eq!(filled.report.gaps[0].missing_hours, 1);
    assert_eq!(filled.report.gaps[1].missing_hours, 2);
    assert_eq!(filled.report.synthetic_rows, 3);
    assert_eq!(filled.report.original_rows, 3);
    assert_eq!(filled.report.expected_rows(), filled.records.len());
}

#[test]
fn test_contiguous_series_untouched() {
    let bars: Vec<String> = (0..24)
        .map(|h| bar(&format!("2023-10-02T{h:02}:00"), "EURUSD", 100 + h))
        .collect();

    let out = fill(&input(&bars));

    assert_eq!(out.len(), 25);
    for (line, b) in out[1..].iter().zip(&bars) {
        assert_eq!(line, &original(b));
    }
}

#[test]
fn test_gap_across_midnight_and_month_end() {
    let last = bar("2023-10-31T22:00", "instrument1", 100);
    let first = bar("2023-11-01T02:00", "instrument1", 110);

    let out = fill(&input(&[last, first]));

    assert_eq!(out.len(), 1 + 5);
    assert_eq!(out[2], synthetic("2023-10-31T23:00", "instrument1"));
    assert_eq!(out[3], synthetic("2023-11-01T00:00", "instrument1"));
    assert_eq!(out[4], synthetic("2023-11-01T01:00", "instrument1"));
}

#[test]
fn test_weekend_gap_row_count() {
    // venerdì 21:00 → domenica 22:00
    let fri = bar("2023-10-06T21:00", "GBPUSD", 100);
    let sun = bar("2023-10-08T22:00", "GBPUSD", 110);

    let filled = fill_lines(
        input(&[fri, sun]).iter().map(String::as_str),
        &ColumnNames::default(),
        OrderPolicy::Permissive,
    )
    .expect("fill");

    assert_eq!(filled.records.len(), 50);
    assert_eq!(filled.report.expected_rows(), 50);
    assert_eq!(filled.report.synthetic_rows, 48);
    assert!(
        filled.records[1..49]
            .iter()
            .all(|r| r.holiday == Holiday::Synthetic)
    );
}

#[test]
fn test_name_copied_from_row_before_gap() {
    let a = bar("2023-10-01T08:00", "OLD", 100);
    let b = bar("2023-10-01T10:00", "NEW", 110);

    let out = fill(&input(&[a, b]));

    assert_eq!(out[2], synthetic("2023-10-01T09:00", "OLD"));
}

#[test]
fn test_original_fields_preserved_byte_for_byte() {
    let odd = "2023-10-01T08:00,instrument1, 100 ,1.000000,abc,,0,x,1e3,-0.0,TRUE,a b,z,2023-10-01T08:00";
    let next = bar("2023-10-01T10:00", "instrument1", 110);

    let out = fill(&[HEADER.to_string(), odd.to_string(), next]);

    assert_eq!(out[1], format!("{odd},0"));
}

#[test]
fn test_echo_column_repeats_timestamp() {
    let b9 = bar("2023-10-01T09:00", "instrument1", 100);
    let b11 = bar("2023-10-01T11:00", "instrument1", 110);

    let (schema, unknown) = Schema::from_header_line(HEADER, &ColumnNames::default())
        .expect("schema")
        .with_echo_columns(&["mapTime", "doesNotExist"]);
    assert_eq!(unknown, vec!["doesNotExist".to_string()]);

    let rows = [b9, b11]
        .into_iter()
        .enumerate()
        .map(|(i, l)| Ok(RawRow::new(i as u64 + 2, l.split(',').map(str::to_string))));

    let (records, _) = fill_gaps(&schema, OrderPolicy::Permissive, rows).expect("fill");
    let line = schema.output_row(&records[1]).join(",");

    assert_eq!(line, synthetic_echo("2023-10-01T10:00", "instrument1"));
}

#[test]
fn test_rerun_on_own_output_is_identity() {
    let bars = vec![
        bar("2023-10-01T08:00", "instrument1", 100),
        bar("2023-10-01T10:00", "instrument1", 110),
        bar("2023-10-01T13:00", "instrument1", 120),
    ];

    let first = fill(&input(&bars));
    let second = fill(&first);

    assert_eq!(first, second);
    assert_eq!(second[0], HEADER_OUT, "holiday column not appended twice");
}

#[test]
fn test_seconds_are_truncated() {
    let a = "dateTime,name,close\n2023-10-01T08:00:00,X,1\n2023-10-01T10:00:59,X,2";

    let filled = fill_lines(a.lines(), &ColumnNames::default(), OrderPolicy::Permissive)
        .expect("fill");

    let lines = filled.to_lines();
    assert_eq!(lines[2], "2023-10-01T09:00,X,-1,1");
    assert_eq!(lines[3], "2023-10-01T10:00:59,X,2,0");
}

#[test]
fn test_duplicate_and_backward_rows_pass_through() {
    let text = [
        "dateTime,name,close",
        "2023-10-01T08:00,X,1",
        "2023-10-01T08:00,X,2",
        "2023-10-01T07:00,X,3",
        "2023-10-01T09:00,X,4",
    ];

    let filled = fill_lines(text, &ColumnNames::default(), OrderPolicy::Permissive).expect("fill");

    // 07:00 → 09:00 è un gap: il cursore segue l'ultima riga letta
    assert_eq!(
        filled.to_lines(),
        vec![
            "dateTime,name,close,holiday",
            "2023-10-01T08:00,X,1,0",
            "2023-10-01T08:00,X,2,0",
            "2023-10-01T07:00,X,3,0",
            "2023-10-01T08:00,X,-1,1",
            "2023-10-01T09:00,X,4,0",
        ]
    );
    assert_eq!(filled.report.out_of_order_rows, 2);
    assert!(!filled.report.is_clean());
}

#[test]
fn test_report_range_covers_backward_rows() {
    let text = [
        "dateTime,name,close",
        "2023-10-01T10:00,X,1",
        "2023-10-01T11:00,X,2",
        "2023-10-01T08:00,X,3",
    ];

    let filled = fill_lines(text, &ColumnNames::default(), OrderPolicy::Permissive).expect("fill");

    assert_eq!(filled.report.first.map(|s| s.to_string()).as_deref(), Some("2023-10-01T08:00"));
    assert_eq!(filled.report.last.map(|s| s.to_string()).as_deref(), Some("2023-10-01T11:00"));
    // 08:00..=11:00
    assert_eq!(filled.report.expected_rows(), 4);
    assert_eq!(filled.report.out_of_order_rows, 1);
}

#[test]
fn test_nameless_header_is_missing_columns() {
    let err = fill_lines([",", "2023-10-01T08:00,X"], &ColumnNames::default(), OrderPolicy::Permissive)
        .unwrap_err();

    assert!(matches!(err, AppError::MissingRequiredColumns { .. }));
}

#[test]
fn test_strict_rejects_non_monotonic() {
    let text = [
        "dateTime,name,close",
        "2023-10-01T08:00,X,1",
        "2023-10-01T08:00,X,2",
    ];

    let err = fill_lines(text, &ColumnNames::default(), OrderPolicy::Strict).unwrap_err();

    match err {
        AppError::NonMonotonic {
            line,
            previous,
            current,
        } => {
            assert_eq!(line, 3);
            assert_eq!(previous, "2023-10-01T08:00");
            assert_eq!(current, "2023-10-01T08:00");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_malformed_timestamp() {
    let text = [
        "dateTime,name,close",
        "2023-10-01T08:00,X,1",
        "01/10/2023 09:00,X,2",
    ];

    let err = fill_lines(text, &ColumnNames::default(), OrderPolicy::Permissive).unwrap_err();

    assert!(matches!(
        err,
        AppError::InvalidDateTime { line: 3, ref value } if value == "01/10/2023 09:00"
    ));
}

#[test]
fn test_short_row_is_schema_mismatch() {
    let text = ["dateTime,name,close", "2023-10-01T08:00,X"];

    let err = fill_lines(text, &ColumnNames::default(), OrderPolicy::Permissive).unwrap_err();

    assert!(matches!(
        err,
        AppError::SchemaMismatch {
            line: 2,
            expected: 3,
            found: 2
        }
    ));
}

#[test]
fn test_header_only_produces_header() {
    let filled = fill_lines(
        ["dateTime,name,close"],
        &ColumnNames::default(),
        OrderPolicy::Permissive,
    )
    .expect("fill");

    assert_eq!(filled.to_lines(), vec!["dateTime,name,close,holiday"]);
    assert_eq!(filled.report.expected_rows(), 0);
    assert!(filled.report.is_clean());
}
