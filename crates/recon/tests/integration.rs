use tapcheck_recon::{
    reconcile, FixedPhrase, HeaderNames, MemorySource, NumberError, ReconError, Report, RowField,
    DEFAULT_MESSAGE_BUDGET,
};

const CANONICAL: [&str; 5] = [
    "Receipt document number",
    "Category",
    "Product",
    "Issue date",
    "Quantity sold",
];

const NATIVE: [&str; 5] = [
    "Číslo daňového dokladu",
    "Kategorie",
    "Produkt",
    "Datum vystavení",
    "Prodané množství",
];

fn run(header: &[&str], rows: &[[&str; 5]]) -> Result<Report, ReconError> {
    let header = header.iter().map(|s| s.to_string()).collect();
    let rows = rows
        .iter()
        .map(|row| row.iter().map(|s| s.to_string()).collect())
        .collect();
    reconcile(MemorySource::new(header, rows), &HeaderNames::default())
}

// -------------------------------------------------------------------------
// Totals
// -------------------------------------------------------------------------

#[test]
fn beer_and_bottles_balance() {
    let report = run(
        &CANONICAL,
        &[
            ["R1", "Pivovar Premium", "Beer A", "2026-02-06 10:00:00", "2"],
            ["R1", "PET láhve", "Láhev 1 l", "2026-02-06 10:00:00", "2"],
            ["R1", "PET láhve", "Taška s uchem", "2026-02-06 10:00:00", "1"],
        ],
    )
    .unwrap();

    assert_eq!(report.total_receipts, 1);
    assert_eq!(report.mismatch_count, 0);
    let rec = &report.receipts[0];
    assert_eq!(rec.beer_ml, 2000);
    assert_eq!(rec.bottle_total_ml, 2000);
    assert_eq!(rec.diff_ml, 0);
    assert!(rec.matched);
}

#[test]
fn native_headers_and_decimal_commas() {
    let report = run(
        &NATIVE,
        &[
            ["3003", "Pivovar Chotěboř", "Premium", "2026-02-06 10:30:05", "1,5"],
            ["3003", "PET láhve", "Láhev 0,5 l", "2026-02-06 10:30:05", "3"],
            ["3007", "Pivo na čepu", "Kozel", "2026-02-06 12:22:48", "0.5"],
        ],
    )
    .unwrap();

    assert_eq!(report.total_receipts, 2);
    assert_eq!(report.mismatch_count, 1);
    assert!(report.receipt("3003").unwrap().matched);
    assert_eq!(report.receipt("3007").unwrap().diff_ml, -500);
}

#[test]
fn bottles_group_by_size_in_first_seen_order() {
    let report = run(
        &CANONICAL,
        &[
            ["R1", "Pivovar", "Beer", "", "4"],
            ["R1", "PET láhve", "Láhev 1,5 l", "", "1"],
            ["R1", "PET láhve", "Láhev 0,5 l", "", "2"],
            ["R1", "PET láhve", "Láhev 1,5 L", "", "1"],
        ],
    )
    .unwrap();

    let rec = &report.receipts[0];
    let lines: Vec<(i64, i64)> = rec.bottles.iter().map(|b| (b.size_ml, b.count)).collect();
    assert_eq!(lines, vec![(1500, 2), (500, 2)]);
    assert_eq!(rec.bottle_total_ml, 4000);
    assert!(rec.matched);
}

#[test]
fn fourth_fraction_digit_rounds() {
    let report = run(&CANONICAL, &[["R1", "Pivovar", "Beer", "", "1,0005"]]).unwrap();
    assert_eq!(report.receipts[0].beer_ml, 1001);
}

#[test]
fn receipts_keep_first_appearance_order() {
    let report = run(
        &CANONICAL,
        &[
            ["B", "Pivovar", "Beer", "", "1"],
            ["A", "Pivovar", "Beer", "", "1"],
            ["B", "PET láhve", "Láhev 1 l", "", "1"],
            ["C", "Pivovar", "Beer", "", "1"],
        ],
    )
    .unwrap();
    let ids: Vec<&str> = report.receipts.iter().map(|r| r.receipt_no.as_str()).collect();
    assert_eq!(ids, vec!["B", "A", "C"]);
}

#[test]
fn first_non_empty_issue_date_wins() {
    let report = run(
        &CANONICAL,
        &[
            ["R1", "Snacks", "Chips", "", "1"],
            ["R1", "Pivovar", "Beer", "2026-02-06 10:00:00", "1"],
            ["R1", "PET láhve", "Láhev 1 l", "2026-02-06 11:00:00", "1"],
        ],
    )
    .unwrap();
    assert_eq!(
        report.receipts[0].issued_at.as_deref(),
        Some("2026-02-06 10:00:00")
    );
}

#[test]
fn receipts_without_beer_or_bottles_are_left_out() {
    let report = run(
        &CANONICAL,
        &[
            ["R1", "Snacks", "Chips", "", "1"],
            ["", "Pivovar", "Beer", "", "1"],
            ["R2", "PET láhve", "Lahev 1 l", "", "1"],
            ["R3", "PET láhve", "Láhev bez objemu", "", "1"],
        ],
    )
    .unwrap();
    assert_eq!(report, Report::default());
}

#[test]
fn short_rows_read_as_empty_cells() {
    let header = CANONICAL.iter().map(|s| s.to_string()).collect();
    let rows = vec![
        vec!["R1".to_string(), "Pivovar".to_string(), "Beer".to_string(), String::new(), "1".to_string()],
        vec!["R1".to_string(), "Snacks".to_string()],
    ];
    let report = reconcile(MemorySource::new(header, rows), &HeaderNames::default()).unwrap();
    assert_eq!(report.receipts[0].beer_ml, 1000);
}

// -------------------------------------------------------------------------
// Failures
// -------------------------------------------------------------------------

#[test]
fn missing_quantity_column() {
    let err = run(&CANONICAL[..4], &[]).unwrap_err();
    assert_eq!(err.to_string(), "missing required columns: Quantity sold");
}

#[test]
fn all_missing_columns_listed_once() {
    let err = run(&["Product", "Notes"], &[]).unwrap_err();
    match err {
        ReconError::MissingColumns(names) => assert_eq!(
            names,
            vec!["Receipt document number", "Category", "Issue date", "Quantity sold"]
        ),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn fractional_bottle_count_aborts() {
    let err = run(
        &CANONICAL,
        &[
            ["R1", "Pivovar", "Beer", "", "1"],
            ["R1", "PET láhve", "Láhev 1 l", "", "1,5"],
        ],
    )
    .unwrap_err();

    assert_eq!(err.row(), Some(3));
    assert_eq!(
        err.to_string(),
        "row 3: invalid bottle quantity: expected whole number, got 1,5"
    );
}

#[test]
fn zero_liter_bottle_aborts() {
    let err = run(&CANONICAL, &[["R1", "PET láhve", "Láhev 0 l", "", "1"]]).unwrap_err();
    assert!(matches!(
        err,
        ReconError::InvalidField {
            row: 2,
            field: RowField::BottleSize,
            source: NumberError::InvalidLiters,
        }
    ));
}

#[test]
fn invalid_beer_quantity_aborts() {
    let err = run(&CANONICAL, &[["R1", "Pivovar", "Beer", "", "dva"]]).unwrap_err();
    assert!(matches!(
        err,
        ReconError::InvalidField {
            field: RowField::BeerQuantity,
            ..
        }
    ));
    assert!(std::error::Error::source(&err).is_some());
}

// -------------------------------------------------------------------------
// Output
// -------------------------------------------------------------------------

#[test]
fn mismatch_card_text() {
    let report = run(
        &CANONICAL,
        &[
            ["R1", "Pivovar", "Beer", "2026-02-06 10:00:00", "1"],
            ["R1", "PET láhve", "Láhev 0,5 l", "2026-02-06 10:00:00", "1"],
        ],
    )
    .unwrap();

    let text = report.format_text_with(DEFAULT_MESSAGE_BUDGET, &mut FixedPhrase(0));
    assert_eq!(
        text,
        "Checked 1 receipts. Found 1 mismatches.\n\
         ===== Receipt R1 =====\n\
         Time: 2026-02-06 10:00:00\n\
         Total beer: 1.00L\n\
         Total bottles: 0.50L\n\
         Difference: -0.50L\n\
         Bottles: 0.50L x1"
    );
    assert!(!report.mismatch_snark_text().is_empty());
}

#[test]
fn report_json_shape() {
    let report = run(
        &CANONICAL,
        &[
            ["R1", "Pivovar", "Beer", "", "1"],
            ["R1", "PET láhve", "Láhev 1 l", "", "1"],
        ],
    )
    .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["total_receipts"], 1);
    assert_eq!(json["mismatch_count"], 0);
    assert_eq!(json["receipts"][0]["bottles"][0]["size_ml"], 1000);
    assert_eq!(json["receipts"][0]["bottles"][0]["count"], 1);
    assert_eq!(json["receipts"][0]["matched"], true);
}
