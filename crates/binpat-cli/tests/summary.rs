//! Tests for the domain summary table.

use binpat_cli::summary::{ColumnRow, column_rows, domain_table};
use binpat_core::{EncodeOptions, build_domains};

#[test]
fn describes_each_column_with_bit_ranges() {
    let domains =
        build_domains("p,x,s\ne,y,s\np,x,n\n".as_bytes(), &EncodeOptions::new(1)).unwrap();

    let rows = column_rows(&domains);

    assert_eq!(
        rows,
        vec![
            ColumnRow {
                column: 0,
                value_count: 2,
                bits: Some((0, 1)),
                values: vec!["x".to_string(), "y".to_string()],
            },
            ColumnRow {
                column: 1,
                value_count: 2,
                bits: Some((2, 3)),
                values: vec!["s".to_string(), "n".to_string()],
            },
        ]
    );
}

#[test]
fn single_value_column_occupies_one_bit() {
    let domains = build_domains("a,k,1\nb,k,2\n".as_bytes(), &EncodeOptions::new(1)).unwrap();

    let rows = column_rows(&domains);

    assert_eq!(rows[0].bits, Some((0, 0)));
    assert_eq!(rows[1].bits, Some((1, 2)));
}

#[test]
fn zero_skip_has_no_rows() {
    let domains = build_domains("a,b\nc,d\n".as_bytes(), &EncodeOptions::new(0)).unwrap();

    assert!(column_rows(&domains).is_empty());
    // header + total row
    let mut table = domain_table(&domains);
    table.force_no_tty();
    let rendered = table.to_string();
    assert!(rendered.contains("TOTAL"));
    assert!(rendered.contains("0 column(s)"));
}
