//! Domain summary printed after a successful run.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use binpat_core::{DomainSet, RunSummary};

/// One line of the domain table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRow {
    pub column: usize,
    pub value_count: usize,
    /// Inclusive bit range, `None` for an empty domain.
    pub bits: Option<(usize, usize)>,
    pub values: Vec<String>,
}

/// Describe every pattern column of `domains`.
pub fn column_rows(domains: &DomainSet) -> Vec<ColumnRow> {
    domains
        .domains()
        .iter()
        .zip(domains.offsets())
        .enumerate()
        .map(|(column, (domain, offset))| ColumnRow {
            column,
            value_count: domain.len(),
            bits: (!domain.is_empty()).then(|| (offset, offset + domain.len() - 1)),
            values: domain.values_lossy(),
        })
        .collect()
}

/// Build the domain table.
pub fn domain_table(domains: &DomainSet) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Values"),
        header_cell("Bits"),
        header_cell("Domain (bit order)"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    for row in column_rows(domains) {
        table.add_row(vec![
            Cell::new(row.column),
            Cell::new(row.value_count),
            bits_cell(row.bits),
            Cell::new(row.values.join(" ")),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(domains.width()).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell(format!("{} column(s)", domains.pattern_len())),
    ]);
    table
}

pub fn print_summary(summary: &RunSummary) {
    println!("Input: {}", summary.input.display());
    println!("Output: {}", summary.output.display());
    println!(
        "Records: {}  Pattern length: {}  Bits per pattern: {}",
        summary.stats.records,
        summary.domains.pattern_len(),
        summary.stats.width
    );
    println!(
        "List of values collected for each {} attributes:",
        summary.domains.pattern_len()
    );
    println!("{}", domain_table(&summary.domains));
    if summary.stats.all_zero > 0 {
        eprintln!(
            "warning: {} pattern(s) have no bit set",
            summary.stats.all_zero
        );
    }
    if summary.stats.unmatched > 0 {
        eprintln!(
            "warning: {} value(s) changed between passes and were encoded as zero",
            summary.stats.unmatched
        );
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
    table.set_constraints(vec![
        ColumnConstraint::LowerBoundary(Width::Fixed(8)),
        ColumnConstraint::LowerBoundary(Width::Fixed(8)),
        ColumnConstraint::LowerBoundary(Width::Fixed(9)),
        ColumnConstraint::UpperBoundary(Width::Percentage(70)),
    ]);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn bits_cell(bits: Option<(usize, usize)>) -> Cell {
    match bits {
        Some((start, end)) if start == end => Cell::new(start),
        Some((start, end)) => Cell::new(format!("{start}-{end}")),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
