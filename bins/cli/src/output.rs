//! Text tables for terminal output.

use prettytable::format::Alignment;
use prettytable::{Cell, Row, Table, row};
use rust_decimal::Decimal;

use ledgerbal_core::ledger::ValueField;
use ledgerbal_core::reports::{BalanceReport, FieldType, ReportRow};
use ledgerbal_core::workflow::BatchOutcome;

/// Renders the balance report with one line per account and a total line.
pub fn report_table(report: &BalanceReport) -> Table {
    let amount_columns: Vec<(&str, ValueField)> = report
        .columns
        .iter()
        .filter(|column| column.fieldtype == FieldType::Currency && !column.hidden)
        .filter_map(|column| {
            ValueField::ALL
                .into_iter()
                .find(|field| field.as_str() == column.fieldname)
                .map(|field| (column.label, field))
        })
        .collect();

    let mut table = Table::new();
    let mut header = vec![Cell::new("Account"), Cell::new("Currency")];
    header.extend(amount_columns.iter().map(|(label, _)| Cell::new(label)));
    table.set_titles(Row::new(header));

    for row in report.all_rows() {
        table.add_row(report_row(row, &amount_columns));
    }
    table
}

fn report_row(row: &ReportRow, amount_columns: &[(&str, ValueField)]) -> Row {
    let label = format!("{}{}", "  ".repeat(row.indent), row.account_name);
    let mut cells = vec![Cell::new(&label), Cell::new(&row.currency)];
    cells.extend(amount_columns.iter().map(|(_, field)| {
        Cell::new_align(&amount(row.values.get(*field)), Alignment::RIGHT)
    }));
    Row::new(cells)
}

fn amount(value: Decimal) -> String {
    if value.is_zero() {
        String::new()
    } else {
        format!("{:.2}", value.round_dp(2))
    }
}

/// Renders the per-entry outcome of an approver run.
pub fn batch_table(outcome: &BatchOutcome) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["Journal Entry", "Steps", "Result"]);

    for entry in &outcome.completed {
        let steps: Vec<&str> = entry.steps.iter().map(|step| step.as_str()).collect();
        table.add_row(row![entry.entry, steps.join(" > "), "done"]);
    }
    if let Some(err) = &outcome.failure {
        table.add_row(row!["", "", err.to_string()]);
    }
    table
}
