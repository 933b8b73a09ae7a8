use uuid::Uuid;

use super::{
    table::{Table, TableColumn},
    ViewOptions, PRESENT_MARKER,
};
use crate::{core::services::SummaryService, domain::Period};

/// Every period with every expense, in stored order. Positions (`n` for a
/// period, `n.m` for an expense) are what the shell commands accept.
pub fn render_history(
    periods: &[Period],
    active_id: Option<Uuid>,
    options: &ViewOptions,
) -> Vec<String> {
    if periods.is_empty() {
        return vec!["No periods recorded.".to_string()];
    }

    let mut lines = Vec::new();
    for (index, period) in periods.iter().enumerate() {
        let position = index + 1;
        if index > 0 {
            lines.push(String::new());
        }
        lines.push(period_header(position, period, active_id, options));

        if period.expenses.is_empty() {
            lines.push("    (no expenses)".to_string());
            continue;
        }

        let mut table = Table::new(vec![
            TableColumn::left("#"),
            TableColumn::left("Name"),
            TableColumn::right("Amount"),
            TableColumn::left("Bucket"),
            TableColumn::left("Date"),
        ])
        .with_indent(4);
        for (expense_index, expense) in period.expenses.iter().enumerate() {
            table.push_row(vec![
                format!("{position}.{}", expense_index + 1),
                expense.name.clone(),
                options.amount(expense.amount),
                expense.bucket.to_string(),
                options.timestamp(expense.date),
            ]);
        }
        lines.extend(table.render_lines());
    }
    lines
}

fn period_header(
    position: usize,
    period: &Period,
    active_id: Option<Uuid>,
    options: &ViewOptions,
) -> String {
    let end = period
        .end_date
        .map(|end| options.timestamp(end))
        .unwrap_or_else(|| PRESENT_MARKER.to_string());
    let (hot, cold) = SummaryService::totals(period);
    let marker = if active_id == Some(period.id) {
        " *active*"
    } else {
        ""
    };
    format!(
        "[{position}] {} → {end}{marker}  (hot {} / cold {})",
        options.timestamp(period.start_date),
        options.amount(hot),
        options.amount(cold),
    )
}
