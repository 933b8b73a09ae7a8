use super::{
    table::{Table, TableColumn},
    ViewOptions,
};
use crate::{
    core::services::SummaryService,
    domain::{Bucket, Period},
};

/// Salary, spent, and remaining per bucket for the active period.
pub fn render_summary(period: &Period, options: &ViewOptions) -> Vec<String> {
    let summary = SummaryService::compute(period);
    let mut lines = vec![format!("Started {}", options.timestamp(period.start_date))];

    let mut table = Table::new(vec![
        TableColumn::left("Bucket"),
        TableColumn::right("Salary"),
        TableColumn::right("Spent"),
        TableColumn::right("Remaining"),
    ]);
    for bucket in Bucket::ALL {
        let totals = summary.bucket(bucket);
        table.push_row(vec![
            bucket.to_string(),
            options.amount(totals.salary),
            options.amount(totals.spent),
            options.amount(totals.remaining),
        ]);
    }
    lines.extend(table.render_lines());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Expense;
    use chrono::Utc;

    #[test]
    fn shows_negative_remaining() {
        let mut period = Period::new(0, 100, Utc::now());
        period
            .expenses
            .push(Expense::new("coffee", 15000, Bucket::Hot, Utc::now()));
        let lines = render_summary(&period, &ViewOptions::default());
        let hot = lines.iter().find(|line| line.starts_with("hot")).unwrap();
        assert!(hot.contains("Rp 15000"), "{hot}");
        assert!(hot.ends_with("Rp -15000"), "{hot}");
        let cold = lines.iter().find(|line| line.starts_with("cold")).unwrap();
        assert!(cold.ends_with("Rp 100"), "{cold}");
    }
}
