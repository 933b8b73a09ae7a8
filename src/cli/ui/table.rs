/// Describes how a column aligns its contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableColumn {
    pub header: String,
    pub alignment: Alignment,
}

impl TableColumn {
    pub fn left(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            alignment: Alignment::Left,
        }
    }

    pub fn right(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            alignment: Alignment::Right,
        }
    }
}

/// A fixed-width text table rebuilt from scratch on every render.
pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
    pub show_headers: bool,
    pub indent: usize,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            show_headers: true,
            indent: 0,
        }
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Widest cell per column, headers included.
    pub fn compute_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let mut width = visible_width(&column.header);
                for row in &self.rows {
                    if let Some(cell) = row.get(idx) {
                        width = width.max(visible_width(cell));
                    }
                }
                width
            })
            .collect()
    }

    pub fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        let cells: Vec<String> = self
            .columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (column, width))| {
                let text = row.get(idx).map(String::as_str).unwrap_or("");
                pad(text, *width, column.alignment)
            })
            .collect();
        let line = format!("{}{}", " ".repeat(self.indent), cells.join("  "));
        line.trim_end().to_string()
    }

    pub fn render_lines(&self) -> Vec<String> {
        let widths = self.compute_widths();
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        if self.show_headers {
            let header: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
            lines.push(self.render_row(&header, &widths));
            let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
            lines.push(format!("{}{}", " ".repeat(self.indent), rule.join("  ")));
        }
        for row in &self.rows {
            lines.push(self.render_row(row, &widths));
        }
        lines
    }
}

fn visible_width(text: &str) -> usize {
    text.chars().count()
}

fn pad(text: &str, width: usize, alignment: Alignment) -> String {
    let fill = width.saturating_sub(visible_width(text));
    match alignment {
        Alignment::Left => format!("{text}{}", " ".repeat(fill)),
        Alignment::Right => format!("{}{text}", " ".repeat(fill)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_columns_to_widest_cell() {
        let mut table = Table::new(vec![TableColumn::left("Name"), TableColumn::right("Amount")]);
        table.push_row(vec!["coffee".into(), "5".into()]);
        table.push_row(vec!["rent".into(), "1200".into()]);
        let lines = table.render_lines();
        assert_eq!(lines[0], "Name    Amount");
        assert_eq!(lines[1], "------  ------");
        assert_eq!(lines[2], "coffee       5");
        assert_eq!(lines[3], "rent      1200");
    }

    #[test]
    fn indent_prefixes_every_line() {
        let mut table = Table::new(vec![TableColumn::left("A")]).with_indent(2);
        table.push_row(vec!["x".into()]);
        assert!(table.render_lines().iter().all(|line| line.starts_with("  ")));
    }
}
