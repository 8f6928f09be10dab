//! Table Renderer - fixed-width bordered text grids
//!
//! Rendering is two pure passes:
//!
//! 1. [`column_widths`] takes the maximum printable width per column over
//!    every header row and body row.
//! 2. [`Table::render_with`] draws the grid for a given set of widths.
//!
//! ```text
//! +---------+--------+
//! | Dataset | PEMS04 |
//! +---------+--------+
//! | STID    |  18.51 |
//! +---------+--------+
//! ```
//!
//! The renderer knows nothing about metrics; it only sees strings.

/// Horizontal alignment of a cell within its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Pad on the right.
    #[default]
    Left,
    /// Pad on the left.
    Right,
    /// Pad on both sides. An odd remainder goes to the left when the
    /// target width is odd and to the right when it is even.
    Center,
}

impl Align {
    /// Pad `text` to `width` printable characters.
    #[must_use]
    pub fn pad(self, text: &str, width: usize) -> String {
        match self {
            Self::Left => format!("{text:<width$}"),
            Self::Right => format!("{text:>width$}"),
            Self::Center => {
                let margin = width.saturating_sub(text.chars().count());
                let left = margin / 2 + (margin & width & 1);
                format!("{}{text}{}", " ".repeat(left), " ".repeat(margin - left))
            }
        }
    }
}

#[derive(Debug, Clone)]
struct HeaderRow {
    cells: Vec<String>,
    align: Align,
}

/// A text table with any number of header rows and per-column body alignment.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<HeaderRow>,
    aligns: Vec<Align>,
    body: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table whose body columns use `aligns`.
    ///
    /// Columns beyond the end of `aligns` are left-aligned.
    #[must_use]
    pub fn new(aligns: Vec<Align>) -> Self {
        Self {
            headers: Vec::new(),
            aligns,
            body: Vec::new(),
        }
    }

    /// Append a header row whose cells all share one alignment.
    #[must_use]
    pub fn with_header<S: Into<String>>(mut self, cells: impl IntoIterator<Item = S>, align: Align) -> Self {
        self.push_header(cells, align);
        self
    }

    /// Append a header row whose cells all share one alignment.
    pub fn push_header<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>, align: Align) {
        self.headers.push(HeaderRow {
            cells: cells.into_iter().map(Into::into).collect(),
            align,
        });
    }

    /// Append a body row.
    pub fn push_row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) {
        self.body.push(cells.into_iter().map(Into::into).collect());
    }

    /// Number of body rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.body.len()
    }

    /// Body cells, row by row.
    #[must_use]
    pub fn body(&self) -> &[Vec<String>] {
        &self.body
    }

    /// Column widths over headers and body (first pass).
    #[must_use]
    pub fn widths(&self) -> Vec<usize> {
        column_widths(
            self.headers
                .iter()
                .map(|h| h.cells.as_slice())
                .chain(self.body.iter().map(Vec::as_slice)),
        )
    }

    /// Render with widths computed from the table's own contents.
    #[must_use]
    pub fn render(&self) -> String {
        self.render_with(&self.widths())
    }

    /// Render with caller-supplied widths (second pass).
    ///
    /// Cells missing from short rows render as empty. A table with no
    /// columns renders as an empty string.
    #[must_use]
    pub fn render_with(&self, widths: &[usize]) -> String {
        if widths.is_empty() {
            return String::new();
        }
        let border = border_line(widths);
        let mut lines = vec![border.clone()];

        for header in &self.headers {
            lines.push(format_row(&header.cells, widths, |_| header.align));
        }
        if !self.headers.is_empty() {
            lines.push(border.clone());
        }

        for row in &self.body {
            lines.push(format_row(row, widths, |i| {
                self.aligns.get(i).copied().unwrap_or_default()
            }));
        }
        if !self.body.is_empty() {
            lines.push(border);
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

/// Maximum printable width of each column across `rows`.
///
/// Rows may be ragged; the result has one entry per column of the widest row.
#[must_use]
pub fn column_widths<'a>(rows: impl IntoIterator<Item = &'a [String]>) -> Vec<usize> {
    rows.into_iter().fold(Vec::new(), |mut widths, row| {
        if widths.len() < row.len() {
            widths.resize(row.len(), 0);
        }
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
        widths
    })
}

fn border_line(widths: &[usize]) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
    format!("+{}+", segments.join("+"))
}

fn format_row(cells: &[String], widths: &[usize], align_of: impl Fn(usize) -> Align) -> String {
    let mut line = String::from("|");
    for (i, &width) in widths.iter().enumerate() {
        let text = cells.get(i).map_or("", String::as_str);
        line.push(' ');
        line.push_str(&align_of(i).pad(text, width));
        line.push_str(" |");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_widths_ragged() {
        let a = vec!["Model".to_string(), "x".to_string()];
        let b = vec!["GWNet".to_string(), "12.50".to_string(), "9%".to_string()];
        assert_eq!(column_widths([a.as_slice(), b.as_slice()]), vec![5, 5, 2]);
    }

    #[test]
    fn test_column_widths_counts_chars_not_bytes() {
        let row = vec!["模型".to_string()];
        assert_eq!(column_widths([row.as_slice()]), vec![2]);
    }

    #[test]
    fn test_align_pad() {
        assert_eq!(Align::Left.pad("ab", 5), "ab   ");
        assert_eq!(Align::Right.pad("ab", 5), "   ab");
        assert_eq!(Align::Center.pad("ab", 5), "  ab ");
        assert_eq!(Align::Center.pad("ab", 6), "  ab  ");
        assert_eq!(Align::Center.pad("abcdef", 3), "abcdef");
    }

    #[test]
    fn test_center_odd_margin_follows_width_parity() {
        assert_eq!(Align::Center.pad("RMSE", 5), " RMSE");
        assert_eq!(Align::Center.pad("RMSE", 7), "  RMSE ");
        assert_eq!(Align::Center.pad("MAE", 4), "MAE ");
        assert_eq!(Align::Center.pad("X", 4), " X  ");
        assert_eq!(Align::Center.pad("Metric", 7), " Metric");
    }

    #[test]
    fn test_render_grid() {
        let mut table = Table::new(vec![Align::Left, Align::Right])
            .with_header(["Model", "MAE"], Align::Center);
        table.push_row(["STID", "18.51"]);
        table.push_row(["GWNet", "9.00"]);

        let expected = "\
+-------+-------+
| Model |  MAE  |
+-------+-------+
| STID  | 18.51 |
| GWNet |  9.00 |
+-------+-------+
";
        assert_eq!(table.render(), expected);
    }

    #[test]
    fn test_multi_row_header_shares_widths() {
        let mut table = Table::new(vec![Align::Left, Align::Right, Align::Right])
            .with_header(["Dataset", "PEMS04", ""], Align::Center)
            .with_header(["Metric", "MAE", "RMSE"], Align::Center);
        table.push_row(["A", "1.00", ""]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines.iter().all(|l| l.chars().count() == lines[0].chars().count()));
        assert_eq!(lines[1], "| Dataset | PEMS04 |      |");
        assert_eq!(lines[2], "|  Metric |  MAE   | RMSE |");
        assert_eq!(lines[4], "| A       |   1.00 |      |");
    }

    #[test]
    fn test_render_with_external_widths() {
        let mut table = Table::new(vec![Align::Right]);
        table.push_row(["7"]);
        assert_eq!(table.render_with(&[3]), "+-----+\n|   7 |\n+-----+\n");
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(Table::new(vec![]).render(), "");
    }
}
