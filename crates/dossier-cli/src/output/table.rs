const MIN_COLUMN_WIDTH: usize = 6;
const COLUMN_GAP: &str = "  ";

#[derive(Clone, Copy, Debug, Default)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Aligned plain-text table over string cells.
#[derive(Clone, Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    #[must_use]
    pub fn render(&self, options: TableOptions) -> String {
        let mut widths = self.natural_widths();
        self.shrink_to_fit(&mut widths, options.max_width);

        let header_line = self
            .headers
            .iter()
            .zip(&widths)
            .map(|(header, &width)| pad(&truncate(header, width), width, false, false))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP);

        let mut lines = vec![
            header_line.trim_end().to_string(),
            "-".repeat(widths.iter().sum::<usize>() + gaps(widths.len())),
        ];

        for row in &self.rows {
            let line = widths
                .iter()
                .enumerate()
                .map(|(idx, &width)| {
                    let cell = truncate(row.get(idx).map_or("-", String::as_str), width);
                    let numeric = looks_numeric(&cell);
                    let cell = if options.color { colorize(&cell) } else { cell };
                    pad(&cell, width, numeric, options.color)
                })
                .collect::<Vec<_>>()
                .join(COLUMN_GAP);
            lines.push(line.trim_end().to_string());
        }

        lines.join("\n")
    }

    fn natural_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .chain([header.chars().count(), MIN_COLUMN_WIDTH])
                    .max()
                    .unwrap_or(MIN_COLUMN_WIDTH)
            })
            .collect()
    }

    /// Narrow the widest shrinkable column one character at a time.
    fn shrink_to_fit(&self, widths: &mut [usize], max_width: Option<usize>) {
        let Some(max_width) = max_width else {
            return;
        };
        let floor = |idx: usize| self.headers[idx].chars().count().max(MIN_COLUMN_WIDTH);

        while widths.iter().sum::<usize>() + gaps(widths.len()) > max_width {
            let widest = widths
                .iter()
                .enumerate()
                .filter(|&(idx, &width)| width > floor(idx))
                .max_by_key(|&(_, &width)| width)
                .map(|(idx, _)| idx);
            let Some(idx) = widest else {
                break;
            };
            widths[idx] -= 1;
        }
    }
}

const fn gaps(columns: usize) -> usize {
    columns.saturating_sub(1) * COLUMN_GAP.len()
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | ','))
}

fn pad(value: &str, width: usize, right_align: bool, has_ansi: bool) -> String {
    let visible = if has_ansi {
        strip_ansi(value).chars().count()
    } else {
        value.chars().count()
    };
    let fill = " ".repeat(width.saturating_sub(visible));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

/// Green for passing states, yellow for constrained ones, red for halts.
fn colorize(value: &str) -> String {
    let code = match value.to_ascii_lowercase().as_str() {
        "true" | "pass" | "full" | "locked" => "32",
        "constrained" | "partial" => "33",
        "false" | "fail" | "halt" | "halted" | "not_locked" | "not locked" => "31",
        _ => return value.to_string(),
    };
    format!("\u{1b}[{code}m{value}\u{1b}[0m")
}

fn strip_ansi(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' && chars.peek() == Some(&'[') {
            chars.by_ref().find(|&next| next == 'm');
            continue;
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(["gate", "passed", "details"]);
        table.push_row(vec!["VISIBILITY_SWEEP".into(), "true".into(), "16 rows".into()]);
        table.push_row(vec!["ENTITY_LOCK".into(), "false".into(), "Score 40/100 — NOT LOCKED.".into()]);
        table
    }

    #[test]
    fn header_divider_and_rows() {
        let out = sample().render(TableOptions::default());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("gate"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[3].contains("NOT LOCKED"));
    }

    #[test]
    fn narrow_terminal_truncates_widest_column() {
        let out = sample().render(TableOptions {
            max_width: Some(40),
            color: false,
        });
        assert!(out.lines().all(|line| line.chars().count() <= 40));
        assert!(out.contains('…'));
    }

    #[test]
    fn color_codes_do_not_break_alignment() {
        let plain = sample().render(TableOptions::default());
        let colored = sample().render(TableOptions {
            max_width: None,
            color: true,
        });
        assert!(colored.contains("\u{1b}[31mfalse"));
        assert_eq!(strip_ansi(&colored), plain);
    }

    #[test]
    fn missing_cells_render_as_dash() {
        let mut table = Table::new(["a", "b"]);
        table.push_row(vec!["only".into()]);
        assert!(table.render(TableOptions::default()).lines().nth(2).is_some_and(|l| l.ends_with('-')));
    }
}
