use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

use table::{Table, TableOptions};

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(render_table(&serde_json::to_value(value)?, table_options())),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> TableOptions {
    let prefs = ui::prefs();
    TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

/// Objects become key/value rows (nested arrays of objects get their own
/// section below); arrays of objects become one column per key.
fn render_table(value: &Value, options: TableOptions) -> String {
    match value {
        Value::Array(items) => render_rows(items, options),
        Value::Object(map) => {
            let mut summary = Table::new(["key", "value"]);
            let mut sections = Vec::new();
            for (key, value) in map {
                match value {
                    Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
                        sections.push(format!("{key}:\n{}", render_rows(items, options)));
                    }
                    other => summary.push_row(vec![key.clone(), value_to_cell(other)]),
                }
            }
            std::iter::once(summary.render(options))
                .chain(sections)
                .collect::<Vec<_>>()
                .join("\n\n")
        }
        scalar => {
            let mut table = Table::new(["value"]);
            table.push_row(vec![value_to_cell(scalar)]);
            table.render(options)
        }
    }
}

fn render_rows(items: &[Value], options: TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let mut table = Table::new(["value"]);
        for item in items {
            table.push_row(vec![value_to_cell(item)]);
        }
        return table.render(options);
    }

    let mut headers = Vec::<String>::new();
    for key in items.iter().filter_map(Value::as_object).flat_map(|map| map.keys()) {
        if !headers.contains(key) {
            headers.push(key.clone());
        }
    }

    let mut table = Table::new(headers.iter().map(String::as_str));
    for map in items.iter().filter_map(Value::as_object) {
        table.push_row(
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect(),
        );
    }
    table.render(options)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.lines().next().unwrap_or_default().to_string(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
