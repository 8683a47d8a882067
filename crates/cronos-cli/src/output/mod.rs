use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// A response that knows how to lay itself out as table rows.
pub trait Tabular {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

/// Print a single serializable response. Tables show one `key value` row
/// per field.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

/// Print a list of rows.
pub fn output_rows<T: Serialize + Tabular>(rows: &[T], format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render_rows(rows, format)?);
    Ok(())
}

pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => {
            let rows = match serde_json::to_value(value)? {
                Value::Object(map) => map
                    .into_iter()
                    .map(|(key, value)| vec![key, value_to_cell(&value)])
                    .collect(),
                scalar => vec![vec![String::from("value"), value_to_cell(&scalar)]],
            };
            Ok(table::render_table(&["key", "value"], &rows, table_options()))
        }
    }
}

pub fn render_rows<T: Serialize + Tabular>(
    rows: &[T],
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Raw => Ok(serde_json::to_string(rows)?),
        OutputFormat::Table if rows.is_empty() => Ok(String::from("(no rows)")),
        OutputFormat::Table => {
            let cells = rows.iter().map(Tabular::cells).collect::<Vec<_>>();
            Ok(table::render_table(T::HEADERS, &cells, table_options()))
        }
    }
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

/// `-` for `None`, for optional table cells.
pub fn cell<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| String::from("-"), |v| v.to_string())
}
