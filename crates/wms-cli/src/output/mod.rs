use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

mod rows;
pub mod table;

pub use rows::Tabular;
pub(crate) use rows::{pct, quantity};

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

/// Render a single serializable record. Tables show it as key/value pairs.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_record(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a single serializable record in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Render a listing. Tables use the row type's own columns.
pub fn render_list<T: Serialize + Tabular>(
    items: &[T],
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
        OutputFormat::Raw => Ok(serde_json::to_string(items)?),
        OutputFormat::Table => Ok(list_table(items)),
    }
}

pub fn output_list<T: Serialize + Tabular>(
    items: &[T],
    format: OutputFormat,
) -> anyhow::Result<()> {
    let rendered = render_list(items, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print a composite view: JSON formats serialize `value`, tables use `table`.
pub fn output_view<T: Serialize>(
    value: &T,
    format: OutputFormat,
    table: impl FnOnce(&T) -> String,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => println!("{}", table(value)),
        OutputFormat::Json | OutputFormat::Raw => output(value, format)?,
    }
    Ok(())
}

/// Aligned table for a listing, `(no rows)` when empty.
#[must_use]
pub fn list_table<T: Tabular>(items: &[T]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }
    let rows = items.iter().map(Tabular::row).collect::<Vec<_>>();
    table::render_table(T::HEADERS, &rows, table_options())
}

/// Aligned table from prebuilt rows, `(no rows)` when empty.
#[must_use]
pub fn rows_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return String::from("(no rows)");
    }
    table::render_table(headers, rows, table_options())
}

/// Titled block for multi-part table views.
#[must_use]
pub fn section(title: &str, body: &str) -> String {
    format!("{title}\n{body}\n")
}

fn render_record<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    let rows = match value {
        Value::Object(map) => map
            .into_iter()
            .map(|(key, value)| vec![key, value_to_cell(&value)])
            .collect::<Vec<_>>(),
        scalar => vec![vec![String::from("value"), value_to_cell(&scalar)]],
    };
    Ok(table::render_table(&["key", "value"], &rows, table_options()))
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => String::from(if *v { "yes" } else { "no" }),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
