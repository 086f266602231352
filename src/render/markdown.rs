//! Markdown data dictionary with an embedded ER diagram.

use super::mermaid::render_diagram;
use crate::schema::{enrich_columns, DataDictionary, TableDocument};
use serde::Serialize;
use serde_json::Value;

/// Generate the Markdown document: one section per table, then the diagram
pub fn render_markdown(dictionary: &DataDictionary) -> String {
    let mut output = String::new();

    output.push_str("# Data Dictionary\n\n");

    for table in dictionary {
        write_table(&mut output, table);
    }

    output.push_str("# Entity Relationship Diagram\n\n");
    output.push_str(&render_diagram(dictionary));

    output
}

fn write_table(output: &mut String, table: &TableDocument) {
    output.push_str(&format!("## {}\n\n", table.name));

    output.push_str("### Table Information\n\n");
    write_code_block(output, &table.table_info);

    output.push_str("### Columns\n\n");
    output.push_str("| Name | Type | Null | Default | Primary Key | Foreign Key |\n");
    output.push_str("|------|------|------|---------|-------------|-------------|\n");
    for enriched in enrich_columns(table) {
        let col = enriched.column;
        output.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            escape_cell(&col.name),
            escape_cell(col.col_type.as_deref().unwrap_or_default()),
            yes_no(col.is_nullable()),
            escape_cell(&format_default(col.effective_default())),
            yes_no(col.is_primary_key()),
            escape_cell(&enriched.reference().unwrap_or_default()),
        ));
    }
    output.push('\n');

    output.push_str("### Foreign Keys\n\n");
    write_code_block(output, &table.foreign_keys);

    output.push_str("### Indexes\n\n");
    write_code_block(output, &table.indexes);

    output.push_str("### Primary Keys\n\n");
    write_code_block(output, &table.primary_keys);

    output.push_str("---\n\n");
}

/// Fenced JSON block of a pass-through value
fn write_code_block<T: Serialize + ?Sized>(output: &mut String, value: &T) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string());
    output.push_str("```json\n");
    output.push_str(&json);
    output.push_str("\n```\n\n");
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "YES"
    } else {
        "NO"
    }
}

/// Strings render bare, other values as JSON, absent as empty
fn format_default(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace(['\r', '\n'], " ")
}
