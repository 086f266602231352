//! Mermaid erDiagram output.

use crate::schema::DataDictionary;

/// Mermaid ERD notation for a foreign key: many rows to exactly one parent
const MANY_TO_ONE: &str = "}|--||";

/// Generate a fenced Mermaid erDiagram block for the dictionary.
///
/// Every table becomes an entity listing its columns; every foreign key
/// becomes a relationship line. Relationships are neither deduplicated nor
/// checked against the tables that were collected.
pub fn render_diagram(dictionary: &DataDictionary) -> String {
    let mut output = String::new();

    output.push_str("```mermaid\n");
    output.push_str("erDiagram\n");

    for table in dictionary {
        output.push_str(&format!("    {} {{\n", table.name));

        for col in &table.columns {
            let nullability = if col.is_nullable() { "NULL" } else { "NOT NULL" };
            output.push_str(&format!(
                "        {} {} {}\n",
                col.col_type.as_deref().unwrap_or_default(),
                col.name,
                nullability
            ));
        }

        output.push_str("    }\n");
    }

    for table in dictionary {
        for fk in &table.foreign_keys {
            output.push_str(&format!(
                "    {} {} {} : \"{} -> {}\"\n",
                table.name,
                MANY_TO_ONE,
                fk.referenced_table_name,
                fk.column_name,
                fk.referenced_column_name
            ));
        }
    }

    output.push_str("```\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::introspect::{ColumnAttributes, ForeignKeyDescriptor, TableDescription};
    use crate::schema::TableDocument;

    fn create_test_dictionary() -> DataDictionary {
        let users = TableDocument::new(
            "users",
            TableDescription::new()
                .with_column("id", ColumnAttributes::new("INT").primary_key())
                .with_column("email", ColumnAttributes::new("VARCHAR(255)")),
            vec![],
            vec![],
        );
        let orders = TableDocument::new(
            "orders",
            TableDescription::new()
                .with_column("id", ColumnAttributes::new("INT").primary_key())
                .with_column("user_id", ColumnAttributes::new("INT"))
                .with_column("approver_id", ColumnAttributes::new("INT")),
            vec![
                ForeignKeyDescriptor::new("user_id", "users", "id"),
                ForeignKeyDescriptor::new("approver_id", "users", "id"),
                ForeignKeyDescriptor::new("warehouse_id", "inventory.warehouses", "id"),
            ],
            vec![],
        );
        vec![users, orders].into_iter().collect()
    }

    #[test]
    fn test_mermaid_er_diagram() {
        let output = render_diagram(&create_test_dictionary());

        assert!(output.starts_with("```mermaid\nerDiagram\n"));
        assert!(output.ends_with("```\n"));
        assert!(output.contains("    users {\n"));
        assert!(output.contains("    orders {\n"));
    }

    #[test]
    fn test_mermaid_columns() {
        let output = render_diagram(&create_test_dictionary());

        assert!(output.contains("        INT id NOT NULL\n"));
        assert!(output.contains("        VARCHAR(255) email NULL\n"));
    }

    #[test]
    fn test_mermaid_relationships_after_entities() {
        let output = render_diagram(&create_test_dictionary());

        let last_entity = output.rfind("    }\n").unwrap();
        let first_relation = output.find("}|--||").unwrap();
        assert!(last_entity < first_relation);

        // one line per foreign key, even for the same pair of tables
        assert!(output.contains("    orders }|--|| users : \"user_id -> id\"\n"));
        assert!(output.contains("    orders }|--|| users : \"approver_id -> id\"\n"));
        // unknown targets are emitted as-is
        assert!(output.contains("orders }|--|| inventory.warehouses : \"warehouse_id -> id\""));
    }

    #[test]
    fn test_mermaid_empty() {
        let output = render_diagram(&DataDictionary::new());
        assert_eq!(output, "```mermaid\nerDiagram\n```\n");
    }
}
