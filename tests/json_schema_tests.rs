//! Rendered JSON and YAML output must validate against the generated schema.

use jsonschema::Validator;
use schema_dictionary::json_schema::dictionary_schema;
use schema_dictionary::{
    render_json, render_yaml, ColumnAttributes, DataDictionary, ForeignKeyDescriptor,
    TableDescription, TableDocument,
};
use serde_json::{json, Value};

fn load_validator() -> Validator {
    Validator::new(&dictionary_schema()).expect("Failed to compile schema")
}

fn sample_dictionary() -> DataDictionary {
    let accounts = TableDocument::new(
        "accounts",
        TableDescription::new()
            .with_column("id", ColumnAttributes::new("UUID").primary_key())
            .with_column(
                "created_at",
                ColumnAttributes::new("TIMESTAMP WITH TIME ZONE")
                    .not_null()
                    .default_value(json!({"fn": "now"})),
            )
            .with_column(
                "balance",
                ColumnAttributes::new("DECIMAL(10,2)").default_value(0),
            ),
        vec![],
        vec![json!({"name": "accounts_pkey", "primary": true, "fields": [{"attribute": "id"}]})],
    );
    let transfers = TableDocument::new(
        "transfers",
        TableDescription::new()
            .with_column("id", ColumnAttributes::new("BIGINT").primary_key())
            .with_column("from_account", ColumnAttributes::new("UUID").not_null())
            .with_column("to_account", ColumnAttributes::new("UUID").not_null()),
        vec![
            ForeignKeyDescriptor::new("from_account", "accounts", "id")
                .extra("onDelete", "CASCADE"),
            ForeignKeyDescriptor::new("to_account", "accounts", "id"),
        ],
        vec![],
    );
    vec![accounts, transfers].into_iter().collect()
}

fn assert_valid(validator: &Validator, json: &Value) {
    if let Err(error) = validator.validate(json) {
        panic!(
            "Output doesn't match dictionary schema:\n  - {}: {}\n\nOutput was:\n{}",
            error.instance_path(),
            error,
            serde_json::to_string_pretty(json).unwrap()
        );
    }
}

#[test]
fn test_json_output_matches_schema() {
    let validator = load_validator();
    let json: Value = serde_json::from_str(&render_json(&sample_dictionary())).unwrap();
    assert_valid(&validator, &json);
}

#[test]
fn test_yaml_output_matches_schema() {
    let validator = load_validator();
    let yaml: Value = serde_yaml_ng::from_str(&render_yaml(&sample_dictionary())).unwrap();
    assert_valid(&validator, &yaml);
}

#[test]
fn test_schema_rejects_missing_columns() {
    let validator = load_validator();
    let broken = json!({"accounts": {"foreignKeys": [], "indexes": []}});
    assert!(!validator.is_valid(&broken));
}

#[test]
fn test_empty_dictionary_matches_schema() {
    let validator = load_validator();
    let json: Value = serde_json::from_str(&render_json(&DataDictionary::new())).unwrap();
    assert_valid(&validator, &json);
}
