//! Data dictionary model.
//!
//! This module provides:
//! - The per-table document assembled from introspection results
//! - The ordered dictionary of all tables
//! - Collection from a [`SchemaIntrospector`](crate::introspect::SchemaIntrospector)
//! - Normalization into the structured form shared by the JSON and YAML renderers

mod collect;
mod normalize;

pub use collect::*;
pub use normalize::*;

use crate::introspect::{ColumnAttributes, ForeignKeyDescriptor, TableDescription};
use ahash::AHashMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Column definition within a table.
///
/// Attributes the driver did not report stay `None` and are left out when
/// serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    /// Column name, unique within the table
    pub name: String,
    /// Driver-reported type name
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub col_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_null: Option<bool>,
    /// `Some(Value::Null)` when the driver sent an explicit `null`
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<bool>,
}

impl ColumnDescriptor {
    pub fn from_attributes(name: &str, attributes: &ColumnAttributes) -> Self {
        Self {
            name: name.to_string(),
            col_type: attributes.col_type().map(str::to_string),
            allow_null: attributes.allow_null(),
            default_value: attributes.default_value_raw().cloned(),
            primary_key: attributes.is_primary_key(),
        }
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key.unwrap_or(false)
    }

    pub fn is_nullable(&self) -> bool {
        self.allow_null.unwrap_or(false)
    }

    /// The default, treating an explicit `null` as no default
    pub fn effective_default(&self) -> Option<&Value> {
        self.default_value.as_ref().filter(|v| !v.is_null())
    }
}

/// Deserialize a present field as `Some`, keeping an explicit `null`
pub(crate) fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Everything known about one table
#[derive(Debug, Clone, PartialEq)]
pub struct TableDocument {
    /// Table name
    pub name: String,
    /// Raw describe-table result
    pub table_info: TableDescription,
    /// Column definitions in order
    pub columns: Vec<ColumnDescriptor>,
    /// Foreign key references, as reported
    pub foreign_keys: Vec<ForeignKeyDescriptor>,
    /// Index listing, as reported
    pub indexes: Vec<Value>,
    /// Columns with `primary_key` set, in column order
    pub primary_keys: Vec<ColumnDescriptor>,
}

impl TableDocument {
    /// Build a document from the three introspection results of a table.
    ///
    /// Columns follow the description's order and the primary key list is
    /// derived from them.
    pub fn new(
        name: impl Into<String>,
        table_info: TableDescription,
        foreign_keys: Vec<ForeignKeyDescriptor>,
        indexes: Vec<Value>,
    ) -> Self {
        let columns: Vec<ColumnDescriptor> = table_info
            .iter()
            .map(|c| ColumnDescriptor::from_attributes(&c.name, &c.attributes))
            .collect();
        let primary_keys = columns
            .iter()
            .filter(|c| c.is_primary_key())
            .cloned()
            .collect();

        Self {
            name: name.into(),
            table_info,
            columns,
            foreign_keys,
            indexes,
            primary_keys,
        }
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// First foreign key declared on the named column
    pub fn foreign_key_for(&self, column: &str) -> Option<&ForeignKeyDescriptor> {
        self.foreign_keys.iter().find(|fk| fk.column_name == column)
    }

    /// Names of the primary key columns
    pub fn primary_key_names(&self) -> Vec<&str> {
        self.primary_keys.iter().map(|c| c.name.as_str()).collect()
    }
}

impl Serialize for TableDocument {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(5))?;
        map.serialize_entry("tableInfo", &self.table_info)?;
        map.serialize_entry("columns", &self.columns)?;
        map.serialize_entry("foreignKeys", &self.foreign_keys)?;
        map.serialize_entry("indexes", &self.indexes)?;
        map.serialize_entry("primaryKeys", &self.primary_keys)?;
        map.end()
    }
}

/// All tables of a database, in the order they were listed
#[derive(Debug, Clone, Default)]
pub struct DataDictionary {
    /// Map from table name to position in `tables`
    index: AHashMap<String, usize>,
    tables: Vec<TableDocument>,
}

impl DataDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table; a repeated name replaces the earlier document in place
    pub fn insert(&mut self, table: TableDocument) {
        match self.index.get(&table.name) {
            Some(&pos) => self.tables[pos] = table,
            None => {
                self.index.insert(table.name.clone(), self.tables.len());
                self.tables.push(table);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&TableDocument> {
        self.index.get(name).map(|&pos| &self.tables[pos])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Iterate over tables in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &TableDocument> {
        self.tables.iter()
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }
}

impl PartialEq for DataDictionary {
    fn eq(&self, other: &Self) -> bool {
        self.tables == other.tables
    }
}

impl FromIterator<TableDocument> for DataDictionary {
    fn from_iter<T: IntoIterator<Item = TableDocument>>(iter: T) -> Self {
        let mut dictionary = DataDictionary::new();
        for table in iter {
            dictionary.insert(table);
        }
        dictionary
    }
}

impl<'a> IntoIterator for &'a DataDictionary {
    type Item = &'a TableDocument;
    type IntoIter = std::slice::Iter<'a, TableDocument>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}

impl Serialize for DataDictionary {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.tables.iter().map(|t| (&t.name, t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn users_description() -> TableDescription {
        TableDescription::new()
            .with_column("id", ColumnAttributes::new("INTEGER").primary_key())
            .with_column("name", ColumnAttributes::new("STRING").not_null())
            .with_column(
                "role",
                ColumnAttributes::new("STRING").default_value("member"),
            )
    }

    #[test]
    fn test_primary_keys_follow_column_order() {
        let description = TableDescription::new()
            .with_column("tenant_id", ColumnAttributes::new("INTEGER").primary_key())
            .with_column("label", ColumnAttributes::new("STRING"))
            .with_column("id", ColumnAttributes::new("INTEGER").primary_key());
        let table = TableDocument::new("memberships", description, vec![], vec![]);

        assert_eq!(table.primary_key_names(), vec!["tenant_id", "id"]);
        assert_eq!(table.columns.len(), 3);
    }

    #[test]
    fn test_column_descriptor_from_attributes() {
        let table = TableDocument::new("users", users_description(), vec![], vec![]);

        let role = table.column("role").unwrap();
        assert_eq!(role.col_type.as_deref(), Some("STRING"));
        assert!(role.is_nullable());
        assert_eq!(role.effective_default(), Some(&json!("member")));
        assert!(!role.is_primary_key());

        let id = table.column("id").unwrap();
        assert!(!id.is_nullable());
        assert_eq!(id.default_value, None);
    }

    #[test]
    fn test_sparse_attributes_stay_absent() {
        let attributes: ColumnAttributes =
            serde_json::from_value(json!({"type": "INTEGER", "defaultValue": null})).unwrap();
        let column = ColumnDescriptor::from_attributes("id", &attributes);

        assert_eq!(column.allow_null, None);
        assert_eq!(column.primary_key, None);
        assert_eq!(column.default_value, Some(Value::Null));
        assert_eq!(column.effective_default(), None);
        assert_eq!(
            serde_json::to_value(&column).unwrap(),
            json!({"name": "id", "type": "INTEGER", "defaultValue": null})
        );

        let back: ColumnDescriptor =
            serde_json::from_value(serde_json::to_value(&column).unwrap()).unwrap();
        assert_eq!(back, column);
    }

    #[test]
    fn test_foreign_key_first_match() {
        let fks = vec![
            ForeignKeyDescriptor::new("author_id", "users", "id"),
            ForeignKeyDescriptor::new("author_id", "accounts", "id"),
        ];
        let description =
            TableDescription::new().with_column("author_id", ColumnAttributes::new("INTEGER"));
        let table = TableDocument::new("posts", description, fks, vec![]);

        let fk = table.foreign_key_for("author_id").unwrap();
        assert_eq!(fk.referenced_table_name, "users");
        assert!(table.foreign_key_for("missing").is_none());
    }

    #[test]
    fn test_dictionary_preserves_insertion_order() {
        let dictionary: DataDictionary = ["zebra", "apple", "mango"]
            .into_iter()
            .map(|name| TableDocument::new(name, TableDescription::new(), vec![], vec![]))
            .collect();

        assert_eq!(dictionary.table_names(), vec!["zebra", "apple", "mango"]);
        assert!(dictionary.contains("apple"));
        assert!(dictionary.get("pear").is_none());
    }

    #[test]
    fn test_dictionary_serializes_all_fields() {
        let mut dictionary = DataDictionary::new();
        dictionary.insert(TableDocument::new(
            "users",
            users_description(),
            vec![],
            vec![json!({"name": "users_pkey", "unique": true})],
        ));

        let value = serde_json::to_value(&dictionary).unwrap();
        let users = &value["users"];
        assert_eq!(users["tableInfo"]["id"]["primaryKey"], json!(true));
        assert_eq!(users["columns"][1]["name"], json!("name"));
        assert_eq!(users["indexes"][0]["name"], json!("users_pkey"));
        assert_eq!(users["primaryKeys"][0]["name"], json!("id"));
        assert_eq!(users["foreignKeys"], json!([]));
    }
}
