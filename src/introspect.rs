//! The introspection capability the collector reads schema metadata from.
//!
//! Implementations wrap whatever actually talks to the database (an ORM's
//! query interface, a driver, a captured snapshot). Every call is read-only
//! and may fail with an arbitrary error, which is propagated, not interpreted.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Read-only schema metadata source
#[async_trait]
pub trait SchemaIntrospector: Send + Sync {
    /// All table names, in the order the source reports them
    async fn list_tables(&self) -> anyhow::Result<Vec<String>>;

    /// Column metadata of a table, in column order
    async fn describe_table(&self, table: &str) -> anyhow::Result<TableDescription>;

    /// Foreign key references declared on a table
    async fn foreign_keys(&self, table: &str) -> anyhow::Result<Vec<ForeignKeyDescriptor>>;

    /// Index listing of a table, passed through unmodified
    async fn indexes(&self, table: &str) -> anyhow::Result<Vec<Value>>;
}

/// Driver-reported attributes of one column, kept exactly as received.
///
/// The well-known keys (`type`, `allowNull`, `defaultValue`, `primaryKey`)
/// are read through accessors; a key the driver did not send stays absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnAttributes(Map<String, Value>);

impl ColumnAttributes {
    /// A nullable, non-key column of the given type
    pub fn new(col_type: impl Into<String>) -> Self {
        Self::default()
            .attribute("type", col_type.into())
            .attribute("allowNull", true)
            .attribute("primaryKey", false)
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn not_null(self) -> Self {
        self.attribute("allowNull", false)
    }

    pub fn primary_key(self) -> Self {
        self.attribute("primaryKey", true).attribute("allowNull", false)
    }

    pub fn default_value(self, value: impl Into<Value>) -> Self {
        self.attribute("defaultValue", value)
    }

    /// Set any driver field (comment, autoIncrement, ...)
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn col_type(&self) -> Option<&str> {
        self.get("type").and_then(Value::as_str)
    }

    pub fn allow_null(&self) -> Option<bool> {
        self.get("allowNull").and_then(Value::as_bool)
    }

    /// The default as sent, including an explicit `null`
    pub fn default_value_raw(&self) -> Option<&Value> {
        self.get("defaultValue")
    }

    pub fn is_primary_key(&self) -> Option<bool> {
        self.get("primaryKey").and_then(Value::as_bool)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// A column name paired with its attributes
#[derive(Debug, Clone, PartialEq)]
pub struct DescribedColumn {
    pub name: String,
    pub attributes: ColumnAttributes,
}

/// Result of describing a table: column name to attributes, in column order.
///
/// Serializes as an object keyed by column name, which is how it appears as
/// `tableInfo` in rendered output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableDescription {
    columns: Vec<DescribedColumn>,
}

impl TableDescription {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column; a repeated name replaces the earlier attributes in place
    pub fn push(&mut self, name: impl Into<String>, attributes: ColumnAttributes) {
        let name = name.into();
        if let Some(existing) = self.columns.iter_mut().find(|c| c.name == name) {
            existing.attributes = attributes;
        } else {
            self.columns.push(DescribedColumn { name, attributes });
        }
    }

    pub fn with_column(mut self, name: impl Into<String>, attributes: ColumnAttributes) -> Self {
        self.push(name, attributes);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ColumnAttributes> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.attributes)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DescribedColumn> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Serialize for TableDescription {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for column in &self.columns {
            map.serialize_entry(&column.name, &column.attributes)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TableDescription {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DescriptionVisitor;

        impl<'de> serde::de::Visitor<'de> for DescriptionVisitor {
            type Value = TableDescription;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of column name to column attributes")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut description = TableDescription::new();
                while let Some((name, attributes)) =
                    access.next_entry::<String, ColumnAttributes>()?
                {
                    description.push(name, attributes);
                }
                Ok(description)
            }
        }

        deserializer.deserialize_map(DescriptionVisitor)
    }
}

/// One foreign key reference from a column of this table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKeyDescriptor {
    pub column_name: String,
    pub referenced_table_name: String,
    pub referenced_column_name: String,
    /// Driver-specific fields (constraintName, onDelete, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ForeignKeyDescriptor {
    pub fn new(
        column_name: impl Into<String>,
        referenced_table_name: impl Into<String>,
        referenced_column_name: impl Into<String>,
    ) -> Self {
        Self {
            column_name: column_name.into(),
            referenced_table_name: referenced_table_name.into(),
            referenced_column_name: referenced_column_name.into(),
            extra: Map::new(),
        }
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// `"table.column"` form of the referenced column
    pub fn reference(&self) -> String {
        format!(
            "{}.{}",
            self.referenced_table_name, self.referenced_column_name
        )
    }
}
