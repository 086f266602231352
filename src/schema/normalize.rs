//! Column enrichment and the structured form consumed by the JSON and YAML renderers.

use super::{ColumnDescriptor, DataDictionary, TableDocument};
use crate::introspect::ForeignKeyDescriptor;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A column together with the foreign key that applies to it, if any
#[derive(Debug, Clone, Copy)]
pub struct EnrichedColumn<'a> {
    pub column: &'a ColumnDescriptor,
    pub foreign_key: Option<&'a ForeignKeyDescriptor>,
}

impl EnrichedColumn<'_> {
    /// `"referencedTable.referencedColumn"` when the column is a foreign key
    pub fn reference(&self) -> Option<String> {
        self.foreign_key.map(ForeignKeyDescriptor::reference)
    }
}

/// Pair every column of a table with its foreign key.
///
/// Matching is by exact column name; when several foreign keys name the same
/// column, the first in declaration order wins.
pub fn enrich_columns(table: &TableDocument) -> Vec<EnrichedColumn<'_>> {
    table
        .columns
        .iter()
        .map(|column| EnrichedColumn {
            column,
            foreign_key: table.foreign_key_for(&column.name),
        })
        .collect()
}

/// Column entry of the structured form.
///
/// Attributes missing from the driver's description are omitted;
/// `foreignKey` is always present and `null` when the column has none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StructuredColumn {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub col_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_null: Option<bool>,
    #[serde(
        default,
        deserialize_with = "super::deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<Value>")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<bool>,
    pub foreign_key: Option<String>,
}

impl From<EnrichedColumn<'_>> for StructuredColumn {
    fn from(enriched: EnrichedColumn<'_>) -> Self {
        let column = enriched.column;
        Self {
            name: column.name.clone(),
            col_type: column.col_type.clone(),
            allow_null: column.allow_null,
            default_value: column.default_value.clone(),
            primary_key: column.primary_key,
            foreign_key: enriched.reference(),
        }
    }
}

/// Table entry of the structured form.
///
/// `tableInfo` and `primaryKeys` are deliberately absent; they only appear
/// in the Markdown rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StructuredTable {
    pub columns: Vec<StructuredColumn>,
    pub foreign_keys: Vec<ForeignKeyDescriptor>,
    pub indexes: Vec<Value>,
}

impl From<&TableDocument> for StructuredTable {
    fn from(table: &TableDocument) -> Self {
        Self {
            columns: enrich_columns(table)
                .into_iter()
                .map(StructuredColumn::from)
                .collect(),
            foreign_keys: table.foreign_keys.clone(),
            indexes: table.indexes.clone(),
        }
    }
}

/// Ordered mapping of table name to [`StructuredTable`].
///
/// Both the JSON and the YAML renderer serialize this one value, so the two
/// outputs always carry identical content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredDictionary {
    tables: Vec<(String, StructuredTable)>,
}

impl StructuredDictionary {
    pub fn tables(&self) -> impl Iterator<Item = (&str, &StructuredTable)> {
        self.tables.iter().map(|(name, table)| (name.as_str(), table))
    }

    pub fn get(&self, name: &str) -> Option<&StructuredTable> {
        self.tables
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, table)| table)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl Serialize for StructuredDictionary {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.tables.iter().map(|(name, table)| (name, table)))
    }
}

impl<'de> Deserialize<'de> for StructuredDictionary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DictionaryVisitor;

        impl<'de> serde::de::Visitor<'de> for DictionaryVisitor {
            type Value = StructuredDictionary;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of table name to table entry")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut tables = Vec::new();
                while let Some(entry) = access.next_entry::<String, StructuredTable>()? {
                    tables.push(entry);
                }
                Ok(StructuredDictionary { tables })
            }
        }

        deserializer.deserialize_map(DictionaryVisitor)
    }
}

/// Project a dictionary into its structured form
pub fn to_structured(dictionary: &DataDictionary) -> StructuredDictionary {
    StructuredDictionary {
        tables: dictionary
            .iter()
            .map(|table| (table.name.clone(), StructuredTable::from(table)))
            .collect(),
    }
}
