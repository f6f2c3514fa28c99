//! Table schema and record definitions
//!
//! A schema is an ordered mapping of column name to type descriptor. It is
//! persisted as a JSON object whose key order is the column order.

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

use crate::types::{DescriptorError, TypeDescriptor};

/// One row: column name to JSON value, insertion order preserved.
pub type Record = Map<String, Value>;

/// Conventional primary key column
pub const ID_COLUMN: &str = "id";

/// A declared column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub descriptor: TypeDescriptor,
}

/// Ordered column declarations for one table.
///
/// An empty schema declares nothing and therefore accepts records of any
/// shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style column declaration
    pub fn with_column(mut self, name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        self.insert(name, descriptor);
        self
    }

    /// Declares a column. Redeclaring a column replaces its descriptor and
    /// keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, descriptor: TypeDescriptor) {
        let name = name.into();
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.descriptor = descriptor,
            None => self.columns.push(Column { name, descriptor }),
        }
    }

    /// Builds a schema from a JSON object of rendered descriptors, e.g.
    /// `{"id": "INT(10)", "name": "VARCHAR(255)"}`.
    pub fn from_specs(specs: &Map<String, Value>) -> Result<Self, (String, DescriptorError)> {
        let mut schema = Schema::new();
        for (name, spec) in specs {
            let rendered = spec.as_str().ok_or_else(|| {
                (
                    name.clone(),
                    DescriptorError::UnknownType(spec.to_string()),
                )
            })?;
            let descriptor = rendered
                .parse::<TypeDescriptor>()
                .map_err(|e| (name.clone(), e))?;
            schema.insert(name.clone(), descriptor);
        }
        Ok(schema)
    }

    /// Returns the descriptor declared for a column
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.descriptor)
    }

    /// Checks whether a column is declared
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Columns in declaration order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, TypeDescriptor)> for Schema {
    fn from_iter<I: IntoIterator<Item = (N, TypeDescriptor)>>(iter: I) -> Self {
        let mut schema = Schema::new();
        for (name, descriptor) in iter {
            schema.insert(name, descriptor);
        }
        schema
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for column in &self.columns {
            map.serialize_entry(&column.name, &column.descriptor)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SchemaVisitor;

        impl<'de> Visitor<'de> for SchemaVisitor {
            type Value = Schema;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of column names to column types")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Schema, A::Error> {
                let mut schema = Schema::new();
                while let Some((name, descriptor)) =
                    access.next_entry::<String, TypeDescriptor>()?
                {
                    if schema.contains(&name) {
                        return Err(de::Error::custom(format!(
                            "duplicate column '{}'",
                            name
                        )));
                    }
                    schema.insert(name, descriptor);
                }
                Ok(schema)
            }
        }

        deserializer.deserialize_map(SchemaVisitor)
    }
}
