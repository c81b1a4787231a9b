//! Query result sets in Firebolt's `JSON_Compact` output format.
//!
//! ```text
//! { "meta": [{"name": "store_id", "type": "text"}, ...],
//!   "data": [["STORE_001", 12.9279, ...], ...],
//!   "rows": 8 }
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DbError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMeta {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// Column metadata plus rows of positional values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    #[serde(rename = "meta", default)]
    pub columns: Vec<ColumnMeta>,
    #[serde(rename = "data", default)]
    pub rows: Vec<Vec<Value>>,
}

impl ResultSet {
    pub fn new(columns: Vec<ColumnMeta>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Parse a `JSON_Compact` response body.
    ///
    /// DDL and `INSERT` statements answer with an empty body, which parses
    /// as an empty result set.
    pub fn from_compact(body: &str) -> Result<Self, DbError> {
        if body.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut set: ResultSet =
            serde_json::from_str(body).map_err(|e| DbError::Decode(e.to_string()))?;
        set.normalize_numbers();
        Ok(set)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Decode every row into `T` by column name.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<Vec<T>, DbError> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                if row.len() != self.columns.len() {
                    return Err(DbError::Decode(format!(
                        "row {i} has {} values for {} columns",
                        row.len(),
                        self.columns.len()
                    )));
                }
                let object: Map<String, Value> = self
                    .columns
                    .iter()
                    .zip(row)
                    .map(|(col, value)| (col.name.clone(), value.clone()))
                    .collect();
                serde_json::from_value(Value::Object(object))
                    .map_err(|e| DbError::Decode(format!("row {i}: {e}")))
            })
            .collect()
    }

    /// 64-bit integers and some decimals are rendered as JSON strings to
    /// preserve precision; turn them back into numbers for numeric columns.
    fn normalize_numbers(&mut self) {
        let numeric: Vec<bool> = self.columns.iter().map(|c| is_numeric_type(&c.ty)).collect();
        for row in &mut self.rows {
            for (value, is_numeric) in row.iter_mut().zip(&numeric) {
                if !*is_numeric {
                    continue;
                }
                if let Value::String(s) = value {
                    if let Ok(n) = s.parse::<i64>() {
                        *value = Value::from(n);
                    } else if let Some(n) = s.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
                        *value = Value::Number(n);
                    }
                }
            }
        }
    }
}

/// Matches the base type name, so `interval` or `point` never pass for
/// `int`. Nullability suffixes and precision parameters are ignored.
fn is_numeric_type(ty: &str) -> bool {
    let ty = ty.trim().to_ascii_lowercase();
    let ty = ty.strip_suffix(" null").unwrap_or(&ty);
    let base = ty.split('(').next().unwrap_or(ty).trim();
    matches!(
        base,
        "int"
            | "integer"
            | "smallint"
            | "bigint"
            | "long"
            | "float"
            | "real"
            | "double"
            | "double precision"
            | "decimal"
            | "numeric"
    )
}
