/// Order timestamps are stored without a zone (Firebolt `TIMESTAMP`).
pub type Timestamp = chrono::NaiveDateTime;

/// Format used for timestamp literals and CSV output.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Serde adapter writing timestamps as `YYYY-MM-DD HH:MM:SS`.
pub mod timestamp_format {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{Timestamp, TIMESTAMP_FORMAT};

    pub fn serialize<S: Serializer>(value: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Deserialize a boolean that may arrive as `true`/`false`, `1`/`0` or
/// `"t"`/`"f"`, depending on how the engine renders `BOOLEAN` columns.
pub mod flexible_bool {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Bool(b) => Ok(b),
            Value::Number(n) => Ok(n.as_f64().is_some_and(|v| v != 0.0)),
            Value::String(s) => match s.to_ascii_lowercase().as_str() {
                "true" | "t" | "1" => Ok(true),
                "false" | "f" | "0" => Ok(false),
                other => Err(serde::de::Error::custom(format!(
                    "invalid boolean value '{other}'"
                ))),
            },
            other => Err(serde::de::Error::custom(format!(
                "invalid boolean value {other}"
            ))),
        }
    }
}
