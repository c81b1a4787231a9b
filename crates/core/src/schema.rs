//! Table definitions for the two persisted record types.
//!
//! The DDL text lives in `db/schema/*.sql` and is embedded here; the column
//! lists below mirror it so insert statements and tests can refer to the
//! same layout.

use serde::Serialize;

use crate::zones::ZoneSchema;

pub const ORDERS_TABLE: &str = "customer_orders";
pub const ZONES_TABLE: &str = "geo_zones";

const CUSTOMER_ORDERS_DDL: &str = include_str!("../../../db/schema/customer_orders.sql");
const GEO_ZONES_POLYGON_DDL: &str = include_str!("../../../db/schema/geo_zones_polygon.sql");
const GEO_ZONES_RADIUS_DDL: &str = include_str!("../../../db/schema/geo_zones_radius.sql");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnType {
    Text,
    Double,
    Int,
    Timestamp,
}

impl ColumnType {
    pub fn sql_name(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Double => "DOUBLE PRECISION",
            Self::Int => "INT",
            Self::Timestamp => "TIMESTAMP",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
}

const fn col(name: &'static str, ty: ColumnType) -> Column {
    Column { name, ty }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [Column],
    pub primary_index: &'static str,
    #[serde(skip)]
    pub ddl: &'static str,
}

pub const CUSTOMER_ORDERS: TableSchema = TableSchema {
    name: ORDERS_TABLE,
    columns: &[
        col("order_id", ColumnType::Text),
        col("customer_id", ColumnType::Text),
        col("order_date", ColumnType::Timestamp),
        col("customer_lat", ColumnType::Double),
        col("customer_lon", ColumnType::Double),
        col("order_value", ColumnType::Double),
        col("store_id", ColumnType::Text),
        col("store_lat", ColumnType::Double),
        col("store_lon", ColumnType::Double),
        col("delivery_time_minutes", ColumnType::Int),
    ],
    primary_index: "order_id",
    ddl: CUSTOMER_ORDERS_DDL,
};

pub const GEO_ZONES_POLYGON: TableSchema = TableSchema {
    name: ZONES_TABLE,
    columns: &[
        col("zone_id", ColumnType::Text),
        col("zone_name", ColumnType::Text),
        col("zone_type", ColumnType::Text),
        col("center_lat", ColumnType::Double),
        col("center_lon", ColumnType::Double),
        col("polygon_wkt", ColumnType::Text),
    ],
    primary_index: "zone_id",
    ddl: GEO_ZONES_POLYGON_DDL,
};

pub const GEO_ZONES_RADIUS: TableSchema = TableSchema {
    name: ZONES_TABLE,
    columns: &[
        col("zone_id", ColumnType::Text),
        col("zone_name", ColumnType::Text),
        col("zone_type", ColumnType::Text),
        col("zone_lat", ColumnType::Double),
        col("zone_lon", ColumnType::Double),
        col("zone_radius", ColumnType::Double),
    ],
    primary_index: "zone_id",
    ddl: GEO_ZONES_RADIUS_DDL,
};

/// `geo_zones` layout for a schema variant.
pub fn zones_table(schema: ZoneSchema) -> &'static TableSchema {
    match schema {
        ZoneSchema::Polygon => &GEO_ZONES_POLYGON,
        ZoneSchema::Radius => &GEO_ZONES_RADIUS,
    }
}

/// DDL statements for both tables, orders first.
pub fn all_ddl(schema: ZoneSchema) -> [&'static str; 2] {
    [CUSTOMER_ORDERS.ddl, zones_table(schema).ddl]
}

impl TableSchema {
    /// Comma-separated column names in declaration order.
    pub fn column_list(&self) -> String {
        self.columns
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pull `(name, type)` pairs out of the embedded DDL body.
    fn parse_columns(ddl: &str) -> Vec<(String, String)> {
        let start = ddl.find('(').unwrap() + 1;
        let end = ddl.rfind(')').unwrap();
        ddl[start..end]
            .split(',')
            .map(|line| {
                let line = line.trim();
                let (name, ty) = line.split_once(char::is_whitespace).unwrap();
                (name.to_string(), ty.trim().to_string())
            })
            .collect()
    }

    fn assert_matches_ddl(table: &TableSchema) {
        let parsed = parse_columns(table.ddl);
        assert_eq!(parsed.len(), table.columns.len(), "{}", table.name);
        for (column, (name, ty)) in table.columns.iter().zip(parsed) {
            assert_eq!(column.name, name);
            assert_eq!(column.ty.sql_name(), ty);
        }
        assert!(table
            .ddl
            .contains(&format!("PRIMARY INDEX {}", table.primary_index)));
        assert!(table
            .ddl
            .contains(&format!("CREATE TABLE IF NOT EXISTS {}", table.name)));
    }

    #[test]
    fn orders_columns_match_ddl() {
        assert_matches_ddl(&CUSTOMER_ORDERS);
    }

    #[test]
    fn zone_variants_match_ddl() {
        assert_matches_ddl(&GEO_ZONES_POLYGON);
        assert_matches_ddl(&GEO_ZONES_RADIUS);
    }

    #[test]
    fn primary_index_is_first_column() {
        for table in [&CUSTOMER_ORDERS, &GEO_ZONES_POLYGON, &GEO_ZONES_RADIUS] {
            assert_eq!(table.columns[0].name, table.primary_index);
        }
    }

    #[test]
    fn column_list_joins_names() {
        assert_eq!(
            GEO_ZONES_RADIUS.column_list(),
            "zone_id, zone_name, zone_type, zone_lat, zone_lon, zone_radius"
        );
    }
}
