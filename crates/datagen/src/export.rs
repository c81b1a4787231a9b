//! CSV output shaped like the two tables, for bulk loading with external
//! tooling or for inspection.

use std::io::Write;

use geodemo_core::orders::Order;
use geodemo_core::schema::zones_table;
use geodemo_core::zones::{Zone, ZoneSchema, ZoneShape};

use crate::error::DatagenError;

/// Write orders with a header row; columns follow `customer_orders`.
pub fn write_orders<W: Write>(writer: W, orders: &[Order]) -> Result<(), DatagenError> {
    let mut csv = csv::Writer::from_writer(writer);
    for order in orders {
        csv.serialize(order)?;
    }
    csv.flush()?;
    Ok(())
}

/// Write zones in the column layout of the given `geo_zones` variant.
pub fn write_zones<W: Write>(
    writer: W,
    zones: &[Zone],
    schema: ZoneSchema,
) -> Result<(), DatagenError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(zones_table(schema).columns.iter().map(|c| c.name))?;

    for zone in zones {
        let zone = zone.clone().for_schema(schema)?;
        let center = zone.center();
        let shape = match &zone.shape {
            ZoneShape::Polygon { wkt, .. } => wkt.clone(),
            ZoneShape::Circle { radius_km, .. } => radius_km.to_string(),
        };
        csv.write_record([
            zone.zone_id.clone(),
            zone.zone_name.clone(),
            zone.zone_type.to_string(),
            center.lat.to_string(),
            center.lon.to_string(),
            shape,
        ])?;
    }
    csv.flush()?;
    Ok(())
}
