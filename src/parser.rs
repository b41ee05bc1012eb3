//! CSV loader for the raw order dataset.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::error::LoadError;
use crate::schema;

/// One row of the input file, every field kept as the text it was read as.
///
/// Values are not trimmed on read: the missing-value sentinel carries a
/// trailing space and is matched exactly during cleaning.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawOrder {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Delivery_person_ID")]
    pub courier_id: String,
    #[serde(rename = "Delivery_person_Age")]
    pub courier_age: String,
    #[serde(rename = "Delivery_person_Ratings")]
    pub courier_rating: String,
    #[serde(rename = "Restaurant_latitude")]
    pub restaurant_latitude: String,
    #[serde(rename = "Restaurant_longitude")]
    pub restaurant_longitude: String,
    #[serde(rename = "Delivery_location_latitude")]
    pub delivery_latitude: String,
    #[serde(rename = "Delivery_location_longitude")]
    pub delivery_longitude: String,
    #[serde(rename = "Order_Date")]
    pub order_date: String,
    #[serde(rename = "Weatherconditions")]
    pub weather: String,
    #[serde(rename = "Road_traffic_density")]
    pub traffic_density: String,
    #[serde(rename = "Vehicle_condition")]
    pub vehicle_condition: String,
    #[serde(rename = "Type_of_order")]
    pub order_type: String,
    #[serde(rename = "Type_of_vehicle")]
    pub vehicle_type: String,
    #[serde(rename = "multiple_deliveries")]
    pub multiple_deliveries: String,
    #[serde(rename = "Festival")]
    pub festival: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Time_taken(min)")]
    pub duration: String,
}

/// Reads the order file at `path`.
///
/// # Errors
///
/// Fails if the file cannot be opened, a required column is missing from the
/// header row, or a row is not valid CSV.
#[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_orders(path: impl AsRef<Path>) -> Result<Vec<RawOrder>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let rows = read_orders(file)?;
    info!(rows = rows.len(), "Order file loaded");
    Ok(rows)
}

/// Reads raw orders from any CSV source, validating the header row first.
///
/// Header names are trimmed before validation; field values are not.
pub fn read_orders<R: Read>(reader: R) -> Result<Vec<RawOrder>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    schema::validate_headers(headers.iter())?;
    debug!(columns = headers.len(), "Header row validated");

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let record: RawOrder = result?;
        rows.push(record);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;

    const HEADER: &str = "ID,Delivery_person_ID,Delivery_person_Age,Delivery_person_Ratings,\
Restaurant_latitude,Restaurant_longitude,Delivery_location_latitude,Delivery_location_longitude,\
Order_Date,Time_Orderd,Weatherconditions,Road_traffic_density,Vehicle_condition,Type_of_order,\
Type_of_vehicle,multiple_deliveries,Festival,City,Time_taken(min)";

    const ROW: &str = "0x4607 ,INDORES13DEL02 ,37,4.9,22.745049,75.892471,22.765049,75.912471,\
19-03-2022,11:30:00,conditions Sunny,High ,2,Snack ,motorcycle ,0,No ,Urban ,(min) 24";

    #[test]
    fn test_read_orders_keeps_raw_text() {
        let csv = format!("{}\n{}\n", HEADER, ROW);
        let rows = read_orders(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "0x4607 ");
        assert_eq!(rows[0].traffic_density, "High ");
        assert_eq!(rows[0].duration, "(min) 24");
    }

    #[test]
    fn test_read_orders_empty_body() {
        let csv = format!("{}\n", HEADER);
        let rows = read_orders(csv.as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_read_orders_missing_column_is_fatal() {
        let header = HEADER.replace(",City", "");
        let row = ROW.replace(",Urban ", "");
        let csv = format!("{}\n{}\n", header, row);

        match read_orders(csv.as_bytes()) {
            Err(LoadError::Schema(SchemaError::MissingColumns(cols))) => {
                assert_eq!(cols, vec!["City".to_string()]);
            }
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_read_orders_padded_header_name() {
        let header = HEADER.replace(",City,", ",City ,");
        let csv = format!("{}\n{}\n", header, ROW);
        let rows = read_orders(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].city, "Urban ");
    }

    #[test]
    fn test_read_orders_misspelled_header_is_schema_error() {
        let header = HEADER.replace(",City,", ",Town,");
        let csv = format!("{}\n{}\n", header, ROW);

        assert!(matches!(
            read_orders(csv.as_bytes()),
            Err(LoadError::Schema(SchemaError::MissingColumns(_)))
        ));
    }

    #[test]
    fn test_load_orders_missing_file() {
        let result = load_orders("does/not/exist.csv");
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }
}
