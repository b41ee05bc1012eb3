//! Column layout of the delivery dataset.
//!
//! Every column the loader, cleaner, and analyzers touch is named here once.
//! The header row of an input file is checked against [`COLUMNS`] before any
//! record is read.

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;

use crate::error::SchemaError;

/// Literal text the dataset uses for a missing value. Note the trailing space.
pub const SENTINEL: &str = "NaN ";

/// Text format of `Order_Date` in the raw file.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Separates the unit label from the minutes in `Time_taken(min)`.
pub const DURATION_DELIMITER: &str = "(min) ";

/// City categories in display order, spelled as in the dataset.
pub const CITY_CATEGORIES: [&str; 3] = ["Metropolitian", "Urban", "Semi-Urban"];

/// Earliest order date selectable as an upper bound.
pub const DATE_WINDOW_START: NaiveDate = NaiveDate::from_ymd_opt(2022, 2, 11).expect("window start");

/// Latest order date selectable as an upper bound.
pub const DATE_WINDOW_END: NaiveDate = NaiveDate::from_ymd_opt(2022, 4, 6).expect("window end");

pub const ID: &str = "ID";
pub const COURIER_ID: &str = "Delivery_person_ID";
pub const COURIER_AGE: &str = "Delivery_person_Age";
pub const COURIER_RATING: &str = "Delivery_person_Ratings";
pub const RESTAURANT_LAT: &str = "Restaurant_latitude";
pub const RESTAURANT_LON: &str = "Restaurant_longitude";
pub const DELIVERY_LAT: &str = "Delivery_location_latitude";
pub const DELIVERY_LON: &str = "Delivery_location_longitude";
pub const ORDER_DATE: &str = "Order_Date";
pub const WEATHER: &str = "Weatherconditions";
pub const TRAFFIC_DENSITY: &str = "Road_traffic_density";
pub const VEHICLE_CONDITION: &str = "Vehicle_condition";
pub const ORDER_TYPE: &str = "Type_of_order";
pub const VEHICLE_TYPE: &str = "Type_of_vehicle";
pub const MULTIPLE_DELIVERIES: &str = "multiple_deliveries";
pub const FESTIVAL: &str = "Festival";
pub const CITY: &str = "City";
pub const DURATION: &str = "Time_taken(min)";

/// Columns an input file must carry. Anything else in the file is ignored.
pub static COLUMNS: &[&str] = &[
    ID,
    COURIER_ID,
    COURIER_AGE,
    COURIER_RATING,
    RESTAURANT_LAT,
    RESTAURANT_LON,
    DELIVERY_LAT,
    DELIVERY_LON,
    ORDER_DATE,
    WEATHER,
    TRAFFIC_DENSITY,
    VEHICLE_CONDITION,
    ORDER_TYPE,
    VEHICLE_TYPE,
    MULTIPLE_DELIVERIES,
    FESTIVAL,
    CITY,
    DURATION,
];

/// Checks that every required column appears in `headers`.
///
/// Names must match exactly; the loader deserializes rows against them.
///
/// # Errors
///
/// Returns [`SchemaError::MissingColumns`] listing the absent columns in
/// schema order.
pub fn validate_headers<'a, I>(headers: I) -> Result<(), SchemaError>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = headers.into_iter().collect();

    let missing: Vec<String> = COLUMNS
        .iter()
        .filter(|name| !present.contains(name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::MissingColumns(missing))
    }
}

/// Road congestion level attached to each order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ValueEnum)]
pub enum TrafficDensity {
    Low,
    Medium,
    High,
    Jam,
}

impl TrafficDensity {
    pub const ALL: [TrafficDensity; 4] = [
        TrafficDensity::Low,
        TrafficDensity::Medium,
        TrafficDensity::High,
        TrafficDensity::Jam,
    ];

    /// Label as it appears in a cleaned record.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrafficDensity::Low => "Low",
            TrafficDensity::Medium => "Medium",
            TrafficDensity::High => "High",
            TrafficDensity::Jam => "Jam",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == label.trim())
    }
}

/// True when `value` is the dataset's missing-value marker, either raw or
/// already trimmed.
pub fn is_sentinel(value: &str) -> bool {
    value == SENTINEL || value == SENTINEL.trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_headers() -> Vec<&'static str> {
        COLUMNS.to_vec()
    }

    #[test]
    fn test_validate_headers_complete() {
        assert!(validate_headers(all_headers()).is_ok());
    }

    #[test]
    fn test_validate_headers_ignores_extra_columns() {
        let mut headers = all_headers();
        headers.push("Time_Orderd");
        headers.push("Time_Order_picked");
        assert!(validate_headers(headers).is_ok());
    }

    #[test]
    fn test_validate_headers_reports_missing() {
        let headers: Vec<&str> = all_headers()
            .into_iter()
            .filter(|h| *h != CITY && *h != DURATION)
            .collect();

        match validate_headers(headers) {
            Err(SchemaError::MissingColumns(missing)) => {
                assert_eq!(missing, vec![CITY.to_string(), DURATION.to_string()]);
            }
            other => panic!("expected missing columns, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_headers_rejects_padded_name() {
        let headers: Vec<&str> = all_headers()
            .into_iter()
            .map(|h| if h == CITY { "City " } else { h })
            .collect();

        match validate_headers(headers) {
            Err(SchemaError::MissingColumns(missing)) => assert_eq!(missing, vec![CITY.to_string()]),
            other => panic!("expected missing columns, got {:?}", other),
        }
    }

    #[test]
    fn test_traffic_density_labels() {
        assert_eq!(TrafficDensity::from_label("Jam "), Some(TrafficDensity::Jam));
        assert_eq!(TrafficDensity::from_label("NaN"), None);
        assert_eq!(TrafficDensity::High.as_str(), "High");
    }

    #[test]
    fn test_is_sentinel() {
        assert!(is_sentinel("NaN "));
        assert!(is_sentinel("NaN"));
        assert!(!is_sentinel("29"));
    }

    #[test]
    fn test_date_window_ordering() {
        assert!(DATE_WINDOW_START < DATE_WINDOW_END);
    }
}
