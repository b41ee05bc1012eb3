use chrono::NaiveDate;

use crate::cleaning::Order;

/// A cleaned order with neutral defaults; tests override the fields they care about.
pub(crate) fn order(id: &str, courier_id: &str, order_date: NaiveDate) -> Order {
    Order {
        id: id.to_string(),
        courier_id: courier_id.to_string(),
        courier_age: 30,
        courier_rating: 4.5,
        restaurant_latitude: 12.9,
        restaurant_longitude: 77.6,
        delivery_latitude: 13.0,
        delivery_longitude: 77.7,
        order_date,
        weather: "conditions Sunny".to_string(),
        traffic_density: "Low".to_string(),
        vehicle_condition: 1,
        order_type: "Meal".to_string(),
        vehicle_type: "motorcycle".to_string(),
        multiple_deliveries: 1,
        festival: "No".to_string(),
        city: "Urban".to_string(),
        duration_minutes: 25,
    }
}

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
