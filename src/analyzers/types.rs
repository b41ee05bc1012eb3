//! Row types returned by the analyzers.
//!
//! Each is a plain serializable record so any chart or table front end can
//! consume it without knowing how it was computed.

use chrono::NaiveDate;
use serde::Serialize;

/// Order count for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyOrders {
    pub date: NaiveDate,
    pub orders: usize,
}

/// Order count for one week-of-year label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyOrders {
    pub week: String,
    pub orders: usize,
}

/// Orders per active courier for one week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyOrderShare {
    pub week: String,
    pub orders: usize,
    pub couriers: usize,
    /// `None` when no courier is recorded for the week.
    pub orders_per_courier: Option<f64>,
}

/// Fraction of orders placed under one traffic-density category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficShare {
    pub traffic_density: String,
    pub orders: usize,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityTrafficVolume {
    pub city: String,
    pub traffic_density: String,
    pub orders: usize,
}

/// Representative delivery point for a (city, traffic density) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityTrafficLocation {
    pub city: String,
    pub traffic_density: String,
    pub delivery_latitude: f64,
    pub delivery_longitude: f64,
}

/// Longest recorded delivery of one courier within one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourierDuration {
    pub city: String,
    pub courier_id: String,
    pub duration_minutes: u32,
}

/// Rating summary for one value of a grouping key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingStats {
    pub key: String,
    pub ratings: usize,
    pub mean: Option<f64>,
    pub stddev: Option<f64>,
}

/// Headline courier figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CourierOverview {
    pub oldest_age: Option<u32>,
    pub youngest_age: Option<u32>,
    pub best_vehicle_condition: Option<u32>,
    pub worst_vehicle_condition: Option<u32>,
}
