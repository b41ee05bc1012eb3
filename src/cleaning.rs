//! Turns raw text rows into typed [`Order`] records.
//!
//! Rows whose age, traffic density, city, festival flag or multiple-deliveries
//! count hold the missing-value sentinel are dropped and counted in the
//! returned [`CleanReport`]. Any other value that fails to parse aborts the run.

use chrono::NaiveDate;
use serde::Serialize;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::error::CleanError;
use crate::parser::RawOrder;
use crate::schema::{self, DATE_FORMAT, DURATION_DELIMITER, SENTINEL};
use crate::stats::{CleanReport, DropReason};

/// A delivery order after cleaning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: String,
    pub courier_id: String,
    pub courier_age: u32,
    /// NaN when the source row holds a `NaN` literal here.
    pub courier_rating: f64,
    pub restaurant_latitude: f64,
    pub restaurant_longitude: f64,
    pub delivery_latitude: f64,
    pub delivery_longitude: f64,
    pub order_date: NaiveDate,
    pub weather: String,
    pub traffic_density: String,
    pub vehicle_condition: u32,
    pub order_type: String,
    pub vehicle_type: String,
    pub multiple_deliveries: u32,
    pub festival: String,
    pub city: String,
    pub duration_minutes: u32,
}

impl Order {
    /// Week-of-year label, Sunday-first (`%U`). Days before the first Sunday
    /// of the year fall in week `"00"`.
    pub fn week_of_year(&self) -> String {
        self.order_date.format("%U").to_string()
    }
}

impl From<&Order> for RawOrder {
    /// Renders a cleaned order back into the input file's text layout.
    fn from(order: &Order) -> Self {
        RawOrder {
            id: order.id.clone(),
            courier_id: order.courier_id.clone(),
            courier_age: order.courier_age.to_string(),
            courier_rating: order.courier_rating.to_string(),
            restaurant_latitude: order.restaurant_latitude.to_string(),
            restaurant_longitude: order.restaurant_longitude.to_string(),
            delivery_latitude: order.delivery_latitude.to_string(),
            delivery_longitude: order.delivery_longitude.to_string(),
            order_date: order.order_date.format(DATE_FORMAT).to_string(),
            weather: order.weather.clone(),
            traffic_density: order.traffic_density.clone(),
            vehicle_condition: order.vehicle_condition.to_string(),
            order_type: order.order_type.clone(),
            vehicle_type: order.vehicle_type.clone(),
            multiple_deliveries: order.multiple_deliveries.to_string(),
            festival: order.festival.clone(),
            city: order.city.clone(),
            duration: format!("{}{}", DURATION_DELIMITER, order.duration_minutes),
        }
    }
}

enum Outcome {
    Kept(Order),
    Dropped(DropReason),
}

/// Cleans a raw batch.
///
/// Row order is preserved and no row is ever added.
///
/// # Errors
///
/// Returns [`CleanError::InvalidValue`] for the first non-sentinel value that
/// cannot be coerced to its column type. Rows are numbered from 1, not
/// counting the header.
#[tracing::instrument(skip(raw), fields(rows = raw.len()))]
pub fn clean(raw: Vec<RawOrder>) -> Result<(Vec<Order>, CleanReport), CleanError> {
    let mut report = CleanReport::new(raw.len());
    let mut orders = Vec::with_capacity(raw.len());

    for (idx, row) in raw.into_iter().enumerate() {
        let row_number = idx + 1;
        match clean_row(row_number, row)? {
            Outcome::Kept(order) => orders.push(order),
            Outcome::Dropped(reason) => {
                debug!(row = row_number, reason = reason.as_str(), "Row dropped");
                report.record_drop(reason);
            }
        }
    }

    report.rows_kept = orders.len();

    if report.rows_dropped > 0 {
        warn!(
            rows_dropped = report.rows_dropped,
            dropped_pct = report.dropped_pct(),
            "Rows holding the missing-value sentinel were dropped"
        );
    }
    info!(
        rows_read = report.rows_read,
        rows_kept = report.rows_kept,
        rows_dropped = report.rows_dropped,
        "Cleaning complete"
    );

    Ok((orders, report))
}

fn clean_row(row: usize, raw: RawOrder) -> Result<Outcome, CleanError> {
    // Sentinel checks run on the untouched text, before any coercion.
    let sentinel_checks = [
        (&raw.courier_age, DropReason::SentinelAge),
        (&raw.traffic_density, DropReason::SentinelTrafficDensity),
        (&raw.city, DropReason::SentinelCity),
        (&raw.festival, DropReason::SentinelFestival),
    ];
    for (value, reason) in sentinel_checks {
        if value == SENTINEL {
            return Ok(Outcome::Dropped(reason));
        }
    }

    let courier_age = parse_value::<u32>(row, schema::COURIER_AGE, &raw.courier_age)?;
    let courier_rating = parse_value::<f64>(row, schema::COURIER_RATING, &raw.courier_rating)?;
    let order_date = parse_date(row, &raw.order_date)?;

    if raw.multiple_deliveries == SENTINEL {
        return Ok(Outcome::Dropped(DropReason::SentinelMultipleDeliveries));
    }
    let multiple_deliveries =
        parse_value::<u32>(row, schema::MULTIPLE_DELIVERIES, &raw.multiple_deliveries)?;

    let duration_minutes = parse_duration(&raw.duration).ok_or_else(|| CleanError::InvalidValue {
        row,
        column: schema::DURATION,
        value: raw.duration.clone(),
    })?;

    Ok(Outcome::Kept(Order {
        id: raw.id.trim().to_string(),
        courier_id: raw.courier_id.trim().to_string(),
        courier_age,
        courier_rating,
        restaurant_latitude: parse_value(row, schema::RESTAURANT_LAT, &raw.restaurant_latitude)?,
        restaurant_longitude: parse_value(row, schema::RESTAURANT_LON, &raw.restaurant_longitude)?,
        delivery_latitude: parse_value(row, schema::DELIVERY_LAT, &raw.delivery_latitude)?,
        delivery_longitude: parse_value(row, schema::DELIVERY_LON, &raw.delivery_longitude)?,
        order_date,
        weather: raw.weather,
        traffic_density: raw.traffic_density.trim().to_string(),
        vehicle_condition: parse_value(row, schema::VEHICLE_CONDITION, &raw.vehicle_condition)?,
        order_type: raw.order_type.trim().to_string(),
        vehicle_type: raw.vehicle_type.trim().to_string(),
        multiple_deliveries,
        festival: raw.festival.trim().to_string(),
        city: raw.city.trim().to_string(),
        duration_minutes,
    }))
}

fn parse_value<T: FromStr>(row: usize, column: &'static str, value: &str) -> Result<T, CleanError> {
    value.trim().parse().map_err(|_| CleanError::InvalidValue {
        row,
        column,
        value: value.to_string(),
    })
}

fn parse_date(row: usize, value: &str) -> Result<NaiveDate, CleanError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| CleanError::InvalidValue {
        row,
        column: schema::ORDER_DATE,
        value: value.to_string(),
    })
}

/// Extracts whole minutes from a duration such as `"(min) 24"`.
///
/// Text without the unit label is read as bare minutes, so a batch that was
/// already cleaned and written back cleans to the same values.
pub fn parse_duration(text: &str) -> Option<u32> {
    let minutes = match text.split_once(DURATION_DELIMITER) {
        Some((_, minutes)) => minutes,
        None => text,
    };
    minutes.trim().parse().ok()
}
