//! Company-wide views: order volume over time, traffic mix, and geography.

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};

use crate::analyzers::types::{
    CityTrafficLocation, CityTrafficVolume, DailyOrders, TrafficShare, WeeklyOrderShare,
    WeeklyOrders,
};
use crate::analyzers::utility::median;
use crate::cleaning::Order;
use crate::schema::is_sentinel;

/// Number of orders per day, in date order.
pub fn orders_by_day(orders: &[Order]) -> Vec<DailyOrders> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for order in orders {
        *counts.entry(order.order_date).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(date, orders)| DailyOrders { date, orders })
        .collect()
}

/// Number of orders per week-of-year label, in label order.
pub fn orders_by_week(orders: &[Order]) -> Vec<WeeklyOrders> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for order in orders {
        *counts.entry(order.week_of_year()).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(week, orders)| WeeklyOrders { week, orders })
        .collect()
}

/// Weekly order count divided by the number of distinct couriers active that
/// week. Blank courier ids are not counted as couriers.
pub fn order_share_by_week(orders: &[Order]) -> Vec<WeeklyOrderShare> {
    let mut weeks: BTreeMap<String, (usize, HashSet<&str>)> = BTreeMap::new();
    for order in orders {
        let (count, couriers) = weeks.entry(order.week_of_year()).or_default();
        *count += 1;
        if !order.courier_id.is_empty() {
            couriers.insert(order.courier_id.as_str());
        }
    }

    weeks
        .into_iter()
        .map(|(week, (orders, couriers))| {
            let couriers = couriers.len();
            let orders_per_courier = if couriers == 0 {
                None
            } else {
                Some(orders as f64 / couriers as f64)
            };
            WeeklyOrderShare {
                week,
                orders,
                couriers,
                orders_per_courier,
            }
        })
        .collect()
}

/// Share of orders per traffic-density category, ignoring the missing-value
/// category. Shares sum to 1.0 whenever any category remains.
pub fn traffic_order_share(orders: &[Order]) -> Vec<TrafficShare> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for order in orders {
        if is_sentinel(&order.traffic_density) {
            continue;
        }
        *counts.entry(order.traffic_density.as_str()).or_default() += 1;
    }

    let total: usize = counts.values().sum();
    if total == 0 {
        return Vec::new();
    }

    counts
        .into_iter()
        .map(|(traffic_density, orders)| TrafficShare {
            traffic_density: traffic_density.to_string(),
            orders,
            share: orders as f64 / total as f64,
        })
        .collect()
}

/// Order volume per (city, traffic density) pair.
pub fn traffic_order_city(orders: &[Order]) -> Vec<CityTrafficVolume> {
    let mut counts: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for order in orders {
        *counts
            .entry((order.city.as_str(), order.traffic_density.as_str()))
            .or_default() += 1;
    }

    counts
        .into_iter()
        .map(|((city, traffic_density), orders)| CityTrafficVolume {
            city: city.to_string(),
            traffic_density: traffic_density.to_string(),
            orders,
        })
        .collect()
}

/// Median delivery coordinates per (city, traffic density) pair, one map
/// marker per group.
pub fn median_location_by_city_traffic(orders: &[Order]) -> Vec<CityTrafficLocation> {
    let mut groups: BTreeMap<(&str, &str), (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for order in orders {
        let (lats, lons) = groups
            .entry((order.city.as_str(), order.traffic_density.as_str()))
            .or_default();
        lats.push(order.delivery_latitude);
        lons.push(order.delivery_longitude);
    }

    groups
        .into_iter()
        .filter_map(|((city, traffic_density), (lats, lons))| {
            Some(CityTrafficLocation {
                city: city.to_string(),
                traffic_density: traffic_density.to_string(),
                delivery_latitude: median(&lats)?,
                delivery_longitude: median(&lons)?,
            })
        })
        .collect()
}
