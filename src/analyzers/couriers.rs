//! Courier views: ratings, age and vehicle extremes, delivery speed rankings.

use clap::ValueEnum;
use std::collections::BTreeMap;

use crate::analyzers::types::{CourierDuration, CourierOverview, RatingStats};
use crate::analyzers::utility::{mean, stddev};
use crate::cleaning::Order;
use crate::schema::CITY_CATEGORIES;

/// Rows kept per city in [`top_couriers`].
pub const TOP_N: usize = 10;

/// Field ratings are grouped by in [`rating_stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RatingKey {
    Courier,
    TrafficDensity,
    Weather,
}

impl RatingKey {
    fn value<'a>(&self, order: &'a Order) -> &'a str {
        match self {
            RatingKey::Courier => &order.courier_id,
            RatingKey::TrafficDensity => &order.traffic_density,
            RatingKey::Weather => &order.weather,
        }
    }
}

/// Mean and sample standard deviation of courier ratings per key value.
///
/// NaN ratings are skipped. A group left with no rating reports `None` for
/// both figures; a group with a single rating has no standard deviation.
pub fn rating_stats(orders: &[Order], key: RatingKey) -> Vec<RatingStats> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for order in orders {
        let ratings = groups.entry(key.value(order)).or_default();
        if !order.courier_rating.is_nan() {
            ratings.push(order.courier_rating);
        }
    }

    groups
        .into_iter()
        .map(|(key, ratings)| {
            let (avg, sd) = if ratings.is_empty() {
                (None, None)
            } else {
                let avg = mean(&ratings);
                (Some(avg), stddev(&ratings, avg))
            };
            RatingStats {
                key: key.to_string(),
                ratings: ratings.len(),
                mean: avg,
                stddev: sd,
            }
        })
        .collect()
}

/// Oldest and youngest courier, best and worst vehicle condition.
pub fn courier_overview(orders: &[Order]) -> CourierOverview {
    CourierOverview {
        oldest_age: orders.iter().map(|o| o.courier_age).max(),
        youngest_age: orders.iter().map(|o| o.courier_age).min(),
        best_vehicle_condition: orders.iter().map(|o| o.vehicle_condition).max(),
        worst_vehicle_condition: orders.iter().map(|o| o.vehicle_condition).min(),
    }
}

/// Ranks couriers by their longest delivery within each city.
///
/// `ascending = true` lists the fastest couriers first. At most [`TOP_N`]
/// couriers are kept for each of [`CITY_CATEGORIES`], concatenated in that
/// order; a city with fewer couriers yields fewer rows. Equal durations are
/// ordered by courier id.
pub fn top_couriers(orders: &[Order], ascending: bool) -> Vec<CourierDuration> {
    let mut longest: BTreeMap<(&str, &str), u32> = BTreeMap::new();
    for order in orders {
        longest
            .entry((order.city.as_str(), order.courier_id.as_str()))
            .and_modify(|d| *d = (*d).max(order.duration_minutes))
            .or_insert(order.duration_minutes);
    }

    let mut ranked = Vec::new();
    for city in CITY_CATEGORIES {
        let mut couriers: Vec<(&str, u32)> = longest
            .iter()
            .filter(|((c, _), _)| *c == city)
            .map(|((_, courier), duration)| (*courier, *duration))
            .collect();

        couriers.sort_by(|a, b| {
            let by_duration = if ascending {
                a.1.cmp(&b.1)
            } else {
                b.1.cmp(&a.1)
            };
            by_duration.then_with(|| a.0.cmp(b.0))
        });

        ranked.extend(
            couriers
                .into_iter()
                .take(TOP_N)
                .map(|(courier_id, duration_minutes)| CourierDuration {
                    city: city.to_string(),
                    courier_id: courier_id.to_string(),
                    duration_minutes,
                }),
        );
    }

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::{date, order};
    use std::collections::HashSet;

    fn delivery(courier: &str, city: &str, minutes: u32) -> Order {
        let mut o = order(&format!("{}-{}", courier, minutes), courier, date(2022, 3, 1));
        o.city = city.to_string();
        o.duration_minutes = minutes;
        o
    }

    #[test]
    fn test_top_couriers_uses_max_duration_per_courier() {
        let orders = vec![
            delivery("A", "Urban", 10),
            delivery("A", "Urban", 40),
            delivery("B", "Urban", 20),
        ];

        let fastest = top_couriers(&orders, true);
        assert_eq!(fastest.len(), 2);
        assert_eq!(fastest[0].courier_id, "B");
        assert_eq!(fastest[0].duration_minutes, 20);
        assert_eq!(fastest[1].courier_id, "A");
        assert_eq!(fastest[1].duration_minutes, 40);

        let slowest = top_couriers(&orders, false);
        assert_eq!(slowest[0].courier_id, "A");
    }

    #[test]
    fn test_top_couriers_caps_each_city_and_keeps_city_order() {
        let mut orders = Vec::new();
        for i in 0..15 {
            orders.push(delivery(&format!("S{:02}", i), "Semi-Urban", 10 + i));
            orders.push(delivery(&format!("M{:02}", i), "Metropolitian", 20 + i));
        }
        orders.push(delivery("U00", "Urban", 30));

        let ranked = top_couriers(&orders, true);
        assert_eq!(ranked.len(), 21);

        let cities: Vec<&str> = ranked.iter().map(|r| r.city.as_str()).collect();
        assert!(cities[..10].iter().all(|c| *c == "Metropolitian"));
        assert_eq!(cities[10], "Urban");
        assert!(cities[11..].iter().all(|c| *c == "Semi-Urban"));

        assert_eq!(ranked[0].courier_id, "M00");
        assert_eq!(ranked[11].courier_id, "S00");
        assert_eq!(ranked[20].courier_id, "S09");
    }

    #[test]
    fn test_top_couriers_no_duplicates_within_city() {
        let mut orders = Vec::new();
        for minutes in [15, 25, 35] {
            orders.push(delivery("A", "Metropolitian", minutes));
            orders.push(delivery("B", "Metropolitian", minutes + 1));
        }

        let ranked = top_couriers(&orders, false);
        let ids: HashSet<&str> = ranked.iter().map(|r| r.courier_id.as_str()).collect();
        assert_eq!(ids.len(), ranked.len());
        assert_eq!(ranked[0].courier_id, "B");
        assert_eq!(ranked[0].duration_minutes, 36);
    }

    #[test]
    fn test_top_couriers_ignores_unknown_cities() {
        let orders = vec![delivery("A", "NaN", 10)];
        assert!(top_couriers(&orders, true).is_empty());
    }

    #[test]
    fn test_rating_stats_by_traffic() {
        let mut orders = Vec::new();
        for (traffic, rating) in [("Jam", 4.0), ("Jam", 5.0), ("Low", 4.8)] {
            let mut o = order("x", "A", date(2022, 3, 1));
            o.traffic_density = traffic.to_string();
            o.courier_rating = rating;
            orders.push(o);
        }

        let stats = rating_stats(&orders, RatingKey::TrafficDensity);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].key, "Jam");
        assert_eq!(stats[0].ratings, 2);
        assert_eq!(stats[0].mean, Some(4.5));
        let sd = stats[0].stddev.unwrap();
        assert!((sd - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
        assert_eq!(stats[1].key, "Low");
        assert_eq!(stats[1].stddev, None);
    }

    #[test]
    fn test_rating_stats_skips_nan() {
        let mut nan = order("x", "A", date(2022, 3, 1));
        nan.courier_rating = f64::NAN;
        let mut rated = order("y", "A", date(2022, 3, 1));
        rated.courier_rating = 4.0;
        let mut unrated = order("z", "B", date(2022, 3, 1));
        unrated.courier_rating = f64::NAN;

        let stats = rating_stats(&[nan, rated, unrated], RatingKey::Courier);
        assert_eq!(stats[0].key, "A");
        assert_eq!(stats[0].ratings, 1);
        assert_eq!(stats[0].mean, Some(4.0));
        assert_eq!(stats[1].key, "B");
        assert_eq!(stats[1].mean, None);
    }

    #[test]
    fn test_rating_stats_by_weather() {
        let mut fog = order("x", "A", date(2022, 3, 1));
        fog.weather = "conditions Fog".into();
        let sunny = order("y", "A", date(2022, 3, 1));

        let stats = rating_stats(&[fog, sunny], RatingKey::Weather);
        let keys: Vec<&str> = stats.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["conditions Fog", "conditions Sunny"]);
    }

    #[test]
    fn test_courier_overview() {
        let mut young = order("a", "A", date(2022, 3, 1));
        young.courier_age = 20;
        young.vehicle_condition = 0;
        let mut old = order("b", "B", date(2022, 3, 1));
        old.courier_age = 39;
        old.vehicle_condition = 3;

        let overview = courier_overview(&[young, old]);
        assert_eq!(overview.oldest_age, Some(39));
        assert_eq!(overview.youngest_age, Some(20));
        assert_eq!(overview.best_vehicle_condition, Some(3));
        assert_eq!(overview.worst_vehicle_condition, Some(0));
    }

    #[test]
    fn test_empty_input() {
        assert!(top_couriers(&[], true).is_empty());
        assert!(rating_stats(&[], RatingKey::Courier).is_empty());
        assert_eq!(courier_overview(&[]), CourierOverview::default());
    }
}
