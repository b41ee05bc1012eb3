//! Date and traffic-density selection applied before every aggregation.

use chrono::NaiveDate;

use crate::cleaning::Order;
use crate::error::FilterError;
use crate::schema::{DATE_WINDOW_END, DATE_WINDOW_START, TrafficDensity};

/// Row selection chosen by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderFilter {
    /// Orders dated strictly before this day are kept.
    pub until: NaiveDate,
    pub traffic: Vec<TrafficDensity>,
}

impl Default for OrderFilter {
    fn default() -> Self {
        OrderFilter {
            until: DATE_WINDOW_END,
            traffic: TrafficDensity::ALL.to_vec(),
        }
    }
}

impl OrderFilter {
    /// Builds a filter, rejecting an upper bound outside the dataset window.
    pub fn new(until: NaiveDate, traffic: Vec<TrafficDensity>) -> Result<Self, FilterError> {
        if until < DATE_WINDOW_START || until > DATE_WINDOW_END {
            return Err(FilterError::DateOutOfWindow {
                date: until,
                start: DATE_WINDOW_START,
                end: DATE_WINDOW_END,
            });
        }
        Ok(OrderFilter { until, traffic })
    }

    pub fn matches(&self, order: &Order) -> bool {
        order.order_date < self.until
            && TrafficDensity::from_label(&order.traffic_density)
                .is_some_and(|t| self.traffic.contains(&t))
    }

    /// Returns the selected rows as a new batch; `orders` is left untouched.
    pub fn apply(&self, orders: &[Order]) -> Vec<Order> {
        orders.iter().filter(|o| self.matches(o)).cloned().collect()
    }
}
