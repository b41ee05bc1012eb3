//! One dashboard session: the dataset loaded and cleaned once, then read by
//! every view.

use tracing::info;

use crate::cleaning::{Order, clean};
use crate::config::DashboardConfig;
use crate::error::SessionError;
use crate::filter::OrderFilter;
use crate::parser::{RawOrder, load_orders};
use crate::stats::CleanReport;

/// Cleaned batch held for the lifetime of a session. Never mutated after
/// [`Session::open`]; views work on filtered copies.
#[derive(Debug)]
pub struct Session {
    orders: Vec<Order>,
    report: CleanReport,
}

impl Session {
    /// Checks the logo asset, then loads and cleans the order file.
    ///
    /// # Errors
    ///
    /// Any failure here is fatal: a missing logo or data file, a missing
    /// column, or a value that cannot be coerced.
    #[tracing::instrument(skip(config), fields(data = %config.data_path.display()))]
    pub fn open(config: &DashboardConfig) -> Result<Self, SessionError> {
        if !config.logo_path.is_file() {
            return Err(SessionError::MissingAsset(
                config.logo_path.display().to_string(),
            ));
        }

        let raw = load_orders(&config.data_path)?;
        let session = Self::from_raw(raw)?;
        info!(orders = session.orders.len(), "Session ready");
        Ok(session)
    }

    /// Builds a session from rows already in memory.
    pub fn from_raw(raw: Vec<RawOrder>) -> Result<Self, SessionError> {
        let (orders, report) = clean(raw)?;
        Ok(Session { orders, report })
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn report(&self) -> &CleanReport {
        &self.report
    }

    /// Rows selected by `filter`, as a fresh batch.
    pub fn view(&self, filter: &OrderFilter) -> Vec<Order> {
        filter.apply(&self.orders)
    }
}
