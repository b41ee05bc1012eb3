use serde::Serialize;
use std::collections::BTreeMap;

/// Why a raw row was left out of the cleaned batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    SentinelAge,
    SentinelTrafficDensity,
    SentinelCity,
    SentinelFestival,
    SentinelMultipleDeliveries,
}

impl DropReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropReason::SentinelAge => "sentinel_age",
            DropReason::SentinelTrafficDensity => "sentinel_traffic_density",
            DropReason::SentinelCity => "sentinel_city",
            DropReason::SentinelFestival => "sentinel_festival",
            DropReason::SentinelMultipleDeliveries => "sentinel_multiple_deliveries",
        }
    }
}

/// Row accounting for one cleaning run.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct CleanReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub rows_dropped: usize,
    /// Each dropped row is counted once, under the first check it failed.
    pub dropped_by_reason: BTreeMap<DropReason, usize>,
}

impl CleanReport {
    pub fn new(rows_read: usize) -> Self {
        CleanReport {
            rows_read,
            ..Default::default()
        }
    }

    pub fn record_drop(&mut self, reason: DropReason) {
        self.rows_dropped += 1;
        *self.dropped_by_reason.entry(reason).or_default() += 1;
    }

    pub fn dropped(&self, reason: DropReason) -> usize {
        self.dropped_by_reason.get(&reason).copied().unwrap_or(0)
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    pub fn dropped_pct(&self) -> f64 {
        Self::pct(self.rows_dropped, self.rows_read)
    }
}
