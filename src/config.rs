//! Startup settings for a dashboard session.

use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "dataset/train.csv";
pub const DEFAULT_LOGO_PATH: &str = "logo.PNG";

/// Locations of the files a session reads once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub logo_path: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            logo_path: PathBuf::from(DEFAULT_LOGO_PATH),
        }
    }
}

impl DashboardConfig {
    pub fn new(data_path: impl Into<PathBuf>, logo_path: impl Into<PathBuf>) -> Self {
        DashboardConfig {
            data_path: data_path.into(),
            logo_path: logo_path.into(),
        }
    }
}
