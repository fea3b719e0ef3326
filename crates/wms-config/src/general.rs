//! General application configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ConfigError;

/// Line items per preparation sheet.
const fn default_sheet_size() -> u32 {
    25
}

/// Rows per page in paged listings.
const fn default_page_size() -> u32 {
    25
}

const fn default_dashboard_refresh_secs() -> u64 {
    30
}

const fn default_assignment_refresh_secs() -> u64 {
    30
}

const fn default_report_refresh_secs() -> u64 {
    60
}

/// Default result limit for dashboard lists.
const fn default_limit() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    #[serde(default = "default_sheet_size")]
    pub sheet_size: u32,

    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Polling interval of `wms dashboard --watch`.
    #[serde(default = "default_dashboard_refresh_secs")]
    pub dashboard_refresh_secs: u64,

    /// Polling interval of the order, sheet and pallet views.
    #[serde(default = "default_assignment_refresh_secs")]
    pub assignment_refresh_secs: u64,

    #[serde(default = "default_report_refresh_secs")]
    pub report_refresh_secs: u64,

    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            sheet_size: default_sheet_size(),
            page_size: default_page_size(),
            dashboard_refresh_secs: default_dashboard_refresh_secs(),
            assignment_refresh_secs: default_assignment_refresh_secs(),
            report_refresh_secs: default_report_refresh_secs(),
            default_limit: default_limit(),
        }
    }
}

impl GeneralConfig {
    pub const fn dashboard_refresh(&self) -> Duration {
        Duration::from_secs(self.dashboard_refresh_secs)
    }

    pub const fn assignment_refresh(&self) -> Duration {
        Duration::from_secs(self.assignment_refresh_secs)
    }

    pub const fn report_refresh(&self) -> Duration {
        Duration::from_secs(self.report_refresh_secs)
    }

    /// Reject zero sizes and zero polling intervals.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("general.sheet_size", u64::from(self.sheet_size)),
            ("general.page_size", u64::from(self.page_size)),
            ("general.dashboard_refresh_secs", self.dashboard_refresh_secs),
            ("general.assignment_refresh_secs", self.assignment_refresh_secs),
            ("general.report_refresh_secs", self.report_refresh_secs),
        ];
        for (field, value) in checks {
            if value == 0 {
                return Err(ConfigError::ZeroSetting { field });
            }
        }
        Ok(())
    }
}
