//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Access guard statistics

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Access guard statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct GuardStats {
    /// Number of authorization checks
    pub checks: u64,

    /// Number of granted checks
    pub grants: u64,

    /// Number of denied checks
    pub denials: u64,

    /// Last authorization check
    pub last_check: Option<DateTime<Utc>>,
}

impl GuardStats {
    /// Create new guard statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an authorization check result
    pub fn record_check(&mut self, granted: bool) {
        self.checks += 1;
        self.last_check = Some(Utc::now());
        if granted {
            self.grants += 1;
        } else {
            self.denials += 1;
        }
    }

    /// Share of checks that were granted
    pub fn grant_rate(&self) -> f64 {
        if self.checks == 0 {
            0.0
        } else {
            self.grants as f64 / self.checks as f64
        }
    }
}
